//! Win/lose detection
//!
//! Watches combatant health after every mutation and reports a terminal
//! outcome at most once per battle session. When boss defeat and player
//! wipe become true in the same evaluation, the boss check runs first,
//! so Win takes precedence.

use serde::{Deserialize, Serialize};

use crate::battle::combatant::Roster;

/// Terminal result of a battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    Win,
    Lose,
}

/// Latching outcome detector
#[derive(Debug, Clone, Default)]
pub struct OutcomeDetector {
    resolved: bool,
}

impl OutcomeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once a non-None result has been reported
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Evaluate current health; returns Some exactly once per session
    pub fn evaluate(&mut self, roster: &Roster) -> Option<BattleOutcome> {
        if self.resolved {
            return None;
        }

        // Boss-defeat check precedes player-wipe: Win wins ties.
        if !roster.boss.is_alive() {
            self.resolved = true;
            return Some(BattleOutcome::Win);
        }
        if roster.all_players_dead() {
            self.resolved = true;
            return Some(BattleOutcome::Lose);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::combatant::Combatant;
    use crate::core::types::Side;

    fn roster() -> Roster {
        let boss = Combatant::new("Fluorin", "F", 100, 10, Side::Boss);
        let players = vec![
            Combatant::new("Hydrogen", "H", 30, 5, Side::Player),
            Combatant::new("Oxygen", "O", 30, 5, Side::Player),
        ];
        Roster::new(boss, players)
    }

    #[test]
    fn test_no_outcome_while_both_sides_live() {
        let roster = roster();
        let mut detector = OutcomeDetector::new();
        assert_eq!(detector.evaluate(&roster), None);
        assert!(!detector.is_resolved());
    }

    #[test]
    fn test_boss_death_is_win() {
        let mut roster = roster();
        roster.boss.take_damage(100);
        let mut detector = OutcomeDetector::new();
        assert_eq!(detector.evaluate(&roster), Some(BattleOutcome::Win));
    }

    #[test]
    fn test_player_wipe_is_lose() {
        let mut roster = roster();
        for p in &mut roster.players {
            p.take_damage(30);
        }
        let mut detector = OutcomeDetector::new();
        assert_eq!(detector.evaluate(&roster), Some(BattleOutcome::Lose));
    }

    #[test]
    fn test_simultaneous_wipe_resolves_to_win() {
        let mut roster = roster();
        roster.boss.take_damage(100);
        for p in &mut roster.players {
            p.take_damage(30);
        }
        let mut detector = OutcomeDetector::new();
        assert_eq!(detector.evaluate(&roster), Some(BattleOutcome::Win));
    }

    #[test]
    fn test_reports_at_most_once() {
        let mut roster = roster();
        roster.boss.take_damage(100);
        let mut detector = OutcomeDetector::new();
        assert_eq!(detector.evaluate(&roster), Some(BattleOutcome::Win));
        assert_eq!(detector.evaluate(&roster), None);
        assert_eq!(detector.evaluate(&roster), None);
        assert!(detector.is_resolved());
    }
}
