//! Queue-wide symbol-set combos
//!
//! Runs once at player-phase end. First matching rule wins: the triple
//! outranks the pair, and only one combo fires per turn. The bonus is
//! handed to the orchestrator, which adds it to the first resolved
//! action only; the triple's self-damage penalty lands immediately,
//! before any attack resolves.

use std::collections::HashSet;

use crate::battle::combatant::Roster;
use crate::battle::log::CombatLog;
use crate::core::config::BattleConfig;
use crate::core::types::CombatantId;

/// One-time global bonus/penalty derived from the queued symbol set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ComboResult {
    /// Added to the base damage of the first action in resolution order
    pub bonus: i32,
    /// Hp each queued actor already lost when the combo fired
    pub self_damage: i32,
}

/// Inspect the completed queue and apply the matching combo, if any
pub fn detect(
    queued_actors: &[CombatantId],
    roster: &mut Roster,
    config: &BattleConfig,
    log: &mut CombatLog,
) -> ComboResult {
    let symbols: HashSet<&str> = queued_actors
        .iter()
        .filter_map(|id| roster.get(*id))
        .map(|c| c.symbol.as_str())
        .collect();

    let combos = &config.combos;

    if combos.triple.iter().all(|s| symbols.contains(s.as_str())) {
        log.push(format!(
            "Combo {}-{}-{}! +{} damage, every attacker pays {}",
            combos.triple[0],
            combos.triple[1],
            combos.triple[2],
            combos.triple_bonus,
            combos.triple_self_damage
        ));
        for id in queued_actors {
            if let Some(actor) = roster.get_mut(*id) {
                let lost = actor.take_damage(combos.triple_self_damage);
                log.push(format!("{} strains for {}", actor.name, lost));
            }
        }
        return ComboResult {
            bonus: combos.triple_bonus,
            self_damage: combos.triple_self_damage,
        };
    }

    if combos.pair.iter().all(|s| symbols.contains(s.as_str())) {
        log.push(format!(
            "Combo {}-{}! +{} damage",
            combos.pair[0], combos.pair[1], combos.pair_bonus
        ));
        return ComboResult {
            bonus: combos.pair_bonus,
            self_damage: 0,
        };
    }

    ComboResult::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::combatant::Combatant;
    use crate::core::types::Side;

    fn setup() -> (Roster, BattleConfig, CombatLog) {
        let boss = Combatant::new("Fluorin", "F", 100, 10, Side::Boss);
        let players = vec![
            Combatant::new("Hydrogen", "H", 30, 5, Side::Player),
            Combatant::new("Oxygen", "O", 30, 5, Side::Player),
            Combatant::new("Sodium", "Na", 30, 5, Side::Player),
        ];
        (
            Roster::new(boss, players),
            BattleConfig::default(),
            CombatLog::new(50),
        )
    }

    #[test]
    fn test_pair_combo_grants_medium_bonus() {
        let (mut roster, config, mut log) = setup();
        let queued = vec![roster.players[0].id, roster.players[1].id];

        let result = detect(&queued, &mut roster, &config, &mut log);
        assert_eq!(result.bonus, config.combos.pair_bonus);
        assert_eq!(result.self_damage, 0);
        // No penalty: everyone at full hp.
        assert!(roster.players.iter().all(|p| p.hp == 30));
    }

    #[test]
    fn test_triple_combo_outranks_pair_and_costs_hp() {
        let (mut roster, config, mut log) = setup();
        let queued: Vec<_> = roster.players.iter().map(|p| p.id).collect();

        let result = detect(&queued, &mut roster, &config, &mut log);
        assert_eq!(result.bonus, config.combos.triple_bonus);
        assert_eq!(result.self_damage, config.combos.triple_self_damage);
        assert!(roster
            .players
            .iter()
            .all(|p| p.hp == 30 - config.combos.triple_self_damage));
    }

    #[test]
    fn test_no_combo_for_unmatched_set() {
        let (mut roster, config, mut log) = setup();
        let queued = vec![roster.players[2].id]; // Na alone

        let result = detect(&queued, &mut roster, &config, &mut log);
        assert_eq!(result, ComboResult::default());
    }

    #[test]
    fn test_single_symbol_half_of_pair_is_no_combo() {
        let (mut roster, config, mut log) = setup();
        let queued = vec![roster.players[0].id]; // H alone

        let result = detect(&queued, &mut roster, &config, &mut log);
        assert_eq!(result.bonus, 0);
    }
}
