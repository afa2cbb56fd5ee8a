//! Turn orchestration
//!
//! The orchestrator is the single writer of battle state. It is a pure-ish
//! state machine: callers feed it `BattleEvent`s and it returns the
//! `Command`s it wants executed (timers to schedule, the final outcome to
//! surface). It never sleeps and never spawns anything, so tests can drive
//! it with an immediate clock and assert exact sequencing.
//!
//! Per-turn flow: combo detection once at player-phase end, then for each
//! queued action reaction -> damage, then a status tick; the boss then
//! retaliates against every living player in roster order, statuses tick
//! again, and the turn reopens. Outcome checks run after every mutation.

use std::collections::HashSet;

use crate::battle::combatant::Roster;
use crate::battle::combo;
use crate::battle::damage;
use crate::battle::log::CombatLog;
use crate::battle::outcome::{BattleOutcome, OutcomeDetector};
use crate::battle::reaction;
use crate::battle::scheduler::{Command, Epoch, TimerKind, TimerToken};
use crate::battle::status::StatusRegistry;
use crate::core::config::BattleConfig;
use crate::core::types::{CombatantId, Side, Turn};

/// One state of the turn state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattlePhase {
    AwaitingStart,
    PlayerPhase,
    ResolvingPlayer,
    BossPhase,
    Terminal(BattleOutcome),
}

/// A player-submitted attack intent, alive for one turn only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionQueueEntry {
    pub actor: CombatantId,
    pub target: CombatantId,
}

/// Inputs accepted by the orchestrator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleEvent {
    /// Explicit "start turn" input, valid in AwaitingStart
    StartTurn,
    /// Queue an attack for this actor (target is the boss)
    Enqueue { actor: CombatantId },
    /// Explicit "end phase" input, valid with a non-empty queue
    EndPlayerPhase,
    /// Utility action: strip every status from one combatant
    Cleanse { target: CombatantId },
    /// A previously scheduled timer fired
    Timer(TimerToken),
    /// Suspend player inputs; in-flight timers keep resolving
    Pause,
    Resume,
    /// Session teardown: strands every pending timer
    Teardown,
}

/// The authoritative battle state machine
#[derive(Debug)]
pub struct Orchestrator {
    config: BattleConfig,
    pub roster: Roster,
    pub statuses: StatusRegistry,
    pub log: CombatLog,

    phase: BattlePhase,
    turn: Turn,
    queue: Vec<ActionQueueEntry>,

    // Resolution cursors, only meaningful mid-phase.
    pending: Vec<ActionQueueEntry>,
    pending_index: usize,
    first_action_bonus: i32,
    boss_targets: Vec<CombatantId>,
    boss_index: usize,

    epoch: Epoch,
    paused: bool,
    torn_down: bool,

    detector: OutcomeDetector,
    pending_outcome: Option<BattleOutcome>,

    flashes: HashSet<CombatantId>,
}

impl Orchestrator {
    pub fn new(config: BattleConfig, roster: Roster) -> Self {
        let log = CombatLog::new(config.log_capacity);
        Self {
            config,
            roster,
            statuses: StatusRegistry::new(),
            log,
            phase: BattlePhase::AwaitingStart,
            turn: 0,
            queue: Vec::new(),
            pending: Vec::new(),
            pending_index: 0,
            first_action_bonus: 0,
            boss_targets: Vec::new(),
            boss_index: 0,
            epoch: 0,
            paused: false,
            torn_down: false,
            detector: OutcomeDetector::new(),
            pending_outcome: None,
            flashes: HashSet::new(),
        }
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn queued(&self) -> &[ActionQueueEntry] {
        &self.queue
    }

    /// Cosmetic hit-flash marker, auto-cleared by a scheduled timer
    pub fn is_flashing(&self, id: CombatantId) -> bool {
        self.flashes.contains(&id)
    }

    /// Feed one event through the state machine
    pub fn handle(&mut self, event: BattleEvent) -> Vec<Command> {
        if self.torn_down {
            return Vec::new();
        }

        match event {
            BattleEvent::StartTurn => self.on_start_turn(),
            BattleEvent::Enqueue { actor } => self.on_enqueue(actor),
            BattleEvent::EndPlayerPhase => self.on_end_player_phase(),
            BattleEvent::Cleanse { target } => self.on_cleanse(target),
            BattleEvent::Timer(token) => self.on_timer(token),
            BattleEvent::Pause => {
                self.paused = true;
                Vec::new()
            }
            BattleEvent::Resume => {
                self.paused = false;
                Vec::new()
            }
            BattleEvent::Teardown => {
                self.torn_down = true;
                // Bumping the epoch strands every outstanding timer, so
                // nothing can mutate state or notify after disposal.
                self.epoch += 1;
                tracing::info!("battle session torn down");
                Vec::new()
            }
        }
    }

    // === INPUT HANDLERS ===

    fn on_start_turn(&mut self) -> Vec<Command> {
        if self.paused {
            self.log.push("Cannot start turn while paused");
            return Vec::new();
        }
        if self.phase != BattlePhase::AwaitingStart {
            self.log.push("Turn already in progress");
            return Vec::new();
        }

        self.phase = BattlePhase::PlayerPhase;
        self.epoch += 1;
        self.turn += 1;
        self.queue.clear();
        self.log.push(format!("--- Turn {} ---", self.turn));
        Vec::new()
    }

    fn on_enqueue(&mut self, actor: CombatantId) -> Vec<Command> {
        if self.paused || self.phase != BattlePhase::PlayerPhase {
            self.log.push("Attacks can only be queued during the player phase");
            return Vec::new();
        }

        let Some(combatant) = self.roster.get(actor) else {
            self.log.push("Unknown combatant cannot be queued");
            return Vec::new();
        };
        if combatant.side != Side::Player {
            self.log.push(format!("{} is not a player combatant", combatant.name));
            return Vec::new();
        }
        if !combatant.is_alive() {
            self.log.push(format!("{} is down and cannot attack", combatant.name));
            return Vec::new();
        }
        if self.queue.len() >= self.config.party_size {
            self.log.push("Action queue is full");
            return Vec::new();
        }
        if self.queue.iter().any(|e| e.actor == actor) {
            self.log.push(format!("{} is already queued", combatant.name));
            return Vec::new();
        }
        let symbol = combatant.symbol.clone();
        let duplicate_symbol = self
            .queue
            .iter()
            .filter_map(|e| self.roster.get(e.actor))
            .any(|c| c.symbol == symbol);
        if duplicate_symbol {
            self.log.push(format!("An attacker with symbol {symbol} is already queued"));
            return Vec::new();
        }

        let name = combatant.name.clone();
        let target = self.roster.boss_id();
        self.queue.push(ActionQueueEntry { actor, target });
        self.log.push(format!("{name} readies an attack"));
        Vec::new()
    }

    fn on_end_player_phase(&mut self) -> Vec<Command> {
        if self.paused || self.phase != BattlePhase::PlayerPhase {
            self.log.push("No player phase to end");
            return Vec::new();
        }
        if self.queue.is_empty() {
            self.log.push("Queue at least one attack before ending the phase");
            return Vec::new();
        }

        self.phase = BattlePhase::ResolvingPlayer;
        self.epoch += 1;

        let actors: Vec<CombatantId> = self.queue.iter().map(|e| e.actor).collect();
        let combo = combo::detect(&actors, &mut self.roster, &self.config, &mut self.log);
        self.first_action_bonus = combo.bonus;

        // Triple-combo self-damage lands before any attack resolves and
        // can already end the battle.
        if let Some(cmds) = self.check_outcome() {
            return cmds;
        }

        self.pending = std::mem::take(&mut self.queue);
        self.pending_index = 0;
        self.resolve_player_step()
    }

    fn on_cleanse(&mut self, target: CombatantId) -> Vec<Command> {
        if self.paused || self.phase != BattlePhase::PlayerPhase {
            self.log.push("Cleanse is only available during the player phase");
            return Vec::new();
        }
        let Some(combatant) = self.roster.get(target) else {
            self.log.push("Cannot cleanse an unknown combatant");
            return Vec::new();
        };
        let name = combatant.name.clone();
        self.statuses.clear(target);
        self.log.push(format!("{name} is cleansed of all effects"));
        Vec::new()
    }

    // === TIMER DISPATCH ===

    fn on_timer(&mut self, token: TimerToken) -> Vec<Command> {
        // Flash clears are cosmetic and survive phase changes.
        if let TimerKind::ClearFlash(id) = token.kind {
            self.flashes.remove(&id);
            return Vec::new();
        }

        if token.epoch != self.epoch {
            tracing::debug!(?token, current = self.epoch, "stale timer ignored");
            return Vec::new();
        }

        match token.kind {
            TimerKind::NextPlayerAction => self.resolve_player_step(),
            TimerKind::EnterBossPhase => self.enter_boss_phase(),
            TimerKind::NextBossAttack => self.resolve_boss_step(),
            TimerKind::TurnComplete => {
                self.phase = BattlePhase::AwaitingStart;
                self.epoch += 1;
                self.log.push("The turn ends");
                Vec::new()
            }
            TimerKind::NotifyOutcome => match self.pending_outcome.take() {
                Some(outcome) => vec![Command::Notify(outcome)],
                None => Vec::new(),
            },
            TimerKind::ClearFlash(_) => unreachable!("handled above"),
        }
    }

    // === RESOLUTION ===

    fn resolve_player_step(&mut self) -> Vec<Command> {
        let mut cmds = Vec::new();
        if self.pending_index >= self.pending.len() {
            return cmds;
        }

        let entry = self.pending[self.pending_index];
        // The combo bonus belongs to the first action in resolution order;
        // if that action is skipped the bonus is forfeit with it.
        let bonus = if self.pending_index == 0 {
            std::mem::take(&mut self.first_action_bonus)
        } else {
            0
        };
        self.pending_index += 1;

        self.execute_attack(entry.actor, entry.target, bonus, &mut cmds);

        if let Some(terminal) = self.check_outcome() {
            cmds.extend(terminal);
            return cmds;
        }

        if self.pending_index < self.pending.len() {
            cmds.push(self.schedule(TimerKind::NextPlayerAction, self.config.action_delay_ms));
        } else {
            self.statuses.tick(&mut self.roster, &mut self.log);
            if let Some(terminal) = self.check_outcome() {
                cmds.extend(terminal);
                return cmds;
            }
            cmds.push(self.schedule(TimerKind::EnterBossPhase, self.config.boss_modal_delay_ms));
        }
        cmds
    }

    fn enter_boss_phase(&mut self) -> Vec<Command> {
        self.phase = BattlePhase::BossPhase;
        // Entering bumps the epoch, so a duplicate EnterBossPhase timer
        // from the same generation arrives stale and is ignored.
        self.epoch += 1;
        self.log.push(format!("{} retaliates!", self.roster.boss.name));

        self.boss_targets = self.roster.living_players().map(|p| p.id).collect();
        self.boss_index = 0;

        if self.boss_targets.is_empty() {
            // Nobody left to hit; close out the cycle.
            self.statuses.tick(&mut self.roster, &mut self.log);
            if let Some(terminal) = self.check_outcome() {
                return terminal;
            }
            return vec![self.schedule(TimerKind::TurnComplete, self.config.turn_end_delay_ms)];
        }

        self.resolve_boss_step()
    }

    fn resolve_boss_step(&mut self) -> Vec<Command> {
        let mut cmds = Vec::new();

        // The boss may have died mid-loop (recoil reaction). Remaining
        // scheduled attacks halt here; the outcome check has already
        // latched Win.
        if !self.roster.boss.is_alive() {
            if let Some(terminal) = self.check_outcome() {
                return terminal;
            }
            return cmds;
        }
        if self.boss_index >= self.boss_targets.len() {
            return cmds;
        }

        let boss_id = self.roster.boss_id();
        let target = self.boss_targets[self.boss_index];
        self.boss_index += 1;

        self.execute_attack(boss_id, target, 0, &mut cmds);

        if let Some(terminal) = self.check_outcome() {
            cmds.extend(terminal);
            return cmds;
        }

        if self.boss_index < self.boss_targets.len() {
            cmds.push(self.schedule(TimerKind::NextBossAttack, self.config.action_delay_ms));
        } else {
            self.statuses.tick(&mut self.roster, &mut self.log);
            if let Some(terminal) = self.check_outcome() {
                cmds.extend(terminal);
                return cmds;
            }
            cmds.push(self.schedule(TimerKind::TurnComplete, self.config.turn_end_delay_ms));
        }
        cmds
    }

    /// Reaction then damage for one action; a missing or dead participant
    /// skips the action and never aborts the phase
    fn execute_attack(
        &mut self,
        attacker: CombatantId,
        target: CombatantId,
        bonus: i32,
        cmds: &mut Vec<Command>,
    ) {
        let base = match self.roster.get(attacker) {
            Some(c) if c.is_alive() => c.base_damage + bonus,
            _ => {
                self.log.push("Attacker is gone; action skipped");
                return;
            }
        };
        if self.roster.get(target).is_none() {
            self.log.push("Target is gone; action skipped");
            return;
        }

        reaction::maybe_react(
            attacker,
            target,
            &mut self.roster,
            &mut self.statuses,
            &self.config,
            &mut self.log,
        );

        // The reaction may have dropped either side; resolve() handles that
        // by declining the hit.
        if let Some(report) = damage::resolve(
            attacker,
            target,
            base,
            &mut self.roster,
            &mut self.statuses,
            &self.config,
            &mut self.log,
        ) {
            self.flashes.insert(report.flash);
            cmds.push(self.schedule(TimerKind::ClearFlash(report.flash), self.config.flash_ms));
        } else {
            self.log.push("Attack fizzles; no valid target");
        }
    }

    /// Latch the terminal phase the instant a side is out
    fn check_outcome(&mut self) -> Option<Vec<Command>> {
        let outcome = self.detector.evaluate(&self.roster)?;
        self.phase = BattlePhase::Terminal(outcome);
        // Strand every timer from earlier phases; only the notification
        // minted below survives.
        self.epoch += 1;
        self.pending_outcome = Some(outcome);
        self.log.push(match outcome {
            BattleOutcome::Win => "Victory! The boss is defeated".to_string(),
            BattleOutcome::Lose => "Defeat... the party has fallen".to_string(),
        });
        Some(vec![self.schedule(TimerKind::NotifyOutcome, self.config.outcome_delay_ms)])
    }

    fn schedule(&self, kind: TimerKind, delay_ms: u64) -> Command {
        Command::Schedule {
            token: TimerToken::new(self.epoch, kind),
            delay_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::combatant::Combatant;

    fn make_orchestrator(boss_hp: i32) -> Orchestrator {
        let boss = Combatant::new("Fluorin", "F", boss_hp, 4, Side::Boss);
        let players = vec![
            Combatant::new("Hydrogen", "H", 30, 5, Side::Player),
            Combatant::new("Oxygen", "O", 30, 7, Side::Player),
            Combatant::new("Sodium", "Na", 30, 6, Side::Player),
        ];
        Orchestrator::new(BattleConfig::default(), Roster::new(boss, players))
    }

    /// Immediate clock: fire every scheduled timer right away, collecting
    /// any Notify commands that surface.
    fn drain(orch: &mut Orchestrator, mut cmds: Vec<Command>) -> Vec<BattleOutcome> {
        let mut outcomes = Vec::new();
        while let Some(cmd) = cmds.pop() {
            match cmd {
                Command::Schedule { token, .. } => {
                    cmds.extend(orch.handle(BattleEvent::Timer(token)));
                }
                Command::Notify(outcome) => outcomes.push(outcome),
            }
        }
        outcomes
    }

    fn run_full_turn(orch: &mut Orchestrator, actors: &[CombatantId]) -> Vec<BattleOutcome> {
        orch.handle(BattleEvent::StartTurn);
        for &actor in actors {
            orch.handle(BattleEvent::Enqueue { actor });
        }
        let cmds = orch.handle(BattleEvent::EndPlayerPhase);
        drain(orch, cmds)
    }

    #[test]
    fn test_start_turn_increments_counter() {
        let mut orch = make_orchestrator(500);
        assert_eq!(orch.phase(), BattlePhase::AwaitingStart);
        orch.handle(BattleEvent::StartTurn);
        assert_eq!(orch.phase(), BattlePhase::PlayerPhase);
        assert_eq!(orch.turn(), 1);
    }

    #[test]
    fn test_enqueue_rejects_duplicates_and_overflow() {
        let mut orch = make_orchestrator(500);
        orch.handle(BattleEvent::StartTurn);
        let h = orch.roster.players[0].id;
        let o = orch.roster.players[1].id;
        let na = orch.roster.players[2].id;

        orch.handle(BattleEvent::Enqueue { actor: h });
        orch.handle(BattleEvent::Enqueue { actor: h }); // duplicate actor
        assert_eq!(orch.queued().len(), 1);

        orch.handle(BattleEvent::Enqueue { actor: o });
        orch.handle(BattleEvent::Enqueue { actor: na });
        assert_eq!(orch.queued().len(), 3);

        // Queue is full.
        let extra = Combatant::new("Helium", "He", 20, 3, Side::Player);
        let extra_id = extra.id;
        orch.roster.players.push(extra);
        orch.handle(BattleEvent::Enqueue { actor: extra_id });
        assert_eq!(orch.queued().len(), 3);
    }

    #[test]
    fn test_enqueue_rejects_duplicate_symbol() {
        let mut orch = make_orchestrator(500);
        let twin = Combatant::new("Protium", "H", 25, 4, Side::Player);
        let twin_id = twin.id;
        orch.roster.players.push(twin);

        orch.handle(BattleEvent::StartTurn);
        let h = orch.roster.players[0].id;
        orch.handle(BattleEvent::Enqueue { actor: h });
        orch.handle(BattleEvent::Enqueue { actor: twin_id });
        assert_eq!(orch.queued().len(), 1);
    }

    #[test]
    fn test_enqueue_rejects_dead_and_boss() {
        let mut orch = make_orchestrator(500);
        orch.handle(BattleEvent::StartTurn);
        let boss = orch.roster.boss_id();
        let h = orch.roster.players[0].id;
        orch.roster.players[0].take_damage(30);

        orch.handle(BattleEvent::Enqueue { actor: boss });
        orch.handle(BattleEvent::Enqueue { actor: h });
        assert!(orch.queued().is_empty());
    }

    #[test]
    fn test_end_phase_with_empty_queue_is_rejected() {
        let mut orch = make_orchestrator(500);
        orch.handle(BattleEvent::StartTurn);
        let cmds = orch.handle(BattleEvent::EndPlayerPhase);
        assert!(cmds.is_empty());
        assert_eq!(orch.phase(), BattlePhase::PlayerPhase);
    }

    #[test]
    fn test_full_turn_cycle_returns_to_awaiting_start() {
        let mut orch = make_orchestrator(500);
        let h = orch.roster.players[0].id;
        let outcomes = run_full_turn(&mut orch, &[h]);

        assert!(outcomes.is_empty());
        assert_eq!(orch.phase(), BattlePhase::AwaitingStart);
        // Boss took one hit, players each took the boss retaliation.
        assert!(orch.roster.boss.hp < 500);
        assert!(orch.roster.players.iter().all(|p| p.hp < 30));
    }

    #[test]
    fn test_pair_combo_bonus_applies_to_first_action_only() {
        let mut orch = make_orchestrator(500);
        let h = orch.roster.players[0].id;
        let o = orch.roster.players[1].id;
        run_full_turn(&mut orch, &[h, o]);

        // H (base 5) + pair bonus 15 = 20, then O at base 7. The H+F
        // combustion reaction splashes the boss for 5 when H attacks and
        // again when the boss retaliates against H.
        let expected = 500 - (5 + 15) - 7 - 5 - 5;
        assert_eq!(orch.roster.boss.hp, expected);
    }

    #[test]
    fn test_triple_combo_self_damage_lands_before_attacks() {
        let mut orch = make_orchestrator(500);
        let ids: Vec<_> = orch.roster.players.iter().map(|p| p.id).collect();

        orch.handle(BattleEvent::StartTurn);
        for &actor in &ids {
            orch.handle(BattleEvent::Enqueue { actor });
        }
        let cmds = orch.handle(BattleEvent::EndPlayerPhase);

        // Self-damage is visible immediately, before the remaining queued
        // attacks have resolved (only the first resolves inline).
        let penalty = orch.config.combos.triple_self_damage;
        assert!(orch.roster.players.iter().all(|p| p.hp == 30 - penalty));
        drain(&mut orch, cmds);
    }

    #[test]
    fn test_boss_death_mid_phase_halts_and_wins() {
        // Boss with 4 hp dies to the H attack; the win must latch even
        // though the boss would otherwise retaliate.
        let mut orch = make_orchestrator(4);
        let h = orch.roster.players[0].id;
        let outcomes = run_full_turn(&mut orch, &[h]);

        assert_eq!(outcomes, vec![BattleOutcome::Win]);
        assert_eq!(orch.phase(), BattlePhase::Terminal(BattleOutcome::Win));
        // Players were never attacked.
        assert!(orch.roster.players.iter().all(|p| p.hp == 30));
    }

    #[test]
    fn test_outcome_notified_exactly_once() {
        let mut orch = make_orchestrator(4);
        let h = orch.roster.players[0].id;
        let outcomes = run_full_turn(&mut orch, &[h]);
        assert_eq!(outcomes.len(), 1);

        // Further turns are refused and produce no second notification.
        let more = run_full_turn(&mut orch, &[h]);
        assert!(more.is_empty());
        assert_eq!(orch.phase(), BattlePhase::Terminal(BattleOutcome::Win));
    }

    #[test]
    fn test_stale_timer_is_ignored() {
        let mut orch = make_orchestrator(500);
        let h = orch.roster.players[0].id;
        orch.handle(BattleEvent::StartTurn);
        orch.handle(BattleEvent::Enqueue { actor: h });
        let cmds = orch.handle(BattleEvent::EndPlayerPhase);

        // Capture a phase-advance token, drain the turn, then replay it.
        let replay = cmds.iter().find_map(|c| match c {
            Command::Schedule { token, .. }
                if !matches!(token.kind, TimerKind::ClearFlash(_)) =>
            {
                Some(*token)
            }
            _ => None,
        });
        drain(&mut orch, cmds);
        let boss_hp = orch.roster.boss.hp;

        if let Some(token) = replay {
            let cmds = orch.handle(BattleEvent::Timer(token));
            assert!(cmds.is_empty());
        }
        assert_eq!(orch.roster.boss.hp, boss_hp);
    }

    #[test]
    fn test_teardown_strands_pending_timers() {
        let mut orch = make_orchestrator(500);
        let h = orch.roster.players[0].id;
        orch.handle(BattleEvent::StartTurn);
        orch.handle(BattleEvent::Enqueue { actor: h });
        let cmds = orch.handle(BattleEvent::EndPlayerPhase);

        orch.handle(BattleEvent::Teardown);
        let boss_hp = orch.roster.boss.hp;
        let outcomes = drain(&mut orch, cmds);

        assert!(outcomes.is_empty());
        assert_eq!(orch.roster.boss.hp, boss_hp);
    }

    #[test]
    fn test_teardown_cancels_outcome_notification() {
        let mut orch = make_orchestrator(4);
        let h = orch.roster.players[0].id;
        orch.handle(BattleEvent::StartTurn);
        orch.handle(BattleEvent::Enqueue { actor: h });
        let cmds = orch.handle(BattleEvent::EndPlayerPhase);

        // Tear down before the notification timer fires.
        orch.handle(BattleEvent::Teardown);
        let outcomes = drain(&mut orch, cmds);
        assert!(outcomes.is_empty());
    }

    #[test]
    fn test_pause_blocks_inputs_but_not_resolution() {
        let mut orch = make_orchestrator(500);
        let h = orch.roster.players[0].id;
        orch.handle(BattleEvent::StartTurn);
        orch.handle(BattleEvent::Enqueue { actor: h });
        let cmds = orch.handle(BattleEvent::EndPlayerPhase);

        orch.handle(BattleEvent::Pause);
        // In-flight resolution continues while paused.
        drain(&mut orch, cmds);
        assert!(orch.roster.boss.hp < 500);

        // New turn input is refused until resume.
        orch.handle(BattleEvent::StartTurn);
        assert_eq!(orch.phase(), BattlePhase::AwaitingStart);
        orch.handle(BattleEvent::Resume);
        orch.handle(BattleEvent::StartTurn);
        assert_eq!(orch.phase(), BattlePhase::PlayerPhase);
    }

    #[test]
    fn test_hit_flash_set_then_cleared() {
        let mut orch = make_orchestrator(500);
        let h = orch.roster.players[0].id;
        orch.handle(BattleEvent::StartTurn);
        orch.handle(BattleEvent::Enqueue { actor: h });
        let cmds = orch.handle(BattleEvent::EndPlayerPhase);

        let boss = orch.roster.boss_id();
        assert!(orch.is_flashing(boss));
        drain(&mut orch, cmds);
        assert!(!orch.is_flashing(boss));
    }

    #[test]
    fn test_cleanse_strips_statuses() {
        let mut orch = make_orchestrator(500);
        let h = orch.roster.players[0].id;
        orch.handle(BattleEvent::StartTurn);
        orch.statuses.apply(
            &mut orch.roster,
            h,
            crate::battle::status::StatusEffect::new(
                "Burn",
                3,
                crate::battle::status::StatusPayload::DamageOverTime(2),
            ),
            &mut orch.log,
        );
        orch.handle(BattleEvent::Cleanse { target: h });
        assert!(orch.statuses.effects_for(h).is_empty());
    }
}
