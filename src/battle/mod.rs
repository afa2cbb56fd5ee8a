//! Battle engine - phase-driven boss battles with elemental reactions
//!
//! The orchestrator owns the authoritative state and is the only writer.
//! Everything else is a pure collaborator it calls in a fixed order:
//! combo detection once per player-phase end, then per action the
//! reaction engine and the damage resolver, then status ticks, then the
//! boss retaliation, then the outcome check. All delays are expressed as
//! scheduler commands so the whole machine runs under a virtual clock in
//! tests.

pub mod combatant;
pub mod combo;
pub mod damage;
pub mod log;
pub mod orchestrator;
pub mod outcome;
pub mod reaction;
pub mod scheduler;
pub mod status;

// Re-exports for convenient access
pub use combatant::{Combatant, Roster};
pub use combo::{detect as detect_combo, ComboResult};
pub use damage::{resolve as resolve_damage, HitReport};
pub use log::CombatLog;
pub use orchestrator::{ActionQueueEntry, BattleEvent, BattlePhase, Orchestrator};
pub use outcome::{BattleOutcome, OutcomeDetector};
pub use reaction::maybe_react;
pub use scheduler::{Command, Epoch, TimerKind, TimerToken};
pub use status::{StatusEffect, StatusPayload, StatusRegistry};
