//! Timer tokens and the orchestrator's command side-channel
//!
//! The engine never sleeps. Every delay is expressed as a `Command::Schedule`
//! handed to the driver, which later feeds the token back in as a
//! `BattleEvent::Timer`. Tokens carry the execution epoch they were minted
//! in; a token from a superseded epoch is silently ignored, which is what
//! makes phase entry exactly-once and teardown cancellation cheap: bumping
//! the epoch strands every outstanding timer.

use crate::battle::outcome::BattleOutcome;
use crate::core::types::CombatantId;

/// Execution epoch: bumped on every phase entry and on teardown
pub type Epoch = u64;

/// What a scheduled timer should do when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Resolve the next queued player action
    NextPlayerAction,
    /// Enter the boss phase after the pre-boss pause
    EnterBossPhase,
    /// Resolve the boss's next attack
    NextBossAttack,
    /// Close the turn cycle and reopen AwaitingStart
    TurnComplete,
    /// Surface the terminal outcome to the application
    NotifyOutcome,
    /// Clear the cosmetic hit flash on a combatant
    ClearFlash(CombatantId),
}

/// A scheduled continuation, valid only within its minting epoch
///
/// `ClearFlash` is the one exception to the staleness rule: it is purely
/// cosmetic, mutates no game state, and may outlive a phase change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerToken {
    pub epoch: Epoch,
    pub kind: TimerKind,
}

impl TimerToken {
    pub fn new(epoch: Epoch, kind: TimerKind) -> Self {
        Self { epoch, kind }
    }
}

/// Side effects requested by the orchestrator
///
/// The driver owns the clock: it sleeps for `delay_ms` then feeds the
/// token back as `BattleEvent::Timer`. `Notify` is the single hand-off
/// of the outcome to the surrounding application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Schedule { token: TimerToken, delay_ms: u64 },
    Notify(BattleOutcome),
}
