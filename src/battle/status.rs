//! Status registry: per-combatant collections of timed effects
//!
//! Effects are pure data plus expiry logic. Nothing here runs on its own
//! schedule: damage-over-time and heal-per-turn fire exactly once per
//! `tick()`, which the orchestrator calls after all player actions and
//! again after the boss retaliation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::battle::combatant::Roster;
use crate::battle::log::CombatLog;
use crate::core::types::{CombatantId, StatusId};

/// Per-turn payload carried by a status effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusPayload {
    /// Hp lost by the owner on each tick, floored at 0
    DamageOverTime(i32),
    /// Hp regained by the owner on each tick, capped at max_hp
    HealPerTurn(i32),
    /// Shield added to the owner once, when the effect is applied
    ShieldGrant(i32),
    /// Added to the owner's outgoing base damage while active
    DamageBonus(i32),
    /// Subtracted from the owner's outgoing base damage while active
    DamageMalus(i32),
    /// Amount of the defender's shield the owner's attacks bypass
    IgnoreShield(i32),
    /// Next attack deals double damage, then the effect is consumed
    DoubleDamageOnce,
}

/// A timed modifier attached to one combatant
///
/// Applications never merge: reapplying a named effect stacks a second
/// instance with its own independent lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusEffect {
    pub id: StatusId,
    pub name: String,
    /// Whole turns remaining, always >= 1 on creation
    pub remaining_turns: u32,
    pub payload: StatusPayload,
}

impl StatusEffect {
    pub fn new(name: impl Into<String>, remaining_turns: u32, payload: StatusPayload) -> Self {
        Self {
            id: StatusId::new(),
            name: name.into(),
            remaining_turns: remaining_turns.max(1),
            payload,
        }
    }
}

/// Owns every active status effect in the battle, keyed by target
#[derive(Debug, Clone, Default)]
pub struct StatusRegistry {
    effects: HashMap<CombatantId, Vec<StatusEffect>>,
}

impl StatusRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an effect to a combatant
    ///
    /// ShieldGrant payloads add their shield immediately; the timed entry
    /// only tracks the effect's visible duration afterwards.
    pub fn apply(
        &mut self,
        roster: &mut Roster,
        target: CombatantId,
        effect: StatusEffect,
        log: &mut CombatLog,
    ) {
        let Some(combatant) = roster.get_mut(target) else {
            tracing::warn!(?target, "status applied to unknown combatant, dropped");
            return;
        };

        if let StatusPayload::ShieldGrant(amount) = effect.payload {
            combatant.grant_shield(amount);
            log.push(format!("{} gains {} shield ({})", combatant.name, amount, effect.name));
        } else {
            log.push(format!(
                "{} is affected by {} ({} turns)",
                combatant.name, effect.name, effect.remaining_turns
            ));
        }

        self.effects.entry(target).or_default().push(effect);
    }

    /// Remove every effect on one combatant (player-initiated cleanse)
    pub fn clear(&mut self, target: CombatantId) {
        self.effects.remove(&target);
    }

    /// Active effects on one combatant, oldest first
    pub fn effects_for(&self, target: CombatantId) -> &[StatusEffect] {
        self.effects.get(&target).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Net additive damage adjustment from the attacker's active statuses
    ///
    /// Bonuses add, maluses subtract; the resolver floors the sum at 0.
    pub fn damage_adjustment(&self, attacker: CombatantId) -> i32 {
        self.effects_for(attacker)
            .iter()
            .map(|e| match e.payload {
                StatusPayload::DamageBonus(amount) => amount,
                StatusPayload::DamageMalus(amount) => -amount,
                _ => 0,
            })
            .sum()
    }

    /// Total shield the attacker's statuses allow it to bypass
    pub fn ignore_shield_total(&self, attacker: CombatantId) -> i32 {
        self.effects_for(attacker)
            .iter()
            .map(|e| match e.payload {
                StatusPayload::IgnoreShield(amount) => amount,
                _ => 0,
            })
            .sum()
    }

    /// Consume one pending double-damage buff, if any
    ///
    /// Single-use: the effect is removed the moment it is applied.
    pub fn take_double_damage(&mut self, attacker: CombatantId) -> bool {
        let Some(effects) = self.effects.get_mut(&attacker) else {
            return false;
        };
        let Some(index) = effects
            .iter()
            .position(|e| e.payload == StatusPayload::DoubleDamageOnce)
        else {
            return false;
        };
        effects.remove(index);
        true
    }

    /// One evaluation pass over every active effect
    ///
    /// Applies DoT and heal payloads exactly once, then decrements
    /// remaining turns and prunes anything that reached 0.
    pub fn tick(&mut self, roster: &mut Roster, log: &mut CombatLog) {
        // Deterministic order: boss first, then players in roster order.
        let order: Vec<CombatantId> = roster.all().map(|c| c.id).collect();

        for target in order {
            let Some(effects) = self.effects.get_mut(&target) else {
                continue;
            };

            for effect in effects.iter_mut() {
                if let Some(combatant) = roster.get_mut(target) {
                    match effect.payload {
                        StatusPayload::DamageOverTime(amount) => {
                            let lost = combatant.take_damage(amount);
                            log.push(format!(
                                "{} suffers {} from {}",
                                combatant.name, lost, effect.name
                            ));
                        }
                        StatusPayload::HealPerTurn(amount) => {
                            let gained = combatant.heal(amount);
                            log.push(format!(
                                "{} recovers {} from {}",
                                combatant.name, gained, effect.name
                            ));
                        }
                        _ => {}
                    }
                }
                effect.remaining_turns = effect.remaining_turns.saturating_sub(1);
            }

            effects.retain(|e| e.remaining_turns > 0);
            if effects.is_empty() {
                self.effects.remove(&target);
            }
        }
    }
}
