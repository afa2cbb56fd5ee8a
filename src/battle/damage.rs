//! Damage resolution
//!
//! Computes the final hp/shield deltas for one hit. The order of
//! operations is fixed and load-bearing:
//!
//! 1. additive status bonuses/maluses into the base amount
//! 2. conditional pair multipliers, chained in config declaration order
//! 3. one-shot double-damage buff (consumed)
//! 4. shield bypass from attacker statuses
//! 5. absorb into the remaining shield, remainder to hp
//! 6. mutate the defender
//! 7. log line

use crate::battle::combatant::Roster;
use crate::battle::log::CombatLog;
use crate::battle::status::StatusRegistry;
use crate::core::config::BattleConfig;
use crate::core::types::CombatantId;

/// Outcome of one resolved hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitReport {
    /// Hp the defender actually lost
    pub damage_dealt: i32,
    /// Damage soaked by the defender's shield
    pub shield_absorbed: i32,
    /// Defender to flash (cosmetic, auto-clearing)
    pub flash: CombatantId,
}

/// Resolve a single hit from attacker to defender
///
/// Returns None when either side is missing or already dead; the caller
/// skips the action and moves on (a missing target is never fatal).
pub fn resolve(
    attacker_id: CombatantId,
    defender_id: CombatantId,
    base_damage: i32,
    roster: &mut Roster,
    statuses: &mut StatusRegistry,
    config: &BattleConfig,
    log: &mut CombatLog,
) -> Option<HitReport> {
    let attacker = roster.get(attacker_id)?;
    let defender = roster.get(defender_id)?;
    if !attacker.is_alive() || !defender.is_alive() {
        return None;
    }

    let attacker_name = attacker.name.clone();
    let attacker_powerups: Vec<String> = attacker.powerups.iter().cloned().collect();
    let defender_symbol = defender.symbol.clone();

    // Step 1: additive status adjustment.
    let adjustment = statuses.damage_adjustment(attacker_id);
    let pre_multiplier = (base_damage + adjustment).max(0);

    // Step 2: conditional multipliers, chained in declaration order.
    let mut total = pre_multiplier as f64;
    for modifier in &config.pair_modifiers {
        let applies = attacker_powerups.iter().any(|p| p == &modifier.attacker_powerup)
            && config
                .class(&modifier.defender_class)
                .is_some_and(|class| class.contains(&defender_symbol));
        if applies {
            total *= modifier.multiplier;
        }
    }

    // Step 3: one-shot double damage, consumed on use.
    if statuses.take_double_damage(attacker_id) {
        total *= 2.0;
    }
    let total = total.round() as i32;

    // Step 4: shield bypass.
    let ignore_shield = statuses.ignore_shield_total(attacker_id);

    // Step 5: split between shield and hp.
    let defender = roster.get_mut(defender_id)?;
    let effective_shield = (defender.shield - ignore_shield).max(0);
    let shield_absorbed = total.min(effective_shield);
    let hp_damage = total - shield_absorbed;

    // Step 6: mutate the defender.
    defender.spend_shield(ignore_shield + shield_absorbed);
    let damage_dealt = defender.take_damage(hp_damage);
    let defender_name = defender.name.clone();

    // Step 7: summary line.
    log.push(format!(
        "{attacker_name} hits {defender_name}: base {base_damage}, status {adjustment:+}, \
         total {total}, shield absorbed {shield_absorbed}, hp damage {damage_dealt}"
    ));

    Some(HitReport {
        damage_dealt,
        shield_absorbed,
        flash: defender_id,
    })
}
