//! Symbol-pair reactions
//!
//! Reactions are additive side effects layered before the main damage
//! resolution of the same action. Most symbol pairs have no entry, and
//! the absence of a match is the normal case, not an error.

use crate::battle::combatant::Roster;
use crate::battle::log::CombatLog;
use crate::battle::status::{StatusEffect, StatusRegistry};
use crate::core::config::{BattleConfig, ReactionEffect};
use crate::core::types::CombatantId;

/// Fire the reaction for this attacker/defender pair, if the table has one
///
/// The table is keyed by the unordered symbol pair: the forward key is
/// tried first, then the reversed key. Effects always read their roles
/// from the actual attacker and defender of the triggering action.
///
/// Returns true when a reaction fired.
pub fn maybe_react(
    attacker_id: CombatantId,
    defender_id: CombatantId,
    roster: &mut Roster,
    statuses: &mut StatusRegistry,
    config: &BattleConfig,
    log: &mut CombatLog,
) -> bool {
    let Some(attacker) = roster.get(attacker_id) else {
        return false;
    };
    let Some(defender) = roster.get(defender_id) else {
        return false;
    };

    let attacker_symbol = attacker.symbol.clone();
    let attacker_name = attacker.name.clone();
    let attacker_side = attacker.side;
    let defender_symbol = defender.symbol.clone();
    let defender_name = defender.name.clone();

    let matched = config.reactions.iter().find(|def| {
        (def.first == attacker_symbol && def.second == defender_symbol)
            || (def.first == defender_symbol && def.second == attacker_symbol)
    });
    let Some(def) = matched else {
        return false;
    };

    log.push(format!(
        "Reaction {}+{}: {attacker_name} vs {defender_name}",
        def.first, def.second
    ));

    match &def.effect {
        ReactionEffect::HealLowestAlly(amount) => {
            if let Some(ally_id) = roster.lowest_hp_on_side(attacker_side) {
                if let Some(ally) = roster.get_mut(ally_id) {
                    let gained = ally.heal(*amount);
                    log.push(format!("{} is restored for {}", ally.name, gained));
                }
            }
        }
        ReactionEffect::ApplyStatusToDefender { name, turns, payload } => {
            statuses.apply(
                roster,
                defender_id,
                StatusEffect::new(name.clone(), *turns, *payload),
                log,
            );
        }
        ReactionEffect::AreaDamage { side, amount } => {
            let targets: Vec<CombatantId> = roster
                .all()
                .filter(|c| c.side == *side && c.is_alive())
                .map(|c| c.id)
                .collect();
            for id in targets {
                if let Some(target) = roster.get_mut(id) {
                    let lost = target.take_damage(*amount);
                    log.push(format!("{} is caught in the blast for {}", target.name, lost));
                }
            }
        }
        ReactionEffect::RecoilSelf(amount) => {
            if let Some(attacker) = roster.get_mut(attacker_id) {
                let lost = attacker.take_damage(*amount);
                log.push(format!("{} recoils for {}", attacker.name, lost));
            }
        }
    }

    true
}
