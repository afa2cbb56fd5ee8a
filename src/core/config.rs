//! Battle configuration with documented constants
//!
//! Symbol-class membership, the reaction table, combo definitions, and all
//! pacing delays are data, not code: they are passed into the engine at
//! construction so the resolution algorithms stay decoupled from any
//! specific element set.

use serde::{Deserialize, Serialize};

use crate::battle::status::StatusPayload;
use crate::core::types::Side;

/// A named set of element symbols used by conditional damage modifiers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolClass {
    pub name: String,
    pub members: Vec<String>,
}

impl SymbolClass {
    pub fn contains(&self, symbol: &str) -> bool {
        self.members.iter().any(|m| m == symbol)
    }
}

/// A conditional multiplicative damage modifier
///
/// Fires when the attacker carries `attacker_powerup` and the defender's
/// symbol belongs to the class named `defender_class`. Applicable modifiers
/// chain multiplicatively in declaration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairModifier {
    pub attacker_powerup: String,
    pub defender_class: String,
    pub multiplier: f64,
}

/// Side effect fired when a symbol-pair reaction matches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ReactionEffect {
    /// Heal the lowest-hp living ally of the attacker by this amount
    HealLowestAlly(i32),
    /// Attach a timed status effect to the defender
    ApplyStatusToDefender {
        name: String,
        turns: u32,
        payload: StatusPayload,
    },
    /// Flat damage to every living combatant on one side
    AreaDamage { side: Side, amount: i32 },
    /// The attacker hurts itself triggering the reaction
    RecoilSelf(i32),
}

/// One entry in the symbol-pair reaction table
///
/// Matching is symmetric: `first`/`second` match either
/// (attacker, defender) or (defender, attacker).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionDef {
    pub first: String,
    pub second: String,
    pub effect: ReactionEffect,
}

/// Queue-wide symbol-set combo definitions
///
/// Evaluated in priority order: the triple fires first, then the pair.
/// Only one combo fires per turn, and its bonus goes to the first action
/// resolved that turn, not to every queued action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComboConfig {
    pub triple: [String; 3],
    /// Added to the first resolved action when the triple is queued
    pub triple_bonus: i32,
    /// Hp every queued actor loses immediately when the triple fires
    pub triple_self_damage: i32,
    pub pair: [String; 2],
    /// Added to the first resolved action when only the pair is queued
    pub pair_bonus: i32,
}

/// Placeholder player record used when the roster provider comes up short
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceholderCard {
    pub name: String,
    pub symbol: String,
    pub health: i32,
    pub damage: i32,
}

/// Fallback boss used when the boss provider fails
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackBoss {
    pub name: String,
    pub symbol: String,
    pub hp: i32,
    pub damage: i32,
}

/// Complete configuration for one battle session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleConfig {
    // === ELEMENT TABLES ===
    /// Named symbol classes referenced by pair modifiers
    pub symbol_classes: Vec<SymbolClass>,

    /// Conditional damage multipliers, applied in declaration order
    pub pair_modifiers: Vec<PairModifier>,

    /// Symbol-pair reaction table
    pub reactions: Vec<ReactionDef>,

    /// Combo definitions evaluated at player-phase end
    pub combos: ComboConfig,

    // === ROSTER ===
    /// Symbols preferred when selecting the starting roster
    pub canonical_symbols: Vec<String>,

    /// Padding cards when fewer than `party_size` records are available
    pub placeholder_cards: Vec<PlaceholderCard>,

    /// Substitute boss when the provider lookup fails
    pub fallback_boss: FallbackBoss,

    /// Number of player combatants per session (and the queue cap)
    pub party_size: usize,

    // === PACING ===
    /// Pause between successive queued-action resolutions (ms)
    ///
    /// Pure animation timing: resolution order never depends on it.
    pub action_delay_ms: u64,

    /// Pause between the last player action and the boss phase (ms)
    pub boss_modal_delay_ms: u64,

    /// Pause after the boss phase before the next turn opens (ms)
    pub turn_end_delay_ms: u64,

    /// Pause before the terminal outcome is surfaced (ms)
    ///
    /// Lets final log lines and animations settle. The pending
    /// notification must be cancelable on teardown.
    pub outcome_delay_ms: u64,

    /// How long the cosmetic hit flash stays on a defender (ms)
    pub flash_ms: u64,

    // === OBSERVABILITY ===
    /// Combat log ring-buffer capacity (oldest entries dropped)
    pub log_capacity: usize,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            symbol_classes: vec![
                SymbolClass {
                    name: "halogen-or-metal".into(),
                    members: vec!["F".into(), "Cl".into(), "Br".into(), "Na".into(), "Fe".into()],
                },
                SymbolClass {
                    name: "metal".into(),
                    members: vec!["Na".into(), "Fe".into(), "Mg".into()],
                },
            ],
            pair_modifiers: vec![
                PairModifier {
                    attacker_powerup: "explosive".into(),
                    defender_class: "halogen-or-metal".into(),
                    multiplier: 1.2,
                },
                PairModifier {
                    attacker_powerup: "ultimate".into(),
                    defender_class: "metal".into(),
                    multiplier: 2.0,
                },
            ],
            reactions: vec![
                // Water: heal the weakest ally
                ReactionDef {
                    first: "H".into(),
                    second: "O".into(),
                    effect: ReactionEffect::HealLowestAlly(10),
                },
                // Oxidation: corrode the defender over time
                ReactionDef {
                    first: "Na".into(),
                    second: "O".into(),
                    effect: ReactionEffect::ApplyStatusToDefender {
                        name: "Corrosion".into(),
                        turns: 2,
                        payload: StatusPayload::DamageOverTime(3),
                    },
                },
                // Sodium hydride: violent, the attacker takes recoil
                ReactionDef {
                    first: "H".into(),
                    second: "Na".into(),
                    effect: ReactionEffect::RecoilSelf(4),
                },
                // Combustion: splash damage across the boss side
                ReactionDef {
                    first: "H".into(),
                    second: "F".into(),
                    effect: ReactionEffect::AreaDamage {
                        side: Side::Boss,
                        amount: 5,
                    },
                },
            ],
            combos: ComboConfig {
                triple: ["H".into(), "O".into(), "Na".into()],
                triple_bonus: 30,
                triple_self_damage: 5,
                pair: ["H".into(), "O".into()],
                pair_bonus: 15,
            },
            canonical_symbols: vec!["H".into(), "O".into(), "Na".into()],
            placeholder_cards: vec![
                PlaceholderCard {
                    name: "Hydrogen".into(),
                    symbol: "H".into(),
                    health: 30,
                    damage: 5,
                },
                PlaceholderCard {
                    name: "Oxygen".into(),
                    symbol: "O".into(),
                    health: 30,
                    damage: 5,
                },
                PlaceholderCard {
                    name: "Sodium".into(),
                    symbol: "Na".into(),
                    health: 30,
                    damage: 5,
                },
            ],
            fallback_boss: FallbackBoss {
                name: "Fluorin".into(),
                symbol: "F".into(),
                hp: 100,
                damage: 10,
            },
            party_size: 3,
            action_delay_ms: 700,
            boss_modal_delay_ms: 900,
            turn_end_delay_ms: 600,
            outcome_delay_ms: 800,
            flash_ms: 300,
            log_capacity: 100,
        }
    }
}

impl BattleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a symbol class by name
    pub fn class(&self, name: &str) -> Option<&SymbolClass> {
        self.symbol_classes.iter().find(|c| c.name == name)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.party_size == 0 {
            return Err("party_size must be at least 1".into());
        }

        if self.placeholder_cards.len() < self.party_size {
            return Err(format!(
                "need at least {} placeholder cards, have {}",
                self.party_size,
                self.placeholder_cards.len()
            ));
        }

        // Every pair modifier must reference a declared class
        for modifier in &self.pair_modifiers {
            if self.class(&modifier.defender_class).is_none() {
                return Err(format!(
                    "pair modifier '{}' references unknown class '{}'",
                    modifier.attacker_powerup, modifier.defender_class
                ));
            }
            if modifier.multiplier <= 0.0 {
                return Err(format!(
                    "pair modifier '{}' has non-positive multiplier",
                    modifier.attacker_powerup
                ));
            }
        }

        if self.combos.triple_bonus <= self.combos.pair_bonus {
            return Err(format!(
                "triple bonus ({}) should exceed pair bonus ({})",
                self.combos.triple_bonus, self.combos.pair_bonus
            ));
        }

        if self.log_capacity == 0 {
            return Err("log_capacity must be positive".into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(BattleConfig::default().validate().is_ok());
    }

    #[test]
    fn test_unknown_class_rejected() {
        let mut config = BattleConfig::default();
        config.pair_modifiers.push(PairModifier {
            attacker_powerup: "volatile".into(),
            defender_class: "noble-gas".into(),
            multiplier: 1.5,
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_triple_bonus_must_exceed_pair_bonus() {
        let mut config = BattleConfig::default();
        config.combos.triple_bonus = config.combos.pair_bonus;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_class_lookup() {
        let config = BattleConfig::default();
        let metal = config.class("metal").unwrap();
        assert!(metal.contains("Na"));
        assert!(!metal.contains("H"));
    }
}
