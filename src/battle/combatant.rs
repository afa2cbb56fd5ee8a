//! Combatants and the battle roster
//!
//! Hp and shield are only ever mutated through the methods here, called by
//! the damage resolver, the status registry, and the combo detector. The
//! clamping invariants (0 <= hp <= max_hp, shield >= 0) live in one place.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::core::types::{CombatantId, Side};

/// A boss or player unit with hp, shield, and damage attributes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub symbol: String,
    pub max_hp: i32,
    pub hp: i32,
    pub base_damage: i32,
    pub shield: i32,
    pub powerups: HashSet<String>,
    pub side: Side,
}

impl Combatant {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, hp: i32, damage: i32, side: Side) -> Self {
        let hp = hp.max(0);
        Self {
            id: CombatantId::new(),
            name: name.into(),
            symbol: symbol.into(),
            max_hp: hp,
            hp,
            base_damage: damage.max(0),
            shield: 0,
            powerups: HashSet::new(),
            side,
        }
    }

    pub fn with_powerups(mut self, powerups: impl IntoIterator<Item = String>) -> Self {
        self.powerups.extend(powerups);
        self
    }

    /// A dead combatant may not be targeted, queued, or act
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn has_powerup(&self, tag: &str) -> bool {
        self.powerups.contains(tag)
    }

    /// Reduce hp, floored at 0. Returns the hp actually lost.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let amount = amount.max(0);
        let lost = amount.min(self.hp);
        self.hp -= lost;
        lost
    }

    /// Increase hp, capped at max_hp. Returns the hp actually gained.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let amount = amount.max(0);
        let gained = amount.min(self.max_hp - self.hp);
        self.hp += gained;
        gained
    }

    /// Add to the shield pool
    pub fn grant_shield(&mut self, amount: i32) {
        self.shield += amount.max(0);
    }

    /// Reduce the shield pool, floored at 0
    pub fn spend_shield(&mut self, amount: i32) {
        self.shield = (self.shield - amount.max(0)).max(0);
    }
}

/// The full set of combatants in one battle session
///
/// Exactly one boss, 1..N players. Player iteration order is original
/// roster order and never changes; it is the stable order the boss
/// phase attacks in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roster {
    pub boss: Combatant,
    pub players: Vec<Combatant>,
}

impl Roster {
    pub fn new(boss: Combatant, players: Vec<Combatant>) -> Self {
        Self { boss, players }
    }

    pub fn get(&self, id: CombatantId) -> Option<&Combatant> {
        if self.boss.id == id {
            return Some(&self.boss);
        }
        self.players.iter().find(|p| p.id == id)
    }

    pub fn get_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        if self.boss.id == id {
            return Some(&mut self.boss);
        }
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn boss_id(&self) -> CombatantId {
        self.boss.id
    }

    /// Living players in roster order
    pub fn living_players(&self) -> impl Iterator<Item = &Combatant> {
        self.players.iter().filter(|p| p.is_alive())
    }

    /// The living combatant on `side` with the lowest current hp
    pub fn lowest_hp_on_side(&self, side: Side) -> Option<CombatantId> {
        self.all()
            .filter(|c| c.side == side && c.is_alive())
            .min_by_key(|c| c.hp)
            .map(|c| c.id)
    }

    /// All combatants, boss first, then players in roster order
    pub fn all(&self) -> impl Iterator<Item = &Combatant> {
        std::iter::once(&self.boss).chain(self.players.iter())
    }

    pub fn all_players_dead(&self) -> bool {
        self.players.iter().all(|p| !p.is_alive())
    }
}
