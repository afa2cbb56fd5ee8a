//! Core type definitions used throughout the engine

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for combatants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CombatantId(pub Uuid);

impl CombatantId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CombatantId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for active status effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusId(pub Uuid);

impl StatusId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for StatusId {
    fn default() -> Self {
        Self::new()
    }
}

/// Turn counter (one full player-phase + boss-phase cycle)
pub type Turn = u32;

/// Which side of the arena a combatant fights on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Boss,
    Player,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combatant_id_equality() {
        let a = CombatantId::new();
        let b = a;
        assert_eq!(a, b);
        assert_ne!(a, CombatantId::new());
    }

    #[test]
    fn test_combatant_id_hash() {
        use std::collections::HashMap;
        let id = CombatantId::new();
        let mut map: HashMap<CombatantId, &str> = HashMap::new();
        map.insert(id, "hydrogen");
        assert_eq!(map.get(&id), Some(&"hydrogen"));
    }
}
