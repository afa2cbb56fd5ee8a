//! Elemental Arena - turn-based boss battle engine

pub mod battle;
pub mod core;
pub mod providers;
