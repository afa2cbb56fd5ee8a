//! Boss and roster providers
//!
//! Read-only lookups consumed once per session start. A failed lookup is
//! never fatal: the boss falls back to the documented substitute, and the
//! roster is padded with placeholder combatants until the party is full.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::battle::combatant::{Combatant, Roster};
use crate::core::config::BattleConfig;
use crate::core::error::{ArenaError, Result};
use crate::core::types::Side;

/// Boss row as stored by the catalog backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossRecord {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub image_ref: String,
    pub hp: i32,
    pub damage: i32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub powerups: Vec<String>,
    pub symbol: String,
}

/// Player card row as stored by the catalog backend
///
/// Records are expected in creation order (oldest first), which is what
/// the recency fallback in [`build_roster_players`] relies on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub health: i32,
    pub damage: i32,
    #[serde(default)]
    pub image_ref: String,
    #[serde(default)]
    pub powerups: Vec<String>,
}

/// Read-only boss lookup by slug
pub trait BossProvider {
    fn fetch_boss(&self, slug: &str) -> Result<BossRecord>;
}

/// Read-only player card lookup
pub trait RosterProvider {
    fn fetch_players(&self) -> Result<Vec<PlayerRecord>>;
}

/// File-backed provider for headless runs: one JSON array per file
#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    bosses_path: Option<PathBuf>,
    cards_path: Option<PathBuf>,
}

impl JsonFileProvider {
    pub fn new(bosses_path: Option<&Path>, cards_path: Option<&Path>) -> Self {
        Self {
            bosses_path: bosses_path.map(Path::to_path_buf),
            cards_path: cards_path.map(Path::to_path_buf),
        }
    }
}

impl BossProvider for JsonFileProvider {
    fn fetch_boss(&self, slug: &str) -> Result<BossRecord> {
        let path = self
            .bosses_path
            .as_ref()
            .ok_or_else(|| ArenaError::ProviderError("no boss file configured".into()))?;
        let raw = std::fs::read_to_string(path)?;
        let records: Vec<BossRecord> = serde_json::from_str(&raw)?;
        records
            .into_iter()
            .find(|r| r.slug == slug)
            .ok_or_else(|| ArenaError::ProviderError(format!("boss '{slug}' not found")))
    }
}

impl RosterProvider for JsonFileProvider {
    fn fetch_players(&self) -> Result<Vec<PlayerRecord>> {
        let path = self
            .cards_path
            .as_ref()
            .ok_or_else(|| ArenaError::ProviderError("no cards file configured".into()))?;
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Build the boss combatant, substituting the fallback on any failure
pub fn build_boss(provider: &dyn BossProvider, slug: &str, config: &BattleConfig) -> Combatant {
    match provider.fetch_boss(slug) {
        Ok(record) => {
            Combatant::new(record.name, record.symbol, record.hp, record.damage, Side::Boss)
                .with_powerups(record.powerups)
        }
        Err(err) => {
            tracing::warn!(%slug, %err, "boss lookup failed, using fallback boss");
            let fb = &config.fallback_boss;
            Combatant::new(fb.name.clone(), fb.symbol.clone(), fb.hp, fb.damage, Side::Boss)
        }
    }
}

/// Build the player party
///
/// Selection order: cards with the canonical symbols (in canonical order),
/// then the most recently created remaining cards, then placeholder cards
/// until the party is full. Provider failure yields an all-placeholder
/// party instead of aborting the session.
pub fn build_roster_players(provider: &dyn RosterProvider, config: &BattleConfig) -> Vec<Combatant> {
    let records = match provider.fetch_players() {
        Ok(records) => records,
        Err(err) => {
            tracing::warn!(%err, "roster lookup failed, using placeholder party");
            Vec::new()
        }
    };

    let mut chosen: Vec<PlayerRecord> = Vec::new();

    for symbol in &config.canonical_symbols {
        if chosen.len() == config.party_size {
            break;
        }
        if let Some(record) = records
            .iter()
            .find(|r| &r.symbol == symbol && chosen.iter().all(|c| c.id != r.id))
        {
            chosen.push(record.clone());
        }
    }

    // Records arrive oldest-first; walk from the back for recency.
    for record in records.iter().rev() {
        if chosen.len() == config.party_size {
            break;
        }
        if chosen.iter().all(|c| c.id != record.id) {
            chosen.push(record.clone());
        }
    }

    let mut players: Vec<Combatant> = chosen
        .into_iter()
        .map(|r| {
            Combatant::new(r.name, r.symbol, r.health, r.damage, Side::Player)
                .with_powerups(r.powerups)
        })
        .collect();

    let mut placeholders = config.placeholder_cards.iter();
    while players.len() < config.party_size {
        let Some(card) = placeholders.next() else {
            break;
        };
        // Skip placeholders whose symbol the party already covers.
        if players.iter().any(|p| p.symbol == card.symbol) {
            continue;
        }
        tracing::warn!(symbol = %card.symbol, "padding roster with placeholder card");
        players.push(Combatant::new(
            card.name.clone(),
            card.symbol.clone(),
            card.health,
            card.damage,
            Side::Player,
        ));
    }

    players
}

/// Convenience: boss + players in one call
pub fn build_session_roster(
    boss_provider: &dyn BossProvider,
    roster_provider: &dyn RosterProvider,
    slug: &str,
    config: &BattleConfig,
) -> Roster {
    let boss = build_boss(boss_provider, slug, config);
    let players = build_roster_players(roster_provider, config);
    Roster::new(boss, players)
}
