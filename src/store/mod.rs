use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

pub mod models;
pub mod source;

use models::*;
pub use source::{JsonDirSource, RecordSource, SharedSource};

pub const POOLS_FILE: &str = "pools.json";
pub const TEAMS_FILE: &str = "teams.json";
pub const PLAYERS_FILE: &str = "players.json";

/// Read-only snapshot of the three static record mappings.
#[derive(Debug, Clone)]
pub struct RecordStore {
    /// pool id → pool
    pools: BTreeMap<String, Pool>,
    /// team name → team
    teams: BTreeMap<String, Team>,
    /// player id → player
    players: BTreeMap<String, Player>,
    pub loaded_at: DateTime<Utc>,
}

impl RecordStore {
    pub fn from_parts(
        pools: BTreeMap<String, Pool>,
        teams: BTreeMap<String, Team>,
        players: BTreeMap<String, Player>,
    ) -> Self {
        RecordStore {
            pools,
            teams,
            players,
            loaded_at: Utc::now(),
        }
    }

    /// Load pools.json, teams.json and players.json from `dir`
    pub async fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let pools = read_json(&dir.join(POOLS_FILE)).await?;
        let teams = read_json(&dir.join(TEAMS_FILE)).await?;
        let players = read_json(&dir.join(PLAYERS_FILE)).await?;
        Ok(Self::from_parts(pools, teams, players))
    }

    // ── Pools ────────────────────────────────────────────────────────────────

    pub fn pools(&self) -> &BTreeMap<String, Pool> {
        &self.pools
    }

    /// Pool ids are upper-case ("A", "B", ...); `/pool/a` finds pool "A".
    pub fn pool(&self, name: &str) -> Option<&Pool> {
        self.pools.get(&name.to_uppercase())
    }

    /// Every team of a pool paired with its record. Unknown pools yield an
    /// empty list; references without a team record get an empty record.
    pub fn pool_teams(&self, name: &str) -> Vec<(String, Team)> {
        let Some(pool) = self.pool(name) else {
            debug!("Unknown pool {:?}", name);
            return Vec::new();
        };
        pool.teams
            .iter()
            .map(|r| (r.name.clone(), self.team_or_default(&r.name)))
            .collect()
    }

    // ── Teams ────────────────────────────────────────────────────────────────

    pub fn team(&self, name: &str) -> Option<&Team> {
        self.teams.get(name)
    }

    pub fn team_or_default(&self, name: &str) -> Team {
        self.team(name).cloned().unwrap_or_else(|| {
            debug!("No record for team {:?}, using empty record", name);
            Team::default()
        })
    }

    /// All team names in sorted order
    pub fn team_names(&self) -> Vec<String> {
        self.teams.keys().cloned().collect()
    }

    /// Players referenced by `team`, split by role. Ids without a player
    /// record are skipped.
    pub fn roster<'a>(&'a self, team: &'a Team) -> Roster<'a> {
        let mut roster = Roster::default();
        for id in &team.players {
            let Some((id, player)) = self.players.get_key_value(id) else {
                debug!("Roster references unknown player {:?}", id);
                continue;
            };
            match player.kind {
                PlayerKind::Pitcher => roster.pitchers.push((id.as_str(), player)),
                PlayerKind::Batter => roster.batters.push((id.as_str(), player)),
            }
        }
        roster
    }

    // ── Players ──────────────────────────────────────────────────────────────

    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.get(id)
    }

    pub fn counts(&self) -> (usize, usize, usize) {
        (self.pools.len(), self.teams.len(), self.players.len())
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("failed to parse {}", path.display()))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;

    /// Small in-memory store shared by tests across the crate
    pub(crate) fn sample_store() -> RecordStore {
        let pools = serde_json::from_value(json!({
            "A": { "name": "Pool A", "teams": [ { "name": "Japan" }, { "name": "Ghost" } ] },
            "B": { "name": "Pool B", "teams": [ { "name": "Weak" }, { "name": "NoStats" } ] }
        }))
        .unwrap();
        let teams = serde_json::from_value(json!({
            "Japan": {
                "team_stats": { "ERA": 2.0, "OPS": 0.9, "WHIP": 1.0 },
                "players": ["j1", "j2", "j3"]
            },
            "Weak": {
                "team_stats": { "ERA": 5.0, "OPS": 0.6, "WHIP": 1.6 },
                "players": []
            },
            "Partial": {
                "team_stats": { "WHIP": 1.2 },
                "players": []
            },
            "NoStats": { "players": [] }
        }))
        .unwrap();
        let players = serde_json::from_value(json!({
            "j1": { "name": "Pitcher One", "type": "pitcher", "era": 1.5, "whip": 0.9, "so": 10, "bb": 2 },
            "j2": { "name": "Batter One", "type": "batter", "avg": 0.3, "ops": 0.95, "1b": 4, "hr": 1 }
        }))
        .unwrap();
        RecordStore::from_parts(pools, teams, players)
    }

    #[test]
    fn pool_lookup_is_case_insensitive() {
        let store = sample_store();
        assert!(store.pool("a").is_some());
        assert!(store.pool("A").is_some());
        assert!(store.pool("Z").is_none());
    }

    #[test]
    fn unknown_pool_has_no_teams() {
        assert!(sample_store().pool_teams("nope").is_empty());
    }

    #[test]
    fn pool_team_without_record_gets_empty_record() {
        let store = sample_store();
        let teams = store.pool_teams("A");
        assert_eq!(teams.len(), 2);
        assert_eq!(teams[1].0, "Ghost");
        assert!(teams[1].1.team_stats.is_none());
        assert!(teams[1].1.players.is_empty());
    }

    #[test]
    fn roster_skips_missing_players_and_splits_roles() {
        let store = sample_store();
        let team = store.team("Japan").unwrap();
        let roster = store.roster(team);
        assert_eq!(roster.pitchers.len(), 1);
        assert_eq!(roster.pitchers[0].0, "j1");
        assert_eq!(roster.batters.len(), 1);
        assert_eq!(roster.batters[0].1.name, "Batter One");
    }

    #[test]
    fn team_names_are_sorted() {
        assert_eq!(
            sample_store().team_names(),
            vec!["Japan", "NoStats", "Partial", "Weak"]
        );
    }

    #[test]
    fn player_fields_deserialize() {
        let store = sample_store();
        let p = store.player("j2").unwrap();
        assert_eq!(p.kind, PlayerKind::Batter);
        assert_eq!(p.singles, Some(4));
        assert_eq!(p.era, None);
        assert!(store.player("unknown-id").is_none());
    }

    #[test]
    fn partial_stats_leave_missing_keys_empty() {
        let store = sample_store();
        let stats = store.team("Partial").unwrap().team_stats.unwrap();
        assert_eq!(stats.whip, Some(1.2));
        assert_eq!(stats.era, None);
        assert_eq!(stats.ops, None);
    }

    #[tokio::test]
    async fn loads_bundled_data_dir() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
        let store = RecordStore::load(&dir).await.unwrap();
        let (pools, teams, players) = store.counts();
        assert!(pools > 0 && teams > 0 && players > 0);
        for pool in store.pools().values() {
            for r in &pool.teams {
                assert!(store.team(&r.name).is_some(), "missing team {}", r.name);
            }
        }
    }

    #[tokio::test]
    async fn load_fails_for_missing_dir() {
        assert!(RecordStore::load("/definitely/not/here").await.is_err());
    }
}
