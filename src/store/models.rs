use serde::{Deserialize, Deserializer, Serialize};

/// A tournament pool, keyed by its id (e.g. "A") in pools.json
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pool {
    /// Display name, e.g. "Pool A"
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub teams: Vec<TeamRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRef {
    pub name: String,
}

/// A national team, keyed by team name in teams.json
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Team {
    #[serde(default)]
    pub team_stats: Option<TeamStats>,
    /// Player ids; ids with no player record are skipped when building rosters
    #[serde(default)]
    pub players: Vec<String>,
}

/// Aggregate pitching/hitting figures for a team. Any of them may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamStats {
    #[serde(rename = "ERA", default, skip_serializing_if = "Option::is_none")]
    pub era: Option<f64>,
    #[serde(rename = "OPS", default, skip_serializing_if = "Option::is_none")]
    pub ops: Option<f64>,
    #[serde(rename = "WHIP", default, skip_serializing_if = "Option::is_none")]
    pub whip: Option<f64>,
}

/// Only an explicit "batter" (any case) is a batter; a missing, null or
/// unrecognised `type` is read as a pitcher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    Batter,
    #[default]
    Pitcher,
}

impl PlayerKind {
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("batter") {
            PlayerKind::Batter
        } else {
            PlayerKind::Pitcher
        }
    }
}

impl<'de> Deserialize<'de> for PlayerKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = Option::<String>::deserialize(deserializer)?;
        Ok(label.as_deref().map(PlayerKind::from_label).unwrap_or_default())
    }
}

/// A player record, keyed by player id in players.json
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Player {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: PlayerKind,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub position: Option<String>,

    // Batting line
    #[serde(default)]
    pub avg: Option<f64>,
    #[serde(default)]
    pub obp: Option<f64>,
    #[serde(default)]
    pub slg: Option<f64>,
    #[serde(default)]
    pub ops: Option<f64>,
    #[serde(rename = "1b", default)]
    pub singles: Option<u32>,
    #[serde(rename = "2b", default)]
    pub doubles: Option<u32>,
    #[serde(rename = "3b", default)]
    pub triples: Option<u32>,
    #[serde(default)]
    pub hr: Option<u32>,
    #[serde(default)]
    pub out: Option<u32>,

    // Pitching line
    #[serde(default)]
    pub era: Option<f64>,
    #[serde(default)]
    pub whip: Option<f64>,
    #[serde(default)]
    pub ip: Option<f64>,
    #[serde(default)]
    pub so: Option<u32>,
    #[serde(default)]
    pub bb: Option<u32>,
}

/// A team's roster split by role
#[derive(Debug, Clone, Default)]
pub struct Roster<'a> {
    pub pitchers: Vec<(&'a str, &'a Player)>,
    pub batters: Vec<(&'a str, &'a Player)>,
}
