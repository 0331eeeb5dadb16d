use clap::{Parser, ValueEnum};
use std::net::SocketAddr;
use std::path::Path;

/// What the predictor does when a requested team has no stats on record.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingTeamPolicy {
    /// Answer 404 "Team data not found"
    #[default]
    Reject,
    /// Substitute the prediction default stats (ERA 4.0, OPS 0.7)
    Fallback,
}

/// Tournament pool browser and matchup predictor
#[derive(Parser, Debug, Clone)]
#[command(name = "wbc-scout", version, about)]
pub struct Config {
    /// HTTP listen address
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:5000")]
    pub listen_addr: String,

    /// Directory holding pools.json, teams.json and players.json
    #[arg(long, env = "DATA_DIR", default_value = "data")]
    pub data_dir: String,

    /// Directory served under /static
    #[arg(long, env = "STATIC_DIR", default_value = "static")]
    pub static_dir: String,

    /// Re-read the JSON files on every request instead of once at startup
    #[arg(long, env = "RELOAD_DATA", default_value = "false")]
    pub reload_data: bool,

    /// How /api/predict treats team names without stats
    #[arg(
        long,
        env = "MISSING_TEAM_POLICY",
        value_enum,
        default_value_t = MissingTeamPolicy::Reject
    )]
    pub missing_team_policy: MissingTeamPolicy,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.listen_addr.parse::<SocketAddr>().is_err() {
            anyhow::bail!("listen_addr {:?} is not a valid socket address", self.listen_addr);
        }
        if !Path::new(&self.data_dir).is_dir() {
            anyhow::bail!("data_dir {:?} does not exist or is not a directory", self.data_dir);
        }
        Ok(())
    }
}
