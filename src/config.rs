use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use log::LevelFilter;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = "campus.toml";
pub const ENV_PREFIX: &str = "CAMPUS_";
pub const DEFAULT_JWT_SECRET: &str = "campus-development-secret";

pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "Fenago", "Campus Server")
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    pub address: IpAddr,
    pub port: u16,
    pub log_level: LevelFilter,
    pub log_file_path: PathBuf,
    pub data_dir: PathBuf,
    pub jwt_secret: String,
    pub token_ttl_secs: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentry_dsn: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let mut log_file_path: PathBuf = [".", "logs"].iter().collect();

        if let Some(proj_dirs) = project_dirs() {
            log_file_path = PathBuf::from(proj_dirs.data_dir());
            log_file_path.push("logs");
        }

        Self {
            address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 23400,
            log_level: LevelFilter::Info,
            log_file_path,
            data_dir: [".", "data"].iter().collect(),
            jwt_secret: DEFAULT_JWT_SECRET.to_owned(),
            token_ttl_secs: 24 * 60 * 60,
            sentry_dsn: None,
        }
    }
}

impl Config {
    /// Defaults, then the TOML file, then `CAMPUS_*` variables, then
    /// `overrides` (usually the command line).
    pub fn figment<T: Serialize>(config_file: &Path, overrides: T) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(Serialized::defaults(overrides))
    }

    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }
}
