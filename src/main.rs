use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use campus_server::auth::TokenKeys;
use campus_server::config::{self, Config};
use campus_server::{logging, web, MemoryStore};
use clap::{Parser, Subcommand};
use serde::Serialize;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Serialize)]
#[clap(name = "Campus Server", version = VERSION)]
struct Opts {
    /// Configuration file to use instead of the per-user one
    #[clap(short, long)]
    #[serde(skip)]
    config: Option<PathBuf>,

    #[clap(short, long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    port: Option<u16>,

    #[clap(subcommand)]
    #[serde(skip)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the GraphQL server (the default)
    Serve,
    /// Print a signed bearer token for a student id
    IssueToken { student_id: String },
}

fn default_config_file() -> PathBuf {
    let config_file_dir = match config::project_dirs() {
        Some(proj_dirs) => PathBuf::from(proj_dirs.config_dir()),
        None => PathBuf::from("."),
    };

    config_file_dir.join(config::CONFIG_FILE_NAME)
}

fn ensure_config_dirs(config: &Config) -> std::io::Result<()> {
    fs::create_dir_all(&config.log_file_path)?;

    Ok(())
}

#[rocket::main]
async fn main() {
    let mut opts: Opts = Opts::parse();
    let command = opts.command.take().unwrap_or(Command::Serve);
    let config_file = opts.config.clone().unwrap_or_else(default_config_file);

    // If we don't have an existing config file, just write the defaults to it
    if !config_file.as_path().exists() {
        if let Some(config_file_dir) = config_file.parent() {
            fs::create_dir_all(config_file_dir).expect("Unable to create configuration directory");
        }

        let serialized_defaults = toml::to_string(&Config::default())
            .expect("Unable to serialize default configuration");
        fs::write(&config_file, serialized_defaults).expect("Unable to write file");
    }

    let config: Config = Config::figment(&config_file, &opts)
        .extract()
        .expect("The provided configuration is invalid");

    if let Command::IssueToken { student_id } = command {
        let token = TokenKeys::new(&config.jwt_secret, config.token_ttl_secs)
            .issue(&student_id)
            .expect("Unable to sign token");
        println!("{}", token);
        return;
    }

    // Ensure the directories we need exist before going further.
    ensure_config_dirs(&config).expect("Unable to create required directories");

    logging::setup_logger(&config).expect("failed to initialize logging.");

    log::info!("Campus Server v{}", VERSION);
    log::info!("Using configuration file {:?}", config_file);
    log::info!("Using port {:?}", config.port);
    log::info!("Using log path {:?}", config.log_file_path);
    log::info!("Using data path {:?}", config.data_dir);

    if config.uses_default_secret() {
        log::warn!("Signing tokens with the built-in development secret; set jwt_secret before deploying");
    }

    // Only enable Sentry reporting if a DSN was configured
    let _sentry = config.sentry_dsn.as_deref().map(|dsn| {
        log::info!("Initializing Sentry for reporting crashes");

        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    let store = MemoryStore::load(&config.data_dir).expect("Failed to load seed data");

    web::build_rocket(&config, Arc::new(store))
        .launch()
        .await
        .expect("Failed to launch the web server");

    log::info!("Shutting down the server");
}
