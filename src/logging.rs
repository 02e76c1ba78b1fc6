use fern::colors::{Color, ColoredLevelConfig};

use crate::config::Config;

pub const LOG_FILE_PREFIX: &str = "campus.server.";

pub fn setup_logger(config: &Config) -> Result<(), fern::InitError> {
    let colors_level = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Blue)
        .debug(Color::White)
        .trace(Color::Magenta);

    fern::Dispatch::new()
        .level(config.log_level)
        .chain(
            fern::Dispatch::new()
                .format(move |out, message, record| {
                    out.finish(format_args!(
                        "[{}][{}][{}] {}",
                        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                        record.target(),
                        colors_level.color(record.level()),
                        message
                    ))
                })
                .chain(std::io::stdout()),
        )
        .chain(
            fern::Dispatch::new()
                .format(move |out, message, record| {
                    out.finish(format_args!(
                        "[{}][{}][{}] {}",
                        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                        record.target(),
                        record.level(),
                        message
                    ))
                })
                .chain(fern::DateBased::new(
                    config.log_file_path.join(LOG_FILE_PREFIX),
                    "%Y-%m-%d.log",
                )),
        )
        .apply()?;
    Ok(())
}
