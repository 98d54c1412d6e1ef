use fern::colors::{Color, ColoredLevelConfig};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Initializes the global logger at `level`, writing colored, timestamped
/// lines to stdout.
pub fn initialize_logging(level: log::LevelFilter) -> Result<(), fern::InitError> {
    let colors = ColoredLevelConfig::new()
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{} [{}] {}: {}",
                timestamp(),
                colors.color(record.level()),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stdout())
        .apply()?;
    Ok(())
}

fn timestamp() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| String::from("<unknown time>"))
}
