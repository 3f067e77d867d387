use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use tabnav::LogLevel;
use tabnav::core::config;

#[derive(Parser)]
#[command(name = "tabnav", about = "Bottom tab navigation with a nested graph")]
struct Args {
    /// Log verbosity (overrides config and TABNAV_LOG_LEVEL)
    #[arg(short, long, value_enum)]
    log_level: Option<LogLevel>,

    /// Log file path (overrides config and TABNAV_LOG_FILE)
    #[arg(long)]
    log_file: Option<String>,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Loading happens before the logger exists, so its notices and errors
    // are logged afterwards; defaults apply meanwhile.
    let (loaded, config_error) = match config::load_config() {
        Ok(loaded) => (loaded, None),
        Err(e) => (config::LoadedConfig::default(), Some(e)),
    };
    let resolved = config::resolve(&loaded.config, args.log_level, args.log_file.as_deref());

    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    for notice in &loaded.notices {
        notice.log();
    }
    if let Some(e) = config_error {
        log::warn!("Ignoring config file: {}", e);
    }
    log::info!("tabnav starting up with {:?}", resolved.tab_options);

    tabnav::tui::run(resolved)
}
