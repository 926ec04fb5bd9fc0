mod core;
mod directory;
mod location;
#[cfg(test)]
mod test_support;
mod tui;

use clap::Parser;
use devradar::LocationKind;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "devradar", about = "Find nearby devs by the techs they work with")]
struct Args {
    /// Geolocation provider backing the startup position read
    #[arg(short, long, value_enum)]
    location: Option<LocationKind>,

    /// Directory service base URL (overrides config file and env)
    #[arg(short, long)]
    directory_url: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // File logger - the UI owns the terminal, so diagnostics go to devradar.log
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("devradar.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match crate::core::config::load_config() {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Config unusable, falling back to defaults: {}", e);
            Default::default()
        }
    };
    let cli_location = args.location.as_ref().map(|l| l.as_str());
    let config =
        crate::core::config::resolve(&file_config, cli_location, args.directory_url.as_deref());

    log::info!(
        "Devradar starting up with location provider '{}' and directory {}",
        config.location_provider,
        config.directory_base_url
    );

    tui::run(config)
}
