use clap::Parser;
use kbot::LogLevel;
use kbot::core::config::{self, CliOverrides, KbotConfig};
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "kbot", about = "Okinawa travel buddy chat")]
struct Args {
    /// Delay before K-Bot's text reply, in milliseconds
    #[arg(long)]
    first_reply_delay_ms: Option<u64>,

    /// Delay between the text reply and the POI carousel, in milliseconds
    #[arg(long)]
    carousel_delay_ms: Option<u64>,

    /// Start with an empty thread instead of K-Bot's greeting
    #[arg(long)]
    no_opening: bool,

    /// Log level for kbot.log
    #[arg(long, default_value_t, value_enum)]
    log_level: LogLevel,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to kbot.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("kbot.log") {
        let _ = WriteLogger::init(args.log_level.into(), log_config, log_file);
    }

    log::info!("K-Bot starting up");

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("{}; using defaults", e);
        KbotConfig::default()
    });
    let overrides = CliOverrides {
        first_reply_delay_ms: args.first_reply_delay_ms,
        carousel_delay_ms: args.carousel_delay_ms,
        no_opening: args.no_opening,
    };
    let resolved = config::resolve(&file_config, &overrides);
    log::info!("Resolved config: {:?}", resolved);

    kbot::tui::run(resolved)
}
