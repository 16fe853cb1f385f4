use game_core::{Settings, CONFIG_PATH};

fn init_logging(level: &str) {
    let filter = level.parse().unwrap_or(log::LevelFilter::Info);
    env_logger::Builder::new()
        .filter_level(filter)
        .parse_default_env()
        .init();
}

fn main() {
    let settings = match Settings::load(CONFIG_PATH) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(1);
        }
    };
    init_logging(&settings.logging.level);
    log::info!("Loaded settings from {}", CONFIG_PATH);

    if let Err(e) = game_core::run_with(settings) {
        log::error!("Game error: {}", e);
        eprintln!("Game error: {}", e);
    }
}
