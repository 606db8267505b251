use std::env;

use arcade_engine::LoopConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use super::gameplay::{self, ScrambleGame, TuningError};

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) game: ScrambleGame,
}

pub(crate) fn build_app() -> Result<AppWiring, TuningError> {
    init_tracing();
    info!("=== Scramble Startup ===");

    let tuning = gameplay::load_tuning()?;
    let tuning_source =
        env::var(gameplay::TUNING_ENV_VAR).unwrap_or_else(|_| "<defaults>".to_string());
    info!(
        tuning_source = tuning_source.as_str(),
        player_health = tuning.player_health,
        frame_rate = tuning.loop_config.frame_rate,
        "tuning_loaded"
    );

    let config = tuning.loop_config.clone();
    let game = ScrambleGame::new(tuning, StdRng::from_entropy());
    Ok(AppWiring { config, game })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}
