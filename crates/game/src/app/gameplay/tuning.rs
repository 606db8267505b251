use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use arcade_engine::{LoopConfig, Size};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub(crate) const TUNING_ENV_VAR: &str = "SCRAMBLE_TUNING";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct FrameSizes {
    pub(crate) ship: Size,
    pub(crate) comet: Size,
    pub(crate) saucer: Size,
    pub(crate) bullet: Size,
    pub(crate) boss: Size,
    pub(crate) boss_bullet: Size,
}

impl Default for FrameSizes {
    fn default() -> Self {
        Self {
            ship: Size::new(79, 30),
            comet: Size::new(40, 40),
            saucer: Size::new(50, 30),
            bullet: Size::new(20, 6),
            boss: Size::new(75, 600),
            boss_bullet: Size::new(16, 16),
        }
    }
}

/// Every gameplay constant. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Tuning {
    pub(crate) loop_config: LoopConfig,
    pub(crate) default_ship_speed: f32,
    pub(crate) intro_stage_seconds: f32,
    pub(crate) interval_stage_seconds: f32,
    pub(crate) comet_stage_seconds: f32,
    pub(crate) saucer_stage_seconds: f32,
    pub(crate) revive_immunity_seconds: f32,
    pub(crate) points_per_second: i64,
    pub(crate) points_per_saucer_kill: i64,
    pub(crate) max_comets: u32,
    pub(crate) max_saucers: u32,
    pub(crate) saucer_speed: f32,
    pub(crate) comet_speed: f32,
    pub(crate) bullet_speed: f32,
    pub(crate) high_score_slots: usize,
    pub(crate) shot_cooldown_seconds: f32,
    pub(crate) comet_spawn_seconds: f32,
    pub(crate) saucer_spawn_seconds: f32,
    pub(crate) boss_vulnerability_seconds: f32,
    pub(crate) boss_first_attack_seconds: f32,
    pub(crate) boss_attack_seconds: f32,
    pub(crate) boss_death_seconds: f32,
    pub(crate) boss_health: i32,
    pub(crate) player_health: i32,
    pub(crate) difficulty_step: f32,
    pub(crate) background_scroll_speed: f32,
    pub(crate) frame_sizes: FrameSizes,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            loop_config: LoopConfig {
                window_title: "Scramble".to_string(),
                ..LoopConfig::default()
            },
            default_ship_speed: 200.0,
            intro_stage_seconds: 5.0,
            interval_stage_seconds: 5.0,
            comet_stage_seconds: 30.0,
            saucer_stage_seconds: 30.0,
            revive_immunity_seconds: 3.0,
            points_per_second: 20,
            points_per_saucer_kill: 20,
            max_comets: 10,
            max_saucers: 12,
            saucer_speed: 100.0,
            comet_speed: 150.0,
            bullet_speed: 400.0,
            high_score_slots: 8,
            shot_cooldown_seconds: 0.5,
            comet_spawn_seconds: 0.8,
            saucer_spawn_seconds: 4.25,
            boss_vulnerability_seconds: 5.0,
            boss_first_attack_seconds: 4.0,
            boss_attack_seconds: 2.5,
            boss_death_seconds: 2.0,
            boss_health: 20,
            player_health: 5,
            difficulty_step: 0.2,
            background_scroll_speed: 100.0,
            frame_sizes: FrameSizes::default(),
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum TuningError {
    #[error("failed to read tuning file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse tuning file '{path}' at {field}: {source}")]
    Parse {
        path: PathBuf,
        field: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Reads the file named by `SCRAMBLE_TUNING`, or falls back to defaults when
/// the variable is unset.
pub(crate) fn load_tuning() -> Result<Tuning, TuningError> {
    match env::var_os(TUNING_ENV_VAR) {
        Some(path) => load_tuning_from(Path::new(&path)),
        None => Ok(Tuning::default()),
    }
}

pub(crate) fn load_tuning_from(path: &Path) -> Result<Tuning, TuningError> {
    let raw = fs::read_to_string(path).map_err(|source| TuningError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_tuning(&raw, path)
}

fn parse_tuning(raw: &str, path: &Path) -> Result<Tuning, TuningError> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    serde_path_to_error::deserialize::<_, Tuning>(&mut deserializer).map_err(|error| {
        let field = error.path().to_string();
        TuningError::Parse {
            path: path.to_path_buf(),
            field,
            source: error.into_inner(),
        }
    })
}
