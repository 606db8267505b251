use std::collections::HashMap;
use std::time::Duration;

use arcade_engine::EntityId;
use rand::rngs::StdRng;

mod difficulty;
mod ledger;
mod scene_impl;
mod spawner;
mod stages;
mod tuning;
mod types;

use difficulty::DifficultyGovernor;
use ledger::Ledger;
use scene_impl::{alarm_handlers, AlarmHandler};
use spawner::Spawner;
use stages::StageMachine;
use types::CapabilityFlags;

pub(crate) use tuning::{load_tuning, Tuning, TuningError, TUNING_ENV_VAR};

/// The side-scrolling shooter: a stage machine driving spawns, collisions
/// and scoring on top of the engine world.
pub(crate) struct ScrambleGame {
    tuning: Tuning,
    rng: StdRng,
    stages: StageMachine,
    flags: CapabilityFlags,
    ledger: Ledger,
    difficulty: DifficultyGovernor,
    spawner: Spawner,
    alarm_handlers: HashMap<types::AlarmKey, AlarmHandler>,
    ship: Option<EntityId>,
    boss_health: i32,
    boss_vulnerable: bool,
    comet_count: u32,
    saucer_count: u32,
    play_time: Duration,
}

impl ScrambleGame {
    pub(crate) fn new(tuning: Tuning, rng: StdRng) -> Self {
        Self {
            rng,
            stages: StageMachine::default(),
            flags: CapabilityFlags::default(),
            ledger: Ledger::new(tuning.player_health, tuning.high_score_slots),
            difficulty: DifficultyGovernor::new(tuning.difficulty_step),
            spawner: Spawner::new(&tuning),
            alarm_handlers: alarm_handlers(),
            ship: None,
            boss_health: tuning.boss_health,
            boss_vulnerable: false,
            comet_count: 0,
            saucer_count: 0,
            play_time: Duration::ZERO,
            tuning,
        }
    }
}
