use std::collections::HashMap;
use std::time::Duration;

use arcade_engine::{Command, Entity, EntityId, GameLogic};
use rand::Rng;
use tracing::{error, info, warn};

use super::spawner::{
    register_texture, Sprites, BACKGROUND_TEXTURE, BOSS_LANES, SAUCER_WAVE_OFFSETS,
};
use super::stages::{interval_successor, Stage};
use super::types::{AlarmKey, Flag, GameWorld, Kind};
use super::ScrambleGame;

pub(crate) type AlarmHandler = fn(&mut ScrambleGame, &mut GameWorld);

const SAUCER_LANE_BAND: (f32, f32) = (290.0, 310.0);
const BOSS_LANE_BAND: (f32, f32) = (40.0, 90.0);
const BOSS_HIT_BAND: (f32, f32) = (270.0, 330.0);
const BOSS_DAMAGED_HEALTH: i32 = 10;
const BOSS_DEAD_FRAME: u32 = 4;
const SAUCER_WAVE_CAP_MARGIN: u32 = SAUCER_WAVE_OFFSETS.len() as u32 - 1;
const TITLE_FONT_SIZE: u32 = 50;
const SCOREBOARD_FONT_SIZE: u32 = 30;

/// Alarm key to behaviour, built once per game.
pub(crate) fn alarm_handlers() -> HashMap<AlarmKey, AlarmHandler> {
    let handlers: [(AlarmKey, AlarmHandler); 11] = [
        (AlarmKey::ShotFired, ScrambleGame::on_shot_cooldown),
        (AlarmKey::IntroStageDuration, ScrambleGame::on_stage_elapsed),
        (AlarmKey::IntervalStageDuration, ScrambleGame::on_interval_elapsed),
        (AlarmKey::CometStageDuration, ScrambleGame::on_stage_elapsed),
        (AlarmKey::SaucerStageDuration, ScrambleGame::on_stage_elapsed),
        (AlarmKey::ReviveImmunity, ScrambleGame::on_revive_immunity_over),
        (AlarmKey::SpawnComet, ScrambleGame::on_spawn_comet),
        (AlarmKey::SpawnSaucer, ScrambleGame::on_spawn_saucer_wave),
        (AlarmKey::BossVulnerability, ScrambleGame::on_boss_vulnerability),
        (AlarmKey::BossAttack, ScrambleGame::on_boss_attack),
        (AlarmKey::BossDeath, ScrambleGame::on_boss_death),
    ];
    let table = HashMap::from(handlers);
    debug_assert!(AlarmKey::ALL.iter().all(|key| table.contains_key(key)));
    table
}

impl GameLogic for ScrambleGame {
    type Kind = Kind;
    type Alarm = AlarmKey;

    fn load(&mut self, world: &mut GameWorld) {
        self.spawner.set_sprites(Sprites::load(world));
        let (path, identifier) = BACKGROUND_TEXTURE;
        let background = register_texture(world, path, identifier);
        world.set_background(background, self.tuning.background_scroll_speed);
        self.restart(world);
    }

    fn update(&mut self, command: Option<Command>, world: &mut GameWorld) {
        self.play_time += world.last_frame_time();
        world.overlay_mut().clear();

        if let Some(command) = command {
            self.apply_command(command, world);
        }

        match self.stages.current() {
            Stage::Introduction => {
                let overlay = world.overlay_mut();
                overlay.set_font_size(TITLE_FONT_SIZE);
                overlay.create_message("S C R A M B L E", 230, 100);
            }
            Stage::Interval => {}
            Stage::Comet => {
                if self.comet_count < self.tuning.max_comets
                    && !world.alarm_is_active(AlarmKey::SpawnComet)
                {
                    arm(world, AlarmKey::SpawnComet, self.tuning.comet_spawn_seconds);
                }
            }
            Stage::Saucer => {
                self.steer_ship_vertically(world, SAUCER_LANE_BAND);
                let cap = self.tuning.max_saucers.saturating_sub(SAUCER_WAVE_CAP_MARGIN);
                if self.saucer_count < cap && !world.alarm_is_active(AlarmKey::SpawnSaucer) {
                    arm(world, AlarmKey::SpawnSaucer, self.tuning.saucer_spawn_seconds);
                }
                for saucer in world
                    .entities_mut()
                    .iter_mut()
                    .filter(|entity| entity.kind() == Kind::Saucer)
                {
                    saucer.position.y = saucer_path_y(saucer.position.x);
                }
            }
            Stage::Boss => self.steer_ship_horizontally(world, BOSS_LANE_BAND),
            Stage::Scoreboard => {
                self.compose_scoreboard(world);
                if command == Some(Command::Restart) {
                    self.restart(world);
                }
            }
        }
    }

    fn on_collision(&mut self, first: EntityId, second: EntityId, world: &mut GameWorld) {
        let kind_of = |id: EntityId| world.entities().get(id).map(Entity::kind);
        let (Some(first_kind), Some(second_kind)) = (kind_of(first), kind_of(second)) else {
            return;
        };
        // Orders the pair as (a, b) when the kinds match in either order.
        let between = |a: Kind, b: Kind| {
            if first_kind == a && second_kind == b {
                Some((first, second))
            } else if first_kind == b && second_kind == a {
                Some((second, first))
            } else {
                None
            }
        };

        if let Some((comet, ship)) = between(Kind::Comet, Kind::Ship) {
            if self.flags.is_set(Flag::TakeDamage) {
                world.kill(ship);
                self.damage_player(world);
            } else {
                world.kill(comet);
            }
        } else if let Some((saucer, ship)) = between(Kind::Saucer, Kind::Ship) {
            world.kill(saucer);
            if self.flags.is_set(Flag::TakeDamage) {
                world.kill(ship);
                self.damage_player(world);
            }
        } else if let Some((saucer, bullet)) = between(Kind::Saucer, Kind::Bullet) {
            world.kill(saucer);
            world.kill(bullet);
            self.ledger.modify_score(self.tuning.points_per_saucer_kill);
        } else if let Some((_, bullet)) = between(Kind::Comet, Kind::Bullet) {
            world.kill(bullet);
        } else if let Some((_, bullet)) = between(Kind::Boss, Kind::Bullet) {
            let bullet_y = world
                .entities()
                .get(bullet)
                .map(|entity| entity.position.y)
                .unwrap_or_default();
            if strictly_between(bullet_y, BOSS_HIT_BAND) && self.boss_vulnerable {
                self.hit_boss(world);
            }
            world.kill(bullet);
        } else if let Some((boss_bullet, bullet)) = between(Kind::BossBullet, Kind::Bullet) {
            world.kill(boss_bullet);
            world.kill(bullet);
        } else if let Some((boss_bullet, ship)) = between(Kind::BossBullet, Kind::Ship) {
            world.kill(boss_bullet);
            if self.flags.is_set(Flag::TakeDamage) {
                world.kill(ship);
                self.damage_player(world);
            }
        }
    }

    fn on_alarm(&mut self, key: AlarmKey, world: &mut GameWorld) {
        match self.alarm_handlers.get(&key).copied() {
            Some(handler) => handler(self, world),
            None => {
                error!(alarm = ?key, "alarm_without_handler");
                debug_assert!(false, "no handler registered for alarm {key:?}");
            }
        }
    }

    fn on_object_deleted(&mut self, entity: &Entity<Kind>, _world: &mut GameWorld) {
        match entity.kind() {
            Kind::Comet => self.comet_count = self.comet_count.saturating_sub(1),
            Kind::Saucer => self.saucer_count = self.saucer_count.saturating_sub(1),
            Kind::Ship if self.ship == Some(entity.id()) => self.ship = None,
            _ => {}
        }
    }

    fn debug_title(&self, world: &GameWorld) -> Option<String> {
        Some(format!(
            "Scramble | stage: {:?} | health: {} | score: {} | difficulty: {:.1} | entities: {}",
            self.stages.current(),
            self.ledger.health(),
            self.ledger.score(),
            self.difficulty.level(),
            world.entities().count()
        ))
    }
}

impl ScrambleGame {
    fn apply_command(&mut self, command: Command, world: &mut GameWorld) {
        let speed = self.tuning.default_ship_speed;
        let Some(ship_id) = self.ship else {
            return;
        };
        let Some(ship) = world.entities_mut().get_mut(ship_id) else {
            return;
        };
        let direction = ship.direction();
        match command {
            Command::MoveRight if self.flags.is_set(Flag::MoveRight) => {
                ship.set_velocity(1.0, direction.y, speed);
            }
            Command::MoveLeft if self.flags.is_set(Flag::MoveLeft) => {
                ship.set_velocity(-1.0, direction.y, speed);
            }
            Command::MoveUp if self.flags.is_set(Flag::MoveUp) => {
                ship.set_velocity(direction.x, -1.0, speed);
            }
            Command::MoveDown if self.flags.is_set(Flag::MoveDown) => {
                ship.set_velocity(direction.x, 1.0, speed);
            }
            Command::Fire if self.flags.is_set(Flag::Shoot) => {
                let origin = ship.position;
                self.spawner.spawn_bullet(world, origin);
                self.flags.set(Flag::Shoot, false);
                arm(world, AlarmKey::ShotFired, self.tuning.shot_cooldown_seconds);
            }
            _ => {}
        }
    }

    fn steer_ship_vertically(&self, world: &mut GameWorld, (low, high): (f32, f32)) {
        let speed = self.tuning.default_ship_speed;
        let Some(ship) = self.ship.and_then(|id| world.entities_mut().get_mut(id)) else {
            return;
        };
        let (y, direction) = (ship.position.y, ship.direction());
        if y > high {
            ship.set_velocity(direction.x, -1.0, speed);
        } else if y < low {
            ship.set_velocity(direction.x, 1.0, speed);
        } else if strictly_between(y, (low, high)) && direction.y != 0.0 {
            ship.set_velocity(direction.x, 0.0, speed);
        }
    }

    fn steer_ship_horizontally(&self, world: &mut GameWorld, (low, high): (f32, f32)) {
        let speed = self.tuning.default_ship_speed;
        let Some(ship) = self.ship.and_then(|id| world.entities_mut().get_mut(id)) else {
            return;
        };
        let (x, direction) = (ship.position.x, ship.direction());
        if x > high {
            ship.set_velocity(-1.0, direction.y, speed);
        } else if x < low {
            ship.set_velocity(1.0, direction.y, speed);
        } else if strictly_between(x, (low, high)) && direction.x != 0.0 {
            ship.set_velocity(0.0, direction.y, speed);
        }
    }

    fn compose_scoreboard(&self, world: &mut GameWorld) {
        let overlay = world.overlay_mut();
        overlay.set_font_size(SCOREBOARD_FONT_SIZE);
        overlay.create_message(&format!("Score this round: {}", self.ledger.score()), 245, 50);
        overlay.create_message("Highscores", 320, 100);
        for (rank, score) in self.ledger.high_scores().iter().enumerate() {
            overlay.create_message(
                &format!("{})  {} points", rank + 1, score),
                270,
                160 + rank as i32 * 30,
            );
        }
        overlay.create_message("Press 'R' to restart the game", 220, 500);
    }

    fn change_stage(&mut self, next: Stage, world: &mut GameWorld) {
        let outgoing = self.stages.enter(next);
        self.finish_stage(outgoing);
        self.initialise_stage(next, world);
        info!(stage = ?next, previous = ?outgoing, "stage_changed");
    }

    fn finish_stage(&mut self, stage: Stage) {
        if stage == Stage::Boss {
            let level = self.difficulty.increase();
            info!(difficulty = level, "difficulty_raised");
        }
    }

    fn initialise_stage(&mut self, stage: Stage, world: &mut GameWorld) {
        self.flags.apply(&stage.capability_policy());
        if let Some(alarm) = stage.duration_alarm() {
            arm(world, alarm, self.stage_seconds(stage));
        }
        match stage {
            Stage::Boss => {
                arm(
                    world,
                    AlarmKey::BossVulnerability,
                    self.tuning.boss_vulnerability_seconds,
                );
                arm(world, AlarmKey::BossAttack, self.tuning.boss_first_attack_seconds);
                self.spawn_boss(world);
            }
            Stage::Scoreboard => {
                world.entities_mut().clear();
                self.ship = None;
            }
            _ => {}
        }
    }

    fn stage_seconds(&self, stage: Stage) -> f32 {
        match stage {
            Stage::Introduction => self.tuning.intro_stage_seconds,
            Stage::Interval => self.tuning.interval_stage_seconds,
            Stage::Comet => self.tuning.comet_stage_seconds,
            Stage::Saucer => self.tuning.saucer_stage_seconds,
            Stage::Boss | Stage::Scoreboard => 0.0,
        }
    }

    /// Back to a fresh introduction. High scores are kept.
    fn restart(&mut self, world: &mut GameWorld) {
        world.overlay_mut().clear();
        world.alarms_mut().cancel_all();
        world.entities_mut().clear();
        self.ship = None;
        self.flags.set_all(true);

        self.stages.set_previous(Stage::Introduction);
        self.change_stage(Stage::Introduction, world);

        self.difficulty.reset();
        self.ledger.reset(self.tuning.player_health);
        self.boss_health = self.tuning.boss_health;
        self.boss_vulnerable = false;
        self.comet_count = 0;
        self.saucer_count = 0;
        self.play_time = Duration::ZERO;

        self.draw_health(world);
        self.revive(world);
    }

    fn end_game(&mut self, world: &mut GameWorld) {
        self.change_stage(Stage::Scoreboard, world);
        let survival_points = self.play_time.as_secs() as i64 * self.tuning.points_per_second;
        let score = self.ledger.modify_score(survival_points);
        let committed = self.ledger.commit_score();
        info!(score, committed, "score_committed");
        world.alarms_mut().cancel_all();
    }

    fn damage_player(&mut self, world: &mut GameWorld) {
        let health = self.ledger.modify_health(-1);
        self.draw_health(world);
        if health > 0 {
            self.revive(world);
        } else {
            self.end_game(world);
        }
    }

    fn revive(&mut self, world: &mut GameWorld) {
        self.ship = Some(self.spawner.spawn_ship(world));
        self.flags.set(Flag::TakeDamage, false);
        arm(world, AlarmKey::ReviveImmunity, self.tuning.revive_immunity_seconds);
    }

    fn draw_health(&self, world: &mut GameWorld) {
        world.entities_mut().remove_all_of_kind(Kind::HealthIndicator);
        for index in 0..self.ledger.health().max(0) as u32 {
            self.spawner.spawn_health_indicator(world, index);
        }
    }

    fn spawn_boss(&mut self, world: &mut GameWorld) {
        self.boss_health = self.tuning.boss_health;
        self.boss_vulnerable = false;
        self.spawner.spawn_boss(world, self.boss_frame());
    }

    fn hit_boss(&mut self, world: &mut GameWorld) {
        self.boss_health = (self.boss_health - 1).max(0);
        self.animate_boss(world);
        if self.boss_health == 0 {
            arm(world, AlarmKey::BossDeath, self.tuning.boss_death_seconds);
        }
    }

    fn boss_frame(&self) -> u32 {
        if self.boss_health <= 0 {
            return BOSS_DEAD_FRAME;
        }
        let damaged = if self.boss_health <= BOSS_DAMAGED_HEALTH { 2 } else { 0 };
        let shielded = if self.boss_vulnerable { 0 } else { 1 };
        damaged + shielded
    }

    fn animate_boss(&self, world: &mut GameWorld) {
        let frame = self.boss_frame();
        for boss in world
            .entities_mut()
            .iter_mut()
            .filter(|entity| entity.kind() == Kind::Boss)
        {
            boss.set_frame(frame);
        }
    }

    fn on_shot_cooldown(&mut self, _world: &mut GameWorld) {
        self.flags.set(Flag::Shoot, true);
    }

    fn on_revive_immunity_over(&mut self, _world: &mut GameWorld) {
        self.flags.set(Flag::TakeDamage, true);
    }

    fn on_stage_elapsed(&mut self, world: &mut GameWorld) {
        self.change_stage(Stage::Interval, world);
    }

    fn on_interval_elapsed(&mut self, world: &mut GameWorld) {
        let previous = self.stages.previous();
        let next = interval_successor(previous).unwrap_or_else(|| {
            warn!(previous = ?previous, "interval_without_route");
            Stage::Comet
        });
        self.change_stage(next, world);
    }

    fn on_spawn_comet(&mut self, world: &mut GameWorld) {
        if self.stages.current() != Stage::Comet {
            return;
        }
        let y = self.rng.gen_range(1..=world.viewport().height) as f32;
        self.spawner.spawn_comet(world, y, self.difficulty.level());
        self.comet_count += 1;
    }

    fn on_spawn_saucer_wave(&mut self, world: &mut GameWorld) {
        if self.stages.current() != Stage::Saucer {
            return;
        }
        for offset in SAUCER_WAVE_OFFSETS {
            self.spawner.spawn_saucer(world, offset, self.difficulty.level());
            self.saucer_count += 1;
        }
    }

    fn on_boss_vulnerability(&mut self, world: &mut GameWorld) {
        self.boss_vulnerable = !self.boss_vulnerable;
        self.animate_boss(world);
        if self.stages.current() == Stage::Boss {
            arm(
                world,
                AlarmKey::BossVulnerability,
                self.tuning.boss_vulnerability_seconds,
            );
        }
    }

    fn on_boss_attack(&mut self, world: &mut GameWorld) {
        if self.boss_health > 0 {
            let lane = BOSS_LANES[self.rng.gen_range(0..BOSS_LANES.len())];
            self.spawner
                .spawn_boss_volley(world, lane, self.difficulty.level());
        }
        if self.stages.current() == Stage::Boss {
            arm(world, AlarmKey::BossAttack, self.tuning.boss_attack_seconds);
        }
    }

    fn on_boss_death(&mut self, world: &mut GameWorld) {
        world.entities_mut().remove_all_of_kind(Kind::Boss);
        self.change_stage(Stage::Interval, world);
    }
}

/// Arm failures are already logged by the world.
fn arm(world: &mut GameWorld, key: AlarmKey, seconds: f32) {
    let _ = world.set_alarm(key, seconds);
}

fn strictly_between(value: f32, (low, high): (f32, f32)) -> bool {
    low < value && value < high
}

fn saucer_path_y(x: f32) -> f32 {
    ((1300.0 - x) / 100.0).sin() * 200.0 + 300.0
}
