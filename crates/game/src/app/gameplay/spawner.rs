use arcade_engine::{EntityDesc, EntityId, IntRect, TextureHandle, Vec2};
use tracing::error;

use super::tuning::{FrameSizes, Tuning};
use super::types::{GameWorld, Kind};

pub(crate) const SHIP_SPAWN: Vec2 = Vec2::new(50.0, 300.0);
pub(crate) const BOSS_SPAWN: Vec2 = Vec2::new(770.0, 300.0);
pub(crate) const SAUCER_WAVE_OFFSETS: [f32; 4] = [0.0, 40.0, 80.0, 120.0];
pub(crate) const BOSS_LANES: [f32; 3] = [5.0, 205.0, 405.0];
pub(crate) const BOSS_VOLLEY_SIZE: u32 = 9;
const BOSS_VOLLEY_X_STEP: f32 = 15.0;
const BOSS_VOLLEY_Y_STEP: f32 = 22.0;
const BOSS_FRAME_COUNT: u32 = 5;
const BULLET_MUZZLE_OFFSET: f32 = 40.0;
const ENEMY_SPAWN_X: f32 = 900.0;
const BOSS_BULLET_SPAWN_X: f32 = 730.0;

const SHIP_ZONE: IntRect = IntRect::new(-10, -10, 820, 620);
const PROJECTILE_ZONE: IntRect = IntRect::new(-100, -100, 1000, 800);
const COMET_ZONE: IntRect = IntRect::new(-100, -100, 1100, 800);

pub(crate) const BACKGROUND_TEXTURE: (&str, &str) = ("images/starfield1.png", "starfield");

/// Texture handles per sprite. A texture that failed to register stays
/// `None` and its entities spawn without an appearance.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Sprites {
    ship: Option<TextureHandle>,
    comet: Option<TextureHandle>,
    saucer: Option<TextureHandle>,
    bullet: Option<TextureHandle>,
    boss: Option<TextureHandle>,
    boss_bullet: Option<TextureHandle>,
}

impl Sprites {
    pub(crate) fn load(world: &mut GameWorld) -> Self {
        Self {
            ship: register_texture(world, "images/ship.png", "ship"),
            comet: register_texture(world, "images/comet.png", "comet"),
            saucer: register_texture(world, "images/saucer.png", "saucer"),
            bullet: register_texture(world, "images/bullet.png", "bullet"),
            boss: register_texture(world, "images/boss.png", "boss"),
            boss_bullet: register_texture(world, "images/bossbullet.png", "boss_bullet"),
        }
    }
}

pub(crate) fn register_texture(
    world: &mut GameWorld,
    path: &str,
    identifier: &str,
) -> Option<TextureHandle> {
    match world.load_texture(path, identifier) {
        Ok(handle) => Some(handle),
        Err(error) => {
            error!(texture = identifier, error = %error, "texture_register_failed");
            None
        }
    }
}

/// Entity factories. Each call builds exactly one entity and registers it;
/// stage gating is the caller's concern.
#[derive(Debug, Clone)]
pub(crate) struct Spawner {
    sizes: FrameSizes,
    sprites: Sprites,
    ship_speed: f32,
    comet_speed: f32,
    saucer_speed: f32,
    bullet_speed: f32,
}

impl Spawner {
    pub(crate) fn new(tuning: &Tuning) -> Self {
        Self {
            sizes: tuning.frame_sizes,
            sprites: Sprites::default(),
            ship_speed: tuning.default_ship_speed,
            comet_speed: tuning.comet_speed,
            saucer_speed: tuning.saucer_speed,
            bullet_speed: tuning.bullet_speed,
        }
    }

    pub(crate) fn set_sprites(&mut self, sprites: Sprites) {
        self.sprites = sprites;
    }

    pub(crate) fn spawn_ship(&self, world: &mut GameWorld) -> EntityId {
        world.spawn(
            EntityDesc::new(Kind::Ship, self.sizes.ship)
                .named("ship")
                .at(SHIP_SPAWN.x, SHIP_SPAWN.y)
                .with_velocity(0.0, 0.0, self.ship_speed)
                .stay_on_screen(true)
                .alive_zone(SHIP_ZONE)
                .with_appearance(self.sprites.ship),
        )
    }

    pub(crate) fn spawn_boss(&self, world: &mut GameWorld, frame: u32) -> EntityId {
        world.spawn(
            EntityDesc::new(Kind::Boss, self.sizes.boss)
                .named("boss")
                .at(BOSS_SPAWN.x, BOSS_SPAWN.y)
                .with_frames(BOSS_FRAME_COUNT, frame)
                .with_appearance(self.sprites.boss),
        )
    }

    pub(crate) fn spawn_boss_bullet(
        &self,
        world: &mut GameWorld,
        x_offset: f32,
        y: f32,
        difficulty: f32,
    ) -> EntityId {
        world.spawn(
            EntityDesc::new(Kind::BossBullet, self.sizes.boss_bullet)
                .at(BOSS_BULLET_SPAWN_X + x_offset, y)
                .with_velocity(-1.0, 0.0, self.bullet_speed * difficulty)
                .alive_zone(PROJECTILE_ZONE)
                .with_appearance(self.sprites.boss_bullet),
        )
    }

    /// One staircase of boss bullets descending from `lane`.
    pub(crate) fn spawn_boss_volley(&self, world: &mut GameWorld, lane: f32, difficulty: f32) {
        for step in 0..BOSS_VOLLEY_SIZE {
            let step = step as f32;
            self.spawn_boss_bullet(
                world,
                step * BOSS_VOLLEY_X_STEP,
                lane + step * BOSS_VOLLEY_Y_STEP,
                difficulty,
            );
        }
    }

    pub(crate) fn spawn_saucer(&self, world: &mut GameWorld, x_offset: f32, difficulty: f32) -> EntityId {
        // The zone stretches with the offset so staggered saucers are not evicted on spawn.
        let zone = IntRect::new(-100, -100, 1100 + x_offset as i32, 800);
        world.spawn(
            EntityDesc::new(Kind::Saucer, self.sizes.saucer)
                .at(ENEMY_SPAWN_X + x_offset, 300.0)
                .with_velocity(-1.0, 0.0, self.saucer_speed * difficulty)
                .alive_zone(zone)
                .with_appearance(self.sprites.saucer),
        )
    }

    pub(crate) fn spawn_comet(&self, world: &mut GameWorld, y: f32, difficulty: f32) -> EntityId {
        world.spawn(
            EntityDesc::new(Kind::Comet, self.sizes.comet)
                .at(ENEMY_SPAWN_X, y)
                .with_velocity(-1.0, 0.0, self.comet_speed * difficulty)
                .alive_zone(COMET_ZONE)
                .with_appearance(self.sprites.comet),
        )
    }

    pub(crate) fn spawn_bullet(&self, world: &mut GameWorld, ship_position: Vec2) -> EntityId {
        world.spawn(
            EntityDesc::new(Kind::Bullet, self.sizes.bullet)
                .at(ship_position.x + BULLET_MUZZLE_OFFSET, ship_position.y)
                .with_velocity(1.0, 0.0, self.bullet_speed)
                .alive_zone(PROJECTILE_ZONE)
                .with_appearance(self.sprites.bullet),
        )
    }

    pub(crate) fn spawn_health_indicator(&self, world: &mut GameWorld, index: u32) -> EntityId {
        world.spawn(
            EntityDesc::new(Kind::HealthIndicator, self.sizes.ship)
                .at(38.0 + 73.0 * index as f32, 35.0)
                .solid(false)
                .auto_update(false)
                .with_appearance(self.sprites.ship),
        )
    }
}

#[cfg(test)]
mod tests {
    use arcade_engine::Viewport;

    use super::*;

    fn world() -> GameWorld {
        GameWorld::new(Viewport::new(800, 600))
    }

    #[test]
    fn volley_forms_a_descending_staircase() {
        let spawner = Spawner::new(&Tuning::default());
        let mut world = world();
        spawner.spawn_boss_volley(&mut world, 205.0, 1.5);

        let bullets: Vec<_> = world.entities().iter().collect();
        assert_eq!(bullets.len(), BOSS_VOLLEY_SIZE as usize);
        for (step, bullet) in bullets.iter().enumerate() {
            let step = step as f32;
            assert!((bullet.position.x - (730.0 + step * 15.0)).abs() < 1e-4);
            assert!((bullet.position.y - (205.0 + step * 22.0)).abs() < 1e-4);
            assert!((bullet.speed() - 600.0).abs() < 1e-3);
            assert_eq!(bullet.direction(), Vec2::new(-1.0, 0.0));
        }
    }

    #[test]
    fn staggered_saucers_start_inside_their_zone() {
        let spawner = Spawner::new(&Tuning::default());
        let mut world = world();
        for offset in SAUCER_WAVE_OFFSETS {
            let id = spawner.spawn_saucer(&mut world, offset, 1.0);
            let saucer = world.entities().get(id).expect("saucer");
            assert!(saucer.in_alive_zone(), "offset {offset}");
        }
    }

    #[test]
    fn health_pips_are_static_and_not_solid() {
        let spawner = Spawner::new(&Tuning::default());
        let mut world = world();
        let id = spawner.spawn_health_indicator(&mut world, 2);
        let pip = world.entities().get(id).expect("pip");
        assert!(!pip.solid);
        assert!(!pip.auto_update);
        assert_eq!(pip.position, Vec2::new(184.0, 35.0));
    }

    #[test]
    fn sprites_register_under_their_identifiers() {
        let mut world = world();
        let sprites = Sprites::load(&mut world);
        assert!(sprites.boss_bullet.is_some());
        assert_eq!(world.textures().len(), 6);
        assert!(world.texture("boss_bullet").is_ok());
    }
}
