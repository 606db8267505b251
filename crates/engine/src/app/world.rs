use std::time::Duration;

use tracing::error;

use super::alarms::{AlarmArm, AlarmError, AlarmScheduler};
use super::background::Background;
use super::entity::{EntityDesc, EntityId};
use super::geometry::Viewport;
use super::overlay::{Colour, MessageOverlay};
use super::registry::EntityRegistry;
use super::textures::{TextureError, TextureHandle, TextureStore};

/// Everything the game logic may touch during a frame. Handed explicitly to
/// every game-logic callback.
#[derive(Debug)]
pub struct ArcadeWorld<K, A> {
    viewport: Viewport,
    entities: EntityRegistry<K>,
    alarms: AlarmScheduler<A>,
    overlay: MessageOverlay,
    background: Background,
    textures: TextureStore,
    alpha_mask: Colour,
    events_paused: bool,
    last_frame_time: Duration,
}

impl<K: Copy + PartialEq, A: Copy + Eq + std::fmt::Debug> ArcadeWorld<K, A> {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            entities: EntityRegistry::new(),
            alarms: AlarmScheduler::new(),
            overlay: MessageOverlay::new(),
            background: Background::default(),
            textures: TextureStore::new(),
            alpha_mask: Colour::BLACK,
            events_paused: false,
            last_frame_time: Duration::ZERO,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn entities(&self) -> &EntityRegistry<K> {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut EntityRegistry<K> {
        &mut self.entities
    }

    pub fn spawn(&mut self, desc: EntityDesc<K>) -> EntityId {
        self.entities.add(desc)
    }

    pub fn kill(&mut self, id: EntityId) -> bool {
        self.entities.kill(id)
    }

    pub fn alarms(&self) -> &AlarmScheduler<A> {
        &self.alarms
    }

    pub fn alarms_mut(&mut self) -> &mut AlarmScheduler<A> {
        &mut self.alarms
    }

    /// Arms `key` for `seconds`, logging a capacity error instead of
    /// propagating it. Game code that must react to overflow uses
    /// `alarms_mut().set` directly.
    pub fn set_alarm(&mut self, key: A, seconds: f32) -> Result<AlarmArm, AlarmError> {
        let result = self.alarms.set_seconds(key, seconds);
        if let Err(err) = &result {
            error!(key = ?key, error = %err, "alarm_arm_failed");
        }
        result
    }

    pub fn alarm_is_active(&self, key: A) -> bool {
        self.alarms.is_active(key)
    }

    pub fn overlay(&self) -> &MessageOverlay {
        &self.overlay
    }

    pub fn overlay_mut(&mut self) -> &mut MessageOverlay {
        &mut self.overlay
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    pub fn set_background(&mut self, texture: Option<TextureHandle>, scroll_speed: f32) {
        self.background.set(texture, scroll_speed);
    }

    pub fn set_background_scroll_speed(&mut self, scroll_speed: f32) {
        self.background.set_scroll_speed(scroll_speed);
    }

    pub fn textures(&self) -> &TextureStore {
        &self.textures
    }

    pub fn load_texture(&mut self, path: &str, identifier: &str) -> Result<TextureHandle, TextureError> {
        self.textures.load(path, identifier)
    }

    pub fn texture(&self, identifier: &str) -> Result<TextureHandle, TextureError> {
        self.textures.get(identifier)
    }

    pub fn alpha_mask(&self) -> Colour {
        self.alpha_mask
    }

    pub fn set_alpha_mask_colour(&mut self, r: u8, g: u8, b: u8) {
        self.alpha_mask = Colour::rgb(r, g, b);
    }

    pub fn pause_events(&mut self, paused: bool) {
        self.events_paused = paused;
    }

    pub fn events_paused(&self) -> bool {
        self.events_paused
    }

    pub fn last_frame_time(&self) -> Duration {
        self.last_frame_time
    }

    pub(crate) fn set_last_frame_time(&mut self, elapsed: Duration) {
        self.last_frame_time = elapsed;
    }

    pub(crate) fn advance(&mut self, dt_seconds: f32) {
        self.entities.integrate(dt_seconds, self.viewport);
        self.background.advance(dt_seconds, self.viewport.width);
    }
}
