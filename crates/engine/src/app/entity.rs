use super::geometry::{Bounds, IntRect, Size, Vec2, Viewport};
use super::textures::TextureHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

#[derive(Debug, Default)]
pub(crate) struct EntityIdAllocator {
    next: u64,
}

impl EntityIdAllocator {
    pub(crate) fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next = self.next.saturating_add(1);
        id
    }
}

/// A moving, collidable sprite. `position` is the centre of the bounding box
/// in screen pixels with y pointing down.
#[derive(Debug, Clone)]
pub struct Entity<K> {
    id: EntityId,
    kind: K,
    name: Option<String>,
    pub position: Vec2,
    frame_size: Size,
    direction: Vec2,
    speed: f32,
    pub solid: bool,
    pub stay_on_screen: bool,
    pub alive_zone: IntRect,
    pub auto_update: bool,
    pub appearance: Option<TextureHandle>,
    frame: u32,
    frame_count: u32,
    doomed: bool,
}

impl<K: Copy> Entity<K> {
    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn kind(&self) -> K {
        self.kind
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn frame_size(&self) -> Size {
        self.frame_size
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::centered(self.position, self.frame_size)
    }

    /// Unit direction of travel (or zero).
    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Effective velocity in pixels per second.
    pub fn velocity(&self) -> Vec2 {
        Vec2::new(self.direction.x * self.speed, self.direction.y * self.speed)
    }

    pub fn set_velocity(&mut self, x: f32, y: f32, speed: f32) {
        self.direction = Vec2::new(x, y).normalized();
        self.speed = speed;
    }

    pub fn set_direction(&mut self, x: f32, y: f32) {
        self.direction = Vec2::new(x, y).normalized();
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    pub fn set_frame(&mut self, frame: u32) {
        self.frame = frame.min(self.frame_count - 1);
    }

    pub fn next_frame(&mut self) {
        self.frame = (self.frame + 1) % self.frame_count;
    }

    /// Source rectangle of the current frame inside a horizontal sprite strip.
    pub fn source_rect(&self) -> IntRect {
        let width = self.frame_size.width as i32;
        IntRect::new(
            self.frame as i32 * width,
            0,
            width,
            self.frame_size.height as i32,
        )
    }

    pub fn is_doomed(&self) -> bool {
        self.doomed
    }

    pub fn in_alive_zone(&self) -> bool {
        self.alive_zone.contains_or_unbounded(self.position)
    }

    pub(crate) fn doom(&mut self) {
        self.solid = false;
        self.doomed = true;
    }

    pub(crate) fn integrate(&mut self, dt_seconds: f32, viewport: Viewport) {
        self.position.x += self.direction.x * self.speed * dt_seconds;
        self.position.y += self.direction.y * self.speed * dt_seconds;
        if self.stay_on_screen {
            self.position = viewport.clamp_center(self.position, self.frame_size);
        }
    }
}

/// Builder for a new entity. Defaults: solid, not stay-on-screen, unbounded
/// alive zone, auto-updated, single frame, at rest.
#[derive(Debug, Clone)]
pub struct EntityDesc<K> {
    kind: K,
    name: Option<String>,
    position: Vec2,
    frame_size: Size,
    direction: Vec2,
    speed: f32,
    solid: bool,
    stay_on_screen: bool,
    alive_zone: IntRect,
    auto_update: bool,
    appearance: Option<TextureHandle>,
    frame: u32,
    frame_count: u32,
}

impl<K> EntityDesc<K> {
    pub fn new(kind: K, frame_size: Size) -> Self {
        Self {
            kind,
            name: None,
            position: Vec2::ZERO,
            frame_size,
            direction: Vec2::ZERO,
            speed: 0.0,
            solid: true,
            stay_on_screen: false,
            alive_zone: IntRect::UNBOUNDED,
            auto_update: true,
            appearance: None,
            frame: 0,
            frame_count: 1,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.position = Vec2::new(x, y);
        self
    }

    pub fn with_velocity(mut self, x: f32, y: f32, speed: f32) -> Self {
        self.direction = Vec2::new(x, y).normalized();
        self.speed = speed;
        self
    }

    pub fn solid(mut self, solid: bool) -> Self {
        self.solid = solid;
        self
    }

    pub fn stay_on_screen(mut self, stay_on_screen: bool) -> Self {
        self.stay_on_screen = stay_on_screen;
        self
    }

    pub fn alive_zone(mut self, zone: IntRect) -> Self {
        self.alive_zone = zone;
        self
    }

    pub fn auto_update(mut self, auto_update: bool) -> Self {
        self.auto_update = auto_update;
        self
    }

    pub fn with_appearance(mut self, texture: Option<TextureHandle>) -> Self {
        self.appearance = texture;
        self
    }

    /// Frame count is at least one; the starting frame is clamped into range.
    pub fn with_frames(mut self, frame_count: u32, frame: u32) -> Self {
        self.frame_count = frame_count.max(1);
        self.frame = frame.min(self.frame_count - 1);
        self
    }

    pub(crate) fn build(self, id: EntityId) -> Entity<K> {
        Entity {
            id,
            kind: self.kind,
            name: self.name,
            position: self.position,
            frame_size: self.frame_size,
            direction: self.direction,
            speed: self.speed,
            solid: self.solid,
            stay_on_screen: self.stay_on_screen,
            alive_zone: self.alive_zone,
            auto_update: self.auto_update,
            appearance: self.appearance,
            frame: self.frame,
            frame_count: self.frame_count,
            doomed: false,
        }
    }
}
