mod alarms;
mod background;
mod collision;
mod driver;
mod entity;
mod frame;
mod geometry;
mod input;
mod loop_runner;
mod metrics;
mod overlay;
mod registry;
mod rendering;
mod textures;
mod world;

pub use alarms::{AlarmArm, AlarmError, AlarmScheduler, MAX_ALARMS};
pub use background::Background;
pub use collision::{detect_collisions, CollisionPair};
pub use driver::{FrameDriver, FrameReport, GameLogic, LogicWorld};
pub use entity::{Entity, EntityDesc, EntityId};
pub use frame::{
    Clock, FrameLimiter, ManualClock, SystemClock, DEFAULT_FRAME_RATE, DEFAULT_MAX_FRAME_DELTA,
};
pub use geometry::{Bounds, IntRect, Size, Vec2, Viewport};
pub use input::Command;
pub use loop_runner::{run_app, run_app_with_metrics, AppError, LoopConfig, SLOW_FRAME_ENV_VAR};
pub use metrics::{LoopMetricsSnapshot, MetricsHandle};
pub use overlay::{
    Colour, Message, MessageOverlay, DEFAULT_FONT_SIZE, MAX_MESSAGES, MAX_MESSAGE_LENGTH,
};
pub use registry::EntityRegistry;
pub use rendering::{render_world, RenderSink, Renderer, SpriteDraw};
pub use textures::{TextureError, TextureHandle, TextureStore};
pub use world::ArcadeWorld;
