use std::env;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use pixels::Error as PixelsError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};
use winit::dpi::LogicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{ElementState, Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowBuilder;

use crate::{resolve_app_paths, StartupError};

use super::driver::{FrameDriver, GameLogic};
use super::frame::{FrameLimiter, SystemClock, DEFAULT_FRAME_RATE, DEFAULT_MAX_FRAME_DELTA};
use super::geometry::Viewport;
use super::input::{Command, CommandLatch};
use super::metrics::{MetricsAccumulator, MetricsHandle};
use super::rendering::Renderer;

pub const SLOW_FRAME_ENV_VAR: &str = "ARCADE_SLOW_FRAME_MS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopConfig {
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub frame_rate: u32,
    pub max_frame_delta_ms: u64,
    pub metrics_log_interval_ms: u64,
    pub simulated_slow_frame_ms: u64,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            window_title: "Arcade".to_string(),
            window_width: 800,
            window_height: 600,
            frame_rate: DEFAULT_FRAME_RATE,
            max_frame_delta_ms: DEFAULT_MAX_FRAME_DELTA.as_millis() as u64,
            metrics_log_interval_ms: 1000,
            simulated_slow_frame_ms: 0,
        }
    }
}

impl LoopConfig {
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.window_width.max(1), self.window_height.max(1))
    }

    pub fn max_frame_delta(&self) -> Duration {
        normalize_non_zero_duration(
            Duration::from_millis(self.max_frame_delta_ms),
            DEFAULT_MAX_FRAME_DELTA,
        )
    }

    pub fn metrics_log_interval(&self) -> Duration {
        normalize_non_zero_duration(
            Duration::from_millis(self.metrics_log_interval_ms),
            Duration::from_secs(1),
        )
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Startup(#[from] StartupError),
    #[error("failed to create event loop: {0}")]
    CreateEventLoop(#[source] EventLoopError),
    #[error("failed to create application window: {0}")]
    CreateWindow(#[source] OsError),
    #[error("failed to initialize renderer: {0}")]
    CreateRenderer(#[source] PixelsError),
    #[error("event loop failed: {0}")]
    EventLoopRun(#[source] EventLoopError),
}

pub fn run_app<G: GameLogic>(config: LoopConfig, logic: G) -> Result<(), AppError> {
    run_app_with_metrics(config, logic, MetricsHandle::default())
}

pub fn run_app_with_metrics<G: GameLogic>(
    config: LoopConfig,
    logic: G,
    metrics_handle: MetricsHandle,
) -> Result<(), AppError> {
    let app_paths = resolve_app_paths()?;
    info!(
        root = %app_paths.root.display(),
        assets_dir = %app_paths.assets_dir.display(),
        "startup"
    );

    let viewport = config.viewport();
    let mut driver = FrameDriver::new(logic, viewport);
    driver.load();
    info!(
        entity_count = driver.world().entities().count(),
        textures = driver.world().textures().len(),
        "game_loaded"
    );

    let event_loop = EventLoop::new().map_err(AppError::CreateEventLoop)?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.window_title.clone())
            .with_inner_size(LogicalSize::new(
                viewport.width as f64,
                viewport.height as f64,
            ))
            .build(&event_loop)
            .map_err(AppError::CreateWindow)?,
    );
    let mut renderer = Renderer::new(Arc::clone(&window), viewport, app_paths.assets_dir.clone())
        .map_err(AppError::CreateRenderer)?;

    event_loop.set_control_flow(ControlFlow::Poll);

    let max_frame_delta = config.max_frame_delta();
    let metrics_log_interval = config.metrics_log_interval();
    let slow_frame_delay = resolve_slow_frame_delay(config.simulated_slow_frame_ms);
    info!(
        frame_rate = config.frame_rate.max(1),
        max_frame_delta_ms = max_frame_delta.as_millis() as u64,
        metrics_log_interval_ms = metrics_log_interval.as_millis() as u64,
        slow_frame_delay_ms = slow_frame_delay.as_millis() as u64,
        "loop_config"
    );

    let mut clock = SystemClock::default();
    let mut limiter = FrameLimiter::new(config.frame_rate, max_frame_delta);
    let mut input_collector = InputCollector::default();
    let mut metrics_accumulator = MetricsAccumulator::new(metrics_log_interval, Instant::now());
    let mut last_applied_title: Option<String> = None;

    event_loop
        .run(move |event, window_target| match event {
            Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => {
                    info!(reason = "window_close", "shutdown_requested");
                    window_target.exit();
                }
                WindowEvent::Resized(new_size) => {
                    if let Err(error) = renderer.resize(new_size.width, new_size.height) {
                        warn!(error = %error, "renderer_resize_failed");
                        window_target.exit();
                    }
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    let is_down = event.state == ElementState::Pressed;
                    input_collector.handle_key(event.physical_key, is_down);
                    if input_collector.quit_requested {
                        info!(reason = "escape_key", "shutdown_requested");
                        window_target.exit();
                    }
                }
                WindowEvent::RedrawRequested => {
                    if slow_frame_delay > Duration::ZERO {
                        // Explicit debug perturbation only; this is not the frame cap.
                        thread::sleep(slow_frame_delay);
                    }

                    let elapsed = limiter.start_frame(&mut clock);
                    let command = input_collector.take_command();
                    let report = driver.step(command, elapsed);

                    if let Err(error) = renderer.render_world(driver.world()) {
                        warn!(error = %error, "renderer_draw_failed");
                        window_target.exit();
                    }

                    let next_title = driver.debug_title();
                    if next_title != last_applied_title {
                        match &next_title {
                            Some(title) => renderer.window().set_title(title),
                            None => renderer.window().set_title(&config.window_title),
                        }
                        last_applied_title = next_title;
                    }

                    metrics_accumulator.record_frame(elapsed, report);
                    if let Some(snapshot) = metrics_accumulator.maybe_snapshot(Instant::now()) {
                        metrics_handle.publish(snapshot);
                        info!(
                            fps = snapshot.fps,
                            frame_time_ms = snapshot.frame_time_ms,
                            collisions_per_second = snapshot.collisions_per_second,
                            entity_count = driver.world().entities().count(),
                            alarms_active = driver.world().alarms().active_count(),
                            "loop_metrics"
                        );
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                window.request_redraw();
            }
            Event::LoopExiting => {
                info!("shutdown");
            }
            _ => {}
        })
        .map_err(AppError::EventLoopRun)
}

#[derive(Debug, Default)]
struct InputCollector {
    quit_requested: bool,
    latch: CommandLatch,
}

impl InputCollector {
    fn handle_key(&mut self, key: PhysicalKey, is_down: bool) {
        let PhysicalKey::Code(code) = key else {
            return;
        };
        if code == KeyCode::Escape {
            if is_down {
                self.quit_requested = true;
            }
            return;
        }
        if let Some(command) = command_for_key(code) {
            self.latch.set(command, is_down);
        }
    }

    fn take_command(&mut self) -> Option<Command> {
        self.latch.take()
    }
}

fn command_for_key(code: KeyCode) -> Option<Command> {
    match code {
        KeyCode::ArrowLeft | KeyCode::KeyA => Some(Command::MoveLeft),
        KeyCode::ArrowRight | KeyCode::KeyD => Some(Command::MoveRight),
        KeyCode::ArrowUp | KeyCode::KeyW => Some(Command::MoveUp),
        KeyCode::ArrowDown | KeyCode::KeyS => Some(Command::MoveDown),
        KeyCode::Space => Some(Command::Fire),
        KeyCode::KeyR => Some(Command::Restart),
        _ => None,
    }
}

fn normalize_non_zero_duration(value: Duration, fallback: Duration) -> Duration {
    if value.is_zero() {
        fallback
    } else {
        value
    }
}

fn resolve_slow_frame_delay(config_slow_frame_ms: u64) -> Duration {
    match env::var(SLOW_FRAME_ENV_VAR) {
        Ok(value) => match value.parse::<u64>() {
            Ok(ms) => Duration::from_millis(ms),
            Err(_) => {
                warn!(
                    env_var = SLOW_FRAME_ENV_VAR,
                    value = value.as_str(),
                    "invalid slow-frame env var value; falling back to config"
                );
                Duration::from_millis(config_slow_frame_ms)
            }
        },
        Err(env::VarError::NotPresent) => Duration::from_millis(config_slow_frame_ms),
        Err(err) => {
            warn!(
                env_var = SLOW_FRAME_ENV_VAR,
                error = %err,
                "unable to read slow-frame env var; falling back to config"
            );
            Duration::from_millis(config_slow_frame_ms)
        }
    }
}
