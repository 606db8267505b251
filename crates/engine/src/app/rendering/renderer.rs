use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::ImageReader;
use pixels::{Error, Pixels, SurfaceTexture, TextureError};
use tracing::warn;
use winit::window::Window;

use crate::app::geometry::Viewport;
use crate::app::overlay::{Colour, Message};
use crate::app::textures::{TextureHandle, TextureStore};
use crate::app::world::ArcadeWorld;

use super::canvas::{FrameCanvas, LoadedSprite};
use super::text::draw_text;
use super::{render_world, RenderSink, SpriteDraw};

const CLEAR_COLOR: [u8; 4] = [0, 0, 0, 255];

/// A decoded texture (or a failed decode) tagged with the store revision it
/// was read from.
struct CachedSprite {
    revision: u32,
    sprite: Option<LoadedSprite>,
}

type SpriteCache = HashMap<TextureHandle, CachedSprite>;

/// Software renderer on a `pixels` surface. The frame buffer is sized to the
/// game viewport and scaled to the window by `pixels`.
pub struct Renderer {
    window: Arc<Window>,
    pixels: Pixels<'static>,
    viewport: Viewport,
    asset_root: PathBuf,
    sprite_cache: SpriteCache,
    warned_textures: HashSet<(TextureHandle, u32)>,
}

impl Renderer {
    pub fn new(window: Arc<Window>, viewport: Viewport, asset_root: PathBuf) -> Result<Self, Error> {
        let size = window.inner_size();
        let surface = SurfaceTexture::new(size.width, size.height, Arc::clone(&window));
        let pixels = Pixels::new(viewport.width, viewport.height, surface)?;
        Ok(Self {
            window,
            pixels,
            viewport,
            asset_root,
            sprite_cache: HashMap::new(),
            warned_textures: HashSet::new(),
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), TextureError> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels.resize_surface(width, height)
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn render_world<K: Copy + PartialEq, A: Copy + Eq + Debug>(
        &mut self,
        world: &ArcadeWorld<K, A>,
    ) -> Result<(), Error> {
        let mut sink = PixelsSink {
            canvas: FrameCanvas::new(
                self.pixels.frame_mut(),
                self.viewport.width,
                self.viewport.height,
            ),
            textures: world.textures(),
            asset_root: &self.asset_root,
            sprite_cache: &mut self.sprite_cache,
            warned_textures: &mut self.warned_textures,
            alpha_mask: Colour::BLACK,
        };
        render_world(world, &mut sink);
        self.pixels.render()
    }
}

struct PixelsSink<'a> {
    canvas: FrameCanvas<'a>,
    textures: &'a TextureStore,
    asset_root: &'a Path,
    sprite_cache: &'a mut SpriteCache,
    warned_textures: &'a mut HashSet<(TextureHandle, u32)>,
    alpha_mask: Colour,
}

impl RenderSink for PixelsSink<'_> {
    fn begin_frame(&mut self, alpha_mask: Colour) {
        self.alpha_mask = alpha_mask;
        self.canvas.clear(CLEAR_COLOR);
    }

    fn draw_sprite(&mut self, sprite: &SpriteDraw) {
        if let Some(revision) = stale_revision(self.sprite_cache, self.textures, sprite.texture) {
            let loaded = load_texture(self.textures, self.asset_root, sprite.texture);
            let loaded = match loaded {
                Ok(loaded) => Some(loaded),
                Err(reason) => {
                    warn_texture_load_once(
                        self.warned_textures,
                        self.textures,
                        (sprite.texture, revision),
                        &reason,
                    );
                    None
                }
            };
            self.sprite_cache.insert(
                sprite.texture,
                CachedSprite {
                    revision,
                    sprite: loaded,
                },
            );
        }
        let Some(CachedSprite {
            sprite: Some(loaded),
            ..
        }) = self.sprite_cache.get(&sprite.texture)
        else {
            return;
        };
        self.canvas.blit(
            loaded,
            sprite.source,
            sprite.dest_left,
            sprite.dest_top,
            self.alpha_mask,
        );
    }

    fn draw_text(&mut self, message: &Message) {
        draw_text(&mut self.canvas, message);
    }
}

fn load_texture(
    textures: &TextureStore,
    asset_root: &Path,
    handle: TextureHandle,
) -> Result<LoadedSprite, String> {
    let relative = textures
        .path(handle)
        .ok_or_else(|| "unknown_handle".to_string())?;
    let path = asset_root.join(relative);
    let reader = ImageReader::open(&path).map_err(|error| format!("file_open_failed:{error}"))?;
    let decoded = reader
        .decode()
        .map_err(|error| format!("decode_failed:{error}"))?;
    let image = decoded.to_rgba8();
    Ok(LoadedSprite {
        width: image.width(),
        height: image.height(),
        rgba: image.into_raw(),
    })
}

/// The store revision to decode when the cache has no entry for `handle` or
/// holds one read from an older path. `None` means the cache is current.
fn stale_revision(
    cache: &SpriteCache,
    textures: &TextureStore,
    handle: TextureHandle,
) -> Option<u32> {
    let revision = textures.revision(handle).unwrap_or_default();
    match cache.get(&handle) {
        Some(cached) if cached.revision == revision => None,
        _ => Some(revision),
    }
}

fn warn_texture_load_once(
    warned: &mut HashSet<(TextureHandle, u32)>,
    textures: &TextureStore,
    key: (TextureHandle, u32),
    reason: &str,
) {
    if !warned.insert(key) {
        return;
    }
    let (handle, _) = key;
    warn!(
        texture = textures.identifier(handle).unwrap_or("<unknown>"),
        path = textures.path(handle).unwrap_or("<unknown>"),
        reason = reason,
        "texture_load_failed"
    );
}
