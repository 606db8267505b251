use super::textures::TextureHandle;

/// Horizontally scrolling backdrop drawn as two side-by-side copies.
#[derive(Debug, Default)]
pub struct Background {
    texture: Option<TextureHandle>,
    scroll_speed: f32,
    scroll_x: f32,
}

impl Background {
    pub fn set(&mut self, texture: Option<TextureHandle>, scroll_speed: f32) {
        self.texture = texture;
        self.scroll_speed = scroll_speed;
        self.scroll_x = 0.0;
    }

    pub fn set_scroll_speed(&mut self, scroll_speed: f32) {
        self.scroll_speed = scroll_speed;
    }

    pub fn texture(&self) -> Option<TextureHandle> {
        self.texture
    }

    pub fn scroll_speed(&self) -> f32 {
        self.scroll_speed
    }

    /// Offset of the first copy, always in `[0, wrap_width)`.
    pub fn scroll_x(&self) -> f32 {
        self.scroll_x
    }

    pub(crate) fn advance(&mut self, dt_seconds: f32, wrap_width: u32) {
        if self.texture.is_none() || wrap_width == 0 {
            return;
        }
        let width = wrap_width as f32;
        self.scroll_x = (self.scroll_x + self.scroll_speed * dt_seconds).rem_euclid(width);
    }
}
