use crate::app::geometry::IntRect;
use crate::app::overlay::Colour;

pub(crate) struct LoadedSprite {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// RGBA8 frame buffer with clipped drawing primitives.
pub(crate) struct FrameCanvas<'a> {
    frame: &'a mut [u8],
    width: u32,
    height: u32,
}

impl<'a> FrameCanvas<'a> {
    pub(crate) fn new(frame: &'a mut [u8], width: u32, height: u32) -> Self {
        Self {
            frame,
            width,
            height,
        }
    }

    pub(crate) fn clear(&mut self, color: [u8; 4]) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&color);
        }
    }

    pub(crate) fn put_pixel(&mut self, x: i32, y: i32, color: [u8; 4]) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        if let Some(pixel) = self.frame.get_mut(offset..offset + 4) {
            pixel.copy_from_slice(&color);
        }
    }

    pub(crate) fn fill_rect(&mut self, left: i32, top: i32, width: i32, height: i32, color: [u8; 4]) {
        for y in top..top + height {
            for x in left..left + width {
                self.put_pixel(x, y, color);
            }
        }
    }

    /// Copies `source` from the sprite to `(dest_left, dest_top)`. Pixels that
    /// are fully transparent or match the alpha mask are skipped.
    pub(crate) fn blit(
        &mut self,
        sprite: &LoadedSprite,
        source: IntRect,
        dest_left: i32,
        dest_top: i32,
        alpha_mask: Colour,
    ) {
        let expected_len = sprite.width as usize * sprite.height as usize * 4;
        if sprite.rgba.len() < expected_len {
            return;
        }
        let src_left = source.left.max(0);
        let src_top = source.top.max(0);
        let src_right = (source.left + source.width).min(sprite.width as i32);
        let src_bottom = (source.top + source.height).min(sprite.height as i32);

        for src_y in src_top..src_bottom {
            let out_y = dest_top + (src_y - source.top);
            if out_y < 0 || out_y >= self.height as i32 {
                continue;
            }
            for src_x in src_left..src_right {
                let out_x = dest_left + (src_x - source.left);
                if out_x < 0 || out_x >= self.width as i32 {
                    continue;
                }
                let offset = (src_y as usize * sprite.width as usize + src_x as usize) * 4;
                let texel = [
                    sprite.rgba[offset],
                    sprite.rgba[offset + 1],
                    sprite.rgba[offset + 2],
                    sprite.rgba[offset + 3],
                ];
                if texel[3] == 0 || is_masked(texel, alpha_mask) {
                    continue;
                }
                self.put_pixel(out_x, out_y, [texel[0], texel[1], texel[2], 255]);
            }
        }
    }
}

fn is_masked(texel: [u8; 4], mask: Colour) -> bool {
    texel[0] == mask.r && texel[1] == mask.g && texel[2] == mask.b
}
