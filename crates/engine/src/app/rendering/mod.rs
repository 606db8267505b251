mod canvas;
mod renderer;
mod text;

use std::fmt::Debug;

use super::geometry::IntRect;
use super::overlay::{Colour, Message};
use super::textures::TextureHandle;
use super::world::ArcadeWorld;

pub use renderer::Renderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteDraw {
    pub texture: TextureHandle,
    /// Region of the texture to copy; `width`/`height` also size the output.
    pub source: IntRect,
    pub dest_left: i32,
    pub dest_top: i32,
}

/// Receives one frame's draw calls in back-to-front order.
pub trait RenderSink {
    fn begin_frame(&mut self, alpha_mask: Colour);
    fn draw_sprite(&mut self, sprite: &SpriteDraw);
    fn draw_text(&mut self, message: &Message);
}

/// Emits the background (two copies), every entity with an appearance in
/// registry order, then the overlay messages.
pub fn render_world<K: Copy + PartialEq, A: Copy + Eq + Debug>(
    world: &ArcadeWorld<K, A>,
    sink: &mut impl RenderSink,
) {
    sink.begin_frame(world.alpha_mask());

    let viewport = world.viewport();
    if let Some(texture) = world.background().texture() {
        let width = viewport.width as i32;
        let left = -(world.background().scroll_x().floor() as i32);
        let source = IntRect::new(0, 0, width, viewport.height as i32);
        for dest_left in [left, left + width] {
            sink.draw_sprite(&SpriteDraw {
                texture,
                source,
                dest_left,
                dest_top: 0,
            });
        }
    }

    for entity in world.entities().iter() {
        let Some(texture) = entity.appearance else {
            continue;
        };
        let bounds = entity.bounds();
        sink.draw_sprite(&SpriteDraw {
            texture,
            source: entity.source_rect(),
            dest_left: bounds.min.x.round() as i32,
            dest_top: bounds.min.y.round() as i32,
        });
    }

    for message in world.overlay().messages() {
        sink.draw_text(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::entity::EntityDesc;
    use crate::app::geometry::{Size, Viewport};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Kind {
        Boss,
        Pip,
    }

    #[derive(Debug, Default)]
    struct RecordingSink {
        frames: u32,
        sprites: Vec<SpriteDraw>,
        texts: Vec<String>,
    }

    impl RenderSink for RecordingSink {
        fn begin_frame(&mut self, _alpha_mask: Colour) {
            self.frames += 1;
        }

        fn draw_sprite(&mut self, sprite: &SpriteDraw) {
            self.sprites.push(*sprite);
        }

        fn draw_text(&mut self, message: &Message) {
            self.texts.push(message.text.clone());
        }
    }

    #[test]
    fn draws_background_entities_then_text() {
        let mut world: ArcadeWorld<Kind, u8> = ArcadeWorld::new(Viewport::new(800, 600));
        let bg = world.load_texture("bg.png", "background").expect("bg");
        let boss = world.load_texture("boss.png", "boss").expect("boss");
        world.set_background(Some(bg), 0.0);
        world.spawn(
            EntityDesc::new(Kind::Boss, Size::new(75, 600))
                .at(770.0, 300.0)
                .with_appearance(Some(boss))
                .with_frames(5, 2),
        );
        world.spawn(EntityDesc::new(Kind::Pip, Size::new(79, 30)).at(38.0, 35.0));
        world.overlay_mut().create_message("SCORE", 600, 10);

        let mut sink = RecordingSink::default();
        render_world(&world, &mut sink);

        assert_eq!(sink.frames, 1);
        assert_eq!(sink.sprites.len(), 3);
        assert_eq!(sink.sprites[0].dest_left, 0);
        assert_eq!(sink.sprites[1].dest_left, 800);
        let boss_draw = sink.sprites[2];
        assert_eq!(boss_draw.texture, boss);
        assert_eq!(boss_draw.source, IntRect::new(150, 0, 75, 600));
        assert_eq!(boss_draw.dest_left, 733);
        assert_eq!(boss_draw.dest_top, 0);
        assert_eq!(sink.texts, vec!["SCORE".to_string()]);
    }
}
