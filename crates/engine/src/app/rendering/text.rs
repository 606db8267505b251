use crate::app::overlay::Message;

use super::canvas::FrameCanvas;

const GLYPH_COLUMNS: i32 = 3;
const GLYPH_ROWS: i32 = 5;
/// Glyph rows plus two rows of leading, in font units.
const LINE_UNITS: u32 = 7;

// Each glyph is five 3-bit rows packed top to bottom, one octal digit per row.
const SPACE: u16 = 0;
const UNKNOWN: u16 = 0o61202;

fn glyph_mask(ch: char) -> u16 {
    match ch.to_ascii_uppercase() {
        ' ' => SPACE,
        'A' => 0o25755,
        'B' => 0o65656,
        'C' => 0o34443,
        'D' => 0o65556,
        'E' => 0o74647,
        'F' => 0o74644,
        'G' => 0o34553,
        'H' => 0o55755,
        'I' => 0o72227,
        'J' => 0o11152,
        'K' => 0o55655,
        'L' => 0o44447,
        'M' => 0o57755,
        'N' => 0o65555,
        'O' => 0o25552,
        'P' => 0o65644,
        'Q' => 0o25563,
        'R' => 0o65655,
        'S' => 0o34216,
        'T' => 0o72222,
        'U' => 0o55557,
        'V' => 0o55552,
        'W' => 0o55775,
        'X' => 0o55255,
        'Y' => 0o55222,
        'Z' => 0o71247,
        '0' => 0o75557,
        '1' => 0o26227,
        '2' => 0o61247,
        '3' => 0o61216,
        '4' => 0o55711,
        '5' => 0o74616,
        '6' => 0o34757,
        '7' => 0o71222,
        '8' => 0o75757,
        '9' => 0o75716,
        '-' => 0o00700,
        '.' => 0o00002,
        ':' => 0o02020,
        '!' => 0o22202,
        '/' => 0o11244,
        '\'' => 0o22000,
        _ => UNKNOWN,
    }
}

fn glyph_bit(mask: u16, row: i32, column: i32) -> bool {
    let shift = (GLYPH_ROWS - 1 - row) * GLYPH_COLUMNS + (GLYPH_COLUMNS - 1 - column);
    (mask >> shift) & 1 == 1
}

/// Pixel size of one font unit for a requested font size.
pub(crate) fn text_scale(font_size: u32) -> i32 {
    (font_size / LINE_UNITS).max(1) as i32
}

pub(crate) fn draw_text(canvas: &mut FrameCanvas<'_>, message: &Message) {
    let scale = text_scale(message.font_size);
    let colour = [message.colour.r, message.colour.g, message.colour.b, 255];
    let advance = (GLYPH_COLUMNS + 1) * scale;
    let mut x = message.x;
    for ch in message.text.chars() {
        let mask = glyph_mask(ch);
        for row in 0..GLYPH_ROWS {
            for column in 0..GLYPH_COLUMNS {
                if glyph_bit(mask, row, column) {
                    canvas.fill_rect(
                        x + column * scale,
                        message.y + row * scale,
                        scale,
                        scale,
                        colour,
                    );
                }
            }
        }
        x += advance;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::overlay::Colour;

    #[test]
    fn letters_and_digits_have_glyphs() {
        for ch in ('A'..='Z').chain('0'..='9') {
            let mask = glyph_mask(ch);
            assert_ne!(mask, SPACE, "ch={ch}");
            assert_ne!(mask, UNKNOWN, "ch={ch}");
        }
        assert_eq!(glyph_mask('s'), glyph_mask('S'));
        assert_eq!(glyph_mask('#'), UNKNOWN);
    }

    #[test]
    fn glyph_bits_read_top_left_first() {
        let t = glyph_mask('T');
        assert!(glyph_bit(t, 0, 0));
        assert!(glyph_bit(t, 0, 2));
        assert!(!glyph_bit(t, 4, 0));
        assert!(glyph_bit(t, 4, 1));
    }

    #[test]
    fn scale_grows_with_font_size() {
        assert_eq!(text_scale(1), 1);
        assert_eq!(text_scale(20), 2);
        assert_eq!(text_scale(50), 7);
    }

    #[test]
    fn draw_text_paints_scaled_pixels() {
        let mut frame = vec![0u8; 16 * 16 * 4];
        let mut canvas = FrameCanvas::new(&mut frame, 16, 16);
        let message = Message {
            text: "I".to_string(),
            x: 1,
            y: 1,
            font_size: 14,
            colour: Colour::rgb(10, 20, 30),
        };
        draw_text(&mut canvas, &message);
        // Top bar of 'I' covers (1..7, 1..3) at scale 2.
        let offset = ((2 * 16 + 6) * 4) as usize;
        assert_eq!(&frame[offset..offset + 4], &[10, 20, 30, 255]);
        let gap = ((4 * 16 + 1) * 4) as usize;
        assert_eq!(&frame[gap..gap + 4], &[0, 0, 0, 0]);
    }
}
