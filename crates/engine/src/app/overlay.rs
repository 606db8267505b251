use tracing::warn;

pub const MAX_MESSAGES: usize = 32;
pub const MAX_MESSAGE_LENGTH: usize = 32;
pub const DEFAULT_FONT_SIZE: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    pub const BLACK: Colour = Colour::rgb(0, 0, 0);
    pub const WHITE: Colour = Colour::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub font_size: u32,
    pub colour: Colour,
}

/// Screen-space text shown for a single frame. Font size and colour are
/// sticky and apply to messages created after they are set.
#[derive(Debug)]
pub struct MessageOverlay {
    messages: Vec<Message>,
    font_size: u32,
    colour: Colour,
    overflow_warned: bool,
}

impl Default for MessageOverlay {
    fn default() -> Self {
        Self {
            messages: Vec::with_capacity(MAX_MESSAGES),
            font_size: DEFAULT_FONT_SIZE,
            colour: Colour::WHITE,
            overflow_warned: false,
        }
    }
}

impl MessageOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when the overlay is full and the message was dropped.
    pub fn create_message(&mut self, text: &str, x: i32, y: i32) -> bool {
        if self.messages.len() >= MAX_MESSAGES {
            if !self.overflow_warned {
                self.overflow_warned = true;
                warn!(capacity = MAX_MESSAGES, "message_overlay_full");
            }
            return false;
        }
        self.messages.push(Message {
            text: text.chars().take(MAX_MESSAGE_LENGTH).collect(),
            x,
            y,
            font_size: self.font_size,
            colour: self.colour,
        });
        true
    }

    pub fn create_number_message(&mut self, value: i64, x: i32, y: i32) -> bool {
        self.create_message(&value.to_string(), x, y)
    }

    pub fn set_font_size(&mut self, size: u32) {
        self.font_size = size.max(1);
    }

    pub fn set_font_colour(&mut self, r: u8, g: u8, b: u8) {
        self.colour = Colour::rgb(r, g, b);
    }

    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    pub fn clear(&mut self) {
        self.messages.clear();
        self.overflow_warned = false;
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
