use std::path::PathBuf;

/// Mouse button identifier, DOM-style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    Other(u16),
}

/// Resize payload carrying framebuffer pixel dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeData {
    pub width: u32,
    pub height: u32,
}

/// Mouse payload with browser-style coordinate fields
///
/// `x`/`y`, `client_*` and `page_*` are logical pixels once the event has
/// passed through the platform dispatch; `movement_*` is only populated while
/// pointer lock is engaged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseData {
    pub x: f64,
    pub y: f64,
    pub client_x: f64,
    pub client_y: f64,
    pub page_x: f64,
    pub page_y: f64,
    pub movement_x: f64,
    pub movement_y: f64,
    pub button: Option<MouseButton>,
}

impl MouseData {
    /// Build a payload where every coordinate field starts at the same point
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            client_x: x,
            client_y: y,
            page_x: x,
            page_y: y,
            movement_x: 0.0,
            movement_y: 0.0,
            button: None,
        }
    }

    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = Some(button);
        self
    }

    /// Divide all absolute coordinates by a pixel ratio
    ///
    /// Movement deltas are left untouched; they are derived from already
    /// scaled page coordinates.
    pub fn to_logical(mut self, ratio: f64) -> Self {
        self.x /= ratio;
        self.y /= ratio;
        self.client_x /= ratio;
        self.client_y /= ratio;
        self.page_x /= ratio;
        self.page_y /= ratio;
        self
    }
}

/// Keyboard payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyData {
    pub key: String,
    pub pressed: bool,
}

/// One dropped file, fully read into memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileBlob {
    pub path: PathBuf,
    pub data: Vec<u8>,
}

/// Event payload delivered to listeners
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Resize(ResizeData),
    Mouse(MouseData),
    Key(KeyData),
    /// Completed drop batch, in native drop order
    Drop(Vec<FileBlob>),
    PointerLockChange { locked: bool },
    Close,
    /// Payload-free event emitted under an arbitrary name
    None,
}
