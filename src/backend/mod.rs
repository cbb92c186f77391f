pub mod winit;

use std::path::PathBuf;

use crate::events::MouseButton;
use crate::gpu::GpuContext;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Un-normalized event from the native window layer
///
/// Mouse coordinates are framebuffer pixels; the platform converts them to
/// logical coordinates during dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum RawEvent {
    FramebufferResize { width: u32, height: u32 },
    MouseMove { x: f64, y: f64 },
    MouseDown { button: MouseButton, x: f64, y: f64 },
    MouseUp { button: MouseButton, x: f64, y: f64 },
    Click { button: MouseButton, x: f64, y: f64 },
    Key { key: String, pressed: bool },
    /// One drop gesture, paths in native drop order
    DroppedPaths(Vec<PathBuf>),
    FocusLost,
    CloseRequested,
}

/// Narrow command interface over the native windowing library
///
/// The platform facade is the only caller. One window per backend; creating
/// it twice is a backend error, which the facade guards against.
pub trait WindowBackend {
    fn create_window(&mut self, width: u32, height: u32) -> Result<()>;
    fn has_window(&self) -> bool;
    fn set_title(&mut self, title: &str);
    fn set_cursor_visible(&mut self, visible: bool);
    /// Warp the cursor, coordinates in logical pixels
    fn set_cursor_pos(&mut self, x: f64, y: f64);
    fn swap_buffers(&mut self);
    fn swap_interval(&mut self, interval: u32);
    /// Drain pending native events without blocking
    fn poll(&mut self) -> Vec<RawEvent>;
    fn framebuffer_size(&self) -> (u32, u32);
    fn window_size(&self) -> (u32, u32);
    /// Graphics context for the window, if this backend can provide one
    fn graphics_context(&mut self) -> Result<&mut GpuContext> {
        Err("graphics context not supported by this backend".into())
    }
}
