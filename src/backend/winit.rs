use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalPosition, LogicalSize};
use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::EventLoopExtPumpEvents;
use winit::window::{Window, WindowId};

use super::{RawEvent, WindowBackend};
use crate::events::MouseButton;
use crate::gpu::GpuContext;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// winit-backed window command interface
///
/// The event loop runs in pump mode: every `poll` drains whatever the OS has
/// queued and returns immediately, which matches the explicit per-frame
/// polling model the facade exposes.
pub struct WinitBackend {
    event_loop: EventLoop<()>,
    app: CanvasApp,
    context: Option<GpuContext>,
    swap_interval: u32,
}

impl WinitBackend {
    pub fn new() -> Result<Self> {
        let event_loop = EventLoop::new()?;
        Ok(Self {
            event_loop,
            app: CanvasApp::new(),
            context: None,
            swap_interval: 0,
        })
    }

    fn pump(&mut self) {
        let _ = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.app);
    }
}

impl WindowBackend for WinitBackend {
    fn create_window(&mut self, width: u32, height: u32) -> Result<()> {
        if self.app.window.is_some() {
            return Err("window already created".into());
        }
        self.app.pending_create = Some((width, height));
        self.pump();
        if self.app.window.is_some() {
            Ok(())
        } else {
            Err("native window creation failed".into())
        }
    }

    fn has_window(&self) -> bool {
        self.app.window.is_some()
    }

    fn set_title(&mut self, title: &str) {
        if let Some(window) = &self.app.window {
            window.set_title(title);
        }
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        if let Some(window) = &self.app.window {
            window.set_cursor_visible(visible);
        }
    }

    fn set_cursor_pos(&mut self, x: f64, y: f64) {
        if let Some(window) = &self.app.window {
            if let Err(err) = window.set_cursor_position(LogicalPosition::new(x, y)) {
                log::warn!("cursor warp failed: {err}");
            }
        }
    }

    fn swap_buffers(&mut self) {
        // wgpu presents on queue submit; this schedules the next frame
        if let Some(window) = &self.app.window {
            window.request_redraw();
        }
    }

    fn swap_interval(&mut self, interval: u32) {
        self.swap_interval = interval;
        if let Some(context) = self.context.as_mut() {
            context.set_vsync(interval > 0);
        }
    }

    fn poll(&mut self) -> Vec<RawEvent> {
        self.pump();
        let mut events = std::mem::take(&mut self.app.events);
        // winit delivers drops one file at a time; files seen during a single
        // pump form one gesture batch
        if !self.app.dropped.is_empty() {
            events.push(RawEvent::DroppedPaths(std::mem::take(&mut self.app.dropped)));
        }
        if let Some(context) = self.context.as_mut() {
            for event in &events {
                if let RawEvent::FramebufferResize { width, height } = event {
                    context.resize(*width, *height);
                }
            }
        }
        events
    }

    fn framebuffer_size(&self) -> (u32, u32) {
        self.app
            .window
            .as_ref()
            .map(|window| {
                let size = window.inner_size();
                (size.width, size.height)
            })
            .unwrap_or((0, 0))
    }

    fn window_size(&self) -> (u32, u32) {
        self.app
            .window
            .as_ref()
            .map(|window| {
                let size = window.inner_size().to_logical::<f64>(window.scale_factor());
                (size.width.round() as u32, size.height.round() as u32)
            })
            .unwrap_or((0, 0))
    }

    fn graphics_context(&mut self) -> Result<&mut GpuContext> {
        if self.context.is_none() {
            let window = self.app.window.clone().ok_or("window not created")?;
            let context = pollster::block_on(GpuContext::new(window, self.swap_interval > 0))?;
            self.context = Some(context);
        }
        match self.context.as_mut() {
            Some(context) => Ok(context),
            None => Err("graphics context unavailable".into()),
        }
    }
}

/// winit application handler collecting raw events between pumps
struct CanvasApp {
    window: Option<Arc<Window>>,
    pending_create: Option<(u32, u32)>,
    events: Vec<RawEvent>,
    dropped: Vec<PathBuf>,
    cursor: (f64, f64),
}

impl CanvasApp {
    fn new() -> Self {
        Self {
            window: None,
            pending_create: None,
            events: Vec::new(),
            dropped: Vec::new(),
            cursor: (0.0, 0.0),
        }
    }
}

impl ApplicationHandler for CanvasApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let Some((width, height)) = self.pending_create.take() else {
            return;
        };
        let attrs = Window::default_attributes()
            .with_title("native-canvas")
            .with_inner_size(LogicalSize::new(width, height));
        match event_loop.create_window(attrs) {
            Ok(window) => self.window = Some(Arc::new(window)),
            Err(err) => log::error!("window creation failed: {err}"),
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::Resized(size) => self.events.push(RawEvent::FramebufferResize {
                width: size.width,
                height: size.height,
            }),
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x, position.y);
                self.events.push(RawEvent::MouseMove {
                    x: position.x,
                    y: position.y,
                });
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = map_button(button);
                let (x, y) = self.cursor;
                match state {
                    ElementState::Pressed => {
                        self.events.push(RawEvent::MouseDown { button, x, y })
                    }
                    ElementState::Released => {
                        self.events.push(RawEvent::MouseUp { button, x, y });
                        // click fires on release, DOM-style
                        self.events.push(RawEvent::Click { button, x, y });
                    }
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                // DOM-style key values: character keys verbatim, named keys
                // by name ("Escape", "Enter", ...)
                let key = match &event.logical_key {
                    winit::keyboard::Key::Character(text) => text.to_string(),
                    winit::keyboard::Key::Named(named) => format!("{named:?}"),
                    other => format!("{other:?}"),
                };
                self.events.push(RawEvent::Key {
                    key,
                    pressed: event.state.is_pressed(),
                });
            }
            WindowEvent::DroppedFile(path) => self.dropped.push(path),
            WindowEvent::Focused(false) => self.events.push(RawEvent::FocusLost),
            WindowEvent::CloseRequested => self.events.push(RawEvent::CloseRequested),
            _ => {}
        }
    }
}

fn map_button(button: WinitMouseButton) -> MouseButton {
    match button {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Back => MouseButton::Other(3),
        WinitMouseButton::Forward => MouseButton::Other(4),
        WinitMouseButton::Other(code) => MouseButton::Other(code),
    }
}
