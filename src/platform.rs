use std::path::PathBuf;
use std::rc::Rc;

use crate::backend::{RawEvent, WindowBackend};
use crate::bus::{EventBus, Listener, Stage};
use crate::drop_loader::DropLoader;
use crate::events::{Event, KeyData, MouseData, ResizeData};
use crate::geometry::Geometry;
use crate::gpu::{GpuContext, RenderTarget};
use crate::pointer_lock::PointerLock;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

const CANVAS_TAG: &str = "CANVAS";
const DEFAULT_WIDTH: u32 = 800;
const DEFAULT_HEIGHT: u32 = 800;

/// The canvas-element facade over a native window
///
/// Owns the single window handle, the event bus, geometry, pointer-lock state
/// and in-flight drop batches. Everything is explicit instance state; there is
/// no process-wide emitter. Single-threaded by construction: listeners are
/// `Rc` closures invoked synchronously from `poll_events` on the calling
/// thread, with drop payload reads as the only work that escapes the frame.
pub struct Platform<B: WindowBackend> {
    backend: B,
    bus: EventBus,
    geometry: Geometry,
    pointer_lock: PointerLock,
    drop_loader: DropLoader<Vec<Listener>>,
    bound_target: Option<RenderTarget>,
}

impl<B: WindowBackend> Platform<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            bus: EventBus::new(),
            geometry: Geometry::new(),
            pointer_lock: PointerLock::new(),
            drop_loader: DropLoader::new(),
            bound_target: None,
        }
    }

    pub fn tag_name(&self) -> &'static str {
        CANVAS_TAG
    }

    /// Create the element backing this facade
    ///
    /// A canvas-like tag (case-insensitive, contains "canvas") lazily creates
    /// the native window and returns `Ok(true)`; the facade is the canvas.
    /// Any other tag is unsupported and returns `Ok(false)`. Repeated canvas
    /// calls keep the existing window; no second native window is created.
    pub fn create_element(
        &mut self,
        tag: &str,
        width: Option<u32>,
        height: Option<u32>,
    ) -> Result<bool> {
        if !tag.to_ascii_lowercase().contains("canvas") {
            return Ok(false);
        }
        if !self.backend.has_window() {
            self.backend.create_window(
                width.unwrap_or(DEFAULT_WIDTH),
                height.unwrap_or(DEFAULT_HEIGHT),
            )?;
            let framebuffer = self.backend.framebuffer_size();
            let window = self.backend.window_size();
            self.geometry.configure(framebuffer, window);
        }
        Ok(true)
    }

    /// Pass-through to the native layer; silent no-op before the window exists
    pub fn set_title(&mut self, title: &str) {
        if self.backend.has_window() {
            self.backend.set_title(title);
        }
    }

    /// Show or hide the cursor; silent no-op before the window exists
    pub fn set_cursor(&mut self, enabled: bool) {
        if self.backend.has_window() {
            self.backend.set_cursor_visible(enabled);
        }
    }

    /// Warp the cursor to a logical position; silent no-op before the window
    /// exists
    pub fn set_cursor_pos(&mut self, x: f64, y: f64) {
        if self.backend.has_window() {
            self.backend.set_cursor_pos(x, y);
        }
    }

    /// Present whatever was last drawn; call once per frame
    pub fn flip(&mut self) {
        self.backend.swap_buffers();
    }

    pub fn set_swap_interval(&mut self, interval: u32) {
        self.backend.swap_interval(interval);
    }

    /// Drain the native event queue and dispatch, then settle drop batches
    ///
    /// Non-blocking; must run once per frame before reading input state. A
    /// drop batch still reading stays pending across any number of calls.
    pub fn poll_events(&mut self) {
        for raw in self.backend.poll() {
            self.dispatch_raw(raw);
        }
        for (listeners, result) in self.drop_loader.poll() {
            match result {
                Ok(blobs) => {
                    let event = Event::Drop(blobs);
                    for listener in &listeners {
                        EventBus::deliver("drop", listener, &event);
                    }
                }
                Err(err) => log::error!("drop batch discarded: {err}"),
            }
        }
    }

    /// Engage pointer lock: hide the cursor, own the lock, report moves as
    /// center-relative deltas
    ///
    /// No-op while already engaged; emits `pointerlockchange` once per actual
    /// transition.
    pub fn request_pointer_lock(&mut self) {
        if self.pointer_lock.engage() {
            self.backend.set_cursor_visible(false);
            self.dispatch("pointerlockchange", Event::PointerLockChange { locked: true });
        }
    }

    /// Release pointer lock and restore the cursor
    ///
    /// No-op while already released; emits `pointerlockchange` once per actual
    /// transition.
    pub fn exit_pointer_lock(&mut self) {
        if self.pointer_lock.release() {
            self.backend.set_cursor_visible(true);
            self.dispatch("pointerlockchange", Event::PointerLockChange { locked: false });
        }
    }

    /// Whether this facade currently owns the pointer lock
    pub fn pointer_lock_element(&self) -> bool {
        self.pointer_lock.is_locked()
    }

    /// Register a listener; `on` is the `add_event_listener` alias
    ///
    /// Returns the listener value to keep for later removal.
    pub fn on<F>(&mut self, name: &str, callback: F) -> Listener
    where
        F: Fn(&Event) + 'static,
    {
        let listener: Listener = Rc::new(callback);
        self.add_event_listener(name, Rc::clone(&listener));
        listener
    }

    pub fn add_event_listener(&mut self, name: &str, listener: Listener) {
        self.bus.add(name, listener);
    }

    /// Unregister by the same listener value used at registration, including
    /// for names that install a transform stage
    pub fn remove_event_listener(&mut self, name: &str, listener: &Listener) {
        self.bus.remove(name, listener);
    }

    pub fn listener_count(&self, name: &str) -> usize {
        self.bus.listener_count(name)
    }

    /// Synchronously deliver an event through the same dispatch path native
    /// events take
    pub fn emit(&mut self, name: &str, event: Event) {
        self.dispatch(name, event);
    }

    // Live geometry fields

    pub fn width(&self) -> u32 {
        self.geometry.width
    }

    pub fn height(&self) -> u32 {
        self.geometry.height
    }

    pub fn style_width(&self) -> u32 {
        self.geometry.style_width
    }

    pub fn style_height(&self) -> u32 {
        self.geometry.style_height
    }

    pub fn device_pixel_ratio(&self) -> f64 {
        self.geometry.device_pixel_ratio()
    }

    // GPU pass-throughs; the context is opaque to the shim

    pub fn get_context(&mut self) -> Result<&mut GpuContext> {
        self.backend.graphics_context()
    }

    pub fn get_render_target(
        &mut self,
        width: u32,
        height: u32,
        samples: u32,
    ) -> Result<RenderTarget> {
        Ok(self
            .backend
            .graphics_context()?
            .create_render_target(width, height, samples))
    }

    /// Bind an offscreen target as the current draw destination, or `None`
    /// for the default framebuffer
    pub fn bind_frame_buffer(&mut self, target: Option<RenderTarget>) {
        self.bound_target = target;
    }

    pub fn bound_frame_buffer(&self) -> Option<&RenderTarget> {
        self.bound_target.as_ref()
    }

    pub fn blit_frame_buffer(&mut self, src: &RenderTarget, dst: &RenderTarget) -> Result<()> {
        self.backend.graphics_context()?.blit(src, dst);
        Ok(())
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    fn dispatch_raw(&mut self, raw: RawEvent) {
        match raw {
            RawEvent::FramebufferResize { width, height } => {
                self.dispatch("framebuffer_resize", Event::Resize(ResizeData { width, height }));
            }
            RawEvent::MouseMove { x, y } => {
                self.dispatch("mousemove", Event::Mouse(MouseData::at(x, y)));
            }
            RawEvent::MouseDown { button, x, y } => {
                self.dispatch(
                    "mousedown",
                    Event::Mouse(MouseData::at(x, y).with_button(button)),
                );
            }
            RawEvent::MouseUp { button, x, y } => {
                self.dispatch(
                    "mouseup",
                    Event::Mouse(MouseData::at(x, y).with_button(button)),
                );
            }
            RawEvent::Click { button, x, y } => {
                self.dispatch("click", Event::Mouse(MouseData::at(x, y).with_button(button)));
            }
            RawEvent::Key { key, pressed } => {
                let name = if pressed { "keydown" } else { "keyup" };
                self.dispatch(name, Event::Key(KeyData { key, pressed }));
            }
            RawEvent::DroppedPaths(paths) => self.begin_drop(paths),
            RawEvent::FocusLost => {
                // focus loss releases the lock, browser-style
                self.exit_pointer_lock();
            }
            RawEvent::CloseRequested => {
                self.exit_pointer_lock();
                self.dispatch("quit", Event::Close);
            }
        }
    }

    /// Apply the transform stage for the event name, deliver to the snapshot
    /// of registered listeners, then run post-delivery side effects
    fn dispatch(&mut self, name: &str, mut event: Event) {
        let canonical = EventBus::canonical(name).to_owned();
        let stage = Stage::for_name(&canonical);

        match (stage, &mut event) {
            (Stage::Resize, Event::Resize(resize)) => {
                self.geometry.apply_resize(resize.width, resize.height);
                // ratio inputs come from the backend as a consistent pair;
                // the payload alone says nothing about the window size
                let (framebuffer_width, _) = self.backend.framebuffer_size();
                let (window_width, _) = self.backend.window_size();
                self.geometry.refresh_ratio(framebuffer_width, window_width);
            }
            (Stage::MouseMove, Event::Mouse(mouse)) => {
                *mouse = mouse.to_logical(self.geometry.device_pixel_ratio());
                if self.pointer_lock.is_locked() {
                    mouse.movement_x = mouse.page_x - self.geometry.logical_width() / 2.0;
                    mouse.movement_y = mouse.page_y - self.geometry.logical_height() / 2.0;
                }
            }
            (Stage::MouseButton, Event::Mouse(mouse)) => {
                *mouse = mouse.to_logical(self.geometry.device_pixel_ratio());
            }
            _ => {}
        }

        for listener in self.bus.snapshot(&canonical) {
            EventBus::deliver(&canonical, &listener, &event);
        }

        // recenter after the listeners saw the delta
        if stage == Stage::MouseMove && self.pointer_lock.is_locked() {
            let center_x = self.geometry.logical_width() / 2.0;
            let center_y = self.geometry.logical_height() / 2.0;
            self.backend.set_cursor_pos(center_x, center_y);
        }
    }

    /// Hand a drop gesture to the async loader
    ///
    /// The listener set is snapshotted now; delivery happens on a later poll
    /// once every file has been read. No listeners means nothing to load.
    fn begin_drop(&mut self, paths: Vec<PathBuf>) {
        let listeners = self.bus.snapshot("drop");
        if listeners.is_empty() {
            return;
        }
        self.drop_loader.begin(paths, listeners);
    }
}
