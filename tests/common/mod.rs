// shared across test binaries; not every binary touches every helper
#![allow(dead_code)]

use std::collections::VecDeque;

use native_canvas::{RawEvent, WindowBackend};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Scripted window backend that records every command the platform issues
///
/// Each `queue` call holds one poll cycle's worth of native events. The mock
/// keeps its reported window size at framebuffer ÷ `pixel_ratio`, so resize
/// events move both sizes the way a real display would.
pub struct MockBackend {
    pub create_calls: u32,
    pub titles: Vec<String>,
    pub cursor_visible: Vec<bool>,
    pub cursor_warps: Vec<(f64, f64)>,
    pub swaps: u32,
    pub swap_intervals: Vec<u32>,
    pub pixel_ratio: f64,
    framebuffer: (u32, u32),
    window_exists: bool,
    queued: VecDeque<Vec<RawEvent>>,
}

impl MockBackend {
    pub fn new(framebuffer: (u32, u32)) -> Self {
        Self::with_ratio(framebuffer, 1.0)
    }

    pub fn with_ratio(framebuffer: (u32, u32), pixel_ratio: f64) -> Self {
        Self {
            create_calls: 0,
            titles: Vec::new(),
            cursor_visible: Vec::new(),
            cursor_warps: Vec::new(),
            swaps: 0,
            swap_intervals: Vec::new(),
            pixel_ratio,
            framebuffer,
            window_exists: false,
            queued: VecDeque::new(),
        }
    }

    /// Queue one poll cycle's worth of native events
    pub fn queue(&mut self, events: Vec<RawEvent>) {
        self.queued.push_back(events);
    }
}

impl WindowBackend for MockBackend {
    fn create_window(&mut self, _width: u32, _height: u32) -> Result<()> {
        self.create_calls += 1;
        self.window_exists = true;
        Ok(())
    }

    fn has_window(&self) -> bool {
        self.window_exists
    }

    fn set_title(&mut self, title: &str) {
        self.titles.push(title.to_owned());
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible.push(visible);
    }

    fn set_cursor_pos(&mut self, x: f64, y: f64) {
        self.cursor_warps.push((x, y));
    }

    fn swap_buffers(&mut self) {
        self.swaps += 1;
    }

    fn swap_interval(&mut self, interval: u32) {
        self.swap_intervals.push(interval);
    }

    fn poll(&mut self) -> Vec<RawEvent> {
        let events = self.queued.pop_front().unwrap_or_default();
        for event in &events {
            if let RawEvent::FramebufferResize { width, height } = event {
                self.framebuffer = (*width, *height);
            }
        }
        events
    }

    fn framebuffer_size(&self) -> (u32, u32) {
        self.framebuffer
    }

    fn window_size(&self) -> (u32, u32) {
        (
            (self.framebuffer.0 as f64 / self.pixel_ratio).round() as u32,
            (self.framebuffer.1 as f64 / self.pixel_ratio).round() as u32,
        )
    }
}
