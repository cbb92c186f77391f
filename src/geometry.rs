/// Canvas geometry: framebuffer size, reported style size, and the pixel
/// ratio used to convert framebuffer coordinates to logical coordinates
///
/// `width`/`height` track framebuffer pixels. `style_width`/`style_height`
/// are the DOM-visible style fields and mirror the framebuffer values after
/// every resize. Logical coordinates are framebuffer coordinates divided by
/// `device_pixel_ratio`, applied uniformly to mouse and resize handling.
#[derive(Debug, Clone, Copy)]
pub struct Geometry {
    pub width: u32,
    pub height: u32,
    pub style_width: u32,
    pub style_height: u32,
    device_pixel_ratio: f64,
}

impl Geometry {
    pub fn new() -> Self {
        Self {
            width: 0,
            height: 0,
            style_width: 0,
            style_height: 0,
            device_pixel_ratio: 1.0,
        }
    }

    /// Initialize from the freshly created window
    pub fn configure(&mut self, framebuffer: (u32, u32), window: (u32, u32)) {
        self.apply_resize(framebuffer.0, framebuffer.1);
        self.refresh_ratio(framebuffer.0, window.0);
    }

    /// Atomically adopt the latest framebuffer size
    pub fn apply_resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.style_width = width;
        self.style_height = height;
    }

    /// Recompute the pixel ratio from framebuffer width over window width
    ///
    /// A zero window width leaves the previous ratio in place.
    pub fn refresh_ratio(&mut self, framebuffer_width: u32, window_width: u32) {
        if window_width > 0 {
            self.device_pixel_ratio = framebuffer_width as f64 / window_width as f64;
        }
    }

    pub fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    pub fn logical_width(&self) -> f64 {
        self.width as f64 / self.device_pixel_ratio
    }

    pub fn logical_height(&self) -> f64 {
        self.height as f64 / self.device_pixel_ratio
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_starts_with_unit_ratio() {
        let geometry = Geometry::new();
        assert_eq!(geometry.width, 0);
        assert_eq!(geometry.device_pixel_ratio(), 1.0);
    }

    #[test]
    fn test_apply_resize_keeps_style_in_sync() {
        let mut geometry = Geometry::new();
        geometry.apply_resize(1024, 768);
        assert_eq!(geometry.width, 1024);
        assert_eq!(geometry.height, 768);
        assert_eq!(geometry.style_width, 1024);
        assert_eq!(geometry.style_height, 768);
    }

    #[test]
    fn test_configure_derives_ratio() {
        let mut geometry = Geometry::new();
        geometry.configure((1600, 1200), (800, 600));
        assert_eq!(geometry.device_pixel_ratio(), 2.0);
        assert_eq!(geometry.logical_width(), 800.0);
        assert_eq!(geometry.logical_height(), 600.0);
    }

    #[test]
    fn test_refresh_ratio_ignores_zero_window_width() {
        let mut geometry = Geometry::new();
        geometry.configure((1600, 1200), (800, 600));
        geometry.refresh_ratio(1600, 0);
        assert_eq!(geometry.device_pixel_ratio(), 2.0);
    }

    #[test]
    fn test_sequence_of_resizes_tracks_latest() {
        let mut geometry = Geometry::new();
        for (w, h) in [(100, 50), (640, 480), (1920, 1080)] {
            geometry.apply_resize(w, h);
            assert_eq!(geometry.width, w);
            assert_eq!(geometry.height, h);
            assert_eq!(geometry.style_width, w);
            assert_eq!(geometry.style_height, h);
        }
    }
}
