pub mod backend;
pub mod bus;
pub mod cli;
pub mod drop_loader;
pub mod events;
pub mod geometry;
pub mod gpu;
pub mod platform;
pub mod pointer_lock;

pub use backend::{RawEvent, WindowBackend};
pub use bus::{EventBus, Listener, Stage};
pub use events::{Event, FileBlob, KeyData, MouseButton, MouseData, ResizeData};
pub use geometry::Geometry;
pub use gpu::{GpuContext, RenderTarget};
pub use platform::Platform;
pub use pointer_lock::PointerLock;
