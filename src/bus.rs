use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

use crate::events::Event;

/// Callback registered against an event name
///
/// Listeners are reference-counted so the same value the caller holds can be
/// used for removal later; identity is the allocation, compared with
/// `Rc::ptr_eq`.
pub type Listener = Rc<dyn Fn(&Event)>;

/// Transform applied around listener delivery for an event name
///
/// The closed set of special-cased names; `for_name` is the single source of
/// truth mapping a canonical name to its transform, consulted once per
/// dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Geometry state refresh before forwarding
    Resize,
    /// Logical-pixel scaling, pointer-lock deltas, cursor recenter
    MouseMove,
    /// Logical-pixel scaling only
    MouseButton,
    /// Async payload load before forwarding
    Drop,
    /// Forward unchanged
    Passthrough,
}

impl Stage {
    /// Select the stage for a canonical event name
    pub fn for_name(canonical: &str) -> Self {
        match canonical {
            "framebuffer_resize" => Stage::Resize,
            "mousemove" => Stage::MouseMove,
            "mousedown" | "mouseup" | "click" => Stage::MouseButton,
            "drop" => Stage::Drop,
            _ => Stage::Passthrough,
        }
    }
}

/// Listener registry keyed by canonical event name
///
/// Delivery is synchronous and in registration order on the thread that calls
/// `poll_events`. The registry stores the caller's original listener, so
/// removal works with the value the caller registered even for names whose
/// dispatch applies a transform stage.
#[derive(Default)]
pub struct EventBus {
    registry: HashMap<String, Vec<Listener>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map an aliased DOM name to the native event name
    pub fn canonical(name: &str) -> &str {
        match name {
            "resize" => "framebuffer_resize",
            other => other,
        }
    }

    /// Register `listener` under `name`, in insertion order
    pub fn add(&mut self, name: &str, listener: Listener) {
        let canonical = Self::canonical(name);
        self.registry
            .entry(canonical.to_owned())
            .or_default()
            .push(listener);
    }

    /// Remove a previously registered listener by identity
    ///
    /// Matching goes through the stored original, so listeners registered
    /// under wrapped names ("resize", "mousemove", "drop") unregister with the
    /// same value the caller holds.
    pub fn remove(&mut self, name: &str, listener: &Listener) {
        let canonical = Self::canonical(name);
        if let Some(entries) = self.registry.get_mut(canonical) {
            entries.retain(|registered| !Rc::ptr_eq(registered, listener));
            if entries.is_empty() {
                self.registry.remove(canonical);
            }
        }
    }

    /// Number of listeners registered under `name`
    pub fn listener_count(&self, name: &str) -> usize {
        self.registry
            .get(Self::canonical(name))
            .map_or(0, Vec::len)
    }

    /// Clone the current listener list for `name`
    ///
    /// Dispatch iterates the snapshot, so a listener that mutates the registry
    /// does not disturb in-flight delivery.
    pub fn snapshot(&self, name: &str) -> Vec<Listener> {
        self.registry
            .get(Self::canonical(name))
            .map(|entries| entries.iter().map(Rc::clone).collect())
            .unwrap_or_default()
    }

    /// Invoke one listener, isolating a panic from the rest of the delivery
    pub fn deliver(name: &str, listener: &Listener, event: &Event) {
        let outcome = catch_unwind(AssertUnwindSafe(|| listener(event)));
        if outcome.is_err() {
            log::error!("listener for '{name}' panicked; continuing delivery");
        }
    }
}
