/// Pointer-lock state machine
///
/// Two states, `Unlocked` and `Locked`; transitions happen only through the
/// guarded `engage`/`release` calls. Side effects (cursor visibility, cursor
/// warp, `pointerlockchange` emission) belong to the platform and run only
/// when a call reports an actual transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    Unlocked,
    Locked,
}

#[derive(Debug, Clone, Copy)]
pub struct PointerLock {
    state: LockState,
}

impl PointerLock {
    pub fn new() -> Self {
        Self {
            state: LockState::Unlocked,
        }
    }

    /// Transition to `Locked`; returns whether a transition happened
    pub fn engage(&mut self) -> bool {
        match self.state {
            LockState::Unlocked => {
                self.state = LockState::Locked;
                true
            }
            LockState::Locked => false,
        }
    }

    /// Transition to `Unlocked`; returns whether a transition happened
    pub fn release(&mut self) -> bool {
        match self.state {
            LockState::Locked => {
                self.state = LockState::Unlocked;
                true
            }
            LockState::Unlocked => false,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.state == LockState::Locked
    }
}

impl Default for PointerLock {
    fn default() -> Self {
        Self::new()
    }
}
