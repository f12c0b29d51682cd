/// Identifies one scheduled frame callback of one controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

impl FrameHandle {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Holds at most one pending frame request. Handles are never reused, so a cancelled or
/// superseded handle can never match again.
#[derive(Debug, Default)]
pub(crate) struct FrameSlot {
    next_id: u64,
    pending: Option<FrameHandle>,
}

impl FrameSlot {
    /// Return the pending handle, requesting a new one if none is pending.
    pub(crate) fn request(&mut self) -> FrameHandle {
        if let Some(h) = self.pending {
            return h;
        }
        let h = FrameHandle(self.next_id);
        self.next_id += 1;
        self.pending = Some(h);
        h
    }

    pub(crate) fn cancel(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }

    /// Consume `handle` if it is the pending one.
    pub(crate) fn take(&mut self, handle: FrameHandle) -> bool {
        if self.pending == Some(handle) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub(crate) fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }
}
