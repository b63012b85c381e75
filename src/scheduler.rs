//! Frame scheduling
//!
//! Drivers never own a timer. They ask a [`FrameScheduler`] for the next
//! display frame and cancel that request when they stop. The host (the
//! browser `requestAnimationFrame` loop, the headless runner, or a test)
//! drains due requests once per rendered frame and dispatches them.

use serde::{Deserialize, Serialize};

use crate::sim::EntityId;

/// Opaque handle identifying one pending frame request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameHandle(u64);

/// A due frame request: who asked, and with which handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTicket {
    pub handle: FrameHandle,
    pub owner: EntityId,
}

/// Host capability for per-frame callbacks
pub trait FrameScheduler {
    /// Request a callback on the next rendered frame
    fn request_next_tick(&mut self, owner: EntityId) -> FrameHandle;

    /// Cancel a pending request. Cancelled requests must never fire.
    fn cancel(&mut self, handle: FrameHandle);
}

/// Cooperative single-threaded frame queue
///
/// Requests made while the current frame is being dispatched land in the
/// queue after [`FrameQueue::take_due`] emptied it, so they fire on the
/// following frame.
#[derive(Debug, Default)]
pub struct FrameQueue {
    next_id: u64,
    pending: Vec<FrameTicket>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return every pending request, oldest first
    pub fn take_due(&mut self) -> Vec<FrameTicket> {
        std::mem::take(&mut self.pending)
    }

    /// Number of requests waiting for the next frame
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, handle: FrameHandle) -> bool {
        self.pending.iter().any(|t| t.handle == handle)
    }
}

impl FrameScheduler for FrameQueue {
    fn request_next_tick(&mut self, owner: EntityId) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending.push(FrameTicket { handle, owner });
        handle
    }

    fn cancel(&mut self, handle: FrameHandle) {
        self.pending.retain(|t| t.handle != handle);
    }
}
