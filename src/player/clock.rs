use std::collections::BTreeSet;

/// Handle for one requested animation tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TickId(pub u64);

/// Host-side per-frame callback scheduling (the display refresh tick).
///
/// Requesting returns a handle; the host later delivers that handle back together with the
/// frame timestamp. Cancelling must guarantee the handle is never delivered, or that a late
/// delivery is ignored by the receiver.
pub trait FrameClock {
    fn request_tick(&mut self) -> TickId;
    fn cancel_tick(&mut self, id: TickId);
}

/// Clock for headless hosts and tests: records requests and leaves delivery to the caller.
#[derive(Debug, Default)]
pub struct ManualClock {
    next_id: u64,
    scheduled: BTreeSet<TickId>,
    requested_total: u64,
    cancelled_total: u64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticks requested and not yet cancelled or taken, oldest first.
    pub fn scheduled(&self) -> Vec<TickId> {
        self.scheduled.iter().copied().collect()
    }

    pub fn is_scheduled(&self, id: TickId) -> bool {
        self.scheduled.contains(&id)
    }

    /// Remove and return every scheduled tick, as a host does when a frame fires.
    pub fn take_scheduled(&mut self) -> Vec<TickId> {
        std::mem::take(&mut self.scheduled).into_iter().collect()
    }

    pub fn requested_total(&self) -> u64 {
        self.requested_total
    }

    pub fn cancelled_total(&self) -> u64 {
        self.cancelled_total
    }
}

impl FrameClock for ManualClock {
    fn request_tick(&mut self) -> TickId {
        let id = TickId(self.next_id);
        self.next_id += 1;
        self.requested_total += 1;
        self.scheduled.insert(id);
        id
    }

    fn cancel_tick(&mut self, id: TickId) {
        if self.scheduled.remove(&id) {
            self.cancelled_total += 1;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/player/clock.rs"]
mod tests;
