//! Deferred actions keyed by simulated time.
//!
//! The wave director schedules later group releases here instead of holding
//! timers. Actions fire in due-time order, ties broken by insertion order.
//! `clear` discards everything, which is how restart guarantees that nothing
//! from a previous session can fire.

/// Something to do once the clock reaches its due time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    /// Release group `group` (0-based) of wave `wave`.
    ReleaseGroup { wave: u32, group: u32 },
}

#[derive(Debug, Clone, Copy)]
struct Scheduled {
    due_ms: f64,
    seq: u64,
    action: DeferredAction,
}

/// Queue of pending deferred actions.
#[derive(Debug, Default)]
pub struct Scheduler {
    pending: Vec<Scheduled>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `action` to fire once simulated time reaches `due_ms`.
    pub fn schedule(&mut self, due_ms: f64, action: DeferredAction) {
        self.pending.push(Scheduled {
            due_ms,
            seq: self.next_seq,
            action,
        });
        self.next_seq += 1;
    }

    /// Remove and return every action due at or before `now_ms`.
    pub fn pop_due(&mut self, now_ms: f64) -> Vec<DeferredAction> {
        let mut due: Vec<Scheduled> = Vec::new();
        self.pending.retain(|s| {
            if s.due_ms <= now_ms {
                due.push(*s);
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|s| s.action).collect()
    }

    /// Due time of the earliest pending action.
    #[cfg(test)]
    pub fn next_due(&self) -> Option<f64> {
        self.pending.iter().map(|s| s.due_ms).min_by(|a, b| a.total_cmp(b))
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
