//! Id allocation and receipt clock
//!
//! Ids come from a per-conversation counter rather than wall-clock time, so
//! messages created within the same instant never collide.

use chrono::{DateTime, Utc};

use super::message::MessageId;

/// Hands out strictly increasing [`MessageId`]s, starting at 1
///
/// # Examples
///
/// ```
/// use roundtable::conversation::{IdAllocator, MessageId};
///
/// let mut ids = IdAllocator::new();
/// assert_eq!(ids.allocate(), MessageId(1));
/// assert_eq!(ids.allocate(), MessageId(2));
/// assert_eq!(ids.last(), Some(MessageId(2)));
/// ```
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    /// Allocator that has issued nothing yet
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Issue the next id
    pub fn allocate(&mut self) -> MessageId {
        let id = MessageId(self.next);
        self.next += 1;
        id
    }

    /// Most recently issued id
    pub fn last(&self) -> Option<MessageId> {
        (self.next > 1).then(|| MessageId(self.next - 1))
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Source of receipt timestamps
pub trait Clock: Send + Sync {
    /// Current time
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_allocator_has_no_last() {
        let ids = IdAllocator::new();
        assert_eq!(ids.last(), None);
    }

    #[test]
    fn test_ids_strictly_increase() {
        let mut ids = IdAllocator::default();
        let issued: Vec<MessageId> = (0..100).map(|_| ids.allocate()).collect();
        assert!(issued.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(ids.last(), Some(MessageId(100)));
    }

    #[test]
    fn test_system_clock_moves_forward() {
        let clock = SystemClock;
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }
}
