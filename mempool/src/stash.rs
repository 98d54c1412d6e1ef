use std::collections::VecDeque;

use parking_lot::Mutex;

/// A bounded FIFO: pushing past `capacity` silently evicts the oldest
/// entry, mirroring the source protocol's fixed-size in-memory stashes for
/// received blocks and locally-produced blocks/state transitions awaiting
/// further processing.
pub struct Stash<T> {
    capacity: usize,
    items: Mutex<VecDeque<T>>,
}

impl<T> Stash<T> {
    pub fn new(capacity: usize) -> Self {
        Stash {
            capacity,
            items: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub fn push(&self, item: T) {
        let mut items = self.items.lock();
        if items.len() >= self.capacity {
            items.pop_front();
        }
        items.push_back(item);
    }

    pub fn pop(&self) -> Option<T> {
        self.items.lock().pop_front()
    }

    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Received blocks awaiting validation against the local chain.
pub const RECEIVED_BLOCK_STASH_CAPACITY: usize = 50;

/// Locally-produced blocks and state transitions awaiting broadcast.
pub const OWN_BLOCK_STASH_CAPACITY: usize = 20;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_past_capacity_evicts_oldest() {
        let stash = Stash::new(2);
        stash.push(1);
        stash.push(2);
        stash.push(3);
        assert_eq!(stash.len(), 2);
        assert_eq!(stash.pop(), Some(2));
        assert_eq!(stash.pop(), Some(3));
    }

    #[test]
    fn pop_on_empty_stash_is_none() {
        let stash: Stash<u8> = Stash::new(5);
        assert_eq!(stash.pop(), None);
    }
}
