use crate::gloss::GlossName;
use std::collections::VecDeque;

/// Pending gloss requests, played in arrival order.
#[derive(Debug, Default)]
pub struct PlaybackQueue {
    items: VecDeque<GlossName>,
}

impl PlaybackQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, gloss: GlossName) {
        self.items.push_back(gloss);
    }

    pub fn dequeue(&mut self) -> Option<GlossName> {
        self.items.pop_front()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dequeues_in_insertion_order_without_dedup() {
        let mut queue = PlaybackQueue::new();
        for name in ["yes", "no", "yes"] {
            queue.enqueue(name.into());
        }
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.dequeue(), Some("yes".into()));
        assert_eq!(queue.dequeue(), Some("no".into()));
        assert_eq!(queue.dequeue(), Some("yes".into()));
        assert_eq!(queue.dequeue(), None);
        assert!(queue.is_empty());
    }
}
