use std::sync::Arc;

use crate::board::{Board, Fingerprint};

/// Every position seen along one line of play, bucketed by stone count.
///
/// Each bucket is a persistent singly-linked list. Recording a position copies
/// only the array of bucket heads and pushes one node onto one list, so
/// sibling branches share every list node of their common ancestry and never
/// observe each other's additions.
#[derive(Debug, Clone)]
pub(crate) struct PositionHistory {
    buckets: Arc<[Option<Arc<Entry>>]>,
}

#[derive(Debug)]
struct Entry {
    position: Fingerprint,
    next: Option<Arc<Entry>>,
}

impl Drop for Entry {
    // A bucket can hold one entry per move; release it without recursing.
    fn drop(&mut self) {
        let mut next = self.next.take();
        while let Some(entry) = next {
            next = match Arc::into_inner(entry) {
                Some(mut entry) => entry.next.take(),
                None => None,
            };
        }
    }
}

impl PositionHistory {
    pub(crate) fn new(dimension: u8) -> Self {
        let size = dimension as usize * dimension as usize;
        PositionHistory {
            buckets: vec![None; size + 1].into(),
        }
    }

    /// A new history with `board` appended. `self` is left untouched.
    pub(crate) fn record(&self, board: &Board) -> Self {
        let mut heads = self.buckets.to_vec();
        let bucket = board.count_non_empty_intersections();
        let next = heads[bucket].take();
        heads[bucket] = Some(Arc::new(Entry {
            position: *board.fingerprint(),
            next,
        }));
        PositionHistory {
            buckets: heads.into(),
        }
    }

    /// Whether the stone arrangement of `board` has been recorded before.
    pub(crate) fn contains(&self, board: &Board) -> bool {
        let bucket = board.count_non_empty_intersections();
        let mut node = self.buckets.get(bucket).and_then(|head| head.as_deref());
        while let Some(entry) = node {
            if entry.position == *board.fingerprint() {
                return true;
            }
            node = entry.next.as_deref();
        }
        false
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.buckets
            .iter()
            .map(|head| {
                let mut count = 0;
                let mut node = head.as_deref();
                while let Some(entry) = node {
                    count += 1;
                    node = entry.next.as_deref();
                }
                count
            })
            .sum()
    }
}
