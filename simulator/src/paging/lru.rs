use std::collections::HashMap;

use crate::paging::fifo::oldest;
use crate::paging::Evict;

/// Least recently used: the page whose last reference is oldest leaves.
#[derive(Debug, Default)]
pub struct Lru {
    last_used: HashMap<usize, usize>,
}

impl Evict for Lru {
    fn touch(&mut self, page: usize, position: usize) {
        self.last_used.insert(page, position);
    }

    fn victim(&self, frames: &[usize], _references: &[usize], _position: usize) -> usize {
        let stamps: Vec<usize> = frames
            .iter()
            .map(|page| self.last_used.get(page).copied().unwrap_or(0))
            .collect();
        oldest(&stamps)
    }
}
