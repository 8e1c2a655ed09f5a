use crate::paging::Evict;

/// First in, first out: the page loaded earliest leaves first.
#[derive(Debug, Default)]
pub struct Fifo {
    loaded_at: Vec<usize>,
}

impl Evict for Fifo {
    fn load(&mut self, slot: usize, _page: usize, position: usize) {
        if slot == self.loaded_at.len() {
            self.loaded_at.push(position);
        } else {
            self.loaded_at[slot] = position;
        }
    }

    fn victim(&self, _frames: &[usize], _references: &[usize], _position: usize) -> usize {
        oldest(&self.loaded_at)
    }
}

/// The slot holding the smallest timestamp, the first one on ties.
pub(crate) fn oldest(stamps: &[usize]) -> usize {
    stamps
        .iter()
        .enumerate()
        .min_by_key(|&(_, stamp)| stamp)
        .map_or(0, |(slot, _)| slot)
}
