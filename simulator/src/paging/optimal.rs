use crate::paging::Evict;

/// Belady's optimal rule: the page needed farthest in the future leaves.
///
/// A page that is never referenced again counts as infinitely far away.
#[derive(Debug, Default)]
pub struct Optimal;

impl Evict for Optimal {
    fn victim(&self, frames: &[usize], references: &[usize], position: usize) -> usize {
        let upcoming = &references[position + 1..];
        let mut victim = 0;
        let mut farthest = 0;

        for (slot, page) in frames.iter().enumerate() {
            let next_use = upcoming
                .iter()
                .position(|reference| reference == page)
                .unwrap_or(usize::MAX);

            if slot == 0 || next_use > farthest {
                victim = slot;
                farthest = next_use;
            }
        }

        victim
    }
}
