//! Shared machinery for the greedy search loops: the iteration and cycle
//! guard, and single unit transfers between rows.

use std::collections::BTreeSet;
use std::hash::{DefaultHasher, Hash, Hasher};

use synergy_types::Termination;

/// Where a search loop ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Search {
    /// Final units per row, row 1 first.
    pub allocation: Vec<u64>,
    /// Why the loop stopped.
    pub termination: Termination,
    /// Transfers attempted.
    pub iterations: u64,
}

/// Bounds a search loop by an iteration cap and by the allocations it has
/// already visited.
#[derive(Debug)]
pub struct SearchGuard {
    seen: BTreeSet<u64>,
    iterations: u64,
    cap: u64,
}

impl SearchGuard {
    /// Start a guard that has visited `initial` and allows `cap` steps.
    pub fn new(cap: u64, initial: &[u64]) -> Self {
        let mut seen = BTreeSet::new();
        seen.insert(fingerprint(initial));
        Self {
            seen,
            iterations: 0,
            cap,
        }
    }

    /// Count one more step. Returns `false` once the cap is used up.
    pub const fn advance(&mut self) -> bool {
        if self.iterations >= self.cap {
            return false;
        }
        self.iterations = self.iterations.saturating_add(1);
        true
    }

    /// Record `allocation`. Returns `false` if it was visited before.
    pub fn visit(&mut self, allocation: &[u64]) -> bool {
        self.seen.insert(fingerprint(allocation))
    }

    /// Steps taken so far.
    pub const fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Close the loop with `termination`.
    pub const fn finish(&self, allocation: Vec<u64>, termination: Termination) -> Search {
        Search {
            allocation,
            termination,
            iterations: self.iterations,
        }
    }
}

fn fingerprint(allocation: &[u64]) -> u64 {
    let mut hasher = DefaultHasher::new();
    allocation.hash(&mut hasher);
    hasher.finish()
}

/// Move up to `amount` units from position `source` to `target`.
///
/// Moves at most what `source` holds. Returns `false` and leaves the
/// allocation untouched if either position is out of range or `source` is
/// empty.
pub fn transfer(allocation: &mut [u64], source: usize, target: usize, amount: u64) -> bool {
    if source == target || target >= allocation.len() {
        return false;
    }
    let Some(available) = allocation.get_mut(source) else {
        return false;
    };
    let moved = amount.min(*available);
    if moved == 0 {
        return false;
    }
    *available = available.saturating_sub(moved);
    if let Some(slot) = allocation.get_mut(target) {
        *slot = slot.saturating_add(moved);
    }
    true
}
