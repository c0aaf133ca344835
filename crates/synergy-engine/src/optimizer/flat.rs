//! Spread units so rows `1..=row` gain roughly the same per tick.
//!
//! The search starts with every unit on `row`. Each step finds the row with
//! the smallest net gain and moves units into it from the row directly above
//! (its overcap if speed capped, otherwise one unit). The search is done once
//! `row` itself has the smallest gain. A step that cannot move anything or
//! lands on an allocation seen before is undone, and the previous allocation
//! is returned.

use synergy_types::{OptimizationResult, RowId, Strategy, Termination};

use super::Optimizer;
use super::search::{Search, SearchGuard, transfer};

impl Optimizer<'_> {
    /// Flat allocation of `units` over rows `1..=row`.
    pub fn flat_up_to_row(&self, row: RowId, units: u64) -> OptimizationResult {
        let search = self.flat_search(row, units);
        self.finish(Strategy::FlatUpToRow { row }, search)
    }

    /// Run the flattening search for `units` over rows `1..=row`.
    pub fn flat_search(&self, row: RowId, units: u64) -> Search {
        let top = row.index();
        let mut allocation = vec![0; usize::from(row.number())];
        if let Some(slot) = allocation.last_mut() {
            *slot = units;
        }
        let cap = self.config.flat_iteration_factor.saturating_mul(units);
        let mut guard = SearchGuard::new(cap, &allocation);
        if units == 0 {
            return guard.finish(allocation, Termination::Converged);
        }

        loop {
            let tick = self
                .page
                .all_gains_per_tick(&allocation, &self.multipliers);
            let Some(weakest) = tick.argmin().filter(|weakest| *weakest != top) else {
                return guard.finish(allocation, Termination::Converged);
            };

            if !guard.advance() {
                return guard.finish(allocation, Termination::IterationCap);
            }
            let Some(source) = weakest.checked_add(1) else {
                return guard.finish(allocation, Termination::Stagnated);
            };
            let previous = allocation.clone();
            if !transfer(&mut allocation, source, weakest, tick.step_size(source)) {
                return guard.finish(previous, Termination::Stagnated);
            }
            if !guard.visit(&allocation) {
                return guard.finish(previous, Termination::CycleDetected);
            }
        }
    }
}
