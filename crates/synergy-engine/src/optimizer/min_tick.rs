//! Strategies built on single-tick fills.

use synergy_types::{OptimizationResult, RowId, Strategy, Termination};

use super::Optimizer;
use super::search::Search;

impl Optimizer<'_> {
    /// Units each row needs to fill in one tick, and the gain that yields.
    ///
    /// Every row is computed in isolation against the full pool, so the
    /// allocation is a per-row requirement list, not a joint allocation,
    /// and may sum to more than the pool. The energy rate is zero.
    pub fn see_min_tick(&self) -> OptimizationResult {
        let (allocation, gains): (Vec<u64>, Vec<f64>) = RowId::all()
            .map(|row| {
                let min_tick = self.page.min_tick(row, self.pool, &self.multipliers);
                (min_tick.units, min_tick.gain)
            })
            .unzip();

        OptimizationResult {
            strategy: Strategy::SeeMinTick,
            page: self.page.id(),
            allocation,
            gains,
            energy_rate: 0.0,
            termination: Termination::Converged,
            iterations: 0,
        }
    }

    /// Min-tick `row`, then spread what is left flat over the rows below it.
    pub fn min_tick_row_flat_below(&self, row: RowId) -> OptimizationResult {
        let min_tick = self.page.min_tick(row, self.pool, &self.multipliers);
        let remaining = self.pool.saturating_sub(min_tick.units);

        let below = match row.below() {
            Some(below) => self.flat_search(below, remaining),
            None => Search {
                allocation: Vec::new(),
                termination: Termination::Converged,
                iterations: 0,
            },
        };

        let mut allocation = below.allocation;
        allocation.push(min_tick.units);
        self.finish(
            Strategy::MinTickFlatBelow { row },
            Search {
                allocation,
                termination: below.termination,
                iterations: below.iterations,
            },
        )
    }
}
