//! Maximize synergy energy across a page.
//!
//! Rows are ranked by energy per unit. The whole remaining pool goes to the
//! best row; if that overcaps it, the row keeps only what it needs and the
//! overcap carries to the next row in the ranking.

use synergy_types::{OptimizationResult, ROWS_PER_PAGE, Strategy, Termination};

use super::Optimizer;
use super::search::Search;

impl Optimizer<'_> {
    /// Greedy energy allocation over all seven rows.
    pub fn maximize_energy(&self) -> OptimizationResult {
        let order = self
            .page
            .energy_efficiency_order(self.multipliers.progress, self.config.energy_probe_units);
        let mut allocation = vec![0_u64; ROWS_PER_PAGE];
        let mut remaining = self.pool;
        let mut iterations = 0_u64;

        for row in order {
            if remaining == 0 {
                break;
            }
            iterations = iterations.saturating_add(1);
            let overcap = self
                .page
                .row(row)
                .energy_per_tick(remaining, self.multipliers.progress)
                .overcap;
            if let Some(slot) = allocation.get_mut(row.index()) {
                *slot = remaining.saturating_sub(overcap);
            }
            remaining = overcap;
        }

        self.finish(
            Strategy::MaximizeEnergy,
            Search {
                allocation,
                termination: Termination::Converged,
                iterations,
            },
        )
    }
}
