//! Maximize the net gain of one row by feeding it from the rows below.
//!
//! The search starts with the whole pool on the target row. While any row
//! runs a deficit, the row just above the weakest row hands it units: its
//! overcap if it is speed capped with units to spare, otherwise one unit.
//! Once no row runs a deficit, overcapped units above row 1 are pushed one
//! row down. Units only ever move towards row 1.

use synergy_types::{OptimizationResult, RowId, Strategy, Termination};

use super::Optimizer;
use super::search::{Search, SearchGuard, transfer};

impl Optimizer<'_> {
    /// Allocation over rows `1..=row` that maximizes `row`'s net gain.
    pub fn maximize_one_row(&self, row: RowId) -> OptimizationResult {
        let search = self.maximize_search(row);
        self.finish(Strategy::MaximizeRow { row }, search)
    }

    /// Run the maximization search for `row` from its standard start.
    pub fn maximize_search(&self, row: RowId) -> Search {
        let mut allocation = vec![0; usize::from(row.number())];
        if let Some(top) = allocation.last_mut() {
            *top = self.pool;
        }
        self.maximize_from(allocation)
    }

    /// Run the maximization loop from an arbitrary starting allocation.
    ///
    /// A converged allocation is a fixed point: feeding it back in returns
    /// it unchanged.
    pub fn maximize_from(&self, mut allocation: Vec<u64>) -> Search {
        let cap = self
            .config
            .maximize_iteration_factor
            .saturating_mul(self.pool);
        let mut guard = SearchGuard::new(cap, &allocation);

        loop {
            let tick = self
                .page
                .all_gains_per_tick(&allocation, &self.multipliers);

            let step = if tick.has_deficit() {
                tick.argmin()
                    .and_then(|weakest| weakest.checked_add(1).map(|source| (source, weakest)))
            } else {
                tick.first_overcap_above_bottom()
                    .and_then(|source| source.checked_sub(1).map(|target| (source, target)))
            };
            let Some((source, target)) = step else {
                return guard.finish(allocation, Termination::Converged);
            };

            if !guard.advance() {
                return guard.finish(allocation, Termination::IterationCap);
            }
            if !transfer(&mut allocation, source, target, tick.step_size(source)) {
                return guard.finish(allocation, Termination::Stagnated);
            }
            if !guard.visit(&allocation) {
                return guard.finish(allocation, Termination::CycleDetected);
            }
        }
    }

    /// The gain each row reaches when maximized on its own.
    ///
    /// Every entry assumes the whole pool serves that row alone, so the
    /// seven gains are not achievable together. The allocation is all
    /// zeros and the energy rate zero.
    pub fn see_maximization(&self) -> OptimizationResult {
        let mut gains = Vec::with_capacity(RowId::all().count());
        let mut termination = Termination::Converged;
        let mut iterations = 0_u64;

        for row in RowId::all() {
            let search = self.maximize_search(row);
            let tick = self
                .page
                .all_gains_per_tick(&search.allocation, &self.multipliers);
            gains.push(tick.net_gains.get(row.index()).copied().unwrap_or(0.0));
            termination = termination.combine(search.termination);
            iterations = iterations.saturating_add(search.iterations);
        }

        OptimizationResult {
            strategy: Strategy::SeeMaximization,
            page: self.page.id(),
            allocation: vec![0; gains.len()],
            gains,
            energy_rate: 0.0,
            termination,
            iterations,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use synergy_types::{Multipliers, PageId};

    use crate::config::OptimizerConfig;
    use crate::page::SynergyPage;

    use super::*;

    fn page_1() -> SynergyPage {
        SynergyPage::fresh(PageId::new(1).unwrap()).unwrap()
    }

    #[test]
    fn first_row_takes_the_whole_pool() {
        let page = page_1();
        let config = OptimizerConfig::default();
        let optimizer = Optimizer::new(&page, Multipliers::default(), 40, &config);
        let result = optimizer.maximize_one_row(RowId::FIRST);
        assert_eq!(result.allocation, vec![40]);
        assert!(result.termination.is_converged());
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn higher_rows_feed_from_below_without_deficits() {
        let page = page_1();
        let config = OptimizerConfig::default();
        let optimizer = Optimizer::new(&page, Multipliers::default(), 40, &config);
        let result = optimizer.maximize_one_row(RowId::new(3).unwrap());
        assert!(result.termination.is_converged());
        assert_eq!(result.units_used(), 40);
        assert!(result.gains.iter().all(|gain| *gain >= 0.0));
        assert!(result.allocation.last().copied().unwrap() > 0);
    }

    #[test]
    fn empty_pool_converges_immediately() {
        let page = page_1();
        let config = OptimizerConfig::default();
        let optimizer = Optimizer::new(&page, Multipliers::default(), 0, &config);
        let result = optimizer.maximize_one_row(RowId::LAST);
        assert_eq!(result.allocation, vec![0; 7]);
        assert!(result.termination.is_converged());
    }

    #[test]
    fn see_maximization_reports_one_gain_per_row() {
        let page = page_1();
        let config = OptimizerConfig::default();
        let optimizer = Optimizer::new(&page, Multipliers::default(), 1_000, &config);
        let result = optimizer.see_maximization();
        assert_eq!(result.allocation, vec![0; 7]);
        assert_eq!(result.gains.len(), 7);
        assert!(result.gains.iter().all(|gain| *gain > 0.0));
        assert!(result.energy_rate.abs() < f64::EPSILON);
        let alone = optimizer.maximize_one_row(RowId::FIRST);
        assert!((result.gains[0] - alone.gains[0]).abs() < 1e-12);
    }
}
