//! Allocation strategies over a single page.
//!
//! An [`Optimizer`] borrows one page and copies the multipliers and pool size
//! at construction. Strategies never mutate the page; each returns a fresh
//! [`OptimizationResult`].
//!
//! # Modules
//!
//! - [`search`] -- iteration and cycle guards shared by the greedy loops
//! - [`maximize`] -- maximize one row, and the per-row maximization overview
//! - [`flat`] -- near-equal gains up to a row
//! - [`min_tick`] -- single-tick fills, alone or with a flat base below
//! - [`energy`] -- synergy energy maximization

pub mod energy;
pub mod flat;
pub mod maximize;
pub mod min_tick;
pub mod search;

use std::time::Instant;

use synergy_types::{Multipliers, OptimizationResult, Strategy};
use tracing::{debug, warn};

use crate::config::OptimizerConfig;
use crate::page::SynergyPage;

use self::search::Search;

/// Runs allocation strategies against one page with a fixed multiplier
/// snapshot and pool size.
#[derive(Debug, Clone, Copy)]
pub struct Optimizer<'a> {
    page: &'a SynergyPage,
    multipliers: Multipliers,
    pool: u64,
    config: &'a OptimizerConfig,
}

impl<'a> Optimizer<'a> {
    /// Snapshot `multipliers` and `pool` for strategies on `page`.
    pub const fn new(
        page: &'a SynergyPage,
        multipliers: Multipliers,
        pool: u64,
        config: &'a OptimizerConfig,
    ) -> Self {
        Self {
            page,
            multipliers,
            pool,
            config,
        }
    }

    /// The page under optimization.
    pub const fn page(&self) -> &SynergyPage {
        self.page
    }

    /// The multiplier snapshot.
    pub const fn multipliers(&self) -> Multipliers {
        self.multipliers
    }

    /// The pool size snapshot.
    pub const fn pool(&self) -> u64 {
        self.pool
    }

    /// Run `strategy` and log how it went.
    pub fn run(&self, strategy: Strategy) -> OptimizationResult {
        let started = Instant::now();
        debug!(
            page = %self.page.id(),
            strategy = strategy.label(),
            pool = self.pool,
            "optimizer started"
        );

        let result = match strategy {
            Strategy::MaximizeRow { row } => self.maximize_one_row(row),
            Strategy::FlatUpToRow { row } => self.flat_up_to_row(row, self.pool),
            Strategy::SeeMaximization => self.see_maximization(),
            Strategy::SeeMinTick => self.see_min_tick(),
            Strategy::MinTickFlatBelow { row } => self.min_tick_row_flat_below(row),
            Strategy::MaximizeEnergy => self.maximize_energy(),
        };

        let elapsed_ms = started.elapsed().as_millis();
        if result.termination.is_converged() {
            debug!(
                page = %self.page.id(),
                strategy = strategy.label(),
                iterations = result.iterations,
                elapsed_ms,
                "optimizer finished"
            );
        } else {
            warn!(
                page = %self.page.id(),
                strategy = strategy.label(),
                termination = ?result.termination,
                iterations = result.iterations,
                elapsed_ms,
                "optimizer stopped before converging"
            );
        }
        result
    }

    /// Chained net gains and energy rate for a finished allocation.
    fn finish(&self, strategy: Strategy, search: Search) -> OptimizationResult {
        let gains = self
            .page
            .all_gains_per_tick(&search.allocation, &self.multipliers)
            .net_gains;
        let energy_rate = self.energy_rate(&search.allocation);
        OptimizationResult {
            strategy,
            page: self.page.id(),
            allocation: search.allocation,
            gains,
            energy_rate,
            termination: search.termination,
            iterations: search.iterations,
        }
    }

    /// Synergy energy per tick with the energy multiplier applied.
    fn energy_rate(&self, allocation: &[u64]) -> f64 {
        self.page
            .all_energy_per_tick(allocation, self.multipliers.progress)
            .total
            * self.multipliers.energy
    }
}
