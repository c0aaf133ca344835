//! The page aggregator: seven rows of one page and the queries that span
//! them.
//!
//! Rows on a page are chained. Each row drains points from the row directly
//! below it, so the net gain of row `i` is its own gain minus what row `i + 1`
//! consumes. Synergy energy is not chained and simply sums across rows.

use synergy_types::{Multipliers, PageId, ROWS_PER_PAGE, RowId};

use crate::error::SynergyError;
use crate::numeric::units_to_f64;
use crate::row::{EnergyTick, RowTick, SynergyRow};

/// Chained throughput of every row under an allocation.
///
/// All vectors have one entry per allocated row, starting at row 1.
#[derive(Debug, Clone, PartialEq)]
pub struct PageTick {
    /// Net bonus points per tick after the row above has drained its share.
    pub net_gains: Vec<f64>,
    /// Rows that fill in fewer than ten ticks.
    pub speed_capped: Vec<bool>,
    /// Units per row that could be removed without slowing it down.
    pub overcap: Vec<u64>,
}

impl PageTick {
    /// Position of the smallest net gain. The first position wins ties.
    pub fn argmin(&self) -> Option<usize> {
        self.net_gains
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (index, &gain)| match best {
                Some((_, lowest)) if gain >= lowest => best,
                _ => Some((index, gain)),
            })
            .map(|(index, _)| index)
    }

    /// Some row is being drained faster than it gains.
    pub fn has_deficit(&self) -> bool {
        self.net_gains.iter().any(|gain| *gain < 0.0)
    }

    /// Lowest position above the first row holding overcapped units.
    pub fn first_overcap_above_bottom(&self) -> Option<usize> {
        self.overcap
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, overcap)| **overcap > 0)
            .map(|(index, _)| index)
    }

    /// Units to move out of position `source`: its overcap when it is speed
    /// capped with units to spare, otherwise one.
    pub fn step_size(&self, source: usize) -> u64 {
        let capped = self.speed_capped.get(source).copied().unwrap_or(false);
        match self.overcap.get(source) {
            Some(&overcap) if capped && overcap > 0 => overcap,
            _ => 1,
        }
    }
}

/// Page-wide synergy energy for one allocation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageEnergy {
    /// Energy per tick summed over the rows, before the energy multiplier.
    pub total: f64,
    /// Per-row speed cap flags.
    pub speed_capped: Vec<bool>,
    /// Per-row units beyond what the speed cap can use.
    pub overcap: Vec<u64>,
}

/// Units that fill one row in a single tick and the gain they produce.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinTick {
    /// Units assigned to the row.
    pub units: u64,
    /// Gain per tick at that allocation, ignoring other rows.
    pub gain: f64,
}

/// One synergy page.
#[derive(Debug, Clone, PartialEq)]
pub struct SynergyPage {
    page: PageId,
    rows: [SynergyRow; ROWS_PER_PAGE],
}

impl SynergyPage {
    /// Build a page from per-row levels and points, row 1 first.
    pub fn new(page: PageId, levels: &[u64], points: &[f64]) -> Result<Self, SynergyError> {
        if levels.len() != ROWS_PER_PAGE || points.len() != ROWS_PER_PAGE {
            return Err(SynergyError::invalid(
                "page",
                format!(
                    "page {page} needs {ROWS_PER_PAGE} levels and points, got {} and {}",
                    levels.len(),
                    points.len()
                ),
            ));
        }
        let rows = RowId::all()
            .zip(levels.iter().zip(points))
            .map(|(row, (&level, &points))| SynergyRow::new(page, row, level, points))
            .collect::<Result<Vec<_>, _>>()?;
        let rows = <[SynergyRow; ROWS_PER_PAGE]>::try_from(rows).map_err(|rows| {
            SynergyError::invalid("page", format!("built {} rows for page {page}", rows.len()))
        })?;
        Ok(Self { page, rows })
    }

    /// A page with every row at level 1 and no points.
    pub fn fresh(page: PageId) -> Result<Self, SynergyError> {
        Self::new(page, &[1; ROWS_PER_PAGE], &[0.0; ROWS_PER_PAGE])
    }

    /// Which page this is.
    pub const fn id(&self) -> PageId {
        self.page
    }

    /// One row.
    #[allow(clippy::indexing_slicing)]
    pub fn row(&self, row: RowId) -> &SynergyRow {
        &self.rows[row.index()]
    }

    /// One row, mutably.
    #[allow(clippy::indexing_slicing)]
    pub fn row_mut(&mut self, row: RowId) -> &mut SynergyRow {
        &mut self.rows[row.index()]
    }

    /// All rows, row 1 first.
    pub const fn rows(&self) -> &[SynergyRow] {
        &self.rows
    }

    /// Current levels, row 1 first.
    pub fn levels(&self) -> Vec<u64> {
        self.rows.iter().map(SynergyRow::level).collect()
    }

    /// Current points, row 1 first.
    pub fn points(&self) -> Vec<f64> {
        self.rows.iter().map(SynergyRow::current_points).collect()
    }

    /// Chained gains for `allocation`, which covers rows `1..=allocation.len()`.
    ///
    /// Entries past the seventh are ignored.
    pub fn all_gains_per_tick(&self, allocation: &[u64], multipliers: &Multipliers) -> PageTick {
        let ticks: Vec<RowTick> = self
            .rows
            .iter()
            .zip(allocation)
            .map(|(row, &units)| row.gains_per_tick(units, multipliers.progress, multipliers.power))
            .collect();

        let consumed_from_below = ticks
            .iter()
            .skip(1)
            .map(|tick| tick.consume)
            .chain(core::iter::once(0.0));
        let net_gains = ticks
            .iter()
            .zip(consumed_from_below)
            .map(|(tick, drained)| tick.gain - drained)
            .collect();

        PageTick {
            net_gains,
            speed_capped: ticks.iter().map(|tick| tick.speed_capped).collect(),
            overcap: ticks.iter().map(|tick| tick.overcap).collect(),
        }
    }

    /// Synergy energy per tick over the allocated rows. Rows do not drain
    /// each other's energy.
    pub fn all_energy_per_tick(&self, allocation: &[u64], progress: f64) -> PageEnergy {
        let ticks: Vec<EnergyTick> = self
            .rows
            .iter()
            .zip(allocation)
            .map(|(row, &units)| row.energy_per_tick(units, progress))
            .collect();
        PageEnergy {
            total: ticks.iter().map(|tick| tick.energy).sum(),
            speed_capped: ticks.iter().map(|tick| tick.speed_capped).collect(),
            overcap: ticks.iter().map(|tick| tick.overcap).collect(),
        }
    }

    /// Units needed to fill `row` in one tick, capped at `available`, and the
    /// gain they produce on that row alone.
    pub fn min_tick(&self, row: RowId, available: u64, multipliers: &Multipliers) -> MinTick {
        let target = self.row(row);
        let units = target.min_tick_units(available, multipliers.progress);
        let gain = target
            .gains_per_tick(units, multipliers.progress, multipliers.power)
            .gain;
        MinTick { units, gain }
    }

    /// Rows ranked by synergy energy per unit at a `probe_units` allocation,
    /// best first. Ties keep ascending row order.
    pub fn energy_efficiency_order(&self, progress: f64, probe_units: u64) -> Vec<RowId> {
        let probe = units_to_f64(probe_units.max(1));
        let mut ranked: Vec<(RowId, f64)> = self
            .rows
            .iter()
            .map(|row| {
                let yield_per_unit = row.energy_per_tick(probe_units, progress).energy / probe;
                (row.row(), yield_per_unit)
            })
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.into_iter().map(|(row, _)| row).collect()
    }
}
