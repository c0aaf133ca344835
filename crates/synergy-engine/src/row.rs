//! The row model: progress requirement, bonus curve and per-tick throughput
//! of a single synergy row.
//!
//! A row fills once its progress reaches the current requirement. Each fill
//! grants bonus points (level times the power multiplier) and synergy energy,
//! and drains twice the row's level in points from the row directly below.
//! Throughput is computed per tick, in whole ticks per fill: once a row fills
//! in fewer than [`SPEED_CAP_TICKS`] ticks it is speed capped, and units
//! beyond the minimum needed for its current tick count are overcap.

use synergy_types::{PageId, RowId};

use crate::constants::{
    BONUS_LINEAR_LIMIT, REQUIREMENT_STEP_PER_LEVEL, SPEED_CAP_TICKS, base_progress, bonus_divisor,
    energy_per_fill, log_scaling, row_name,
};
use crate::error::{SynergyError, non_negative_real};
use crate::events::SessionEvent;
use crate::numeric::{f64_to_units, units_to_f64};

/// Bonus and consumption produced by one row at a given allocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowTick {
    /// Bonus points earned per tick, before consumption by the row above.
    pub gain: f64,
    /// Points drained per tick from the row below.
    pub consume: f64,
    /// The row fills in fewer than ten ticks.
    pub speed_capped: bool,
    /// Units that could be removed without slowing the row down.
    pub overcap: u64,
}

impl RowTick {
    /// No throughput at all.
    pub const ZERO: Self = Self {
        gain: 0.0,
        consume: 0.0,
        speed_capped: false,
        overcap: 0,
    };
}

/// Synergy energy produced by one row at a given allocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyTick {
    /// Synergy energy per tick, before the energy multiplier.
    pub energy: f64,
    /// The row fills in fewer than ten ticks.
    pub speed_capped: bool,
    /// Units that could be removed without slowing the row down.
    pub overcap: u64,
}

impl EnergyTick {
    /// No energy at all.
    pub const ZERO: Self = Self {
        energy: 0.0,
        speed_capped: false,
        overcap: 0,
    };
}

/// Fill timing shared by the gain and energy calculations.
enum Fill {
    /// Nothing flows into the row.
    Idle,
    /// Fills in fewer than ten ticks; yield is per whole tick.
    Capped {
        /// Whole ticks per fill.
        ticks: f64,
        /// Units beyond the minimum for `ticks`.
        overcap: u64,
    },
    /// Fractional fills per tick.
    Linear {
        /// Fraction of a fill completed each tick.
        fills_per_tick: f64,
    },
}

/// One row of a synergy page.
#[derive(Debug, Clone, PartialEq)]
pub struct SynergyRow {
    page: PageId,
    row: RowId,
    level: u64,
    current_points: f64,
    requirement: f64,
    current_bonus: f64,
}

impl SynergyRow {
    /// Create a row with its initial level and points.
    pub fn new(page: PageId, row: RowId, level: u64, points: f64) -> Result<Self, SynergyError> {
        let points = non_negative_real("points", points)?;
        let mut synergy_row = Self {
            page,
            row,
            level,
            current_points: points,
            requirement: 0.0,
            current_bonus: 0.0,
        };
        synergy_row.requirement = synergy_row.requirement_at(level);
        synergy_row.current_bonus = synergy_row.bonus_at(points);
        Ok(synergy_row)
    }

    /// The page this row belongs to.
    pub const fn page(&self) -> PageId {
        self.page
    }

    /// This row's position on its page.
    pub const fn row(&self) -> RowId {
        self.row
    }

    /// In-game name of the row.
    pub fn name(&self) -> &'static str {
        row_name(self.page, self.row)
    }

    /// Current level.
    pub const fn level(&self) -> u64 {
        self.level
    }

    /// Current points.
    pub const fn current_points(&self) -> f64 {
        self.current_points
    }

    /// Progress needed for one fill at the current level.
    pub const fn requirement(&self) -> f64 {
        self.requirement
    }

    /// Multiplicative bonus at the current points.
    pub const fn current_bonus(&self) -> f64 {
        self.current_bonus
    }

    /// Synergy energy granted per fill.
    pub fn energy_per_fill(&self) -> f64 {
        energy_per_fill(self.row)
    }

    /// Set the level and recompute the requirement.
    pub fn set_level(&mut self, level: u64) -> SessionEvent {
        self.level = level;
        self.requirement = self.requirement_at(level);
        SessionEvent::LevelChanged {
            page: self.page,
            row: self.row,
            level,
        }
    }

    /// Set the current points and recompute the bonus.
    ///
    /// Returns the points event followed by the bonus event.
    pub fn set_current_points(&mut self, points: f64) -> Result<[SessionEvent; 2], SynergyError> {
        let points = non_negative_real("points", points)?;
        self.current_points = points;
        self.current_bonus = self.bonus_at(points);
        Ok([
            SessionEvent::PointsChanged {
                page: self.page,
                row: self.row,
                points,
            },
            SessionEvent::BonusChanged {
                page: self.page,
                row: self.row,
                bonus: self.current_bonus,
            },
        ])
    }

    /// Progress requirement at `level`.
    ///
    /// Drops by 10 per level above 1, floored at a tenth of the base.
    pub fn requirement_at(&self, level: u64) -> f64 {
        let base = base_progress(self.page, self.row);
        let reduced = (units_to_f64(level) - 1.0).mul_add(-REQUIREMENT_STEP_PER_LEVEL, base);
        reduced.max(base / 10.0)
    }

    /// Multiplicative bonus this row gives at `points`.
    ///
    /// Linear up to 1000 points; above that, multiplying the points by the
    /// row's log scaling doubles the bonus.
    pub fn bonus_at(&self, points: f64) -> f64 {
        let divisor = bonus_divisor(self.page, self.row);
        if points <= BONUS_LINEAR_LIMIT {
            points / BONUS_LINEAR_LIMIT / divisor + 1.0
        } else {
            let doublings = (points / BONUS_LINEAR_LIMIT).log(log_scaling(self.row));
            doublings.exp2() / divisor + 1.0
        }
    }

    /// Bonus earned and points consumed per tick with `units` assigned.
    pub fn gains_per_tick(&self, units: u64, progress: f64, power: f64) -> RowTick {
        let level = units_to_f64(self.level);
        match self.fill(units, progress) {
            Fill::Idle => RowTick::ZERO,
            Fill::Capped { ticks, overcap } => RowTick {
                gain: level * power / ticks,
                consume: level * 2.0 / ticks,
                speed_capped: true,
                overcap,
            },
            Fill::Linear { fills_per_tick } => RowTick {
                gain: fills_per_tick * level * power,
                consume: fills_per_tick * level * 2.0,
                speed_capped: false,
                overcap: 0,
            },
        }
    }

    /// Synergy energy per tick with `units` assigned, before the energy
    /// multiplier.
    pub fn energy_per_tick(&self, units: u64, progress: f64) -> EnergyTick {
        let per_fill = self.energy_per_fill();
        match self.fill(units, progress) {
            Fill::Idle => EnergyTick::ZERO,
            Fill::Capped { ticks, overcap } => EnergyTick {
                energy: per_fill / ticks,
                speed_capped: true,
                overcap,
            },
            Fill::Linear { fills_per_tick } => EnergyTick {
                energy: fills_per_tick * per_fill,
                speed_capped: false,
                overcap: 0,
            },
        }
    }

    /// Smallest allocation that fills the row in a single tick, or all of
    /// `available` if the pool cannot reach it.
    pub fn min_tick_units(&self, available: u64, progress: f64) -> u64 {
        if progress.is_nan() || progress <= 0.0 {
            return 0;
        }
        f64_to_units((self.requirement / progress).ceil()).min(available)
    }

    fn fill(&self, units: u64, progress: f64) -> Fill {
        let points_per_tick = units_to_f64(units) * progress;
        if points_per_tick.is_nan() || points_per_tick <= 0.0 {
            return Fill::Idle;
        }
        if points_per_tick > self.requirement / SPEED_CAP_TICKS {
            let ticks = (self.requirement / points_per_tick).ceil().max(1.0);
            let required = f64_to_units((self.requirement / progress / ticks).ceil());
            Fill::Capped {
                ticks,
                overcap: units.saturating_sub(required),
            }
        } else {
            Fill::Linear {
                fills_per_tick: points_per_tick / self.requirement,
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn row(page: i64, row: i64, level: u64, points: f64) -> SynergyRow {
        SynergyRow::new(
            PageId::new(page).unwrap(),
            RowId::new(row).unwrap(),
            level,
            points,
        )
        .unwrap()
    }

    #[test]
    fn forty_units_on_a_fresh_first_row() {
        let tick = row(1, 1, 1, 0.0).gains_per_tick(40, 1.0, 1.0);
        assert!(close(tick.gain, 0.004));
        assert!(close(tick.consume, 0.008));
        assert!(!tick.speed_capped);
        assert_eq!(tick.overcap, 0);
    }

    #[test]
    fn zero_units_produce_nothing() {
        for page in PageId::all() {
            for id in RowId::all() {
                let r = SynergyRow::new(page, id, 5, 0.0).unwrap();
                assert_eq!(r.gains_per_tick(0, 1.0, 1.0), RowTick::ZERO);
                assert_eq!(r.energy_per_tick(0, 1.0), EnergyTick::ZERO);
            }
        }
    }

    #[test]
    fn zero_progress_multiplier_produces_nothing() {
        let r = row(2, 3, 4, 0.0);
        assert_eq!(r.gains_per_tick(100, 0.0, 1.0), RowTick::ZERO);
        assert_eq!(r.energy_per_tick(100, f64::NAN), EnergyTick::ZERO);
        assert_eq!(r.min_tick_units(100, 0.0), 0);
    }

    #[test]
    fn speed_capped_row_reports_overcap() {
        // Requirement 10000: 2400 units fill in 5 ticks, which 2000 also do.
        let tick = row(1, 1, 1, 0.0).gains_per_tick(2400, 1.0, 1.0);
        assert!(tick.speed_capped);
        assert_eq!(tick.overcap, 400);
        assert!(close(tick.gain, 0.2));
        assert!(close(tick.consume, 0.4));

        let exact = row(1, 1, 1, 0.0).gains_per_tick(2000, 1.0, 1.0);
        assert!(exact.speed_capped);
        assert_eq!(exact.overcap, 0);
    }

    #[test]
    fn energy_follows_the_same_timing() {
        let r = row(1, 3, 1, 0.0);
        let slow = r.energy_per_tick(35, 1.0);
        assert!(close(slow.energy, 35.0 * 6.0 / 35_000.0));
        let capped = r.energy_per_tick(35_000, 1.0);
        assert!(capped.speed_capped);
        assert!(close(capped.energy, 6.0));
    }

    #[test]
    fn bonus_is_continuous_at_the_linear_limit() {
        for page in PageId::all() {
            for id in RowId::all() {
                let r = SynergyRow::new(page, id, 1, 0.0).unwrap();
                let below = r.bonus_at(BONUS_LINEAR_LIMIT);
                let above = r.bonus_at(BONUS_LINEAR_LIMIT + 1e-9);
                assert!((below - above).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn bonus_is_monotonic() {
        let r = row(3, 7, 1, 0.0);
        let mut previous = r.bonus_at(0.0);
        let mut points = 0.0;
        while points < 1e9 {
            points = f64::mul_add(points, 1.7, 13.0);
            let bonus = r.bonus_at(points);
            assert!(bonus >= previous);
            previous = bonus;
        }
    }

    #[test]
    fn log_scaling_doubles_the_bonus() {
        // Row 1 scales by 6: 6000 points give twice the bonus of 1000.
        let r = row(1, 1, 1, 0.0);
        assert!(close(r.bonus_at(1000.0) - 1.0, 1.0));
        assert!(close(r.bonus_at(6000.0) - 1.0, 2.0));
    }

    #[test]
    fn requirement_is_non_increasing_and_floored() {
        let r = row(1, 7, 1, 0.0);
        let mut previous = f64::INFINITY;
        for level in [1, 2, 10, 100, 1_000, 10_000, 100_000] {
            let requirement = r.requirement_at(level);
            assert!(requirement <= previous);
            assert!(requirement >= 15_000.0);
            previous = requirement;
        }
        assert!(close(r.requirement_at(100_000), 15_000.0));
    }

    #[test]
    fn min_tick_units_is_capped_by_the_pool() {
        let r = row(1, 1, 1, 0.0);
        assert_eq!(r.min_tick_units(40, 1.0), 40);
        assert_eq!(r.min_tick_units(50_000, 1.0), 10_000);
        assert_eq!(r.min_tick_units(50_000, 3.0), 3_334);
        let tick = r.gains_per_tick(3_334, 3.0, 1.0);
        assert!(close(tick.gain, 1.0));
    }

    #[test]
    fn setters_emit_events() {
        let mut r = row(1, 2, 1, 0.0);
        let event = r.set_level(11);
        assert!(matches!(event, SessionEvent::LevelChanged { level: 11, .. }));
        assert!(close(r.requirement(), 19_900.0));

        let [points, bonus] = r.set_current_points(500.0).unwrap();
        assert!(matches!(points, SessionEvent::PointsChanged { .. }));
        assert!(matches!(bonus, SessionEvent::BonusChanged { .. }));
        assert!(close(r.current_bonus(), 1.5));
        assert!(r.set_current_points(-1.0).is_err());
    }
}
