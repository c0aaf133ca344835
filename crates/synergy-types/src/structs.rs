//! Core value structs: modifiers, multipliers, optimizer output and
//! projected results.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{Strategy, Termination};
use crate::ids::PageId;

/// Max stage assumed when nothing else is known.
pub const DEFAULT_MAX_STAGE: i32 = 400;

// ---------------------------------------------------------------------------
// Modifiers
// ---------------------------------------------------------------------------

/// Every externally settable input that feeds the three multipliers.
///
/// Booleans default to `false`, numeric modifiers to zero, and `max_stage`
/// to [`DEFAULT_MAX_STAGE`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[allow(clippy::struct_excessive_bools)]
pub struct Modifiers {
    /// A synergy potion is active.
    pub syn_pot_active: bool,
    /// The newb synergy progress trophy is owned.
    pub newb_progress_trophy: bool,
    /// The pro synergy progress trophy is owned.
    pub pro_progress_trophy: bool,
    /// The newb synergy power trophy is owned.
    pub newb_power_trophy: bool,
    /// The pro synergy power trophy is owned.
    pub pro_power_trophy: bool,
    /// The soul shop synergy power purchase is owned.
    pub soul_power_purchase: bool,
    /// Synergy power from adventure items, in percent.
    pub adventure_power_pct: f64,
    /// Page 3 synergy power perk level.
    pub perk_level: u32,
    /// Pomos synergy power levels.
    pub pomos_levels: u32,
    /// Highest adventure stage reached.
    pub max_stage: i32,
    /// The newb synergy energy trophy is owned.
    pub newb_energy_trophy: bool,
    /// The pro synergy energy trophy is owned.
    pub pro_energy_trophy: bool,
    /// Synergy energy from adventure items, in percent.
    pub adventure_energy_pct: f64,
}

impl Default for Modifiers {
    fn default() -> Self {
        Self {
            syn_pot_active: false,
            newb_progress_trophy: false,
            pro_progress_trophy: false,
            newb_power_trophy: false,
            pro_power_trophy: false,
            soul_power_purchase: false,
            adventure_power_pct: 0.0,
            perk_level: 0,
            pomos_levels: 0,
            max_stage: DEFAULT_MAX_STAGE,
            newb_energy_trophy: false,
            pro_energy_trophy: false,
            adventure_energy_pct: 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Multipliers
// ---------------------------------------------------------------------------

/// The three scalars derived from [`Modifiers`].
///
/// An optimizer call copies these once at entry and treats them as an
/// immutable snapshot for the rest of the call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Multipliers {
    /// Scales points added to a row per unit per tick.
    pub progress: f64,
    /// Scales the bonus points a row earns per fill.
    pub power: f64,
    /// Scales synergy energy earned per fill.
    pub energy: f64,
}

impl Default for Multipliers {
    fn default() -> Self {
        Self {
            progress: 1.0,
            power: 1.0,
            energy: 1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Optimizer output
// ---------------------------------------------------------------------------

/// The output of one optimizer strategy run.
///
/// `allocation` and `gains` have one entry per row under consideration,
/// starting at row 1. Strategies that target a row return `row` entries;
/// page-wide strategies return seven.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct OptimizationResult {
    /// The strategy that produced this result.
    pub strategy: Strategy,
    /// The page the strategy ran on.
    pub page: PageId,
    /// Units assigned to each row.
    pub allocation: Vec<u64>,
    /// Net bonus points gained per tick on each row.
    pub gains: Vec<f64>,
    /// Synergy energy per tick, energy multiplier applied.
    pub energy_rate: f64,
    /// Why the underlying search stopped.
    pub termination: Termination,
    /// Search iterations spent, summed over any sub-runs.
    pub iterations: u64,
}

impl OptimizationResult {
    /// Total units handed out by this result.
    pub fn units_used(&self) -> u64 {
        self.allocation
            .iter()
            .fold(0_u64, |acc, units| acc.saturating_add(*units))
    }
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

/// One row of a projected optimizer result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RowProjection {
    /// Display name of the row on its page.
    pub name: String,
    /// Units assigned to the row.
    pub units: u64,
    /// Net points gained per hour.
    pub gain_per_hour: f64,
    /// Points after running for the projected number of hours.
    pub final_points: f64,
    /// Bonus multiplier at `final_points`.
    pub final_bonus: f64,
    /// `final_bonus` divided by the row's current bonus.
    pub relative_gain: f64,
}

/// An optimizer result projected forward over a number of hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Projection {
    /// Hours the projection covers.
    pub hours: u32,
    /// Per-row projections, one per entry in the result's allocation.
    pub rows: Vec<RowProjection>,
    /// Synergy energy gained over the whole period.
    pub total_energy: f64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::ids::RowId;

    use super::*;

    #[test]
    fn default_modifiers_are_neutral() {
        let modifiers = Modifiers::default();
        assert!(!modifiers.syn_pot_active);
        assert_eq!(modifiers.perk_level, 0);
        assert_eq!(modifiers.max_stage, DEFAULT_MAX_STAGE);
    }

    #[test]
    fn units_used_sums_allocation() {
        let result = OptimizationResult {
            strategy: Strategy::MaximizeRow { row: RowId::LAST },
            page: PageId::new(1).unwrap(),
            allocation: vec![3, 0, 7],
            gains: vec![0.0; 3],
            energy_rate: 0.0,
            termination: Termination::Converged,
            iterations: 0,
        };
        assert_eq!(result.units_used(), 10);
    }
}
