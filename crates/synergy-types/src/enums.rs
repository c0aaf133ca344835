//! Enumeration types for the synergy optimizer.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::RowId;

/// An allocation strategy the optimizer can run against one page.
///
/// Strategies that target a row carry it; page-wide strategies do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Strategy {
    /// Maximize net gain on one row, feeding it from the rows below.
    MaximizeRow {
        /// The row to maximize.
        row: RowId,
    },
    /// Make gains per tick roughly equal across rows `1..=row`.
    FlatUpToRow {
        /// The highest row included in the flat distribution.
        row: RowId,
    },
    /// Show the gain each row could reach if it were maximized on its own.
    SeeMaximization,
    /// Show the units each row needs to fill in a single tick.
    SeeMinTick,
    /// Fill `row` in the minimum number of ticks and flatten everything below.
    MinTickFlatBelow {
        /// The row to min-tick.
        row: RowId,
    },
    /// Maximize synergy energy across the whole page.
    MaximizeEnergy,
}

impl Strategy {
    /// The target row, for strategies that have one.
    pub const fn target_row(self) -> Option<RowId> {
        match self {
            Self::MaximizeRow { row }
            | Self::FlatUpToRow { row }
            | Self::MinTickFlatBelow { row } => Some(row),
            Self::SeeMaximization | Self::SeeMinTick | Self::MaximizeEnergy => None,
        }
    }

    /// Short human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::MaximizeRow { .. } => "maximize gains on one row",
            Self::FlatUpToRow { .. } => "make gains equal up to row",
            Self::SeeMaximization => "show potential gains on one page",
            Self::SeeMinTick => "units required to min tick each row",
            Self::MinTickFlatBelow { .. } => "min tick one row, flat below it",
            Self::MaximizeEnergy => "maximize synergy energy",
        }
    }
}

/// Why an iterative optimizer loop stopped.
///
/// Only [`Termination::Converged`] means the stop condition was reached;
/// every other variant means the loop was cut short and the returned
/// allocation is the best one found so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// The loop's stop condition was met.
    Converged,
    /// The loop reached an allocation it had already visited.
    CycleDetected,
    /// A step could not make progress; the previous allocation was kept.
    Stagnated,
    /// The iteration cap was exhausted.
    IterationCap,
}

impl Termination {
    /// Returns `true` if the loop reached its stop condition.
    pub const fn is_converged(self) -> bool {
        matches!(self, Self::Converged)
    }

    /// Combine the outcomes of several independent runs.
    ///
    /// The first non-converged outcome wins so a capped sub-run is never
    /// hidden behind a converged one.
    #[must_use]
    pub const fn combine(self, other: Self) -> Self {
        match self {
            Self::Converged => other,
            Self::CycleDetected | Self::Stagnated | Self::IterationCap => self,
        }
    }
}
