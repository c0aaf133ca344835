//! Change events produced by session mutations.
//!
//! Every setter on a row or on the [`Session`](crate::session::Session)
//! returns or queues the events it caused. Nothing inside the engine
//! subscribes to them; a front end drains them after each mutation and
//! refreshes whatever it displays.

use serde::Serialize;
use synergy_types::{PageId, RowId};

/// One of the three derived multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiplierKind {
    /// Points added per unit per tick.
    Progress,
    /// Bonus points earned per fill.
    Power,
    /// Synergy energy earned per fill.
    Energy,
}

impl core::fmt::Display for MultiplierKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::Progress => "progress",
            Self::Power => "power",
            Self::Energy => "energy",
        };
        f.write_str(name)
    }
}

/// A state change observable by a front end.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A row's level was set.
    LevelChanged {
        /// Page of the row.
        page: PageId,
        /// The row.
        row: RowId,
        /// New level.
        level: u64,
    },

    /// A row's current points were set.
    PointsChanged {
        /// Page of the row.
        page: PageId,
        /// The row.
        row: RowId,
        /// New points.
        points: f64,
    },

    /// A row's bonus was recomputed after its points changed.
    BonusChanged {
        /// Page of the row.
        page: PageId,
        /// The row.
        row: RowId,
        /// New multiplicative bonus.
        bonus: f64,
    },

    /// A derived multiplier took a new value.
    MultiplierChanged {
        /// Which multiplier moved.
        kind: MultiplierKind,
        /// Its new value.
        value: f64,
    },

    /// The unit pool was resized.
    TotalUnitsChanged {
        /// New pool size.
        units: u64,
    },
}
