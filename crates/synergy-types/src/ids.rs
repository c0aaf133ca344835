//! Validated identifiers for synergy pages and rows.
//!
//! Pages are numbered 1 through 3 and rows 1 through 7, matching the numbers
//! shown in game. Both wrappers can only be constructed through a checked
//! constructor, so any code holding a [`PageId`] or [`RowId`] may index the
//! fixed-size page and row tables without re-validating.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Number of independent synergy pages.
pub const PAGE_COUNT: usize = 3;

/// Number of rows on every synergy page.
pub const ROWS_PER_PAGE: usize = 7;

/// A page or row number outside the valid range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IndexError {
    /// Page number outside 1..=3.
    #[error("page {0} is out of range (expected 1-3)")]
    Page(i64),

    /// Row number outside 1..=7.
    #[error("row {0} is out of range (expected 1-7)")]
    Row(i64),
}

/// Generates a 1-based, range-checked identifier newtype around `u8`.
macro_rules! define_index {
    (
        $(#[$meta:meta])*
        $name:ident, $max:expr, $variant:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(u8);

        impl $name {
            /// Validate a 1-based number and wrap it.
            pub fn new(number: i64) -> Result<Self, IndexError> {
                match u8::try_from(number) {
                    Ok(n) if n >= 1 && usize::from(n) <= $max => Ok(Self(n)),
                    _ => Err(IndexError::$variant(number)),
                }
            }

            /// Build from a 0-based position, as used by allocation vectors.
            pub fn from_index(index: usize) -> Result<Self, IndexError> {
                let number = index
                    .checked_add(1)
                    .and_then(|n| i64::try_from(n).ok())
                    .unwrap_or(i64::MAX);
                Self::new(number)
            }

            /// The 1-based number shown to players.
            pub const fn number(self) -> u8 {
                self.0
            }

            /// The 0-based position of this identifier.
            pub fn index(self) -> usize {
                // Construction guarantees self.0 >= 1.
                usize::from(self.0.saturating_sub(1))
            }

            /// Every valid identifier in ascending order.
            pub fn all() -> impl Iterator<Item = Self> {
                (1..=$max).filter_map(|n| u8::try_from(n).ok()).map(Self)
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i64> for $name {
            type Error = IndexError;

            fn try_from(number: i64) -> Result<Self, Self::Error> {
                Self::new(number)
            }
        }

        impl From<$name> for u8 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_index! {
    /// One of the three independent synergy pages.
    PageId, PAGE_COUNT, Page
}

define_index! {
    /// One of the seven rows on a synergy page.
    RowId, ROWS_PER_PAGE, Row
}

impl RowId {
    /// The first row of every page.
    pub const FIRST: Self = Self(1);

    /// The last row of every page.
    pub const LAST: Self = Self(7);

    /// The row directly above this one, if any.
    pub fn above(self) -> Option<Self> {
        Self::new(i64::from(self.0).saturating_add(1)).ok()
    }

    /// The row directly below this one, if any.
    pub fn below(self) -> Option<Self> {
        Self::new(i64::from(self.0).saturating_sub(1)).ok()
    }
}
