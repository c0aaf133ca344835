//! Shared type definitions for the synergy optimizer.
//!
//! This crate is the single source of truth for the values that cross the
//! boundary between the calculation engine, the settings store and any
//! front end. Result types flow downstream to `TypeScript` via `ts-rs` so a
//! display layer can render optimizer output without redeclaring it.
//!
//! # Modules
//!
//! - [`ids`] -- Validated page and row identifiers ([`PageId`], [`RowId`])
//! - [`enums`] -- Optimizer strategies and loop termination reasons
//! - [`structs`] -- Modifiers, multipliers, optimizer results and projections
//! - [`persisted`] -- The on-disk settings record ([`PersistedState`])

pub mod enums;
pub mod ids;
pub mod persisted;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{Strategy, Termination};
pub use ids::{IndexError, PAGE_COUNT, PageId, ROWS_PER_PAGE, RowId};
pub use persisted::{DEFAULT_TOTAL_UNITS, PersistedInputs, PersistedState};
pub use structs::{
    DEFAULT_MAX_STAGE, Modifiers, Multipliers, OptimizationResult, Projection, RowProjection,
};
