//! Row model, multipliers and allocation strategies for the synergy
//! optimizer.
//!
//! A synergy page is a ladder of seven rows. Each row turns assigned units
//! into progress, fills, earns bonus points, and drains points from the row
//! below it. This crate models that ladder and searches for good ways to
//! spread a fixed pool of units over it.
//!
//! # Modules
//!
//! - [`constants`] -- fixed per-page and per-row game tables
//! - [`row`] -- requirement, bonus curve and per-tick throughput of one row
//! - [`page`] -- seven chained rows and page-wide queries
//! - [`multiplier`] -- progress, power and energy multipliers from modifiers
//! - [`optimizer`] -- the allocation strategies
//! - [`session`] -- owned state, setters, events and persistence mapping
//! - [`projection`] -- results projected over a number of hours
//! - [`events`] -- change events queued by the session
//! - [`config`] -- YAML engine configuration
//! - [`error`] -- input validation errors
//! - [`numeric`] -- checked unit and float conversions

pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod multiplier;
pub mod numeric;
pub mod optimizer;
pub mod page;
pub mod projection;
pub mod row;
pub mod session;

pub use config::{ConfigError, EngineConfig};
pub use error::SynergyError;
pub use events::{MultiplierKind, SessionEvent};
pub use multiplier::ModifierChange;
pub use optimizer::Optimizer;
pub use page::{MinTick, PageEnergy, PageTick, SynergyPage};
pub use row::{EnergyTick, RowTick, SynergyRow};
pub use session::Session;
