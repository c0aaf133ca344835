//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use synergy_types::{RowId, Strategy};

use crate::error::CliError;

/// Synergy optimizer: spread a pool of units over a synergy page.
#[derive(Parser, Debug)]
#[command(name = "synergy", version)]
#[command(about = "Plan synergy row allocations and project their gains")]
pub struct Args {
    /// Engine configuration file (YAML). Defaults to ./synergy-config.yaml
    /// when present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Settings file (JSON). Defaults to the platform config directory.
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// Print JSON instead of tables.
    #[arg(long, global = true)]
    pub json: bool,

    /// What to do.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show multipliers, the unit pool and page state.
    Show {
        /// Only show this page (1-3).
        #[arg(long)]
        page: Option<i64>,
    },

    /// Run an allocation strategy and project the result.
    Optimize {
        /// Strategy to run.
        #[arg(long, value_enum)]
        strategy: StrategyArg,

        /// Page to optimize (1-3).
        #[arg(long, default_value_t = 1)]
        page: i64,

        /// Target row (1-7), for strategies that need one.
        #[arg(long)]
        row: Option<i64>,

        /// Hours to project over. Defaults to the configured value.
        #[arg(long)]
        hours: Option<u32>,
    },

    /// Set a row's level and/or points.
    SetRow {
        /// Page (1-3).
        #[arg(long)]
        page: i64,

        /// Row (1-7).
        #[arg(long)]
        row: i64,

        /// New level.
        #[arg(long, allow_hyphen_values = true)]
        level: Option<i64>,

        /// New current points.
        #[arg(long, allow_hyphen_values = true)]
        points: Option<f64>,
    },

    /// Set the size of the unit pool.
    SetUnits {
        /// Number of units.
        #[arg(allow_hyphen_values = true)]
        units: i64,
    },

    /// Set one modifier, e.g. `set-modifier syn_pot_active true`.
    SetModifier {
        /// Modifier name.
        name: String,

        /// New value.
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Write a fresh settings file.
    Init {
        /// Overwrite an existing settings file.
        #[arg(long)]
        force: bool,
    },
}

/// Strategy names on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Maximize gains on one row.
    Maximize,
    /// Make gains equal up to a row.
    Flat,
    /// Show the gain each row could reach on its own.
    SeeMaximization,
    /// Show units needed to fill each row in one tick.
    SeeMinTick,
    /// Min-tick one row and flatten the rows below it.
    MinTickFlat,
    /// Maximize synergy energy.
    Energy,
}

impl StrategyArg {
    /// Resolve to an engine strategy, validating the target row if the
    /// strategy needs one.
    pub fn resolve(self, row: Option<i64>) -> Result<Strategy, CliError> {
        let target = |name: &'static str| -> Result<RowId, CliError> {
            let number = row.ok_or(CliError::MissingRow { strategy: name })?;
            Ok(RowId::new(number).map_err(synergy_engine::SynergyError::from)?)
        };
        Ok(match self {
            Self::Maximize => Strategy::MaximizeRow {
                row: target("maximize")?,
            },
            Self::Flat => Strategy::FlatUpToRow {
                row: target("flat")?,
            },
            Self::MinTickFlat => Strategy::MinTickFlatBelow {
                row: target("min-tick-flat")?,
            },
            Self::SeeMaximization => Strategy::SeeMaximization,
            Self::SeeMinTick => Strategy::SeeMinTick,
            Self::Energy => Strategy::MaximizeEnergy,
        })
    }
}
