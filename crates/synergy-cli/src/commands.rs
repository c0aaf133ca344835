//! Subcommand handlers.
//!
//! Every handler works on a loaded [`Session`]. Mutating commands save the
//! settings file afterwards and print the change events they caused.

use serde::Serialize;
use synergy_engine::{ModifierChange, Session, SessionEvent};
use synergy_store::SettingsStore;
use synergy_types::{Multipliers, OptimizationResult, PageId, Projection, RowId};
use tracing::info;

use crate::cli::{Command, StrategyArg};
use crate::error::CliError;
use crate::render;

/// What a command prints.
#[derive(Debug)]
pub enum Output {
    /// Page state and multipliers.
    State(StateView),
    /// An optimizer run with its projection.
    Optimized(Box<OptimizedView>),
    /// Events from a mutation.
    Events(Vec<SessionEvent>),
    /// A free-form message.
    Message(String),
}

/// JSON shape of `show`.
#[derive(Debug, Serialize)]
pub struct StateView {
    /// Current multipliers.
    pub multipliers: Multipliers,
    /// Unit pool size.
    pub total_units: u64,
    /// The requested pages.
    pub pages: Vec<PageView>,
}

/// One page in a [`StateView`].
#[derive(Debug, Serialize)]
pub struct PageView {
    /// Page number.
    pub page: PageId,
    /// Row levels, bottom row first.
    pub levels: Vec<u64>,
    /// Row points, bottom row first.
    pub points: Vec<f64>,
    /// Row bonuses, bottom row first.
    pub bonuses: Vec<f64>,
}

/// JSON shape of `optimize`.
#[derive(Debug, Serialize)]
pub struct OptimizedView {
    /// Raw optimizer output.
    pub result: OptimizationResult,
    /// Projection of the allocation.
    pub projection: Projection,
}

impl Output {
    /// Render as text, or as JSON when `json` is set.
    pub fn render(&self, session: &Session, json: bool) -> Result<String, CliError> {
        if json {
            let value = match self {
                Self::State(view) => serde_json::to_string_pretty(view)?,
                Self::Optimized(view) => serde_json::to_string_pretty(view)?,
                Self::Events(events) => serde_json::to_string_pretty(events)?,
                Self::Message(message) => serde_json::to_string_pretty(message)?,
            };
            return Ok(value);
        }
        Ok(match self {
            Self::State(view) => {
                let pages: Vec<PageId> = view.pages.iter().map(|page| page.page).collect();
                render::state(session, &pages)
            }
            Self::Optimized(view) => render::result(&view.result, &view.projection),
            Self::Events(events) if events.is_empty() => String::from("no changes"),
            Self::Events(events) => events
                .iter()
                .map(render::event)
                .collect::<Vec<_>>()
                .join("\n"),
            Self::Message(message) => message.clone(),
        })
    }
}

/// Run `command` against `session`, saving through `store` when it mutates.
pub fn execute(
    command: Command,
    session: &mut Session,
    store: &SettingsStore,
) -> Result<Output, CliError> {
    match command {
        Command::Show { page } => show(session, page),
        Command::Optimize {
            strategy,
            page,
            row,
            hours,
        } => optimize(session, strategy, page, row, hours),
        Command::SetRow {
            page,
            row,
            level,
            points,
        } => {
            let page = page_id(page)?;
            let row = RowId::new(row).map_err(synergy_engine::SynergyError::from)?;
            if let Some(level) = level {
                session.set_level(page, row, level)?;
            }
            if let Some(points) = points {
                session.set_points(page, row, points)?;
            }
            save(session, store)
        }
        Command::SetUnits { units } => {
            session.set_total_units(units)?;
            save(session, store)
        }
        Command::SetModifier { name, value } => {
            session.set_modifier(ModifierChange::parse(&name, &value)?)?;
            save(session, store)
        }
        Command::Init { force } => {
            if store.path().exists() && !force {
                return Err(CliError::AlreadyInitialized {
                    path: store.path().display().to_string(),
                });
            }
            let fresh = Session::new(session.config().clone())?;
            store.save(&fresh.to_persisted())?;
            *session = fresh;
            Ok(Output::Message(format!(
                "wrote {}",
                store.path().display()
            )))
        }
    }
}

fn page_id(number: i64) -> Result<PageId, CliError> {
    Ok(PageId::new(number).map_err(synergy_engine::SynergyError::from)?)
}

fn show(session: &Session, page: Option<i64>) -> Result<Output, CliError> {
    let pages = match page {
        Some(number) => vec![page_id(number)?],
        None => PageId::all().collect(),
    };
    let pages = pages
        .into_iter()
        .map(|page| {
            let view = session.page(page);
            PageView {
                page,
                levels: view.levels(),
                points: view.points(),
                bonuses: view.rows().iter().map(synergy_engine::SynergyRow::current_bonus).collect(),
            }
        })
        .collect();
    Ok(Output::State(StateView {
        multipliers: session.multipliers(),
        total_units: session.total_units(),
        pages,
    }))
}

fn optimize(
    session: &Session,
    strategy: StrategyArg,
    page: i64,
    row: Option<i64>,
    hours: Option<u32>,
) -> Result<Output, CliError> {
    let page = page_id(page)?;
    let strategy = strategy.resolve(row)?;
    let result = session.optimize(page, strategy);
    let projection = session.project(&result, hours);
    info!(
        page = %page,
        strategy = strategy.label(),
        units_used = result.units_used(),
        energy_rate = result.energy_rate,
        "optimization finished"
    );
    Ok(Output::Optimized(Box::new(OptimizedView { result, projection })))
}

fn save(session: &mut Session, store: &SettingsStore) -> Result<Output, CliError> {
    store.save(&session.to_persisted())?;
    Ok(Output::Events(session.drain_events()))
}
