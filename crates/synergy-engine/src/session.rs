//! The owned optimizer session: three pages, the unit pool, the modifier set
//! and its cached multipliers.
//!
//! All mutation goes through the setters here. Each setter validates its
//! input before touching state, updates the cached multipliers when a
//! modifier changes, and queues the resulting [`SessionEvent`]s. Optimizer
//! calls borrow the session immutably and copy the multipliers and pool size
//! at entry.

use synergy_types::persisted::PersistedInputs;
use synergy_types::{
    Modifiers, Multipliers, OptimizationResult, PAGE_COUNT, PageId, PersistedState, Projection,
    RowId, Strategy,
};
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::error::{SynergyError, non_negative_count, non_negative_real};
use crate::events::{MultiplierKind, SessionEvent};
use crate::multiplier::{self, ModifierChange};
use crate::optimizer::Optimizer;
use crate::page::{PageTick, SynergyPage};
use crate::projection;
use crate::row::{RowTick, SynergyRow};

/// Complete optimizer state.
#[derive(Debug, Clone)]
pub struct Session {
    pages: [SynergyPage; PAGE_COUNT],
    total_units: u64,
    modifiers: Modifiers,
    multipliers: Multipliers,
    config: EngineConfig,
    events: Vec<SessionEvent>,
}

impl Session {
    /// A fresh session: level 1 rows with no points, the configured default
    /// pool and max stage, and no other modifiers.
    pub fn new(config: EngineConfig) -> Result<Self, SynergyError> {
        let modifiers = Modifiers {
            max_stage: config.defaults.max_stage,
            ..Modifiers::default()
        };
        let pages = build_pages(SynergyPage::fresh)?;
        Ok(Self {
            pages,
            total_units: config.defaults.total_units,
            multipliers: multiplier::compute(&modifiers, &config.multipliers),
            modifiers,
            config,
            events: Vec::new(),
        })
    }

    /// A session restored from a settings record.
    pub fn from_persisted(state: &PersistedState, config: EngineConfig) -> Result<Self, SynergyError> {
        let mut session = Self::new(config)?;
        session.load_persisted(state)?;
        session.events.clear();
        Ok(session)
    }

    /// Replace all rows, the pool and the modifiers with `state`.
    ///
    /// The whole record is validated first; on error the session is left
    /// unchanged. On success every row, the pool and any multiplier that
    /// moved queue their events.
    pub fn load_persisted(&mut self, state: &PersistedState) -> Result<(), SynergyError> {
        let pages = build_pages(|page| {
            let levels = state
                .levels(page)
                .iter()
                .map(|&level| non_negative_count("level", level))
                .collect::<Result<Vec<_>, _>>()?;
            SynergyPage::new(page, &levels, state.points(page))
        })?;
        let total_units = non_negative_count("total units", state.total_units)?;
        let modifiers = self.modifiers_from(&state.inputs)?;

        self.pages = pages;
        for page in &self.pages {
            for row in page.rows() {
                self.events.extend(row_events(row));
            }
        }
        self.total_units = total_units;
        self.events
            .push(SessionEvent::TotalUnitsChanged { units: total_units });
        self.modifiers = modifiers;
        for kind in [
            MultiplierKind::Progress,
            MultiplierKind::Power,
            MultiplierKind::Energy,
        ] {
            self.refresh_multiplier(kind);
        }

        info!(
            total_units,
            max_stage = self.modifiers.max_stage,
            "session loaded"
        );
        Ok(())
    }

    /// The session as a settings record.
    pub fn to_persisted(&self) -> PersistedState {
        let mut state = PersistedState {
            total_units: i64::try_from(self.total_units).unwrap_or(i64::MAX),
            inputs: inputs_from(&self.modifiers),
            ..PersistedState::default()
        };
        for page in &self.pages {
            let levels = page
                .levels()
                .into_iter()
                .map(|level| i64::try_from(level).unwrap_or(i64::MAX))
                .collect();
            state.set_page(page.id(), levels, page.points());
        }
        state
    }

    // -----------------------------------------------------------------------
    // Setters
    // -----------------------------------------------------------------------

    /// Set one row's level.
    pub fn set_level(&mut self, page: PageId, row: RowId, level: i64) -> Result<(), SynergyError> {
        let level = non_negative_count("level", level)?;
        let event = self.page_mut(page).row_mut(row).set_level(level);
        debug!(page = %page, row = %row, level, "level set");
        self.events.push(event);
        Ok(())
    }

    /// Set one row's current points.
    pub fn set_points(&mut self, page: PageId, row: RowId, points: f64) -> Result<(), SynergyError> {
        let events = self.page_mut(page).row_mut(row).set_current_points(points)?;
        debug!(page = %page, row = %row, points, "points set");
        self.events.extend(events);
        Ok(())
    }

    /// Resize the unit pool.
    pub fn set_total_units(&mut self, units: i64) -> Result<(), SynergyError> {
        let units = non_negative_count("total units", units)?;
        self.total_units = units;
        self.events.push(SessionEvent::TotalUnitsChanged { units });
        Ok(())
    }

    /// Apply one modifier change and refresh the multipliers it feeds.
    pub fn set_modifier(&mut self, change: ModifierChange) -> Result<(), SynergyError> {
        let change = change.validated()?;
        change.apply(&mut self.modifiers);
        for kind in change.affects() {
            self.refresh_multiplier(*kind);
        }
        Ok(())
    }

    /// Take every event queued since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// One page.
    #[allow(clippy::indexing_slicing)]
    pub fn page(&self, page: PageId) -> &SynergyPage {
        &self.pages[page.index()]
    }

    /// One row.
    pub fn row(&self, page: PageId, row: RowId) -> &SynergyRow {
        self.page(page).row(row)
    }

    /// Size of the unit pool.
    pub const fn total_units(&self) -> u64 {
        self.total_units
    }

    /// Current modifiers.
    pub const fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }

    /// Cached multipliers.
    pub const fn multipliers(&self) -> Multipliers {
        self.multipliers
    }

    /// The configuration this session runs with.
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// One row's un-chained throughput with `units` assigned.
    pub fn row_gains(&self, page: PageId, row: RowId, units: u64) -> RowTick {
        self.row(page, row)
            .gains_per_tick(units, self.multipliers.progress, self.multipliers.power)
    }

    /// Chained throughput of a page under `allocation`.
    pub fn page_gains(&self, page: PageId, allocation: &[u64]) -> PageTick {
        self.page(page)
            .all_gains_per_tick(allocation, &self.multipliers)
    }

    /// Synergy energy per tick of a page under `allocation`, energy
    /// multiplier applied.
    pub fn page_energy(&self, page: PageId, allocation: &[u64]) -> f64 {
        self.page(page)
            .all_energy_per_tick(allocation, self.multipliers.progress)
            .total
            * self.multipliers.energy
    }

    /// One row's current bonus.
    pub fn bonus(&self, page: PageId, row: RowId) -> f64 {
        self.row(page, row).current_bonus()
    }

    // -----------------------------------------------------------------------
    // Optimization
    // -----------------------------------------------------------------------

    /// An optimizer over `page` with the current multipliers and pool.
    pub fn optimizer(&self, page: PageId) -> Optimizer<'_> {
        Optimizer::new(
            self.page(page),
            self.multipliers,
            self.total_units,
            &self.config.optimizer,
        )
    }

    /// Run `strategy` on `page`.
    pub fn optimize(&self, page: PageId, strategy: Strategy) -> OptimizationResult {
        self.optimizer(page).run(strategy)
    }

    /// Project `result` over `hours`, or the configured default.
    pub fn project(&self, result: &OptimizationResult, hours: Option<u32>) -> Projection {
        let hours = hours.unwrap_or(self.config.display.hours);
        projection::project(self.page(result.page), result, hours, &self.config.display)
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    #[allow(clippy::indexing_slicing)]
    fn page_mut(&mut self, page: PageId) -> &mut SynergyPage {
        &mut self.pages[page.index()]
    }

    /// Recompute one multiplier; queue an event only if its value moved.
    fn refresh_multiplier(&mut self, kind: MultiplierKind) {
        let (slot, value) = match kind {
            MultiplierKind::Progress => (
                &mut self.multipliers.progress,
                multiplier::progress_multiplier(&self.modifiers),
            ),
            MultiplierKind::Power => (
                &mut self.multipliers.power,
                multiplier::power_multiplier(&self.modifiers, &self.config.multipliers),
            ),
            MultiplierKind::Energy => (
                &mut self.multipliers.energy,
                multiplier::energy_multiplier(&self.modifiers),
            ),
        };
        if slot.to_bits() != value.to_bits() {
            *slot = value;
            debug!(%kind, value, "multiplier changed");
            self.events
                .push(SessionEvent::MultiplierChanged { kind, value });
        }
    }

    fn modifiers_from(&self, inputs: &PersistedInputs) -> Result<Modifiers, SynergyError> {
        let max_stage = match inputs.max_stage {
            Some(stage) => i32::try_from(stage).map_err(|e| {
                SynergyError::invalid("max stage", format!("{stage} ({e})"))
            })?,
            None => self.config.defaults.max_stage,
        };
        Ok(Modifiers {
            syn_pot_active: inputs.syn_pot_active,
            newb_progress_trophy: inputs.newb_progress_trophy,
            pro_progress_trophy: inputs.pro_progress_trophy,
            newb_power_trophy: inputs.newb_power_trophy,
            pro_power_trophy: inputs.pro_power_trophy,
            soul_power_purchase: inputs.soul_power_purchase,
            adventure_power_pct: non_negative_real("adventure power %", inputs.adventure_power_pct)?,
            perk_level: small_count("perk level", inputs.perk_level)?,
            pomos_levels: small_count("pomos levels", inputs.pomos_levels)?,
            max_stage,
            newb_energy_trophy: inputs.newb_energy_trophy,
            pro_energy_trophy: inputs.pro_energy_trophy,
            adventure_energy_pct: non_negative_real(
                "adventure energy %",
                inputs.adventure_energy_pct,
            )?,
        })
    }
}

/// Build all three pages, stopping at the first failure.
fn build_pages<F>(mut build: F) -> Result<[SynergyPage; PAGE_COUNT], SynergyError>
where
    F: FnMut(PageId) -> Result<SynergyPage, SynergyError>,
{
    let pages = PageId::all().map(&mut build).collect::<Result<Vec<_>, _>>()?;
    <[SynergyPage; PAGE_COUNT]>::try_from(pages)
        .map_err(|pages| SynergyError::invalid("pages", format!("built {} pages", pages.len())))
}

fn row_events(row: &SynergyRow) -> [SessionEvent; 3] {
    [
        SessionEvent::LevelChanged {
            page: row.page(),
            row: row.row(),
            level: row.level(),
        },
        SessionEvent::PointsChanged {
            page: row.page(),
            row: row.row(),
            points: row.current_points(),
        },
        SessionEvent::BonusChanged {
            page: row.page(),
            row: row.row(),
            bonus: row.current_bonus(),
        },
    ]
}

fn small_count(field: &'static str, value: i64) -> Result<u32, SynergyError> {
    let value = non_negative_count(field, value)?;
    u32::try_from(value).map_err(|e| SynergyError::invalid(field, format!("{value} ({e})")))
}

fn inputs_from(modifiers: &Modifiers) -> PersistedInputs {
    PersistedInputs {
        syn_pot_active: modifiers.syn_pot_active,
        newb_progress_trophy: modifiers.newb_progress_trophy,
        pro_progress_trophy: modifiers.pro_progress_trophy,
        newb_power_trophy: modifiers.newb_power_trophy,
        pro_power_trophy: modifiers.pro_power_trophy,
        soul_power_purchase: modifiers.soul_power_purchase,
        adventure_power_pct: modifiers.adventure_power_pct,
        perk_level: i64::from(modifiers.perk_level),
        max_stage: Some(i64::from(modifiers.max_stage)),
        pomos_levels: i64::from(modifiers.pomos_levels),
        newb_energy_trophy: modifiers.newb_energy_trophy,
        pro_energy_trophy: modifiers.pro_energy_trophy,
        adventure_energy_pct: modifiers.adventure_energy_pct,
    }
}
