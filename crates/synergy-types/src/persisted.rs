//! The persisted settings record.
//!
//! Field names follow the settings file written by earlier releases of the
//! tool (`"page 1 levels"`, `"total bd"`, `"inputs dict"`, ...) so existing
//! files keep loading. Values are kept in their widest signed form here;
//! range checks happen when the engine loads the record, not during
//! deserialization, so a bad value is reported as an input error rather than
//! a parse error.

use serde::{Deserialize, Serialize};

use crate::ids::{PageId, ROWS_PER_PAGE};

/// Pool size of a fresh session and a fresh settings record.
pub const DEFAULT_TOTAL_UNITS: u64 = 40;

/// Full optimizer state as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    /// Row levels on page 1, rows 1 to 7.
    #[serde(rename = "page 1 levels", default = "default_levels")]
    pub page_1_levels: Vec<i64>,
    /// Row levels on page 2, rows 1 to 7.
    #[serde(rename = "page 2 levels", default = "default_levels")]
    pub page_2_levels: Vec<i64>,
    /// Row levels on page 3, rows 1 to 7.
    #[serde(rename = "page 3 levels", default = "default_levels")]
    pub page_3_levels: Vec<i64>,
    /// Row points on page 1, rows 1 to 7.
    #[serde(rename = "page 1 points", default = "default_points")]
    pub page_1_points: Vec<f64>,
    /// Row points on page 2, rows 1 to 7.
    #[serde(rename = "page 2 points", default = "default_points")]
    pub page_2_points: Vec<f64>,
    /// Row points on page 3, rows 1 to 7.
    #[serde(rename = "page 3 points", default = "default_points")]
    pub page_3_points: Vec<f64>,
    /// Size of the resource unit pool.
    #[serde(rename = "total bd", default = "default_total_units")]
    pub total_units: i64,
    /// Multiplier modifiers.
    #[serde(rename = "inputs dict", default)]
    pub inputs: PersistedInputs,
}

impl PersistedState {
    /// Levels stored for `page`.
    pub fn levels(&self, page: PageId) -> &[i64] {
        match page.number() {
            1 => &self.page_1_levels,
            2 => &self.page_2_levels,
            _ => &self.page_3_levels,
        }
    }

    /// Points stored for `page`.
    pub fn points(&self, page: PageId) -> &[f64] {
        match page.number() {
            1 => &self.page_1_points,
            2 => &self.page_2_points,
            _ => &self.page_3_points,
        }
    }

    /// Replace the levels and points stored for `page`.
    pub fn set_page(&mut self, page: PageId, levels: Vec<i64>, points: Vec<f64>) {
        let (level_slot, point_slot) = match page.number() {
            1 => (&mut self.page_1_levels, &mut self.page_1_points),
            2 => (&mut self.page_2_levels, &mut self.page_2_points),
            _ => (&mut self.page_3_levels, &mut self.page_3_points),
        };
        *level_slot = levels;
        *point_slot = points;
    }
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            page_1_levels: default_levels(),
            page_2_levels: default_levels(),
            page_3_levels: default_levels(),
            page_1_points: default_points(),
            page_2_points: default_points(),
            page_3_points: default_points(),
            total_units: default_total_units(),
            inputs: PersistedInputs::default(),
        }
    }
}

/// The modifier mapping inside the settings record.
///
/// Absent booleans load as `false` and absent numbers as zero. An absent
/// `max_stage` stays `None` so the loader can apply its configured default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct PersistedInputs {
    /// A synergy potion is active.
    #[serde(rename = "Active Syn Pot", default)]
    pub syn_pot_active: bool,
    /// The newb progress trophy is owned.
    #[serde(rename = "Newb Progress Trophy", default)]
    pub newb_progress_trophy: bool,
    /// The pro progress trophy is owned.
    #[serde(rename = "Pro Progress Trophy", default)]
    pub pro_progress_trophy: bool,
    /// The newb power trophy is owned.
    #[serde(rename = "Newb Power Trophy", default)]
    pub newb_power_trophy: bool,
    /// The pro power trophy is owned.
    #[serde(rename = "Pro Power Trophy", default)]
    pub pro_power_trophy: bool,
    /// The soul power purchase is owned.
    #[serde(rename = "Soul Power Purchase", default)]
    pub soul_power_purchase: bool,
    /// Synergy power from adventure items, in percent.
    #[serde(rename = "Adventure Power %", default)]
    pub adventure_power_pct: f64,
    /// Page 3 synergy power perk level.
    #[serde(rename = "Syn Power Perks Level", default)]
    pub perk_level: i64,
    /// Highest adventure stage reached.
    #[serde(rename = "Max Stage", default, skip_serializing_if = "Option::is_none")]
    pub max_stage: Option<i64>,
    /// Pomos synergy power levels.
    #[serde(rename = "Pomos Power Levels", default)]
    pub pomos_levels: i64,
    /// The newb energy trophy is owned.
    #[serde(rename = "Newb Energy Trophy", default)]
    pub newb_energy_trophy: bool,
    /// The pro energy trophy is owned.
    #[serde(rename = "Pro Energy Trophy", default)]
    pub pro_energy_trophy: bool,
    /// Synergy energy from adventure items, in percent.
    #[serde(rename = "Adventure Energy %", default)]
    pub adventure_energy_pct: f64,
}

fn default_levels() -> Vec<i64> {
    vec![1; ROWS_PER_PAGE]
}

fn default_points() -> Vec<f64> {
    vec![0.0; ROWS_PER_PAGE]
}

fn default_total_units() -> i64 {
    i64::try_from(DEFAULT_TOTAL_UNITS).unwrap_or(i64::MAX)
}
