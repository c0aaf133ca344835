//! Fixed game tables for every page and row.
//!
//! All tables are indexed by the 0-based page and row positions from
//! [`PageId::index`] and [`RowId::index`]. Because both identifiers are
//! range-checked on construction, lookups here cannot go out of bounds.

use synergy_types::{PAGE_COUNT, PageId, ROWS_PER_PAGE, RowId};

/// Progress needed to fill each row at level 1.
const BASE_PROGRESS: [[f64; ROWS_PER_PAGE]; PAGE_COUNT] = [
    [10_000.0, 20_000.0, 35_000.0, 55_000.0, 80_000.0, 110_000.0, 150_000.0],
    [20_000.0, 40_000.0, 70_000.0, 110_000.0, 160_000.0, 220_000.0, 300_000.0],
    [50_000.0, 100_000.0, 175_000.0, 280_000.0, 400_000.0, 550_000.0, 750_000.0],
];

/// Divisor applied to each row's bonus curve. Later pages and rows scale
/// worse.
const BONUS_DIVISORS: [[f64; ROWS_PER_PAGE]; PAGE_COUNT] = [
    [1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 2.0],
    [1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 2.0],
    [1.0, 2.0, 2.0, 2.0, 2.0, 4.0, 4.0],
];

/// Points multiple needed to double a row's bonus above 1000 points.
const LOG_SCALING: [f64; ROWS_PER_PAGE] = [6.0, 5.6, 5.2, 4.8, 4.4, 4.0, 3.5];

/// In-game row names.
const ROW_NAMES: [[&str; ROWS_PER_PAGE]; PAGE_COUNT] = [
    [
        "Off/def",
        "Meditation",
        "DE",
        "Perks",
        "Demon Bonus",
        "Essence",
        "Conjuring",
    ],
    [
        "Gold",
        "Mana Power",
        "Mana Refill",
        "Reincarnation Bonus",
        "Slime Attack",
        "Dungeon Bonus",
        "Generator Bonus",
    ],
    [
        "EXP",
        "Dungeon Damage",
        "Mana Cap Rate",
        "Class EXP",
        "Slime EXP",
        "Slime Bonus",
        "Alchemy Bonus",
    ],
];

/// Bonus curve switches from linear to logarithmic above this many points.
pub const BONUS_LINEAR_LIMIT: f64 = 1000.0;

/// A row is speed capped once it would fill in fewer than this many ticks.
pub const SPEED_CAP_TICKS: f64 = 10.0;

/// Progress requirement drops by this much per level above 1.
pub const REQUIREMENT_STEP_PER_LEVEL: f64 = 10.0;

/// Lookup for the base progress of a row.
#[allow(clippy::indexing_slicing)]
pub fn base_progress(page: PageId, row: RowId) -> f64 {
    BASE_PROGRESS[page.index()][row.index()]
}

/// Lookup for the bonus divisor of a row.
#[allow(clippy::indexing_slicing)]
pub fn bonus_divisor(page: PageId, row: RowId) -> f64 {
    BONUS_DIVISORS[page.index()][row.index()]
}

/// Lookup for the logarithmic scaling base of a row.
#[allow(clippy::indexing_slicing)]
pub fn log_scaling(row: RowId) -> f64 {
    LOG_SCALING[row.index()]
}

/// Lookup for a row's in-game name.
#[allow(clippy::indexing_slicing)]
pub fn row_name(page: PageId, row: RowId) -> &'static str {
    ROW_NAMES[page.index()][row.index()]
}

/// Synergy energy granted each time `row` fills: the triangular number of
/// its row number.
pub fn energy_per_fill(row: RowId) -> f64 {
    let n = f64::from(row.number());
    n * (n + 1.0) / 2.0
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn energy_per_fill_is_triangular() {
        let values: Vec<f64> = RowId::all().map(energy_per_fill).collect();
        assert_eq!(values, vec![1.0, 3.0, 6.0, 10.0, 15.0, 21.0, 28.0]);
    }

    #[test]
    fn tables_cover_every_page_and_row() {
        for page in PageId::all() {
            for row in RowId::all() {
                assert!(base_progress(page, row) > 0.0);
                assert!(bonus_divisor(page, row) >= 1.0);
                assert!(!row_name(page, row).is_empty());
            }
        }
    }

    #[test]
    fn last_page_is_the_most_expensive() {
        let row = RowId::LAST;
        let page_1 = base_progress(PageId::new(1).unwrap(), row);
        let page_3 = base_progress(PageId::new(3).unwrap(), row);
        assert!(page_3 > page_1);
        assert!((log_scaling(row) - 3.5).abs() < f64::EPSILON);
    }
}
