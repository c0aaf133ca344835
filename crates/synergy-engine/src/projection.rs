//! Projects an optimizer result forward in time.
//!
//! Per-tick rates are converted with the configured ticks per hour and
//! applied to each row's current points.

use synergy_types::{OptimizationResult, Projection, RowProjection};

use crate::config::DisplayConfig;
use crate::numeric::units_to_f64;
use crate::page::SynergyPage;

/// Project `result` over `hours` on `page`.
///
/// Rows whose net gain is negative lose points; projected points never go
/// below zero.
pub fn project(
    page: &SynergyPage,
    result: &OptimizationResult,
    hours: u32,
    display: &DisplayConfig,
) -> Projection {
    let ticks_per_hour = units_to_f64(display.ticks_per_hour);
    let hours_f = f64::from(hours);

    let rows = page
        .rows()
        .iter()
        .zip(result.allocation.iter().zip(&result.gains))
        .map(|(row, (&units, &gain))| {
            let gain_per_hour = gain * ticks_per_hour;
            let final_points = gain_per_hour
                .mul_add(hours_f, row.current_points())
                .max(0.0);
            let final_bonus = row.bonus_at(final_points);
            RowProjection {
                name: row.name().to_owned(),
                units,
                gain_per_hour,
                final_points,
                final_bonus,
                relative_gain: final_bonus / row.current_bonus(),
            }
        })
        .collect();

    Projection {
        hours,
        rows,
        total_energy: result.energy_rate * ticks_per_hour * hours_f,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use synergy_types::{PageId, RowId, Strategy, Termination};

    use super::*;

    #[test]
    fn projects_points_bonus_and_energy() {
        let page = SynergyPage::new(
            PageId::new(1).unwrap(),
            &[1; 7],
            &[500.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        )
        .unwrap();
        let result = OptimizationResult {
            strategy: Strategy::MaximizeRow { row: RowId::new(2).unwrap() },
            page: page.id(),
            allocation: vec![30, 10],
            gains: vec![0.001, -0.001],
            energy_rate: 0.002,
            termination: Termination::Converged,
            iterations: 3,
        };
        let projection = project(&page, &result, 10, &DisplayConfig::default());

        assert_eq!(projection.rows.len(), 2);
        let first = &projection.rows[0];
        assert_eq!(first.name, "Off/def");
        assert!((first.gain_per_hour - 36.0).abs() < 1e-9);
        assert!((first.final_points - 860.0).abs() < 1e-9);
        assert!((first.final_bonus - 1.86).abs() < 1e-9);
        assert!((first.relative_gain - 1.86 / 1.5).abs() < 1e-9);

        // Negative gains cannot drain below zero points.
        assert!(projection.rows[1].final_points.abs() < f64::EPSILON);
        assert!((projection.total_energy - 720.0).abs() < 1e-9);
    }
}
