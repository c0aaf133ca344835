//! Plain-text rendering of session state and optimizer results.

use synergy_engine::{Session, SessionEvent};
use synergy_types::{OptimizationResult, PageId, Projection};

/// Format a number the way the tables show it: scientific above a
/// million, one decimal above a hundred, three decimals otherwise.
pub fn number(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude > 1e6 {
        format!("{value:.2e}")
    } else if magnitude > 100.0 {
        format!("{value:.1}")
    } else {
        format!("{value:.3}")
    }
}

/// Multipliers, unit pool and the rows of each page in `pages`.
pub fn state(session: &Session, pages: &[PageId]) -> String {
    let multipliers = session.multipliers();
    let mut lines = vec![
        format!(
            "multipliers  progress {}  power {}  energy {}",
            number(multipliers.progress),
            number(multipliers.power),
            number(multipliers.energy)
        ),
        format!("total units  {}", session.total_units()),
    ];
    for &page in pages {
        lines.push(String::new());
        lines.push(format!("page {page}"));
        lines.push(format!(
            "  {:<4} {:<14} {:>6} {:>12} {:>12} {:>10}",
            "row", "name", "level", "points", "required", "bonus"
        ));
        for row in session.page(page).rows() {
            lines.push(format!(
                "  {:<4} {:<14} {:>6} {:>12} {:>12} {:>10}",
                row.row().number(),
                row.name(),
                row.level(),
                number(row.current_points()),
                number(row.requirement()),
                number(row.current_bonus())
            ));
        }
    }
    lines.join("\n")
}

/// An optimizer result with its projection.
pub fn result(result: &OptimizationResult, projection: &Projection) -> String {
    let mut lines = vec![
        format!("page {}: {}", result.page, result.strategy.label()),
        format!(
            "  {:<14} {:>6} {:>12} {:>12} {:>12} {:>10} {:>8}",
            "row", "units", "gain/tick", "gain/hour", "final", "bonus", "x"
        ),
    ];
    for (index, row) in projection.rows.iter().enumerate() {
        let gain = result.gains.get(index).copied().unwrap_or_default();
        lines.push(format!(
            "  {:<14} {:>6} {:>12} {:>12} {:>12} {:>10} {:>8}",
            row.name,
            row.units,
            number(gain),
            number(row.gain_per_hour),
            number(row.final_points),
            number(row.final_bonus),
            number(row.relative_gain)
        ));
    }
    lines.push(format!(
        "units used {}  energy/tick {}  energy over {}h {}",
        result.units_used(),
        number(result.energy_rate),
        projection.hours,
        number(projection.total_energy)
    ));
    if !result.termination.is_converged() {
        lines.push(format!(
            "warning: stopped early ({:?}) after {} iterations",
            result.termination, result.iterations
        ));
    }
    lines.join("\n")
}

/// One line per change event.
pub fn event(event: &SessionEvent) -> String {
    match event {
        SessionEvent::LevelChanged { page, row, level } => {
            format!("page {page} row {row}: level {level}")
        }
        SessionEvent::PointsChanged { page, row, points } => {
            format!("page {page} row {row}: points {}", number(*points))
        }
        SessionEvent::BonusChanged { page, row, bonus } => {
            format!("page {page} row {row}: bonus {}", number(*bonus))
        }
        SessionEvent::MultiplierChanged { kind, value } => {
            format!("{kind} multiplier: {}", number(*value))
        }
        SessionEvent::TotalUnitsChanged { units } => format!("total units: {units}"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use synergy_engine::{EngineConfig, MultiplierKind};
    use synergy_types::RowId;

    use super::*;

    #[test]
    fn number_picks_precision_by_magnitude() {
        assert_eq!(number(0.5), "0.500");
        assert_eq!(number(250.04), "250.0");
        assert_eq!(number(2_500_000.0), "2.50e6");
        assert_eq!(number(-2_500_000.0), "-2.50e6");
    }

    #[test]
    fn state_lists_every_row_of_each_page() {
        let session = Session::new(EngineConfig::default()).unwrap();
        let text = state(&session, &[PageId::new(1).unwrap()]);
        assert!(text.contains("page 1"));
        assert!(text.contains("total units  40"));
        assert_eq!(text.lines().count(), 2 + 3 + 7);
    }

    #[test]
    fn events_render_one_line_each() {
        let line = event(&SessionEvent::MultiplierChanged {
            kind: MultiplierKind::Power,
            value: 1.5,
        });
        assert_eq!(line, "power multiplier: 1.500");

        let line = event(&SessionEvent::LevelChanged {
            page: PageId::new(2).unwrap(),
            row: RowId::new(4).unwrap(),
            level: 9,
        });
        assert_eq!(line, "page 2 row 4: level 9");
    }

    #[test]
    fn result_warns_when_not_converged() {
        let session = Session::new(EngineConfig::default()).unwrap();
        let page = PageId::new(1).unwrap();
        let mut outcome = session.optimize(page, synergy_types::Strategy::MaximizeEnergy);
        let projection = session.project(&outcome, Some(1));
        assert!(!result(&outcome, &projection).contains("warning"));

        outcome.termination = synergy_types::Termination::IterationCap;
        assert!(result(&outcome, &projection).contains("IterationCap"));
    }
}
