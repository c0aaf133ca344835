//! Integration tests for the allocation strategies, driven through the
//! public [`Session`] surface.

#![allow(
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::missing_panics_doc,
    clippy::arithmetic_side_effects
)]

use synergy_engine::multiplier::potion_bonus;
use synergy_engine::{EngineConfig, ModifierChange, Session, SynergyError};
use synergy_types::{PageId, PersistedState, RowId, Strategy, Termination};

// =============================================================================
// Helpers
// =============================================================================

fn session_with(units: i64) -> Session {
    let mut session = Session::new(EngineConfig::default()).unwrap();
    session.set_total_units(units).unwrap();
    session
}

/// A mid-game page 1: levels drop the requirements, some points banked.
fn mid_game_session(units: i64) -> Session {
    let mut state = PersistedState::default();
    state.page_1_levels = vec![120, 90, 70, 50, 30, 12, 4];
    state.page_1_points = vec![8_000.0, 4_000.0, 2_500.0, 1_200.0, 600.0, 100.0, 5.0];
    state.total_units = units;
    state.inputs.syn_pot_active = true;
    state.inputs.pro_progress_trophy = true;
    state.inputs.newb_power_trophy = true;
    state.inputs.perk_level = 3;
    Session::from_persisted(&state, EngineConfig::default()).unwrap()
}

fn all_strategies() -> Vec<Strategy> {
    let mut strategies = vec![
        Strategy::SeeMaximization,
        Strategy::SeeMinTick,
        Strategy::MaximizeEnergy,
    ];
    for row in RowId::all() {
        strategies.push(Strategy::MaximizeRow { row });
        strategies.push(Strategy::FlatUpToRow { row });
        strategies.push(Strategy::MinTickFlatBelow { row });
    }
    strategies
}

// =============================================================================
// Worked examples
// =============================================================================

#[test]
fn forty_units_on_row_one_of_page_one() {
    let session = session_with(40);
    let tick = session.row_gains(PageId::new(1).unwrap(), RowId::FIRST, 40);
    assert!((tick.gain - 0.004).abs() < 1e-12);
    assert!((tick.consume - 0.008).abs() < 1e-12);
    assert!(!tick.speed_capped);
    assert_eq!(tick.overcap, 0);
}

#[test]
fn potion_bonus_examples() {
    assert!((potion_bonus(400) - 1.5).abs() < 1e-12);
    assert!((potion_bonus(500) - 1.6).abs() < 1e-12);
}

#[test]
fn out_of_range_indices_are_rejected() {
    fn lookup(page: i64, row: i64) -> Result<(PageId, RowId), SynergyError> {
        Ok((PageId::new(page)?, RowId::new(row)?))
    }
    assert!(matches!(lookup(0, 1), Err(SynergyError::InvalidIndex { .. })));
    assert!(matches!(lookup(1, 8), Err(SynergyError::InvalidIndex { .. })));
    assert!(lookup(3, 7).is_ok());
}

// =============================================================================
// Strategy properties
// =============================================================================

#[test]
fn maximize_is_a_fixed_point_of_itself() {
    for session in [session_with(40), session_with(2_500), mid_game_session(5_000)] {
        for page in PageId::all() {
            for row in RowId::all() {
                let optimizer = session.optimizer(page);
                let first = optimizer.maximize_search(row);
                assert!(first.termination.is_converged());
                let again = optimizer.maximize_from(first.allocation.clone());
                assert_eq!(again.allocation, first.allocation);
                assert_eq!(again.iterations, 0);
            }
        }
    }
}

#[test]
fn maximize_keeps_every_unit_and_leaves_no_deficit() {
    let session = mid_game_session(5_000);
    let page = PageId::new(1).unwrap();
    for row in RowId::all() {
        let result = session.optimize(page, Strategy::MaximizeRow { row });
        assert_eq!(result.units_used(), 5_000);
        assert_eq!(result.allocation.len(), usize::from(row.number()));
        assert!(result.gains.iter().all(|gain| *gain >= 0.0));
        assert!(result.energy_rate >= 0.0);
    }
}

#[test]
fn flat_never_exceeds_the_pool() {
    for session in [session_with(0), session_with(7), session_with(1_000), mid_game_session(20_000)] {
        for page in PageId::all() {
            for row in RowId::all() {
                let result = session.optimize(page, Strategy::FlatUpToRow { row });
                assert!(result.units_used() <= session.total_units());
                assert_eq!(result.allocation.len(), usize::from(row.number()));
            }
        }
    }
}

#[test]
fn energy_with_an_empty_pool_is_zero() {
    let session = session_with(0);
    for page in PageId::all() {
        let result = session.optimize(page, Strategy::MaximizeEnergy);
        assert_eq!(result.allocation, vec![0; 7]);
        assert!(result.energy_rate.abs() < f64::EPSILON);
    }
}

#[test]
fn energy_trophies_raise_the_energy_rate() {
    let mut session = session_with(1_000);
    let page = PageId::new(2).unwrap();
    let before = session.optimize(page, Strategy::MaximizeEnergy);
    session
        .set_modifier(ModifierChange::ProEnergyTrophy(true))
        .unwrap();
    let after = session.optimize(page, Strategy::MaximizeEnergy);
    assert_eq!(before.allocation, after.allocation);
    assert!((after.energy_rate - before.energy_rate * 1.7).abs() < 1e-12);
}

#[test]
fn every_strategy_stays_within_its_iteration_cap() {
    let session = mid_game_session(3_000);
    let config = EngineConfig::default();
    let loose_cap = config
        .optimizer
        .maximize_iteration_factor
        .max(config.optimizer.flat_iteration_factor)
        * 3_000
        * 7;
    for page in PageId::all() {
        for strategy in all_strategies() {
            let result = session.optimize(page, strategy);
            assert_eq!(result.strategy, strategy);
            assert_eq!(result.page, page);
            assert_eq!(result.allocation.len(), result.gains.len());
            assert!(result.iterations <= loose_cap);
        }
    }
}

#[test]
fn a_zero_iteration_budget_returns_the_starting_allocation() {
    let mut config = EngineConfig::default();
    config.optimizer.maximize_iteration_factor = 0;
    config.optimizer.flat_iteration_factor = 0;
    let mut session = Session::new(config).unwrap();
    session.set_total_units(1_000).unwrap();
    let page = PageId::new(1).unwrap();
    let row = RowId::new(4).unwrap();

    for strategy in [Strategy::MaximizeRow { row }, Strategy::FlatUpToRow { row }] {
        let result = session.optimize(page, strategy);
        assert_eq!(result.termination, Termination::IterationCap);
        assert!(!result.termination.is_converged());
        assert_eq!(result.iterations, 0);
        assert_eq!(result.allocation, vec![0, 0, 0, 1_000]);
        assert_eq!(result.gains.len(), 4);
    }
}

#[test]
fn flat_with_a_stuck_unit_stagnates_on_the_last_good_allocation() {
    let session = session_with(1);
    let page = PageId::new(1).unwrap();
    let row = RowId::new(3).unwrap();
    let result = session.optimize(page, Strategy::FlatUpToRow { row });
    assert_eq!(result.termination, Termination::Stagnated);
    assert_eq!(result.allocation, vec![1, 0, 0]);
    assert_eq!(result.units_used(), 1);
}

#[test]
fn projection_covers_every_allocated_row() {
    let session = mid_game_session(5_000);
    let page = PageId::new(1).unwrap();
    let result = session.optimize(page, Strategy::FlatUpToRow { row: RowId::new(5).unwrap() });
    let projection = session.project(&result, Some(8));
    assert_eq!(projection.hours, 8);
    assert_eq!(projection.rows.len(), 5);
    for (row, projected) in projection.rows.iter().enumerate() {
        assert_eq!(projected.units, result.allocation[row]);
        assert!(projected.final_points >= 0.0);
    }
}
