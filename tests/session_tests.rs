//! Session tests - the state machine through its public request surface
//!
//! Monominoes and dominoes come out of the generator in a single orientation,
//! which makes small boards fully predictable.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use polyominomania::core::{build_catalog, Catalogs, ConfigError, Session};
use polyominomania::types::{
    ActionOutcome, ColorScheme, GameAction, GameConfig, PolyominoConfig, SupplyStrategy,
    GHOST_ALPHA,
};

fn small_config(size: u8, width: u16, height: u16) -> GameConfig {
    let mut config = GameConfig::classic();
    config.polyominoes.clear();
    config.polyominoes.insert(
        size,
        PolyominoConfig {
            next_piece: SupplyStrategy::JustInTime,
            chance: 1,
            colors: ColorScheme::Original,
        },
    );
    config.width = width;
    config.height = height;
    config
}

fn classic_catalogs() -> Catalogs {
    let mut rng = StdRng::seed_from_u64(4);
    let mut catalogs = Catalogs::new();
    catalogs.insert(4, Arc::new(build_catalog(4, &mut rng).unwrap()));
    catalogs
}

#[test]
fn test_piece_at_column_zero_locks_on_bottom_row() {
    let catalogs = classic_catalogs();
    for seed in 0..10 {
        let mut session = Session::new(GameConfig::classic(), &catalogs, seed).unwrap();
        while session.apply_action(GameAction::MoveLeft) == ActionOutcome::Applied {}
        let shape = session.active().unwrap().shape.clone();
        assert_eq!(session.active().unwrap().x, 0);

        let outcome = session.apply_action(GameAction::HardDrop);
        assert_eq!(outcome, ActionOutcome::Locked { lines_cleared: 0 });
        assert!(session.board().row(19).unwrap().iter().any(|c| c.is_some()));
        assert_eq!(session.board().occupied_count(), shape.cell_count());
        // Nothing above the piece's own height.
        let top = 20 - shape.rows();
        for y in 0..top {
            assert!(session.board().row(y).unwrap().iter().all(|c| c.is_none()));
        }
    }
}

#[test]
fn test_filling_a_row_clears_it() {
    let mut session = Session::new(small_config(1, 3, 5), &Catalogs::new(), 1).unwrap();
    assert_eq!(session.active().unwrap().x, 1);

    session.apply_action(GameAction::MoveLeft);
    assert_eq!(
        session.apply_action(GameAction::HardDrop),
        ActionOutcome::Locked { lines_cleared: 0 }
    );
    session.apply_action(GameAction::MoveRight);
    session.apply_action(GameAction::HardDrop);
    assert_eq!(
        session.apply_action(GameAction::HardDrop),
        ActionOutcome::Locked { lines_cleared: 1 }
    );

    assert_eq!(session.lines(), 1);
    assert_eq!(session.board().occupied_count(), 0);
    // Three drops of four rows at 2 points, plus one line at level 1.
    assert_eq!(session.score(), 3 * 8 + 40);
}

#[test]
fn test_stacking_into_the_top_rows_ends_the_session() {
    let mut session = Session::new(small_config(1, 10, 20), &Catalogs::new(), 2).unwrap();
    let mut outcomes = Vec::new();
    for _ in 0..18 {
        while session.apply_action(GameAction::MoveLeft) == ActionOutcome::Applied {}
        outcomes.push(session.apply_action(GameAction::HardDrop));
    }

    // Seventeen locks fill column 0 up to row 3; the next one would rest in row 2.
    assert!(outcomes[..17]
        .iter()
        .all(|o| *o == ActionOutcome::Locked { lines_cleared: 0 }));
    assert_eq!(outcomes[17], ActionOutcome::ToppedOut);
    assert!(session.game_over());
    assert!(session.active().is_none());
    assert!(session.board().is_occupied(0, 3));
    assert!(!session.board().is_occupied(0, 2));
    assert_eq!(session.board().occupied_count(), 17);

    assert_eq!(
        session.apply_action(GameAction::MoveLeft),
        ActionOutcome::Rejected
    );
    assert_eq!(
        session.apply_action(GameAction::Pause),
        ActionOutcome::Rejected
    );
    let result = session.result().unwrap();
    // Hard drops of 19 down to 3 rows, then 2 rows, at 2 points each.
    assert_eq!(result.score, (3..=19u64).sum::<u64>() * 2 + 2 * 2);
    assert_eq!(result.lines, 0);
}

#[test]
fn test_tenth_line_levels_up_once() {
    let mut config = small_config(1, 2, 4);
    config.scoring.level_up = 1000;
    config.scoring.harddrop = 0;
    let mut session = Session::new(config, &Catalogs::new(), 3).unwrap();
    assert_eq!(session.gravity_interval(), Duration::from_secs(1));

    let mut level_ups = 0;
    for _ in 0..10 {
        session.apply_action(GameAction::HardDrop);
        session.apply_action(GameAction::MoveRight);
        session.apply_action(GameAction::HardDrop);
        level_ups += session.take_last_event().unwrap().levels_gained;
    }

    assert_eq!(session.lines(), 10);
    assert_eq!(session.level(), 2);
    assert_eq!(level_ups, 1);
    // Nine lines at level 1, level-up bonus, tenth line at level 2.
    assert_eq!(session.score(), 9 * 40 + 1000 + 80);
    assert!(session.gravity_interval() < Duration::from_secs(1));
}

#[test]
fn test_higher_first_level_starts_faster() {
    let mut config = small_config(1, 4, 6);
    config.first_level = 5;
    let session = Session::new(config, &Catalogs::new(), 4).unwrap();
    assert_eq!(session.level(), 5);
    // 10 / (10 + 2 * 4)
    assert_eq!(session.gravity_interval(), Duration::from_secs_f64(10.0 / 18.0));
}

#[test]
fn test_domino_rotation_blocked_by_wall() {
    // Dominoes spawn standing; lying down shifts the column by -1.
    let mut session = Session::new(small_config(2, 4, 6), &Catalogs::new(), 5).unwrap();
    while session.apply_action(GameAction::MoveLeft) == ActionOutcome::Applied {}
    let standing = session.active().unwrap().clone();
    assert_eq!(standing.x, 0);
    assert_eq!(standing.shape.rows(), 2);

    assert_eq!(
        session.apply_action(GameAction::RotateCw),
        ActionOutcome::Rejected
    );
    assert_eq!(session.active(), Some(&standing));

    // One column in, the same turn fits.
    session.apply_action(GameAction::MoveRight);
    assert_eq!(
        session.apply_action(GameAction::RotateCw),
        ActionOutcome::Applied
    );
    let lying = session.active().unwrap();
    assert_eq!((lying.x, lying.y), (0, 1));
    assert_eq!(lying.shape.cols(), 2);
}

#[test]
fn test_snapshot_reflects_session() {
    let catalogs = classic_catalogs();
    let mut session = Session::new(GameConfig::classic(), &catalogs, 6).unwrap();
    session.apply_action(GameAction::SoftDrop);

    let snapshot = session.snapshot();
    assert_eq!((snapshot.width, snapshot.height), (10, 20));
    assert_eq!(snapshot.grid.len(), 20);
    assert!(snapshot.grid.iter().all(|row| row.len() == 10));
    assert_eq!(snapshot.upcoming.len(), 3);
    assert_eq!(snapshot.score, 1);
    assert!(snapshot.playable());

    let active = snapshot.active.as_ref().unwrap();
    let ghost = snapshot.ghost.as_ref().unwrap();
    assert_eq!(active.cells.len(), 4);
    assert_eq!(ghost.cells.len(), 4);
    assert_eq!(ghost.color.alpha(), GHOST_ALPHA);
    assert_eq!(ghost.color.0[..3], active.color.0[..3]);
    assert_eq!(snapshot.gravity_interval_ms, 1000);

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["level"], 1);
    assert!(json["upcoming"][0]["shape"].is_array());
}

#[test]
fn test_same_seed_same_game() {
    let catalogs = classic_catalogs();
    let actions = [
        GameAction::MoveLeft,
        GameAction::RotateCw,
        GameAction::HardDrop,
        GameAction::MoveRight,
        GameAction::MoveRight,
        GameAction::HardDrop,
        GameAction::RotateCcw,
        GameAction::HardDrop,
    ];
    let play = |seed| {
        let mut session = Session::new(GameConfig::classic(), &catalogs, seed).unwrap();
        for action in actions {
            session.apply_action(action);
        }
        session.snapshot()
    };
    assert_eq!(play(99), play(99));
}

#[test]
fn test_config_errors_stop_session_creation() {
    let mut config = small_config(3, 3, 10);
    assert!(matches!(
        Session::new(config.clone(), &Catalogs::new(), 1),
        Err(ConfigError::GridTooSmall { .. })
    ));

    config.width = 10;
    config.next_pieces = 9;
    assert_eq!(
        Session::new(config, &Catalogs::new(), 1).unwrap_err(),
        ConfigError::LookaheadTooLong(9)
    );
}
