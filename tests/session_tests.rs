use block_grid::core::{ConfigError, GameSession, Grid, GridConfig};
use block_grid::types::{BlockColor, Coord, GameAction};

#[test]
fn test_session_plays_until_empty() {
    let mut session = GameSession::new(GridConfig::new(4, 4, 2).unwrap().with_seed(21));
    let mut clicks = 0;
    // Always clicking the bottom-left active block must empty the grid.
    while session.grid().remaining() > 0 {
        let target = session
            .grid()
            .blocks()
            .find(|b| b.is_removable())
            .map(|b| b.coord())
            .unwrap();
        assert!(session.click(target).is_some());
        clicks += 1;
        assert!(clicks <= 16);
    }
    assert_eq!(session.revision(), clicks);
    assert!(session.grid().blocks().all(|b| b.color() == BlockColor::Cleared));
}

#[test]
fn test_cleared_blocks_are_never_clickable() {
    let mut session = GameSession::with_grid(Grid::from_rows(&["yy", "oo"]).unwrap());
    let event = session.click(Coord::new(0, 0)).unwrap();
    assert_eq!(event.cleared, 2);
    // Yellow fell to the bottom; the top row is now cleared.
    assert_eq!(session.grid().to_rows(), vec!["..", "yy"]);
    assert!(session.click(Coord::new(0, 1)).is_none());
    assert!(session.click(Coord::new(1, 1)).is_none());
    assert_eq!(session.revision(), 1);
}

#[test]
fn test_reset_changes_episode_and_deals_fresh_grid() {
    let mut session = GameSession::new(GridConfig::default().with_seed(77));
    let first = session.grid().clone();
    session.click(Coord::new(0, 0));
    session.reset();

    assert_eq!(session.episode_id(), 1);
    assert_eq!(session.grid().remaining(), 100);
    assert!(session.last_event().is_none());
    assert_ne!(session.grid(), &first);

    // A new session with the reported seed deals the same grid.
    let replay = GameSession::new(GridConfig::default().with_seed(session.seed()));
    assert_eq!(replay.grid(), session.grid());
}

#[test]
fn test_restart_action_via_cursor_play() {
    let mut session = GameSession::with_grid(Grid::from_rows(&["ob", "bo"]).unwrap());
    assert!(session.apply_action(GameAction::CursorRight));
    assert!(session.apply_action(GameAction::Click));
    assert_eq!(session.grid().remaining(), 3);
    assert!(session.apply_action(GameAction::Restart));
    assert_eq!(session.grid().remaining(), 4);
    assert_eq!(session.episode_id(), 1);
}

#[test]
fn test_palette_size_limits_colours() {
    let session = GameSession::new(GridConfig::new(10, 10, 2).unwrap().with_seed(5));
    assert!(session
        .grid()
        .blocks()
        .all(|b| matches!(b.color(), BlockColor::Orange | BlockColor::Yellow)));
}

#[test]
fn test_config_from_lookup() {
    let cfg = GridConfig::from_lookup(|k| match k {
        "BLOCK_GRID_WIDTH" => Some("6".into()),
        "BLOCK_GRID_SEED" => Some("42".into()),
        _ => None,
    })
    .unwrap();
    assert_eq!((cfg.width, cfg.height, cfg.colors, cfg.seed), (6, 10, 4, Some(42)));

    let err = GridConfig::from_lookup(|k| (k == "BLOCK_GRID_HEIGHT").then(|| "1".to_string()));
    assert!(matches!(err, Err(ConfigError::TooSmall { .. })));

    let err = GridConfig::from_lookup(|k| (k == "BLOCK_GRID_COLORS").then(|| "many".to_string()));
    assert!(matches!(err, Err(ConfigError::InvalidVar { .. })));
}

#[test]
fn test_snapshot_tracks_cursor_and_cells() {
    let mut session = GameSession::with_grid(Grid::from_rows(&["py", "ob"]).unwrap());
    session.set_cursor(Coord::new(1, 1));
    let snap = session.snapshot();
    assert_eq!(snap.cursor, Coord::new(1, 1));
    assert_eq!(snap.get(1, 1).unwrap().color, BlockColor::Yellow);
    assert_eq!(snap.code_rows(), vec![vec![4, 2], vec![1, 3]]);
    assert_eq!(snap.remaining, 4);
}
