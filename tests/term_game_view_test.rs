use block_grid::core::{GameSession, Grid, GridConfig};
use block_grid::term::{AdapterStatusView, AnchorY, GameView, Rgb, Viewport};
use block_grid::types::{BlockColor, Coord};

fn session(rows: &[&str]) -> GameSession {
    GameSession::with_grid(Grid::from_rows(rows).unwrap())
}

#[test]
fn board_draws_bottom_row_last() {
    let s = session(&["o.", "yp"]);
    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render(&s.snapshot(), Viewport::new(6, 4));

    assert_eq!(fb.row_text(0), "┌────┐");
    assert_eq!(fb.row_text(3), "└────┘");

    // Top board line: orange then a cleared placeholder.
    let orange = fb.get(1, 1).unwrap();
    assert_eq!(orange.ch, '█');
    assert_eq!(orange.style.fg, Rgb::from(BlockColor::Orange));
    let cleared = fb.get(3, 1).unwrap();
    assert_eq!(cleared.ch, ' ');
    assert_eq!(cleared.style.bg, Rgb::new(245, 245, 245));

    // Bottom board line: yellow, pink. The cursor brackets (0, 0).
    assert_eq!(fb.row_text(2), "│[]██│");
    assert_eq!(fb.get(1, 2).unwrap().style.bg, Rgb::from(BlockColor::Yellow));
    assert_eq!(fb.get(4, 2).unwrap().style.fg, Rgb::from(BlockColor::Pink));
}

#[test]
fn side_panel_shows_remaining_and_adapter() {
    let s = GameSession::new(GridConfig::default().with_seed(3));
    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let status = AdapterStatusView { port: 7878 };
    let fb = view.render_with_adapter(&s.snapshot(), Some(&status), Viewport::new(60, 24));

    let text: Vec<String> = (0..fb.height()).map(|y| fb.row_text(y)).collect();
    assert!(text.iter().any(|l| l.contains("BLOCKS LEFT")));
    assert!(text.iter().any(|l| l.contains("100")));
    assert!(text.iter().any(|l| l.contains("ON 7878")));
}

#[test]
fn narrow_viewport_hides_side_panel() {
    let s = GameSession::new(GridConfig::default().with_seed(3));
    let fb = GameView::default().render(&s.snapshot(), Viewport::new(26, 12));
    let text: Vec<String> = (0..fb.height()).map(|y| fb.row_text(y)).collect();
    assert!(!text.iter().any(|l| l.contains("BLOCKS")));
}

#[test]
fn hit_test_round_trips_every_block() {
    let s = GameSession::new(GridConfig::default().with_seed(9));
    let snap = s.snapshot();
    let view = GameView::default();
    let vp = Viewport::new(80, 24);

    // Find the board's top-left interior cell by scanning for the corner.
    let fb = view.render(&snap, vp);
    let (bx, by) = (0..vp.height)
        .flat_map(|y| (0..vp.width).map(move |x| (x, y)))
        .find(|&(x, y)| fb.get(x, y).map(|c| c.ch) == Some('┌'))
        .unwrap();

    for y in 0..10u8 {
        for x in 0..10u8 {
            let col = bx + 1 + x as u16 * 2;
            let row = by + 1 + (9 - y) as u16;
            assert_eq!(view.hit_test(&snap, vp, col, row), Some(Coord::new(x, y)));
            assert_eq!(view.hit_test(&snap, vp, col + 1, row), Some(Coord::new(x, y)));
        }
    }
    assert_eq!(view.hit_test(&snap, vp, bx, by + 1), None);
    assert_eq!(view.hit_test(&snap, vp, 0, 0), None);
}

#[test]
fn render_into_reuses_buffer_across_resizes() {
    let s = session(&["ob", "yp"]);
    let view = GameView::default();
    let mut fb = view.render(&s.snapshot(), Viewport::new(10, 6));
    view.render_into(&s.snapshot(), Viewport::new(20, 8), &mut fb);
    assert_eq!((fb.width(), fb.height()), (20, 8));
}
