//! Integration tests for the grid rules (adjacency, regions, clearing, gravity)

use std::collections::{BTreeSet, VecDeque};

use block_grid::core::{Grid, GridConfig, Placement, ScriptedColors, SimpleRng};
use block_grid::types::{BlockColor, Coord, PALETTE};

fn dealt(seed: u32) -> Grid {
    Grid::new(&GridConfig::default(), &mut SimpleRng::new(seed))
}

/// Independent breadth-first reference for region membership.
fn reference_region(grid: &Grid, origin: Coord) -> BTreeSet<Coord> {
    let color = grid.block(origin).color();
    let mut seen = BTreeSet::from([origin]);
    let mut queue = VecDeque::from([origin]);
    while let Some(c) = queue.pop_front() {
        let candidates = [
            (c.x as i16, c.y as i16 + 1),
            (c.x as i16 + 1, c.y as i16),
            (c.x as i16, c.y as i16 - 1),
            (c.x as i16 - 1, c.y as i16),
        ];
        for (x, y) in candidates {
            if x < 0 || y < 0 || x >= grid.width() as i16 || y >= grid.height() as i16 {
                continue;
            }
            let n = Coord::new(x as u8, y as u8);
            if grid.block(n).color() == color && seen.insert(n) {
                queue.push_back(n);
            }
        }
    }
    seen
}

fn assert_positions_consistent(grid: &Grid) {
    for x in 0..grid.width() {
        for y in 0..grid.height() {
            let b = grid.block(Coord::new(x, y));
            assert_eq!((b.x(), b.y()), (x, y), "block at ({x}, {y}) disagrees");
        }
    }
}

#[test]
fn test_new_grid_is_fully_removable_and_in_palette() {
    let grid = dealt(3);
    assert_eq!(grid.remaining(), 100);
    assert!(grid.blocks().all(|b| PALETTE.contains(&b.color())));
    assert_positions_consistent(&grid);
}

#[test]
fn test_deal_is_column_major_bottom_up() {
    let script = vec![BlockColor::Orange, BlockColor::Yellow, BlockColor::Blue];
    let config = GridConfig::new(2, 3, 4).unwrap();
    let grid = Grid::new(&config, &mut ScriptedColors::new(script));
    assert_eq!(grid.to_rows(), vec!["bb", "yy", "oo"]);
}

#[test]
fn test_neighbour_counts_on_10x10() {
    let grid = dealt(1);
    let corners = [(0, 0), (0, 9), (9, 0), (9, 9)];
    let edges = [(0, 3), (9, 3), (3, 0), (3, 9)];

    for (x, y) in corners {
        let c = Coord::new(x, y);
        assert!(matches!(grid.placement(c), Placement::Corner { .. }));
        assert_eq!(grid.neighbours(grid.block(c)).len(), 2);
    }
    for (x, y) in edges {
        let c = Coord::new(x, y);
        assert!(matches!(grid.placement(c), Placement::Edge(_)));
        assert_eq!(grid.neighbours(grid.block(c)).len(), 3);
    }
    let centre = Coord::new(3, 3);
    assert_eq!(grid.placement(centre), Placement::Interior);
    assert_eq!(grid.neighbours(grid.block(centre)).len(), 4);
}

#[test]
fn test_neighbour_order_is_above_right_below_left() {
    let grid = dealt(1);
    let coords: Vec<Coord> = grid
        .neighbours(grid.block(Coord::new(4, 4)))
        .iter()
        .map(|b| b.coord())
        .collect();
    assert_eq!(
        coords,
        vec![
            Coord::new(4, 5),
            Coord::new(5, 4),
            Coord::new(4, 3),
            Coord::new(3, 4)
        ]
    );

    let corner: Vec<Coord> = grid
        .neighbours(grid.block(Coord::new(9, 0)))
        .iter()
        .map(|b| b.coord())
        .collect();
    assert_eq!(corner, vec![Coord::new(9, 1), Coord::new(8, 0)]);
}

#[test]
fn test_neighbours_are_symmetric_and_adjacent() {
    let grid = dealt(8);
    for b in grid.blocks() {
        for n in grid.neighbours(b) {
            let dist = (b.x() as i16 - n.x() as i16).abs() + (b.y() as i16 - n.y() as i16).abs();
            assert_eq!(dist, 1);
            assert!(grid.neighbours(n).iter().any(|m| m.coord() == b.coord()));
        }
    }
}

#[test]
fn test_region_matches_reference_across_seeds() {
    for seed in 1..40 {
        let grid = dealt(seed);
        for origin in [Coord::new(0, 0), Coord::new(5, 5), Coord::new(9, 2)] {
            let region = grid.same_color_region(origin);
            let got: BTreeSet<Coord> = region.iter().collect();
            assert_eq!(got.len(), region.len(), "duplicates in region");
            assert!(region.contains(origin));
            assert_eq!(region.origin(), origin);
            assert_eq!(got, reference_region(&grid, origin), "seed {seed} origin {origin:?}");
        }
    }
}

#[test]
fn test_region_does_not_leak_through_other_colours() {
    let grid = Grid::from_rows(&[
        "ooo", //
        "yby", //
        "ooo", //
    ])
    .unwrap();
    let region = grid.same_color_region(Coord::new(0, 0));
    assert_eq!(region.len(), 3);
    assert!(!region.contains(Coord::new(0, 2)));
}

#[test]
fn test_singleton_region_is_cleared() {
    let mut grid = Grid::from_rows(&[
        "oy", //
        "yo", //
    ])
    .unwrap();
    let event = grid.handle_click(Coord::new(0, 1));
    assert_eq!(event.cleared, 1);
    assert_eq!(event.columns, vec![0]);
    assert_eq!(grid.to_rows(), vec![".y", "yo"]);
    assert_eq!(grid.remaining(), 3);
}

#[test]
fn test_clear_then_compact_keeps_order() {
    // Column 0 bottom-up: o b o y b  ; clicking (0,1) clears b at y=1 and the
    // connected b column to its right.
    let mut grid = Grid::from_rows(&[
        "bp", //
        "yp", //
        "op", //
        "bb", //
        "op", //
    ])
    .unwrap();
    let event = grid.handle_click(Coord::new(0, 1));
    assert_eq!(event.color, BlockColor::Blue);
    assert_eq!(event.cleared, 2);
    assert_eq!(event.columns, vec![0, 1]);

    let col0: Vec<BlockColor> = grid.column(0).iter().map(|b| b.color()).collect();
    assert_eq!(
        col0,
        vec![
            BlockColor::Orange,
            BlockColor::Orange,
            BlockColor::Yellow,
            BlockColor::Blue,
            BlockColor::Cleared
        ]
    );
    let col1: Vec<BlockColor> = grid.column(1).iter().map(|b| b.color()).collect();
    assert_eq!(col1[4], BlockColor::Cleared);
    assert!(col1[..4].iter().all(|&c| c == BlockColor::Pink));
    assert_positions_consistent(&grid);
}

#[test]
fn test_flagged_set_is_reset_per_click() {
    let mut grid = Grid::from_rows(&[
        "oy", //
        "oy", //
    ])
    .unwrap();
    grid.handle_click(Coord::new(0, 0));
    assert_eq!(grid.flagged().count(), 2);
    grid.handle_click(Coord::new(1, 1));
    let flagged: Vec<Coord> = grid.flagged().collect();
    assert_eq!(flagged, vec![Coord::new(1, 0), Coord::new(1, 1)]);
}

#[test]
fn test_random_play_preserves_invariants() {
    let mut grid = dealt(1234);
    let mut rng = SimpleRng::new(99);
    for _ in 0..200 {
        let c = Coord::new(rng.next_range(10) as u8, rng.next_range(10) as u8);
        if !grid.block(c).is_removable() {
            continue;
        }
        let before = grid.remaining();
        let expected = grid.same_color_region(c).len();
        let event = grid.handle_click(c);
        assert_eq!(event.cleared, expected);
        assert_eq!(grid.remaining(), before - expected);
        assert_positions_consistent(&grid);

        // Each column is active blocks then cleared ones.
        for x in 0..10 {
            let col = grid.column(x);
            let active = col.iter().take_while(|b| b.is_removable()).count();
            assert!(col[active..].iter().all(|b| !b.is_removable() && b.color().is_sentinel()));
        }
    }
}

#[test]
#[should_panic(expected = "outside")]
fn test_block_out_of_bounds_panics() {
    let grid = dealt(1);
    grid.block(Coord::new(10, 0));
}
