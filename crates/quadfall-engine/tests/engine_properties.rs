//! Property tests for the board and session rules.

use std::collections::HashSet;

use proptest::prelude::*;
use quadfall_engine::{
    BOARD_HEIGHT, BOARD_WIDTH, Block, Board, CellProbe, EngineConfig, Game, GameSession,
    PieceBag, PieceKind, PieceSeed, ScoringPolicy,
};

fn seed_strategy() -> impl Strategy<Value = PieceSeed> {
    any::<[u8; 16]>().prop_map(PieceSeed::from_bytes)
}

fn kind_strategy() -> impl Strategy<Value = PieceKind> {
    prop::sample::select(PieceKind::ALL.to_vec())
}

fn board_strategy() -> impl Strategy<Value = Board> {
    // Random fill in the lower half, never a full row.
    prop::collection::vec(prop::collection::vec(any::<bool>(), BOARD_WIDTH), BOARD_HEIGHT / 2)
        .prop_map(|rows| {
            let art: String = rows
                .iter()
                .map(|row| {
                    let mut line: String = row.iter().map(|&f| if f { 'T' } else { '.' }).collect();
                    if row.iter().all(|&f| f) {
                        line.replace_range(0..1, ".");
                    }
                    line + "\n"
                })
                .collect();
            Board::from_ascii(&art)
        })
}

#[test]
fn test_line_clear_rows_five_and_seven() {
    let mut art = String::new();
    for row in 0..BOARD_HEIGHT {
        let line = match row {
            3 => "..S.......",
            4 => "Z.....L...",
            5 | 7 => "IIIIIIIIII",
            6 => ".J.J.J.J.J",
            _ => "..........",
        };
        art.push_str(line);
        art.push('\n');
    }
    let mut board = Board::from_ascii(&art);
    assert_eq!(board.clear_lines(), 2);

    // Rows above both cleared lines move down by exactly two.
    assert_eq!(board.cell(5, 2), Some(Block::Piece(PieceKind::S)));
    assert_eq!(board.cell(6, 0), Some(Block::Piece(PieceKind::Z)));
    assert_eq!(board.cell(6, 6), Some(Block::Piece(PieceKind::L)));
    assert_eq!(board.cell(7, 1), Some(Block::Piece(PieceKind::J)));
    assert_eq!(board.cell(7, 0), Some(Block::Empty));
    for row in 0..2 {
        for col in 0..BOARD_WIDTH {
            assert_eq!(board.cell(row, col), Some(Block::Empty));
        }
    }
    for row in 8..BOARD_HEIGHT {
        assert!((0..BOARD_WIDTH).all(|col| board.cell(row, col) == Some(Block::Empty)));
    }
}

#[test]
fn test_o_hard_drop_end_to_end() {
    // Find a seed whose first piece is O.
    let seed = (0u8..=255)
        .map(|b| PieceSeed::from_bytes([b; 16]))
        .find(|&seed| PieceBag::with_seed(seed).peek(1)[0] == PieceKind::O)
        .expect("some seed starts with O");
    let mut game = Game::manual(EngineConfig::default(), Some(seed));
    assert_eq!(game.current_piece().unwrap().kind(), PieceKind::O);

    assert!(game.hard_drop().is_applied());
    for row in 0..BOARD_HEIGHT {
        for col in 0..BOARD_WIDTH {
            let expected = if (18..20).contains(&row) && (4..6).contains(&col) {
                Block::Piece(PieceKind::O)
            } else {
                Block::Empty
            };
            assert_eq!(game.cell(row, col), Some(expected), "({row}, {col})");
        }
    }
    assert_eq!(game.score(), 0);
    assert_eq!(game.level(), 1);
    assert_eq!(game.cell(18, 4).map(Block::color_id), Some(2));
}

#[test]
fn test_game_over_leaves_board_untouched() {
    let mut art = String::new();
    for _ in 0..BOARD_HEIGHT {
        art.push_str("LLL....LLL\n");
    }
    // Both spawn rows blocked in the middle.
    art.replace_range(0..22, "LLLLLL.LLL\nLLLLLL.LLL\n");
    let board = Board::from_ascii(&art);
    let session = GameSession::with_board(board.clone(), PieceBag::new(), ScoringPolicy::Classic);
    assert!(session.is_game_over());
    assert_eq!(session.board(), &board);
}

proptest! {
    #[test]
    fn bag_draws_each_type_once_per_seven(seed in seed_strategy(), bags in 1usize..20) {
        let mut bag = PieceBag::with_seed(seed);
        for _ in 0..bags {
            let window: HashSet<_> = (0..PieceKind::LEN).map(|_| bag.pop_next()).collect();
            prop_assert_eq!(window.len(), PieceKind::LEN);
        }
    }

    #[test]
    fn collision_matches_cell_probes(
        board in board_strategy(),
        kind in kind_strategy(),
        rotation in 0usize..4,
        top in -6i32..22,
        left in -5i32..12,
    ) {
        let shape = kind.shape(rotation);
        let expected = shape.cells().iter().any(|&(r, c)| {
            let row = top + i32::try_from(r).unwrap();
            let col = left + i32::try_from(c).unwrap();
            let outside = col < 0 || col >= 10 || row >= 20;
            let filled = (0..20).contains(&row)
                && !outside
                && board.cell(usize::try_from(row).unwrap(), usize::try_from(col).unwrap())
                    != Some(Block::Empty);
            outside || filled
        });
        prop_assert_eq!(board.collides(&shape, top, left), expected);
        for &(r, c) in &shape.cells() {
            let probe = board.probe(top + i32::try_from(r).unwrap(), left + i32::try_from(c).unwrap());
            if probe == CellProbe::SpawnBuffer {
                prop_assert!(top + i32::try_from(r).unwrap() < 0);
            }
        }
    }

    #[test]
    fn rotation_cycles_back(kind in kind_strategy(), rotation in 0usize..4) {
        let shape = kind.shape(rotation);
        prop_assert_eq!(shape.rotated_cw().rotated_cw().rotated_cw().rotated_cw(), shape);
        let count = kind.rotation_count();
        prop_assert_eq!(kind.shape(rotation + count), shape);
    }

    #[test]
    fn drop_position_rests_on_something(
        board in board_strategy(),
        kind in kind_strategy(),
        rotation in 0usize..4,
        left in -4i32..=10,
    ) {
        let shape = kind.shape(rotation);
        if let Some(top) = board.drop_position(&shape, left) {
            prop_assert!(!board.collides(&shape, top, left));
            prop_assert!(board.collides(&shape, top + 1, left));
            prop_assert!(top >= -4);
        } else {
            prop_assert!(board.collides(&shape, -4, left));
        }
    }

    #[test]
    fn score_and_lines_never_decrease(seed in seed_strategy(), moves in prop::collection::vec(0u8..6, 1..200)) {
        let mut game = Game::manual(EngineConfig::default(), Some(seed));
        let mut score = game.score();
        let mut lines = game.lines();
        for m in moves {
            match m {
                0 => { game.move_left(); }
                1 => { game.move_right(); }
                2 => { game.rotate_cw(); }
                3 => { game.rotate_ccw(); }
                4 => { game.soft_drop(); }
                _ => { game.hard_drop(); }
            }
            prop_assert!(game.score() >= score);
            prop_assert!(game.lines() >= lines);
            prop_assert_eq!(game.level(), 1 + game.lines() / 10);
            score = game.score();
            lines = game.lines();
            if game.is_game_over() {
                break;
            }
        }
    }

    #[test]
    fn falling_piece_never_overlaps(seed in seed_strategy(), moves in prop::collection::vec(0u8..6, 1..200)) {
        let mut game = Game::manual(EngineConfig::default(), Some(seed));
        for m in moves {
            match m {
                0 => { game.move_left(); }
                1 => { game.move_right(); }
                2 => { game.rotate_cw(); }
                3 => { game.rotate_ccw(); }
                4 => { game.soft_drop(); }
                _ => { game.hard_drop(); }
            }
            if let Some(piece) = game.current_piece() {
                prop_assert!(!game.board().is_colliding(piece));
            }
        }
    }
}
