//! Integration tests for go-territory
//!
//! Scenario tests play short, hand-checked sequences through a session.
//! Property tests play seeded random games and check invariants after
//! every move.

use go_territory::board::{Board, Color, Point};
use go_territory::config::{BoardSize, GameConfig};
use go_territory::group::{all_groups, group_at, is_capture_clean};
use go_territory::rules::{MoveError, captures_any, check_move, legal_moves};
use go_territory::session::Session;
use go_territory::territory::{TerritoryMap, is_area_surrounded, territory_map};

// =============================================================================
// Helper functions for setting up test positions
// =============================================================================

fn session9() -> Session {
    Session::new(GameConfig::new(BoardSize::Nine))
}

/// Play a sequence of points, alternating colors starting with the side to move.
fn play(session: &mut Session, moves: &[(usize, usize)]) {
    for &(x, y) in moves {
        if let Err(e) = session.place_stone(Point::new(x, y)) {
            panic!("move ({x}, {y}) rejected: {e}");
        }
    }
}

/// Play up to `moves` random legal moves, calling `check` after each one.
fn random_game(seed: u64, size: BoardSize, moves: usize, mut check: impl FnMut(&mut Session)) {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut session = Session::new(GameConfig::new(size));
    for _ in 0..moves {
        let candidates = legal_moves(session.board(), session.to_play(), session.ko());
        if candidates.is_empty() {
            break;
        }
        let p = candidates[rng.usize(..candidates.len())];
        session.place_stone(p).expect("legal_moves only returns legal points");
        check(&mut session);
    }
}

/// Set up the ko shape below and let Black capture at (2,1):
///
/// ```text
/// . X O .
/// X O . O
/// . X O .
/// ```
fn ko_position() -> Session {
    let mut session = session9();
    play(
        &mut session,
        &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2), (3, 1), (8, 8), (2, 2), (2, 1)],
    );
    session
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_three_move_opening() {
    let mut session = session9();
    play(&mut session, &[(4, 4), (4, 3), (3, 3)]);

    assert_eq!(session.move_number(), 3);
    assert_eq!(session.captured_black(), 0);
    assert_eq!(session.captured_white(), 0);
    assert!(session.history().iter().all(|m| m.captured.is_empty()));

    let groups = session.groups();
    assert_eq!(groups.len(), 3);
    for group in &groups {
        assert!(group.liberty_count() >= 2, "group {:?} too short of liberties", group.stones);
    }
    assert_eq!(session.history()[2].move_number, 3);
    assert_eq!(session.to_play(), Color::White);
}

#[test]
fn test_corner_capture() {
    let mut session = session9();
    play(&mut session, &[(1, 0), (0, 0), (0, 1)]);

    assert_eq!(session.board().get(Point::new(0, 0)), None);
    assert_eq!(session.captured_white(), 1);
    assert_eq!(session.captured_black(), 0);
    assert_eq!(session.history()[2].captured, vec![Point::new(0, 0)]);
    // Retaking at (0,0) would not trap Black's stone, so no ko
    assert_eq!(session.ko(), None);
    assert!(session.check(Point::new(0, 0)).is_err(), "White at (0,0) is now suicide");
}

#[test]
fn test_empty_board_territory_is_neutral() {
    let mut session = session9();
    session.toggle_territory_display();
    assert!(session.territory_map().is_neutral());
    assert!(territory_map(session.board()).is_neutral());
    let info = session.territory_info();
    assert_eq!(info.neutral.len(), 81);
}

// =============================================================================
// Ko
// =============================================================================

#[test]
fn test_ko_blocks_immediate_recapture_once() {
    let mut session = ko_position();
    assert_eq!(session.history()[8].captured, vec![Point::new(1, 1)]);
    assert_eq!(session.ko(), Some(Point::new(1, 1)));

    let before = session.board().clone();
    assert_eq!(session.place_stone(Point::new(1, 1)), Err(MoveError::Ko));
    assert_eq!(session.board(), &before);
    assert_eq!(session.to_play(), Color::White);

    // Ko threats elsewhere clear the constraint
    play(&mut session, &[(7, 7)]);
    assert_eq!(session.ko(), None);
    play(&mut session, &[(6, 6)]);
    assert_eq!(session.ko(), None);

    // Now White may retake, which sets a ko for Black in turn
    play(&mut session, &[(1, 1)]);
    assert_eq!(session.history().last().map(|m| m.captured.clone()), Some(vec![Point::new(2, 1)]));
    assert_eq!(session.ko(), Some(Point::new(2, 1)));
}

#[test]
fn test_undo_clears_ko_without_restoring_it() {
    // Known gap: undo forgets a ko that was active before the undone move,
    // so an immediate recapture becomes possible after undo.
    let mut session = ko_position();
    assert_eq!(session.ko(), Some(Point::new(1, 1)));

    play(&mut session, &[(7, 7)]);
    session.undo().expect("one move to undo");

    assert_eq!(session.to_play(), Color::White);
    assert_eq!(session.ko(), None);
    assert!(session.place_stone(Point::new(1, 1)).is_ok());
}

// =============================================================================
// Undo
// =============================================================================

#[test]
fn test_undo_restores_capture() {
    let mut session = session9();
    play(&mut session, &[(1, 0), (0, 0)]);
    let board = session.board().clone();

    play(&mut session, &[(0, 1)]);
    assert_eq!(session.captured_white(), 1);

    let mv = session.undo().expect("move to undo");
    assert_eq!(mv.captured, vec![Point::new(0, 0)]);
    assert_eq!(session.board(), &board);
    assert_eq!(session.captured_white(), 0);
    assert_eq!(session.to_play(), Color::Black);
    assert_eq!(session.move_number(), 2);
}

#[test]
fn test_undo_recomputes_displayed_territory() {
    let mut session = session9();
    session.toggle_territory_display();
    // Black walls off the 2x2 corner; (1,2) closes it
    play(&mut session, &[(2, 0), (8, 8), (2, 1), (8, 7), (0, 2), (7, 8), (1, 2)]);
    assert_eq!(session.territory_map().count(Color::Black), 4);

    let mv = session.undo().expect("move to undo");
    assert_eq!(mv.point, Point::new(1, 2));
    assert_eq!(session.territory_map(), &territory_map(session.board()));
    assert_eq!(session.territory_map().count(Color::Black), 0);

    let change = session.last_change().expect("summary after undo");
    assert_eq!(change.black_loss, 4);
    assert_eq!(change.black_gain, 0);
    assert!(change.message.starts_with("Territory reassessed."), "{}", change.message);
    assert_eq!(session.black_score(), 0.0);
}

#[test]
fn test_undo_is_inverse_of_place_stone() {
    for seed in 0..8 {
        random_game(seed, BoardSize::Nine, 120, |session| {
            let board = session.board().clone();
            let to_play = session.to_play();
            let captures = (session.captured_black(), session.captured_white());
            let moves = session.move_number();

            let candidates = legal_moves(session.board(), to_play, session.ko());
            let Some(&p) = candidates.first() else {
                return;
            };
            session.place_stone(p).expect("legal");
            let mv = session.undo().expect("move to undo");
            assert_eq!(mv.point, p);

            assert_eq!(session.board(), &board);
            assert_eq!(session.to_play(), to_play);
            assert_eq!((session.captured_black(), session.captured_white()), captures);
            assert_eq!(session.move_number(), moves);
        });
    }
}

// =============================================================================
// Legality properties
// =============================================================================

#[test]
fn test_capture_soundness() {
    for seed in 0..16 {
        random_game(seed, BoardSize::Nine, 200, |session| {
            assert!(
                is_capture_clean(session.board()),
                "zero-liberty group after move {}:\n{}",
                session.move_number(),
                session.board()
            );
        });
    }
}

#[test]
fn test_capture_soundness_on_19x19() {
    random_game(99, BoardSize::Nineteen, 400, |session| {
        assert!(is_capture_clean(session.board()));
    });
}

#[test]
fn test_legality_checks_are_deterministic_and_pure() {
    random_game(3, BoardSize::Nine, 80, |session| {
        let board = session.board().clone();
        for p in board.points() {
            assert_eq!(session.check(p), session.check(p));
        }
        assert_eq!(session.board(), &board);
    });
}

#[test]
fn test_suicide_only_without_capture() {
    for seed in 0..8 {
        random_game(seed, BoardSize::Nine, 150, |session| {
            let board = session.board();
            let color = session.to_play();
            for p in board.points() {
                match check_move(board, p, color, None) {
                    Err(MoveError::Suicide) => {
                        assert!(!captures_any(board, p, color));
                        // Simulate on a copy: the new group must have no liberties
                        let mut copy = board.clone();
                        copy.set(p, Some(color));
                        let group = group_at(&copy, p).expect("stone just placed");
                        assert_eq!(group.liberty_count(), 0);
                    }
                    Ok(()) => {
                        let mut copy = board.clone();
                        copy.set(p, Some(color));
                        let group = group_at(&copy, p).expect("stone just placed");
                        assert!(group.liberty_count() > 0 || captures_any(board, p, color));
                    }
                    Err(_) => {}
                }
            }
        });
    }
}

#[test]
fn test_capturing_self_atari_is_accepted() {
    // Black plays into a point with no liberties of its own but captures
    let board = Board::parse(
        "\
        . O X . . . . . .
        O X . . . . . . .
        X . . . . . . . .
        . . . . . . . . .
        . . . . . . . . .
        . . . . . . . . .
        . . . . . . . . .
        . . . . . . . . .
        . . . . . . . . .",
    )
    .expect("valid diagram");
    assert!(captures_any(&board, Point::new(0, 0), Color::Black));
    assert_eq!(check_move(&board, Point::new(0, 0), Color::Black, None), Ok(()));
    assert_eq!(
        check_move(&board, Point::new(0, 0), Color::White, None),
        Err(MoveError::Suicide)
    );
}

// =============================================================================
// Territory properties
// =============================================================================

#[test]
fn test_territory_enclosure_matches_surround_check() {
    for seed in 0..8 {
        random_game(seed, BoardSize::Nine, 100, |session| {
            let board = session.board();
            let map = territory_map(board);
            for p in board.points().filter(|&p| board.get(p).is_none()) {
                let black = is_area_surrounded(board, p, Color::Black);
                let white = is_area_surrounded(board, p, Color::White);
                let expected = match (black, white) {
                    (true, false) => Some(Color::Black),
                    (false, true) => Some(Color::White),
                    _ => None,
                };
                assert_eq!(map.owner(p), expected, "owner mismatch at {p}\n{board}");
            }
        });
    }
}

#[test]
fn test_territory_map_is_pure() {
    random_game(11, BoardSize::Thirteen, 150, |session| {
        let first = territory_map(session.board());
        let second = territory_map(session.board());
        assert_eq!(first, second);
    });
}

#[test]
fn test_session_territory_tracks_board() {
    let mut rng = fastrand::Rng::with_seed(5);
    let mut session = session9();
    session.toggle_territory_display();
    let mut previous = session.territory_map().clone();

    for _ in 0..80 {
        let candidates = legal_moves(session.board(), session.to_play(), session.ko());
        if candidates.is_empty() {
            break;
        }
        session
            .place_stone(candidates[rng.usize(..candidates.len())])
            .expect("legal");

        let map = session.territory_map().clone();
        assert_eq!(map, territory_map(session.board()), "stale territory map");

        let change = session.last_change().expect("summary after move");
        assert_eq!(change.black_total, map.count(Color::Black));
        assert_eq!(change.white_total, map.count(Color::White));
        let differing = map
            .owners()
            .iter()
            .zip(previous.owners())
            .filter(|(a, b)| a != b)
            .count();
        assert_eq!(change.changes.len(), differing);
        assert!(!change.message.is_empty());
        previous = map;
    }

    // Refreshing an unchanged board reports no change
    session.refresh_territory();
    let change = session.last_change().expect("summary after refresh");
    assert!(change.is_unchanged());
    assert!(change.message.contains("no significant change"));
}

#[test]
fn test_scores_include_territory_only_when_displayed() {
    let mut session = session9();
    // Black walls off the 2x2 corner; White plays on the far side
    play(&mut session, &[(2, 0), (8, 8), (2, 1), (8, 7), (0, 2), (7, 8), (1, 2)]);
    assert_eq!(session.black_score(), 0.0);
    assert_eq!(session.white_score(), 6.5);

    session.toggle_territory_display();
    assert_eq!(session.black_score(), 4.0);
    assert_eq!(session.white_score(), 6.5);
}

#[test]
fn test_groups_cover_every_stone_once() {
    random_game(21, BoardSize::Nine, 120, |session| {
        let board = session.board();
        let groups = all_groups(board);
        let mut seen = vec![0u8; board.size() * board.size()];
        for group in &groups {
            for s in &group.stones {
                seen[s.y * board.size() + s.x] += 1;
                assert_eq!(board.get(*s), Some(group.color));
            }
        }
        for p in board.points() {
            let expected = u8::from(board.get(p).is_some());
            assert_eq!(seen[p.y * board.size() + p.x], expected);
        }
    });
}

#[test]
fn test_change_board_size_rebuilds_territory() {
    let mut session = session9();
    session.toggle_territory_display();
    play(&mut session, &[(4, 4)]);
    assert_eq!(session.territory_map().count(Color::Black), 80);

    session.change_board_size(BoardSize::Nineteen);
    assert_eq!(session.board().size(), 19);
    assert_eq!(session.territory_map(), &TerritoryMap::neutral(19));
    play(&mut session, &[(4, 4)]);
    assert_eq!(session.territory_map().count(Color::Black), 360);
}
