//! A professional game from 2002 that ended in a triple ko. It exercises
//! captures, self-capture and superko marking over 153 moves.

use std::collections::BTreeSet;

use go_rules::{Game, Intersection, Move, Point, Stone};

const MOVES: [(u8, u8); 154] = [
    (17, 4), (4, 4), (16, 17), (4, 17), (6, 3), (3, 6), (11, 3), (16, 14),
    (17, 12), (14, 16), (17, 16), (17, 15), (15, 15), (15, 16), (16, 16), (16, 15),
    (14, 15), (13, 16), (13, 15), (12, 16), (15, 13), (18, 12), (17, 13), (18, 16),
    (18, 17), (18, 15), (16, 18), (18, 13), (17, 10), (17, 11), (16, 11), (18, 11),
    (16, 10), (18, 10), (11, 14), (14, 18), (18, 9), (19, 18), (18, 18), (19, 17),
    (10, 16), (10, 17), (9, 17), (10, 18), (19, 10), (19, 11), (19, 13), (17, 14),
    (19, 14), (18, 8), (17, 9), (19, 9), (17, 7), (18, 7), (17, 6), (17, 3),
    (16, 3), (18, 4), (18, 6), (16, 4), (17, 5), (11, 4), (10, 3), (12, 3),
    (15, 3), (10, 4), (9, 4), (9, 5), (8, 4), (12, 4), (8, 5), (9, 6),
    (19, 16), (19, 15), (17, 19), (5, 3), (6, 2), (17, 2), (15, 19), (15, 18),
    (16, 2), (14, 5), (15, 5), (14, 4), (15, 4), (3, 15), (15, 14), (14, 19),
    (16, 13), (18, 14), (19, 8), (19, 7), (19, 6), (16, 19), (11, 6), (10, 6),
    (15, 19), (19, 16), (17, 8), (16, 19), (11, 8), (8, 6), (6, 5), (9, 9),
    (15, 19), (18, 19), (3, 3), (5, 2), (5, 4), (5, 5), (6, 4), (4, 3),
    (4, 5), (3, 5), (5, 6), (3, 4), (7, 9), (8, 8), (11, 10), (9, 16),
    (7, 11), (6, 7), (4, 7), (10, 10), (11, 11), (6, 10), (7, 10), (5, 8),
    (4, 14), (3, 14), (4, 12), (8, 16), (4, 10), (12, 6), (11, 7), (7, 8),
    (19, 8), (16, 19), (11, 5), (10, 5), (15, 19), (17, 18), (17, 17), (16, 19),
    (3, 17), (3, 16), (15, 19), (15, 17), (19, 10), (16, 19), (19, 19), (19, 9),
    (15, 19), (18, 19),
];

/// Move index and the number of stones it captures.
const CAPTURES: &[(usize, u32)] = &[
    (51, 1), (73, 1), (91, 1), (93, 1), (96, 1), (99, 1), (104, 1), (114, 1),
    (136, 3), (137, 1), (140, 1), (142, 1), (143, 1), (146, 1), (148, 1), (149, 1),
    (150, 1), (151, 1), (152, 1),
];

/// Points that are superko for the player to move after the given move.
const KOS: &[(usize, &[(u8, u8)])] = &[
    (93, &[(15, 19)]),
    (96, &[(16, 19)]),
    (99, &[(15, 19)]),
    (104, &[(16, 19)]),
    (137, &[(15, 19)]),
    (140, &[(16, 19)]),
    (143, &[(15, 19)]),
    (146, &[(16, 19)]),
    (148, &[(19, 9)]),
    (149, &[(15, 19)]),
    (150, &[(18, 19)]),
    (151, &[(19, 10)]),
    (152, &[(16, 19), (18, 19)]),
];

/// Points that are self-capture for the player to move after the given move.
const SELF_CAPTURES: &[(usize, &[(u8, u8)])] = &[
    (51, &[(19, 10)]),
    (53, &[(19, 10)]),
    (55, &[(19, 10)]),
    (57, &[(19, 10)]),
    (59, &[(19, 10)]),
    (61, &[(19, 10)]),
    (63, &[(19, 10)]),
    (65, &[(19, 10)]),
    (67, &[(19, 10)]),
    (69, &[(19, 10)]),
    (71, &[(19, 10)]),
    (73, &[(19, 10), (19, 16)]),
    (75, &[(19, 10), (19, 16)]),
    (77, &[(19, 10), (19, 16)]),
    (78, &[(16, 19)]),
    (79, &[(19, 10), (19, 16)]),
    (80, &[(16, 19)]),
    (81, &[(19, 10), (19, 16)]),
    (82, &[(16, 19)]),
    (83, &[(19, 10), (19, 16)]),
    (84, &[(16, 19)]),
    (85, &[(19, 10), (19, 16)]),
    (86, &[(16, 19)]),
    (87, &[(19, 10), (19, 16)]),
    (89, &[(19, 10), (19, 12), (19, 16)]),
    (91, &[(19, 8), (19, 10), (19, 12), (19, 16)]),
    (93, &[(19, 8), (19, 10), (19, 12), (19, 16)]),
    (95, &[(19, 8), (19, 10), (19, 12), (19, 16)]),
    (97, &[(19, 8), (19, 10), (19, 12)]),
    (99, &[(19, 10), (19, 12)]),
    (101, &[(19, 10), (19, 12)]),
    (103, &[(19, 10), (19, 12)]),
    (105, &[(19, 10), (19, 12)]),
    (107, &[(19, 10), (19, 12)]),
    (109, &[(19, 10), (19, 12)]),
    (111, &[(19, 10), (19, 12)]),
    (113, &[(19, 10), (19, 12)]),
    (114, &[(5, 5)]),
    (115, &[(19, 10), (19, 12)]),
    (116, &[(5, 5)]),
    (117, &[(19, 10), (19, 12)]),
    (118, &[(5, 5)]),
    (119, &[(19, 10), (19, 12)]),
    (120, &[(5, 5)]),
    (121, &[(19, 10), (19, 12)]),
    (122, &[(5, 5)]),
    (123, &[(19, 10), (19, 12)]),
    (124, &[(5, 5)]),
    (125, &[(19, 10), (19, 12)]),
    (126, &[(5, 5)]),
    (127, &[(19, 10), (19, 12)]),
    (128, &[(5, 5)]),
    (129, &[(19, 10), (19, 12)]),
    (130, &[(5, 5)]),
    (131, &[(19, 10), (19, 12)]),
    (132, &[(5, 5)]),
    (133, &[(19, 10), (19, 12)]),
    (134, &[(5, 5)]),
    (135, &[(19, 10), (19, 12)]),
    (136, &[(5, 5)]),
    (137, &[(19, 12)]),
    (138, &[(5, 5)]),
    (139, &[(19, 12)]),
    (140, &[(5, 5)]),
    (141, &[(19, 12)]),
    (142, &[(5, 5), (17, 18)]),
    (143, &[(19, 12)]),
    (144, &[(5, 5)]),
    (145, &[(19, 12)]),
    (146, &[(5, 5), (17, 18)]),
    (147, &[(19, 12)]),
    (148, &[(5, 5), (17, 18)]),
    (149, &[(17, 18), (19, 12)]),
    (150, &[(5, 5), (17, 18)]),
    (151, &[(19, 12)]),
    (152, &[(5, 5), (17, 18)]),
];

/// Moves recorded in the game; the final entry retakes a ko and is illegal.
const PLAYED: usize = 153;

fn pt((column, row): (u8, u8)) -> Point {
    Point::new(column, row).unwrap()
}

fn new_game() -> Game {
    let mut builder = Game::builder(19).unwrap();
    builder.set_compensation(5.5).unwrap();
    builder.build()
}

fn expected_at(table: &[(usize, &[(u8, u8)])], index: usize) -> BTreeSet<Point> {
    table
        .iter()
        .find(|(i, _)| *i == index)
        .map(|(_, points)| points.iter().copied().map(pt).collect())
        .unwrap_or_default()
}

/// Replays the game, handing each (before, after, index) triple to `check`.
fn replay(mut check: impl FnMut(&Game, &Game, usize)) -> Game {
    let mut game = new_game();
    for (i, &mv) in MOVES.iter().take(PLAYED).enumerate() {
        let next = game
            .play(Move::Play(pt(mv)))
            .unwrap_or_else(|e| panic!("move {} at {:?}: {e}", i + 1, mv));
        check(&game, &next, i);
        game = next;
    }
    game
}

fn stones_changed(before: &Game, after: &Game) -> Vec<Point> {
    before
        .board()
        .points()
        .filter(|&p| before.get(p).unwrap().stone() != after.get(p).unwrap().stone())
        .collect()
}

#[test]
fn opening_moves_add_one_stone_each() {
    let mut game = new_game();
    for &mv in MOVES.iter().take(51) {
        let player = game.current_player().unwrap();
        let next = game.play(Move::Play(pt(mv))).unwrap();

        assert_eq!(stones_changed(&game, &next), vec![pt(mv)]);
        assert_eq!(game.get(pt(mv)), Ok(Intersection::Empty));
        assert_eq!(next.get(pt(mv)), Ok(Intersection::from(player)));
        assert_eq!(next.captures(), game.captures());
        game = next;
    }
}

#[test]
fn captures_are_removed_and_tallied() {
    replay(|before, after, i| {
        let mover = before.current_player().unwrap();
        let opponent = mover.opp();
        let captured = CAPTURES
            .iter()
            .find(|(index, _)| *index == i)
            .map_or(0, |&(_, count)| count);

        assert_eq!(
            after.captures_for(mover),
            before.captures_for(mover) + captured,
            "move {}",
            i + 1
        );
        assert_eq!(after.captures_for(opponent), before.captures_for(opponent));

        let changed = stones_changed(before, after);
        assert_eq!(changed.len(), captured as usize + 1, "move {}", i + 1);
        for p in changed {
            if p == pt(MOVES[i]) {
                assert_eq!(after.get(p), Ok(Intersection::from(mover)));
            } else {
                assert_eq!(before.get(p).unwrap().stone(), Some(opponent));
                assert!(after.get(p).unwrap().counts_as_liberty());
            }
        }
    });
}

#[test]
fn unplayable_points_follow_self_capture_and_superko() {
    replay(|_, after, i| {
        let mut expected = expected_at(KOS, i);
        expected.extend(expected_at(SELF_CAPTURES, i));

        for p in after.board().points() {
            let value = after.get(p).unwrap();
            if !value.counts_as_liberty() {
                continue;
            }
            let want = if expected.contains(&p) {
                Intersection::TemporarilyUnplayable
            } else {
                Intersection::Empty
            };
            assert_eq!(value, want, "after move {}, {p}", i + 1);
        }
    });
}

#[test]
fn legal_moves_exclude_marked_points() {
    let game = replay(|_, _, _| {});
    let moves = game.legal_moves();
    let empty: Vec<Point> = game
        .board()
        .points()
        .filter(|&p| game.get(p) == Ok(Intersection::Empty))
        .collect();

    assert_eq!(moves.len(), empty.len() + 1);
    assert!(moves.contains(&Move::Pass));
    for p in expected_at(KOS, PLAYED - 1) {
        assert!(!moves.contains(&Move::Play(p)), "{p} is ko");
    }
    assert_eq!(game.moves_played(), PLAYED as u32);
}

#[test]
fn final_ko_cannot_be_retaken() {
    let game = replay(|_, _, _| {});
    assert_eq!(game.current_player(), Ok(Stone::White));

    let retake = Move::Play(pt(MOVES[PLAYED]));
    assert!(game.play(retake).unwrap_err().is_invalid_argument());
    assert_eq!(game.moves_played(), PLAYED as u32);
}
