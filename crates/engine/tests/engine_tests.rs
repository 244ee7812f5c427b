//! Engine integration tests: move generation counts, codec round-trips,
//! known mating sequences, and alpha-beta against exhaustive minimax.

use engine::{
    evaluate, AlphaBetaEngine, Color, DepthPolicy, GameState, Position, DRAW_SCORE, MATE_SCORE,
    SCORE_INF,
};

/// Exhaustive minimax mirroring the engine's semantics, without pruning.
/// Used as the ground truth for the alpha-beta equivalence tests.
fn reference_minimax(
    position: &Position,
    depth: u32,
    root_depth: u32,
    maximizing: Color,
    max_depth: u32,
) -> (i64, Option<String>) {
    if position.white_lost || position.black_lost {
        let lost = if position.white_lost {
            engine::WHITE
        } else {
            engine::BLACK
        };
        let value = if lost == maximizing {
            -(MATE_SCORE - depth as i64)
        } else {
            MATE_SCORE - depth as i64
        };
        return (value, None);
    }
    if depth >= max_depth {
        return (evaluate(position, maximizing), None);
    }
    let successors = position.next_positions();
    let maximizing_turn = position.side_to_move == maximizing;
    let stuck = |sign: i64| {
        if position.is_king_attacked(position.side_to_move) {
            sign * (MATE_SCORE - depth as i64)
        } else {
            DRAW_SCORE
        }
    };
    if successors.is_empty() {
        return (stuck(if maximizing_turn { -1 } else { 1 }), None);
    }

    let mut best = if maximizing_turn { -SCORE_INF } else { SCORE_INF };
    let mut best_move = None;
    for successor in &successors {
        let value = if depth == root_depth && !successor.is_legal_board() {
            if maximizing_turn {
                -SCORE_INF
            } else {
                SCORE_INF
            }
        } else {
            reference_minimax(successor, depth + 1, root_depth, maximizing, max_depth).0
        };
        let improved = if maximizing_turn {
            value > best
        } else {
            value < best
        };
        if improved {
            best = value;
            if depth == root_depth {
                best_move = Some(successor.last_move.clone());
            }
        }
    }
    if depth == root_depth && best_move.is_none() {
        return (stuck(if maximizing_turn { -1 } else { 1 }), None);
    }
    (best, best_move)
}

fn alphabeta_best(position: &Position, max_depth: u32) -> (i64, Option<String>) {
    let side = position.side_to_move;
    let policy = DepthPolicy {
        max_depth,
        maximizing: side,
    };
    let mut search = AlphaBetaEngine::new(side, &policy);
    let value = search.search(position);
    (
        value,
        search.best_position().map(|p| p.last_move.clone()),
    )
}

#[test]
fn initial_position_yields_exactly_twenty_successors() {
    assert_eq!(Position::initial().next_positions().len(), 20);
}

#[test]
fn board_string_decode_encode_is_identity() {
    let mut position = Position::initial();
    for notation in ["e2e4", "e7e5", "g1f3", "b8c6", "f1c4"] {
        position = position.apply(notation).unwrap();
        let encoded = position.board_string();
        let decoded = Position::from_board_string(&encoded).unwrap();
        assert_eq!(decoded.board_string(), encoded);
    }
}

#[test]
fn pruning_never_changes_value_or_move() {
    let mut positions = vec![Position::initial()];
    positions.push(Position::initial().apply("e2e4").unwrap());
    positions.push(
        Position::initial()
            .apply("e2e4")
            .unwrap()
            .apply("d7d5")
            .unwrap(),
    );
    // A sparse tactical position: queens facing off, material imbalance.
    let mut board: Vec<char> = ".".repeat(64).chars().collect();
    board[4] = 'K';
    board[60] = 'k';
    board[3] = 'Q';
    board[59] = 'q';
    board[32] = 'r'; // a5
    let encoded: String = board.into_iter().chain(['w']).collect();
    positions.push(Position::from_board_string(&encoded).unwrap());

    for position in &positions {
        for depth in 1..=3 {
            let (ab_value, ab_move) = alphabeta_best(position, depth);
            let side = position.side_to_move;
            let (ref_value, ref_move) =
                reference_minimax(position, 0, 0, side, depth);
            assert_eq!(ab_value, ref_value, "value diverged at depth {depth}");
            assert_eq!(ab_move, ref_move, "move diverged at depth {depth}");
        }
    }
}

#[test]
fn fools_mate_is_detected() {
    let position = Position::initial()
        .apply("f2f3")
        .unwrap()
        .apply("e7e5")
        .unwrap()
        .apply("g2g4")
        .unwrap()
        .apply("d8h4")
        .unwrap();
    assert_eq!(position.game_state(), GameState::Mate);
    assert_eq!(position.side_to_move, engine::WHITE);
}

#[test]
fn search_finds_the_fools_mate_blow() {
    let position = Position::initial()
        .apply("f2f3")
        .unwrap()
        .apply("e7e5")
        .unwrap()
        .apply("g2g4")
        .unwrap();
    let (value, best) = alphabeta_best(&position, 4);
    assert!(engine::is_mate_score(value) && value > 0);
    assert_eq!(best.as_deref(), Some("d8h4"));
}

#[test]
fn mate_and_draw_values_are_distinct_classes() {
    // Stalemate: black king a8 cornered by queen c7 and king c6.
    let mut stale: Vec<char> = ".".repeat(64).chars().collect();
    stale[56] = 'k';
    stale[50] = 'Q';
    stale[42] = 'K';
    let stale: String = stale.into_iter().chain(['b']).collect();
    let stalemate = Position::from_board_string(&stale).unwrap();
    let (draw_value, _) = alphabeta_best(&stalemate, 1);

    // Mate: black king h8, queen g7 guarded by king g6.
    let mut mated: Vec<char> = ".".repeat(64).chars().collect();
    mated[63] = 'k';
    mated[54] = 'Q';
    mated[46] = 'K';
    let mated: String = mated.into_iter().chain(['b']).collect();
    let checkmate = Position::from_board_string(&mated).unwrap();
    let (mate_value, _) = alphabeta_best(&checkmate, 1);

    assert_eq!(draw_value, DRAW_SCORE);
    assert!(engine::is_mate_score(mate_value));
    assert_ne!(draw_value, mate_value);
}

#[test]
fn terminal_root_has_no_legal_move() {
    let position = Position::initial()
        .apply("f2f3")
        .unwrap()
        .apply("e7e5")
        .unwrap()
        .apply("g2g4")
        .unwrap()
        .apply("d8h4")
        .unwrap();
    // Every pseudo-legal reply leaves the king in check.
    assert!(position
        .next_positions()
        .iter()
        .all(|successor| !successor.is_legal_board()));
}
