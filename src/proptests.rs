//! 基于 proptest 的性质测试
//!
//! 随机合法走子后检查增量状态与从零计算一致。

use crate::board::{Board, Undo};
use crate::test_positions;
use crate::types::{Color, Move};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 随机走子步数
fn move_count_strategy() -> impl Strategy<Value = usize> {
    1..=40usize
}

/// 选择走法用的随机种子
fn seed_strategy() -> impl Strategy<Value = u64> {
    any::<u64>()
}

/// 从几个命名局面中选一个起点
fn start_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        test_positions::START,
        test_positions::MID_1,
        test_positions::ROOK_TRADE,
        test_positions::PAWNS,
        test_positions::HORSE_LEG,
    ])
}

/// 随机合法走子，返回走过的 (走法, 撤销令牌)
fn random_playout(board: &mut Board, rng: &mut StdRng, num_moves: usize) -> Vec<(Move, Undo)> {
    let mut history = Vec::new();
    for _ in 0..num_moves {
        let moves = board.legal_moves();
        if moves.is_empty() {
            break;
        }
        let mv = moves[rng.gen_range(0..moves.len())];
        let undo = board.apply(mv);
        history.push((mv, undo));
        // 将被吃掉后不再继续
        if board.king_square(Color::Red).is_none() || board.king_square(Color::Black).is_none() {
            break;
        }
    }
    history
}

proptest! {
    /// 走子后逐步悔棋，局面、哈希、分数、将位完全恢复
    #[test]
    fn prop_apply_revert_restores_state(
        fen in start_strategy(),
        seed in seed_strategy(),
        num_moves in move_count_strategy(),
    ) {
        let mut board = Board::from_fen(fen).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);

        let initial_fen = board.to_fen();
        let initial_hash = board.hash();
        let initial_score = board.score();
        let initial_kings = board.recompute_kings();

        let mut history = random_playout(&mut board, &mut rng, num_moves);

        while let Some((mv, undo)) = history.pop() {
            prop_assert_eq!(undo.mv(), mv);
            board.revert(undo);
        }

        prop_assert_eq!(board.to_fen(), initial_fen);
        prop_assert_eq!(board.hash(), initial_hash);
        prop_assert_eq!(board.score(), initial_score);
        prop_assert_eq!(board.king_square(Color::Red), initial_kings[0]);
        prop_assert_eq!(board.king_square(Color::Black), initial_kings[1]);
        prop_assert_eq!(board.repetition_count(), 1);
        prop_assert_eq!(board.history_len(), 1);
    }

    /// 增量维护的哈希、分数、将位与重新计算一致
    #[test]
    fn prop_incremental_state_consistent(
        fen in start_strategy(),
        seed in seed_strategy(),
        num_moves in move_count_strategy(),
    ) {
        let mut board = Board::from_fen(fen).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..num_moves {
            let moves = board.legal_moves();
            if moves.is_empty() {
                break;
            }
            let mv = moves[rng.gen_range(0..moves.len())];
            let _ = board.apply(mv);

            prop_assert_eq!(board.hash(), board.recompute_hash());
            prop_assert_eq!(board.score(), board.recompute_score());
            prop_assert_eq!(board.recompute_kings()[0], board.king_square(Color::Red));
            prop_assert_eq!(board.recompute_kings()[1], board.king_square(Color::Black));

            if board.king_square(Color::Red).is_none() || board.king_square(Color::Black).is_none() {
                break;
            }
        }
    }

    /// 攻击检测与吃子生成结果一致
    #[test]
    fn prop_attacks_match_captures(
        seed in seed_strategy(),
        num_moves in move_count_strategy(),
    ) {
        let mut board = Board::new();
        let mut rng = StdRng::seed_from_u64(seed);
        let _history = random_playout(&mut board, &mut rng, num_moves);

        let by = board.side_to_move();
        let captures = board.generate_moves(true);
        for (target, _) in board.pieces(Some(by.opposite())) {
            let reachable = captures.iter().any(|m| m.to == target);
            prop_assert_eq!(board.is_attacked(target, by), reachable, "target {}", target);
        }
    }

    /// 合法走法走完后己方不被将军
    #[test]
    fn prop_legal_moves_are_safe(
        seed in seed_strategy(),
        num_moves in move_count_strategy(),
    ) {
        let mut board = Board::new();
        let mut rng = StdRng::seed_from_u64(seed);
        let _history = random_playout(&mut board, &mut rng, num_moves);

        let side = board.side_to_move();
        for mv in board.legal_moves() {
            let undo = board.apply(mv);
            prop_assert!(!board.is_in_check(side), "{} leaves {} in check", mv, side);
            board.revert(undo);
        }
    }
}
