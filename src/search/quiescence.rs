//! 静态搜索
//!
//! 只搜吃子（被将军时搜全部走法），用静态评估做 stand pat。

use super::ordering::order_captures;
use super::{Searcher, MATE_SCORE};
use crate::board::Board;

impl Searcher {
    pub(super) fn quiescence(
        &mut self,
        board: &mut Board,
        mut alpha: i32,
        beta: i32,
        ply: usize,
        qs_depth: u32,
    ) -> i32 {
        self.nodes += 1;
        if self.aborted {
            return 0;
        }

        let side = board.side_to_move();
        if board.king_square(side).is_none() {
            return -MATE_SCORE + ply as i32;
        }

        let in_check = board.is_in_check(side);

        // 被将军时不能 stand pat
        if !in_check {
            let stand_pat = board.evaluate();
            if stand_pat >= beta {
                return beta;
            }
            if stand_pat > alpha {
                alpha = stand_pat;
            }
        }

        if qs_depth > self.config.quiescence_max_depth {
            return board.evaluate();
        }

        let mut moves = board.generate_moves(!in_check);
        order_captures(board, &mut moves);

        let mut has_legal = false;
        for mv in moves {
            let undo = board.apply(mv);
            if board.is_in_check(side) {
                board.revert(undo);
                continue;
            }
            has_legal = true;

            let score = -self.quiescence(board, -beta, -alpha, ply + 1, qs_depth + 1);
            board.revert(undo);

            if score >= beta {
                return beta;
            }
            if score > alpha {
                alpha = score;
            }
        }

        if in_check && !has_legal {
            return -MATE_SCORE + ply as i32;
        }

        alpha
    }
}

#[cfg(test)]
mod tests {
    use super::super::{SearchConfig, INFINITY};
    use super::*;
    use crate::test_positions;

    fn searcher() -> Searcher {
        Searcher::new(SearchConfig {
            tt_capacity: 4099,
            ..SearchConfig::default()
        })
    }

    #[test]
    fn test_stand_pat_quiet_position() {
        let mut board = Board::from_fen(test_positions::END_1).unwrap();
        let mut s = searcher();
        // 没有吃子可走，静态搜索等于静态评估
        assert_eq!(s.quiescence(&mut board, -INFINITY, INFINITY, 0, 0), board.evaluate());
    }

    #[test]
    fn test_wins_hanging_rook() {
        let mut board = Board::from_fen(test_positions::FREE_ROOK).unwrap();
        let fen = board.to_fen();
        let mut s = searcher();
        let score = s.quiescence(&mut board, -INFINITY, INFINITY, 0, 0);
        assert!(score > board.evaluate() + 150, "score {}", score);
        assert_eq!(board.to_fen(), fen);
        assert!(board.is_consistent());
    }

    #[test]
    fn test_missing_king_is_mate() {
        let mut board = Board::from_fen(test_positions::ROOK_TAKES_KING).unwrap();
        let undo = board.apply(crate::types::Move::from_notation("e8e9").unwrap());
        let mut s = searcher();
        assert_eq!(
            s.quiescence(&mut board, -INFINITY, INFINITY, 3, 0),
            -MATE_SCORE + 3
        );
        board.revert(undo);
    }
}
