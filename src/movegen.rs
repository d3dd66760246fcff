//! 走法生成
//!
//! 按棋子类型生成伪合法走法（不检查走后是否被将）。
//! 合法性过滤在搜索层：走子后检查己方将是否被攻击。

use crate::board::Board;
use crate::types::{Color, Move, Piece, PieceType, Square};

/// 直线方向：上下左右
pub(crate) const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// 斜线方向
pub(crate) const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// 马：(落点偏移, 马腿偏移)
pub(crate) const HORSE_JUMPS: [((i8, i8), (i8, i8)); 8] = [
    ((2, 1), (1, 0)),
    ((2, -1), (1, 0)),
    ((-2, 1), (-1, 0)),
    ((-2, -1), (-1, 0)),
    ((1, 2), (0, 1)),
    ((1, -2), (0, -1)),
    ((-1, 2), (0, 1)),
    ((-1, -2), (0, -1)),
];

/// 兵的前进方向
#[inline]
pub(crate) fn pawn_forward(color: Color) -> i8 {
    match color {
        Color::Red => 1,
        Color::Black => -1,
    }
}

/// 兵是否已过河
#[inline]
pub(crate) fn pawn_crossed_river(color: Color, sq: Square) -> bool {
    !sq.is_on_own_side(color)
}

impl Board {
    /// 某格棋子的所有伪合法走法；空格返回空列表
    pub fn piece_moves(&self, from: Square) -> Vec<Move> {
        let mut moves = Vec::with_capacity(17);
        if let Some(piece) = self.piece_at(from) {
            self.push_piece_moves(from, piece, &mut moves);
        }
        moves
    }

    /// 行棋方的所有伪合法走法；`captures_only` 时只保留吃子
    pub fn generate_moves(&self, captures_only: bool) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        for (from, piece) in self.pieces(Some(self.side_to_move())) {
            self.push_piece_moves(from, piece, &mut moves);
        }
        if captures_only {
            moves.retain(|mv| self.has_piece(mv.to));
        }
        moves
    }

    /// 行棋方的所有合法走法（走子-检查-撤销）
    pub fn legal_moves(&mut self) -> Vec<Move> {
        let color = self.side_to_move();
        let mut legal = Vec::with_capacity(64);
        for mv in self.generate_moves(false) {
            let undo = self.apply(mv);
            let in_check = self.is_in_check(color);
            self.revert(undo);
            if !in_check {
                legal.push(mv);
            }
        }
        legal
    }

    /// 合法走法树的叶子数（走法生成正确性校验）
    pub fn perft(&mut self, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }
        let moves = self.legal_moves();
        if depth == 1 {
            return moves.len() as u64;
        }
        let mut nodes = 0;
        for mv in moves {
            let undo = self.apply(mv);
            nodes += self.perft(depth - 1);
            self.revert(undo);
        }
        nodes
    }

    fn push_piece_moves(&self, from: Square, piece: Piece, moves: &mut Vec<Move>) {
        match piece.kind {
            PieceType::King => self.king_moves(from, piece.color, moves),
            PieceType::Advisor => self.advisor_moves(from, piece.color, moves),
            PieceType::Elephant => self.elephant_moves(from, piece.color, moves),
            PieceType::Horse => self.horse_moves(from, piece.color, moves),
            PieceType::Rook => self.rook_moves(from, piece.color, moves),
            PieceType::Cannon => self.cannon_moves(from, piece.color, moves),
            PieceType::Pawn => self.pawn_moves(from, piece.color, moves),
        }
    }

    /// 目标格在棋盘内且不是己方棋子
    #[inline]
    fn can_move_to(&self, color: Color, to: Square) -> bool {
        if !to.is_valid() {
            return false;
        }
        match self.piece_at(to) {
            None => true,
            Some(target) => target.color != color,
        }
    }

    fn king_moves(&self, from: Square, color: Color, moves: &mut Vec<Move>) {
        for (dr, dc) in ORTHOGONAL {
            let to = from.offset(dr, dc);
            if to.is_in_palace(color) && self.can_move_to(color, to) {
                moves.push(Move::new(from, to));
            }
        }

        // 飞将：同一直线上中间无子时可直接吃对方将
        for (dr, dc) in ORTHOGONAL {
            let mut to = from.offset(dr, dc);
            while to.is_valid() {
                if let Some(target) = self.piece_at(to) {
                    if target.kind == PieceType::King && target.color != color {
                        // 相邻的情况已由普通一步覆盖
                        let adjacent = to == from.offset(dr, dc) && to.is_in_palace(color);
                        if !adjacent {
                            moves.push(Move::new(from, to));
                        }
                    }
                    break;
                }
                to = to.offset(dr, dc);
            }
        }
    }

    fn advisor_moves(&self, from: Square, color: Color, moves: &mut Vec<Move>) {
        for (dr, dc) in DIAGONAL {
            let to = from.offset(dr, dc);
            if to.is_in_palace(color) && self.can_move_to(color, to) {
                moves.push(Move::new(from, to));
            }
        }
    }

    fn elephant_moves(&self, from: Square, color: Color, moves: &mut Vec<Move>) {
        for (dr, dc) in DIAGONAL {
            let to = from.offset(2 * dr, 2 * dc);
            let eye = from.offset(dr, dc);

            // 象不能过河
            if !to.is_valid() || !to.is_on_own_side(color) {
                continue;
            }
            // 塞象眼
            if self.has_piece(eye) {
                continue;
            }
            if self.can_move_to(color, to) {
                moves.push(Move::new(from, to));
            }
        }
    }

    fn horse_moves(&self, from: Square, color: Color, moves: &mut Vec<Move>) {
        for ((dr, dc), (lr, lc)) in HORSE_JUMPS {
            let to = from.offset(dr, dc);
            // 蹩马腿
            if !to.is_valid() || self.has_piece(from.offset(lr, lc)) {
                continue;
            }
            if self.can_move_to(color, to) {
                moves.push(Move::new(from, to));
            }
        }
    }

    fn rook_moves(&self, from: Square, color: Color, moves: &mut Vec<Move>) {
        for (dr, dc) in ORTHOGONAL {
            let mut to = from.offset(dr, dc);
            while to.is_valid() {
                match self.piece_at(to) {
                    None => moves.push(Move::new(from, to)),
                    Some(target) => {
                        if target.color != color {
                            moves.push(Move::new(from, to));
                        }
                        break;
                    }
                }
                to = to.offset(dr, dc);
            }
        }
    }

    fn cannon_moves(&self, from: Square, color: Color, moves: &mut Vec<Move>) {
        for (dr, dc) in ORTHOGONAL {
            let mut to = from.offset(dr, dc);
            let mut found_screen = false;

            while to.is_valid() {
                match self.piece_at(to) {
                    None => {
                        if !found_screen {
                            moves.push(Move::new(from, to));
                        }
                    }
                    Some(target) => {
                        if !found_screen {
                            // 炮架
                            found_screen = true;
                        } else {
                            if target.color != color {
                                moves.push(Move::new(from, to));
                            }
                            break;
                        }
                    }
                }
                to = to.offset(dr, dc);
            }
        }
    }

    fn pawn_moves(&self, from: Square, color: Color, moves: &mut Vec<Move>) {
        let forward = from.offset(pawn_forward(color), 0);
        if self.can_move_to(color, forward) {
            moves.push(Move::new(from, forward));
        }

        // 过河后可以左右走
        if pawn_crossed_river(color, from) {
            for dc in [-1, 1] {
                let side = from.offset(0, dc);
                if self.can_move_to(color, side) {
                    moves.push(Move::new(from, side));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_positions;

    fn destinations(board: &Board, from: &str) -> Vec<String> {
        let mut v: Vec<String> = board
            .piece_moves(Square::from_notation(from).unwrap())
            .iter()
            .map(|m| m.to.to_notation())
            .collect();
        v.sort();
        v
    }

    #[test]
    fn test_legal_moves_initial() {
        let mut board = Board::new();
        // 初始局面红方有 44 个合法走法
        assert_eq!(board.legal_moves().len(), 44);
        assert_eq!(board.generate_moves(false).len(), 44);
        // 只有两门炮打底线马
        let mut captures: Vec<String> =
            board.generate_moves(true).iter().map(|m| m.to_notation()).collect();
        captures.sort();
        assert_eq!(captures, vec!["b2b9".to_string(), "h2h9".to_string()]);
    }

    #[test]
    fn test_perft_initial() {
        let mut board = Board::new();
        assert_eq!(board.perft(1), 44);
        assert_eq!(board.perft(2), 1920);
        assert_eq!(board.perft(3), 79666);
        assert!(board.is_consistent());
    }

    #[test]
    fn test_cannon_capture_over_screen() {
        // 红炮 a4，同一横线 c4 红兵做炮架，e4 黑马
        let board = Board::from_fen(test_positions::CANNON_SCREEN).unwrap();
        let dests = destinations(&board, "a4");
        assert!(dests.contains(&"b4".to_string()));
        assert!(dests.contains(&"e4".to_string()));
        // 炮架本身和炮架之后的空格都不能去，吃子后不再继续
        assert!(!dests.contains(&"c4".to_string()));
        assert!(!dests.contains(&"d4".to_string()));
        assert!(!dests.contains(&"f4".to_string()));
        assert!(!dests.contains(&"g4".to_string()));
    }

    #[test]
    fn test_cannon_two_screens_blocks() {
        // c4 与 d4 两个子挡住，e4 不可吃
        let board = Board::from_fen(test_positions::CANNON_DOUBLE_SCREEN).unwrap();
        let dests = destinations(&board, "a4");
        assert!(!dests.contains(&"e4".to_string()));
        assert!(!dests.contains(&"d4".to_string()));
    }

    #[test]
    fn test_elephant_river_and_eye() {
        let board = Board::from_fen(test_positions::ELEPHANTS_AT_RIVER).unwrap();
        // 红相 c4：不能过河到 a6/e6；e2 方向 d3 塞象眼
        assert_eq!(destinations(&board, "c4"), vec!["a2".to_string()]);
        // 黑象 g5：不能过河到 e3/i3；i7 方向 h6 塞象眼
        assert_eq!(destinations(&board, "g5"), vec!["e7".to_string()]);
    }

    #[test]
    fn test_horse_leg() {
        let board = Board::from_fen(test_positions::HORSE_LEG).unwrap();
        // 红马 e4，e5 被挡，向上的两个落点被蹩
        let dests = destinations(&board, "e4");
        assert!(!dests.contains(&"d6".to_string()));
        assert!(!dests.contains(&"f6".to_string()));
        assert!(dests.contains(&"d2".to_string()));
        assert!(dests.contains(&"c5".to_string()));
        assert_eq!(dests.len(), 6);
    }

    #[test]
    fn test_pawn_moves() {
        let board = Board::from_fen(test_positions::PAWNS).unwrap();
        // 未过河的红兵只能前进
        assert_eq!(destinations(&board, "a3"), vec!["a4".to_string()]);
        // 过河后可横走，不能后退
        assert_eq!(
            destinations(&board, "e6"),
            vec!["d6".to_string(), "e7".to_string(), "f6".to_string()]
        );
        // 黑卒向 row 0 方向走
        assert_eq!(destinations(&board, "i6"), vec!["i5".to_string()]);
        assert_eq!(
            destinations(&board, "c4"),
            vec!["b4".to_string(), "c3".to_string(), "d4".to_string()]
        );
    }

    #[test]
    fn test_king_and_advisor_stay_in_palace() {
        let board = Board::from_fen(test_positions::PALACE_CORNER).unwrap();
        assert_eq!(
            destinations(&board, "d2"),
            vec!["d1".to_string(), "e2".to_string()]
        );
        assert_eq!(destinations(&board, "f0"), vec!["e1".to_string()]);
    }

    #[test]
    fn test_flying_general_move() {
        let board = Board::from_fen(test_positions::KINGS_FACING).unwrap();
        let dests = destinations(&board, "e0");
        assert!(dests.contains(&"e9".to_string()));
    }

    #[test]
    fn test_own_pieces_excluded() {
        let board = Board::new();
        for mv in board.generate_moves(false) {
            let target = board.piece_at(mv.to);
            assert!(target.map_or(true, |p| p.color != Color::Red), "{}", mv);
        }
    }
}
