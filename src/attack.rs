//! 攻击检测
//!
//! 从目标格反向查找攻击者，不生成走法。用于将军检测和走法合法性过滤。

use crate::board::Board;
use crate::movegen::{pawn_forward, DIAGONAL, HORSE_JUMPS, ORTHOGONAL};
use crate::types::{Color, Piece, PieceType, Square};

impl Board {
    /// `by` 方是否有棋子能走到（吃到）`target`
    pub fn is_attacked(&self, target: Square, by: Color) -> bool {
        self.attacked_on_lines(target, by)
            || self.attacked_by_step_pieces(target, by)
            || self.attacked_by_horse(target, by)
            || self.attacked_by_pawn(target, by)
    }

    /// 是否被将军；将不在棋盘上也视为被将军
    pub fn is_in_check(&self, color: Color) -> bool {
        match self.king_square(color) {
            Some(sq) => self.is_attacked(sq, color.opposite()),
            None => true,
        }
    }

    #[inline]
    fn is_piece(&self, sq: Square, kind: PieceType, color: Color) -> bool {
        self.piece_at(sq) == Some(Piece::new(kind, color))
    }

    /// 车、炮、飞将
    fn attacked_on_lines(&self, target: Square, by: Color) -> bool {
        let target_is_enemy_king = self.is_piece(target, PieceType::King, by.opposite());

        for (dr, dc) in ORTHOGONAL {
            let mut sq = target.offset(dr, dc);
            let mut screen = false;

            while sq.is_valid() {
                if let Some(piece) = self.piece_at(sq) {
                    if !screen {
                        if piece.color == by {
                            if piece.kind == PieceType::Rook {
                                return true;
                            }
                            if piece.kind == PieceType::King && target_is_enemy_king {
                                return true;
                            }
                        }
                        screen = true;
                    } else {
                        if piece.color == by && piece.kind == PieceType::Cannon {
                            return true;
                        }
                        break;
                    }
                }
                sq = sq.offset(dr, dc);
            }
        }
        false
    }

    /// 将、士、象
    fn attacked_by_step_pieces(&self, target: Square, by: Color) -> bool {
        if target.is_in_palace(by) {
            for (dr, dc) in ORTHOGONAL {
                if self.is_piece(target.offset(dr, dc), PieceType::King, by) {
                    return true;
                }
            }
            for (dr, dc) in DIAGONAL {
                if self.is_piece(target.offset(dr, dc), PieceType::Advisor, by) {
                    return true;
                }
            }
        }

        if target.is_on_own_side(by) {
            for (dr, dc) in DIAGONAL {
                let eye = target.offset(dr, dc);
                if self.is_piece(target.offset(2 * dr, 2 * dc), PieceType::Elephant, by)
                    && !self.has_piece(eye)
                {
                    return true;
                }
            }
        }
        false
    }

    fn attacked_by_horse(&self, target: Square, by: Color) -> bool {
        for ((dr, dc), (lr, lc)) in HORSE_JUMPS {
            // 马在 target - jump，马腿以马的位置计算
            let horse = target.offset(-dr, -dc);
            if self.is_piece(horse, PieceType::Horse, by) && !self.has_piece(horse.offset(lr, lc)) {
                return true;
            }
        }
        false
    }

    fn attacked_by_pawn(&self, target: Square, by: Color) -> bool {
        if self.is_piece(target.offset(-pawn_forward(by), 0), PieceType::Pawn, by) {
            return true;
        }
        // 过河兵横向攻击；与 target 同行，所以用 target 判断是否过河
        if !target.is_on_own_side(by) {
            for dc in [-1, 1] {
                if self.is_piece(target.offset(0, dc), PieceType::Pawn, by) {
                    return true;
                }
            }
        }
        false
    }
}
