//! Zobrist Hashing
//!
//! 每个 (格子, 颜色+棋子类型) 一个 64 位随机数，另加一个"黑方行棋"随机数。
//! 随机数由固定种子生成，同一局面在不同进程中得到相同哈希。

use crate::types::{Piece, Square, SQUARE_COUNT};
use rand::prelude::*;
use std::sync::Arc;

/// 默认种子
pub const DEFAULT_SEED: u64 = 12345;

/// Zobrist 哈希表 - 预计算随机数
#[derive(Debug)]
pub struct ZobristKeys {
    // [square][color * 7 + piece_type] = 90 * 14
    pieces: [[u64; 14]; SQUARE_COUNT],
    side: u64,
}

impl ZobristKeys {
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut pieces = [[0u64; 14]; SQUARE_COUNT];

        for square in pieces.iter_mut() {
            for key in square.iter_mut() {
                *key = rng.gen();
            }
        }

        ZobristKeys {
            pieces,
            side: rng.gen(),
        }
    }

    #[inline]
    pub fn piece(&self, sq: Square, piece: Piece) -> u64 {
        self.pieces[sq.to_index()][piece.index()]
    }

    /// 黑方行棋
    #[inline]
    pub fn side(&self) -> u64 {
        self.side
    }
}

// 全局默认 Zobrist 表（只读，各 Board 共享同一份）
lazy_static::lazy_static! {
    pub static ref DEFAULT_KEYS: Arc<ZobristKeys> = Arc::new(ZobristKeys::new(DEFAULT_SEED));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, PieceType};
    use std::collections::HashSet;

    #[test]
    fn test_deterministic() {
        let a = ZobristKeys::new(DEFAULT_SEED);
        let b = ZobristKeys::new(DEFAULT_SEED);
        let p = Piece::new(PieceType::Cannon, Color::Black);
        assert_eq!(a.piece(Square::new(7, 1), p), b.piece(Square::new(7, 1), p));
        assert_eq!(a.side(), b.side());
    }

    #[test]
    fn test_keys_distinct() {
        let keys = ZobristKeys::new(DEFAULT_SEED);
        let mut seen = HashSet::new();
        for sq in Square::all() {
            for color in [Color::Red, Color::Black] {
                for kind in PieceType::ALL {
                    assert!(seen.insert(keys.piece(sq, Piece::new(kind, color))));
                }
            }
        }
        assert!(seen.insert(keys.side()));
    }
}
