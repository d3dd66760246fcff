//! 子力 + 位置分评估表
//!
//! 评估值 = Σ sign(color) × (子力价值 + 位置分)，红方为正。
//! 位置分表 (PST) 从红方视角给出，row 0 是红方底线；黑方使用时上下翻转
//! (row → 9 - row)。
//!
//! 默认表先给出每格的总价值，位置分 = 总价值 - 子力价值，
//! 所以默认配置下 子力价值 + 位置分 正好是表中的数。
//!
//! 这些数据是评估器的外部配置：内置一份默认表，也可以从 JSON 文件加载。
//! Board 在走棋/悔棋时增量维护总分，`Board::recompute_score` 给出从零计算的结果。

use crate::error::ConfigError;
use crate::types::{Color, Piece, PieceType, Square};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// PST (Piece-Square Table) - 从红方视角，row 0 是红方底线
pub type PstTable = [[i32; 9]; 10];

/// 将/帅：九宫底线中间最稳
const SQUARE_VALUE_KING: PstTable = [
    [0, 0, 0, 11, 15, 11, 0, 0, 0],
    [0, 0, 0, 2, 2, 2, 0, 0, 0],
    [0, 0, 0, 1, 1, 1, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
];

/// 士/仕
const SQUARE_VALUE_ADVISOR: PstTable = [
    [0, 0, 0, 30, 0, 30, 0, 0, 0],
    [0, 0, 0, 0, 33, 0, 0, 0, 0],
    [0, 0, 0, 30, 0, 30, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
];

/// 象/相
const SQUARE_VALUE_ELEPHANT: PstTable = [
    [0, 0, 30, 0, 0, 0, 30, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [28, 0, 0, 0, 33, 0, 0, 0, 28],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 30, 0, 0, 0, 30, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
];

/// 马：河口和对方九宫附近价值高
const SQUARE_VALUE_HORSE: PstTable = [
    [88, 85, 90, 88, 90, 88, 90, 85, 88],
    [85, 90, 92, 93, 73, 93, 92, 90, 85],
    [92, 94, 98, 95, 98, 95, 98, 94, 92],
    [90, 98, 101, 102, 103, 102, 101, 98, 90],
    [90, 100, 99, 103, 104, 103, 99, 100, 90],
    [93, 99, 99, 101, 102, 101, 99, 99, 93],
    [93, 108, 100, 107, 100, 107, 100, 108, 93],
    [92, 98, 99, 103, 99, 103, 99, 98, 92],
    [90, 96, 103, 97, 94, 97, 103, 96, 90],
    [90, 90, 90, 96, 90, 96, 90, 90, 90],
];

/// 车
const SQUARE_VALUE_ROOK: PstTable = [
    [194, 206, 204, 212, 200, 212, 204, 206, 194],
    [200, 208, 206, 212, 200, 212, 206, 208, 200],
    [198, 208, 204, 212, 212, 212, 204, 208, 198],
    [204, 209, 204, 212, 214, 212, 204, 209, 204],
    [208, 212, 212, 214, 215, 214, 212, 212, 208],
    [208, 211, 211, 214, 215, 214, 211, 211, 208],
    [206, 213, 213, 216, 216, 216, 213, 213, 206],
    [206, 208, 207, 214, 216, 214, 207, 208, 206],
    [206, 212, 209, 216, 233, 216, 209, 212, 206],
    [208, 210, 209, 215, 216, 215, 209, 210, 208],
];

/// 炮：底线炮、中炮价值高
const SQUARE_VALUE_CANNON: PstTable = [
    [96, 96, 97, 99, 99, 99, 97, 96, 96],
    [96, 97, 98, 98, 98, 98, 98, 97, 96],
    [97, 96, 100, 99, 101, 99, 100, 96, 97],
    [96, 96, 96, 96, 96, 96, 96, 96, 96],
    [95, 96, 99, 96, 100, 96, 99, 96, 95],
    [96, 96, 96, 96, 100, 96, 96, 96, 96],
    [96, 99, 99, 98, 100, 98, 99, 99, 96],
    [97, 97, 96, 91, 92, 91, 96, 97, 97],
    [98, 98, 96, 92, 89, 92, 96, 98, 98],
    [103, 103, 99, 91, 90, 91, 99, 103, 103],
];

/// 兵/卒：过河后价值大增，逼近九宫最好
const SQUARE_VALUE_PAWN: PstTable = [
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [7, 0, 7, 0, 15, 0, 7, 0, 7],
    [7, 0, 13, 0, 16, 0, 13, 0, 7],
    [29, 37, 41, 54, 59, 54, 41, 37, 29],
    [39, 46, 54, 59, 61, 59, 54, 46, 39],
    [39, 49, 64, 74, 74, 74, 64, 49, 39],
    [39, 49, 69, 84, 89, 84, 69, 49, 39],
    [9, 9, 9, 11, 13, 11, 9, 9, 9],
];

/// 评估配置：子力价值 + 位置分表，下标与 `PieceType::index()` 一致
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceTables {
    pub values: [i32; 7],
    pub positional: [PstTable; 7],
}

impl Default for PieceTables {
    fn default() -> Self {
        let square_values = [
            SQUARE_VALUE_KING,
            SQUARE_VALUE_ADVISOR,
            SQUARE_VALUE_ELEPHANT,
            SQUARE_VALUE_HORSE,
            SQUARE_VALUE_ROOK,
            SQUARE_VALUE_CANNON,
            SQUARE_VALUE_PAWN,
        ];
        let values = PieceType::ALL.map(|pt| pt.value());
        PieceTables {
            values,
            positional: PieceType::ALL.map(|pt| {
                let mut table = square_values[pt.index()];
                for v in table.iter_mut().flatten() {
                    *v -= values[pt.index()];
                }
                table
            }),
        }
    }
}

impl PieceTables {
    /// 子力价值
    #[inline]
    pub fn value(&self, kind: PieceType) -> i32 {
        self.values[kind.index()]
    }

    /// 位置分（黑方上下翻转）
    #[inline]
    pub fn positional(&self, piece: Piece, sq: Square) -> i32 {
        let row = match piece.color {
            Color::Red => sq.row as usize,
            Color::Black => 9 - sq.row as usize,
        };
        self.positional[piece.kind.index()][row][sq.col as usize]
    }

    /// 某个棋子在某格对总分（红方视角）的贡献
    #[inline]
    pub fn contribution(&self, piece: Piece, sq: Square) -> i32 {
        piece.color.sign() * (self.value(piece.kind) + self.positional(piece, sq))
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

lazy_static::lazy_static! {
    pub static ref DEFAULT_TABLES: Arc<PieceTables> = Arc::new(PieceTables::default());
}

/// 把红方视角的总分换成 `side` 视角
#[inline]
pub fn relative_score(red_score: i32, side: Color) -> i32 {
    red_score * side.sign()
}
