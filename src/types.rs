//! 象棋核心类型定义
//!
//! 定义棋盘坐标、棋子、走法等基础数据类型

use serde::{Deserialize, Serialize};
use std::fmt;

/// 棋盘行数
pub const ROWS: i8 = 10;
/// 棋盘列数
pub const COLS: i8 = 9;
/// 格子总数
pub const SQUARE_COUNT: usize = 90;

/// 棋子颜色/阵营
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Black,
}

impl Color {
    /// 获取对方阵营
    #[inline]
    pub fn opposite(&self) -> Color {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }

    /// 数组下标（红 0，黑 1）
    #[inline]
    pub fn index(&self) -> usize {
        match self {
            Color::Red => 0,
            Color::Black => 1,
        }
    }

    /// 红方为正，黑方为负
    #[inline]
    pub fn sign(&self) -> i32 {
        match self {
            Color::Red => 1,
            Color::Black => -1,
        }
    }

    /// 从 FEN 行棋方字段解析（`w`/`r` 红方，`b` 黑方）
    pub fn from_fen_char(c: char) -> Option<Color> {
        match c {
            'w' | 'r' => Some(Color::Red),
            'b' => Some(Color::Black),
            _ => None,
        }
    }

    /// 转换为 FEN 字符
    pub fn to_fen_char(&self) -> char {
        match self {
            Color::Red => 'w',
            Color::Black => 'b',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => write!(f, "Red"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// 棋子类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceType {
    /// 将/帅
    King,
    /// 士/仕
    Advisor,
    /// 象/相
    Elephant,
    /// 马
    Horse,
    /// 车
    Rook,
    /// 炮
    Cannon,
    /// 卒/兵
    Pawn,
}

impl PieceType {
    /// 全部棋子类型，顺序与 `index()` 一致
    pub const ALL: [PieceType; 7] = [
        PieceType::King,
        PieceType::Advisor,
        PieceType::Elephant,
        PieceType::Horse,
        PieceType::Rook,
        PieceType::Cannon,
        PieceType::Pawn,
    ];

    /// 棋子类型转索引
    #[inline]
    pub fn index(&self) -> usize {
        match self {
            PieceType::King => 0,
            PieceType::Advisor => 1,
            PieceType::Elephant => 2,
            PieceType::Horse => 3,
            PieceType::Rook => 4,
            PieceType::Cannon => 5,
            PieceType::Pawn => 6,
        }
    }

    /// 从 FEN 字符解析（大小写均可，兼容 B/E 与 N/H 两套写法）
    pub fn from_fen_char(c: char) -> Option<PieceType> {
        match c.to_ascii_lowercase() {
            'k' => Some(PieceType::King),
            'a' => Some(PieceType::Advisor),
            'b' | 'e' => Some(PieceType::Elephant),
            'n' | 'h' => Some(PieceType::Horse),
            'r' => Some(PieceType::Rook),
            'c' => Some(PieceType::Cannon),
            'p' => Some(PieceType::Pawn),
            _ => None,
        }
    }

    /// 转换为 FEN 字符（小写）
    pub fn to_fen_char(&self) -> char {
        match self {
            PieceType::King => 'k',
            PieceType::Advisor => 'a',
            PieceType::Elephant => 'b',
            PieceType::Horse => 'n',
            PieceType::Rook => 'r',
            PieceType::Cannon => 'c',
            PieceType::Pawn => 'p',
        }
    }

    /// 默认子力价值
    pub fn value(&self) -> i32 {
        match self {
            PieceType::King => 10000,
            PieceType::Rook => 1000,
            PieceType::Cannon => 450,
            PieceType::Horse => 450,
            PieceType::Elephant => 250,
            PieceType::Advisor => 250,
            PieceType::Pawn => 100,
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceType::King => "King",
            PieceType::Advisor => "Advisor",
            PieceType::Elephant => "Elephant",
            PieceType::Horse => "Horse",
            PieceType::Rook => "Rook",
            PieceType::Cannon => "Cannon",
            PieceType::Pawn => "Pawn",
        };
        write!(f, "{}", name)
    }
}

/// 棋子 = (类型, 颜色)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceType,
    pub color: Color,
}

impl Piece {
    pub fn new(kind: PieceType, color: Color) -> Self {
        Piece { kind, color }
    }

    /// Zobrist 表下标：color * 7 + type
    #[inline]
    pub fn index(&self) -> usize {
        self.color.index() * 7 + self.kind.index()
    }

    /// FEN 字符（红方大写）
    pub fn to_fen_char(&self) -> char {
        let ch = self.kind.to_fen_char();
        match self.color {
            Color::Red => ch.to_ascii_uppercase(),
            Color::Black => ch,
        }
    }

    pub fn from_fen_char(c: char) -> Option<Piece> {
        let kind = PieceType::from_fen_char(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::Red
        } else {
            Color::Black
        };
        Some(Piece { kind, color })
    }
}

/// 棋盘坐标 (row, col)
///
/// row: 0-9 (0 是红方底线，9 是黑方底线)
/// col: 0-8 (从左到右)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    pub row: i8,
    pub col: i8,
}

impl Square {
    pub fn new(row: i8, col: i8) -> Self {
        Square { row, col }
    }

    /// 检查坐标是否在棋盘范围内
    #[inline]
    pub fn is_valid(&self) -> bool {
        (0..ROWS).contains(&self.row) && (0..COLS).contains(&self.col)
    }

    /// 检查坐标是否在某方九宫内
    #[inline]
    pub fn is_in_palace(&self, color: Color) -> bool {
        if !(3..=5).contains(&self.col) {
            return false;
        }
        match color {
            Color::Red => (0..=2).contains(&self.row),
            Color::Black => (7..=9).contains(&self.row),
        }
    }

    /// 检查坐标是否在己方半场（河界以内）
    #[inline]
    pub fn is_on_own_side(&self, color: Color) -> bool {
        match color {
            Color::Red => (0..=4).contains(&self.row),
            Color::Black => (5..=9).contains(&self.row),
        }
    }

    /// 坐标加偏移量
    #[inline]
    pub fn offset(&self, row_delta: i8, col_delta: i8) -> Square {
        Square {
            row: self.row + row_delta,
            col: self.col + col_delta,
        }
    }

    /// 数组下标 (row * 9 + col)，调用方保证坐标合法
    #[inline]
    pub fn to_index(&self) -> usize {
        self.row as usize * COLS as usize + self.col as usize
    }

    #[inline]
    pub fn from_index(idx: usize) -> Square {
        Square {
            row: (idx / COLS as usize) as i8,
            col: (idx % COLS as usize) as i8,
        }
    }

    /// 所有格子
    pub fn all() -> impl Iterator<Item = Square> {
        (0..SQUARE_COUNT).map(Square::from_index)
    }

    /// 从文本坐标解析（如 "a0"）
    pub fn from_notation(s: &str) -> Option<Square> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let col = match bytes[0] {
            b'a'..=b'i' => (bytes[0] - b'a') as i8,
            _ => return None,
        };
        let row = match bytes[1] {
            b'0'..=b'9' => (bytes[1] - b'0') as i8,
            _ => return None,
        };
        Some(Square { row, col })
    }

    /// 转换为文本坐标（如 "a0"）；列越界时输出 (row, col)
    pub fn to_notation(&self) -> String {
        if !(0..COLS).contains(&self.col) {
            return format!("({}, {})", self.row, self.col);
        }
        let col_char = (b'a' + self.col as u8) as char;
        format!("{}{}", col_char, self.row)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_notation())
    }
}

/// 走法：起点 -> 终点
///
/// 象棋没有升变、易位、吃过路兵，两点足以描述一步棋。
/// "无走法"（认输/中止）用 `Option<Move>::None` 表示。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Move { from, to }
    }

    /// 由 (r1, c1, r2, c2) 构造
    pub fn from_coords(r1: i8, c1: i8, r2: i8, c2: i8) -> Self {
        Move {
            from: Square::new(r1, c1),
            to: Square::new(r2, c2),
        }
    }

    /// 从文本走法解析（如 "h2e2"）
    pub fn from_notation(s: &str) -> Option<Move> {
        let s = s.trim();
        if s.len() != 4 || !s.is_ascii() {
            return None;
        }
        let from = Square::from_notation(&s[0..2])?;
        let to = Square::from_notation(&s[2..4])?;
        Some(Move { from, to })
    }

    pub fn to_notation(&self) -> String {
        format!("{}{}", self.from.to_notation(), self.to.to_notation())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_notation())
    }
}
