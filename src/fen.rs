//! FEN 解析和生成
//!
//! 标准象棋 FEN
//!
//! 格式: `<棋盘> <行棋方> [- - 0 1]`
//!
//! 棋盘符号：
//! - 红方：K(帅) A(仕) B/E(相) N/H(马) R(车) C(炮) P(兵)
//! - 黑方：k a b/e n/h r c p
//! - 空格：数字 (1-9)
//!
//! 第一段是 row 9（黑方底线），最后一段是 row 0（红方底线）。
//! 行棋方：`w` 或 `r` 表示红方，`b` 表示黑方。

use crate::error::FenError;
use crate::types::{Color, Piece, PieceType, Square};

/// 初始局面
pub const INITIAL_FEN: &str = "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR w";

/// FEN 解析后的状态
#[derive(Debug, Clone, PartialEq)]
pub struct FenState {
    pub pieces: Vec<(Square, Piece)>,
    pub turn: Color,
}

/// 解析 FEN 字符串
pub fn parse_fen(fen: &str) -> Result<FenState, FenError> {
    let mut parts = fen.split_whitespace();
    let board_str = parts.next().ok_or(FenError::Empty)?;
    // 缺省行棋方为红方
    let turn = match parts.next() {
        None => Color::Red,
        Some(s) => {
            let mut chars = s.chars();
            match (chars.next().and_then(Color::from_fen_char), chars.next()) {
                (Some(color), None) => color,
                _ => return Err(FenError::InvalidSide(s.to_string())),
            }
        }
    };

    let pieces = parse_board(board_str)?;

    for color in [Color::Red, Color::Black] {
        let kings = pieces
            .iter()
            .filter(|(_, p)| p.color == color && p.kind == PieceType::King)
            .count();
        if kings > 1 {
            return Err(FenError::DuplicateKing(color));
        }
    }

    Ok(FenState { pieces, turn })
}

/// 解析棋盘字符串
fn parse_board(board_str: &str) -> Result<Vec<(Square, Piece)>, FenError> {
    let ranks: Vec<&str> = board_str.split('/').collect();
    if ranks.len() != 10 {
        return Err(FenError::RankCount(ranks.len()));
    }

    let mut pieces = Vec::with_capacity(32);

    for (rank_idx, rank_str) in ranks.iter().enumerate() {
        // FEN 从上往下是 row 9 到 row 0
        let row = (9 - rank_idx) as i8;
        let mut col: usize = 0;

        for ch in rank_str.chars() {
            if let Some(n) = ch.to_digit(10) {
                col += n as usize;
            } else {
                let piece = Piece::from_fen_char(ch).ok_or(FenError::InvalidPiece(ch))?;
                if col < 9 {
                    pieces.push((Square::new(row, col as i8), piece));
                }
                col += 1;
            }
        }

        if col != 9 {
            return Err(FenError::ColumnCount {
                rank: rank_idx,
                cols: col,
            });
        }
    }

    Ok(pieces)
}

/// 从棋子列表生成 FEN 字符串
pub fn pieces_to_fen(pieces: &[(Square, Piece)], turn: Color) -> String {
    let mut grid: [[Option<Piece>; 9]; 10] = [[None; 9]; 10];
    for (sq, piece) in pieces {
        if sq.is_valid() {
            grid[sq.row as usize][sq.col as usize] = Some(*piece);
        }
    }

    let mut ranks = Vec::with_capacity(10);

    // 从 row 9 到 row 0
    for row in grid.iter().rev() {
        let mut rank = String::new();
        let mut empty = 0;
        for cell in row {
            match cell {
                Some(piece) => {
                    if empty > 0 {
                        rank.push_str(&empty.to_string());
                        empty = 0;
                    }
                    rank.push(piece.to_fen_char());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            rank.push_str(&empty.to_string());
        }
        ranks.push(rank);
    }

    format!("{} {}", ranks.join("/"), turn.to_fen_char())
}
