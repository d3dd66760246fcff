//! 错误类型

use crate::types::{Color, Square};
use thiserror::Error;

/// FEN 解析错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("FEN is empty")]
    Empty,
    #[error("invalid board: expected 10 ranks, got {0}")]
    RankCount(usize),
    #[error("rank {rank} has {cols} columns, expected 9")]
    ColumnCount { rank: usize, cols: usize },
    #[error("invalid piece character '{0}'")]
    InvalidPiece(char),
    #[error("invalid side to move '{0}'")]
    InvalidSide(String),
    #[error("{0} has more than one king")]
    DuplicateKing(Color),
}

/// 外部走法被拒绝的原因
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("square {0} is off the board")]
    OffBoard(Square),
    #[error("no piece on {0}")]
    EmptySource(Square),
    #[error("piece on {square} belongs to {found}, but {expected} is to move")]
    WrongColor {
        square: Square,
        found: Color,
        expected: Color,
    },
    #[error("{from}{to} does not follow the piece's movement rules")]
    RuleViolation { from: Square, to: Square },
    #[error("{from}{to} leaves the mover's king in check")]
    SelfCheck { from: Square, to: Square },
}

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}

/// 协议命令解析错误
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProtocolError {
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error("'{command}' expects {expected}")]
    BadArguments {
        command: &'static str,
        expected: &'static str,
    },
}
