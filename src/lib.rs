//! Xiangqi (Chinese chess) Alpha-Beta Engine
//!
//! 象棋 AI 引擎 - 迭代加深 Alpha-Beta 搜索，支持 FEN 输入输出和文本对局协议

pub mod attack;
pub mod board;
pub mod engine;
pub mod error;
pub mod eval;
pub mod fen;
pub mod movegen;
pub mod protocol;
pub mod search;
pub mod test_positions;
pub mod tt;
pub mod types;
pub mod zobrist;

#[cfg(test)]
mod proptests;

pub use board::{Board, NullUndo, Undo};
pub use engine::{Engine, EngineConfig, TimeControl};
pub use error::{ConfigError, FenError, MoveError, ProtocolError};
pub use eval::PieceTables;
pub use fen::{parse_fen, pieces_to_fen, FenState, INITIAL_FEN};
pub use search::{
    SearchConfig, SearchLimits, SearchResult, Searcher, DRAW_SCORE, MATE_SCORE, MATE_THRESHOLD,
};
pub use types::{Color, Move, Piece, PieceType, Square};
