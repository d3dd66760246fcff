//! 引擎门面
//!
//! 持有一局棋的局面和搜索状态，对外提供走子、搜索、重置。
//! 多个 Engine 实例互不影响。

use crate::board::Board;
use crate::error::{ConfigError, FenError, MoveError};
use crate::eval::PieceTables;
use crate::search::{SearchConfig, SearchLimits, SearchResult, Searcher};
use crate::types::{Color, Move, Piece, Square};
use crate::zobrist::DEFAULT_KEYS;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// 对局用时安排：前几次搜索用较短时间
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeControl {
    pub opening_searches: u32,
    /// 秒
    pub opening_time: f64,
    /// 秒
    pub default_time: f64,
}

impl Default for TimeControl {
    fn default() -> Self {
        TimeControl {
            opening_searches: 3,
            opening_time: 15.0,
            default_time: 30.0,
        }
    }
}

impl TimeControl {
    /// 第 `search_number` 次搜索（从 1 开始）的时间预算
    pub fn budget_for(&self, search_number: u32) -> f64 {
        if search_number <= self.opening_searches {
            self.opening_time
        } else {
            self.default_time
        }
    }
}

/// 引擎配置，可整体从一个 JSON 文件加载，缺省字段取默认值
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub search: SearchConfig,
    pub tables: PieceTables,
    pub time_control: TimeControl,
}

impl EngineConfig {
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

pub struct Engine {
    config: EngineConfig,
    tables: Arc<PieceTables>,
    board: Board,
    searcher: Searcher,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let tables = Arc::new(config.tables.clone());
        let board = Board::with_tables(tables.clone());
        let searcher = Searcher::new(config.search.clone());
        Engine {
            config,
            tables,
            board,
            searcher,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    /// 新对局：初始局面，清空搜索表和重复局面历史
    pub fn reset(&mut self) {
        self.board = Board::with_tables(self.tables.clone());
        self.searcher.new_game();
    }

    /// 载入任意局面（同样视为新对局）
    pub fn set_position_fen(&mut self, fen: &str) -> Result<(), FenError> {
        self.board = Board::from_fen_with(fen, DEFAULT_KEYS.clone(), self.tables.clone())?;
        self.searcher.new_game();
        Ok(())
    }

    /// 强制行棋方
    pub fn set_side_to_move(&mut self, side: Color) {
        self.board.set_side_to_move(side);
    }

    /// 校验并执行外部走法，返回被吃的棋子
    ///
    /// 吃子后清空重复局面历史（吃子不可逆，之前的局面不会再出现）。
    pub fn try_external_move(&mut self, mv: Move) -> Result<Option<Piece>, MoveError> {
        let undo = self.board.try_apply(mv)?;
        if undo.is_capture() {
            self.board.reset_repetitions();
        }
        debug_assert!(self.board.is_consistent());
        Ok(undo.captured())
    }

    /// 执行外部走法，非法时返回 false 且局面不变
    pub fn apply_external_move(&mut self, from: Square, to: Square) -> bool {
        match self.try_external_move(Move::new(from, to)) {
            Ok(_) => true,
            Err(e) => {
                debug!("rejected external move {}{}: {}", from, to, e);
                false
            }
        }
    }

    /// 在给定时间内为 `side` 搜索最佳走法，None 表示认输
    ///
    /// `side` 与当前行棋方不同时先切换行棋方。不执行走法。
    pub fn search(&mut self, time_budget_secs: f64, side: Color) -> Option<Move> {
        if self.board.side_to_move() != side {
            self.board.set_side_to_move(side);
        }
        self.think(&SearchLimits::time_secs(time_budget_secs))
            .best_move
    }

    /// 搜索当前局面，返回完整结果
    pub fn think(&mut self, limits: &SearchLimits) -> SearchResult {
        let result = self.searcher.think(&mut self.board, limits);
        debug_assert!(self.board.is_consistent());
        result
    }

    /// 搜索并执行最佳走法
    pub fn play_best(&mut self, limits: &SearchLimits) -> SearchResult {
        let result = self.think(limits);
        if let Some(mv) = result.best_move {
            let undo = self.board.apply(mv);
            if undo.is_capture() {
                self.board.reset_repetitions();
            }
        }
        result
    }

    /// 行棋方视角的静态评估
    pub fn evaluate(&self) -> i32 {
        self.board.evaluate()
    }

    /// 行棋方的所有合法走法
    pub fn legal_moves(&mut self) -> Vec<Move> {
        self.board.legal_moves()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::INITIAL_FEN;
    use crate::search::MATE_SCORE;
    use crate::test_positions;
    use crate::types::PieceType;

    fn engine() -> Engine {
        Engine::new(EngineConfig {
            search: SearchConfig {
                tt_capacity: 65_537,
                ..SearchConfig::default()
            },
            ..EngineConfig::default()
        })
    }

    fn sq(s: &str) -> Square {
        Square::from_notation(s).unwrap()
    }

    #[test]
    fn test_external_moves() {
        let mut e = engine();
        let fen = e.board().to_fen();
        assert!(!e.apply_external_move(sq("a0"), sq("a5")));
        assert!(!e.apply_external_move(sq("h7"), sq("e7")));
        assert_eq!(e.board().to_fen(), fen);

        assert!(e.apply_external_move(sq("h2"), sq("e2")));
        assert!(e.apply_external_move(sq("h7"), sq("e7")));
        assert_eq!(e.side_to_move(), Color::Red);
    }

    #[test]
    fn test_capture_clears_repetition_history() {
        let mut e = engine();
        e.set_position_fen(test_positions::ROOK_TRADE).unwrap();
        assert!(e.apply_external_move(sq("e0"), sq("d0")));
        assert_eq!(e.board().history_len(), 2);

        assert!(e.apply_external_move(sq("e6"), sq("e4")));
        assert_eq!(e.board().history_len(), 1);
        assert_eq!(e.board().repetition_count(), 1);
    }

    #[test]
    fn test_search_switches_side() {
        let mut e = engine();
        let mv = e.search(0.1, Color::Black).unwrap();
        assert_eq!(e.side_to_move(), Color::Black);
        assert_eq!(e.board().piece_at(mv.from).map(|p| p.color), Some(Color::Black));
    }

    #[test]
    fn test_resign_when_no_moves() {
        let mut e = engine();
        e.set_position_fen(test_positions::STALEMATE_BLACK).unwrap();
        assert_eq!(e.search(0.1, Color::Black), None);
        let result = e.think(&SearchLimits::depth(2));
        assert_eq!(result.score, -MATE_SCORE);
    }

    #[test]
    fn test_play_best_takes_rook() {
        let mut e = engine();
        e.set_position_fen(test_positions::FREE_ROOK).unwrap();
        let result = e.play_best(&SearchLimits::depth(3));
        assert_eq!(result.best_move, Move::from_notation("a4a6"));
        assert_eq!(e.side_to_move(), Color::Black);
        assert_eq!(
            e.board().piece_at(sq("a6")),
            Some(Piece::new(PieceType::Rook, Color::Red))
        );
        assert_eq!(e.board().history_len(), 1);
    }

    #[test]
    fn test_reset() {
        let mut e = engine();
        e.set_position_fen(test_positions::END_1).unwrap();
        e.think(&SearchLimits::depth(2));
        e.reset();
        assert_eq!(e.board().to_fen(), INITIAL_FEN);
        assert_eq!(e.board().history_len(), 1);
    }

    #[test]
    fn test_bad_fen_keeps_position() {
        let mut e = engine();
        assert!(e.set_position_fen("not a fen").is_err());
        assert_eq!(e.board().to_fen(), INITIAL_FEN);
    }

    #[test]
    fn test_config_json() {
        let config = EngineConfig::from_json_str(
            r#"{"search": {"max_depth": 12}, "time_control": {"opening_time": 5.0}}"#,
        )
        .unwrap();
        assert_eq!(config.search.max_depth, 12);
        assert_eq!(config.search.quiescence_max_depth, 6);
        assert_eq!(config.time_control.budget_for(1), 5.0);
        assert_eq!(config.time_control.budget_for(4), 30.0);
        assert_eq!(config.tables, PieceTables::default());

        let json = config.to_json_pretty().unwrap();
        assert_eq!(EngineConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_custom_tables_change_eval() {
        let mut config = EngineConfig::default();
        config.search.tt_capacity = 1024;
        config.tables.values[PieceType::Rook.index()] = 2000;
        let mut e = Engine::new(config);
        e.set_position_fen(test_positions::END_1).unwrap();
        let mut base = engine();
        base.set_position_fen(test_positions::END_1).unwrap();
        // 红方多一个车
        assert_eq!(e.evaluate() - base.evaluate(), 1000);
    }
}
