//! 棋盘状态与走子/撤销
//!
//! 使用 90 格数组存储棋子，并缓存：
//! - Zobrist 哈希（增量更新）
//! - 子力 + 位置分（红方视角，增量更新）
//! - 双方将的位置
//! - 本局出现过的局面哈希计数（用于重复局面判和）
//!
//! 走子 (`apply`) 返回 `Undo` 令牌，`revert` 用它把局面逐位恢复。

use crate::error::{FenError, MoveError};
use crate::eval::{relative_score, PieceTables, DEFAULT_TABLES};
use crate::fen::{parse_fen, pieces_to_fen, INITIAL_FEN};
use crate::types::{Color, Move, Piece, PieceType, Square, SQUARE_COUNT};
use crate::zobrist::{ZobristKeys, DEFAULT_KEYS};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// 走子撤销令牌
///
/// 记录走子前的哈希与分数，撤销时直接恢复，不依赖逆运算。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct Undo {
    mv: Move,
    captured: Option<Piece>,
    hash: u64,
    score: i32,
}

impl Undo {
    #[inline]
    pub fn mv(&self) -> Move {
        self.mv
    }

    /// 被吃的棋子
    #[inline]
    pub fn captured(&self) -> Option<Piece> {
        self.captured
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

/// 空着撤销令牌
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct NullUndo {
    hash: u64,
}

/// 棋盘（搜索用的可变局面）
#[derive(Clone)]
pub struct Board {
    /// 90 个格子的棋子数组 (10行 x 9列)
    squares: [Option<Piece>; SQUARE_COUNT],
    side_to_move: Color,
    hash: u64,
    /// 红方视角总分
    score: i32,
    /// 缓存双方将的位置，被吃掉时为 None
    kings: [Option<Square>; 2],
    /// 局面哈希 -> 出现次数
    repetitions: HashMap<u64, u32>,
    keys: Arc<ZobristKeys>,
    tables: Arc<PieceTables>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// 标准初始局面
    pub fn new() -> Board {
        Self::with_tables(DEFAULT_TABLES.clone())
    }

    /// 使用指定评估表的初始局面
    pub fn with_tables(tables: Arc<PieceTables>) -> Board {
        match Self::from_fen_with(INITIAL_FEN, DEFAULT_KEYS.clone(), tables) {
            Ok(board) => board,
            Err(e) => unreachable!("initial FEN is valid: {e}"),
        }
    }

    /// 从 FEN 字符串创建棋盘
    pub fn from_fen(fen: &str) -> Result<Board, FenError> {
        Self::from_fen_with(fen, DEFAULT_KEYS.clone(), DEFAULT_TABLES.clone())
    }

    pub fn from_fen_with(
        fen: &str,
        keys: Arc<ZobristKeys>,
        tables: Arc<PieceTables>,
    ) -> Result<Board, FenError> {
        let state = parse_fen(fen)?;
        let mut board = Board {
            squares: [None; SQUARE_COUNT],
            side_to_move: state.turn,
            hash: 0,
            score: 0,
            kings: [None; 2],
            repetitions: HashMap::new(),
            keys,
            tables,
        };

        for (sq, piece) in state.pieces {
            board.squares[sq.to_index()] = Some(piece);
        }

        board.kings = board.recompute_kings();
        board.hash = board.recompute_hash();
        board.score = board.recompute_score();
        board.reset_repetitions();
        Ok(board)
    }

    /// 导出 FEN
    pub fn to_fen(&self) -> String {
        let pieces: Vec<(Square, Piece)> = self.pieces(None).collect();
        pieces_to_fen(&pieces, self.side_to_move)
    }

    // ------------------------------------------------------------------
    // 查询
    // ------------------------------------------------------------------

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// 红方视角的增量总分
    #[inline]
    pub fn score(&self) -> i32 {
        self.score
    }

    /// 行棋方视角的静态评估
    #[inline]
    pub fn evaluate(&self) -> i32 {
        relative_score(self.score, self.side_to_move)
    }

    #[inline]
    pub fn tables(&self) -> &PieceTables {
        &self.tables
    }

    /// 获取某格的棋子，越界返回 None
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        if !sq.is_valid() {
            return None;
        }
        self.squares[sq.to_index()]
    }

    /// 检查格子是否有棋子
    #[inline]
    pub fn has_piece(&self, sq: Square) -> bool {
        sq.is_valid() && self.squares[sq.to_index()].is_some()
    }

    /// 将的位置（使用缓存）
    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.kings[color.index()]
    }

    /// 遍历棋子，`color` 为 None 时遍历双方
    pub fn pieces(&self, color: Option<Color>) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter_map(|(idx, p)| p.map(|p| (Square::from_index(idx), p)))
            .filter(move |(_, p)| color.map_or(true, |c| p.color == c))
    }

    /// 当前局面在本局历史中出现的次数
    #[inline]
    pub fn repetition_count(&self) -> u32 {
        self.repetitions.get(&self.hash).copied().unwrap_or(0)
    }

    /// 重复局面历史中不同局面的个数
    #[inline]
    pub fn history_len(&self) -> usize {
        self.repetitions.len()
    }

    /// 清空重复局面历史，只保留当前局面
    pub fn reset_repetitions(&mut self) {
        self.repetitions.clear();
        self.repetitions.insert(self.hash, 1);
    }

    // ------------------------------------------------------------------
    // 走子与撤销
    // ------------------------------------------------------------------

    /// 执行走子，返回撤销令牌
    ///
    /// 调用方保证起点有棋子（生成器产生的走法总是满足）。
    pub fn apply(&mut self, mv: Move) -> Undo {
        let from_idx = mv.from.to_index();
        let to_idx = mv.to.to_index();

        let undo_hash = self.hash;
        let undo_score = self.score;

        let piece = self.squares[from_idx]
            .take()
            .expect("apply: no piece on source square");
        let captured = self.squares[to_idx].take();

        // 哈希
        self.hash ^= self.keys.piece(mv.from, piece);
        if let Some(cap) = captured {
            self.hash ^= self.keys.piece(mv.to, cap);
        }
        self.hash ^= self.keys.piece(mv.to, piece);
        self.hash ^= self.keys.side();

        // 分数
        self.score -= self.tables.contribution(piece, mv.from);
        if let Some(cap) = captured {
            self.score -= self.tables.contribution(cap, mv.to);
        }
        self.score += self.tables.contribution(piece, mv.to);

        // 将的位置
        if piece.kind == PieceType::King {
            self.kings[piece.color.index()] = Some(mv.to);
        }
        if let Some(cap) = captured {
            if cap.kind == PieceType::King {
                self.kings[cap.color.index()] = None;
            }
        }

        self.squares[to_idx] = Some(piece);
        self.side_to_move = self.side_to_move.opposite();
        *self.repetitions.entry(self.hash).or_insert(0) += 1;

        Undo {
            mv,
            captured,
            hash: undo_hash,
            score: undo_score,
        }
    }

    /// 撤销走子
    pub fn revert(&mut self, undo: Undo) {
        if let Some(count) = self.repetitions.get_mut(&self.hash) {
            *count -= 1;
            if *count == 0 {
                self.repetitions.remove(&self.hash);
            }
        }

        let mv = undo.mv;
        let piece = self.squares[mv.to.to_index()]
            .take()
            .expect("revert: no piece on destination square");

        if piece.kind == PieceType::King {
            self.kings[piece.color.index()] = Some(mv.from);
        }
        if let Some(cap) = undo.captured {
            if cap.kind == PieceType::King {
                self.kings[cap.color.index()] = Some(mv.to);
            }
        }

        self.squares[mv.from.to_index()] = Some(piece);
        self.squares[mv.to.to_index()] = undo.captured;
        self.side_to_move = self.side_to_move.opposite();
        self.hash = undo.hash;
        self.score = undo.score;
    }

    /// 空着：只换行棋方（用于 Null Move Pruning），不计入重复局面
    pub fn apply_null(&mut self) -> NullUndo {
        let undo = NullUndo { hash: self.hash };
        self.side_to_move = self.side_to_move.opposite();
        self.hash ^= self.keys.side();
        undo
    }

    pub fn revert_null(&mut self, undo: NullUndo) {
        self.side_to_move = self.side_to_move.opposite();
        self.hash = undo.hash;
    }

    /// 强制设置行棋方（哈希同步更新，重复局面历史重置）
    pub fn set_side_to_move(&mut self, color: Color) {
        if self.side_to_move != color {
            self.side_to_move = color;
            self.hash ^= self.keys.side();
            self.reset_repetitions();
        }
    }

    /// 校验并执行外部走法
    ///
    /// 坐标越界、起点无子、不是行棋方的子、不符合走法规则、走后被将，均拒绝；
    /// 被拒绝时局面不变。
    pub fn try_apply(&mut self, mv: Move) -> Result<Undo, MoveError> {
        for sq in [mv.from, mv.to] {
            if !sq.is_valid() {
                return Err(MoveError::OffBoard(sq));
            }
        }
        let piece = self.piece_at(mv.from).ok_or(MoveError::EmptySource(mv.from))?;
        if piece.color != self.side_to_move {
            return Err(MoveError::WrongColor {
                square: mv.from,
                found: piece.color,
                expected: self.side_to_move,
            });
        }
        if !self.piece_moves(mv.from).contains(&mv) {
            return Err(MoveError::RuleViolation {
                from: mv.from,
                to: mv.to,
            });
        }

        let mover = self.side_to_move;
        let undo = self.apply(mv);
        if self.is_in_check(mover) {
            self.revert(undo);
            return Err(MoveError::SelfCheck {
                from: mv.from,
                to: mv.to,
            });
        }
        Ok(undo)
    }

    // ------------------------------------------------------------------
    // 从零重新计算（测试与校验用）
    // ------------------------------------------------------------------

    pub fn recompute_hash(&self) -> u64 {
        let mut hash = self
            .pieces(None)
            .fold(0u64, |h, (sq, p)| h ^ self.keys.piece(sq, p));
        if self.side_to_move == Color::Black {
            hash ^= self.keys.side();
        }
        hash
    }

    pub fn recompute_score(&self) -> i32 {
        self.pieces(None)
            .map(|(sq, p)| self.tables.contribution(p, sq))
            .sum()
    }

    pub fn recompute_kings(&self) -> [Option<Square>; 2] {
        let mut kings = [None; 2];
        for (sq, p) in self.pieces(None) {
            if p.kind == PieceType::King {
                kings[p.color.index()] = Some(sq);
            }
        }
        kings
    }

    /// 增量缓存与从零计算是否一致
    pub fn is_consistent(&self) -> bool {
        self.hash == self.recompute_hash()
            && self.score == self.recompute_score()
            && self.kings == self.recompute_kings()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "   a b c d e f g h i")?;
        for row in (0..10).rev() {
            write!(f, "{}  ", row)?;
            for col in 0..9 {
                let ch = self
                    .piece_at(Square::new(row, col))
                    .map_or('.', |p| p.to_fen_char());
                write!(f, "{} ", ch)?;
            }
            writeln!(f)?;
            if row == 5 {
                writeln!(f, "   -----------------")?;
            }
        }
        write!(f, "{} to move", self.side_to_move)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("fen", &self.to_fen())
            .field("hash", &format_args!("{:#018x}", self.hash))
            .field("score", &self.score)
            .finish()
    }
}
