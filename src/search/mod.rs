//! Alpha-Beta 搜索引擎
//!
//! - 负极大值 (negamax)，分数总是行棋方视角
//! - 置换表、杀手走法、历史启发
//! - 空着裁剪、后期走法缩减 (LMR)、将军延伸
//! - 静态搜索
//! - 迭代加深 + 时间控制
//!
//! 置换表、历史表跨搜索保留，只在新对局时清空；杀手表每次搜索清空。

mod ordering;
mod quiescence;

pub use ordering::{mvv_lva, HistoryTable, KillerTable, MAX_PLY};

use crate::board::Board;
use crate::tt::{TTEntry, TTFlag, TranspositionTable};
use crate::types::Move;
use log::{debug, info};
use ordering::order_moves;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// 将死分
pub const MATE_SCORE: i32 = 30000;
/// 绝对值超过该值视为杀棋
pub const MATE_THRESHOLD: i32 = 20000;
pub const DRAW_SCORE: i32 = 0;
/// 搜索窗口边界，比任何杀棋分都大
pub const INFINITY: i32 = MATE_SCORE + 1000;

/// 搜索参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// 迭代加深最大深度
    pub max_depth: u32,
    /// 置换表槽位数
    pub tt_capacity: usize,
    /// 每搜索多少节点检查一次时间
    pub node_poll_interval: u64,
    /// 已用时间超过预算的这个比例就不再开始下一轮
    pub next_iteration_fraction: f64,
    /// 至少搜到这个深度才按上面的比例提前停止
    pub min_depth_before_time_stop: u32,
    /// 每条路线可用的将军延伸次数
    pub check_extensions: i32,
    /// 静态搜索最大层数
    pub quiescence_max_depth: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            max_depth: 64,
            tt_capacity: 1_000_003,
            node_poll_interval: 2048,
            next_iteration_fraction: 0.16,
            min_depth_before_time_stop: 4,
            check_extensions: 1,
            quiescence_max_depth: 6,
        }
    }
}

/// 单次搜索的限制；两者都给时先到先停
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SearchLimits {
    pub time: Option<Duration>,
    pub depth: Option<u32>,
}

impl SearchLimits {
    /// 按秒数限时，负数或非法值视为 0
    pub fn time_secs(secs: f64) -> Self {
        SearchLimits {
            time: Some(Duration::try_from_secs_f64(secs.max(0.0)).unwrap_or(Duration::ZERO)),
            depth: None,
        }
    }

    /// 固定深度，不限时
    pub fn depth(depth: u32) -> Self {
        SearchLimits {
            time: None,
            depth: Some(depth),
        }
    }

    pub fn with_depth(mut self, depth: Option<u32>) -> Self {
        self.depth = depth;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// None 表示无合法走法（认输）
    pub best_move: Option<Move>,
    /// 行棋方视角
    pub score: i32,
    /// 最后完成的迭代深度
    pub depth: u32,
    pub nodes: u64,
    pub elapsed: Duration,
}

impl SearchResult {
    pub fn is_mate_score(&self) -> bool {
        self.score.abs() > MATE_THRESHOLD
    }
}

pub struct Searcher {
    config: SearchConfig,
    tt: TranspositionTable,
    killers: KillerTable,
    history: HistoryTable,
    nodes: u64,
    next_poll: u64,
    start_time: Instant,
    time_limit: Option<Duration>,
    /// 当前迭代深度；第一轮不检查时间
    iteration: u32,
    aborted: bool,
}

impl Searcher {
    pub fn new(config: SearchConfig) -> Self {
        Searcher {
            tt: TranspositionTable::new(config.tt_capacity),
            killers: KillerTable::new(),
            history: HistoryTable::new(),
            nodes: 0,
            next_poll: config.node_poll_interval,
            start_time: Instant::now(),
            time_limit: None,
            iteration: 0,
            aborted: false,
            config,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn tt(&self) -> &TranspositionTable {
        &self.tt
    }

    pub fn history(&self) -> &HistoryTable {
        &self.history
    }

    /// 新对局：清空置换表、历史表、杀手表
    pub fn new_game(&mut self) {
        self.tt.clear();
        self.history.clear();
        self.killers.clear();
        debug!("search tables cleared");
    }

    /// 新搜索：清空杀手表和计数，开始计时
    pub fn new_search(&mut self, limits: &SearchLimits) {
        self.killers.clear();
        self.nodes = 0;
        self.next_poll = self.config.node_poll_interval.max(1);
        self.start_time = Instant::now();
        self.time_limit = limits.time;
        self.iteration = 0;
        self.aborted = false;
    }

    /// 是否因超时中止
    pub fn aborted(&self) -> bool {
        self.aborted
    }

    fn poll_time(&mut self) {
        self.next_poll = self.nodes + self.config.node_poll_interval.max(1);
        if self.iteration <= 1 {
            return;
        }
        if let Some(limit) = self.time_limit {
            if self.start_time.elapsed() > limit {
                self.aborted = true;
            }
        }
    }

    /// 迭代加深搜索
    ///
    /// 只采用完整完成的迭代结果；被中止的迭代直接丢弃。
    pub fn think(&mut self, board: &mut Board, limits: &SearchLimits) -> SearchResult {
        self.new_search(limits);

        let max_depth = limits
            .depth
            .unwrap_or(self.config.max_depth)
            .clamp(1, self.config.max_depth.max(1));

        let mut result = SearchResult {
            best_move: None,
            score: 0,
            depth: 0,
            nodes: 0,
            elapsed: Duration::ZERO,
        };

        for depth in 1..=max_depth {
            self.iteration = depth;
            let (score, best_move) = self.alpha_beta(
                board,
                depth as i32,
                -INFINITY,
                INFINITY,
                0,
                true,
                self.config.check_extensions,
            );

            if self.aborted {
                debug!("depth {} aborted after {} nodes", depth, self.nodes);
                break;
            }

            result.best_move = best_move;
            result.score = score;
            result.depth = depth;

            let elapsed = self.start_time.elapsed();
            info!(
                "depth {} score {} nodes {} time {}ms best {}",
                depth,
                score,
                self.nodes,
                elapsed.as_millis(),
                best_move.map_or_else(|| "none".to_string(), |m| m.to_string())
            );

            if best_move.is_none() || score.abs() > MATE_THRESHOLD {
                break;
            }
            if let Some(limit) = self.time_limit {
                if depth >= self.config.min_depth_before_time_stop
                    && elapsed.as_secs_f64() > limit.as_secs_f64() * self.config.next_iteration_fraction
                {
                    break;
                }
            }
        }

        result.nodes = self.nodes;
        result.elapsed = self.start_time.elapsed();
        result
    }

    /// Alpha-Beta 搜索一个节点，返回 (分数, 最佳走法)
    ///
    /// `ply` 是距根节点的步数；根节点 (ply 0) 不做重复局面判和、置换表截断和空着裁剪。
    /// 超时后返回 (0, None)，调用方需检查 `aborted()`。
    #[allow(clippy::too_many_arguments)]
    pub fn alpha_beta(
        &mut self,
        board: &mut Board,
        depth: i32,
        mut alpha: i32,
        beta: i32,
        ply: usize,
        null_allowed: bool,
        check_ext_left: i32,
    ) -> (i32, Option<Move>) {
        self.nodes += 1;
        if self.nodes >= self.next_poll {
            self.poll_time();
        }
        if self.aborted {
            return (0, None);
        }

        // 重复局面判和
        if ply > 0 && board.repetition_count() > 1 {
            return (DRAW_SCORE, None);
        }

        let side = board.side_to_move();
        let in_check = board.is_in_check(side);
        let ext = if in_check && check_ext_left > 0 { 1 } else { 0 };

        if depth + ext <= 0 || ply >= MAX_PLY - 1 {
            return (self.quiescence(board, alpha, beta, ply, 0), None);
        }

        // 置换表
        let hash = board.hash();
        let mut tt_move = None;
        if let Some(entry) = self.tt.probe(hash) {
            if ply > 0 {
                if let Some(score) = entry.cutoff(depth, alpha, beta) {
                    return (score, entry.best_move);
                }
            }
            tt_move = entry.best_move;
        }

        // 将被吃掉
        if board.king_square(side).is_none() {
            return (-MATE_SCORE + ply as i32, None);
        }
        if board.king_square(side.opposite()).is_none() {
            return (MATE_SCORE - ply as i32, None);
        }

        // Null Move Pruning
        if ply > 0 && null_allowed && !in_check && depth >= 3 {
            let reduction = if depth > 6 { 3 } else { 2 };
            let undo = board.apply_null();
            let (score, _) = self.alpha_beta(
                board,
                (depth - 1 - reduction).max(0),
                -beta,
                -beta + 1,
                ply + 1,
                false,
                0,
            );
            board.revert_null(undo);
            let score = -score;

            if self.aborted {
                return (0, None);
            }
            // 空着后仍是杀棋分的不剪，避免误判真实杀棋
            if score >= beta && score < MATE_THRESHOLD {
                return (beta, None);
            }
        }

        let mut moves = board.generate_moves(false);
        let killers = self.killers.get(ply);
        order_moves(board, &mut moves, tt_move, killers, &self.history);

        let alpha_orig = alpha;
        let child_ext = check_ext_left - ext;
        let full_depth = depth - 1 + ext;
        let mut best_score = -INFINITY;
        let mut best_move = None;
        let mut legal_count = 0usize;

        for mv in moves {
            let undo = board.apply(mv);

            // 走后被将，不合法
            if board.is_in_check(side) {
                board.revert(undo);
                continue;
            }
            legal_count += 1;
            let is_capture = undo.is_capture();

            let score = if legal_count == 1 {
                -self
                    .alpha_beta(board, full_depth, -beta, -alpha, ply + 1, true, child_ext)
                    .0
            } else {
                let do_lmr = depth >= 3
                    && legal_count > 4
                    && !is_capture
                    && !in_check
                    && !killers.contains(&Some(mv));
                let reduction = match (do_lmr, legal_count) {
                    (false, _) => 0,
                    (true, n) if n > 20 => 3,
                    (true, n) if n > 10 => 2,
                    (true, _) => 1,
                };
                let reduced_depth = (depth - 1 - reduction).max(0) + ext;

                let mut score = -self
                    .alpha_beta(board, reduced_depth, -alpha - 1, -alpha, ply + 1, true, child_ext)
                    .0;
                if score > alpha {
                    if do_lmr {
                        score = -self
                            .alpha_beta(board, full_depth, -alpha - 1, -alpha, ply + 1, true, child_ext)
                            .0;
                    }
                    if score > alpha && score < beta {
                        score = -self
                            .alpha_beta(board, full_depth, -beta, -alpha, ply + 1, true, child_ext)
                            .0;
                    }
                }
                score
            };

            board.revert(undo);

            if self.aborted {
                return (0, None);
            }

            if score > best_score {
                best_score = score;
                best_move = Some(mv);
                if score > alpha {
                    alpha = score;
                    if alpha >= beta {
                        if !is_capture {
                            self.killers.record(ply, mv);
                            self.history.record(mv, depth);
                        }
                        break;
                    }
                }
            }
        }

        // 无合法走法：将死或困毙，都算负
        if legal_count == 0 {
            return (-MATE_SCORE + ply as i32, None);
        }

        let flag = if best_score <= alpha_orig {
            TTFlag::UpperBound
        } else if best_score >= beta {
            TTFlag::LowerBound
        } else {
            TTFlag::Exact
        };
        self.tt.store(TTEntry {
            hash,
            depth,
            score: best_score,
            flag,
            best_move,
        });

        (best_score, best_move)
    }
}
