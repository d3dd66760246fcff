//! 走法排序：置换表走法 > 吃子 (MVV-LVA) > 杀手走法 > 历史分

use crate::board::Board;
use crate::types::{Move, SQUARE_COUNT};

/// 每步两个杀手槽位，按 ply 索引
pub const MAX_PLY: usize = 128;

const TT_MOVE_BONUS: i32 = 30_000_000;
const CAPTURE_BONUS: i32 = 20_000_000;
const KILLER_BONUS: [i32; 2] = [12_000_000, 11_000_000];

/// 历史分超过该值时整张表减半
const HISTORY_LIMIT: i32 = 1_000_000;

pub struct KillerTable {
    slots: Vec<[Option<Move>; 2]>,
}

impl Default for KillerTable {
    fn default() -> Self {
        Self::new()
    }
}

impl KillerTable {
    pub fn new() -> Self {
        KillerTable {
            slots: vec![[None; 2]; MAX_PLY],
        }
    }

    pub fn clear(&mut self) {
        self.slots.fill([None; 2]);
    }

    #[inline]
    pub fn get(&self, ply: usize) -> [Option<Move>; 2] {
        self.slots.get(ply).copied().unwrap_or([None; 2])
    }

    /// 新杀手放到第一个槽位，原来的移到第二个
    #[inline]
    pub fn record(&mut self, ply: usize, mv: Move) {
        if let Some(slot) = self.slots.get_mut(ply) {
            if slot[0] != Some(mv) {
                slot[1] = slot[0];
                slot[0] = Some(mv);
            }
        }
    }
}

pub struct HistoryTable {
    // [from][to]
    scores: Vec<[i32; SQUARE_COUNT]>,
}

impl Default for HistoryTable {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryTable {
    pub fn new() -> Self {
        HistoryTable {
            scores: vec![[0; SQUARE_COUNT]; SQUARE_COUNT],
        }
    }

    pub fn clear(&mut self) {
        for row in &mut self.scores {
            row.fill(0);
        }
    }

    #[inline]
    pub fn get(&self, mv: Move) -> i32 {
        self.scores[mv.from.to_index()][mv.to.to_index()]
    }

    #[inline]
    pub fn record(&mut self, mv: Move, depth: i32) {
        let entry = &mut self.scores[mv.from.to_index()][mv.to.to_index()];
        *entry += depth * depth;

        // 衰减
        if *entry > HISTORY_LIMIT {
            for row in &mut self.scores {
                for v in row.iter_mut() {
                    *v /= 2;
                }
            }
        }
    }
}

/// MVV-LVA 评分：被吃子价值 × 10 - 攻击子价值，不是吃子返回 None
#[inline]
pub fn mvv_lva(board: &Board, mv: Move) -> Option<i32> {
    let victim = board.piece_at(mv.to)?;
    let attacker = board.piece_at(mv.from)?;
    let tables = board.tables();
    Some(tables.value(victim.kind) * 10 - tables.value(attacker.kind))
}

/// 走法排序（原地排序，不分配新的走法数组）
pub fn order_moves(
    board: &Board,
    moves: &mut [Move],
    tt_move: Option<Move>,
    killers: [Option<Move>; 2],
    history: &HistoryTable,
) {
    let mut scores: Vec<i32> = moves
        .iter()
        .map(|&mv| {
            if tt_move == Some(mv) {
                return TT_MOVE_BONUS;
            }
            if let Some(score) = mvv_lva(board, mv) {
                return CAPTURE_BONUS + score;
            }
            if let Some(slot) = killers.iter().position(|k| *k == Some(mv)) {
                return KILLER_BONUS[slot];
            }
            history.get(mv)
        })
        .collect();

    // 简单选择排序（对于小数组比快排快）
    for i in 0..moves.len() {
        let mut best_idx = i;
        for j in (i + 1)..moves.len() {
            if scores[j] > scores[best_idx] {
                best_idx = j;
            }
        }
        if best_idx != i {
            moves.swap(i, best_idx);
            scores.swap(i, best_idx);
        }
    }
}

/// 吃子的子力得失：被吃子价值 - 攻击子价值，不是吃子返回 None
#[inline]
pub fn capture_gain(board: &Board, mv: Move) -> Option<i32> {
    let victim = board.piece_at(mv.to)?;
    let attacker = board.piece_at(mv.from)?;
    let tables = board.tables();
    Some(tables.value(victim.kind) - tables.value(attacker.kind))
}

/// 静态搜索排序：按子力得失从大到小，非吃子（被将军时的应将）排最后
pub fn order_captures(board: &Board, moves: &mut [Move]) {
    moves.sort_by_cached_key(|&mv| std::cmp::Reverse(capture_gain(board, mv).unwrap_or(i32::MIN)));
}
