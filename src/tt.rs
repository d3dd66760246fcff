//! 置换表 (数组实现)
//!
//! 固定容量，下标 = hash % capacity。同一槽位直接覆盖，不做深度优先替换；
//! 只有哈希完全一致的条目才会被使用。

use crate::types::Move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TTFlag {
    Exact,
    /// 搜索时 fail-high，真实值 >= score
    LowerBound,
    /// 搜索时 fail-low，真实值 <= score
    UpperBound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    pub hash: u64,
    pub depth: i32,
    pub score: i32,
    pub flag: TTFlag,
    pub best_move: Option<Move>,
}

impl TTEntry {
    /// 深度足够且边界允许在 (alpha, beta) 窗口内截断时返回分数
    #[inline]
    pub fn cutoff(&self, depth: i32, alpha: i32, beta: i32) -> Option<i32> {
        if self.depth < depth {
            return None;
        }
        match self.flag {
            TTFlag::Exact => Some(self.score),
            TTFlag::UpperBound if self.score <= alpha => Some(self.score),
            TTFlag::LowerBound if self.score >= beta => Some(self.score),
            _ => None,
        }
    }
}

pub struct TranspositionTable {
    entries: Vec<Option<TTEntry>>,
}

impl TranspositionTable {
    pub fn new(capacity: usize) -> Self {
        TranspositionTable {
            entries: vec![None; capacity.max(1)],
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    fn index(&self, hash: u64) -> usize {
        (hash % self.entries.len() as u64) as usize
    }

    #[inline]
    pub fn probe(&self, hash: u64) -> Option<&TTEntry> {
        self.entries[self.index(hash)]
            .as_ref()
            .filter(|entry| entry.hash == hash)
    }

    #[inline]
    pub fn store(&mut self, entry: TTEntry) {
        let idx = self.index(entry.hash);
        self.entries[idx] = Some(entry);
    }

    pub fn clear(&mut self) {
        self.entries.fill(None);
    }

    /// 已占用槽位数
    pub fn occupied(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(hash: u64, depth: i32, score: i32, flag: TTFlag) -> TTEntry {
        TTEntry {
            hash,
            depth,
            score,
            flag,
            best_move: Some(Move::from_coords(0, 0, 1, 0)),
        }
    }

    #[test]
    fn test_store_and_probe() {
        let mut tt = TranspositionTable::new(101);
        tt.store(entry(12345, 3, 50, TTFlag::Exact));
        assert_eq!(tt.probe(12345).map(|e| e.score), Some(50));
        // 同槽位不同哈希不命中
        assert!(tt.probe(12345 + 101).is_none());
        assert_eq!(tt.occupied(), 1);
    }

    #[test]
    fn test_collision_overwrites() {
        let mut tt = TranspositionTable::new(101);
        tt.store(entry(7, 10, 1, TTFlag::Exact));
        // 更浅的条目也会覆盖
        tt.store(entry(7 + 101, 1, 2, TTFlag::LowerBound));
        assert!(tt.probe(7).is_none());
        assert_eq!(tt.probe(7 + 101).map(|e| e.depth), Some(1));
    }

    #[test]
    fn test_cutoff_rules() {
        let exact = entry(1, 4, 30, TTFlag::Exact);
        assert_eq!(exact.cutoff(4, -100, 100), Some(30));
        assert_eq!(exact.cutoff(5, -100, 100), None);

        let upper = entry(1, 4, 30, TTFlag::UpperBound);
        assert_eq!(upper.cutoff(3, 40, 100), Some(30));
        assert_eq!(upper.cutoff(3, 10, 100), None);

        let lower = entry(1, 4, 30, TTFlag::LowerBound);
        assert_eq!(lower.cutoff(3, -100, 20), Some(30));
        assert_eq!(lower.cutoff(3, -100, 50), None);
    }

    #[test]
    fn test_clear() {
        let mut tt = TranspositionTable::new(13);
        for h in 0..20 {
            tt.store(entry(h, 1, 0, TTFlag::Exact));
        }
        tt.clear();
        assert_eq!(tt.occupied(), 0);
        assert_eq!(tt.capacity(), 13);
    }
}
