//! 随机选步器
//!
//! 搜索在每一层预先随机挑一个合法走法作为默认最佳走法。

use chess_rules::Move;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// 从候选走法中挑选一个
pub trait MoveChooser {
    /// 候选为空时返回 None
    fn choose(&mut self, moves: &[Move]) -> Option<Move>;
}

/// 均匀随机选择
pub struct RandomChooser {
    rng: ChaCha8Rng,
}

impl RandomChooser {
    /// 使用系统熵初始化
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// 使用固定种子，结果可复现
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomChooser {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveChooser for RandomChooser {
    fn choose(&mut self, moves: &[Move]) -> Option<Move> {
        moves.choose(&mut self.rng).copied()
    }
}

/// 总是选第一个候选，用于确定性测试
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstMoveChooser;

impl MoveChooser for FirstMoveChooser {
    fn choose(&mut self, moves: &[Move]) -> Option<Move> {
        moves.first().copied()
    }
}
