//! 和棋判定：五十步规则与重复局面

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::constants::{FIFTY_MOVE_LIMIT, REPETITION_WINDOW};
use crate::outcome::DrawReason;

/// 和棋计数器
///
/// 只由提交的走法更新；试探走法不会触碰这里的任何字段。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawTracker {
    /// 连续无吃子、无兵走动的步数
    halfmove_clock: u32,
    /// 最近 6 次提交后的局面签名，最旧的在前；未填满的槽位为 None
    recent: VecDeque<Option<u64>>,
}

impl DrawTracker {
    pub fn new() -> Self {
        Self::with_halfmove_clock(0)
    }

    /// 从给定的无吃子步数开始（用于 FEN 导入）
    pub fn with_halfmove_clock(halfmove_clock: u32) -> Self {
        Self {
            halfmove_clock,
            recent: std::iter::repeat(None).take(REPETITION_WINDOW).collect(),
        }
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// 最近的局面签名（最旧的在前）
    pub fn recent_signatures(&self) -> impl Iterator<Item = Option<u64>> + '_ {
        self.recent.iter().copied()
    }

    /// 记录一次提交
    ///
    /// `irreversible` 为吃子或兵的走动。两种和棋同时成立时报告五十步规则。
    pub fn record(&mut self, signature: u64, irreversible: bool) -> Option<DrawReason> {
        if irreversible {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }

        if self.recent.len() == REPETITION_WINDOW {
            self.recent.pop_front();
        }
        self.recent.push_back(Some(signature));

        self.draw_reason()
    }

    /// 当前计数器是否已构成和棋
    pub fn draw_reason(&self) -> Option<DrawReason> {
        if self.is_fifty_move_draw() {
            Some(DrawReason::FiftyMoves)
        } else if self.is_repetition() {
            Some(DrawReason::Repetition)
        } else {
            None
        }
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= FIFTY_MOVE_LIMIT
    }

    /// 窗口偏移 {0,2,4} 或 {1,3,5} 的签名全部相同
    ///
    /// 只检查最近 6 次提交内同一方走完后的局面，不做任意深度的重复检测。
    pub fn is_repetition(&self) -> bool {
        let slot = |i: usize| self.recent.get(i).copied().flatten();
        let same = |a: usize, b: usize, c: usize| match (slot(a), slot(b), slot(c)) {
            (Some(x), Some(y), Some(z)) => x == y && y == z,
            _ => false,
        };
        same(0, 2, 4) || same(1, 3, 5)
    }
}

impl Default for DrawTracker {
    fn default() -> Self {
        Self::new()
    }
}
