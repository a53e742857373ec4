//! 错误类型定义

use thiserror::Error;

use crate::outcome::GameResult;
use crate::piece::{Color, Position};

/// 象棋规则错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChessError {
    /// 走法不在合法走法集合内
    #[error("Invalid move: {from} -> {to}")]
    InvalidMove { from: Position, to: Position },

    /// 起点没有棋子
    #[error("No piece at {0}")]
    NoPiece(Position),

    /// 走的不是己方棋子
    #[error("Piece at {pos} does not belong to {color:?}")]
    NotYourPiece { pos: Position, color: Color },

    /// 王的数量不对
    #[error("Expected exactly one {color:?} king, found {count}")]
    InvalidKingCount { color: Color, count: usize },

    /// 反序列化得到的棋盘不一致
    #[error("Invalid board: {0}")]
    InvalidBoard(String),

    /// 无效的 FEN 字符串
    #[error("Invalid FEN string: {reason}")]
    InvalidFen { reason: String },

    /// 无效的坐标记法
    #[error("Invalid notation: {0:?}")]
    InvalidNotation(String),

    /// 游戏已结束
    #[error("Game is already over: {0:?}")]
    GameOver(GameResult),
}

/// 规则操作结果类型
pub type Result<T> = std::result::Result<T, ChessError>;
