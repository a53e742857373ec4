//! 国际象棋规则库
//!
//! 包含:
//! - 棋子、棋盘、位置等核心数据结构
//! - 伪合法走法生成与将军检测
//! - 合法走法过滤、将死与逼和判定
//! - 五十步规则与重复局面判定
//! - 可撤销的试探走法 (Probe)
//! - 坐标记法与 FEN 格式

mod board;
mod constants;
mod draw;
mod error;
mod fen;
mod moves;
mod outcome;
mod piece;
mod rules;
mod zobrist;

pub use board::{Board, HistoryEntry, Probe};
pub use constants::*;
pub use draw::DrawTracker;
pub use error::{ChessError, Result};
pub use fen::Fen;
pub use moves::{Move, MoveGenerator};
pub use outcome::{DrawReason, GameResult, GameState};
pub use piece::{Color, Piece, PieceType, Position};
pub use rules::LegalMoves;
pub use zobrist::{ZobristTable, ZOBRIST};
