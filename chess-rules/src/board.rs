//! 棋盘状态
//!
//! 棋盘是搜索树中唯一的共享可变状态。走法分两种：
//! - 提交走法：更新棋盘、王位置缓存、历史记录和和棋计数器；
//! - 试探走法：只更新棋盘、王位置缓存和历史记录，由 [`Probe`] 在离开作用域时撤销。

use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{BOARD_SIZE, REPETITION_WINDOW, SQUARE_COUNT};
use crate::draw::DrawTracker;
use crate::error::{ChessError, Result};
use crate::moves::Move;
use crate::outcome::DrawReason;
use crate::piece::{Color, Piece, PieceType, Position};
use crate::zobrist::ZOBRIST;

/// 底线棋子排列（从 a 线到 h 线）
const BACK_RANK: [PieceType; BOARD_SIZE] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

/// 一步走法的撤销信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub mv: Move,
    /// 走之前的棋子（升变前仍是兵）
    pub moved: Piece,
    /// 被吃的棋子
    pub captured: Option<Piece>,
    /// 提交前的和棋计数器；试探走法为 None
    draws_before: Option<DrawTracker>,
}

impl HistoryEntry {
    /// 是否为提交走法
    pub fn is_committed(&self) -> bool {
        self.draws_before.is_some()
    }
}

/// 棋盘
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardData")]
pub struct Board {
    /// 8x8 棋盘，索引为 row * 8 + col，使用 Vec 以支持 serde
    squares: Vec<Option<Piece>>,
    /// 王的位置缓存 [white, black]
    kings: [Position; 2],
    /// 五十步计数与重复局面窗口
    draws: DrawTracker,
    /// 已走的步（包括试探走法）
    history: Vec<HistoryEntry>,
}

impl Board {
    /// 创建初始棋盘
    pub fn initial() -> Self {
        let mut squares = vec![None; SQUARE_COUNT];

        for (col, piece_type) in BACK_RANK.iter().enumerate() {
            let col = col as u8;
            // 黑方在上方（第 0、1 行）
            squares[Position::new_unchecked(0, col).to_index()] =
                Some(Piece::new(*piece_type, Color::Black));
            squares[Position::new_unchecked(1, col).to_index()] =
                Some(Piece::new(PieceType::Pawn, Color::Black));
            // 白方在下方（第 6、7 行）
            squares[Position::new_unchecked(6, col).to_index()] =
                Some(Piece::new(PieceType::Pawn, Color::White));
            squares[Position::new_unchecked(7, col).to_index()] =
                Some(Piece::new(*piece_type, Color::White));
        }

        Self {
            squares,
            kings: [Position::new_unchecked(7, 4), Position::new_unchecked(0, 4)],
            draws: DrawTracker::new(),
            history: Vec::new(),
        }
    }

    /// 从任意布局创建棋盘
    ///
    /// 每方必须恰好有一个王。
    pub fn from_squares(squares: [Option<Piece>; SQUARE_COUNT], halfmove_clock: u32) -> Result<Self> {
        let mut kings = [Position::new_unchecked(0, 0); 2];

        for color in Color::ALL {
            let found: Vec<Position> = Position::all()
                .filter(|pos| {
                    squares[pos.to_index()] == Some(Piece::new(PieceType::King, color))
                })
                .collect();
            if found.len() != 1 {
                return Err(ChessError::InvalidKingCount {
                    color,
                    count: found.len(),
                });
            }
            kings[color.index()] = found[0];
        }

        Ok(Self {
            squares: squares.to_vec(),
            kings,
            draws: DrawTracker::with_halfmove_clock(halfmove_clock),
            history: Vec::new(),
        })
    }

    /// 获取指定位置的棋子
    pub fn get(&self, pos: Position) -> Option<Piece> {
        self.squares.get(pos.to_index()).copied().flatten()
    }

    fn set(&mut self, pos: Position, piece: Option<Piece>) {
        self.squares[pos.to_index()] = piece;
    }

    /// 指定阵营王的位置（缓存）
    pub fn king(&self, color: Color) -> Position {
        self.kings[color.index()]
    }

    /// 获取指定阵营的所有棋子位置（行优先顺序）
    pub fn pieces(&self, color: Color) -> Vec<(Position, Piece)> {
        self.all_pieces()
            .into_iter()
            .filter(|(_, piece)| piece.color == color)
            .collect()
    }

    /// 获取所有棋子（行优先顺序）
    pub fn all_pieces(&self) -> Vec<(Position, Piece)> {
        Position::all()
            .filter_map(|pos| self.get(pos).map(|piece| (pos, piece)))
            .collect()
    }

    pub fn draws(&self) -> &DrawTracker {
        &self.draws
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.draws.halfmove_clock()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// 局面签名，用于重复局面比较
    pub fn position_signature(&self) -> u64 {
        ZOBRIST.hash(Position::all().zip(self.squares.iter()))
    }

    /// 走一步棋
    ///
    /// `commit` 为 true 时更新和棋计数器，并在构成和棋时返回原因；
    /// 试探走法总是返回 `Ok(None)`。不检查走法是否合法。
    pub fn apply_move(&mut self, mv: Move, commit: bool) -> Result<Option<DrawReason>> {
        let moved = self.get(mv.from).ok_or(ChessError::NoPiece(mv.from))?;
        let captured = self.get(mv.to);

        // 兵到达底线自动升变为后
        let placed = if moved.piece_type == PieceType::Pawn && mv.to.row == moved.color.promotion_row() {
            Piece::new(PieceType::Queen, moved.color)
        } else {
            moved
        };

        self.set(mv.from, None);
        self.set(mv.to, Some(placed));
        if moved.piece_type == PieceType::King {
            self.kings[moved.color.index()] = mv.to;
        }

        let draws_before = commit.then(|| self.draws.clone());
        self.history.push(HistoryEntry {
            mv,
            moved,
            captured,
            draws_before,
        });

        if !commit {
            return Ok(None);
        }

        let irreversible = captured.is_some() || moved.piece_type == PieceType::Pawn;
        let signature = self.position_signature();
        let draw = self.draws.record(signature, irreversible);
        if let Some(reason) = draw {
            debug!("Draw by {:?} after {} (halfmove clock {})", reason, mv, self.halfmove_clock());
        }
        Ok(draw)
    }

    /// 提交一步棋
    pub fn commit(&mut self, mv: Move) -> Result<Option<DrawReason>> {
        self.apply_move(mv, true)
    }

    /// 试探一步棋，返回的守卫在释放时撤销该步
    pub fn probe(&mut self, mv: Move) -> Result<Probe<'_>> {
        let mark = self.history.len();
        self.apply_move(mv, false)?;
        Ok(Probe {
            board: self,
            mark,
            mv,
        })
    }

    /// 撤销最近一步（提交或试探），历史为空时返回 None
    pub fn undo_last(&mut self) -> Option<Move> {
        let entry = self.history.pop()?;

        self.set(entry.mv.from, Some(entry.moved));
        self.set(entry.mv.to, entry.captured);
        if entry.moved.piece_type == PieceType::King {
            self.kings[entry.moved.color.index()] = entry.mv.from;
        }
        if let Some(draws) = entry.draws_before {
            self.draws = draws;
        }

        Some(entry.mv)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

/// 反序列化的原始数据，校验后才转换为 [`Board`]
#[derive(Deserialize)]
struct BoardData {
    squares: Vec<Option<Piece>>,
    kings: [Position; 2],
    draws: DrawTracker,
    history: Vec<HistoryEntry>,
}

impl TryFrom<BoardData> for Board {
    type Error = ChessError;

    fn try_from(data: BoardData) -> Result<Self> {
        let squares: [Option<Piece>; SQUARE_COUNT] = data.squares.try_into().map_err(|squares: Vec<_>| {
            ChessError::InvalidBoard(format!("expected {} squares, got {}", SQUARE_COUNT, squares.len()))
        })?;
        let mut board = Board::from_squares(squares, 0)?;

        if board.kings != data.kings {
            return Err(ChessError::InvalidBoard(format!(
                "king cache {:?} does not match the grid {:?}",
                data.kings, board.kings
            )));
        }
        if data.draws.recent_signatures().count() != REPETITION_WINDOW {
            return Err(ChessError::InvalidBoard(format!(
                "repetition window must hold {} slots",
                REPETITION_WINDOW
            )));
        }
        for entry in &data.history {
            let on_board = |pos: Position| Position::new(pos.row, pos.col).is_some();
            if !on_board(entry.mv.from) || !on_board(entry.mv.to) {
                return Err(ChessError::InvalidBoard(format!("history move {:?} is off the board", entry.mv)));
            }
        }

        board.draws = data.draws;
        board.history = data.history;
        Ok(board)
    }
}

/// 试探走法守卫
///
/// 解引用为棋盘；释放时把历史回退到创建前的长度，
/// 因此在其作用域内追加的任何走法也会一并撤销。
pub struct Probe<'a> {
    board: &'a mut Board,
    mark: usize,
    mv: Move,
}

impl Probe<'_> {
    /// 正在试探的走法
    pub fn mv(&self) -> Move {
        self.mv
    }
}

impl Deref for Probe<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Probe<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Probe<'_> {
    fn drop(&mut self) {
        while self.board.history.len() > self.mark {
            self.board.undo_last();
        }
    }
}
