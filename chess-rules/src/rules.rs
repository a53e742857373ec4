//! 合法走法过滤与对局状态

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::Board;
use crate::error::{ChessError, Result};
use crate::moves::{Move, MoveGenerator};
use crate::outcome::{DrawReason, GameResult, GameState};
use crate::piece::Color;

/// 合法走法查询结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegalMoves {
    /// 非空的合法走法（按生成顺序）
    Moves(Vec<Move>),
    /// 无子可动且被将军
    Checkmate,
    /// 无子可动但未被将军
    Stalemate,
}

impl LegalMoves {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, LegalMoves::Moves(_))
    }

    pub fn len(&self) -> usize {
        match self {
            LegalMoves::Moves(moves) => moves.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, mv: &Move) -> bool {
        matches!(self, LegalMoves::Moves(moves) if moves.contains(mv))
    }

    /// 取出走法列表，终局时为空
    pub fn into_vec(self) -> Vec<Move> {
        match self {
            LegalMoves::Moves(moves) => moves,
            _ => Vec::new(),
        }
    }

    /// 终局结果；`to_move` 是无子可动的一方
    pub fn result(&self, to_move: Color) -> Option<GameResult> {
        match self {
            LegalMoves::Moves(_) => None,
            LegalMoves::Checkmate => Some(GameResult::win_for(to_move.opponent())),
            LegalMoves::Stalemate => Some(GameResult::Draw(DrawReason::Stalemate)),
        }
    }
}

impl Board {
    /// 指定阵营是否被将军
    pub fn in_check(&self, color: Color) -> bool {
        MoveGenerator::is_in_check(self, color)
    }

    /// 生成指定阵营的合法走法
    ///
    /// 每个伪合法走法都以试探方式走出，检查己方王是否仍被攻击，
    /// 守卫释放时棋盘恢复原状。
    pub fn legal_moves(&mut self, color: Color) -> LegalMoves {
        let was_in_check = self.in_check(color);
        let candidates = MoveGenerator::generate_pseudo_legal(self, color);

        let mut legal = Vec::with_capacity(candidates.len());
        for mv in candidates {
            let Ok(probe) = self.probe(mv) else {
                continue;
            };
            if !probe.in_check(color) {
                legal.push(mv);
            }
        }

        if !legal.is_empty() {
            LegalMoves::Moves(legal)
        } else if was_in_check {
            LegalMoves::Checkmate
        } else {
            LegalMoves::Stalemate
        }
    }

    /// 走法是否在指定阵营的合法走法集合内
    pub fn is_legal(&mut self, mv: Move, color: Color) -> bool {
        self.legal_moves(color).contains(&mv)
    }

    /// 轮到 `to_move` 走棋时的局面状态
    ///
    /// 将死优先于已构成的和棋，和棋又优先于逼和。
    pub fn game_state(&mut self, to_move: Color) -> GameState {
        let legal = self.legal_moves(to_move);
        if legal == LegalMoves::Checkmate {
            return GameState::Checkmate;
        }
        if let Some(reason) = self.draws().draw_reason() {
            return reason.into();
        }

        match legal {
            LegalMoves::Moves(_) if self.in_check(to_move) => GameState::InCheck,
            LegalMoves::Moves(_) => GameState::InProgress,
            LegalMoves::Checkmate => GameState::Checkmate,
            LegalMoves::Stalemate => GameState::StalemateDraw,
        }
    }

    /// 校验并提交一步棋
    ///
    /// 对局已结束时返回 `GameOver`；走法不在合法集合内时返回
    /// `NoPiece`、`NotYourPiece` 或 `InvalidMove`。成功时返回本步造成的和棋原因，
    /// 本步将死对方时不报告和棋。
    pub fn play(&mut self, mv: Move, color: Color) -> Result<Option<DrawReason>> {
        let legal = self.legal_moves(color);
        if legal == LegalMoves::Checkmate {
            return Err(ChessError::GameOver(GameResult::win_for(color.opponent())));
        }
        if let Some(reason) = self.draws().draw_reason() {
            return Err(ChessError::GameOver(GameResult::Draw(reason)));
        }
        if let Some(result) = legal.result(color) {
            return Err(ChessError::GameOver(result));
        }

        let piece = self.get(mv.from).ok_or(ChessError::NoPiece(mv.from))?;
        if piece.color != color {
            return Err(ChessError::NotYourPiece {
                pos: mv.from,
                color,
            });
        }
        if !legal.contains(&mv) {
            return Err(ChessError::InvalidMove {
                from: mv.from,
                to: mv.to,
            });
        }

        debug!("{:?} plays {}", color, mv);
        let draw = self.commit(mv)?;
        if draw.is_some() && self.legal_moves(color.opponent()) == LegalMoves::Checkmate {
            debug!("{} checkmates; draw by {:?} ignored", mv, draw);
            return Ok(None);
        }
        Ok(draw)
    }
}
