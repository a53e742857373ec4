//! 对局结果与状态

use serde::{Deserialize, Serialize};

use crate::piece::Color;

/// 游戏结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// 白方胜（将死）
    WhiteWins,
    /// 黑方胜（将死）
    BlackWins,
    /// 和棋
    Draw(DrawReason),
}

impl GameResult {
    /// 指定阵营获胜
    pub fn win_for(winner: Color) -> Self {
        match winner {
            Color::White => GameResult::WhiteWins,
            Color::Black => GameResult::BlackWins,
        }
    }

    /// 胜方，和棋时为 None
    pub fn winner(&self) -> Option<Color> {
        match self {
            GameResult::WhiteWins => Some(Color::White),
            GameResult::BlackWins => Some(Color::Black),
            GameResult::Draw(_) => None,
        }
    }

    pub fn is_draw(&self) -> bool {
        matches!(self, GameResult::Draw(_))
    }
}

/// 和棋原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawReason {
    /// 无子可动（逼和）
    Stalemate,
    /// 五十步无吃子且无兵走动
    FiftyMoves,
    /// 重复局面
    Repetition,
}

/// 轮到某一方走棋时的局面状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    InProgress,
    InCheck,
    Checkmate,
    DrawByFiftyMove,
    DrawByRepetition,
    StalemateDraw,
}

impl GameState {
    /// 是否已终局
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameState::InProgress | GameState::InCheck)
    }

    /// 转换为对局结果；`to_move` 是当前轮到走棋的一方
    pub fn result(&self, to_move: Color) -> Option<GameResult> {
        match self {
            GameState::InProgress | GameState::InCheck => None,
            GameState::Checkmate => Some(GameResult::win_for(to_move.opponent())),
            GameState::DrawByFiftyMove => Some(GameResult::Draw(DrawReason::FiftyMoves)),
            GameState::DrawByRepetition => Some(GameResult::Draw(DrawReason::Repetition)),
            GameState::StalemateDraw => Some(GameResult::Draw(DrawReason::Stalemate)),
        }
    }
}

impl From<DrawReason> for GameState {
    fn from(reason: DrawReason) -> Self {
        match reason {
            DrawReason::Stalemate => GameState::StalemateDraw,
            DrawReason::FiftyMoves => GameState::DrawByFiftyMove,
            DrawReason::Repetition => GameState::DrawByRepetition,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkmate_result_goes_to_opponent() {
        assert_eq!(
            GameState::Checkmate.result(Color::White),
            Some(GameResult::BlackWins)
        );
        assert_eq!(
            GameState::Checkmate.result(Color::Black),
            Some(GameResult::WhiteWins)
        );
    }

    #[test]
    fn test_non_terminal_states() {
        assert!(!GameState::InProgress.is_terminal());
        assert!(!GameState::InCheck.is_terminal());
        assert!(GameState::StalemateDraw.is_terminal());
        assert_eq!(GameState::InCheck.result(Color::White), None);
    }

    #[test]
    fn test_draw_reason_state() {
        assert_eq!(GameState::from(DrawReason::Repetition), GameState::DrawByRepetition);
        assert!(GameResult::Draw(DrawReason::FiftyMoves).is_draw());
        assert_eq!(GameResult::Draw(DrawReason::Stalemate).winner(), None);
    }
}
