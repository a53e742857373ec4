//! 棋局评估函数

use chess_rules::{Board, Color, Piece};

/// 评估器
///
/// 只计算子力：兵 4、马 3、象 4、车 6、后 10、王 50。
pub struct Evaluator;

impl Evaluator {
    /// 评估棋局（`perspective` 视角，正值对其有利）
    pub fn evaluate(board: &Board, perspective: Color) -> i32 {
        board
            .all_pieces()
            .into_iter()
            .map(|(_, piece)| Self::evaluate_piece(piece, perspective))
            .sum()
    }

    /// 单个棋子的分值，己方为正，对方为负
    fn evaluate_piece(piece: Piece, perspective: Color) -> i32 {
        if piece.color == perspective {
            piece.value()
        } else {
            -piece.value()
        }
    }
}
