//! 走法与伪合法走法生成

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::ChessError;
use crate::piece::{Color, Piece, PieceType, Position};

/// 走法：只有起点和终点，不携带易位、吃过路兵或升变信息
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// 起始位置
    pub from: Position,
    /// 目标位置
    pub to: Position,
}

impl Move {
    /// 创建新走法
    pub fn new(from: Position, to: Position) -> Self {
        Self { from, to }
    }
}

/// 坐标记法，如 `e2e4`
impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

impl FromStr for Move {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 4 || !s.is_ascii() {
            return Err(ChessError::InvalidNotation(s.to_string()));
        }
        let from = s[..2].parse()?;
        let to = s[2..].parse()?;
        Ok(Move::new(from, to))
    }
}

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, -1), (-1, 0), (0, 1), (1, 0)];

const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, 1), (1, -1)];

const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (0, -1),
    (-1, 0),
    (0, 1),
    (1, 0),
    (-1, -1),
    (-1, 1),
    (1, 1),
    (1, -1),
];

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, -1),
    (2, 1),
    (-2, -1),
    (-2, 1),
    (1, 2),
    (-1, 2),
    (1, -2),
    (-1, -2),
];

/// 走法生成器
pub struct MoveGenerator;

impl MoveGenerator {
    /// 生成指定阵营的所有伪合法走法（不考虑将军）
    ///
    /// 按行优先扫描棋盘，每个棋子内部按其方向表顺序，结果顺序是确定的。
    pub fn generate_pseudo_legal(board: &Board, color: Color) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);

        for (pos, piece) in board.pieces(color) {
            Self::generate_piece_moves(board, pos, piece, &mut moves);
        }

        moves
    }

    /// 生成指定棋子的所有伪合法走法
    pub fn generate_piece_moves(board: &Board, pos: Position, piece: Piece, moves: &mut Vec<Move>) {
        let color = piece.color;
        match piece.piece_type {
            PieceType::Pawn => Self::generate_pawn_moves(board, pos, color, moves),
            PieceType::Knight => Self::generate_leaping_moves(board, pos, color, &KNIGHT_OFFSETS, moves),
            PieceType::Bishop => Self::generate_sliding_moves(board, pos, color, &BISHOP_DIRECTIONS, moves),
            PieceType::Rook => Self::generate_sliding_moves(board, pos, color, &ROOK_DIRECTIONS, moves),
            PieceType::Queen => Self::generate_sliding_moves(board, pos, color, &QUEEN_DIRECTIONS, moves),
            PieceType::King => Self::generate_leaping_moves(board, pos, color, &QUEEN_DIRECTIONS, moves),
        }
    }

    /// 生成兵的走法
    fn generate_pawn_moves(board: &Board, pos: Position, color: Color, moves: &mut Vec<Move>) {
        let forward = color.pawn_direction();

        // 前进一格；起始行上两格都为空时可以前进两格
        if let Some(to) = pos.offset(forward, 0) {
            if board.get(to).is_none() {
                moves.push(Move::new(pos, to));

                if pos.row == color.pawn_start_row() {
                    if let Some(double) = pos.offset(2 * forward, 0) {
                        if board.get(double).is_none() {
                            moves.push(Move::new(pos, double));
                        }
                    }
                }
            }
        }

        // 斜前方只能吃子
        for d_col in [-1i8, 1i8] {
            if let Some(to) = pos.offset(forward, d_col) {
                if let Some(target) = board.get(to) {
                    if target.color != color {
                        moves.push(Move::new(pos, to));
                    }
                }
            }
        }
    }

    /// 生成滑行棋子（车、象、后）的走法
    fn generate_sliding_moves(
        board: &Board,
        pos: Position,
        color: Color,
        directions: &[(i8, i8)],
        moves: &mut Vec<Move>,
    ) {
        for &(d_row, d_col) in directions {
            let mut current = pos;
            while let Some(to) = current.offset(d_row, d_col) {
                if let Some(target) = board.get(to) {
                    // 遇到棋子：对方的可以吃，己方的不能走
                    if target.color != color {
                        moves.push(Move::new(pos, to));
                    }
                    break;
                }
                moves.push(Move::new(pos, to));
                current = to;
            }
        }
    }

    /// 生成跳跃棋子（马、王）的走法，每个偏移只走一次
    fn generate_leaping_moves(
        board: &Board,
        pos: Position,
        color: Color,
        offsets: &[(i8, i8)],
        moves: &mut Vec<Move>,
    ) {
        for &(d_row, d_col) in offsets {
            if let Some(to) = pos.offset(d_row, d_col) {
                Self::try_add_move(board, pos, to, color, moves);
            }
        }
    }

    /// 尝试添加走法（目标为空或为对方棋子）
    fn try_add_move(board: &Board, from: Position, to: Position, color: Color, moves: &mut Vec<Move>) {
        match board.get(to) {
            Some(target) if target.color == color => {}
            _ => moves.push(Move::new(from, to)),
        }
    }

    /// 检查 `by` 一方是否有伪合法走法落在 `target` 上
    pub fn is_square_attacked(board: &Board, target: Position, by: Color) -> bool {
        let mut moves = Vec::with_capacity(32);
        board.pieces(by).into_iter().any(|(pos, piece)| {
            moves.clear();
            Self::generate_piece_moves(board, pos, piece, &mut moves);
            moves.iter().any(|mv| mv.to == target)
        })
    }

    /// 检查指定阵营是否被将军
    ///
    /// 只使用对方的伪合法走法，不会反过来调用合法性过滤。
    pub fn is_in_check(board: &Board, color: Color) -> bool {
        Self::is_square_attacked(board, board.king(color), color.opponent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::Fen;

    fn board(fen: &str) -> Board {
        Fen::parse(fen).unwrap().0
    }

    fn pos(s: &str) -> Position {
        s.parse().unwrap()
    }

    fn mv(s: &str) -> Move {
        s.parse().unwrap()
    }

    fn piece_moves(board: &Board, at: &str) -> Vec<Move> {
        let piece = board.get(pos(at)).unwrap();
        let mut moves = Vec::new();
        MoveGenerator::generate_piece_moves(board, pos(at), piece, &mut moves);
        moves
    }

    #[test]
    fn test_move_notation() {
        let mv = mv("e2e4");
        assert_eq!(mv, Move::new(pos("e2"), pos("e4")));
        assert_eq!(mv.to_string(), "e2e4");
        assert!("e2e".parse::<Move>().is_err());
        assert!("e2e9".parse::<Move>().is_err());
    }

    #[test]
    fn test_initial_pseudo_legal_count() {
        let board = Board::initial();
        assert_eq!(MoveGenerator::generate_pseudo_legal(&board, Color::White).len(), 20);
        assert_eq!(MoveGenerator::generate_pseudo_legal(&board, Color::Black).len(), 20);
    }

    #[test]
    fn test_generation_order_is_row_major() {
        let board = Board::initial();
        let moves = MoveGenerator::generate_pseudo_legal(&board, Color::White);
        // 白兵在第 6 行，先于第 7 行的马
        assert_eq!(moves[0], mv("a2a3"));
        assert_eq!(moves[1], mv("a2a4"));
        assert_eq!(moves[16].from, pos("b1"));
        assert_eq!(moves[19].from, pos("g1"));
    }

    #[test]
    fn test_rook_moves() {
        let board = board("k7/8/8/8/3R4/8/8/7K w - - 0 1");
        assert_eq!(piece_moves(&board, "d4").len(), 14);
    }

    #[test]
    fn test_rook_blocked_and_capture() {
        let board = board("k7/8/3p4/8/3R4/8/3P4/7K w - - 0 1");
        let moves = piece_moves(&board, "d4");

        // 向上可吃 d6，向下被 d2 的己方兵挡住
        assert_eq!(moves.len(), 10);
        assert!(moves.contains(&mv("d4d6")));
        assert!(!moves.contains(&mv("d4d7")));
        assert!(!moves.contains(&mv("d4d2")));
        assert!(moves.contains(&mv("d4d3")));
    }

    #[test]
    fn test_bishop_moves() {
        let board = board("k7/8/8/8/3B4/8/8/7K w - - 0 1");
        assert_eq!(piece_moves(&board, "d4").len(), 13);
    }

    #[test]
    fn test_queen_moves() {
        let board = board("k7/8/8/8/3Q4/8/8/7K w - - 0 1");
        assert_eq!(piece_moves(&board, "d4").len(), 27);
    }

    #[test]
    fn test_knight_moves() {
        let board = board("k7/8/8/8/3N4/8/8/7K w - - 0 1");
        assert_eq!(piece_moves(&board, "d4").len(), 8);

        // 角落的马只有两个落点
        let board = self::board("k7/8/8/8/8/8/8/N6K w - - 0 1");
        assert_eq!(piece_moves(&board, "a1").len(), 2);
    }

    #[test]
    fn test_knight_cannot_land_on_own_piece() {
        let board = Board::initial();
        let moves = piece_moves(&board, "g1");
        assert_eq!(moves.len(), 2);
        assert!(moves.contains(&mv("g1f3")));
        assert!(moves.contains(&mv("g1h3")));
    }

    #[test]
    fn test_king_moves() {
        let board = board("k7/8/8/8/4K3/8/8/8 w - - 0 1");
        assert_eq!(piece_moves(&board, "e4").len(), 8);

        let board = self::board("k7/8/8/8/8/8/8/7K w - - 0 1");
        assert_eq!(piece_moves(&board, "h1").len(), 3);
    }

    #[test]
    fn test_pawn_single_and_double_push() {
        let board = Board::initial();
        let moves = piece_moves(&board, "e2");
        assert_eq!(moves, vec![mv("e2e3"), mv("e2e4")]);

        let moves = piece_moves(&board, "e7");
        assert_eq!(moves, vec![mv("e7e6"), mv("e7e5")]);
    }

    #[test]
    fn test_pawn_double_push_blocked() {
        // e3 被挡住：一步两步都不能走
        let board = board("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1");
        assert!(piece_moves(&board, "e2").is_empty());

        // 只有 e4 被挡住：只能走一步
        let board = self::board("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1");
        assert_eq!(piece_moves(&board, "e2"), vec![mv("e2e3")]);
    }

    #[test]
    fn test_pawn_captures_only_opponents() {
        let board = board("4k3/8/8/8/8/3n1N2/4P3/4K3 w - - 0 1");
        let moves = piece_moves(&board, "e2");
        assert!(moves.contains(&mv("e2d3")));
        assert!(!moves.contains(&mv("e2f3")));
        assert_eq!(moves.len(), 3);
    }

    #[test]
    fn test_pawn_no_double_push_off_start_row() {
        let board = board("4k3/8/8/8/8/4P3/8/4K3 w - - 0 1");
        assert_eq!(piece_moves(&board, "e3"), vec![mv("e3e4")]);
    }

    #[test]
    fn test_check_by_rook() {
        let board = board("4k3/8/8/8/8/8/8/4R2K b - - 0 1");
        assert!(MoveGenerator::is_in_check(&board, Color::Black));
        assert!(!MoveGenerator::is_in_check(&board, Color::White));

        // 中间有子挡住
        let board = self::board("4k3/8/8/4p3/8/8/8/4R2K b - - 0 1");
        assert!(!MoveGenerator::is_in_check(&board, Color::Black));
    }

    #[test]
    fn test_check_by_knight() {
        let board = board("4k3/8/8/8/8/5n2/7K/8 w - - 0 1");
        assert!(MoveGenerator::is_in_check(&board, Color::White));
    }

    #[test]
    fn test_check_by_pawn_diagonal_only() {
        // d2 的黑兵攻击 c1/e1
        let board = board("4k3/8/8/8/8/8/3p4/4K3 w - - 0 1");
        assert!(MoveGenerator::is_in_check(&board, Color::White));

        // 正前方不构成攻击
        let board = self::board("4k3/8/8/8/8/8/4p3/4K3 w - - 0 1");
        assert!(!MoveGenerator::is_in_check(&board, Color::White));
    }

    #[test]
    fn test_square_attacked() {
        let board = Board::initial();
        assert!(MoveGenerator::is_square_attacked(&board, pos("f3"), Color::White));
        assert!(!MoveGenerator::is_square_attacked(&board, pos("e5"), Color::White));
        assert!(MoveGenerator::is_square_attacked(&board, pos("e5"), Color::Black));
        assert!(!MoveGenerator::is_square_attacked(&board, pos("e4"), Color::Black));
    }
}
