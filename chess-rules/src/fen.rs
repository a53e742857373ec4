//! FEN 格式解析和生成
//!
//! 支持的字段：
//! `<棋盘> <走子方> <易位> <吃过路兵> <无吃子步数> <回合数>`
//!
//! 不支持易位和吃过路兵，这两个字段输出为 `-`，解析时忽略。
//!
//! 示例：
//! `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1`

use crate::board::Board;
use crate::constants::{BOARD_SIZE, INITIAL_FEN, SQUARE_COUNT};
use crate::error::ChessError;
use crate::piece::{Color, Piece, Position};

/// FEN 格式处理
pub struct Fen;

impl Fen {
    /// 解析 FEN 字符串为棋盘和走子方
    pub fn parse(fen: &str) -> Result<(Board, Color), ChessError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.is_empty() {
            return Err(ChessError::InvalidFen {
                reason: "Empty FEN string".to_string(),
            });
        }

        let squares = Self::parse_board(parts[0])?;

        // 解析走子方（默认白方）
        let to_move = match parts.get(1) {
            Some(side) => side
                .chars()
                .next()
                .and_then(Color::from_fen_char)
                .ok_or_else(|| ChessError::InvalidFen {
                    reason: format!("Invalid side to move: {}", side),
                })?,
            None => Color::White,
        };

        // 解析无吃子步数（默认 0）
        let halfmove_clock = match parts.get(4) {
            Some(clock) => clock.parse().map_err(|_| ChessError::InvalidFen {
                reason: format!("Invalid halfmove clock: {}", clock),
            })?,
            None => 0,
        };

        let board = Board::from_squares(squares, halfmove_clock).map_err(|e| ChessError::InvalidFen {
            reason: e.to_string(),
        })?;
        Ok((board, to_move))
    }

    /// 解析棋盘部分
    fn parse_board(board_str: &str) -> Result<[Option<Piece>; SQUARE_COUNT], ChessError> {
        let mut squares = [None; SQUARE_COUNT];
        let rows: Vec<&str> = board_str.split('/').collect();

        if rows.len() != BOARD_SIZE {
            return Err(ChessError::InvalidFen {
                reason: format!("Expected {} rows, got {}", BOARD_SIZE, rows.len()),
            });
        }

        // FEN 从第 8 横线开始，对应第 0 行
        for (row, row_str) in rows.iter().enumerate() {
            let mut col = 0usize;

            for c in row_str.chars() {
                if col >= BOARD_SIZE {
                    return Err(ChessError::InvalidFen {
                        reason: format!("Row {} has too many columns", row),
                    });
                }

                if let Some(empty_count) = c.to_digit(10) {
                    col += empty_count as usize;
                } else if let Some(piece) = Piece::from_fen_char(c) {
                    squares[Position::new_unchecked(row as u8, col as u8).to_index()] = Some(piece);
                    col += 1;
                } else {
                    return Err(ChessError::InvalidFen {
                        reason: format!("Invalid piece character: {}", c),
                    });
                }
            }

            if col != BOARD_SIZE {
                return Err(ChessError::InvalidFen {
                    reason: format!("Row {} has {} columns, expected {}", row, col, BOARD_SIZE),
                });
            }
        }

        Ok(squares)
    }

    /// 将棋盘和走子方转换为 FEN 字符串
    pub fn to_string(board: &Board, to_move: Color) -> String {
        format!(
            "{} {} - - {} 1",
            Self::board_to_string(board),
            to_move.to_fen_char(),
            board.halfmove_clock()
        )
    }

    /// 将棋盘转换为 FEN 棋盘部分
    pub fn board_to_string(board: &Board) -> String {
        let mut rows = Vec::with_capacity(BOARD_SIZE);

        for row in 0..BOARD_SIZE as u8 {
            let mut row_str = String::new();
            let mut empty_count = 0;

            for col in 0..BOARD_SIZE as u8 {
                if let Some(piece) = board.get(Position::new_unchecked(row, col)) {
                    if empty_count > 0 {
                        row_str.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    row_str.push(piece.to_fen_char());
                } else {
                    empty_count += 1;
                }
            }

            if empty_count > 0 {
                row_str.push_str(&empty_count.to_string());
            }

            rows.push(row_str);
        }

        rows.join("/")
    }

    /// 解析初始局面
    pub fn initial() -> Result<(Board, Color), ChessError> {
        Self::parse(INITIAL_FEN)
    }
}
