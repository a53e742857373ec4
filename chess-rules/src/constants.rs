//! 规则常量定义

/// 棋盘边长（行数与列数）
pub const BOARD_SIZE: usize = 8;

/// 棋盘格子总数
pub const SQUARE_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// 五十步规则：连续无吃子、无兵走动的提交步数上限
pub const FIFTY_MOVE_LIMIT: u32 = 50;

/// 重复局面检测窗口大小（最近提交的局面签名个数）
pub const REPETITION_WINDOW: usize = 6;

/// 白方兵的起始行
pub const WHITE_PAWN_ROW: u8 = 6;

/// 黑方兵的起始行
pub const BLACK_PAWN_ROW: u8 = 1;

/// 初始局面 FEN
pub const INITIAL_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1";
