//! Zobrist 哈希
//!
//! 局面签名是所有格子 (棋子类型, 阵营, 行, 列) 的确定性函数，
//! 只用于有限窗口内的重复局面比较。

use lazy_static::lazy_static;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::constants::SQUARE_COUNT;
use crate::piece::{Piece, Position};

lazy_static! {
    /// 全局共享的哈希表（只读）
    pub static ref ZOBRIST: ZobristTable = ZobristTable::new();
}

/// Zobrist 哈希表
pub struct ZobristTable {
    /// 棋子哈希值 [color][piece_type][position]
    pieces: [[[u64; SQUARE_COUNT]; 6]; 2],
}

impl ZobristTable {
    /// 创建新的 Zobrist 表（使用固定种子保证确定性）
    pub fn new() -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(0x0001_9919_CAFE_F00D);

        let mut pieces = [[[0u64; SQUARE_COUNT]; 6]; 2];
        for color in pieces.iter_mut() {
            for piece in color.iter_mut() {
                for key in piece.iter_mut() {
                    *key = rng.gen();
                }
            }
        }

        Self { pieces }
    }

    /// 计算一组格子的完整哈希值；空格不贡献任何值
    pub fn hash<'a, I>(&self, squares: I) -> u64
    where
        I: IntoIterator<Item = (Position, &'a Option<Piece>)>,
    {
        squares
            .into_iter()
            .filter_map(|(pos, square)| square.map(|piece| self.piece_hash(piece, pos)))
            .fold(0, |hash, key| hash ^ key)
    }

    /// 获取棋子的哈希值
    #[inline]
    pub fn piece_hash(&self, piece: Piece, pos: Position) -> u64 {
        self.pieces[piece.color.index()][piece.piece_type.index()][pos.to_index()]
    }
}

impl Default for ZobristTable {
    fn default() -> Self {
        Self::new()
    }
}
