//! 搜索引擎
//!
//! 实现固定深度的 Minimax + Alpha-Beta 剪枝。
//! 搜索直接在调用方的棋盘上试探走法，每一步都由 [`Probe`](chess_rules::Probe) 守卫撤销，
//! 剪枝提前返回时同样如此，搜索结束后棋盘与调用前完全相同。

use chess_rules::{Board, Color, DrawReason, GameResult, LegalMoves, Move};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::chooser::{MoveChooser, RandomChooser};
use crate::config::{AiConfig, Difficulty};
use crate::evaluate::Evaluator;

/// 将死的分值
pub const MATE_SCORE: i32 = 1000;

/// 搜索窗口的边界，大于任何可能的评估值
const INFINITY: i32 = 1_000_000;

/// 搜索结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchOutcome {
    /// 选中的走法及其分值（走棋方视角）
    BestMove { mv: Move, score: i32 },
    /// 根局面已终局
    GameOver(GameResult),
}

impl SearchOutcome {
    pub fn best_move(&self) -> Option<Move> {
        match self {
            SearchOutcome::BestMove { mv, .. } => Some(*mv),
            SearchOutcome::GameOver(_) => None,
        }
    }
}

/// AI 引擎
pub struct AiEngine<C: MoveChooser = RandomChooser> {
    config: AiConfig,
    chooser: C,
    nodes_searched: u64,
}

impl AiEngine<RandomChooser> {
    /// 创建新的 AI 引擎，配置了种子时选步结果可复现
    pub fn new(config: AiConfig) -> Self {
        let chooser = match config.seed {
            Some(seed) => RandomChooser::seeded(seed),
            None => RandomChooser::new(),
        };
        Self::with_chooser(config, chooser)
    }

    /// 从难度创建
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self::new(AiConfig::from_difficulty(difficulty))
    }
}

impl<C: MoveChooser> AiEngine<C> {
    /// 使用指定的选步器
    pub fn with_chooser(config: AiConfig, chooser: C) -> Self {
        Self {
            config,
            chooser,
            nodes_searched: 0,
        }
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    /// 上一次搜索访问的节点数
    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }

    /// 按配置的深度搜索
    pub fn search(&mut self, board: &mut Board, color: Color) -> SearchOutcome {
        self.choose_move(board, color, self.config.max_depth)
    }

    /// 为 `color` 选择一步棋
    ///
    /// 根局面被将死、已提交的走法构成和棋或逼和时返回 `GameOver`，
    /// 将死优先于和棋。
    /// 深度为 0 时返回随机预选的走法。
    pub fn choose_move(&mut self, board: &mut Board, color: Color, depth: u8) -> SearchOutcome {
        self.nodes_searched = 0;

        let legal = board.legal_moves(color);
        if legal != LegalMoves::Checkmate {
            if let Some(reason) = board.draws().draw_reason() {
                info!("No search for {:?}: draw by {:?}", color, reason);
                return SearchOutcome::GameOver(GameResult::Draw(reason));
            }
        }

        let moves = match legal {
            LegalMoves::Moves(moves) => moves,
            LegalMoves::Checkmate => {
                info!("No search for {:?}: checkmated", color);
                return SearchOutcome::GameOver(GameResult::win_for(color.opponent()));
            }
            LegalMoves::Stalemate => {
                info!("No search for {:?}: stalemate", color);
                return SearchOutcome::GameOver(GameResult::Draw(DrawReason::Stalemate));
            }
        };

        // LegalMoves::Moves 总是非空
        let Some(default) = self.chooser.choose(&moves) else {
            return SearchOutcome::GameOver(GameResult::Draw(DrawReason::Stalemate));
        };

        let (score, mv) = if depth == 0 {
            (Evaluator::evaluate(board, color), default)
        } else {
            self.search_moves(board, color, &moves, default, depth, -INFINITY, INFINITY, true)
        };

        debug!(
            "Search {:?} depth {}: {} nodes, best {} ({})",
            color, depth, self.nodes_searched, mv, score
        );

        SearchOutcome::BestMove { mv, score }
    }

    /// Minimax 搜索，返回 `root` 视角的分值
    ///
    /// `maximizing` 为 true 时轮到 `root` 走棋。
    fn minimax(
        &mut self,
        board: &mut Board,
        root: Color,
        depth: u8,
        alpha: i32,
        beta: i32,
        maximizing: bool,
    ) -> i32 {
        self.nodes_searched += 1;

        let to_move = if maximizing { root } else { root.opponent() };
        let moves = match board.legal_moves(to_move) {
            // 被将死的一方是极大方时对 root 最差
            LegalMoves::Checkmate => return if maximizing { -MATE_SCORE } else { MATE_SCORE },
            LegalMoves::Stalemate => return Evaluator::evaluate(board, root),
            LegalMoves::Moves(moves) => moves,
        };

        if depth == 0 {
            return Evaluator::evaluate(board, root);
        }

        let Some(default) = self.chooser.choose(&moves) else {
            return Evaluator::evaluate(board, root);
        };

        self.search_moves(board, root, &moves, default, depth, alpha, beta, maximizing)
            .0
    }

    /// 按生成顺序展开 `moves`，返回最佳分值和走法
    ///
    /// 只有严格更优的分值才会替换当前最佳走法。
    #[allow(clippy::too_many_arguments)]
    fn search_moves(
        &mut self,
        board: &mut Board,
        root: Color,
        moves: &[Move],
        default: Move,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> (i32, Move) {
        let mut best_move = default;
        let mut best_value = if maximizing { -INFINITY } else { INFINITY };

        for &mv in moves {
            let value = {
                let Ok(mut probe) = board.probe(mv) else {
                    continue;
                };
                self.minimax(&mut probe, root, depth - 1, alpha, beta, !maximizing)
            };

            let better = if maximizing {
                value > best_value
            } else {
                value < best_value
            };
            if better {
                best_value = value;
                best_move = mv;
            }

            if maximizing {
                alpha = alpha.max(best_value);
                if best_value >= beta {
                    break; // Beta 剪枝
                }
            } else {
                beta = beta.min(best_value);
                if best_value <= alpha {
                    break; // Alpha 剪枝
                }
            }
        }

        (best_value, best_move)
    }
}
