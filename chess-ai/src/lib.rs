//! 国际象棋 AI 引擎
//!
//! 包含:
//! - 子力评估函数
//! - Minimax + Alpha-Beta 搜索
//! - 可替换的随机选步器
//! - 引擎配置（难度、搜索深度、随机种子）

mod chooser;
mod config;
mod evaluate;
mod search;

pub use chooser::{FirstMoveChooser, MoveChooser, RandomChooser};
pub use config::{AiConfig, ConfigError, Difficulty, MAX_SEARCH_DEPTH};
pub use evaluate::Evaluator;
pub use search::{AiEngine, SearchOutcome, MATE_SCORE};
