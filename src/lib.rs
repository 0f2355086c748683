//! JSON本地化文件翻译同步工具库
//!
//! 读取源语言 JSON 文件，逐个字符串调用翻译服务（同一原文每次运行只请求一次），
//! 与已有的目标语言文件合并后按源文件键顺序写回 `<lang>.json`。

pub mod cli;
pub mod config;
pub mod driver;
pub mod model;
pub mod translator;
pub mod utils;

// 重新导出主要类型
pub use config::Config;
pub use driver::{run_all, RunSummary};
pub use model::error::AppError;
pub use model::merger::{merge_and_write, merge_documents, LanguageOutcome, MergeReport};
pub use model::tree::{translate_tree, NodeKind, TreeStats};
pub use translator::{translate_or_fallback, MyMemoryClient, Translator};
