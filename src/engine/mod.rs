//! 引擎模块：标签页规则应用核心逻辑
pub mod tab_engine;

// 导出核心接口
pub use self::tab_engine::{TabEngine, TabUpdate};
