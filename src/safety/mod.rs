//! 安全模块：用户正则模式的ReDoS静态防护
pub mod pattern_guard;

// 导出核心接口
pub use self::pattern_guard::PatternGuard;
