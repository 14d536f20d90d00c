//! 提取模块：页面DOM的选择器文本提取
pub mod selector_extractor;

// 导出核心接口
pub use self::selector_extractor::SelectorExtractor;
