//! 模板模块：标题模板展开与唯一标签页身份串规约
pub mod title_processor;
pub mod fragment_processor;

// 导出核心接口
pub use self::title_processor::TitleProcessor;
pub use self::fragment_processor::FragmentProcessor;
