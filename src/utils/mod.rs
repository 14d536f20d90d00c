//! 工具模块：跨模块共享的文本处理工具
pub mod text;

// 导出核心接口
pub use self::text::{decode_uri, shortify};
