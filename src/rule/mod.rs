//! 规则模块：负责规则的数据模型定义、匹配与设置导入/导出
pub mod model;
pub mod matcher;
pub mod loader;

// 导出核心接口
pub use self::model::{
    Detection, Group, Rule, Settings, TabModifierSettings, TabSpec,
};
pub use self::matcher::RuleMatcher;
pub use self::loader::SettingsLoader;
