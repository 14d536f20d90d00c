//! tabmod - 浏览器标签页定制核心引擎
//! 规则匹配 + 标题模板展开 + 正则安全校验（ReDoS防护）

// 导出全局错误类型
pub use self::error::{TabmodError, TmResult};

// 导出配置模块
pub use self::config::{GlobalConfig, ConfigManager, CustomConfigBuilder};

// 导出规则模块核心接口
pub use self::rule::{
    Detection, Group, Rule, RuleMatcher, Settings, SettingsLoader,
    TabModifierSettings, TabSpec,
};

// 导出安全模块核心接口
pub use self::safety::PatternGuard;

// 导出提取模块核心接口
pub use self::extractor::SelectorExtractor;

// 导出模板模块核心接口
pub use self::template::{FragmentProcessor, TitleProcessor};

// 导出引擎模块核心接口
pub use self::engine::{TabEngine, TabUpdate};

// 导出工具模块核心接口
pub use self::utils::{decode_uri, shortify};

// 声明所有子模块
pub mod config;
pub mod error;
pub mod rule;
pub mod safety;
pub mod extractor;
pub mod template;
pub mod engine;
pub mod utils;
