//! 规则数据模型定义
//! 仅存储规则数据，无任何业务逻辑，支持序列化/反序列化
//! 字段名与设置导入/导出的JSON格式保持稳定，可无损往返

use std::fmt;
use serde::{Deserialize, Serialize};

/// URL检测方式
/// 历史别名（STARTS/ENDS/REGEXP）在反序列化入口统一归一化为规范标签，
/// 匹配时不再重复判断
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Detection {
    #[default]
    #[serde(rename = "CONTAINS")]
    Contains,
    #[serde(rename = "STARTS_WITH", alias = "STARTS")]
    StartsWith,
    #[serde(rename = "ENDS_WITH", alias = "ENDS")]
    EndsWith,
    #[serde(rename = "EXACT")]
    Exact,
    #[serde(rename = "REGEX", alias = "REGEXP")]
    Regex,
}

impl fmt::Display for Detection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Detection::Contains => "CONTAINS",
            Detection::StartsWith => "STARTS_WITH",
            Detection::EndsWith => "ENDS_WITH",
            Detection::Exact => "EXACT",
            Detection::Regex => "REGEX",
        };
        write!(f, "{}", label)
    }
}

/// 标签页变换描述
/// `title` 模板支持三种占位符：{selector}（DOM提取，{title}保留为当前页面标题）、
/// @N（title_matcher捕获分组）、$N（url_matcher捕获分组）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TabSpec {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub protected: bool,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub muted: bool,
    #[serde(default)]
    pub title_matcher: Option<String>,
    #[serde(default)]
    pub url_matcher: Option<String>,
    #[serde(default)]
    pub group_id: Option<String>,
}

/// 单条规则定义
/// `url_fragment` 的解释取决于 `detection`：字面子串/前缀/后缀/全等，或正则源串
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub detection: Detection,
    pub url_fragment: String,
    #[serde(default = "default_enabled")]
    pub is_enabled: bool,
    pub tab: TabSpec,
}

// 缺省启用（向后兼容无is_enabled字段的老配置）
fn default_enabled() -> bool {
    true
}

/// 标签组定义
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub title: String,
    pub color: String,
    #[serde(default)]
    pub collapsed: bool,
    // 老版本配置缺少merge字段，反序列化时补默认值完成迁移
    #[serde(default)]
    pub merge: bool,
}

/// 扩展全局设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub enable_new_version_notification: bool,
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_theme() -> String {
    "dim".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enable_new_version_notification: false,
            theme: default_theme(),
        }
    }
}

/// 完整设置对象（存储协作方读写的顶层结构）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TabModifierSettings {
    #[serde(default)]
    pub rules: Vec<Rule>,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub settings: Settings,
}
