//! 设置加载管理器
//! 负责设置对象的JSON导入/导出与缺省构造
//! 存储本身（压缩、分块、迁移）由扩展的存储协作方实现，这里只处理数据形态

use tracing::debug;
use url::Url;
use uuid::Uuid;

use super::model::{Detection, Group, Rule, Settings, TabModifierSettings, TabSpec};
use crate::error::TmResult;
use crate::utils::shortify;

/// 设置加载管理器
pub struct SettingsLoader;

impl SettingsLoader {
    /// 从JSON字符串解析完整设置对象（导入入口）
    /// 历史别名和缺省字段在反序列化时统一归一化
    pub fn from_json(raw: &str) -> TmResult<TabModifierSettings> {
        let settings: TabModifierSettings = serde_json::from_str(raw)?;
        debug!("设置解析成功，规则数：{}，分组数：{}", settings.rules.len(), settings.groups.len());
        Ok(settings)
    }

    /// 将设置对象序列化为JSON字符串（导出入口）
    pub fn to_json(settings: &TabModifierSettings) -> TmResult<String> {
        Ok(serde_json::to_string_pretty(settings)?)
    }

    /// 缺省设置对象
    pub fn default_settings() -> TabModifierSettings {
        TabModifierSettings {
            rules: Vec::new(),
            groups: Vec::new(),
            settings: Settings::default(),
        }
    }

    /// 构造缺省规则（CONTAINS检测，其余标志全关）
    pub fn default_rule(name: &str, title: &str, url_fragment: &str) -> Rule {
        Rule {
            id: Some(Uuid::new_v4().to_string()),
            name: name.to_string(),
            detection: Detection::Contains,
            url_fragment: url_fragment.to_string(),
            is_enabled: true,
            tab: TabSpec {
                title: Some(title.to_string()),
                ..TabSpec::default()
            },
        }
    }

    /// 构造缺省分组
    pub fn default_group(title: &str) -> Group {
        Group {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            color: "grey".to_string(),
            collapsed: false,
            merge: false,
        }
    }

    /// 由"重命名标签页"入口生成规则
    /// 规则名附带截断后的host便于辨认，url_fragment取完整URL
    pub fn rule_from_renamed_tab(title: &str, url: &str) -> TmResult<Rule> {
        let parsed = Url::parse(url)?;
        let host = parsed.host_str().unwrap_or_default();
        let name = format!("{} ({})", title, shortify(host, 15));
        Ok(Self::default_rule(&name, title, parsed.as_str()))
    }
}
