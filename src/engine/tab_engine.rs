//! 引擎核心：整合匹配、模板展开与去重键规约，输出标签页变换结果
//! 对应扩展侧的规则应用编排：导航事件触发一次apply，副作用
//! （改标题/置顶/静音/关重复标签）由浏览器控制协作方执行

use tracing::debug;

use crate::config::GlobalConfig;
use crate::extractor::SelectorExtractor;
use crate::rule::{Rule, RuleMatcher, TabModifierSettings};
use crate::template::{FragmentProcessor, TitleProcessor};

/// 特权协议（扩展不得触碰的页面），一律跳过处理
const SKIP_SCHEMES: [&str; 6] = [
    "chrome",
    "chrome-extension",
    "about",
    "edge",
    "devtools",
    "view-source",
];

/// 单次规则应用的变换结果
/// 纯数据描述，由浏览器控制协作方落地为具体副作用
#[derive(Debug, Clone, PartialEq)]
pub struct TabUpdate {
    pub rule_name: String,
    pub rule_id: Option<String>,
    // None表示规则不改标题
    pub title: Option<String>,
    pub icon: Option<String>,
    pub pinned: bool,
    pub protected: bool,
    pub muted: bool,
    pub group_id: Option<String>,
    // 仅unique规则产出，供去重协作方做相等比较
    pub unique_key: Option<String>,
}

/// 标签页规则引擎
#[derive(Debug, Clone)]
pub struct TabEngine {
    settings: TabModifierSettings,
    config: GlobalConfig,
}

impl TabEngine {
    /// 创建引擎
    pub fn new(settings: TabModifierSettings, config: GlobalConfig) -> Self {
        Self { settings, config }
    }

    /// 创建引擎（默认配置）
    pub fn with_default_config(settings: TabModifierSettings) -> Self {
        Self::new(settings, GlobalConfig::default())
    }

    /// 当前规则列表（顺序即优先级）
    pub fn rules(&self) -> &[Rule] {
        &self.settings.rules
    }

    /// URL是否应跳过处理（特权协议页面）
    /// 无法解析为URL的输入不跳过，仍交由字面检测方式匹配
    pub fn should_skip_url(url: &str) -> bool {
        match url::Url::parse(url) {
            Ok(parsed) => SKIP_SCHEMES.contains(&parsed.scheme()),
            Err(_) => false,
        }
    }

    /// 为URL查找首条命中的启用规则
    pub fn find_rule(&self, url: &str) -> Option<&Rule> {
        RuleMatcher::find_rule(url, &self.settings.rules, &self.config)
    }

    /// 核心应用接口：一次导航事件的完整处理
    ///
    /// # 参数
    /// - `url` / `title`: 当前标签页URL与标题
    /// - `html`: 页面HTML快照，None时选择器占位符全部取空
    ///
    /// 无命中规则或特权页面返回None，调用方不做任何变换
    pub fn apply(&self, url: &str, title: &str, html: Option<&str>) -> Option<TabUpdate> {
        if Self::should_skip_url(url) {
            debug!("特权页面跳过处理：{}", url);
            return None;
        }

        // 1. 规则匹配（首条命中即返回）
        let rule = self.find_rule(url)?;

        // 2. 标题模板展开（规则无模板则不改标题）
        let page = html.map(SelectorExtractor::new);
        let new_title = rule
            .tab
            .title
            .as_ref()
            .map(|_| TitleProcessor::process(url, title, rule, page.as_ref(), &self.config));

        // 3. unique规则规约去重键
        let unique_key = rule.tab.unique.then(|| {
            FragmentProcessor::process(
                &rule.url_fragment,
                url,
                rule.tab.url_matcher.as_deref(),
                &self.config,
            )
        });

        Some(TabUpdate {
            rule_name: rule.name.clone(),
            rule_id: rule.id.clone(),
            title: new_title,
            icon: rule.tab.icon.clone(),
            pinned: rule.tab.pinned,
            protected: rule.tab.protected,
            muted: rule.tab.muted,
            group_id: rule.tab.group_id.clone(),
            unique_key,
        })
    }
}
