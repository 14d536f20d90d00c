//! 标题模板展开器
//! 按固定顺序对规则的title模板做三轮替换：{selector}/{title}（DOM与页面标题）、
//! @N（title_matcher捕获分组）、$N（url_matcher捕获分组），
//! 最后清理所有未解析的@N/$N占位符
//!
//! 顺序是有语义的：DOM/标题替换先于匹配器替换，保证匹配器模式
//! 不会意外消费第一轮替换引入的字面@/$字符

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::config::GlobalConfig;
use crate::extractor::SelectorExtractor;
use crate::rule::Rule;
use crate::safety::PatternGuard;
use crate::utils::decode_uri;

/// {selector}占位符
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([^}]+)\}").unwrap());

/// 两轮匹配器替换后残留的@N/$N占位符（连同前后空白）
static LEFTOVER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*[$@]\d+\s*").unwrap());

/// 标题模板展开器
pub struct TitleProcessor;

impl TitleProcessor {
    /// 展开规则的标题模板
    ///
    /// # 参数
    /// - `current_url` / `current_title`: 当前页面URL与标题
    /// - `rule`: 命中的规则（读取tab.title/title_matcher/url_matcher）
    /// - `page`: 页面DOM快照，None时所有选择器取值为空（{title}不受影响）
    ///
    /// 规则无title模板时原样返回当前标题
    pub fn process(
        current_url: &str,
        current_title: &str,
        rule: &Rule,
        page: Option<&SelectorExtractor>,
        config: &GlobalConfig,
    ) -> String {
        let Some(template) = rule.tab.title.as_deref() else {
            return current_title.to_string();
        };

        let mut title = template.to_string();

        // 1. {selector}轮：占位符取自原始模板，保留名title直接代入页面标题，
        //    其余按CSS选择器做DOM提取
        for caps in TAG_RE.captures_iter(template) {
            let tag = &caps[0];
            let selector = &caps[1];

            let text = if selector == "title" {
                current_title.to_string()
            } else {
                page.map(|p| p.get_text(selector)).unwrap_or_default()
            };

            title = Self::update_title(&title, tag, &text);
        }

        // 2. @N轮：title_matcher全局扫描当前标题
        if let Some(pattern) = rule.tab.title_matcher.as_deref().filter(|p| !p.is_empty()) {
            title = Self::apply_matcher(title, pattern, current_title, '@', config);
        }

        // 3. $N轮：url_matcher全局扫描当前URL
        if let Some(pattern) = rule.tab.url_matcher.as_deref().filter(|p| !p.is_empty()) {
            title = Self::apply_matcher(title, pattern, current_url, '$', config);
        }

        // 4. 清理残留占位符：替换为单个空格后整体trim
        LEFTOVER_RE.replace_all(&title, " ").trim().to_string()
    }

    /// 单轮匹配器替换
    /// 占位符下标跨多次匹配持续递增而不重置；整体匹配占下标0。
    /// 迭代次数封顶防止病态输入（上限见GlobalConfig），
    /// 模式被拦截或编译失败时记录警告并返回已替换的部分结果
    fn apply_matcher(
        title: String,
        pattern: &str,
        haystack: &str,
        sigil: char,
        config: &GlobalConfig,
    ) -> String {
        let regex = match PatternGuard::compile(pattern, config.matcher_pattern_max_len) {
            Ok(regex) => regex,
            Err(e) => {
                warn!("匹配器处理失败：{}", e);
                return title;
            }
        };

        let mut title = title;
        let mut index = 0usize;

        for caps in regex.captures_iter(haystack).take(config.matcher_max_iterations) {
            for group in 0..caps.len() {
                let tag = format!("{}{}", sigil, index);
                match caps.get(group) {
                    Some(matched) => {
                        title = Self::update_title(&title, &tag, matched.as_str());
                    }
                    // 未参与匹配的分组：按占位符语义直接清除该标签
                    None => {
                        title = Self::update_title(&title, &tag, &tag);
                    }
                }
                index += 1;
            }
        }

        title
    }

    /// 标签替换规则
    /// 替换值为空时保留原标签（终轮统一清理）；替换值本身形如未解析
    /// 占位符（$或@开头）时标签直接清除；否则代入URI解码后的值。
    /// 每次只替换首个出现位置
    fn update_title(title: &str, tag: &str, value: &str) -> String {
        if value.is_empty() {
            return title.to_string();
        }
        if value.starts_with('$') || value.starts_with('@') {
            return title.replacen(tag, "", 1);
        }
        title.replacen(tag, &decode_uri(value), 1)
    }
}
