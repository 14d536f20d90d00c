//! 规则匹配器：按列表顺序为URL选择首条命中的启用规则

use tracing::debug;

use super::model::{Detection, Rule};
use crate::config::GlobalConfig;
use crate::safety::PatternGuard;

/// 规则匹配器
pub struct RuleMatcher;

impl RuleMatcher {
    /// 为URL查找首条命中的规则
    ///
    /// 迭代顺序即规则列表顺序（由调用方控制），命中即短路返回——
    /// 平局策略是"先列出者优先"，而不是"最佳匹配"。
    /// 禁用规则（is_enabled == false）一律跳过；无命中返回None
    pub fn find_rule<'a>(
        url: &str,
        rules: &'a [Rule],
        config: &GlobalConfig,
    ) -> Option<&'a Rule> {
        let found = rules
            .iter()
            .find(|rule| rule.is_enabled && Self::matches(url, rule, config));

        if let Some(rule) = found {
            debug!("规则命中：规则={}，检测方式={}，URL={}", rule.name, rule.detection, url);
        }

        found
    }

    /// 单条规则的检测谓词
    /// REGEX检测先校验后执行（见safety模块），校验失败的模式永不命中（失败关闭）
    fn matches(url: &str, rule: &Rule, config: &GlobalConfig) -> bool {
        let fragment = rule.url_fragment.as_str();

        match rule.detection {
            Detection::Contains => url.contains(fragment),
            Detection::StartsWith => url.starts_with(fragment),
            Detection::EndsWith => url.ends_with(fragment),
            Detection::Exact => url == fragment,
            Detection::Regex => {
                PatternGuard::safe_test(fragment, url, config.detection_pattern_max_len)
            }
        }
    }
}

// 单元测试
#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::model::TabSpec;

    fn rule(name: &str, detection: Detection, fragment: &str) -> Rule {
        Rule {
            id: None,
            name: name.to_string(),
            detection,
            url_fragment: fragment.to_string(),
            is_enabled: true,
            tab: TabSpec::default(),
        }
    }

    #[test]
    fn test_detection_predicates() {
        // 测试场景：五种检测方式的谓词语义
        let config = GlobalConfig::default();
        let url = "https://github.com/owner/repo/issues/123";

        let cases = vec![
            (rule("contains", Detection::Contains, "github.com"), true),
            (rule("starts", Detection::StartsWith, "https://github.com"), true),
            (rule("starts-miss", Detection::StartsWith, "github.com"), false),
            (rule("ends", Detection::EndsWith, "/issues/123"), true),
            (rule("exact", Detection::Exact, url), true),
            (rule("exact-miss", Detection::Exact, "https://github.com"), false),
            (rule("regex", Detection::Regex, r"github\.com/.+/issues/\d+"), true),
        ];

        for (r, expected) in cases {
            let rules = vec![r];
            assert_eq!(
                RuleMatcher::find_rule(url, &rules, &config).is_some(),
                expected,
                "规则 {} 判定不符",
                rules[0].name
            );
        }
    }

    #[test]
    fn test_disabled_rules_never_match() {
        // 测试场景：禁用规则即使命中也被跳过
        let config = GlobalConfig::default();
        let mut disabled = rule("disabled", Detection::Contains, "example.com");
        disabled.is_enabled = false;

        let rules = vec![disabled];
        assert!(RuleMatcher::find_rule("https://example.com/", &rules, &config).is_none());
    }

    #[test]
    fn test_first_match_wins() {
        // 测试场景：多条规则同时命中时返回列表中靠前的一条
        let config = GlobalConfig::default();
        let rules = vec![
            rule("first", Detection::Contains, "example.com"),
            rule("second", Detection::Contains, "example"),
        ];

        let found = RuleMatcher::find_rule("https://example.com/", &rules, &config).unwrap();
        assert_eq!(found.name, "first");

        // 前面插入禁用规则不影响顺序语义
        let mut head = rule("head", Detection::Contains, "example.com");
        head.is_enabled = false;
        let rules = vec![head, rule("tail", Detection::Contains, "example.com")];
        let found = RuleMatcher::find_rule("https://example.com/", &rules, &config).unwrap();
        assert_eq!(found.name, "tail");
    }

    #[test]
    fn test_unsafe_regex_fails_closed() {
        // 测试场景：不安全正则的REGEX规则永不命中（失败关闭而非放行）
        let config = GlobalConfig::default();
        let rules = vec![rule("redos", Detection::Regex, "(a+)+")];
        assert!(RuleMatcher::find_rule("aaaaaaaa", &rules, &config).is_none());

        // 语法错误的模式同样永不命中
        let rules = vec![rule("broken", Detection::Regex, "[invalid(regex")];
        assert!(RuleMatcher::find_rule("https://example.com/", &rules, &config).is_none());
    }

    #[test]
    fn test_no_rule_returns_none() {
        // 测试场景：无任何命中时返回None，调用方不做任何变换
        let config = GlobalConfig::default();
        let rules = vec![rule("miss", Detection::Contains, "gitlab.com")];
        assert!(RuleMatcher::find_rule("https://github.com/", &rules, &config).is_none());
    }
}
