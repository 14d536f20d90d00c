//! 唯一标签页片段处理器
//! 将规则的url_fragment模板与当前URL规约为可比较的身份串，
//! 供标签页去重协作方做相等比较（结果不用于展示）
//!
//! 已知限制（刻意保留，不得擅自"修复"）：模板不含$占位符、URL不匹配、
//! 或匹配器编译失败时，全部URL规约为同一个键——规则作者遗漏$N时
//! 不相关的标签页会被当作重复

use tracing::warn;

use crate::config::GlobalConfig;
use crate::safety::PatternGuard;

/// 唯一标签页片段处理器
pub struct FragmentProcessor;

impl FragmentProcessor {
    /// 规约url_fragment模板为身份串
    ///
    /// # 参数
    /// - `template`: 规则的url_fragment（可含$N占位符）
    /// - `current_url`: 当前标签页URL
    /// - `url_matcher`: 捕获用正则源串（单次exec即可，无需全局扫描）
    ///
    /// 快速路径：无匹配器或模板不含$时模板原样返回；
    /// URL不匹配或匹配器被拦截/编译失败时同样原样返回
    pub fn process(
        template: &str,
        current_url: &str,
        url_matcher: Option<&str>,
        config: &GlobalConfig,
    ) -> String {
        let Some(matcher) = url_matcher.filter(|m| !m.is_empty()) else {
            return template.to_string();
        };

        if !template.contains('$') {
            return template.to_string();
        }

        let regex = match PatternGuard::compile(matcher, config.matcher_pattern_max_len) {
            Ok(regex) => regex,
            Err(e) => {
                warn!("URL片段处理失败：{}", e);
                return template.to_string();
            }
        };

        let Some(caps) = regex.captures(current_url) else {
            return template.to_string();
        };

        // 按分组下标降序替换，避免$1吞掉$12的前缀；
        // 未参与匹配的分组代入空串
        let mut result = template.to_string();
        for group in (1..caps.len()).rev() {
            let placeholder = format!("${}", group);
            let value = caps.get(group).map_or("", |m| m.as_str());
            result = result.replace(&placeholder, value);
        }

        result
    }
}
