//! 正则安全校验器
//! 在用户正则被编译执行前，静态拦截可能导致灾难性回溯（ReDoS）的模式
//! 注意：这是启发式检测而非完整静态分析，允许漏报（放过个别病态模式），
//! 但不允许误杀常规安全模式

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::error::{TabmodError, TmResult};

/// 嵌套量词：量词组后再接量词，如 (a+)+、(a*)*、(a{1,5})+
static NESTED_QUANTIFIER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\([^)]*[*+{][^)]*\)[*+{]").unwrap()
});

/// 连续量词：两个量词字符直接相邻，如 a++、a*+、a?+
static CONSECUTIVE_QUANTIFIER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[*+?{][*+?{]").unwrap()
});

/// 量词化的分支组：组内含分支且整组被量词修饰，如 (x|x)*、(x+|x+y+)*
static QUANTIFIED_ALTERNATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\([^)]*\|[^)]*\)[*+{]").unwrap()
});

/// 量词化的环视：lookahead/lookbehind后直接接量词，如 (?=a)+、(?<!b)*
static QUANTIFIED_LOOKAROUND_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(\?<?[=!][^)]*\)[*+?{]").unwrap()
});

/// 正则安全校验器
/// 提供静态方法校验、编译、安全测试用户提供的正则模式
pub struct PatternGuard;

impl PatternGuard {
    /// 校验正则模式是否安全
    ///
    /// # 参数
    /// - `pattern`: 用户提供的正则模式源串
    /// - `max_len`: 长度上限（检测类用1000，匹配器类用200，见GlobalConfig）
    ///
    /// # 拒绝条件（任一满足即拒绝）
    /// 1. 空模式或超过长度上限
    /// 2. 命中任一ReDoS结构启发式（嵌套量词/连续量词/量词化分支组/量词化环视）
    /// 3. 无法成功编译（语法错误）
    pub fn is_pattern_safe(pattern: &str, max_len: usize) -> bool {
        if pattern.is_empty() || pattern.len() > max_len {
            return false;
        }

        if NESTED_QUANTIFIER_RE.is_match(pattern)
            || CONSECUTIVE_QUANTIFIER_RE.is_match(pattern)
            || QUANTIFIED_ALTERNATION_RE.is_match(pattern)
            || QUANTIFIED_LOOKAROUND_RE.is_match(pattern)
        {
            return false;
        }

        // 最后尝试编译，确保语法合法
        Regex::new(pattern).is_ok()
    }

    /// 校验并编译正则模式
    /// 不安全或编译失败均返回错误（内部已记录警告，调用方可直接回退）
    pub fn compile(pattern: &str, max_len: usize) -> TmResult<Regex> {
        if !Self::is_pattern_safe(pattern, max_len) {
            warn!("不安全正则模式已拦截：{}", pattern);
            return Err(TabmodError::UnsafePattern(pattern.to_string()));
        }

        Ok(Regex::new(pattern)?)
    }

    /// 安全执行正则测试
    /// 校验失败或编译失败时记录警告并返回false，绝不向调用方抛出错误
    pub fn safe_test(pattern: &str, input: &str, max_len: usize) -> bool {
        if !Self::is_pattern_safe(pattern, max_len) {
            warn!("不安全正则模式已拦截：{}", pattern);
            return false;
        }

        match Regex::new(pattern) {
            Ok(regex) => regex.is_match(input),
            Err(e) => {
                warn!("正则执行错误：{}，模式：{}", e, pattern);
                false
            }
        }
    }
}
