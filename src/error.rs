//! 全局错误类型定义

use thiserror::Error;
use regex::Error as RegexError;
use serde_json::Error as SerdeJsonError;
use url::ParseError as UrlParseError;

#[derive(Error, Debug)]
pub enum TabmodError {
    // 正则相关错误
    #[error("不安全正则模式已拦截：{0}")]
    UnsafePattern(String),
    #[error("正则编译失败：{0}")]
    RegexCompileError(#[from] RegexError),

    // 选择器相关错误
    #[error("CSS选择器解析失败：{0}")]
    SelectorParseError(String),

    // 配置导入/导出错误
    #[error("JSON解析失败：{0}")]
    JsonError(#[from] SerdeJsonError),
    #[error("URL解析失败：{0}")]
    UrlError(#[from] UrlParseError),

    // 基础错误
    #[error("无效输入：{0}")]
    InvalidInput(String),
}

// 全局Result类型
pub type TmResult<T> = Result<T, TabmodError>;
