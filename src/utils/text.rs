//! 文本处理工具
//! 提供模板替换值的百分号解码与展示用的省略截断

use std::borrow::Cow;
use percent_encoding::percent_decode_str;

/// 百分号解码（URI解码）
/// 解码结果非法UTF-8时原样返回输入，保证替换永不失败
pub fn decode_uri(value: &str) -> String {
    match percent_decode_str(value).decode_utf8() {
        Ok(Cow::Borrowed(_)) => value.to_string(),
        Ok(Cow::Owned(decoded)) => decoded,
        Err(_) => value.to_string(),
    }
}

/// 省略截断：超过length个字符时截断并追加省略号
/// 按字符计数而非字节，避免截断多字节字符
pub fn shortify(text: &str, length: usize) -> String {
    if text.chars().count() > length {
        let truncated: String = text.chars().take(length).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}
