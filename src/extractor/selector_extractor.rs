//! 选择器文本提取器
//! 通过CSS选择器从页面DOM快照中读取文本内容，支持通配选择器
//! 保留选择器 `title` 由模板展开器在上游处理，不会传到这里

use std::borrow::Cow;

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Node, Selector};
use tracing::warn;

/// option元素选择器（select取值专用）
static OPTION_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("option").unwrap());

/// 选择器文本提取器
/// 持有一次解析后的HTML文档，一次导航事件内可多次查询
pub struct SelectorExtractor {
    document: Html,
}

impl SelectorExtractor {
    /// 解析HTML字符串，构造提取器
    pub fn new(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    /// 按CSS选择器提取文本，未命中返回空串
    ///
    /// 两种模式：
    /// 1. 字面选择器：直接查询，取首个命中元素
    /// 2. 通配选择器（含`*`）：按空白分词逐个改写后再查询——
    ///    类名词（`.foo*`）改写为class属性包含匹配，其余词改写为属性存在匹配
    pub fn get_text(&self, selector: &str) -> String {
        let query: Cow<str> = if selector.contains('*') {
            Cow::Owned(Self::rewrite_wildcard_selector(selector))
        } else {
            Cow::Borrowed(selector)
        };

        let parsed = match Selector::parse(&query) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("CSS选择器解析失败：{}，错误：{}", query, e);
                return String::new();
            }
        };

        let Some(el) = self.document.select(&parsed).next() else {
            return String::new();
        };

        Self::extract_value(el)
    }

    /// 改写通配选择器
    /// 每个含`*`的词：类名词剥离`.`和`*`后变成 [class*="..."]，
    /// 其余词剥离`*`后变成属性存在选择器，剩余内容做CSS安全转义
    fn rewrite_wildcard_selector(selector: &str) -> String {
        selector
            .split_whitespace()
            .map(|part| {
                if !part.contains('*') {
                    return part.to_string();
                }
                if part.starts_with('.') {
                    let raw = part.replace(['.', '*'], "");
                    format!("[class*=\"{}\"]", Self::css_escape(&raw))
                } else {
                    let raw = part.replace('*', "");
                    format!("[{}]", Self::css_escape(&raw))
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// CSS选择器嵌入转义（反斜杠、引号、右中括号）
    fn css_escape(raw: &str) -> String {
        raw.replace('\\', "\\\\")
            .replace('"', "\\\"")
            .replace(']', "\\]")
    }

    /// 从命中元素读取文本值
    /// 有子节点时下钻到首个子节点（处理<label>/<div>包裹的表单控件），
    /// input读value属性，select读选中option的文本，其余读文本内容，末尾统一trim
    fn extract_value(el: ElementRef) -> String {
        if let Some(child) = el.first_child() {
            match child.value() {
                Node::Text(text) => return text.trim().to_string(),
                Node::Element(_) => {
                    if let Some(child_el) = ElementRef::wrap(child) {
                        return Self::element_text(child_el);
                    }
                }
                _ => {}
            }
        }

        Self::element_text(el)
    }

    /// 按元素类型取文本
    fn element_text(el: ElementRef) -> String {
        match el.value().name() {
            "input" => el.value().attr("value").unwrap_or_default().trim().to_string(),
            "select" => Self::selected_option_text(el),
            _ => el.text().collect::<String>().trim().to_string(),
        }
    }

    /// select元素取选中option的文本（无selected属性时取首个option）
    fn selected_option_text(el: ElementRef) -> String {
        let options: Vec<ElementRef> = el.select(&OPTION_SELECTOR).collect();
        options
            .iter()
            .find(|option| option.value().attr("selected").is_some())
            .or_else(|| options.first())
            .map(|option| option.text().collect::<String>().trim().to_string())
            .unwrap_or_default()
    }
}

// 单元测试
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_selector_text() {
        // 测试场景：字面选择器取首个命中元素的文本
        let page = SelectorExtractor::new(r#"<html><body><h1 id="top">  Page Heading  </h1><h1>Second</h1></body></html>"#);
        assert_eq!(page.get_text("h1"), "Page Heading");
        assert_eq!(page.get_text("#top"), "Page Heading");
    }

    #[test]
    fn test_missing_selector_returns_empty() {
        // 测试场景：未命中或非法选择器一律返回空串
        let page = SelectorExtractor::new("<html><body><p>x</p></body></html>");
        assert_eq!(page.get_text(".does-not-exist"), "");
        assert_eq!(page.get_text("p["), "");
    }

    #[test]
    fn test_input_value() {
        // 测试场景：input元素读value属性
        let page = SelectorExtractor::new(r#"<html><body><input id="user" value="alice"></body></html>"#);
        assert_eq!(page.get_text("#user"), "alice");
    }

    #[test]
    fn test_select_selected_option_via_wrapper() {
        // 测试场景：包裹元素下钻命中select时，读选中option的文本
        let page = SelectorExtractor::new(
            r#"<html><body><label id="wrap"><select><option>dev</option><option selected>prod</option></select></label></body></html>"#,
        );
        assert_eq!(page.get_text("#wrap"), "prod");

        // 无selected属性时取首个option
        let page = SelectorExtractor::new(
            r#"<html><body><label id="wrap"><select><option>dev</option><option>prod</option></select></label></body></html>"#,
        );
        assert_eq!(page.get_text("#wrap"), "dev");
    }

    #[test]
    fn test_bare_select_descends_into_first_option() {
        // 测试场景：直接命中select时按首子节点下钻，取首个option文本
        // （select分支仅在select本身作为包裹元素的首子节点时生效）
        let page = SelectorExtractor::new(
            r#"<html><body><select id="env"><option>dev</option><option selected>prod</option></select></body></html>"#,
        );
        assert_eq!(page.get_text("#env"), "dev");
    }

    #[test]
    fn test_wrapper_element_descends_into_first_child() {
        // 测试场景：包裹元素下钻到首个子节点（label包input的常见写法）
        let page = SelectorExtractor::new(r#"<html><body><label id="wrap"><input value="inner"></label></body></html>"#);
        assert_eq!(page.get_text("#wrap"), "inner");

        // 首个子节点是文本时取该文本，不拼接后续子元素
        let page = SelectorExtractor::new(r#"<html><body><div id="mixed">lead<span>tail</span></div></body></html>"#);
        assert_eq!(page.get_text("#mixed"), "lead");
    }

    #[test]
    fn test_wildcard_class_selector() {
        // 测试场景：类名通配词改写为class包含匹配
        let page = SelectorExtractor::new(
            r#"<html><body><div class="issue-title-v2">Fix the bug</div></body></html>"#,
        );
        assert_eq!(page.get_text(".issue-title*"), "Fix the bug");
    }

    #[test]
    fn test_wildcard_attribute_selector() {
        // 测试场景：非类名通配词改写为属性存在匹配
        let page = SelectorExtractor::new(
            r#"<html><body><span data-testid="abc">劳动节</span></body></html>"#,
        );
        assert_eq!(page.get_text("data-testid*"), "劳动节");
    }

    #[test]
    fn test_wildcard_mixed_tokens() {
        // 测试场景：通配词与普通词混排，按空白分词逐个改写
        let page = SelectorExtractor::new(
            r#"<html><body><div class="card-header"><b data-role="name">Widget</b></div></body></html>"#,
        );
        assert_eq!(page.get_text(".card* data-role*"), "Widget");
    }
}
