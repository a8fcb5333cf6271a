//! UA 产品标记切分
//! 将 UA 字符串切分为 `product/version [xx] (comment)` 序列

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use super::model::ProductToken;

/// 单个产品标记的匹配模式（锚定在剩余串开头）
/// - 产品名：除 `/` 与空白外的任意字符，可为空
/// - 版本：`/` 之后到空白为止，可选
/// - 语言标记：部分老浏览器带 `[en]` 形式的两字母语言，跳过
/// - 注释：括号内内容，允许一层嵌套括号，可选
static PRODUCT_TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^([^/\s]*)(?:/(\S*))?(?:\s*\[[a-zA-Z][a-zA-Z]\])?\s*(?:\(((?:[^()]|\([^()]*\))*)\))?\s*"#,
    )
    .unwrap()
});

/// 产品标记切分器
pub struct ProductTokenizer;

impl ProductTokenizer {
    /// 切分 UA 字符串
    ///
    /// 反复匹配并消费开头的产品标记，直到剩余串为空或无法再消费任何字符；
    /// 结尾无法识别的内容直接丢弃。只含空白的标记不产出。
    pub fn tokenize(user_agent: &str) -> Vec<ProductToken> {
        let mut tokens = Vec::new();
        let mut rest = user_agent;

        while !rest.is_empty() {
            let Some(captures) = PRODUCT_TOKEN_REGEX.captures(rest) else {
                break;
            };
            let consumed = captures.get(0).map(|m| m.end()).unwrap_or(0);
            if consumed == 0 {
                trace!("UA剩余内容无法识别，丢弃：{}", rest);
                break;
            }

            let name = captures.get(1).map(|m| m.as_str()).unwrap_or("");
            let version = captures.get(2).map(|m| m.as_str().to_string());
            let comment = captures.get(3).map(|m| m.as_str().to_string());

            if !name.is_empty() || version.is_some() || comment.is_some() {
                tokens.push(ProductToken {
                    name: name.to_string(),
                    version,
                    comment,
                });
            }

            rest = &rest[consumed..];
        }

        tokens
    }
}
