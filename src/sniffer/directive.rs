//! 行内指令切分
//! 每行只识别第一个 `/** ` 指令注释：注释体截止到第一个 `*/`，
//! `*/` 之后的同行文字保留并拼接到输出的前缀之后

use super::rule::Rule;

/// 指令起始标记（斜杠、两个星号、空格）
pub const DIRECTIVE_OPENER: &str = "/** ";
/// 指令结束标记
pub const DIRECTIVE_CLOSER: &str = "*/";
/// 分类定义分隔符
pub const CATEGORY_SEPARATOR: char = ':';

/// 含指令注释的行
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectiveLine<'a> {
    /// 指令之前的文字
    pub prefix: &'a str,
    /// 指令注释体（不含起止标记）
    pub body: &'a str,
    /// 结束标记之后的文字（不含换行符）
    pub trailing: &'a str,
}

/// 指令注释的两种形式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive<'a> {
    /// `/** name : tok tok */`
    Definition { name: &'a str, rules: Vec<Rule> },
    /// `/** tok tok */`
    Condition { rules: Vec<Rule> },
}

impl<'a> DirectiveLine<'a> {
    /// 切分一行；不含指令起始标记时返回 `None`
    pub fn split(line: &'a str) -> Option<Self> {
        let (prefix, rest) = line.split_once(DIRECTIVE_OPENER)?;
        let (body, trailing) = match rest.split_once(DIRECTIVE_CLOSER) {
            Some((body, trailing)) => (body, strip_line_ending(trailing)),
            None => (strip_line_ending(rest), ""),
        };
        Some(Self {
            prefix,
            body,
            trailing,
        })
    }

    /// 解析注释体
    ///
    /// 注释体中出现 `:` 即为分类定义，`:` 之前（去空白）为分类名
    pub fn directive(&self) -> Directive<'a> {
        match self.body.split_once(CATEGORY_SEPARATOR) {
            Some((name, tokens)) => Directive::Definition {
                name: name.trim(),
                rules: parse_rules(tokens),
            },
            None => Directive::Condition {
                rules: parse_rules(self.body),
            },
        }
    }

    /// 通过时输出的文字：前缀 + 结束标记后的文字 + 换行
    pub fn kept_text(&self) -> String {
        let mut kept = String::with_capacity(self.prefix.len() + self.trailing.len() + 1);
        kept.push_str(self.prefix);
        kept.push_str(self.trailing);
        kept.push('\n');
        kept
    }
}

/// 按空白切分指令标记并解析为规则
pub fn parse_rules(tokens: &str) -> Vec<Rule> {
    tokens.split_whitespace().map(Rule::parse).collect()
}

/// 去掉行尾的 `\n` / `\r\n`
pub fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_plain_line() {
        assert_eq!(DirectiveLine::split("body { color: red; }\n"), None);
        // 缺少空格的不算指令
        assert_eq!(DirectiveLine::split("/**ie*/ a {}\n"), None);
        // 普通注释不算指令
        assert_eq!(DirectiveLine::split("/* ie */ a {}\n"), None);
    }

    #[test]
    fn test_split_condition_line() {
        let line = DirectiveLine::split("  zoom: 1; /** ie6 ie7 */\r\n").unwrap();
        assert_eq!(line.prefix, "  zoom: 1; ");
        assert_eq!(line.body, "ie6 ie7 ");
        assert_eq!(line.trailing, "");
        assert_eq!(line.kept_text(), "  zoom: 1; \n");
        assert_eq!(
            line.directive(),
            Directive::Condition {
                rules: vec![Rule::parse("ie6"), Rule::parse("ie7")]
            }
        );
    }

    #[test]
    fn test_split_trailing_text_kept() {
        let line = DirectiveLine::split("a { /** ff */ color: blue; }\n").unwrap();
        assert_eq!(line.body, "ff ");
        assert_eq!(line.trailing, " color: blue; }");
        assert_eq!(line.kept_text(), "a {  color: blue; }\n");
        // 结束标记之后的冒号不构成分类定义
        assert!(matches!(line.directive(), Directive::Condition { .. }));
    }

    #[test]
    fn test_split_without_closer() {
        let line = DirectiveLine::split("a {} /** ie6\n").unwrap();
        assert_eq!(line.body, "ie6");
        assert_eq!(line.trailing, "");
    }

    #[test]
    fn test_definition() {
        let line = DirectiveLine::split("/** old browsers : ie5 ie5.5 ie6 */\n").unwrap();
        assert_eq!(line.prefix, "");
        match line.directive() {
            Directive::Definition { name, rules } => {
                assert_eq!(name, "old browsers");
                assert_eq!(rules.len(), 3);
                assert_eq!(rules[1].to_string(), "ie5.5");
            }
            other => panic!("unexpected directive: {:?}", other),
        }
    }

    #[test]
    fn test_only_first_closer_ends_body() {
        let line = DirectiveLine::split("x /** ie */ y */\n").unwrap();
        assert_eq!(line.body, "ie ");
        assert_eq!(line.trailing, " y */");
    }

    #[test]
    fn test_strip_line_ending() {
        assert_eq!(strip_line_ending("a\r\n"), "a");
        assert_eq!(strip_line_ending("a\n"), "a");
        assert_eq!(strip_line_ending("a"), "a");
    }
}
