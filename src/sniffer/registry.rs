//! 分类注册表
//! 单次过滤过程内独占，随扫描逐步填充，过程结束即丢弃

use std::collections::HashMap;

use super::rule::Rule;

/// 分类注册表：分类名 -> 有序规则列表
#[derive(Debug, Clone, Default)]
pub struct CategoryRegistry {
    mapping: HashMap<String, Vec<Rule>>,
}

impl CategoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 定义（或追加）分类
    ///
    /// 同名分类的多次定义按出现顺序累加；规则列表为空时也会登记该分类
    pub fn define<I>(&mut self, name: &str, rules: I)
    where
        I: IntoIterator<Item = Rule>,
    {
        self.mapping
            .entry(name.to_string())
            .or_default()
            .extend(rules);
    }

    /// 查询分类的规则列表
    pub fn get(&self, name: &str) -> Option<&[Rule]> {
        self.mapping.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.mapping.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_accumulates() {
        let mut registry = CategoryRegistry::new();
        registry.define("old", [Rule::parse("ie5"), Rule::parse("ie6")]);
        registry.define("old", [Rule::parse("ff2")]);

        let rules = registry.get("old").unwrap();
        let tokens: Vec<String> = rules.iter().map(Rule::to_string).collect();
        assert_eq!(tokens, vec!["ie5", "ie6", "ff2"]);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_empty_definition_is_registered() {
        let mut registry = CategoryRegistry::new();
        registry.define("nothing", Vec::new());
        assert!(registry.contains("nothing"));
        assert_eq!(registry.get("nothing"), Some(&[][..]));
        assert!(registry.get("missing").is_none());
    }
}
