//! 嗅探规则模型与解析
//! 一个指令标记（如 `!ie5.5-6^mac`）对应一条不可变规则

use std::fmt;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// 指令标记语法：`!?` 取反，`[a-z]*` 目标，`[0-9.]*` 版本下限，`[+-]?` 范围标记，
/// `[0-9.]*` 版本上限，`(\^[a-z]*)?` 平台限定
static RULE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^(!?)([a-z]*)([0-9.]*)([+-]?)([0-9.]*)(\^[a-z]*)?"#).unwrap()
});

/// 版本范围标记
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeMarker {
    /// 无标记：版本精确匹配
    Exact,
    /// `+`：该版本及以上
    AtLeast,
    /// `-`：闭区间 [下限, 上限]
    Range,
}

/// 嗅探规则
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub negate: bool,
    /// 浏览器短代码或分类名，二者共用同一命名空间
    pub target: String,
    pub version_low: Option<String>,
    pub range: RangeMarker,
    pub version_high: Option<String>,
    /// 平台短代码限定（不含 `^` 前缀）
    pub platform: Option<String>,
}

impl Rule {
    /// 解析单个指令标记
    ///
    /// 任何输入都会得到一条规则；无法识别的标记得到目标为空的规则，求值时恒为失败
    pub fn parse(token: &str) -> Self {
        let Some(captures) = RULE_REGEX.captures(token) else {
            return Self::unrecognized();
        };
        let group = |index: usize| {
            captures
                .get(index)
                .map(|m| m.as_str())
                .filter(|s| !s.is_empty())
        };

        let range = match group(4) {
            Some("+") => RangeMarker::AtLeast,
            Some("-") => RangeMarker::Range,
            _ => RangeMarker::Exact,
        };

        Self {
            negate: group(1).is_some(),
            target: group(2).unwrap_or("").to_string(),
            version_low: group(3).map(str::to_string),
            range,
            version_high: group(5).map(str::to_string),
            platform: group(6).map(|pin| pin.trim_start_matches('^').to_string()),
        }
    }

    /// 目标为空、恒失败的规则
    pub fn unrecognized() -> Self {
        Self {
            negate: false,
            target: String::new(),
            version_low: None,
            range: RangeMarker::Exact,
            version_high: None,
            platform: None,
        }
    }

    /// 取反后的规则
    pub fn negated(&self) -> Self {
        Self {
            negate: !self.negate,
            ..self.clone()
        }
    }
}

// ======== 还原为指令标记形式（用于日志输出） ========
impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negate {
            write!(f, "!")?;
        }
        write!(f, "{}", self.target)?;
        if let Some(low) = &self.version_low {
            write!(f, "{}", low)?;
        }
        match self.range {
            RangeMarker::AtLeast => write!(f, "+")?,
            RangeMarker::Range => write!(f, "-")?,
            RangeMarker::Exact => {}
        }
        if let Some(high) = &self.version_high {
            write!(f, "{}", high)?;
        }
        if let Some(platform) = &self.platform {
            write!(f, "^{}", platform)?;
        }
        Ok(())
    }
}
