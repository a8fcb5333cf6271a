//! UA 数据模型定义
//! 解析产物为不可变的值对象，支持序列化/反序列化

use std::fmt;
use serde::{Deserialize, Serialize};

use super::short_code::ShortCode;
use crate::utils::VersionNumber;

/// 未识别字段的占位值
pub const UNKNOWN: &str = "Unknown";

/// UA 中的单个产品标记：`product/version (comment)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductToken {
    pub name: String,
    pub version: Option<String>,
    pub comment: Option<String>,
}

impl ProductToken {
    /// 注释内容，缺失时为空串
    pub fn comment_str(&self) -> &str {
        self.comment.as_deref().unwrap_or("")
    }
}

/// 浏览器画像（规范化后的浏览器、版本、平台信息）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAgentProfile {
    /// 原始 UA 字符串，缺失时为空串
    pub user_agent: String,
    /// 浏览器家族全名，例如 `Firefox`、`MSIE`
    pub browser: String,
    /// 浏览器短代码，例如 `ff`、`ie`；无对应代码时为空串
    pub browser_short: String,
    /// 浏览器自报版本，不保证是纯数字
    pub version: String,
    /// 平台全名，例如 `Windows NT 5.1`、`Linux i686`
    pub platform: String,
    /// 平台短代码，例如 `win`、`mac`、`unix`
    pub platform_short: String,
}

impl Default for UserAgentProfile {
    fn default() -> Self {
        Self {
            user_agent: String::new(),
            browser: UNKNOWN.to_string(),
            browser_short: String::new(),
            version: UNKNOWN.to_string(),
            platform: UNKNOWN.to_string(),
            platform_short: String::new(),
        }
    }
}

impl UserAgentProfile {
    /// 由长名称直接构建画像，短代码按查找表自动推导
    ///
    /// 适用于测试或调用方已知浏览器信息、无需解析 UA 的场景
    pub fn from_parts(browser: &str, version: &str, platform: &str) -> Self {
        Self {
            user_agent: String::new(),
            browser: browser.to_string(),
            browser_short: ShortCode::browser(browser).to_string(),
            version: version.to_string(),
            platform: platform.to_string(),
            platform_short: ShortCode::platform(platform).to_string(),
        }
    }

    /// 版本号的宽松浮点值
    pub fn version_number(&self) -> f64 {
        VersionNumber::loose_float(&self.version)
    }

    /// 变体标签：短代码 + 一位小数版本 + 平台短代码，例如 `ff3.6unix`
    pub fn variant_tag(&self) -> String {
        format!(
            "{}{}{}",
            self.browser_short,
            VersionNumber::one_decimal(&self.version),
            self.platform_short
        )
    }
}

// ======== 为 UserAgentProfile 实现 Display trait（用于 CLI / 日志输出） ========
impl fmt::Display for UserAgentProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.browser, self.version, self.platform)
    }
}
