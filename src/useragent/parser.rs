//! UA 解析核心
//! 由产品标记序列推导浏览器家族、版本与平台，并换算短代码

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::model::{ProductToken, UserAgentProfile, UNKNOWN};
use super::safari::SafariVersion;
use super::short_code::ShortCode;
use super::tokenizer::ProductTokenizer;

/// `Mozilla/x (compatible; Name/Version; ...)` 形式中内嵌的浏览器名与版本
static COMPATIBLE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"compatible; ([^ /]*)[ /]([^;]*)"#).unwrap()
});

/// 老版本 Opera 伪装成 IE 时，版本写在 `Opera 8.50` 里
static OPERA_VERSION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"Opera ([0-9.]+)"#).unwrap()
});

/// 只会出现在对应浏览器 UA 中的产品名，命中即确定
const DEFINITE_BROWSERS: &[&str] = &[
    "Netscape", "Navigator", "Camino", "Mosaic", "Galeon", "Opera", "Chrome", "Safari",
];

/// 版本号命中即确定的产品名
const DEFINITE_VERSIONS: &[&str] = &[
    "Netscape", "Navigator", "Camino", "Mosaic", "Galeon", "Chrome", "Version",
];

/// 命中即确定平台的注释片段
const DEFINITE_PLATFORMS: &[&str] = &["iPhone", "Android", "iPad", "iPod"];

/// 可能的平台注释片段，取第一个候选
const POSSIBLE_PLATFORMS: &[&str] = &[
    "Linux", "Macintosh", "Mac OS X", "PowerPC", "FreeBSD", "NetBSD", "OpenBSD", "SunOS",
    "Amiga", "BeOS", "IRIX", "OS/2", "Warp",
];

/// Windows ME 在 UA 中的特殊写法
const WINDOWS_ME_SEGMENT: &str = "Win 9x 4.90";

/// UA 解析器
pub struct UserAgentParser;

impl UserAgentParser {
    /// 解析 UA 字符串，生成浏览器画像
    ///
    /// 永不失败：缺失、空串或无法识别的输入退化为全 `Unknown` / 空短代码
    pub fn parse(user_agent: Option<&str>) -> UserAgentProfile {
        let raw = user_agent.unwrap_or("");
        let mut profile = UserAgentProfile {
            user_agent: raw.to_string(),
            ..UserAgentProfile::default()
        };

        let tokens = ProductTokenizer::tokenize(raw);
        if tokens.is_empty() {
            return profile;
        }

        profile.browser = Self::extract_browser(&tokens);
        profile.version = Self::extract_version(&tokens, raw);
        if let Some(platform) = Self::extract_platform(&tokens[0]) {
            profile.platform = platform;
        }

        profile.browser_short = ShortCode::browser(&profile.browser).to_string();
        profile.platform_short = ShortCode::platform(&profile.platform).to_string();

        debug!(
            "UA解析完成：浏览器={}，版本={}，平台={}，标记数={}",
            profile.browser,
            profile.version,
            profile.platform,
            tokens.len()
        );
        profile
    }

    /// 推导浏览器家族
    fn extract_browser(tokens: &[ProductToken]) -> String {
        let mut probable: Option<&str> = None;

        for token in tokens {
            match token.name.as_str() {
                // 之后可能被确定项推翻
                "Firefox" => probable = Some("Firefox"),
                "AppleWebKit" => probable = Some("Safari"),
                name if DEFINITE_BROWSERS.contains(&name) => return name.to_string(),
                _ => {}
            }
        }
        if let Some(browser) = probable {
            return browser.to_string();
        }

        // Mozilla 兼容形式（MSIE、Konqueror 等）
        if let Some((name, _)) = Self::mozilla_compatible(&tokens[0]) {
            return name;
        }
        tokens[0].name.clone()
    }

    /// 推导浏览器版本
    fn extract_version(tokens: &[ProductToken], raw: &str) -> String {
        let mut probable: Option<&str> = None;

        for token in tokens {
            match token.name.as_str() {
                "Firefox" => {
                    if let Some(version) = non_empty(&token.version) {
                        probable = Some(version);
                    }
                }
                "Safari" => {
                    return SafariVersion::canonicalize(token.version.as_deref().unwrap_or(""));
                }
                "Opera" => match non_empty(&token.version) {
                    // 后续可能出现 Version/xx 覆盖
                    Some(version) => probable = Some(version),
                    None => return Self::opera_version(raw),
                },
                name if DEFINITE_VERSIONS.contains(&name) => {
                    return token.version.clone().unwrap_or_else(|| UNKNOWN.to_string());
                }
                _ => {}
            }
        }
        if let Some(version) = probable {
            return version.to_string();
        }

        if let Some((_, version)) = Self::mozilla_compatible(&tokens[0]) {
            return version;
        }
        tokens[0].version.clone().unwrap_or_else(|| UNKNOWN.to_string())
    }

    /// 从原始 UA 中提取 `Opera x.y` 形式的版本号
    fn opera_version(raw: &str) -> String {
        OPERA_VERSION_REGEX
            .captures(raw)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    /// `Mozilla (compatible; Name Version; ...)` 中的 (名称, 版本)
    fn mozilla_compatible(first: &ProductToken) -> Option<(String, String)> {
        let comment = first.comment_str();
        if first.name != "Mozilla" || !comment.starts_with("compatible;") {
            return None;
        }
        let captures = COMPATIBLE_REGEX.captures(comment)?;
        Some((captures[1].to_string(), captures[2].to_string()))
    }

    /// 从第一个产品标记的注释中推导平台
    fn extract_platform(first: &ProductToken) -> Option<String> {
        let mut candidates: Vec<&str> = Vec::new();

        for segment in first.comment_str().split(';').map(str::trim) {
            if segment == WINDOWS_ME_SEGMENT {
                return Some("Windows ME".to_string());
            }
            if segment
                .get(..3)
                .is_some_and(|head| head.eq_ignore_ascii_case("win"))
            {
                candidates.push(segment);
                continue;
            }
            if DEFINITE_PLATFORMS.iter().any(|needle| segment.contains(needle)) {
                return Some(segment.to_string());
            }
            if POSSIBLE_PLATFORMS.iter().any(|needle| segment.contains(needle)) {
                candidates.push(segment);
            }
        }

        candidates.first().map(|segment| segment.to_string())
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
