//! 短代码查找表
//! 长名称 -> 短代码，按子串包含匹配，表中靠后的命中覆盖靠前的命中

/// 浏览器查找表（子串 -> 短代码）
pub const BROWSER_CODES: &[(&str, &str)] = &[
    ("MSIE", "ie"),
    ("Firefox", "ff"),
    ("Safari", "safari"),
    ("Chrome", "chrome"),
    ("Opera", "opera"),
    ("Camino", "camino"),
    ("Netscape", "netscape"),
];

/// 平台查找表（子串 -> 短代码）
pub const PLATFORM_CODES: &[(&str, &str)] = &[
    ("Win", "win"),
    ("Linux", "unix"),
    ("Macintosh", "mac"),
    ("Mac OS X", "mac"),
    ("PowerPC", "mac"),
    ("FreeBSD", "unix"),
    ("NetBSD", "unix"),
    ("OpenBSD", "unix"),
    ("SunOS", "unix"),
    ("Amiga", "amiga"),
    ("BeOS", "beos"),
    ("IRIX", "unix"),
    ("OS/2", "os2"),
    ("Warp", "os2"),
    ("iPhone", "iphone"),
    ("Android", "android"),
    ("iPad", "ipad"),
    ("iPod", "ipod"),
];

/// 短代码转换工具
pub struct ShortCode;

impl ShortCode {
    /// 浏览器家族 -> 浏览器短代码
    pub fn browser(browser: &str) -> &'static str {
        Self::last_match(BROWSER_CODES, browser)
    }

    /// 平台全名 -> 平台短代码
    pub fn platform(platform: &str) -> &'static str {
        Self::last_match(PLATFORM_CODES, platform)
    }

    /// 是否为已知的浏览器短代码（规则求值时判断目标类型）
    pub fn is_browser_code(code: &str) -> bool {
        BROWSER_CODES.iter().any(|(_, short)| *short == code)
    }

    fn last_match(table: &'static [(&'static str, &'static str)], value: &str) -> &'static str {
        table
            .iter()
            .rev()
            .find(|(needle, _)| value.contains(needle))
            .map(|(_, short)| *short)
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browser_codes() {
        assert_eq!(ShortCode::browser("MSIE"), "ie");
        assert_eq!(ShortCode::browser("Firefox"), "ff");
        assert_eq!(ShortCode::browser("Netscape"), "netscape");
        assert_eq!(ShortCode::browser("Navigator"), "");
        assert_eq!(ShortCode::browser("Unknown"), "");
    }

    #[test]
    fn test_last_match_wins() {
        // 同时包含 Safari 与 Chrome 时取表中靠后的 Chrome
        assert_eq!(ShortCode::browser("Chrome Safari"), "chrome");
        // "Linux; Android" 形式的平台以 Android 为准
        assert_eq!(ShortCode::platform("Linux Android 2.2"), "android");
        // iPhone 的注释里也带 Mac OS X
        assert_eq!(ShortCode::platform("CPU iPhone OS 4_0 like Mac OS X"), "iphone");
    }

    #[test]
    fn test_platform_codes() {
        assert_eq!(ShortCode::platform("Windows NT 5.1"), "win");
        assert_eq!(ShortCode::platform("Windows ME"), "win");
        assert_eq!(ShortCode::platform("Intel Mac OS X 10_6_8"), "mac");
        assert_eq!(ShortCode::platform("PPC"), "");
        assert_eq!(ShortCode::platform("FreeBSD i386"), "unix");
        assert_eq!(ShortCode::platform("Warp 4"), "os2");
        assert_eq!(ShortCode::platform("Unknown"), "");
    }

    #[test]
    fn test_is_browser_code() {
        assert!(ShortCode::is_browser_code("ie"));
        assert!(ShortCode::is_browser_code("camino"));
        assert!(!ShortCode::is_browser_code("banana"));
        assert!(!ShortCode::is_browser_code(""));
    }
}
