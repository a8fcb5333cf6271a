//! 版本号工具模块
//! 所有版本比较统一走这里的宽松浮点解析，保证 "5.5"、"3.6.13"、"Unknown" 这类
//! 自由格式版本串在各处的比较结果一致

/// 版本号工具类
pub struct VersionNumber;

impl VersionNumber {
    /// 宽松浮点解析：取字符串开头的数字前缀作为浮点数，解析不到则为 0
    ///
    /// # 规则
    /// - 忽略前导空白
    /// - 可选正负号、整数部分、小数部分、指数部分（指数后必须跟数字）
    /// - 遇到第一个不符合的字符即停止，例如 `"3.6.13"` -> `3.6`，`"5.5b"` -> `5.5`
    /// - 没有任何数字时返回 `0.0`，例如 `"Unknown"`、`""`、`"."`
    pub fn loose_float(raw: &str) -> f64 {
        let s = raw.trim_start();
        let bytes = s.as_bytes();
        let mut end = 0;

        if matches!(bytes.first(), Some(b'+' | b'-')) {
            end += 1;
        }

        let int_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        let mut digits = end - int_start;

        if end < bytes.len() && bytes[end] == b'.' {
            let frac_start = end + 1;
            let mut frac_end = frac_start;
            while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
                frac_end += 1;
            }
            if digits > 0 || frac_end > frac_start {
                digits += frac_end - frac_start;
                end = frac_end;
            }
        }

        if digits == 0 {
            return 0.0;
        }

        // 指数部分：仅在 e/E 后确实跟着数字时才吃进去
        if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
            let mut exp_end = end + 1;
            if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
                exp_end += 1;
            }
            let exp_digits_start = exp_end;
            while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
                exp_end += 1;
            }
            if exp_end > exp_digits_start {
                end = exp_end;
            }
        }

        s[..end].parse::<f64>().unwrap_or(0.0)
    }

    /// 取版本号前两段的整数值 (major, minor)
    ///
    /// 少于两段时返回 `None`；每段取数字前缀，无数字按 0 处理
    pub fn major_minor(raw: &str) -> Option<(u64, u64)> {
        let mut parts = raw.split('.');
        let major = parts.next()?;
        let minor = parts.next()?;
        Some((Self::leading_integer(major), Self::leading_integer(minor)))
    }

    /// 版本号保留一位小数后的最短表示，例如 `"3.6.13"` -> `"3.6"`，`"7.0"` -> `"7"`
    pub fn one_decimal(raw: &str) -> String {
        let rounded = (Self::loose_float(raw) * 10.0).round() / 10.0;
        // 避免输出 "-0"
        if rounded == 0.0 {
            return "0".to_string();
        }
        format!("{}", rounded)
    }

    fn leading_integer(segment: &str) -> u64 {
        let digits: String = segment
            .trim()
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().unwrap_or(0)
    }
}
