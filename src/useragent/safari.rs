//! Safari 版本号规范化
//! 早期 Safari 在 UA 中报告的是内部构建号（如 312.5）而非对外版本号（如 1.3.2）

use crate::utils::VersionNumber;

/// 对外版本号 -> 最低构建号 (major, minor)，按版本升序排列
const SAFARI_BUILDS: &[(&str, (u64, u64))] = &[
    ("1.0", (85, 5)),
    ("1.0.3", (85, 8)),
    ("1.2", (125, 0)),
    ("1.2.2", (125, 7)),
    ("1.2.3", (125, 9)),
    ("1.2.4", (125, 12)),
    ("1.3", (312, 0)),
    ("1.3.1", (312, 3)),
    ("1.3.2", (312, 5)),
    ("2.0", (412, 0)),
    ("2.0.1", (412, 5)),
    ("2.0.2", (416, 12)),
    ("2.0.3", (417, 8)),
    ("2.0.4", (419, 3)),
];

/// 小于该值的版本号视为已是对外版本号
const MARKETING_VERSION_CEILING: f64 = 20.0;

/// Safari 版本转换工具
pub struct SafariVersion;

impl SafariVersion {
    /// 构建号 -> 对外版本号
    ///
    /// - 数值小于 20 的视为对外版本号，原样返回
    /// - 否则取 major、minor 均不超过输入的最高表项（两段分别比较）
    /// - 少于两段或没有满足条件的表项时原样返回
    pub fn canonicalize(raw_build: &str) -> String {
        if VersionNumber::loose_float(raw_build) < MARKETING_VERSION_CEILING {
            return raw_build.to_string();
        }
        let Some(build) = VersionNumber::major_minor(raw_build) else {
            return raw_build.to_string();
        };

        SAFARI_BUILDS
            .iter()
            .rev()
            .find(|(_, (major, minor))| *major <= build.0 && *minor <= build.1)
            .map(|(marketing, _)| marketing.to_string())
            .unwrap_or_else(|| raw_build.to_string())
    }
}
