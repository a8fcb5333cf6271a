//! 浏览器黑名单
//! 低于最低支持版本的浏览器（C 级浏览器）不输出任何样式

use std::collections::BTreeMap;

use crate::useragent::UserAgentProfile;

/// 黑名单判定工具
pub struct Blacklist;

impl Blacklist {
    /// 浏览器短代码有最低版本要求，且画像版本低于该版本时命中
    pub fn is_blacklisted(profile: &UserAgentProfile, min_versions: &BTreeMap<String, f64>) -> bool {
        min_versions
            .get(&profile.browser_short)
            .is_some_and(|min_version| profile.version_number() < *min_version)
    }
}
