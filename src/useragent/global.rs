//! 进程级 UA 画像缓存
//! 以原始 UA 字符串为键，只追加不修改，同一进程内相同 UA 只解析一次
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::trace;

use super::model::UserAgentProfile;
use super::parser::UserAgentParser;

/// 全局画像缓存实例
static PROFILE_CACHE: Lazy<RwLock<HashMap<String, Arc<UserAgentProfile>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// 获取（必要时解析并缓存）UA 画像
///
/// 已存在的条目永不覆盖；锁中毒时退化为直接解析，不影响调用方
pub fn profile_cached(user_agent: Option<&str>) -> Arc<UserAgentProfile> {
    let key = user_agent.unwrap_or("");

    if let Ok(cache) = PROFILE_CACHE.read() {
        if let Some(profile) = cache.get(key) {
            trace!("UA画像缓存命中：{}", key);
            return Arc::clone(profile);
        }
    }

    let parsed = Arc::new(UserAgentParser::parse(user_agent));
    match PROFILE_CACHE.write() {
        Ok(mut cache) => Arc::clone(cache.entry(key.to_string()).or_insert(parsed)),
        Err(_) => parsed,
    }
}

/// 当前缓存的画像数量
pub fn cached_profile_count() -> usize {
    PROFILE_CACHE.read().map(|cache| cache.len()).unwrap_or(0)
}
