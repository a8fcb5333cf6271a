//! 全局配置管理,存储所有可配置项

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// 嗅探器配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnifferConfig {
    // 是否启用输出缓存
    pub cache: bool,
    // 缓存目录
    pub cache_dir: PathBuf,
    // 是否启用浏览器黑名单（过旧的浏览器不输出任何内容）
    pub blacklist: bool,
    // 黑名单最低版本（浏览器短代码 -> 最低版本）
    pub blacklist_min_versions: BTreeMap<String, f64>,
    // 是否启用详细日志
    pub verbose: bool,
}

impl Default for SnifferConfig {
    fn default() -> Self {
        Self {
            cache: true,
            cache_dir: std::env::temp_dir(),
            blacklist: false,
            blacklist_min_versions: default_blacklist_min_versions(),
            verbose: false,
        }
    }
}

/// 默认黑名单：C 级浏览器的最低支持版本
pub fn default_blacklist_min_versions() -> BTreeMap<String, f64> {
    [
        ("ie", 6.0),
        ("safari", 3.0),
        ("ff", 3.0),
        ("opera", 9.5),
        ("netscape", 8.0),
    ]
    .into_iter()
    .map(|(code, version)| (code.to_string(), version))
    .collect()
}

impl SnifferConfig {
    /// 配置指纹，参与缓存键计算；配置变化时旧缓存自动失效
    ///
    /// 只包含影响过滤结果的配置项，日志开关不参与
    pub fn fingerprint(&self) -> String {
        let relevant = SnifferConfig {
            verbose: false,
            ..self.clone()
        };
        serde_json::to_string(&relevant).unwrap_or_default()
    }
}

/// 配置管理器
pub struct ConfigManager;

impl ConfigManager {
    /// 获取默认配置
    pub fn get_default() -> SnifferConfig {
        SnifferConfig::default()
    }

    /// 自定义配置
    pub fn custom() -> CustomConfigBuilder {
        CustomConfigBuilder::new()
    }
}

/// 配置构建器（便于自定义配置）
#[derive(Debug, Clone, Default)]
pub struct CustomConfigBuilder {
    config: SnifferConfig,
}

impl CustomConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: SnifferConfig::default(),
        }
    }

    pub fn cache(mut self, enabled: bool) -> Self {
        self.config.cache = enabled;
        self
    }

    pub fn cache_dir(mut self, dir: PathBuf) -> Self {
        self.config.cache_dir = dir;
        self
    }

    pub fn blacklist(mut self, enabled: bool) -> Self {
        self.config.blacklist = enabled;
        self
    }

    pub fn blacklist_min_version(mut self, browser_short: &str, version: f64) -> Self {
        self.config
            .blacklist_min_versions
            .insert(browser_short.to_string(), version);
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    /// 开发模式：无论其他选项如何，都关闭缓存
    pub fn dev_mode(mut self, dev: bool) -> Self {
        if dev {
            self.config.cache = false;
        }
        self
    }

    pub fn build(self) -> SnifferConfig {
        self.config
    }
}
