//! rsniffer - 服务端浏览器嗅探工具
//!
//! 由 UA 字符串推导浏览器画像（浏览器、版本、平台及短代码），
//! 再根据行尾的 `/** ... */` 条件注释逐行过滤样式表。

// 导出全局错误类型
pub use self::error::{SnifferError, SnifferResult};

// 导出配置模块
pub use self::config::{SnifferConfig, ConfigManager, CustomConfigBuilder};

// 导出UA模块核心接口
pub use self::useragent::{
    UserAgentProfile, UserAgentParser, ProductTokenizer, ProductToken,
    profile, profile_cached,
};

// 导出嗅探模块核心接口
pub use self::sniffer::{
    Sniffer, Rule, CategoryRegistry, RuleEvaluator,
    sniff_lines, sniff_text, SnifferCacheManager, Blacklist,
};

// 导出工具模块核心接口
pub use self::utils::VersionNumber;

// 声明所有子模块
pub mod config;
pub mod error;
pub mod useragent;
pub mod sniffer;
pub mod utils;
