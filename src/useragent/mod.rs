//! UA 模块：UA 字符串切分、浏览器/版本/平台推导与短代码规范化
pub mod model;
pub mod tokenizer;
pub mod parser;
pub mod safari;
pub mod short_code;
pub mod global;

// 导出核心接口
pub use self::model::{ProductToken, UserAgentProfile, UNKNOWN};
pub use self::tokenizer::ProductTokenizer;
pub use self::parser::UserAgentParser;
pub use self::safari::SafariVersion;
pub use self::short_code::ShortCode;
pub use self::global::{profile_cached, cached_profile_count};

/// 解析 UA 字符串，生成浏览器画像（不经过进程级缓存）
pub fn profile(user_agent: Option<&str>) -> UserAgentProfile {
    UserAgentParser::parse(user_agent)
}
