//! 通用工具模块
pub mod version_number;

pub use self::version_number::VersionNumber;
