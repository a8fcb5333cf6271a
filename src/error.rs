//! 全局错误类型定义
//! UA 解析与规则求值本身不会失败，错误只出现在输入源、缓存等边界处

use thiserror::Error;
use serde_json::Error as SerdeJsonError;
use std::io::Error as IoError;

#[derive(Error, Debug)]
pub enum SnifferError {
    // 输入相关错误
    #[error("无效输入：{0}")]
    InvalidInput(String),

    // 缓存相关错误
    #[error("嗅探缓存失败：{0}")]
    CacheError(String),

    // 配置相关错误
    #[error("配置错误：{0}")]
    ConfigError(String),

    // 序列化/反序列化错误
    #[error("JSON解析失败：{0}")]
    JsonError(#[from] SerdeJsonError),

    // 基础错误
    #[error("IO操作失败：{0}")]
    IoError(#[from] IoError),
}

// 全局Result类型
pub type SnifferResult<T> = Result<T, SnifferError>;
