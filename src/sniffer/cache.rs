//! 嗅探结果缓存管理
//! 按 源文件 + 浏览器画像 + 配置 生成缓存键，过滤结果以 MessagePack 落盘

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use rmp_serde::{Serializer, from_slice};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SnifferConfig;
use crate::error::{SnifferError, SnifferResult};
use crate::useragent::UserAgentProfile;

/// 缓存文件内容
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedOutput {
    key: String,
    variant: String,
    output: String,
}

/// 嗅探结果缓存管理器
pub struct SnifferCacheManager;

impl SnifferCacheManager {
    /// 计算缓存键（blake3 十六进制摘要）
    pub fn cache_key(source: &Path, profile: &UserAgentProfile, config: &SnifferConfig) -> String {
        let source = source.to_string_lossy();
        let fingerprint = config.fingerprint();

        let mut hasher = blake3::Hasher::new();
        hasher.update(b"rsniffer-cache-v1:");
        for part in [
            source.as_ref(),
            profile.browser.as_str(),
            profile.version.as_str(),
            profile.platform.as_str(),
            fingerprint.as_str(),
        ] {
            hasher.update(part.as_bytes());
            hasher.update(b"\0");
        }
        hasher.finalize().to_hex().to_string()
    }

    /// 缓存文件路径
    pub fn cache_path(config: &SnifferConfig, key: &str) -> PathBuf {
        config.cache_dir.join(format!("sniffer_{}.mp", key))
    }

    /// 读取缓存
    ///
    /// 缓存不存在、不比源文件新或键不一致时返回 `Ok(None)`
    pub async fn load(
        config: &SnifferConfig,
        key: &str,
        source_modified: SystemTime,
    ) -> SnifferResult<Option<String>> {
        let cache_path = Self::cache_path(config, key);
        let metadata = match tokio::fs::metadata(&cache_path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if metadata.modified()? <= source_modified {
            debug!("嗅探缓存已过期：{}", cache_path.display());
            return Ok(None);
        }

        let cache_data = tokio::fs::read(&cache_path).await?;
        let cached: CachedOutput = from_slice(&cache_data)
            .map_err(|e| SnifferError::CacheError(format!("反序列化失败：{}", e)))?;
        if cached.key != key {
            debug!("嗅探缓存键不一致，忽略：{}", cache_path.display());
            return Ok(None);
        }

        debug!("嗅探缓存命中（{}）：{}", cached.variant, cache_path.display());
        Ok(Some(cached.output))
    }

    /// 写入缓存
    pub async fn save(
        config: &SnifferConfig,
        key: &str,
        profile: &UserAgentProfile,
        output: &str,
    ) -> SnifferResult<()> {
        if !tokio::fs::metadata(&config.cache_dir)
            .await
            .map(|metadata| metadata.is_dir())
            .unwrap_or(false)
        {
            return Err(SnifferError::ConfigError(format!(
                "缓存目录不可用：{}",
                config.cache_dir.display()
            )));
        }

        let cached = CachedOutput {
            key: key.to_string(),
            variant: profile.variant_tag(),
            output: output.to_string(),
        };
        let mut cache_data = Vec::new();

        // MessagePack序列化
        cached
            .serialize(&mut Serializer::new(&mut cache_data))
            .map_err(|e| SnifferError::CacheError(format!("序列化失败：{}", e)))?;

        let cache_path = Self::cache_path(config, key);
        tokio::fs::write(&cache_path, cache_data).await?;
        debug!("嗅探结果已缓存：{}", cache_path.display());
        Ok(())
    }

    /// 清除单个缓存
    pub async fn clear(config: &SnifferConfig, key: &str) -> SnifferResult<()> {
        match tokio::fs::remove_file(Self::cache_path(config, key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigManager;
    use std::time::Duration;

    fn config_in(dir: &Path) -> SnifferConfig {
        ConfigManager::custom().cache_dir(dir.to_path_buf()).build()
    }

    #[test]
    fn test_cache_key_depends_on_inputs() {
        let config = ConfigManager::get_default();
        let source = Path::new("/styles/screen.css");
        let ie6 = UserAgentProfile::from_parts("MSIE", "6.0", "Windows NT 5.1");
        let ie7 = UserAgentProfile::from_parts("MSIE", "7.0", "Windows NT 5.1");

        let key = SnifferCacheManager::cache_key(source, &ie6, &config);
        assert_eq!(key.len(), 64);
        assert_eq!(key, SnifferCacheManager::cache_key(source, &ie6, &config));
        assert_ne!(key, SnifferCacheManager::cache_key(source, &ie7, &config));
        assert_ne!(key, SnifferCacheManager::cache_key(Path::new("/styles/print.css"), &ie6, &config));

        let other_config = ConfigManager::custom().blacklist(true).build();
        assert_ne!(key, SnifferCacheManager::cache_key(source, &ie6, &other_config));

        // 日志开关不影响过滤结果，缓存键不变
        let verbose_config = ConfigManager::custom().verbose(true).build();
        assert_eq!(key, SnifferCacheManager::cache_key(source, &ie6, &verbose_config));
    }

    #[tokio::test]
    async fn test_save_load_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let profile = UserAgentProfile::from_parts("Firefox", "3.6", "Linux i686");
        let key = SnifferCacheManager::cache_key(Path::new("a.css"), &profile, &config);
        let long_ago = SystemTime::now() - Duration::from_secs(3600);

        assert_eq!(SnifferCacheManager::load(&config, &key, long_ago).await.unwrap(), None);

        SnifferCacheManager::save(&config, &key, &profile, "body {}\n").await.unwrap();
        assert_eq!(
            SnifferCacheManager::load(&config, &key, long_ago).await.unwrap().as_deref(),
            Some("body {}\n")
        );

        // 源文件比缓存新时缓存失效
        let future = SystemTime::now() + Duration::from_secs(3600);
        assert_eq!(SnifferCacheManager::load(&config, &key, future).await.unwrap(), None);

        SnifferCacheManager::clear(&config, &key).await.unwrap();
        assert_eq!(SnifferCacheManager::load(&config, &key, long_ago).await.unwrap(), None);
        // 重复清除不报错
        SnifferCacheManager::clear(&config, &key).await.unwrap();
    }

    #[tokio::test]
    async fn test_corrupted_cache_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let key = "deadbeef";
        tokio::fs::write(SnifferCacheManager::cache_path(&config, key), b"\xc1not msgpack")
            .await
            .unwrap();
        let long_ago = SystemTime::now() - Duration::from_secs(3600);
        let result = SnifferCacheManager::load(&config, key, long_ago).await;
        assert!(matches!(result, Err(SnifferError::CacheError(_))));
    }

    #[tokio::test]
    async fn test_save_to_missing_dir_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir.path().join("missing"));
        let profile = UserAgentProfile::default();
        let result = SnifferCacheManager::save(&config, "k", &profile, "x").await;
        assert!(matches!(result, Err(SnifferError::ConfigError(_))));
    }
}
