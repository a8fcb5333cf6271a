//! 嗅探器核心：整合画像、黑名单、按行过滤与结果缓存
use std::io::BufRead;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use super::blacklist::Blacklist;
use super::cache::SnifferCacheManager;
use super::filter::{SniffedReader, sniff_text};
use crate::config::SnifferConfig;
use crate::error::{SnifferError, SnifferResult};
use crate::useragent::{UserAgentProfile, profile_cached};

/// 样式嗅探器
///
/// 画像由调用方显式注入；每次过滤都使用独立的分类注册表
#[derive(Debug, Clone)]
pub struct Sniffer {
    config: SnifferConfig,
    profile: Arc<UserAgentProfile>,
}

impl Sniffer {
    /// 使用已有画像创建嗅探器
    pub fn new(config: SnifferConfig, profile: UserAgentProfile) -> Self {
        Self {
            config,
            profile: Arc::new(profile),
        }
    }

    /// 由 UA 字符串创建嗅探器（画像经进程级缓存获取）
    pub fn from_user_agent(config: SnifferConfig, user_agent: Option<&str>) -> Self {
        Self {
            config,
            profile: profile_cached(user_agent),
        }
    }

    pub fn profile(&self) -> &UserAgentProfile {
        &self.profile
    }

    pub fn config(&self) -> &SnifferConfig {
        &self.config
    }

    /// 是否因黑名单而不输出任何内容
    pub fn is_blacklisted(&self) -> bool {
        self.config.blacklist
            && Blacklist::is_blacklisted(&self.profile, &self.config.blacklist_min_versions)
    }

    /// 过滤整段文本
    pub fn sniff_str(&self, text: &str) -> String {
        if self.is_blacklisted() {
            debug!("浏览器在黑名单中，不输出内容：{}", self.profile);
            return String::new();
        }
        sniff_text(text, &self.profile)
    }

    /// 惰性过滤 `BufRead` 输入
    pub fn sniff_reader<R: BufRead>(&self, reader: R) -> SniffedReader<'_, R> {
        if self.is_blacklisted() {
            debug!("浏览器在黑名单中，不输出内容：{}", self.profile);
            return SniffedReader::withheld(reader, &self.profile);
        }
        SniffedReader::new(reader, &self.profile)
    }

    /// 过滤文件，启用缓存时优先读取未过期的缓存结果
    pub async fn sniff_file(&self, path: impl AsRef<Path>) -> SnifferResult<String> {
        let path = path.as_ref();
        let metadata = tokio::fs::metadata(path).await?;
        if !metadata.is_file() {
            return Err(SnifferError::InvalidInput(format!(
                "不是普通文件：{}",
                path.display()
            )));
        }
        if self.is_blacklisted() {
            debug!("浏览器在黑名单中，不输出内容：{}", self.profile);
            return Ok(String::new());
        }

        let cache_key = self
            .config
            .cache
            .then(|| SnifferCacheManager::cache_key(path, &self.profile, &self.config));

        if let Some(key) = &cache_key {
            match SnifferCacheManager::load(&self.config, key, metadata.modified()?).await {
                Ok(Some(output)) => return Ok(output),
                Ok(None) => debug!("嗅探缓存未命中：{}", path.display()),
                Err(e) => warn!("嗅探缓存读取失败，重新过滤：{}", e),
            }
        }

        let bytes = tokio::fs::read(path).await?;
        let text = String::from_utf8(bytes).map_err(|e| {
            SnifferError::InvalidInput(format!("{} 不是有效的UTF-8文本：{}", path.display(), e))
        })?;
        let output = sniff_text(&text, &self.profile);

        if let Some(key) = &cache_key {
            if let Err(e) = SnifferCacheManager::save(&self.config, key, &self.profile, &output).await {
                warn!("嗅探结果缓存失败：{}", e);
            }
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigManager;
    use std::fs::File;
    use std::io::Cursor;
    use std::time::{Duration, SystemTime};

    const CSS: &str = "a { color: red; }\nb { zoom: 1; } /** ie6 ie7 */\n/** modern : ff3+ safari3+ chrome */\nc { opacity: .5; } /** modern */\n";

    fn no_cache() -> SnifferConfig {
        ConfigManager::custom().cache(false).build()
    }

    #[test]
    fn test_sniff_str_from_user_agent() {
        let sniffer = Sniffer::from_user_agent(
            no_cache(),
            Some("Mozilla/4.0 (compatible; MSIE 7.0; Windows NT 6.0)"),
        );
        assert_eq!(sniffer.profile().browser_short, "ie");
        assert_eq!(
            sniffer.sniff_str(CSS),
            "a { color: red; }\nb { zoom: 1; } \n\n"
        );

        let sniffer = Sniffer::from_user_agent(
            no_cache(),
            Some("Mozilla/5.0 (X11; U; Linux i686; en-US; rv:1.9.2.13) Gecko/20101206 Firefox/3.6.13"),
        );
        assert_eq!(
            sniffer.sniff_str(CSS),
            "a { color: red; }\n\nc { opacity: .5; } \n"
        );
    }

    #[test]
    fn test_blacklist_withholds_output() {
        let config = ConfigManager::custom().cache(false).blacklist(true).build();
        let sniffer = Sniffer::new(config, UserAgentProfile::from_parts("MSIE", "5.5", "Windows 98"));
        assert!(sniffer.is_blacklisted());
        assert_eq!(sniffer.sniff_str(CSS), "");
        assert_eq!(sniffer.sniff_reader(Cursor::new(CSS)).count(), 0);

        // 未开启黑名单时正常输出
        let sniffer = Sniffer::new(no_cache(), UserAgentProfile::from_parts("MSIE", "5.5", "Windows 98"));
        assert!(!sniffer.is_blacklisted());
        assert_eq!(sniffer.sniff_str("a\n"), "a\n");
    }

    #[test]
    fn test_sniff_reader_matches_sniff_str() {
        let sniffer = Sniffer::new(no_cache(), UserAgentProfile::from_parts("Chrome", "13.0", "Windows NT 6.1"));
        let lines: SnifferResult<Vec<String>> = sniffer.sniff_reader(Cursor::new(CSS)).collect();
        assert_eq!(lines.unwrap().concat(), sniffer.sniff_str(CSS));
    }

    #[tokio::test]
    async fn test_sniff_file_uses_cache() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("screen.css");
        std::fs::write(&source, CSS).unwrap();
        // 源文件时间设置到过去，保证缓存文件一定更新
        File::options()
            .write(true)
            .open(&source)
            .unwrap()
            .set_modified(SystemTime::now() - Duration::from_secs(3600))
            .unwrap();

        let config = ConfigManager::custom().cache_dir(dir.path().to_path_buf()).build();
        let sniffer = Sniffer::new(config.clone(), UserAgentProfile::from_parts("MSIE", "6.0", "Windows NT 5.1"));

        let first = sniffer.sniff_file(&source).await.unwrap();
        assert_eq!(first, "a { color: red; }\nb { zoom: 1; } \n\n");

        // 篡改缓存内容，证明第二次读取来自缓存
        let key = SnifferCacheManager::cache_key(&source, sniffer.profile(), &config);
        SnifferCacheManager::save(&config, &key, sniffer.profile(), "cached\n").await.unwrap();
        assert_eq!(sniffer.sniff_file(&source).await.unwrap(), "cached\n");

        // 关闭缓存后重新过滤
        let sniffer = Sniffer::new(no_cache(), UserAgentProfile::from_parts("MSIE", "6.0", "Windows NT 5.1"));
        assert_eq!(sniffer.sniff_file(&source).await.unwrap(), first);
    }

    #[tokio::test]
    async fn test_sniff_file_missing_or_directory() {
        let dir = tempfile::tempdir().unwrap();
        let sniffer = Sniffer::new(no_cache(), UserAgentProfile::default());

        let missing = sniffer.sniff_file(dir.path().join("missing.css")).await;
        assert!(matches!(missing, Err(SnifferError::IoError(_))));

        let directory = sniffer.sniff_file(dir.path()).await;
        assert!(matches!(directory, Err(SnifferError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_sniff_file_rejects_non_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("binary.css");
        std::fs::write(&source, b"\xff\xfe\xfd").unwrap();
        let sniffer = Sniffer::new(no_cache(), UserAgentProfile::default());
        assert!(matches!(
            sniffer.sniff_file(&source).await,
            Err(SnifferError::InvalidInput(_))
        ));
    }
}
