use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 翻页方式
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PageStrategy {
    /// 回到目录首页，重新按日期排序，再点击 N 次"下一页"
    #[default]
    Replay,
    /// 目录页保留在独立标签页中，每页只点击一次"下一页"
    Continue,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_collection_path")]
    pub collection_path: String,
    #[serde(default = "default_sort_link_selector")]
    pub sort_link_selector: String,
    #[serde(default = "default_next_page_selector")]
    pub next_page_selector: String,
    #[serde(default = "default_entry_link_selector")]
    pub entry_link_selector: String,
    #[serde(default = "default_metadata_selector")]
    pub metadata_selector: String,
    #[serde(default = "default_detail_suffix")]
    pub detail_suffix: String,
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
    #[serde(default = "default_wait_timeout_secs")]
    pub wait_timeout_secs: u64,
    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,
    #[serde(default)]
    pub strategy: PageStrategy,
    #[serde(default = "default_headless")]
    pub headless: bool,
    /// 已打开浏览器的远程调试端口；为空时自行启动无头浏览器
    #[serde(default)]
    pub debug_port: Option<u16>,
    #[serde(default)]
    pub chrome_executable: Option<PathBuf>,
}

impl AppConfig {
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let path = config_path.unwrap_or_else(|| Path::new("config.toml"));
        if path.exists() {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("读取配置文件失败: {}", path.display()))?;
            return Self::from_toml(&raw)
                .with_context(|| format!("解析配置文件失败: {}", path.display()));
        }
        if config_path.is_some() {
            anyhow::bail!("配置文件不存在: {}", path.display());
        }
        Ok(AppConfig::default())
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        let cfg: AppConfig = toml::from_str(raw)?;
        Ok(cfg)
    }

    pub fn catalog_url(&self) -> String {
        crate::utils::join_url(&self.base_url, &self.collection_path)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            collection_path: default_collection_path(),
            sort_link_selector: default_sort_link_selector(),
            next_page_selector: default_next_page_selector(),
            entry_link_selector: default_entry_link_selector(),
            metadata_selector: default_metadata_selector(),
            detail_suffix: default_detail_suffix(),
            max_pages: default_max_pages(),
            settle_delay_ms: default_settle_delay_ms(),
            wait_timeout_secs: default_wait_timeout_secs(),
            output_file: default_output_file(),
            strategy: PageStrategy::default(),
            headless: default_headless(),
            debug_port: None,
            chrome_executable: None,
        }
    }
}

fn default_base_url() -> String {
    "https://cybertesis.unmsm.edu.pe".to_string()
}

fn default_collection_path() -> String {
    "/collection/8c7c6dc5-2beb-4b23-a722-50012376769e".to_string()
}

fn default_sort_link_selector() -> String {
    "a[href='/browse/dateissued/']".to_string()
}

fn default_next_page_selector() -> String {
    "button[aria-label='Go to next page']".to_string()
}

fn default_entry_link_selector() -> String {
    "a.MuiTypography-root.MuiTypography-h5.MuiLink-root.MuiLink-underlineNone.css-mr5w6s"
        .to_string()
}

fn default_metadata_selector() -> String {
    ".MuiTableCell-root".to_string()
}

fn default_detail_suffix() -> String {
    "/full".to_string()
}

fn default_max_pages() -> u32 {
    10
}

fn default_settle_delay_ms() -> u64 {
    3000
}

fn default_wait_timeout_secs() -> u64 {
    10
}

fn default_output_file() -> PathBuf {
    PathBuf::from("bibliofisi.bib")
}

fn default_headless() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.max_pages, 10);
        assert_eq!(cfg.strategy, PageStrategy::Replay);
        assert_eq!(cfg.wait_timeout(), Duration::from_secs(10));
        assert_eq!(
            cfg.catalog_url(),
            "https://cybertesis.unmsm.edu.pe/collection/8c7c6dc5-2beb-4b23-a722-50012376769e"
        );
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let cfg = AppConfig::from_toml(
            r#"
            max_pages = 3
            strategy = "continue"
            output_file = "salida/fisica.bib"
            debug_port = 9222
            "#,
        )
        .unwrap();
        assert_eq!(cfg.max_pages, 3);
        assert_eq!(cfg.strategy, PageStrategy::Continue);
        assert_eq!(cfg.output_file, PathBuf::from("salida/fisica.bib"));
        assert_eq!(cfg.debug_port, Some(9222));
        assert_eq!(cfg.detail_suffix, "/full");
        assert!(cfg.headless);
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        assert!(AppConfig::from_toml("strategy = \"jump\"").is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("config.toml");
        assert!(AppConfig::load(Some(&missing)).is_err());
    }
}
