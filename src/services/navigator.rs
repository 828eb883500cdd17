use anyhow::Result;
use tracing::{debug, info};

use crate::app::PageStrategy;
use crate::core::EntryLink;
use crate::modules::catalogue::extract_entry_links;

/// 驱动目录网站的最小操作集合，真实实现见 `browser::CatalogTabs`
#[allow(async_fn_in_trait)]
pub trait CatalogBrowser {
    /// 打开目录首页并等待页面稳定
    async fn open_catalog(&mut self) -> Result<()>;
    /// 点击"按日期排序"
    async fn activate_sort(&mut self) -> Result<()>;
    /// 点击一次"下一页"
    async fn click_next_page(&mut self) -> Result<()>;
    /// 当前目录页的 HTML
    async fn listing_html(&mut self) -> Result<String>;
    /// 打开详情页，等待元数据表出现后返回 HTML
    async fn detail_html(&mut self, url: &str) -> Result<String>;
}

/// 打开目录并按日期排序，对应第 1 页
pub async fn start<B: CatalogBrowser>(browser: &mut B) -> Result<()> {
    browser.open_catalog().await?;
    browser.activate_sort().await
}

/// 从第 `current_page` 页前进到下一页
pub async fn advance<B: CatalogBrowser>(
    browser: &mut B,
    strategy: PageStrategy,
    current_page: u32,
) -> Result<()> {
    match strategy {
        PageStrategy::Replay => {
            start(browser).await?;
            info!("重新排序，准备前往第 {} 页", current_page + 1);
            for click in 1..=current_page {
                browser.click_next_page().await?;
                debug!("下一页 {}/{}", click, current_page);
            }
        }
        PageStrategy::Continue => {
            browser.click_next_page().await?;
        }
    }
    Ok(())
}

pub async fn entry_links<B: CatalogBrowser>(
    browser: &mut B,
    link_selector: &str,
) -> Result<Vec<EntryLink>> {
    let html = browser.listing_html().await?;
    extract_entry_links(&html, link_selector)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use anyhow::anyhow;
    use std::collections::HashMap;

    pub const LINK_SELECTOR: &str = "a.thesis-link";

    /// 内存中的目录网站：按页保存条目链接，记录每次点击
    #[derive(Debug, Default)]
    pub struct ScriptedCatalog {
        pub pages: Vec<Vec<String>>,
        pub details: HashMap<String, String>,
        pub sort_available: bool,
        pub current: usize,
        pub sorted: bool,
        pub opens: usize,
        pub next_clicks: usize,
        pub visited: Vec<String>,
    }

    impl ScriptedCatalog {
        pub fn new(pages: &[&[&str]]) -> Self {
            Self {
                pages: pages
                    .iter()
                    .map(|links| links.iter().map(|l| l.to_string()).collect())
                    .collect(),
                sort_available: true,
                ..Default::default()
            }
        }

        pub fn with_detail(mut self, url: &str, html: &str) -> Self {
            self.details.insert(url.to_string(), html.to_string());
            self
        }
    }

    impl CatalogBrowser for ScriptedCatalog {
        async fn open_catalog(&mut self) -> Result<()> {
            self.opens += 1;
            self.current = 0;
            self.sorted = false;
            Ok(())
        }

        async fn activate_sort(&mut self) -> Result<()> {
            if !self.sort_available {
                return Err(anyhow!("等待元素 'a[href=...]' 超时"));
            }
            self.sorted = true;
            Ok(())
        }

        async fn click_next_page(&mut self) -> Result<()> {
            if !self.sorted || self.current + 1 >= self.pages.len() {
                return Err(anyhow!("找不到'下一页'按钮"));
            }
            self.next_clicks += 1;
            self.current += 1;
            Ok(())
        }

        async fn listing_html(&mut self) -> Result<String> {
            let links: String = self
                .pages
                .get(self.current)
                .map(|links| {
                    links
                        .iter()
                        .map(|href| format!("<a class=\"thesis-link\" href=\"{}\">t</a>", href))
                        .collect()
                })
                .unwrap_or_default();
            Ok(format!("<html><body>{}</body></html>", links))
        }

        async fn detail_html(&mut self, url: &str) -> Result<String> {
            self.visited.push(url.to_string());
            self.details
                .get(url)
                .cloned()
                .ok_or_else(|| anyhow!("等待元数据表超时: {}", url))
        }
    }
}
