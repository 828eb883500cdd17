use anyhow::{Context, Result};
use chromiumoxide::Page;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info};

use super::session::{BrowserSession, click_when_ready, wait_for_element};
use crate::app::AppConfig;
use crate::services::navigator::CatalogBrowser;

/// 目录页和详情页各占一个标签页，翻页状态留在目录页标签中
pub struct CatalogTabs {
    listing: Page,
    detail: Page,
    catalog_url: String,
    sort_link_selector: String,
    next_page_selector: String,
    metadata_selector: String,
    settle: Duration,
    timeout: Duration,
}

impl CatalogTabs {
    pub async fn open(session: &mut BrowserSession, config: &AppConfig) -> Result<Self> {
        let listing = session.open_tab().await?;
        let detail = session.open_tab().await?;
        Ok(Self {
            listing,
            detail,
            catalog_url: config.catalog_url(),
            sort_link_selector: config.sort_link_selector.clone(),
            next_page_selector: config.next_page_selector.clone(),
            metadata_selector: config.metadata_selector.clone(),
            settle: config.settle_delay(),
            timeout: config.wait_timeout(),
        })
    }
}

impl CatalogBrowser for CatalogTabs {
    async fn open_catalog(&mut self) -> Result<()> {
        self.listing
            .goto(self.catalog_url.as_str())
            .await
            .with_context(|| format!("打开目录页失败: {}", self.catalog_url))?;
        info!("已回到目录首页");
        sleep(self.settle).await;
        Ok(())
    }

    async fn activate_sort(&mut self) -> Result<()> {
        click_when_ready(&self.listing, &self.sort_link_selector, self.timeout)
            .await
            .context("点击'按日期排序'失败")?;
        info!("已点击'按日期排序'");
        sleep(self.settle).await;
        Ok(())
    }

    async fn click_next_page(&mut self) -> Result<()> {
        click_when_ready(&self.listing, &self.next_page_selector, self.timeout)
            .await
            .context("点击'下一页'失败")?;
        debug!("已点击'下一页'");
        sleep(self.settle).await;
        Ok(())
    }

    async fn listing_html(&mut self) -> Result<String> {
        self.listing.content().await.context("读取目录页 HTML 失败")
    }

    async fn detail_html(&mut self, url: &str) -> Result<String> {
        self.detail
            .goto(url)
            .await
            .with_context(|| format!("打开详情页失败: {}", url))?;
        wait_for_element(&self.detail, &self.metadata_selector, self.timeout).await?;
        self.detail.content().await.context("读取详情页 HTML 失败")
    }
}
