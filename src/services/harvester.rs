use anyhow::Result;
use tracing::{error, info, warn};

use crate::app::AppConfig;
use crate::browser::{BrowserSession, CatalogTabs};
use crate::core::{EntryLink, EntryOutcome, HarvestStats, StopReason};
use crate::modules::catalogue::detail_url;
use crate::modules::extractor::extract_record;
use crate::modules::storage::BibWriter;
use crate::services::navigator::{self, CatalogBrowser};
use crate::utils::collapse_whitespace;

/// 处理单个条目：打开详情页、解析、追加写入
async fn process_entry<B: CatalogBrowser>(
    browser: &mut B,
    config: &AppConfig,
    writer: &BibWriter,
    index: usize,
    link: &EntryLink,
) -> EntryOutcome {
    let url = detail_url(&config.base_url, link, &config.detail_suffix);
    info!("正在访问第 {} 篇论文: {}", index + 1, url);

    let result: Result<String> = async {
        let html = browser.detail_html(&url).await?;
        let record = extract_record(&html)?;
        writer.append(&record)?;
        Ok(format!("{} ({})", record.key, collapse_whitespace(&record.title)))
    }
    .await;

    match result {
        Ok(summary) => {
            info!("✅ 已保存 {}: {}", link, summary);
            EntryOutcome::Saved
        }
        Err(e) => {
            warn!("❌ 无法提取第 {} 篇论文 ({}) 的元数据: {:#}", index + 1, link, e);
            EntryOutcome::Failed
        }
    }
}

/// 分页抓取循环；导航失败只结束循环，不作为错误返回
pub async fn harvest<B: CatalogBrowser>(
    browser: &mut B,
    config: &AppConfig,
    writer: &BibWriter,
) -> (HarvestStats, StopReason) {
    let mut stats = HarvestStats::default();

    if let Err(e) = navigator::start(browser).await {
        error!("点击'按日期排序'失败: {:#}", e);
        return (
            stats,
            StopReason::NavigationFailed {
                page: 0,
                message: format!("{:#}", e),
            },
        );
    }

    let mut page_number = 1;
    while page_number <= config.max_pages {
        info!("📖 正在处理第 {} 页...", page_number);

        let links = match navigator::entry_links(browser, &config.entry_link_selector).await {
            Ok(links) => links,
            Err(e) => {
                error!("读取第 {} 页的论文链接失败: {:#}", page_number, e);
                return (
                    stats,
                    StopReason::NavigationFailed {
                        page: page_number,
                        message: format!("{:#}", e),
                    },
                );
            }
        };

        if links.is_empty() {
            warn!("第 {} 页没有找到论文链接", page_number);
            return (stats, StopReason::NoEntries { page: page_number });
        }
        info!("📄 第 {} 页找到 {} 个论文链接", page_number, links.len());

        for (index, link) in links.iter().enumerate() {
            let outcome = process_entry(browser, config, writer, index, link).await;
            stats.add_result(&outcome);
        }
        stats.pages += 1;

        if page_number >= config.max_pages {
            break;
        }

        if let Err(e) = navigator::advance(browser, config.strategy, page_number).await {
            error!("前往第 {} 页失败: {:#}", page_number + 1, e);
            return (
                stats,
                StopReason::NavigationFailed {
                    page: page_number,
                    message: format!("{:#}", e),
                },
            );
        }
        page_number += 1;
        info!("{}", "=".repeat(60));
    }

    info!("已处理完所有页面");
    (stats, StopReason::PageLimit)
}

/// 入口：打开浏览器会话，抓取全部页面，最后无条件关闭会话
pub async fn run(config: AppConfig) -> Result<HarvestStats> {
    let writer = BibWriter::new(&config.output_file);

    info!("🚀 开始抓取论文元数据...");
    info!("📚 目录: {}", config.catalog_url());
    info!("📊 最多 {} 页，翻页方式 {:?}", config.max_pages, config.strategy);
    info!("💾 输出文件: {}", writer.path().display());

    let mut session = match config.debug_port {
        Some(port) => BrowserSession::connect(port).await?,
        None => BrowserSession::launch(config.headless, config.chrome_executable.as_deref()).await?,
    };

    let outcome = match CatalogTabs::open(&mut session, &config).await {
        Ok(mut tabs) => Ok(harvest(&mut tabs, &config, &writer).await),
        Err(e) => Err(e),
    };

    session.close().await;

    let (stats, reason) = outcome?;
    info!("结束原因: {}", reason);
    info!(
        "🎉 处理完成! 共 {} 页，保存 {} 篇，失败 {} 篇",
        stats.pages, stats.saved, stats.failed
    );
    Ok(stats)
}
