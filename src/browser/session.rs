use anyhow::{Context, Result, anyhow};
use chromiumoxide::element::Element;
use chromiumoxide::handler::viewport::Viewport;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use std::path::Path;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep};
use tracing::{debug, info, warn};

const UA_STRING: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const HIDE_WEBDRIVER_JS: &str =
    "Object.defineProperty(navigator, 'webdriver', { get: () => undefined })";
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// 整个运行期间唯一的浏览器会话
pub struct BrowserSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
    /// 自己启动的浏览器在结束时关闭；连接到的外部浏览器只关闭自己开的标签页
    owned: bool,
    tabs: Vec<Page>,
}

impl BrowserSession {
    /// 启动一个新的浏览器（默认无头）
    pub async fn launch(headless: bool, chrome_executable: Option<&Path>) -> Result<Self> {
        let viewport = Viewport {
            width: 1920,
            height: 1080,
            ..Default::default()
        };

        let mut builder = BrowserConfig::builder()
            .viewport(viewport)
            .arg(format!("--user-agent={}", UA_STRING))
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--disable-dev-shm-usage");
        if !headless {
            builder = builder.with_head();
        }
        if let Some(path) = chrome_executable {
            builder = builder.chrome_executable(path);
        }
        let config = builder.build().map_err(anyhow::Error::msg)?;

        info!("正在启动浏览器 (headless={})", headless);
        let (browser, mut handler) = Browser::launch(config)
            .await
            .context("启动浏览器失败")?;

        let handler_task = tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if h.is_err() {
                    break;
                }
            }
        });

        Ok(Self {
            browser,
            handler_task,
            owned: true,
            tabs: Vec::new(),
        })
    }

    /// 连接到已开启远程调试端口的浏览器
    pub async fn connect(port: u16) -> Result<Self> {
        let browser_url = format!("http://localhost:{}", port);
        info!("正在连接到浏览器: {}", browser_url);

        let (browser, mut handler) = Browser::connect(&browser_url)
            .await
            .with_context(|| format!("无法连接到端口 {} 的浏览器", port))?;

        let handler_task = tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if h.is_err() {
                    break;
                }
            }
        });

        // 等待浏览器状态同步
        sleep(Duration::from_millis(500)).await;
        info!("✓ 成功连接到端口 {} 的现有浏览器", port);

        Ok(Self {
            browser,
            handler_task,
            owned: false,
            tabs: Vec::new(),
        })
    }

    /// 新开一个空白标签页
    pub async fn open_tab(&mut self) -> Result<Page> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .context("新建标签页失败")?;
        page.evaluate_on_new_document(HIDE_WEBDRIVER_JS).await?;
        self.tabs.push(page.clone());
        Ok(page)
    }

    /// 关闭会话：无论之前成功与否都会调用
    pub async fn close(mut self) {
        for tab in self.tabs.drain(..) {
            if let Err(e) = tab.close().await {
                debug!("关闭标签页失败: {}", e);
            }
        }

        if self.owned {
            if let Err(e) = self.browser.close().await {
                warn!("关闭浏览器失败: {}", e);
            } else if let Err(e) = self.browser.wait().await {
                debug!("等待浏览器进程退出失败: {}", e);
            }
        }
        self.handler_task.abort();
        info!("浏览器会话已关闭");
    }
}

/// 轮询等待元素出现，超过 `timeout` 返回错误
pub async fn wait_for_element(page: &Page, selector: &str, timeout: Duration) -> Result<Element> {
    let deadline = Instant::now() + timeout;
    loop {
        match page.find_element(selector).await {
            Ok(element) => return Ok(element),
            Err(e) => {
                if Instant::now() >= deadline {
                    return Err(anyhow!(
                        "等待元素 '{}' 超时 ({} 秒): {}",
                        selector,
                        timeout.as_secs(),
                        e
                    ));
                }
            }
        }
        sleep(POLL_INTERVAL).await;
    }
}

/// 等待元素出现并点击；元素还不能点击时继续轮询直到超时
pub async fn click_when_ready(page: &Page, selector: &str, timeout: Duration) -> Result<()> {
    let deadline = Instant::now() + timeout;
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        let element = wait_for_element(page, selector, remaining).await?;
        match element.click().await {
            Ok(_) => {
                debug!("已点击: {}", selector);
                return Ok(());
            }
            Err(e) => {
                if Instant::now() >= deadline {
                    return Err(anyhow!("点击元素 '{}' 失败: {}", selector, e));
                }
                debug!("元素 '{}' 暂不可点击: {}", selector, e);
            }
        }
        sleep(POLL_INTERVAL).await;
    }
}
