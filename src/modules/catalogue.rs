use anyhow::{Result, anyhow};
use scraper::{Html, Selector};
use tracing::debug;

use crate::core::EntryLink;

/// 从目录页 HTML 中按文档顺序取出论文链接
pub fn extract_entry_links(html: &str, link_selector: &str) -> Result<Vec<EntryLink>> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(link_selector)
        .map_err(|e| anyhow!("论文链接选择器解析失败 '{}': {}", link_selector, e))?;

    let links: Vec<EntryLink> = document
        .select(&selector)
        .filter_map(|el| el.value().attr("href"))
        .map(|href| EntryLink {
            href: href.to_string(),
        })
        .collect();

    debug!("目录页中找到 {} 个论文链接", links.len());
    Ok(links)
}

/// 详情页地址：基础 URL + 条目路径 + 后缀（默认 `/full`）
pub fn detail_url(base_url: &str, link: &EntryLink, suffix: &str) -> String {
    format!("{}{}", crate::utils::join_url(base_url, &link.href), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SELECTOR: &str =
        "a.MuiTypography-root.MuiTypography-h5.MuiLink-root.MuiLink-underlineNone.css-mr5w6s";

    fn listing(links: &[&str]) -> String {
        let items: String = links
            .iter()
            .map(|href| {
                format!(
                    "<div class=\"MuiCard-root\"><a class=\"MuiTypography-root MuiTypography-h5 \
                     MuiLink-root MuiLink-underlineNone css-mr5w6s\" href=\"{}\">Tesis</a>\
                     <a class=\"MuiLink-root\" href=\"/author/x\">autor</a></div>",
                    href
                )
            })
            .collect();
        format!("<html><body>{}</body></html>", items)
    }

    #[test]
    fn test_links_in_document_order() {
        let html = listing(&["/items/a1", "/items/b2", "/items/c3"]);
        let links = extract_entry_links(&html, SELECTOR).unwrap();
        let hrefs: Vec<_> = links.iter().map(|l| l.href.as_str()).collect();
        assert_eq!(hrefs, vec!["/items/a1", "/items/b2", "/items/c3"]);
    }

    #[test]
    fn test_empty_listing() {
        let links = extract_entry_links(&listing(&[]), SELECTOR).unwrap();
        assert!(links.is_empty());
    }

    #[test]
    fn test_anchor_without_href_skipped() {
        let html = "<a class=\"MuiTypography-root MuiTypography-h5 MuiLink-root \
                    MuiLink-underlineNone css-mr5w6s\">sin enlace</a>";
        assert!(extract_entry_links(html, SELECTOR).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_selector_is_error() {
        assert!(extract_entry_links("<html></html>", "a[").is_err());
    }

    #[test]
    fn test_detail_url() {
        let link = EntryLink {
            href: "/items/5f1c".to_string(),
        };
        assert_eq!(
            detail_url("https://cybertesis.unmsm.edu.pe", &link, "/full"),
            "https://cybertesis.unmsm.edu.pe/items/5f1c/full"
        );
    }
}
