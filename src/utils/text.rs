use once_cell::sync::Lazy;
use regex::Regex;
use scraper::ElementRef;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("空白正则无效"));

/// 取元素的文本：每个文本节点去掉首尾空白后直接拼接
pub fn stripped_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<String>()
}

/// 把连续空白压缩成一个空格，用于日志输出
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text.trim(), " ").into_owned()
}

/// 拼接基础 URL 和相对路径，避免出现双斜杠
pub fn join_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    #[test]
    fn test_stripped_text_joins_trimmed_nodes() {
        let doc = Html::parse_fragment("<table><tr><td>  Jane <b> Doe </b>\n</td></tr></table>");
        let sel = Selector::parse("td").unwrap();
        let td = doc.select(&sel).next().unwrap();
        assert_eq!(stripped_text(&td), "JaneDoe");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \n\t b  c "), "a b c");
    }

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("https://cybertesis.unmsm.edu.pe/", "/items/abc"),
            "https://cybertesis.unmsm.edu.pe/items/abc"
        );
        assert_eq!(
            join_url("https://cybertesis.unmsm.edu.pe", "items/abc"),
            "https://cybertesis.unmsm.edu.pe/items/abc"
        );
        assert_eq!(join_url("https://x.org", "https://y.org/a"), "https://y.org/a");
    }
}
