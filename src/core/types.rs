use std::fmt;

pub const NO_ID: &str = "NoID";
pub const ENTRY_TYPE: &str = "thesis";

/// 单条论文的书目元数据，构造完成后所有字段都有值（缺失时为占位文本）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThesisRecord {
    pub key: String,
    pub author: String,
    pub advisor: String,
    pub year: String,
    pub title: String,
    pub thesis_type: String,
    pub institution: String,
    pub subject: String,
    pub degree_name: String,
}

impl ThesisRecord {
    /// 按写入 .bib 文件的顺序返回 (字段名, 值)
    pub fn fields(&self) -> [(&'static str, &str); 8] {
        [
            ("author", self.author.as_str()),
            ("advisor", self.advisor.as_str()),
            ("year", self.year.as_str()),
            ("title", self.title.as_str()),
            ("type", self.thesis_type.as_str()),
            ("institution", self.institution.as_str()),
            ("subject", self.subject.as_str()),
            ("degree_name", self.degree_name.as_str()),
        ]
    }
}

/// 引用键：作者第一个词 + 年份；任一缺失时为 `NoID`
pub fn citation_key(author: Option<&str>, year: Option<&str>) -> String {
    let first_token = author.and_then(|a| a.split_whitespace().next());
    match (first_token, year.filter(|y| !y.is_empty())) {
        (Some(first), Some(year)) => format!("{}{}", first, year),
        _ => NO_ID.to_string(),
    }
}

/// 目录页上的一个条目链接（相对路径）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryLink {
    pub href: String,
}

impl fmt::Display for EntryLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.href)
    }
}

/// 分页循环结束的原因
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    PageLimit,
    NoEntries { page: u32 },
    NavigationFailed { page: u32, message: String },
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::PageLimit => write!(f, "已达到页数上限"),
            StopReason::NoEntries { page } => write!(f, "第 {} 页没有找到论文链接", page),
            StopReason::NavigationFailed { page, message } => {
                write!(f, "第 {} 页之后导航失败: {}", page, message)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    Saved,
    Failed,
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarvestStats {
    pub pages: u32,
    pub saved: usize,
    pub failed: usize,
}

impl HarvestStats {
    pub fn add_result(&mut self, result: &EntryOutcome) {
        match result {
            EntryOutcome::Saved => self.saved += 1,
            EntryOutcome::Failed => self.failed += 1,
        }
    }
}
