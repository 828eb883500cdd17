use anyhow::{Result, anyhow};
use scraper::{Html, Selector};
use tracing::debug;

use crate::core::{ThesisField, ThesisRecord, citation_key};
use crate::utils::text::stripped_text;

/// 从详情页（/full）的 HTML 中取出所有 (标签, 值) 行
///
/// 只保留至少有两个 `td` 的行，取前两个单元格。
pub fn parse_metadata_rows(html: &str) -> Result<Vec<(String, String)>> {
    let document = Html::parse_document(html);
    let row_selector = Selector::parse("tr").map_err(|e| anyhow!("选择器解析失败: {}", e))?;
    let cell_selector = Selector::parse("td").map_err(|e| anyhow!("选择器解析失败: {}", e))?;

    let rows = document
        .select(&row_selector)
        .filter_map(|row| {
            let cells: Vec<_> = row.select(&cell_selector).collect();
            if cells.len() > 1 {
                Some((stripped_text(&cells[0]), stripped_text(&cells[1])))
            } else {
                None
            }
        })
        .collect::<Vec<_>>();

    debug!("解析到 {} 行元数据", rows.len());
    Ok(rows)
}

#[derive(Debug, Default)]
struct RecordBuilder {
    author: Option<String>,
    advisor: Option<String>,
    year: Option<String>,
    title: Option<String>,
    thesis_type: Option<String>,
    institution: Option<String>,
    degree_name: Option<String>,
    subjects: Vec<String>,
}

impl RecordBuilder {
    fn set(&mut self, field: ThesisField, value: String) {
        let slot = match field {
            ThesisField::Subject => {
                self.subjects.push(value);
                return;
            }
            ThesisField::Author => &mut self.author,
            ThesisField::Advisor => &mut self.advisor,
            ThesisField::Year => &mut self.year,
            ThesisField::Title => &mut self.title,
            ThesisField::Type => &mut self.thesis_type,
            ThesisField::Institution => &mut self.institution,
            ThesisField::DegreeName => &mut self.degree_name,
        };
        *slot = Some(value);
    }

    fn build(self) -> ThesisRecord {
        let or_placeholder = |value: Option<String>, field: ThesisField| -> String {
            value
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| field.placeholder().to_string())
        };

        let key = citation_key(self.author.as_deref(), self.year.as_deref());
        let subject = self.subjects.join(", ");

        ThesisRecord {
            key,
            author: or_placeholder(self.author, ThesisField::Author),
            advisor: or_placeholder(self.advisor, ThesisField::Advisor),
            year: or_placeholder(self.year, ThesisField::Year),
            title: or_placeholder(self.title, ThesisField::Title),
            thesis_type: or_placeholder(self.thesis_type, ThesisField::Type),
            institution: or_placeholder(self.institution, ThesisField::Institution),
            subject: or_placeholder(Some(subject), ThesisField::Subject),
            degree_name: or_placeholder(self.degree_name, ThesisField::DegreeName),
        }
    }
}

/// 按标签表把元数据行映射成一条记录，未知标签忽略，缺失字段用占位文本
pub fn record_from_rows<I, L, V>(rows: I) -> ThesisRecord
where
    I: IntoIterator<Item = (L, V)>,
    L: AsRef<str>,
    V: Into<String>,
{
    let mut builder = RecordBuilder::default();
    for (label, value) in rows {
        match ThesisField::from_label(label.as_ref()) {
            Some(field) => builder.set(field, value.into()),
            None => debug!("忽略未知标签: {}", label.as_ref()),
        }
    }
    builder.build()
}

/// 解析详情页并生成记录
pub fn extract_record(html: &str) -> Result<ThesisRecord> {
    let rows = parse_metadata_rows(html)?;
    Ok(record_from_rows(rows))
}
