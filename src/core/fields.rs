use phf::phf_map;

/// 元数据表中可识别的字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThesisField {
    Author,
    Advisor,
    Year,
    Title,
    Type,
    Subject,
    Institution,
    DegreeName,
}

/// DSpace 元数据标签 -> 字段
pub static FIELD_LABELS: phf::Map<&'static str, ThesisField> = phf_map! {
    "dc.contributor.author" => ThesisField::Author,
    "dc.contributor.advisor" => ThesisField::Advisor,
    "dc.date.issued" => ThesisField::Year,
    "dc.title" => ThesisField::Title,
    "dc.type" => ThesisField::Type,
    "dc.subject" => ThesisField::Subject,
    "dc.publisher" => ThesisField::Institution,
    "thesis.degree.name" => ThesisField::DegreeName,
};

impl ThesisField {
    pub fn from_label(label: &str) -> Option<Self> {
        FIELD_LABELS.get(label).copied()
    }

    /// 页面缺少该字段时写入的占位文本
    pub fn placeholder(self) -> &'static str {
        match self {
            ThesisField::Author => "No Author",
            ThesisField::Advisor => "No Advisor",
            ThesisField::Year => "No Year",
            ThesisField::Title => "No Title",
            ThesisField::Type => "No Type",
            ThesisField::Subject => "No Subject",
            ThesisField::Institution => "No Institution",
            ThesisField::DegreeName => "No Degree Name",
        }
    }
}
