// ==========================================
// 采购订单库存差异报表 - 数据清洗器实现
// ==========================================
// 职责: 采购订单号规范化 / PCD 日期解析（失败降级为空值，不报错）
// ==========================================

use crate::domain::{CellValue, PcdDate};
use crate::importer::file_parser::excel_serial_to_datetime;
use crate::importer::po_normalizer::PoNormalizer;
use crate::importer::report_importer_trait::DataCleaner as DataCleanerTrait;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

// 纯日期格式（按顺序尝试，首个成功即采用）
const DATE_FORMATS: [&str; 10] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y%m%d",
    "%Y.%m.%d",
    "%m/%d/%Y",
    "%d-%b-%Y",
    "%Y-%b-%d",
    "%d %b %Y",
    "%b %d, %Y",
    "%d-%m-%Y",
];

// 日期 + 时间的后缀
const TIME_SUFFIXES: [&str; 4] = [" %H:%M:%S%.f", "T%H:%M:%S%.f", " %H:%M", "T%H:%M"];

#[derive(Debug, Clone, Default)]
pub struct DataCleaner {
    po_normalizer: PoNormalizer,
}

impl DataCleaner {
    pub fn new(po_normalizer: PoNormalizer) -> Self {
        Self { po_normalizer }
    }
}

impl DataCleanerTrait for DataCleaner {
    fn normalize_po_no(&self, value: Option<&str>) -> String {
        self.po_normalizer.normalize(value)
    }

    fn normalize_date(&self, value: &CellValue) -> PcdDate {
        let date = match value {
            CellValue::DateTime(dt) => Some(dt.date()),
            CellValue::Number(serial) => excel_serial_to_datetime(*serial).map(|dt| dt.date()),
            CellValue::Text(s) => parse_date_text(s),
            CellValue::Empty | CellValue::Bool(_) => None,
        };
        PcdDate::from(date)
    }
}

/// 解析日期文本（无法识别返回 None）
pub fn parse_date_text(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date);
        }
        for suffix in TIME_SUFFIXES {
            let full = format!("{}{}", format, suffix);
            if let Ok(dt) = NaiveDateTime::parse_from_str(value, &full) {
                return Some(dt.date());
            }
        }
    }

    None
}
