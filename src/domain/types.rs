// ==========================================
// 采购订单库存差异报表 - 领域类型定义
// ==========================================
// 职责: 单元格取值 / PCD 日期（含空值哨兵与排序规则）
// ==========================================

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// PCD 日期的展示格式（4 位年-英文月缩写-2 位日）
pub const PCD_DATE_DISPLAY_FORMAT: &str = "%Y-%b-%d";

// ==========================================
// 单元格取值 (Cell Value)
// ==========================================
// CSV 只产生 Text / Empty；Excel 保留原生类型
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// 由原始文本构造（TRIM 后为空视为 Empty）
    pub fn from_text(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(trimmed.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => write!(f, "{}", s),
            // 整数值不输出 ".0"（如物料编码 12345）
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

// ==========================================
// PCD 日期 (Planned Cut Date)
// ==========================================
// None 为空值哨兵：无法解析的日期不报错，记录仍参与过滤/分组
// 排序规则: 有效日期按时间先后，空值排在所有有效日期之后
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PcdDate(Option<NaiveDate>);

impl PcdDate {
    pub const NULL: PcdDate = PcdDate(None);

    pub fn new(date: NaiveDate) -> Self {
        PcdDate(Some(date))
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.0
    }

    pub fn is_null(&self) -> bool {
        self.0.is_none()
    }

    /// 规范展示字符串（如 2023-Jan-15），空值返回 None
    pub fn display(&self) -> Option<String> {
        self.0
            .map(|d| d.format(PCD_DATE_DISPLAY_FORMAT).to_string())
    }
}

impl From<Option<NaiveDate>> for PcdDate {
    fn from(value: Option<NaiveDate>) -> Self {
        PcdDate(value)
    }
}

impl Ord for PcdDate {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.0, other.0) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

impl PartialOrd for PcdDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PcdDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.display() {
            Some(s) => write!(f, "{}", s),
            None => write!(f, "NULL"),
        }
    }
}

// 序列化为 "2023-Jan-15" 或 null
impl Serialize for PcdDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.display() {
            Some(s) => serializer.serialize_some(&s),
            None => serializer.serialize_none(),
        }
    }
}
