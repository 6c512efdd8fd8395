// ==========================================
// 采购订单库存差异报表 - 字段映射器实现
// ==========================================
// 职责: 必需列校验 + 原始行 → InventoryRecord 类型转换
// 入口边界: 缺列 / 非数值统一在此报错，不向下游传播
// ==========================================

use crate::domain::{columns, CellValue, InventoryRecord, RawRow};
use crate::importer::error::{ReportError, ReportResult};
use crate::importer::report_importer_trait::FieldMapper as FieldMapperTrait;

pub struct FieldMapper;

impl FieldMapperTrait for FieldMapper {
    fn validate_headers(&self, headers: &[String]) -> ReportResult<()> {
        let missing: Vec<String> = columns::REQUIRED
            .iter()
            .filter(|required| !headers.iter().any(|h| h == *required))
            .map(|required| required.to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ReportError::MissingColumns { columns: missing })
        }
    }

    fn map_to_inventory_record(&self, row: &RawRow) -> ReportResult<InventoryRecord> {
        Ok(InventoryRecord {
            row_number: row.row_number,

            // 标识字段
            po_no: self.get_optional_string(row, columns::PO_NO),
            item_code: self.get_string(row, columns::ITEM_CODE),
            item_name: self.get_string(row, columns::ITEM_NAME),
            mat_color_code: self.get_string(row, columns::MAT_COLOR_CODE),

            // 日期保留原始值，清洗阶段解析
            pcd_date: row.get(columns::PCD_DATE).clone(),

            // 库存数值（必填）
            bal_to_issue: self.parse_f64(row, columns::BAL_TO_ISSUE)?,
            total_current_stock: self.parse_f64(row, columns::TOTAL_CURRENT_STOCK)?,
        })
    }
}

impl FieldMapper {
    /// 提取字符串字段（空值 → None）
    fn get_optional_string(&self, row: &RawRow, key: &str) -> Option<String> {
        match row.get(key) {
            CellValue::Empty => None,
            other => Some(other.to_string()),
        }
    }

    /// 提取字符串字段（空值 → ""）
    fn get_string(&self, row: &RawRow, key: &str) -> String {
        self.get_optional_string(row, key).unwrap_or_default()
    }

    /// 解析浮点数（数值单元格或数值文本；NaN/∞ 视为非法）
    fn parse_f64(&self, row: &RawRow, key: &str) -> ReportResult<f64> {
        let cell = row.get(key);
        let parsed = match cell {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => s.trim().parse::<f64>().ok(),
            CellValue::Empty | CellValue::Bool(_) | CellValue::DateTime(_) => None,
        };

        match parsed {
            Some(value) if value.is_finite() => Ok(value),
            _ => Err(ReportError::TypeMismatch {
                row: row.row_number,
                field: key.to_string(),
                value: match cell {
                    CellValue::Empty => "<empty>".to_string(),
                    other => other.to_string(),
                },
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn full_row() -> RawRow {
        let mut cells = HashMap::new();
        cells.insert("PO_NO".to_string(), CellValue::Text("PO-123".to_string()));
        cells.insert("Item Code".to_string(), CellValue::Number(12345.0));
        cells.insert("Item Name".to_string(), CellValue::Text("Thread 40/2".to_string()));
        cells.insert("MAT_Color_Code".to_string(), CellValue::Text("C-001".to_string()));
        cells.insert("PCD Date".to_string(), CellValue::Text("2023-01-15".to_string()));
        cells.insert("BAL_TO_ISSUE".to_string(), CellValue::Text("15".to_string()));
        cells.insert("Total Current Stock".to_string(), CellValue::Number(10.0));
        RawRow {
            row_number: 3,
            cells,
        }
    }

    fn all_headers() -> Vec<String> {
        columns::REQUIRED.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_validate_headers_ok() {
        let mut headers = all_headers();
        headers.push("Extra Column".to_string());
        assert!(FieldMapper.validate_headers(&headers).is_ok());
    }

    #[test]
    fn test_validate_headers_reports_every_missing_column() {
        let headers: Vec<String> = all_headers()
            .into_iter()
            .filter(|h| h != "PCD Date" && h != "BAL_TO_ISSUE")
            .collect();

        match FieldMapper.validate_headers(&headers) {
            Err(ReportError::MissingColumns { columns }) => {
                assert_eq!(columns, vec!["PCD Date", "BAL_TO_ISSUE"]);
            }
            other => panic!("Expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_field_mapper_basic() {
        let record = FieldMapper.map_to_inventory_record(&full_row()).unwrap();

        assert_eq!(record.row_number, 3);
        assert_eq!(record.po_no, Some("PO-123".to_string()));
        assert_eq!(record.item_code, "12345");
        assert_eq!(record.item_name, "Thread 40/2");
        assert_eq!(record.bal_to_issue, 15.0);
        assert_eq!(record.total_current_stock, 10.0);
        assert_eq!(record.pcd_date, CellValue::Text("2023-01-15".to_string()));
    }

    #[test]
    fn test_field_mapper_empty_po_as_none() {
        let mut row = full_row();
        row.cells.insert("PO_NO".to_string(), CellValue::Empty);

        let record = FieldMapper.map_to_inventory_record(&row).unwrap();
        assert_eq!(record.po_no, None);
    }

    #[test]
    fn test_field_mapper_invalid_number() {
        let mut row = full_row();
        row.cells
            .insert("BAL_TO_ISSUE".to_string(), CellValue::Text("n/a".to_string()));

        match FieldMapper.map_to_inventory_record(&row) {
            Err(ReportError::TypeMismatch { row, field, value }) => {
                assert_eq!(row, 3);
                assert_eq!(field, "BAL_TO_ISSUE");
                assert_eq!(value, "n/a");
            }
            other => panic!("Expected TypeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_field_mapper_missing_stock_is_error() {
        let mut row = full_row();
        row.cells.remove("Total Current Stock");

        let result = FieldMapper.map_to_inventory_record(&row);
        assert!(matches!(
            result,
            Err(ReportError::TypeMismatch { ref value, .. }) if value == "<empty>"
        ));
    }

    #[test]
    fn test_field_mapper_rejects_nan_text() {
        let mut row = full_row();
        row.cells
            .insert("Total Current Stock".to_string(), CellValue::Text("NaN".to_string()));

        assert!(FieldMapper.map_to_inventory_record(&row).is_err());
    }
}
