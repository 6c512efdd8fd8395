// ==========================================
// 采购订单库存差异报表 - 导入管道 Trait
// ==========================================
// 职责: 定义导入各阶段接口（不包含实现）
// 流程: 文件解析 → 列校验/字段映射 → 清洗
// ==========================================

use crate::domain::{CellValue, CleanedRecord, InventoryRecord, PcdDate, RawRow, RawSheet};
use crate::importer::error::ReportResult;
use std::path::Path;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 0）
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始表格（表头 + 行记录）
    ///
    /// # 参数
    /// - file_path: 文件路径
    ///
    /// # 返回
    /// - Ok(RawSheet): 表头与非空行
    /// - Err: 文件读取错误、格式错误、空表
    fn parse_sheet(&self, file_path: &Path) -> ReportResult<RawSheet>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 入口边界校验 + 强类型映射（阶段 1）
// 实现者: FieldMapperImpl
pub trait FieldMapper: Send + Sync {
    /// 校验表头是否包含全部必需列
    ///
    /// # 返回
    /// - Err(MissingColumns): 一次性列出所有缺失列
    fn validate_headers(&self, headers: &[String]) -> ReportResult<()>;

    /// 将原始行映射为 InventoryRecord
    ///
    /// # 返回
    /// - Err(TypeMismatch): 库存数值字段缺失或非数值
    fn map_to_inventory_record(&self, row: &RawRow) -> ReportResult<InventoryRecord>;
}

// ==========================================
// DataCleaner Trait
// ==========================================
// 用途: 数据清洗接口（阶段 2），全部为纯函数，不报错
// 实现者: DataCleanerImpl
pub trait DataCleaner: Send + Sync {
    /// 规范化采购订单号
    fn normalize_po_no(&self, value: Option<&str>) -> String;

    /// 规范化 PCD 日期（无法解析 → 空值哨兵）
    fn normalize_date(&self, value: &CellValue) -> PcdDate;

    /// 清洗整条记录
    fn clean_record(&self, record: InventoryRecord) -> CleanedRecord {
        CleanedRecord {
            row_number: record.row_number,
            po_no: self.normalize_po_no(record.po_no.as_deref()),
            pcd_date: self.normalize_date(&record.pcd_date),
            item_code: record.item_code,
            item_name: record.item_name,
            mat_color_code: record.mat_color_code,
            bal_to_issue: record.bal_to_issue,
            total_current_stock: record.total_current_stock,
        }
    }
}
