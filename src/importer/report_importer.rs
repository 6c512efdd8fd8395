// ==========================================
// 采购订单库存差异报表 - 导入管道实现
// ==========================================
// 职责: 整合导入流程，从文件到清洗后记录
// 流程: 解析 → 列校验 → 映射 → 清洗
// 任一阶段失败即整体失败，不返回部分结果
// ==========================================

use crate::domain::CleanedRecord;
use crate::importer::data_cleaner::DataCleaner as DataCleanerImpl;
use crate::importer::error::ReportResult;
use crate::importer::field_mapper::FieldMapper as FieldMapperImpl;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::po_normalizer::PoNormalizer;
use crate::importer::report_importer_trait::{DataCleaner, FieldMapper, FileParser};
use std::path::Path;
use tracing::{debug, info, warn};

pub struct ReportImporter {
    file_parser: Box<dyn FileParser>,
    field_mapper: Box<dyn FieldMapper>,
    data_cleaner: Box<dyn DataCleaner>,
}

impl ReportImporter {
    /// 创建新的 ReportImporter 实例
    ///
    /// # 参数
    /// - file_parser: 文件解析器
    /// - field_mapper: 字段映射器
    /// - data_cleaner: 数据清洗器
    pub fn new(
        file_parser: Box<dyn FileParser>,
        field_mapper: Box<dyn FieldMapper>,
        data_cleaner: Box<dyn DataCleaner>,
    ) -> Self {
        Self {
            file_parser,
            field_mapper,
            data_cleaner,
        }
    }

    /// 使用默认组件（按扩展名解析 + 标准映射 + 指定排除前缀的清洗）
    pub fn with_normalizer(po_normalizer: PoNormalizer) -> Self {
        Self::new(
            Box::new(UniversalFileParser),
            Box::new(FieldMapperImpl),
            Box::new(DataCleanerImpl::new(po_normalizer)),
        )
    }

    /// 从文件导入并清洗记录
    ///
    /// # 返回
    /// - Ok(Vec<CleanedRecord>): 按输入顺序排列的清洗后记录
    /// - Err: 解析失败 / 空表 / 缺列 / 数值类型错误
    pub fn import(&self, file_path: &Path) -> ReportResult<Vec<CleanedRecord>> {
        // === 步骤 1: 解析文件 ===
        debug!("步骤 1: 解析文件");
        let sheet = self.file_parser.parse_sheet(file_path).map_err(|e| {
            warn!(error = %e, "文件解析失败");
            e
        })?;
        info!(
            total_rows = sheet.rows.len(),
            columns = sheet.headers.len(),
            "文件解析完成"
        );

        // === 步骤 2: 必需列校验 ===
        debug!("步骤 2: 必需列校验");
        self.field_mapper.validate_headers(&sheet.headers).map_err(|e| {
            warn!(error = %e, "必需列校验失败");
            e
        })?;

        // === 步骤 3: 字段映射 ===
        debug!("步骤 3: 字段映射");
        let records = sheet
            .rows
            .iter()
            .map(|row| self.field_mapper.map_to_inventory_record(row))
            .collect::<ReportResult<Vec<_>>>()
            .map_err(|e| {
                warn!(error = %e, "字段映射失败");
                e
            })?;

        // === 步骤 4: 数据清洗 ===
        debug!("步骤 4: 数据清洗");
        let cleaned: Vec<CleanedRecord> = records
            .into_iter()
            .map(|record| self.data_cleaner.clean_record(record))
            .collect();

        let null_dates = cleaned.iter().filter(|r| r.pcd_date.is_null()).count();
        if null_dates > 0 {
            debug!(null_dates, "部分 PCD 日期无法解析，按空值处理");
        }
        info!(records = cleaned.len(), "数据清洗完成");

        Ok(cleaned)
    }
}

impl Default for ReportImporter {
    fn default() -> Self {
        Self::with_normalizer(PoNormalizer::default())
    }
}
