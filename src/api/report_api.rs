// ==========================================
// 采购订单库存差异报表 - 报表API
// ==========================================
// 职责: 封装 导入 → 汇总 / JSON → Excel 两条业务流程
// 调用方: HTTP 路由（spawn_blocking 内）、命令行
// ==========================================

use crate::domain::VarianceReport;
use crate::engine::VarianceAggregator;
use crate::exporter::XlsxExporter;
use crate::importer::{PoNormalizer, ReportImporter, ReportResult};
use serde_json::Value;
use std::path::Path;
use tracing::{info, instrument};

pub struct ReportApi {
    importer: ReportImporter,
    aggregator: VarianceAggregator,
    exporter: XlsxExporter,
}

impl ReportApi {
    /// 创建新的ReportApi实例
    ///
    /// # 参数
    /// - po_normalizer: 采购订单号规范化规则（含排除前缀）
    pub fn new(po_normalizer: PoNormalizer) -> Self {
        Self {
            importer: ReportImporter::with_normalizer(po_normalizer),
            aggregator: VarianceAggregator::new(),
            exporter: XlsxExporter::default(),
        }
    }

    /// 使用自定义组件创建（测试注入）
    pub fn with_components(
        importer: ReportImporter,
        aggregator: VarianceAggregator,
        exporter: XlsxExporter,
    ) -> Self {
        Self {
            importer,
            aggregator,
            exporter,
        }
    }

    /// 生成差异报表
    ///
    /// # 参数
    /// - file_path: 已落盘的上传文件（扩展名决定解析方式）
    ///
    /// # 返回
    /// - Ok(VarianceReport): 汇总行 + 统计
    /// - Err(ReportError): 任一阶段失败，不返回部分结果
    #[instrument(skip(self), fields(file = %file_path.display()))]
    pub fn generate_report(&self, file_path: &Path) -> ReportResult<VarianceReport> {
        let records = self.importer.import(file_path)?;
        let report = self.aggregator.aggregate(&records);

        info!(
            records_in = report.summary.records_in,
            shortfall_records = report.summary.shortfall_records,
            groups_out = report.summary.groups_out,
            null_dates = report.summary.null_dates,
            "差异报表生成完成"
        );
        Ok(report)
    }

    /// 将 JSON 行数组导出为 xlsx 字节
    #[instrument(skip(self, rows))]
    pub fn export_rows(&self, rows: &Value) -> ReportResult<Vec<u8>> {
        self.exporter.export_json(rows)
    }
}

impl Default for ReportApi {
    fn default() -> Self {
        Self::new(PoNormalizer::default())
    }
}
