// ==========================================
// 采购订单库存差异报表 - 导入层
// ==========================================
// 职责: 上传文件 → 清洗后的强类型记录
// 支持: Excel, CSV
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod po_normalizer;
pub mod report_importer;
pub mod report_importer_trait;

// 重导出核心类型
pub use data_cleaner::DataCleaner as DataCleanerImpl;
pub use error::{ErrorKind, ReportError, ReportResult};
pub use field_mapper::FieldMapper as FieldMapperImpl;
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use po_normalizer::{is_category_prefix, PoNormalizer, DEFAULT_EXCLUSION_PREFIX};
pub use report_importer::ReportImporter;

// 重导出 Trait 接口
pub use report_importer_trait::{DataCleaner, FieldMapper, FileParser};
