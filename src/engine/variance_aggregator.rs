// ==========================================
// 采购订单库存差异报表 - 差异汇总引擎
// ==========================================
// 职责: 计算差异 → 保留负差异 → 分组求和 → 组内最早 PCD 日期
// 输入: 清洗后记录（输入顺序）
// 输出: 每个 (PO_NO, Item Code, Item Name, MAT_Color_Code) 一行
// ==========================================

use crate::domain::{
    AggregationSummary, CleanedRecord, PcdDate, VarianceRecord, VarianceReport, VarianceReportRow,
};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// 分组键（按字典序输出）
type GroupKey<'a> = (&'a str, &'a str, &'a str, &'a str);

/// 组内累加状态
struct GroupAccumulator {
    variance_sum: f64,
    earliest: PcdDate,
}

// ==========================================
// VarianceAggregator - 差异汇总引擎
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct VarianceAggregator {
    // 无状态引擎，不需要注入依赖
}

impl VarianceAggregator {
    pub fn new() -> Self {
        Self {}
    }

    /// 汇总负差异
    ///
    /// 规则:
    /// 1) variance = Total Current Stock - BAL_TO_ISSUE
    /// 2) 仅 variance < 0 的记录参与
    /// 3) 组内 variance 求和
    /// 4) 组内取最早 PCD 日期（空值排最后；同日取输入顺序靠前者）
    ///
    /// # 返回
    /// 按分组键升序排列的报表行 + 汇总统计
    #[instrument(skip(self, records), fields(records_in = records.len()))]
    pub fn aggregate(&self, records: &[CleanedRecord]) -> VarianceReport {
        let mut groups: BTreeMap<GroupKey<'_>, GroupAccumulator> = BTreeMap::new();
        let mut summary = AggregationSummary {
            records_in: records.len(),
            ..Default::default()
        };

        for variance_record in records.iter().map(VarianceRecord::from) {
            if !variance_record.is_shortfall() {
                continue;
            }
            summary.shortfall_records += 1;

            let record = variance_record.record;
            let key = (
                record.po_no.as_str(),
                record.item_code.as_str(),
                record.item_name.as_str(),
                record.mat_color_code.as_str(),
            );

            groups
                .entry(key)
                .and_modify(|acc| {
                    acc.variance_sum += variance_record.variance;
                    // 严格小于才替换，保证同日时保留先出现者
                    if record.pcd_date < acc.earliest {
                        acc.earliest = record.pcd_date;
                    }
                })
                .or_insert(GroupAccumulator {
                    variance_sum: variance_record.variance,
                    earliest: record.pcd_date,
                });
        }

        let rows: Vec<VarianceReportRow> = groups
            .into_iter()
            .map(
                |((po_no, item_code, item_name, mat_color_code), acc)| VarianceReportRow {
                    po_no: po_no.to_string(),
                    item_code: item_code.to_string(),
                    item_name: item_name.to_string(),
                    mat_color_code: mat_color_code.to_string(),
                    variance: acc.variance_sum,
                    pcd_date: acc.earliest,
                },
            )
            .collect();

        summary.groups_out = rows.len();
        summary.null_dates = rows.iter().filter(|r| r.pcd_date.is_null()).count();

        debug!(
            shortfall_records = summary.shortfall_records,
            groups_out = summary.groups_out,
            "差异汇总完成"
        );

        VarianceReport { rows, summary }
    }
}
