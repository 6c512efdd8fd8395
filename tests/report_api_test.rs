// ==========================================
// ReportApi 集成测试
// ==========================================
// 测试目标: 真实 xlsx / csv 文件 → 差异报表 → Excel 导出
// ==========================================

mod test_helpers;

use calamine::{Data, Reader, Xlsx};
use po_variance_report::importer::{ErrorKind, ReportError};
use po_variance_report::{logging, ReportApi};
use std::io::Cursor;
use test_helpers::{build_csv, build_xlsx, sample_rows, write_temp_file, PcdCell, StockRow};

#[test]
fn test_xlsx_report_matches_csv_report() {
    logging::init_test();

    let xlsx = write_temp_file(".xlsx", &build_xlsx(&sample_rows()));
    let csv = write_temp_file(".csv", build_csv(&sample_rows()).as_bytes());
    let api = ReportApi::default();

    let from_xlsx = api.generate_report(xlsx.path()).unwrap();
    let from_csv = api.generate_report(csv.path()).unwrap();

    assert_eq!(from_xlsx.rows, from_csv.rows);
    assert_eq!(from_xlsx.summary, from_csv.summary);
}

#[test]
fn test_xlsx_report_rows() {
    logging::init_test();

    let file = write_temp_file(".xlsx", &build_xlsx(&sample_rows()));
    let report = ReportApi::default().generate_report(file.path()).unwrap();

    // 空串订单号排在最前
    assert_eq!(report.rows.len(), 2);

    let excluded = &report.rows[0];
    assert_eq!(excluded.po_no, "");
    assert_eq!(excluded.variance, -3.0);
    assert!(excluded.pcd_date.is_null());

    let widget = &report.rows[1];
    assert_eq!(widget.po_no, "123");
    assert_eq!(widget.item_code, "A01");
    assert_eq!(widget.variance, -8.0);
    assert_eq!(widget.pcd_date.display().as_deref(), Some("2023-Jan-15"));

    assert_eq!(report.summary.records_in, 4);
    assert_eq!(report.summary.shortfall_records, 3);
    assert_eq!(report.summary.groups_out, 2);
    assert_eq!(report.summary.null_dates, 1);
}

#[test]
fn test_all_positive_variance_gives_empty_report() {
    let rows = vec![
        StockRow::new("PO-1", PcdCell::Date(2023, 3, 1), 1.0, 5.0),
        StockRow::new("PO-2", PcdCell::Empty, 4.0, 4.0),
    ];
    let file = write_temp_file(".xlsx", &build_xlsx(&rows));

    let report = ReportApi::default().generate_report(file.path()).unwrap();
    assert!(report.rows.is_empty());
    assert_eq!(report.summary.records_in, 2);
}

#[test]
fn test_non_spreadsheet_upload_is_parse_error() {
    let file = write_temp_file(".xlsx", b"this is not a zip container");

    let err = ReportApi::default().generate_report(file.path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ParseError);
}

#[test]
fn test_missing_numeric_value_is_type_mismatch() {
    let file = write_temp_file(
        ".csv",
        b"PO_NO,Item Code,Item Name,MAT_Color_Code,PCD Date,BAL_TO_ISSUE,Total Current Stock\n\
          PO-1,A01,Widget,RED,2023-01-01,ten,4\n",
    );

    match ReportApi::default().generate_report(file.path()) {
        Err(ReportError::TypeMismatch { row, field, .. }) => {
            assert_eq!(row, 1);
            assert_eq!(field, "BAL_TO_ISSUE");
        }
        other => panic!("Expected TypeMismatch, got {:?}", other.map(|r| r.rows.len())),
    }
}

#[test]
fn test_report_rows_export_round_trip() {
    let file = write_temp_file(".xlsx", &build_xlsx(&sample_rows()));
    let api = ReportApi::default();
    let report = api.generate_report(file.path()).unwrap();

    let value = serde_json::to_value(&report.rows).unwrap();
    let bytes = api.export_rows(&value).unwrap();

    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).unwrap();
    let range = workbook.worksheet_range("Sheet1").unwrap();
    let mut rows = range.rows();

    let headers: Vec<String> = rows.next().unwrap().iter().map(|c| c.to_string()).collect();
    assert_eq!(
        headers,
        vec!["PO_NO", "Item Code", "Item Name", "MAT_Color_Code", "Variance", "PCD Date"]
    );

    let body: Vec<Vec<Data>> = rows.map(|r| r.to_vec()).collect();
    assert_eq!(body.len(), 2);
    assert_eq!(body[1][0], Data::String("123".to_string()));
    assert_eq!(body[1][4], Data::Float(-8.0));
    assert_eq!(body[1][5], Data::String("2023-Jan-15".to_string()));
    // 空日期导出为空单元格
    assert_eq!(body[0][5], Data::Empty);
}
