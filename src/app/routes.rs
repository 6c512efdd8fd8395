// ==========================================
// 采购订单库存差异报表 - HTTP 路由
// ==========================================
// POST /upload  multipart 表单（字段 file）→ 差异汇总 JSON
// POST /export  JSON 行数组 → processed_output.xlsx 下载
// GET  /health  存活检查
// ==========================================
// 解析 / 汇总 / 写 Excel 均为 CPU 密集，放在 spawn_blocking 中执行

use axum::body::Bytes;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::{info, instrument, Span};
use uuid::Uuid;

use crate::api::{ApiError, ApiResult};
use crate::app::state::AppState;
use crate::app::upload::ScratchUpload;
use crate::domain::VarianceReportRow;
use crate::exporter::XLSX_CONTENT_TYPE;
use crate::importer::ReportResult;

/// 上传文件所在的表单字段
pub const UPLOAD_FIELD: &str = "file";

/// 构建路由
pub fn router(state: AppState) -> Router {
    let body_limit = state.max_upload_bytes;

    Router::new()
        .route("/upload", post(upload))
        .route("/export", post(export))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

// ==========================================
// POST /upload
// ==========================================
#[instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
async fn upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<Vec<VarianceReportRow>>> {
    // 非 multipart 请求等同于没有文件字段
    let mut multipart = multipart.map_err(|rejection| {
        tracing::debug!(%rejection, "请求不是 multipart 表单");
        ApiError::NoFilePart
    })?;

    let (filename, bytes) = loop {
        let Some(field) = multipart.next_field().await? else {
            return Err(ApiError::NoFilePart);
        };
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        // 无 filename 的同名字段是普通表单值，不算文件
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        if filename.is_empty() {
            return Err(ApiError::NoSelectedFile);
        }
        break (filename, field.bytes().await?);
    };
    info!(filename = %filename, bytes = bytes.len(), "收到上传文件");

    let report_api = state.report_api.clone();
    let upload_dir = state.upload_dir.clone();
    let span = Span::current();
    let rows = tokio::task::spawn_blocking(move || -> ReportResult<Vec<VarianceReportRow>> {
        let _entered = span.enter();
        // 守卫在闭包结束时析构，临时文件随之删除
        let scratch = ScratchUpload::write(&upload_dir, &filename, &bytes)?;
        let report = report_api.generate_report(scratch.path())?;
        Ok(report.rows)
    })
    .await??;

    info!(rows = rows.len(), "上传处理完成");
    Ok(Json(rows))
}

// ==========================================
// POST /export
// ==========================================
#[instrument(skip_all, fields(request_id = %Uuid::new_v4(), body_bytes = body.len()))]
async fn export(State(state): State<AppState>, body: Bytes) -> ApiResult<Response> {
    let report_api = state.report_api.clone();
    let span = Span::current();
    let buffer = tokio::task::spawn_blocking(move || -> ReportResult<Vec<u8>> {
        let _entered = span.enter();
        let rows: Value = serde_json::from_slice(&body)?;
        report_api.export_rows(&rows)
    })
    .await??;

    info!(bytes = buffer.len(), "导出完成");
    let headers = [
        (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", state.export_filename),
        ),
    ];
    Ok((headers, buffer).into_response())
}

// ==========================================
// GET /health
// ==========================================
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": crate::VERSION,
    }))
}
