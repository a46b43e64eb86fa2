use crate::application::{
    CsvTransferUseCase, EsgLookupUseCase, PdfTransferUseCase, QueryUseCase,
};
use crate::domain::esg_record::EsgRecord;
use crate::infrastructure::config::ServerConfig;
use actix_cors::Cors;
use actix_multipart::form::tempfile::{TempFile, TempFileConfig};
use actix_multipart::form::{MultipartForm, MultipartFormConfig};
use actix_multipart::MultipartError;
use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::http::header;
use actix_web::{
    dev::Server, get, post, web, App, HttpRequest, HttpResponse, HttpServer, Responder,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

const MAX_LOG_ENTRIES: usize = 100;

const ESG_FETCH_ERROR: &str = "Error fetching ESG data";
const LLM_QUERY_ERROR: &str = "Error querying LLM";
const NO_DATA_ERROR: &str = "No data provided";
const NO_QUERY_ERROR: &str = "No query provided";
const CSV_READ_ERROR: &str = "Error reading CSV file";
const PDF_READ_ERROR: &str = "Error reading PDF file";
const EXPORT_ERROR: &str = "Error generating export";
const UPLOAD_ERROR: &str = "Error processing file upload";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub source: String,
    pub message: String,
}

pub struct HttpState {
    pub esg_lookup: EsgLookupUseCase,
    pub query: QueryUseCase,
    pub csv_transfer: CsvTransferUseCase,
    pub pdf_transfer: PdfTransferUseCase,
    pub logs: Arc<Mutex<Vec<LogEntry>>>,
}

#[derive(Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Serialize)]
pub struct QueryResponse {
    pub answer: String,
}

#[derive(Deserialize)]
pub struct ExportRequest {
    #[serde(default)]
    pub data: Option<Value>,
}

#[derive(MultipartForm)]
pub struct UploadForm {
    pub file: TempFile,
}

fn error_body(message: &str) -> Value {
    json!({ "error": message })
}

#[get("/company/{name}")]
async fn company_scores(data: web::Data<HttpState>, path: web::Path<String>) -> impl Responder {
    let company_name = path.into_inner();
    add_log(
        &data.logs,
        "INFO",
        "EsgApi",
        &format!("Fetching ESG data for '{}'", company_name),
    );

    match data.esg_lookup.execute(&company_name).await {
        Ok(score) => HttpResponse::Ok().json(score),
        Err(e) => {
            add_log(
                &data.logs,
                "ERROR",
                "EsgApi",
                &format!("Error fetching ESG data: {}", e),
            );
            HttpResponse::InternalServerError().json(error_body(ESG_FETCH_ERROR))
        }
    }
}

#[post("/query")]
async fn query(data: web::Data<HttpState>, req: web::Json<QueryRequest>) -> impl Responder {
    let Some(user_input) = req.query.as_deref() else {
        return HttpResponse::BadRequest().json(error_body(NO_QUERY_ERROR));
    };

    add_log(
        &data.logs,
        "INFO",
        "LLM",
        &format!("Forwarding query ({} chars)", user_input.chars().count()),
    );

    match data.query.execute(user_input).await {
        Ok(answer) => HttpResponse::Ok().json(QueryResponse { answer }),
        Err(e) => {
            add_log(
                &data.logs,
                "ERROR",
                "LLM",
                &format!("Error querying LLM: {}", e),
            );
            HttpResponse::InternalServerError().json(error_body(LLM_QUERY_ERROR))
        }
    }
}

#[post("/export/csv")]
async fn export_csv(data: web::Data<HttpState>, req: web::Json<ExportRequest>) -> impl Responder {
    let Some(record) = EsgRecord::from_payload(req.data.as_ref()) else {
        return HttpResponse::BadRequest().json(error_body(NO_DATA_ERROR));
    };

    add_log(&data.logs, "INFO", "Export", "Exporting ESG data as CSV");

    match data.csv_transfer.export(&record) {
        Ok(csv) => HttpResponse::Ok()
            .content_type("text/csv")
            .insert_header((
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"esg-data.csv\"",
            ))
            .body(csv),
        Err(e) => {
            add_log(
                &data.logs,
                "ERROR",
                "Export",
                &format!("CSV export failed: {}", e),
            );
            HttpResponse::InternalServerError().json(error_body(EXPORT_ERROR))
        }
    }
}

#[post("/export/pdf")]
async fn export_pdf(data: web::Data<HttpState>, req: web::Json<ExportRequest>) -> impl Responder {
    let Some(record) = EsgRecord::from_payload(req.data.as_ref()) else {
        return HttpResponse::BadRequest().json(error_body(NO_DATA_ERROR));
    };

    add_log(&data.logs, "INFO", "Export", "Exporting ESG data as PDF");

    match data.pdf_transfer.export(&record) {
        Ok(pdf) => HttpResponse::Ok()
            .content_type("application/pdf")
            .insert_header((
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"esg-report.pdf\"",
            ))
            .body(pdf),
        Err(e) => {
            add_log(
                &data.logs,
                "ERROR",
                "Export",
                &format!("PDF export failed: {}", e),
            );
            HttpResponse::InternalServerError().json(error_body(EXPORT_ERROR))
        }
    }
}

#[post("/import/csv")]
async fn import_csv(
    data: web::Data<HttpState>,
    MultipartForm(form): MultipartForm<UploadForm>,
) -> impl Responder {
    let upload = form.file;
    add_log(
        &data.logs,
        "INFO",
        "Import",
        &format!(
            "Importing CSV upload {} ({} bytes)",
            upload.file_name.as_deref().unwrap_or("<unnamed>"),
            upload.size
        ),
    );

    let state = data.clone();
    // The temp file is owned by the closure and removed when it returns.
    let parsed = web::block(move || {
        let rows = state.csv_transfer.import(upload.file.path());
        drop(upload);
        rows
    })
    .await;

    match parsed {
        Ok(Ok(rows)) => HttpResponse::Ok().json(json!({ "data": rows })),
        Ok(Err(e)) => {
            add_log(
                &data.logs,
                "ERROR",
                "Import",
                &format!("Error reading CSV file: {}", e),
            );
            HttpResponse::InternalServerError().json(error_body(CSV_READ_ERROR))
        }
        Err(e) => {
            add_log(
                &data.logs,
                "ERROR",
                "Import",
                &format!("CSV import task failed: {}", e),
            );
            HttpResponse::InternalServerError().json(error_body(CSV_READ_ERROR))
        }
    }
}

#[post("/import/pdf")]
async fn import_pdf(
    data: web::Data<HttpState>,
    MultipartForm(form): MultipartForm<UploadForm>,
) -> impl Responder {
    let upload = form.file;
    add_log(
        &data.logs,
        "INFO",
        "Import",
        &format!(
            "Importing PDF upload {} ({} bytes)",
            upload.file_name.as_deref().unwrap_or("<unnamed>"),
            upload.size
        ),
    );

    let state = data.clone();
    let parsed = web::block(move || {
        let record = state.pdf_transfer.import(upload.file.path());
        drop(upload);
        record
    })
    .await;

    match parsed {
        Ok(Ok(record)) => HttpResponse::Ok().json(json!({ "data": record })),
        Ok(Err(e)) => {
            add_log(
                &data.logs,
                "ERROR",
                "Import",
                &format!("Error reading PDF file: {}", e),
            );
            HttpResponse::InternalServerError().json(error_body(PDF_READ_ERROR))
        }
        Err(e) => {
            add_log(
                &data.logs,
                "ERROR",
                "Import",
                &format!("PDF import task failed: {}", e),
            );
            HttpResponse::InternalServerError().json(error_body(PDF_READ_ERROR))
        }
    }
}

#[get("/logs")]
async fn get_logs(data: web::Data<HttpState>) -> impl Responder {
    let logs = lock_logs(&data.logs);
    HttpResponse::Ok().json(&*logs)
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(error_body(&err.to_string()));
    InternalError::from_response(err, response).into()
}

fn upload_error_handler(err: MultipartError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(error_body(UPLOAD_ERROR));
    InternalError::from_response(err, response).into()
}

fn lock_logs(logs: &Mutex<Vec<LogEntry>>) -> MutexGuard<'_, Vec<LogEntry>> {
    logs.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub fn add_log(logs: &Mutex<Vec<LogEntry>>, level: &str, source: &str, message: &str) {
    match level {
        "ERROR" => tracing::error!(source, "{}", message),
        "WARN" => tracing::warn!(source, "{}", message),
        _ => tracing::info!(source, "{}", message),
    }

    let entry = LogEntry {
        time: Local::now().format("%H:%M:%S").to_string(),
        level: level.to_string(),
        source: source.to_string(),
        message: message.to_string(),
    };
    let mut logs = lock_logs(logs);
    logs.push(entry);
    if logs.len() > MAX_LOG_ENTRIES {
        logs.remove(0);
    }
}

/// Registers the `/api` routes together with the extractor configs they rely on.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(MultipartFormConfig::default().error_handler(upload_error_handler))
        .service(
            web::scope("/api")
                .service(company_scores)
                .service(query)
                .service(export_csv)
                .service(export_pdf)
                .service(import_csv)
                .service(import_pdf)
                .service(get_logs),
        );
}

pub fn start_server(
    state: web::Data<HttpState>,
    server_config: &ServerConfig,
    uploads_dir: PathBuf,
) -> std::io::Result<Server> {
    let server = HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .app_data(TempFileConfig::default().directory(&uploads_dir))
            .configure(configure_api)
    })
    .bind((server_config.host.as_str(), server_config.port))?
    .run();

    Ok(server)
}
