use std::sync::{Arc, Mutex};

use actix_web::dev::Server;
use actix_web::web;
use tracing::error;

use crate::application::{CsvTransferUseCase, EsgLookupUseCase, PdfTransferUseCase, QueryUseCase};
use crate::domain::error::Result;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::esg_clients::{EsgScoreClient, RapidApiEsgClient};
use crate::infrastructure::llm_clients::{LLMClient, OpenAIClient};
use crate::infrastructure::storage::ensure_uploads_dir;
use crate::interfaces::http::{add_log, start_server, HttpState, LogEntry};

pub fn setup(config: &AppConfig) -> Result<Server> {
    let logs: Arc<Mutex<Vec<LogEntry>>> = Arc::new(Mutex::new(Vec::new()));

    let uploads_dir = ensure_uploads_dir(&config.uploads.dir).map_err(|err| {
        error!(
            error = %err,
            uploads_dir = %config.uploads.dir.display(),
            "Failed to create uploads dir"
        );
        err
    })?;

    let state = web::Data::new(build_state(config, logs.clone())?);
    let server = start_server(state, &config.server, uploads_dir)?;

    add_log(
        &logs,
        "INFO",
        "System",
        &format!(
            "HTTP server started on {}:{}",
            config.server.host, config.server.port
        ),
    );

    Ok(server)
}

pub fn build_state(config: &AppConfig, logs: Arc<Mutex<Vec<LogEntry>>>) -> Result<HttpState> {
    let timeout = config.request_timeout();

    if config.esg.api_key.is_none() {
        add_log(&logs, "WARN", "System", "ESG API key is not configured");
    }
    if config.llm.api_key.is_none() {
        add_log(&logs, "WARN", "System", "LLM API key is not configured");
    }

    let esg_client: Arc<dyn EsgScoreClient + Send + Sync> =
        Arc::new(RapidApiEsgClient::new(timeout)?);
    let llm_client: Arc<dyn LLMClient + Send + Sync> = Arc::new(OpenAIClient::new(timeout)?);

    Ok(HttpState {
        esg_lookup: EsgLookupUseCase::new(esg_client, config.esg.clone()),
        query: QueryUseCase::new(llm_client, config.llm.clone()),
        csv_transfer: CsvTransferUseCase::new(),
        pdf_transfer: PdfTransferUseCase::new(),
        logs,
    })
}
