use std::sync::Arc;

use actix_web::web;
use tracing_subscriber::EnvFilter;

use crate::application::{CompanyLookupUseCase, ExcelNormalizer, UploadUseCase};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::data_sources::StubDataSource;
use crate::infrastructure::enrichment::StubEnrichmentService;
use crate::infrastructure::pdf::PdfLinkExtractor;
use crate::interfaces::http::{start_server, HttpState};

pub fn build_state(config: AppConfig) -> web::Data<HttpState> {
    let companies = CompanyLookupUseCase::new(
        Arc::new(StubDataSource::new()),
        Arc::new(StubEnrichmentService::new()),
    );
    let uploads = UploadUseCase::new(
        ExcelNormalizer::new(config.excel.clone()),
        Arc::new(PdfLinkExtractor::new()),
        config.temp_dir.clone(),
    );

    web::Data::new(HttpState {
        config,
        companies: Arc::new(companies),
        uploads: Arc::new(uploads),
    })
}

pub async fn run() -> std::io::Result<()> {
    let config = AppConfig::load()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    tracing::info!(
        host = %config.host,
        port = config.port,
        double_encode = config.excel.double_encode_response,
        require_complete_rows = config.excel.require_complete_rows,
        "Starting enrichment service"
    );

    let server = start_server(build_state(config)).map_err(|e| {
        tracing::error!(error = %e, "Failed to bind HTTP server");
        e
    })?;
    server.await
}
