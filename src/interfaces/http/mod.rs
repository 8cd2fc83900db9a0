pub mod error;
pub mod multipart;


use std::sync::Arc;
use std::time::Duration;

use actix_cors::Cors;
use actix_multipart::Multipart;
use actix_web::dev::Server;
use actix_web::http::header::ContentType;
use actix_web::{get, middleware, post, web, App, HttpRequest, HttpResponse, HttpServer, Responder};

use crate::application::{CompanyLookupUseCase, UploadOutcome, UploadUseCase};
use crate::domain::company::{CompanyRequest, CompanyResponse, QueryRequest, ResultsResponse};
use crate::domain::error::{AppError, Result};
use crate::infrastructure::config::AppConfig;

use self::error::json_error_handler;
use self::multipart::read_file_part;

pub struct HttpState {
    pub config: AppConfig,
    pub companies: Arc<CompanyLookupUseCase>,
    pub uploads: Arc<UploadUseCase>,
}

async fn lookup_response(
    data: &HttpState,
    req: CompanyRequest,
    mode: &str,
) -> Result<HttpResponse> {
    tracing::info!(mode, company = %req.company, "Company lookup");

    let response = data.companies.lookup(&req.company).await.map_err(|e| {
        tracing::error!(mode, error = %e, "Company lookup failed");
        e
    })?;
    Ok(HttpResponse::Ok().json(CompanyResponse { response }))
}

#[post("/company/batch")]
async fn batch_mode(
    data: web::Data<HttpState>,
    req: web::Json<CompanyRequest>,
) -> Result<HttpResponse> {
    lookup_response(&data, req.into_inner(), "batch").await
}

#[post("/company/live")]
async fn live_mode(
    data: web::Data<HttpState>,
    req: web::Json<CompanyRequest>,
) -> Result<HttpResponse> {
    lookup_response(&data, req.into_inner(), "live").await
}

#[post("/company/query")]
async fn query(data: web::Data<HttpState>, req: web::Json<QueryRequest>) -> Result<HttpResponse> {
    tracing::info!(company = %req.company, url = %req.url, "VC information query");

    let response = data.companies.query(&req.company, &req.url).await.map_err(|e| {
        tracing::error!(error = %e, "VC information query failed");
        e
    })?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/result/{request_id}")]
async fn result(path: web::Path<u64>) -> impl Responder {
    HttpResponse::Ok().json(ResultsResponse {
        results: vec![path.into_inner()],
    })
}

#[post("/upload")]
async fn upload(
    data: web::Data<HttpState>,
    req: HttpRequest,
    payload: Multipart,
) -> Result<HttpResponse> {
    let file = read_file_part(&req, payload, data.config.max_upload_bytes).await?;
    let kind = file.kind()?;
    tracing::info!(
        filename = %file.filename,
        kind = ?kind,
        bytes = file.bytes.len(),
        "Upload received"
    );

    let outcome = process_upload(&data, file).await.map_err(|e| {
        tracing::error!(error = %e, "Upload processing failed");
        e
    })?;
    render_upload(outcome, data.config.excel.double_encode_response)
}

async fn process_upload(
    data: &HttpState,
    file: crate::domain::upload::UploadedFile,
) -> Result<UploadOutcome> {
    let uploads = data.uploads.clone();
    let task = web::block(move || uploads.execute(&file));

    let joined = match data.config.request_timeout_secs {
        0 => task.await,
        secs => tokio::time::timeout(Duration::from_secs(secs), task)
            .await
            .map_err(|_| {
                AppError::ProcessingError(format!("processing timed out after {}s", secs))
            })?,
    };

    joined.map_err(|e| AppError::ProcessingError(e.to_string()))?
}

/// Excel records go out as JSON text wrapped in a JSON string when
/// `double_encode` is set; PDF links go out as a plain object.
pub fn render_upload(outcome: UploadOutcome, double_encode: bool) -> Result<HttpResponse> {
    match outcome {
        UploadOutcome::Companies(records) => {
            let records_json = serde_json::to_string(&records)?;
            let body = if double_encode {
                serde_json::to_string(&records_json)?
            } else {
                records_json
            };
            Ok(HttpResponse::Ok().content_type(ContentType::json()).body(body))
        }
        UploadOutcome::Links(links) => Ok(HttpResponse::Ok().json(links)),
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(batch_mode)
        .service(live_mode)
        .service(query)
        .service(result)
        .service(upload);
}

pub fn start_server(state: web::Data<HttpState>) -> std::io::Result<Server> {
    let (host, port) = state.config.bind_address();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((host.as_str(), port))?
    .run();

    tracing::info!(%host, port, "HTTP server listening");
    Ok(server)
}
