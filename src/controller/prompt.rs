use crate::entities::PromptRequest;
use crate::error::{AppError, ValidationDetails};
use crate::middleware::RequestId;
use crate::service::GuardService;
use actix_web::{error::JsonPayloadError, post, web, HttpRequest, HttpResponse};
use chrono::Utc;

#[post("/generate")]
pub async fn generate(
    guard: web::Data<GuardService>,
    http: HttpRequest,
    req: web::Json<PromptRequest>,
) -> Result<HttpResponse, AppError> {
    let request_id = RequestId::of(&http).0;
    let start_time = Utc::now();

    log::info!("[{}] Received generate request ({} chars)", request_id, req.text.len());
    log::debug!("[{}] Request details: {:?}", request_id, req);

    match guard.handle(&req).await {
        Ok(body) => {
            let duration = Utc::now() - start_time;
            log::info!(
                "[{}] Completed generate request in {}ms",
                request_id,
                duration.num_milliseconds()
            );
            log::debug!("[{}] Response details: {:?}", request_id, body);
            Ok(HttpResponse::Ok().json(body))
        }
        Err(e) => {
            let duration = Utc::now() - start_time;
            log::error!(
                "[{}] Error handling generate request after {}ms: {}",
                request_id,
                duration.num_milliseconds(),
                e
            );
            Err(e)
        }
    }
}

/// Rejects malformed request bodies with the JSON error envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().limit(1024 * 1024).error_handler(
        |err: JsonPayloadError, _req: &HttpRequest| {
            log::warn!("Rejected request body: {}", err);
            AppError::Validation(ValidationDetails {
                field: payload_error_field(&err).to_string(),
                message: err.to_string(),
            })
            .into()
        },
    )
}

/// Names `text` only when deserialization failed on that field.
fn payload_error_field(err: &JsonPayloadError) -> &'static str {
    match err {
        JsonPayloadError::Deserialize(e) if e.to_string().contains("`text`") => "text",
        _ => "body",
    }
}

pub async fn not_found() -> Result<HttpResponse, AppError> {
    Err(AppError::NotFound)
}
