//! FAQ resource router.
//!
//! ```text
//! GET    /api/v1/faqs
//! GET    /api/v1/faqs/{id}
//! POST   /api/v1/faqs       {"question":"...","answer":"..."}
//! PATCH  /api/v1/faqs/{id}  {"answer":"..."}
//! DELETE /api/v1/faqs/{id}
//! ```
//!
//! Write endpoints accept JSON or form-encoded bodies.

use actix_web::http::StatusCode;
use actix_web::{Either, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{DomainError, Faq, FaqDraft, FaqPatch};

use super::envelope::Envelope;
use super::error::ApiResult;
use super::pipeline::{API_PREFIX, Mount};
use super::state::HttpState;

/// Request body for creating or updating an entry.
///
/// Missing fields deserialise as `None` so that validation, not parsing,
/// reports them.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FaqRequest {
    /// Question text.
    #[serde(default)]
    pub question: Option<String>,
    /// Answer text.
    #[serde(default)]
    pub answer: Option<String>,
}

type FaqBody = Either<web::Json<FaqRequest>, web::Form<FaqRequest>>;

fn into_request(body: FaqBody) -> FaqRequest {
    match body {
        Either::Left(json) => json.into_inner(),
        Either::Right(form) => form.into_inner(),
    }
}

fn parse_id(raw: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(raw).map_err(|_| {
        DomainError::bad_request(format!("'{raw}' is not a valid FAQ id")).with_category("INVALID_ID")
    })
}

fn missing(id: &Uuid) -> DomainError {
    DomainError::not_found(format!("FAQ {id} not found"))
}

/// Mount point for the FAQ router.
pub fn mount() -> Mount {
    Mount::new(format!("{API_PREFIX}/faqs"), configure)
}

/// Register the FAQ handlers on a scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_faqs)
        .service(get_faq)
        .service(create_faq)
        .service(update_faq)
        .service(delete_faq);
}

/// List every FAQ entry.
#[get("")]
pub async fn list_faqs(state: web::Data<HttpState>) -> ApiResult<Envelope<Vec<Faq>>> {
    let faqs = state.faqs.list().await?;
    Ok(Envelope::ok(faqs))
}

/// Fetch one entry by id.
#[get("/{id}")]
pub async fn get_faq(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<Envelope<Faq>> {
    let id = parse_id(&path)?;
    let faq = state.faqs.find(&id).await?.ok_or_else(|| missing(&id))?;
    Ok(Envelope::ok(faq))
}

/// Create an entry.
#[post("")]
pub async fn create_faq(state: web::Data<HttpState>, body: FaqBody) -> ApiResult<Envelope<Faq>> {
    let request = into_request(body);
    let draft = FaqDraft::new(
        request.question.as_deref().unwrap_or_default(),
        request.answer.as_deref().unwrap_or_default(),
    )?;
    let faq = state.faqs.create(&draft).await?;
    Ok(Envelope::created(faq).with_message("FAQ created"))
}

/// Partially update an entry.
#[patch("/{id}")]
pub async fn update_faq(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    body: FaqBody,
) -> ApiResult<Envelope<Faq>> {
    let id = parse_id(&path)?;
    let request = into_request(body);
    let patch = FaqPatch::new(request.question.as_deref(), request.answer.as_deref())?;
    let faq = state
        .faqs
        .update(&id, &patch)
        .await?
        .ok_or_else(|| missing(&id))?;
    Ok(Envelope::ok(faq).with_message("FAQ updated"))
}

/// Delete an entry.
#[delete("/{id}")]
pub async fn delete_faq(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<Envelope<()>> {
    let id = parse_id(&path)?;
    if !state.faqs.delete(&id).await? {
        return Err(missing(&id).into());
    }
    Ok(Envelope::new(
        StatusCode::OK,
        None,
        Some("FAQ deleted".to_owned()),
    ))
}
