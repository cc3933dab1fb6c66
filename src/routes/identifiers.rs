mod constants;
mod types;

use actix_web::{get, post};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use tokio::time::Duration;
use uuid::Uuid;

use crate::auth::authorize;
use crate::config::Settings;
use crate::errors::ServiceError;
use crate::resolver::ProxyResolver;

use self::constants::*;
use self::types::*;

#[post("")]
async fn post_identifier(
    rq: HttpRequest,
    data: web::Json<UsedIdentifier>,
    settings: web::Data<Settings>,
    resolver: web::Data<ProxyResolver>,
) -> Result<impl Responder, ServiceError> {
    authorize(&rq, &settings.access_token)?;

    let UsedIdentifier { identifier, ttl } = data.into_inner();

    if !(MIN_TTL..=MAX_TTL).contains(&ttl) {
        return Err(ServiceError::BadRequest {
            message: format!("ttl should be between {} and {}", MIN_TTL, MAX_TTL),
        });
    }

    let identifier = identifier
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    resolver
        .mark_identifier_used(identifier.clone(), Duration::from_secs(ttl))
        .await;

    Ok(HttpResponse::Ok().json(MarkedIdentifier { identifier, ttl }))
}

#[get("{identifier}")]
async fn get_identifier(
    rq: HttpRequest,
    path: web::Path<String>,
    settings: web::Data<Settings>,
    resolver: web::Data<ProxyResolver>,
) -> Result<impl Responder, ServiceError> {
    authorize(&rq, &settings.access_token)?;

    let identifier = path.into_inner();
    let used = resolver.is_identifier_used(&identifier).await;

    Ok(HttpResponse::Ok().json(IdentifierStatus { identifier, used }))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(post_identifier).service(get_identifier);
}
