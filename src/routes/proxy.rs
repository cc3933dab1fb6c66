use actix_web::get;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde::Serialize;

use crate::auth::authorize;
use crate::config::Settings;
use crate::errors::ServiceError;
use crate::resolver::ProxyResolver;

#[derive(Serialize)]
struct ResolvedProxy {
    proxy: Option<String>,
}

#[get("")]
async fn get_proxy(
    rq: HttpRequest,
    settings: web::Data<Settings>,
    resolver: web::Data<ProxyResolver>,
) -> Result<impl Responder, ServiceError> {
    authorize(&rq, &settings.access_token)?;

    Ok(HttpResponse::Ok().json(ResolvedProxy {
        proxy: resolver.resolve_proxy(),
    }))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(get_proxy);
}
