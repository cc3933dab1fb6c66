mod identifiers;
mod proxy;

use actix_web::web;

use crate::errors::ServiceError;

pub fn config(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default()
        .limit(4096)
        .error_handler(|e, _rq| {
            log::debug!("json: {}", e);

            ServiceError::BadRequest {
                message: e.to_string(),
            }
            .into()
        });

    let path_config = web::PathConfig::default().error_handler(|e, _rq| {
        log::debug!("path: {}", e);

        ServiceError::BadRequest {
            message: e.to_string(),
        }
        .into()
    });

    cfg.app_data(json_config)
        .app_data(path_config)
        .service(web::scope("/proxy").configure(proxy::config))
        .service(web::scope("/identifiers").configure(identifiers::config));
}
