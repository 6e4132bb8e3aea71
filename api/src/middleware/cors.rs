//! CORS configuration for the browser frontend.
//!
//! Development allows any origin. Production allows the configured `DOMAIN`
//! plus anything listed in `ALLOWED_ORIGINS` (comma separated).

use actix_cors::Cors;
use actix_web::http::{header, Method};
use std::env;

use craiyon_shared::Environment;

const DEFAULT_MAX_AGE: usize = 3600;

fn allowed_methods() -> Vec<Method> {
    vec![
        Method::GET,
        Method::POST,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
    ]
}

/// Creates a CORS middleware instance configured for `environment`
pub fn create_cors(environment: Environment, domain: &str) -> Cors {
    let max_age = env::var("CORS_MAX_AGE")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(DEFAULT_MAX_AGE);

    if environment.is_production() {
        create_production_cors(domain, max_age)
    } else {
        Cors::default()
            .allow_any_origin()
            .allowed_methods(allowed_methods())
            .allowed_headers(vec![header::AUTHORIZATION, header::ACCEPT, header::CONTENT_TYPE])
            .max_age(max_age)
    }
}

fn create_production_cors(domain: &str, max_age: usize) -> Cors {
    log::info!("Configuring CORS for production environment");

    let mut cors = Cors::default()
        .allowed_methods(allowed_methods())
        .allowed_headers(vec![header::AUTHORIZATION, header::ACCEPT, header::CONTENT_TYPE])
        .max_age(max_age);

    let domain = domain.trim_end_matches('/');
    if !domain.is_empty() {
        cors = cors.allowed_origin(domain);
    }

    if let Ok(allowed_origins) = env::var("ALLOWED_ORIGINS") {
        for origin in allowed_origins.split(',').map(str::trim).filter(|o| !o.is_empty()) {
            log::info!("Adding allowed origin: {}", origin);
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}
