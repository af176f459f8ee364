//! CORS middleware configuration for cross-origin requests.
//!
//! Outside production any origin may call the API, which keeps local
//! front-end development simple. In production only the origins listed in
//! `CORS_ALLOWED_ORIGINS` are accepted.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use sv_shared::{Environment, ServerConfig};

/// Preflight cache lifetime in seconds
const MAX_AGE: usize = 3600;

/// Creates a CORS middleware instance for the given environment.
pub fn create_cors(environment: Environment, server: &ServerConfig) -> Cors {
    if environment.is_production() {
        create_production_cors(&server.allowed_origins)
    } else {
        create_development_cors()
    }
}

fn base_cors() -> Cors {
    Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::HeaderName::from_static("x-request-id"),
        ])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(MAX_AGE)
}

/// Permissive configuration for development and staging.
fn create_development_cors() -> Cors {
    log::info!("Configuring CORS for development environment");
    base_cors().allow_any_origin()
}

/// Restrictive configuration for production.
fn create_production_cors(allowed_origins: &[String]) -> Cors {
    log::info!("Configuring CORS for production environment");

    if allowed_origins.is_empty() {
        log::warn!("No CORS_ALLOWED_ORIGINS configured, cross-origin requests will be rejected");
    }

    allowed_origins.iter().fold(base_cors(), |cors, origin| {
        log::info!("Adding allowed origin: {}", origin);
        cors.allowed_origin(origin)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};

    fn production_server() -> ServerConfig {
        ServerConfig {
            allowed_origins: vec!["https://siteverify.example".to_string()],
            ..ServerConfig::default()
        }
    }

    #[actix_rt::test]
    async fn test_production_rejects_unknown_origin() {
        let app = test::init_service(
            App::new()
                .wrap(create_cors(Environment::Production, &production_server()))
                .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let allowed = test::TestRequest::get()
            .uri("/")
            .insert_header((header::ORIGIN, "https://siteverify.example"))
            .to_request();
        let resp = test::call_service(&app, allowed).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));

        let denied = test::TestRequest::get()
            .uri("/")
            .insert_header((header::ORIGIN, "https://evil.example"))
            .to_request();
        let resp = test::try_call_service(&app, denied).await;
        assert!(resp.map(|r| r.status().is_client_error()).unwrap_or(true));
    }

    #[actix_rt::test]
    async fn test_development_allows_any_origin() {
        let app = test::init_service(
            App::new()
                .wrap(create_cors(Environment::Development, &ServerConfig::default()))
                .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((header::ORIGIN, "http://localhost:3000"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }
}
