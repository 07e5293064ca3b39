#![allow(dead_code)]

use actix_test::TestServer;
use actix_web::{web, App, HttpResponse};
use coder_guard::utils::config::{AppConfig, RegistryEndpoint};
use serde_json::{json, Value};
use std::time::Duration;

/// Address nothing listens on.
pub const CLOSED_URL: &str = "http://127.0.0.1:1";

/// Ollama-style backend that echoes the prompt followed by `answer`.
pub fn mock_backend(answer: &'static str) -> TestServer {
    actix_test::start(move || {
        App::new().route(
            "/api/generate",
            web::post().to(move |body: web::Json<Value>| async move {
                let prompt = body["prompt"].as_str().unwrap_or_default().to_string();
                HttpResponse::Ok().json(json!({
                    "model": body["model"],
                    "response": format!("{}{}", prompt, answer),
                    "done": true
                }))
            }),
        )
    })
}

/// Backend that returns whatever it received, so tests can inspect the payload.
pub fn payload_echo_backend() -> TestServer {
    actix_test::start(|| {
        App::new().route(
            "/api/generate",
            web::post().to(|body: web::Json<Value>| async move {
                HttpResponse::Ok().json(json!({ "response": body.into_inner().to_string() }))
            }),
        )
    })
}

pub fn slow_backend(delay: Duration) -> TestServer {
    actix_test::start(move || {
        App::new().route(
            "/api/generate",
            web::post().to(move || async move {
                actix_web::rt::time::sleep(delay).await;
                HttpResponse::Ok().json(json!({ "response": "late" }))
            }),
        )
    })
}

pub fn failing_backend() -> TestServer {
    actix_test::start(|| {
        App::new().route(
            "/api/generate",
            web::post().to(|| async { HttpResponse::InternalServerError().body("model not loaded") }),
        )
    })
}

/// Registry answering 200 for `known` packages and 404 otherwise.
pub fn mock_registry(known: &'static [&'static str]) -> TestServer {
    actix_test::start(move || {
        App::new().route(
            "/pkg/{name}",
            web::get().to(move |name: web::Path<String>| async move {
                if known.iter().any(|k| *k == name.as_str()) {
                    HttpResponse::Ok().json(json!({ "name": name.into_inner() }))
                } else {
                    HttpResponse::NotFound().finish()
                }
            }),
        )
    })
}

/// Registry that is up but answers every lookup with `status`.
pub fn status_registry(status: u16) -> TestServer {
    actix_test::start(move || {
        App::new().route(
            "/pkg/{name}",
            web::get().to(move || async move {
                let status = actix_web::http::StatusCode::from_u16(status)
                    .unwrap_or(actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);
                HttpResponse::build(status).finish()
            }),
        )
    })
}

/// Registry that answers 200, but only after `delay`.
pub fn slow_registry(delay: Duration) -> TestServer {
    actix_test::start(move || {
        App::new().route(
            "/pkg/{name}",
            web::get().to(move || async move {
                actix_web::rt::time::sleep(delay).await;
                HttpResponse::Ok().finish()
            }),
        )
    })
}

pub fn registry_endpoint(name: &str, server: &TestServer) -> RegistryEndpoint {
    RegistryEndpoint { name: name.to_string(), url_template: server.url("/pkg/{name}") }
}

pub fn closed_endpoint(name: &str) -> RegistryEndpoint {
    RegistryEndpoint { name: name.to_string(), url_template: format!("{}/{{name}}", CLOSED_URL) }
}

pub fn config(backend_url: String, endpoints: Vec<RegistryEndpoint>) -> AppConfig {
    let mut config = AppConfig::default();
    config.backend.url = backend_url;
    config.backend.timeout_secs = 1;
    config.registry.probe_timeout_secs = 1;
    config.registry.endpoints = endpoints;
    config
}
