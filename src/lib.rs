//! coder-guard
//!
//! An HTTP proxy in front of a local code model that guards against
//! hallucinated package names. Every prompt is prefixed with a safety
//! instruction, and answers recommending `pip install` / `npm install`
//! packages that no public registry knows are replaced with a refusal.
//!
//! # Modules
//! - `controller`: HTTP handlers
//! - `entities`: request, response and verdict types
//! - `error`: error type and its HTTP mapping
//! - `middleware`: access logging and error envelopes
//! - `routes`: endpoint registration
//! - `service`: generation client, candidate extraction, registry probes
//! - `utils`: configuration and startup
//!
//! # Examples
//! ```no_run
//! use actix_web::{web, App, HttpServer};
//! use coder_guard::{routes, service::GuardService, AppConfig};
//!
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     let config = AppConfig::default();
//!     let guard = web::Data::new(GuardService::from_config(&config)?);
//!     HttpServer::new(move || App::new().app_data(guard.clone()).configure(routes::configure))
//!         .bind("127.0.0.1:8000")?
//!         .run()
//!         .await
//! }
//! ```

rust_i18n::i18n!("locales", fallback = "en");

pub mod controller;
pub mod entities;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod service;
pub mod utils;

pub use entities::*;
pub use error::*;
pub use utils::*;
