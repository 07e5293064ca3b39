use crate::middleware::{error_handler, Logging};
use crate::routes;
use crate::service::GuardService;
use crate::utils::config::AppConfig;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use log::info;
use std::sync::Arc;
use std::time::Duration;

pub const LOG_CONFIG_PATH: &str = "config/log4rs.yml";

pub async fn init() -> anyhow::Result<Arc<AppConfig>> {
    // 初始化日志系统
    log4rs::init_file(LOG_CONFIG_PATH, Default::default())
        .with_context(|| format!("加载日志配置失败: {}", LOG_CONFIG_PATH))?;

    // 加载应用配置
    let config_path = AppConfig::resolve_path();
    let config = AppConfig::load(&config_path)
        .with_context(|| format!("加载应用配置失败: {}", config_path))?;
    info!("应用配置加载完成: {}", config_path);

    info!(
        "后端: {} (模型 {}, 超时 {}s)",
        config.backend.url, config.backend.model, config.backend.timeout_secs
    );
    for endpoint in &config.registry.endpoints {
        info!("已配置包仓库: {} -> {}", endpoint.name, endpoint.url_template);
    }

    Ok(Arc::new(config))
}

pub async fn run(config: Arc<AppConfig>) -> std::io::Result<()> {
    let guard = web::Data::new(GuardService::from_config(&config)?);
    let host = config.server.host.clone();
    let port = config.server.port;

    info!("监听地址 {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(guard.clone())
            .wrap(Logging)
            .wrap(error_handler())
            .configure(routes::configure)
    })
    .client_request_timeout(Duration::from_secs(config.server.client_request_timeout_secs))
    .bind((host, port))?
    .shutdown_timeout(config.server.shutdown_timeout) // 优雅关闭等待时间
    .run()
    .await
}
