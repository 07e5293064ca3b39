use anyhow::Context;

use coder_guard::utils::init;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 初始化应用配置和日志系统
    let config = init::init()
        .await
        .context("初始化应用程序失败")
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, format!("{:#}", e)))?;

    init::run(config).await
}
