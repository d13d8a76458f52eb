use anyhow::Context;

use lineforge_infra::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    lineforge_observability::init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    let services = lineforge_api::app::services::build_services(&config)
        .context("failed to build services")?;
    let app = lineforge_api::app::build_app(services);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        scan_policy = %config.engine.scan_policy,
        "listening"
    );

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
