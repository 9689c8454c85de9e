use anyhow::Context;
use extension_name::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let settings = ExtensionSettings::from_config(&ConfigService::from_env())
        .context("Failed to load extension settings")?;
    let addr = settings.bind_address();
    if settings.api_tokens.is_empty() {
        tracing::warn!("No API tokens configured; every /api request will be rejected");
    }

    tracing::info!("Starting extension-name...");

    let container = build_container(settings, Arc::new(DirectExecutor))
        .context("Failed to wire extension")?;

    let ui = UiRegistry::new();
    let page = container.resolve::<AdminUiPage>()?;
    ui.register_page(&page)?;

    for route in ExtensionRestApplication::build(&container)?.documented_routes() {
        tracing::info!(method = route.method, path = %route.path, secured = route.secured, "documented route");
    }

    let router = create_app(&container)?;
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}
