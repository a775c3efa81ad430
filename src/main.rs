use sales_dashboard::{router, AppConfig, DashboardState, DashboardStore};
use sales_dashboard::models::Settings;
use tower::ServiceBuilder;
use tracing::{info, warn};
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志 - 本地时间格式
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    // 加载配置, 文件或环境变量格式错误时退回到纯环境变量
    let config = AppConfig::load().unwrap_or_else(|e| {
        warn!("Failed to load layered config ({}), falling back to env", e);
        AppConfig::from_env()
    });
    info!("Starting server with config: {:?}", config);

    let settings = Settings {
        currency: config.display.currency,
        ..Settings::default()
    };
    let state = if config.display.seed_demo_data {
        DashboardState::demo(settings)
    } else {
        DashboardState::new(Default::default(), Default::default(), settings)
    };
    info!(
        "Dashboard state ready: {} products, {} clients",
        state.catalog.len(),
        state.clients.list().len()
    );

    let app = router(DashboardStore::new(state)).layer(ServiceBuilder::new());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
