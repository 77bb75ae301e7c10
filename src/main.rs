use std::net::SocketAddr;

use job_portal_backend::{
    config::{get_config, init_config},
    create_router,
    database::pool::create_pool,
    middleware::cors::cors_layer,
    AppState,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Database connected and migrations applied");

    let app_state = AppState::new(pool);

    let uploads_dir = config.uploads_dir.clone();
    info!("Serving uploads from: {}", uploads_dir);

    let app = create_router(app_state)
        .nest_service("/uploads", tower_http::services::ServeDir::new(uploads_dir))
        .layer(cors_layer(config.cors_origin.as_deref()))
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
