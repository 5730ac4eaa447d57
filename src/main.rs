mod cache;
mod config;
mod controllers;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod state;
mod utils;

use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use cache::redis_client::RedisClient;
use config::environment::EnvironmentConfig;
use database::DatabaseConnection;
use middleware::auth::{admin_guard, auth_middleware, host_guard};
use middleware::cors::{cors_middleware, cors_middleware_with_origins};
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚗 PrimeDrew - Marketplace de alquiler de vehículos");
    info!("===================================================");

    let config = EnvironmentConfig::default();

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let pool = db_connection.pool().clone();

    // Inicializar Redis (store de quotes pendientes)
    let redis_url = std::env::var("REDIS_URL")
        .unwrap_or_else(|_| "redis://localhost:6379".to_string());

    let redis_config = cache::CacheConfig {
        redis_url,
        default_ttl: config.quote_ttl_seconds,
    };

    let redis_client = match RedisClient::new(redis_config).await {
        Ok(client) => client,
        Err(e) => {
            error!("❌ Error conectando a Redis: {}", e);
            return Err(anyhow::anyhow!("Error de Redis: {}", e));
        }
    };

    let port = config.port;

    // CORS: orígenes explícitos en producción, permisivo en desarrollo
    let cors = if config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(config.cors_origins.clone())
    };

    let app_state = AppState::new(pool, config, redis_client);

    // Routers por recurso con sus guards de rol
    let booking_router = routes::booking_routes::create_booking_router()
        .route_layer(axum::middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    let vehicle_router = routes::vehicle_routes::create_vehicle_router()
        .route_layer(axum::middleware::from_fn(host_guard))
        .route_layer(axum::middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    let host_router = routes::host_routes::create_host_router()
        .route_layer(axum::middleware::from_fn(host_guard))
        .route_layer(axum::middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    let admin_router = routes::admin_routes::create_admin_router()
        .route_layer(axum::middleware::from_fn(admin_guard))
        .route_layer(axum::middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    let review_router = routes::review_routes::create_review_router()
        .route_layer(axum::middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    let app = Router::new()
        .route("/health", get(health_endpoint))
        .nest("/api", routes::vehicle_routes::create_inventory_router())
        .nest("/api/booking", booking_router)
        .nest("/api/vehicle", vehicle_router)
        .nest("/api/host", host_router)
        .nest("/api/admin", admin_router)
        .nest("/api/review", review_router)
        .layer(cors)
        .with_state(app_state);

    let addr: SocketAddr = format!("0.0.0.0:{}", port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🚙 Inventario:");
    info!("   GET  /api/inventory - Vehículos disponibles con calendario");
    info!("📅 Reservas:");
    info!("   POST /api/booking/order - Crear orden de pago (quote)");
    info!("   POST /api/booking/confirm - Confirmar reserva tras el pago");
    info!("   GET  /api/booking/mine - Mis reservas");
    info!("   POST /api/booking/:id/cancel - Cancelar reserva");
    info!("   GET  /api/booking/:id/receipt - Recibo detallado");
    info!("🔑 Host:");
    info!("   POST /api/vehicle - Listar vehículo");
    info!("   GET  /api/vehicle - Mis vehículos");
    info!("   PUT  /api/vehicle/:id - Editar vehículo");
    info!("   POST /api/vehicle/:id/toggle - Alternar disponibilidad");
    info!("   POST /api/host/tier - Cambiar tier de comisión");
    info!("   GET  /api/host/earnings - Mis ganancias");
    info!("⭐ Reviews:");
    info!("   POST /api/review - Enviar review");
    info!("🛡️ Admin:");
    info!("   GET  /api/admin/dashboard - Dashboard financiero");
    info!("   POST /api/admin/booking/:id/refund - Procesar reembolso");
    info!("   POST /api/admin/booking/:id/deposit-refund - Procesar depósito");
    info!("   POST /api/admin/host/:id/approve - Aprobar host");
    info!("   POST /api/admin/host/:id/toggle-status - Bloquear/activar host");

    // Iniciar servidor
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            anyhow::anyhow!("Server error: {}", e)
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Health check simple
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "service": "vehicle-rental",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
