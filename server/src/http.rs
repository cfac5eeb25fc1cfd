use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{self, HeaderName, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::get,
};
use platform_api::ApiResult;
use products_hr::{Employee, EmployeeId, EmployeeUpdate, HrModule, Salary, WorkedHours};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub hr: HrModule,
    pub config: Arc<AppConfig>,
}

#[derive(Clone, Debug)]
pub struct ServeConfig {
    addr: SocketAddr,
}

impl ServeConfig {
    pub fn new(host: IpAddr, port: u16) -> Self {
        Self {
            addr: SocketAddr::from((host, port)),
        }
    }
}

pub async fn serve(config: ServeConfig, state: AppState) -> anyhow::Result<()> {
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;

    info!(%config.addr, "hr server listening");
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;
    Ok(())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed = origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect::<Vec<_>>();
    let allow_origin = if allowed.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(allowed)
    };
    CorsLayer::new()
        .allow_headers([http::header::CONTENT_TYPE])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_origin(allow_origin)
}

pub fn build_router(state: AppState) -> Router {
    let header_name = HeaderName::from_static("x-request-id");
    Router::new()
        .route("/health", get(health_handler))
        .route("/employee", get(list_employees).post(create_employee))
        .route(
            "/employee/{id}",
            get(get_employee).put(update_employee).delete(delete_employee),
        )
        .route("/employee/{id}/hours", get(list_hours).post(log_hours))
        .route("/employee/{id}/salary", get(employee_salary))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(header_name.clone(), MakeRequestUuid))
                .layer(PropagateRequestIdLayer::new(header_name))
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&state.config.cors_allowed_origins)),
        )
        .with_state(state)
}

async fn list_employees(State(state): State<AppState>) -> Json<Vec<Employee>> {
    Json(state.hr.employees().await)
}

async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Employee>> {
    let id = EmployeeId::from_path(&id)?;
    Ok(Json(state.hr.employee(id).await?))
}

// Unknown or unparseable ids list nothing rather than 404.
async fn list_hours(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<Vec<WorkedHours>> {
    match EmployeeId::from_path(&id) {
        Ok(id) => Json(state.hr.hours_for(id).await),
        Err(_) => Json(Vec::new()),
    }
}

async fn employee_salary(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Salary>> {
    let id = EmployeeId::from_path(&id)?;
    Ok(Json(state.hr.salary(id).await?))
}

async fn create_employee(
    State(state): State<AppState>,
    payload: Result<Json<Employee>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Employee>)> {
    let Json(employee) = payload?;
    let created = state.hr.create_employee(employee).await;
    Ok((StatusCode::CREATED, Json(created)))
}

/// The body's `employeeId` decides which employee the hours belong to; the
/// path segment is only compared against it.
async fn log_hours(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<WorkedHours>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<WorkedHours>)> {
    let Json(entry) = payload?;
    if EmployeeId::from_path(&id).ok() != Some(entry.employee_id) {
        warn!(
            path_id = %id,
            employee_id = %entry.employee_id,
            "hours logged for a different employee than the path names"
        );
    }
    let logged = state.hr.log_hours(entry).await;
    Ok((StatusCode::CREATED, Json(logged)))
}

async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<EmployeeUpdate>, JsonRejection>,
) -> ApiResult<Json<Employee>> {
    let id = EmployeeId::from_path(&id)?;
    // An unknown employee is reported before any complaint about the body.
    state.hr.employee(id).await?;
    let Json(update) = payload?;
    Ok(Json(state.hr.update_employee(id, update).await?))
}

async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = EmployeeId::from_path(&id)?;
    state.hr.delete_employee(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        ok: true,
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    version: &'static str,
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        signal(SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    };
    info!("shutdown signal received");
}
