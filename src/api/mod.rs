use crate::common::axum_ip::IpAddrInfo;
use crate::common::context::Context;
use crate::common::error::AppError;
use crate::common::init;
use crate::common::state::AppState;
use crate::repositories::messages::MessagesRepository;
use crate::settings::{AppSettings, ServiceSettings};
use axum::Router;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::routing::{get, put};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod messages;

pub struct RequestContext {
    pub state: AppState,
    pub request_ip: IpAddrInfo,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/messages", get(messages::fetch_all).post(messages::create))
        .route(
            "/messages/{id}",
            get(messages::fetch_one)
                .put(messages::update)
                .delete(messages::delete),
        )
        .route("/messages/{id}/password", put(messages::change_password))
}

/// The router with state and the HTTP layers applied.
pub fn app(state: AppState) -> Router {
    router()
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

pub async fn serve(settings: &AppSettings) -> anyhow::Result<()> {
    let state = init::initialize_state(settings).await?;
    let listener = TcpListener::bind((settings.app_host, settings.app_port)).await?;
    info!("Server is running on {}", listener.local_addr()?);
    axum::serve(
        listener,
        app(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}

impl FromRequestParts<AppState> for RequestContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let ip_info = IpAddrInfo::from_request_parts(parts, state).await?;
        Ok(Self {
            state: state.clone(),
            request_ip: ip_info,
        })
    }
}

impl Context for RequestContext {
    fn messages(&self) -> &dyn MessagesRepository {
        self.state.messages()
    }

    fn settings(&self) -> &ServiceSettings {
        self.state.settings()
    }
}
