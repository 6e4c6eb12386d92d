use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::http::{HeaderValue, Request};
use axum::{Extension, Router};
use tower::ServiceBuilder;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;

use crate::cloud::{CloudClient, HyperTransport};
use crate::config::Config;
use crate::logic;

mod error;
mod extractor;
mod health;
mod rank;
mod roles;


pub use error::{Error, ResultExt};
pub use extractor::{GameAuth, GAME_AUTH_HEADER};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything a handler needs; cloned into each request.
#[derive(Clone)]
pub struct ApiContext {
    config: Arc<Config>,
    ranks: logic::rank::Handler,
    roles: logic::roles::Handler,
}

impl ApiContext {
    /// Builds the handler graph around one shared cloud client.
    pub fn new(config: Config, cloud: CloudClient) -> Self {
        let roles = logic::roles::Handler::new(cloud.clone());
        let memberships =
            logic::membership::Handler::new(cloud.clone(), config.max_membership_pages);
        let ranks = logic::rank::Handler::new(cloud, roles.clone(), memberships);

        Self {
            config: Arc::new(config),
            ranks,
            roles,
        }
    }
}

pub async fn serve(config: Config) -> anyhow::Result<()> {
    let cloud = CloudClient::new(
        &config.cloud_base_url,
        &config.roblox_api_key,
        Arc::new(HyperTransport::new()),
    )?;
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app = api_router(ApiContext::new(config, cloud));

    log::info!("Rank server running on {addr}");
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("error running HTTP server")
}

pub fn api_router(ctx: ApiContext) -> Router {
    health::router()
        .merge(rank::router())
        .merge(roles::router())
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(Extension(ctx)),
        )
}

#[derive(Clone, Copy, Default)]
struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = uuid::Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                log::error!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    log::info!("shutting down");
}
