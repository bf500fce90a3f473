use crate::agent::{ TravelAgent, FALLBACK_REPLY };
use crate::models::chat::{ ChatRequest, ChatResponse, LivenessResponse };
use std::error::Error;
use std::sync::Arc;
use axum::{
    routing::{ get, post },
    Router,
    Json,
    extract::{ Request, State },
    http::HeaderValue,
    middleware::{ self, Next },
    response::Response,
};
use tower_http::cors::{ AllowHeaders, AllowMethods, AllowOrigin, CorsLayer };
use log::{ info, error };

pub const LIVENESS_MESSAGE: &str = "FastAPI server is running for your Korean Travel Companion!";

#[derive(Clone)]
pub struct AppState {
    pub agent: Arc<TravelAgent>,
}

/// Credentials rule out wildcards, so methods and headers are mirrored from the preflight.
pub fn cors_layer(allowed_origin: &str) -> Result<CorsLayer, Box<dyn Error + Send + Sync>> {
    let origin = HeaderValue::from_str(allowed_origin)
        .map_err(|e| format!("Invalid allowed origin '{}': {}", allowed_origin, e))?;

    Ok(
        CorsLayer::new()
            .allow_origin(AllowOrigin::exact(origin))
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
            .allow_credentials(true)
    )
}

pub fn build_router(
    agent: Arc<TravelAgent>,
    allowed_origin: &str
) -> Result<Router, Box<dyn Error + Send + Sync>> {
    let cors = cors_layer(allowed_origin)?;
    let app_state = AppState { agent };

    Ok(
        Router::new()
            .route("/", get(root_handler))
            .route("/chat", post(chat_handler))
            .layer(cors)
            .layer(middleware::from_fn(log_request))
            .with_state(app_state)
    )
}

pub async fn start_http_server(
    addr: &str,
    agent: Arc<TravelAgent>,
    allowed_origin: &str
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let app = build_router(agent, allowed_origin)?;

    let listener = tokio::net::TcpListener
        ::bind(addr).await
        .map_err(|e| format!("Failed to bind HTTP server to {}: {}", addr, e))?;
    info!("Starting HTTP API server on: http://{}", listener.local_addr()?);

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let resp = next.run(req).await;
    info!("{} {} -> {}", method, path, resp.status());
    resp
}

async fn root_handler() -> Json<LivenessResponse> {
    Json(LivenessResponse {
        message: LIVENESS_MESSAGE.to_string(),
    })
}

async fn chat_handler(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>
) -> Json<ChatResponse> {
    let reply = match state.agent.reply(&req).await {
        Ok(text) => text,
        Err(e) => {
            error!("Error calling Gemini API [{}]: {}", e.code(), e);
            FALLBACK_REPLY.to_string()
        }
    };

    Json(ChatResponse { reply })
}
