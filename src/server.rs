//! # HTTP layer
//!
//! POST /generate takes a Typeform webhook, verifies its signature, fetches
//! the guest photograph and renders the poster; GET /download serves the
//! latest rendered PNG.
//!
//! The rendering core assumes at most one render in flight against the
//! shared output path, so the handler serializes renders behind a mutex and
//! runs the blocking pipeline on the blocking thread pool.

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;
use tower_http::services::ServeFile;

use crate::compose::{self, Assets};
use crate::error::CartellError;
use crate::fetch;
use crate::poster::{VenueMap, default_venues};
use crate::webhook::Webhook;

type HmacSha256 = Hmac<Sha256>;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
    /// Shared secret for webhook signatures; `None` disables verification
    pub secret: Option<String>,
    /// Asset and output locations
    pub assets: Assets,
}

/// Application state shared across handlers.
struct AppState {
    verifier: SignatureVerifier,
    assets: Assets,
    venues: VenueMap,
    http: reqwest::Client,
    /// One render in flight at a time against the shared output path.
    render_lock: tokio::sync::Mutex<()>,
}

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use cartell::compose::Assets;
/// use cartell::server::{ServerConfig, serve};
///
/// # async fn example() -> Result<(), cartell::error::CartellError> {
/// let config = ServerConfig {
///     listen_addr: "0.0.0.0:8080".to_string(),
///     secret: Some("topsecret".to_string()),
///     assets: Assets::default(),
/// };
///
/// serve(config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig) -> Result<(), CartellError> {
    let state = Arc::new(AppState {
        verifier: SignatureVerifier::new(config.secret.clone()),
        assets: config.assets.clone(),
        venues: default_venues(),
        http: reqwest::Client::new(),
        render_lock: tokio::sync::Mutex::new(()),
    });

    let app = Router::new()
        .route("/generate", post(generate_handler))
        .route_service("/download", ServeFile::new(config.assets.output.clone()))
        .with_state(state);

    log::info!("listening on {}", config.listen_addr);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Handle POST /generate.
async fn generate_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    match generate(&state, &headers, &body).await {
        Ok(()) => StatusCode::OK,
        Err(e @ CartellError::Signature(_)) => {
            log::error!("could not verify signature: {}", e);
            StatusCode::FORBIDDEN
        }
        Err(e @ CartellError::Webhook(_)) => {
            log::error!("could not parse webhook: {}", e);
            StatusCode::BAD_REQUEST
        }
        Err(e) => {
            log::error!("could not generate poster: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

async fn generate(
    state: &AppState,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<(), CartellError> {
    let signature = headers
        .get("Typeform-Signature")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    state.verifier.verify(body, signature)?;

    let webhook: Webhook =
        serde_json::from_slice(body).map_err(|e| CartellError::Webhook(e.to_string()))?;
    let poster = webhook.into_poster()?;

    let photo = fetch::fetch_photo(&state.http, &poster.pic_url, &std::env::temp_dir()).await?;

    let _guard = state.render_lock.lock().await;
    let assets = state.assets.clone();
    let venues = state.venues.clone();

    tokio::task::spawn_blocking(move || {
        compose::render_and_cleanup(&poster, photo, &assets, &venues)
    })
    .await
    .map_err(|e| CartellError::Io(std::io::Error::other(e)))?
}

/// Verifies the `Typeform-Signature` header: `sha256=` followed by the
/// base64 HMAC-SHA256 of the raw request body. An absent or empty secret
/// disables verification.
pub struct SignatureVerifier {
    secret: Option<String>,
}

impl SignatureVerifier {
    pub fn new(secret: Option<String>) -> Self {
        Self {
            secret: secret.filter(|s| !s.is_empty()),
        }
    }

    pub fn verify(&self, payload: &[u8], received: &str) -> Result<(), CartellError> {
        let Some(secret) = &self.secret else {
            return Ok(());
        };

        let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
            .map_err(|e| CartellError::Signature(e.to_string()))?;
        mac.update(payload);
        let expected = format!("sha256={}", BASE64.encode(mac.finalize().into_bytes()));

        if expected != received {
            return Err(CartellError::Signature("signature mismatch".to_string()));
        }

        Ok(())
    }
}
