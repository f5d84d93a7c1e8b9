//! Axum route handlers for the interactions webhook.
//!
//! The `/interactions` handler takes the body as [`Bytes`] so the
//! signature is checked over the exact bytes Discord signed; nothing
//! upstream may parse or re-serialize the body first.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use notegate_core::{
    integrity, interaction::NOTE_MODAL_ID, payload, Interaction, InteractionResponse,
    InteractionType, Note, Position, RequestVerifier,
};
use notegate_mirror::MirrorSync;
use notegate_store::NoteStore;

use crate::error::GatewayError;

// ── Shared state ─────────────────────────────────────────────────────────────

/// Everything a request handler needs, built once in `main` and passed
/// via axum state; no ambient globals.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub verifier: RequestVerifier,
    pub note_secret: Vec<u8>,
    pub store: Arc<NoteStore>,
    pub mirror: MirrorSync,
}

type Ctx = Arc<AppContext>;

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the application router with the given context.
pub fn create_router(ctx: Ctx) -> Router {
    Router::new()
        .route("/interactions", post(interactions))
        .route("/health", get(health))
        .with_state(ctx)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `GET /health` — liveness probe.
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({"status": "ok"})))
}

/// `POST /interactions` — verify, dispatch, and answer an interaction.
///
/// # Errors
/// Returns [`GatewayError::Unauthorized`] before anything else runs if
/// the signature headers are missing or do not verify over the raw
/// body; [`GatewayError::MalformedInteraction`] for an unparseable
/// body; [`GatewayError::Unsupported`] for discriminants this webhook
/// does not serve.
pub async fn interactions(
    State(ctx): State<Ctx>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<InteractionResponse>, GatewayError> {
    let signature = header_str(&headers, "x-signature-ed25519")?;
    let timestamp = header_str(&headers, "x-signature-timestamp")?;
    if let Err(e) = ctx.verifier.verify(signature, timestamp, &body) {
        warn!(error = %e, "rejected request with bad signature");
        return Err(GatewayError::Unauthorized);
    }

    let interaction: Interaction = serde_json::from_slice(&body)
        .map_err(|e| GatewayError::MalformedInteraction(e.to_string()))?;

    match interaction.kind() {
        InteractionType::Ping => Ok(Json(InteractionResponse::pong())),
        InteractionType::ModalSubmit => handle_submission(&ctx, &interaction).await.map(Json),
        InteractionType::Other(t) => {
            Err(GatewayError::Unsupported(format!("interaction type {t}")))
        }
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Result<&'a str, GatewayError> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .ok_or(GatewayError::Unauthorized)
}

// ── Submission pipeline ───────────────────────────────────────────────────────

async fn handle_submission(
    ctx: &AppContext,
    interaction: &Interaction,
) -> Result<InteractionResponse, GatewayError> {
    let data = interaction.data.as_ref().ok_or_else(|| {
        GatewayError::MalformedInteraction("modal submission without data".to_owned())
    })?;
    if data.custom_id != NOTE_MODAL_ID {
        return Err(GatewayError::Unsupported(format!("modal `{}`", data.custom_id)));
    }
    let user = interaction.submitter().ok_or_else(|| {
        GatewayError::MalformedInteraction("missing submitter identity".to_owned())
    })?;
    let code = data.field_value(0).ok_or_else(|| {
        GatewayError::MalformedInteraction("missing position code field".to_owned())
    })?;
    let message = data.field_value(1).ok_or_else(|| {
        GatewayError::MalformedInteraction("missing message field".to_owned())
    })?;

    // User-correctable problems answer 200 with an ephemeral message
    // and touch neither the store nor the mirror.
    let (position, message) = match decode_submission(&ctx.note_secret, code, message) {
        Ok(decoded) => decoded,
        Err(e) => {
            info!(user = %user.id, error = %e, "submission rejected");
            return Ok(InteractionResponse::ephemeral(e.to_string()));
        }
    };

    let note = Note::new(user.id.clone(), user.username.clone(), position, message);
    let store = Arc::clone(&ctx.store);
    let stored = note.clone();
    tokio::task::spawn_blocking(move || store.upsert(&stored))
        .await
        .map_err(|e| GatewayError::Internal(format!("store task failed: {e}")))??;

    info!(user = %note.discord_id, "note saved");

    // The reply reflects the durable write only; mirroring is
    // eventually consistent and failures there are logged by the
    // sync worker, not reported to the user.
    ctx.mirror.notify();

    Ok(InteractionResponse::ephemeral(
        "Note saved! It will appear in-game shortly.",
    ))
}

fn decode_submission(
    secret: &[u8],
    code: &str,
    message: &str,
) -> Result<(Position, String), notegate_core::CoreError> {
    let parsed = payload::parse_position_code(code)?;
    integrity::verify_tag(secret, parsed.raw_coords, parsed.tag)?;
    let message = payload::validate_message(message)?;
    Ok((parsed.position, message.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use ed25519_dalek::SigningKey;
    use tower::ServiceExt;

    use notegate_mirror::{MirrorError, MirrorPublisher};

    struct NullPublisher;

    #[async_trait]
    impl MirrorPublisher for NullPublisher {
        async fn publish(&self, _notes: &[Note]) -> Result<(), MirrorError> {
            Ok(())
        }
    }

    fn test_ctx() -> Ctx {
        let key = SigningKey::from_bytes(&[7u8; 32]).verifying_key();
        let verifier = match RequestVerifier::from_hex(&hex::encode(key.to_bytes())) {
            Ok(v) => v,
            Err(e) => panic!("verifier construction failed: {e}"),
        };
        let store = match NoteStore::open_in_memory() {
            Ok(s) => Arc::new(s),
            Err(e) => panic!("store open failed: {e}"),
        };
        let mirror = MirrorSync::spawn(Arc::clone(&store), Arc::new(NullPublisher));
        Arc::new(AppContext {
            verifier,
            note_secret: b"test-secret".to_vec(),
            store,
            mirror,
        })
    }

    #[tokio::test]
    async fn health_response_format_returns_ok_with_status_field() {
        let app = create_router(test_ctx());
        let req = match Request::builder().uri("/health").body(Body::empty()) {
            Ok(r) => r,
            Err(e) => panic!("failed to build request: {e}"),
        };
        let resp = match app.oneshot(req).await {
            Ok(r) => r,
            Err(e) => panic!("handler error: {e}"),
        };
        assert_eq!(resp.status(), StatusCode::OK);

        let bytes = match axum::body::to_bytes(resp.into_body(), 1024).await {
            Ok(b) => b,
            Err(e) => panic!("failed to read body: {e}"),
        };
        let body: serde_json::Value = match serde_json::from_slice(&bytes) {
            Ok(v) => v,
            Err(e) => panic!("invalid JSON: {e}"),
        };
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn request_without_signature_headers_is_unauthorized() {
        let ctx = test_ctx();
        let app = create_router(Arc::clone(&ctx));
        let req = match Request::builder()
            .method("POST")
            .uri("/interactions")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"type":1}"#))
        {
            Ok(r) => r,
            Err(e) => panic!("failed to build request: {e}"),
        };
        let resp = match app.oneshot(req).await {
            Ok(r) => r,
            Err(e) => panic!("handler error: {e}"),
        };
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        match ctx.store.count() {
            Ok(c) => assert_eq!(c, 0, "rejected request must not touch the store"),
            Err(e) => panic!("count failed: {e}"),
        }
    }

    #[test]
    fn decode_submission_rejects_bad_tag_before_message_check() {
        let err = match decode_submission(b"test-secret", "1|2|3|00000000", "hello") {
            Err(e) => e,
            Ok(_) => panic!("forged tag must not decode"),
        };
        assert!(err.to_string().contains("verification"));
    }

    #[test]
    fn decode_submission_accepts_minted_code() {
        let tag = integrity::compute_tag(b"test-secret", "1.5|2.0|-3.25");
        let code = format!("1.5|2.0|-3.25|{tag}");
        let (position, message) = match decode_submission(b"test-secret", &code, " hi ") {
            Ok(d) => d,
            Err(e) => panic!("decode failed: {e}"),
        };
        assert!((position.y - 2.0).abs() < f64::EPSILON);
        assert_eq!(message, "hi");
    }
}
