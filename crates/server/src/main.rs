use std::{convert::Infallible, net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, Query, State, WebSocketUpgrade},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use catalog::{contact_info, grading_styles, Catalog};
use serde::Deserialize;
use server_api::{
    add_to_cart, cart_view, clear_cart, list_reviews, list_sections, preset_detail,
    remove_from_cart, submit_grading, submit_review, ApiContext, GradingUpload,
};
use shared::{
    domain::{ContactInfo, GradingStyle, HeroPage, SortKey, UnknownHeroPage},
    error::{ApiError, ErrorCode},
    protocol::{
        AddToCartRequest, CartView, GradingReceipt, HeroView, JumpRequest, PresetDetail,
        ReviewDraft, ReviewSubmission, ReviewsView, SectionView, StoreEvent,
    },
};
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod app_state;
mod config;

use app_state::AppState;
use config::load_settings;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

#[derive(Debug, Deserialize)]
struct SectionsQuery {
    #[serde(default)]
    sort: SortKey,
}

/// Room for the multipart framing around the image itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = load_settings();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let catalog = Catalog::load(settings.catalog_path()).context("failed to load catalog")?;
    let mut api = ApiContext::new(catalog);
    api.max_upload_bytes = settings.max_upload_bytes;

    let state = AppState::new(api, settings.slide_interval())?;
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings
        .server_bind
        .parse()
        .with_context(|| format!("invalid bind address '{}'", settings.server_bind))?;
    info!(%addr, "storefront listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    let upload_limit = state.api.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;
    Router::new()
        .route("/healthz", get(healthz))
        .route("/sections", get(http_list_sections))
        .route("/presets/:section/:preset", get(http_preset_detail))
        .route(
            "/presets/:section/:preset/reviews",
            get(http_list_reviews).post(http_submit_review),
        )
        .route(
            "/cart",
            get(http_cart).post(http_add_to_cart).delete(http_clear_cart),
        )
        .route("/cart/:id", delete(http_remove_from_cart))
        .route("/hero/:page", get(http_hero))
        .route("/hero/:page/next", post(http_hero_next))
        .route("/hero/:page/previous", post(http_hero_previous))
        .route("/hero/:page/jump", post(http_hero_jump))
        .route("/styles", get(http_styles))
        .route("/contact", get(http_contact))
        .route(
            "/grading",
            post(http_submit_grading)
                .layer::<_, Infallible>(DefaultBodyLimit::disable())
                .layer(RequestBodyLimitLayer::new(upload_limit)),
        )
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_error(error: ApiError) -> (StatusCode, Json<ApiError>) {
    let status = match error.code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(error))
}

async fn healthz() -> &'static str {
    "ok"
}

async fn http_list_sections(
    State(state): State<Arc<AppState>>,
    Query(q): Query<SectionsQuery>,
) -> Json<Vec<SectionView>> {
    Json(list_sections(&state.api, q.sort))
}

async fn http_preset_detail(
    State(state): State<Arc<AppState>>,
    Path((section, preset)): Path<(String, String)>,
) -> ApiResult<PresetDetail> {
    preset_detail(&state.api, &section, &preset)
        .map(Json)
        .map_err(api_error)
}

async fn http_list_reviews(
    State(state): State<Arc<AppState>>,
    Path((section, preset)): Path<(String, String)>,
) -> ApiResult<ReviewsView> {
    list_reviews(&state.api, &section, &preset)
        .map(Json)
        .map_err(api_error)
}

async fn http_submit_review(
    State(state): State<Arc<AppState>>,
    Path((section, preset)): Path<(String, String)>,
    Json(draft): Json<ReviewDraft>,
) -> ApiResult<ReviewSubmission> {
    let outcome = submit_review(&state.api, &section, &preset, draft).map_err(api_error)?;
    if outcome.accepted {
        state.publish(StoreEvent::ReviewAdded {
            section,
            preset,
            summary: outcome.summary.clone(),
        });
    }
    Ok(Json(outcome))
}

async fn http_cart(State(state): State<Arc<AppState>>) -> Json<CartView> {
    Json(cart_view(&state.api))
}

async fn http_add_to_cart(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddToCartRequest>,
) -> ApiResult<CartView> {
    add_to_cart(&state.api, &req.section, &req.preset)
        .map(Json)
        .map_err(api_error)
}

async fn http_remove_from_cart(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Json<CartView> {
    Json(remove_from_cart(&state.api, &id))
}

async fn http_clear_cart(State(state): State<Arc<AppState>>) -> Json<CartView> {
    Json(clear_cart(&state.api))
}

fn hero_view(
    state: &AppState,
    page: &str,
    step: impl FnOnce(&mut server_api::SlideRotator) -> Result<usize, ApiError>,
) -> ApiResult<HeroView> {
    let page: HeroPage = page
        .parse()
        .map_err(|e: UnknownHeroPage| api_error(ApiError::not_found(e.to_string())))?;
    let rotator = state
        .heroes
        .get(&page)
        .ok_or_else(|| api_error(ApiError::not_found("no slideshow on this page")))?;
    let mut rotator = rotator
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let index = step(&mut *rotator).map_err(api_error)?;
    Ok(Json(HeroView {
        page,
        index,
        image: rotator.images()[index].clone(),
        images: rotator.images().to_vec(),
    }))
}

async fn http_hero(
    State(state): State<Arc<AppState>>,
    Path(page): Path<String>,
) -> ApiResult<HeroView> {
    hero_view(&state, &page, |rotator| Ok(rotator.index()))
}

async fn http_hero_next(
    State(state): State<Arc<AppState>>,
    Path(page): Path<String>,
) -> ApiResult<HeroView> {
    hero_view(&state, &page, |rotator| Ok(rotator.next()))
}

async fn http_hero_previous(
    State(state): State<Arc<AppState>>,
    Path(page): Path<String>,
) -> ApiResult<HeroView> {
    hero_view(&state, &page, |rotator| Ok(rotator.previous()))
}

async fn http_hero_jump(
    State(state): State<Arc<AppState>>,
    Path(page): Path<String>,
    Json(req): Json<JumpRequest>,
) -> ApiResult<HeroView> {
    hero_view(&state, &page, |rotator| {
        rotator
            .jump_to(req.index)
            .map_err(|e| ApiError::validation(e.to_string()))
    })
}

async fn http_styles() -> Json<Vec<GradingStyle>> {
    Json(grading_styles())
}

async fn http_contact() -> Json<ContactInfo> {
    Json(contact_info())
}

async fn http_submit_grading(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> ApiResult<GradingReceipt> {
    let mut email = None;
    let mut preset = None;
    let mut filename = None;
    let mut image = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        api_error(ApiError::validation(format!("malformed upload: {e}")))
    })? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "email" => email = Some(field_text(field).await?),
            "preset" => preset = Some(field_text(field).await?),
            "image" => {
                filename = field.file_name().map(str::to_string);
                image = field
                    .bytes()
                    .await
                    .map_err(|e| {
                        api_error(ApiError::new(
                            ErrorCode::PayloadTooLarge,
                            format!("failed to read image: {e}"),
                        ))
                    })?
                    .to_vec();
            }
            other => warn!(field = other, "ignoring unknown upload field"),
        }
    }

    let upload = GradingUpload {
        email: email.as_deref(),
        preset: preset.as_deref(),
        filename: filename.as_deref(),
        image: &image,
    };
    let receipt = submit_grading(&state.api, &upload).map_err(api_error)?;
    state.publish(StoreEvent::GradingReceived {
        submission_id: receipt.submission_id,
    });
    Ok(Json(receipt))
}

async fn field_text(
    field: axum::extract::multipart::Field<'_>,
) -> Result<String, (StatusCode, Json<ApiError>)> {
    field
        .text()
        .await
        .map_err(|e| api_error(ApiError::validation(format!("unreadable form field: {e}"))))
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| ws_connection(state, socket))
}

async fn ws_connection(state: Arc<AppState>, socket: axum::extract::ws::WebSocket) {
    use axum::extract::ws::Message;
    use futures::{SinkExt, StreamExt};
    use tokio::sync::broadcast::error::RecvError;

    let (mut sender, mut receiver) = socket.split();
    let mut events_rx = state.api.events.subscribe();

    let send_task = tokio::spawn(async move {
        loop {
            let event = match events_rx.recv().await {
                Ok(event) => event,
                Err(RecvError::Lagged(missed)) => StoreEvent::Error(ApiError::new(
                    ErrorCode::Internal,
                    format!("missed {missed} events"),
                )),
                Err(RecvError::Closed) => break,
            };
            let text = match serde_json::to_string(&event) {
                Ok(v) => v,
                Err(_) => continue,
            };
            if sender.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    while let Some(Ok(_msg)) = receiver.next().await {}

    send_task.abort();
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
