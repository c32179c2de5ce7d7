//! HTTP surface of the panel.
//!
//! Control routes answer `{success, message}` and never fail on controller
//! errors; a controller timeout is reported as 504. Catalog routes answer 404
//! for unknown names before the controller is touched.

use crate::state::{AppContext, SharedContext};
use assistant::{AssistantError, ChatOutcome};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use cast_control::CommandOutput;
use playback_state::{parse_status, PlaybackInfo, SourceKind, SourceState, NOTHING_PLAYING};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

const INDEX_HTML: &str = include_str!("../static/index.html");
const APP_JS: &str = include_str!("../static/app.js");

pub fn router(ctx: SharedContext) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/static/app.js", get(app_js))
        .route("/api/info", get(playback_info))
        .route("/api/play", post(play))
        .route("/api/pause", post(pause))
        .route("/api/stop", post(stop))
        .route("/api/volume/{level}", post(set_volume))
        .route("/api/volumeup", post(volume_up))
        .route("/api/volumedown", post(volume_down))
        .route("/api/seek/{time}", post(seek))
        .route("/api/skip", post(skip))
        .route("/api/radio/stations", get(radio_stations))
        .route("/api/radio/play/{name}", post(radio_play))
        .route("/api/youtube/list", get(youtube_list))
        .route("/api/youtube/play/{name}", post(youtube_play))
        .route("/api/assistant/health", get(assistant_health))
        .route("/api/assistant/chat", post(chat_cast))
        .route("/api/assistant/chat/text", post(chat_text))
        .route("/api/assistant/chat/browser", post(chat_browser))
        .route("/audio/{file}", get(audio_file))
        .route("/metrics", get(metrics))
        .with_state(ctx)
}

struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(json!({"success": false, "message": self.message})),
        )
            .into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl From<AssistantError> for ApiError {
    fn from(err: AssistantError) -> Self {
        match err {
            AssistantError::NotConfigured => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Language model not configured",
            ),
            other => Self::new(StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
        }
    }
}

fn command_status(out: &CommandOutput) -> StatusCode {
    if out.timed_out {
        StatusCode::GATEWAY_TIMEOUT
    } else {
        StatusCode::OK
    }
}

fn command_response(ctx: &AppContext, command: &str, out: &CommandOutput, ok_message: &str) -> Response {
    ctx.metrics.observe(command, out);
    if !out.success() {
        warn!("{command} failed: {}", out.message(""));
    }
    (
        command_status(out),
        Json(json!({"success": out.success(), "message": out.message(ok_message)})),
    )
        .into_response()
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn app_js() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/javascript")], APP_JS)
}

#[derive(Serialize)]
struct InfoResponse {
    #[serde(flatten)]
    info: PlaybackInfo,
    source: SourceState,
}

async fn playback_info(State(ctx): State<SharedContext>) -> Response {
    let out = ctx.controller.info().await;
    ctx.metrics.observe("info", &out);
    if out.timed_out {
        return ApiError::new(StatusCode::GATEWAY_TIMEOUT, "Timeout").into_response();
    }

    let mut info = if !out.success() && out.stderr.contains(NOTHING_PLAYING) {
        PlaybackInfo::default()
    } else {
        parse_status(&out.stdout)
    };
    let source = {
        let tracker = ctx.tracker.lock();
        tracker.apply_to(&mut info);
        tracker.current()
    };
    Json(InfoResponse { info, source }).into_response()
}

async fn play(State(ctx): State<SharedContext>) -> Response {
    let out = ctx.controller.play().await;
    command_response(&ctx, "play", &out, "Playing")
}

async fn pause(State(ctx): State<SharedContext>) -> Response {
    let out = ctx.controller.pause().await;
    command_response(&ctx, "pause", &out, "Paused")
}

async fn stop(State(ctx): State<SharedContext>) -> Response {
    ctx.caster.cancel();
    ctx.tracker.lock().clear();
    let out = ctx.controller.stop().await;
    command_response(&ctx, "stop", &out, "Stopped")
}

async fn set_volume(
    State(ctx): State<SharedContext>,
    level: Result<Path<i64>, PathRejection>,
) -> Response {
    let level = match level {
        Ok(Path(level)) => level,
        Err(rejection) => return ApiError::from(rejection).into_response(),
    };
    let (volume, out) = ctx.controller.set_volume(level).await;
    ctx.metrics.observe("volume", &out);
    (
        command_status(&out),
        Json(json!({
            "success": out.success(),
            "message": out.message(&format!("Volume {volume}")),
            "volume": volume,
        })),
    )
        .into_response()
}

async fn volume_up(State(ctx): State<SharedContext>) -> Response {
    let out = ctx.controller.volume_up().await;
    command_response(&ctx, "volumeup", &out, "Volume up")
}

async fn volume_down(State(ctx): State<SharedContext>) -> Response {
    let out = ctx.controller.volume_down().await;
    command_response(&ctx, "volumedown", &out, "Volume down")
}

async fn seek(State(ctx): State<SharedContext>, Path(time): Path<String>) -> Response {
    let out = ctx.controller.seek(&time).await;
    command_response(&ctx, "seek", &out, &format!("Seek to {time}"))
}

async fn skip(State(ctx): State<SharedContext>) -> Response {
    let out = ctx.controller.skip().await;
    command_response(&ctx, "skip", &out, "Skipped")
}

async fn radio_stations(State(ctx): State<SharedContext>) -> Json<serde_json::Value> {
    Json(json!({"stations": ctx.catalogs.radio.names()}))
}

async fn radio_play(State(ctx): State<SharedContext>, Path(name): Path<String>) -> Response {
    let Some(url) = ctx.catalogs.radio.get(&name) else {
        return ApiError::new(StatusCode::NOT_FOUND, format!("Unknown station: {name}")).into_response();
    };
    ctx.caster.cancel();
    let out = ctx.controller.cast(url, ctx.controller.default_timeout()).await;
    if out.success() {
        ctx.tracker.lock().set(SourceKind::Radio, name.as_str());
    }
    command_response(&ctx, "cast", &out, &format!("Playing {name}"))
}

async fn youtube_list(State(ctx): State<SharedContext>) -> Json<serde_json::Value> {
    Json(json!({"favorites": ctx.catalogs.youtube.names()}))
}

async fn youtube_play(State(ctx): State<SharedContext>, Path(name): Path<String>) -> Response {
    let Some(url) = ctx.catalogs.youtube.get(&name) else {
        return ApiError::new(StatusCode::NOT_FOUND, format!("Unknown favorite: {name}")).into_response();
    };
    ctx.caster.cancel();
    let out = ctx.controller.cast(url, ctx.cast_timeout).await;
    if out.success() {
        ctx.tracker.lock().set(SourceKind::Youtube, name.as_str());
    }
    command_response(&ctx, "cast", &out, &format!("Playing {name}"))
}

async fn assistant_health(State(ctx): State<SharedContext>) -> Json<serde_json::Value> {
    let assistant = &ctx.assistant;
    let memory = assistant.memory();
    let (total_memories, memory_error) = if memory.is_enabled() {
        match memory.stats().await {
            Ok(stats) => (Some(stats.total_memories), None),
            Err(e) => (None, Some(e.to_string())),
        }
    } else {
        (None, None)
    };

    Json(json!({
        "success": true,
        "llm": {
            "configured": assistant.model().is_configured(),
            "model": assistant.model().name(),
        },
        "memory": {
            "enabled": memory.is_enabled(),
            "total_memories": total_memories,
            "error": memory_error,
        },
        "tts": {"voice": assistant.speech().voice()},
        "history": assistant.history().len(),
        "cast": ctx.caster.status(),
    }))
}

fn default_use_memory() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    #[serde(default)]
    text: String,
    #[serde(default = "default_use_memory")]
    use_memory: bool,
}

#[derive(Serialize)]
struct ChatResponse {
    success: bool,
    message: String,
    #[serde(flatten)]
    outcome: ChatOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    audio_url: Option<String>,
}

async fn converse(ctx: &AppContext, req: &ChatRequest) -> Result<ChatOutcome, ApiError> {
    let text = req.text.trim();
    if text.is_empty() {
        return Err(ApiError::new(StatusCode::BAD_REQUEST, "Missing text"));
    }
    let _turn = ctx.chat_lock.lock().await;
    let outcome = ctx.assistant.chat(text, req.use_memory).await?;
    ctx.metrics.chats.inc();
    if outcome.degraded {
        ctx.metrics.degraded_chats.inc();
    }
    Ok(outcome)
}

async fn speak_and_cast(ctx: &AppContext, reply: &str) -> Result<(), String> {
    let path = ctx
        .assistant
        .speak(reply, &ctx.audio_dir)
        .await
        .map_err(|e| e.to_string())?;
    let target = path.to_string_lossy().into_owned();
    let result = ctx.caster.cast(&target).await;
    ctx.metrics.commands.with_label_values(&["cast"]).inc();
    if let Err(e) = result {
        ctx.metrics.command_failures.with_label_values(&["cast"]).inc();
        return Err(e.to_string());
    }
    Ok(())
}

async fn chat_cast(
    State(ctx): State<SharedContext>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(req) = body?;
    let outcome = converse(&ctx, &req).await?;
    let (success, message) = match speak_and_cast(&ctx, &outcome.reply).await {
        Ok(()) => {
            ctx.tracker.lock().set(SourceKind::Assistant, "Assistant");
            info!("assistant reply cast to {}", ctx.controller.device());
            (true, "Reply cast".to_string())
        }
        Err(message) => {
            warn!("casting assistant reply failed: {message}");
            (false, message)
        }
    };
    Ok(Json(ChatResponse {
        success,
        message,
        outcome,
        audio_url: None,
    }))
}

async fn chat_text(
    State(ctx): State<SharedContext>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(req) = body?;
    let outcome = converse(&ctx, &req).await?;
    Ok(Json(ChatResponse {
        success: true,
        message: "OK".to_string(),
        outcome,
        audio_url: None,
    }))
}

async fn chat_browser(
    State(ctx): State<SharedContext>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(req) = body?;
    let outcome = converse(&ctx, &req).await?;
    let spoken = ctx.assistant.speak(&outcome.reply, &ctx.audio_dir).await;
    let response = match spoken {
        Ok(path) => {
            let file = path.file_name().map(|f| f.to_string_lossy().into_owned());
            ChatResponse {
                success: true,
                message: "OK".to_string(),
                outcome,
                audio_url: file.map(|f| format!("/audio/{f}")),
            }
        }
        Err(e) => {
            warn!("speech synthesis failed: {e}");
            ChatResponse {
                success: false,
                message: e.to_string(),
                outcome,
                audio_url: None,
            }
        }
    };
    Ok(Json(response))
}

/// Only the flat `<name>.mp3` files the assistant writes are served.
fn is_reply_file(name: &str) -> bool {
    match name.strip_suffix(".mp3") {
        Some(stem) => !stem.is_empty() && stem.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'),
        None => false,
    }
}

async fn audio_file(State(ctx): State<SharedContext>, Path(file): Path<String>) -> Response {
    if !is_reply_file(&file) {
        return ApiError::new(StatusCode::NOT_FOUND, "Not found").into_response();
    }
    match tokio::fs::read(ctx.audio_dir.join(&file)).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, "audio/mpeg")], bytes).into_response(),
        Err(_) => ApiError::new(StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

async fn metrics(State(ctx): State<SharedContext>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        ctx.metrics.encode_text(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use assistant::{Assistant, MockModel, MockSpeech};
    use cast_control::{BackgroundCaster, ControlError, ControllerConfig, MockController};
    use memory_client::DisabledMemory;
    use playback_state::Catalogs;
    use serde_json::Value;
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::net::TcpListener;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn context(
        controller: Arc<MockController>,
        model: MockModel,
        audio_dir: PathBuf,
    ) -> anyhow::Result<SharedContext> {
        context_with_caster(controller, model, audio_dir, "true")
    }

    fn context_with_caster(
        controller: Arc<MockController>,
        model: MockModel,
        audio_dir: PathBuf,
        caster_program: &str,
    ) -> anyhow::Result<SharedContext> {
        let caster = BackgroundCaster::new(&ControllerConfig {
            program: caster_program.to_string(),
            grace: Duration::from_millis(300),
            ..ControllerConfig::default()
        });
        let assistant = Assistant::new(
            Arc::new(model),
            Arc::new(MockSpeech::new()),
            Arc::new(DisabledMemory),
            5,
        );
        Ok(Arc::new(AppContext::new(
            controller,
            caster,
            Duration::from_secs(30),
            Catalogs::default(),
            assistant,
            audio_dir,
        )?))
    }

    async fn serve(ctx: SharedContext) -> std::io::Result<String> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let app = router(ctx);
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        Ok(format!("http://{addr}"))
    }

    #[tokio::test]
    async fn unknown_station_is_404_without_controller_call() -> TestResult {
        let dir = tempfile::tempdir()?;
        let controller = Arc::new(MockController::new());
        let base = serve(context(controller.clone(), MockModel::replying("x"), dir.path().into())?).await?;

        let resp = reqwest::Client::new()
            .post(format!("{base}/api/radio/play/Radio%20Nirgendwo"))
            .send()
            .await?;
        assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);
        let body: Value = resp.json().await?;
        assert_eq!(body["success"], false);
        assert_eq!(controller.call_count(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn known_station_casts_and_names_the_stream() -> TestResult {
        let dir = tempfile::tempdir()?;
        let controller = Arc::new(MockController::new().with_response(
            "info",
            CommandOutput::ok(
                "player_state: PLAYING\nvolume_level: 0.25\nmedia_metadata: {'title': 'mp3_128'}\n",
            ),
        ));
        let base = serve(context(controller.clone(), MockModel::replying("x"), dir.path().into())?).await?;
        let client = reqwest::Client::new();

        let body: Value = client
            .post(format!("{base}/api/radio/play/SRF%203"))
            .send()
            .await?
            .json()
            .await?;
        assert_eq!(body["success"], true);
        let calls = controller.calls();
        assert_eq!(calls[0].command, "cast");
        assert_eq!(calls[0].args, ["https://stream.srg-ssr.ch/m/drs3/mp3_128"]);

        let info: Value = client.get(format!("{base}/api/info")).send().await?.json().await?;
        assert_eq!(info["title"], "SRF 3");
        assert_eq!(info["artist"], "Radio");
        assert_eq!(info["volume"], 25);
        assert_eq!(info["source"]["type"], "radio");
        assert_eq!(info["source"]["name"], "SRF 3");

        client.post(format!("{base}/api/stop")).send().await?;
        let info: Value = client.get(format!("{base}/api/info")).send().await?.json().await?;
        assert_eq!(info["source"]["type"], "none");
        assert_eq!(info["title"], "mp3_128");
        Ok(())
    }

    #[tokio::test]
    async fn volume_is_clamped() -> TestResult {
        let dir = tempfile::tempdir()?;
        let controller = Arc::new(MockController::new());
        let base = serve(context(controller.clone(), MockModel::replying("x"), dir.path().into())?).await?;
        let client = reqwest::Client::new();

        let body: Value = client.post(format!("{base}/api/volume/150")).send().await?.json().await?;
        assert_eq!(body["volume"], 100);
        let body: Value = client.post(format!("{base}/api/volume/-5")).send().await?.json().await?;
        assert_eq!(body["volume"], 0);

        let args: Vec<Vec<String>> = controller.calls().into_iter().map(|c| c.args).collect();
        assert_eq!(args, [vec!["100".to_string()], vec!["0".to_string()]]);
        Ok(())
    }

    #[tokio::test]
    async fn repeated_info_is_identical() -> TestResult {
        let dir = tempfile::tempdir()?;
        let controller = Arc::new(MockController::new().with_response(
            "info",
            CommandOutput::ok("player_state: PAUSED\ncurrent_time: 12.5\nduration: 180\ndisplay_name: Spotify\n"),
        ));
        let base = serve(context(controller, MockModel::replying("x"), dir.path().into())?).await?;
        let client = reqwest::Client::new();

        let first: Value = client.get(format!("{base}/api/info")).send().await?.json().await?;
        let second: Value = client.get(format!("{base}/api/info")).send().await?.json().await?;
        assert_eq!(first, second);
        assert_eq!(first["player_state"], "PAUSED");
        assert_eq!(first["app"], "Spotify");
        Ok(())
    }

    #[tokio::test]
    async fn nothing_playing_yields_defaults() -> TestResult {
        let dir = tempfile::tempdir()?;
        let controller = Arc::new(MockController::new().with_response(
            "info",
            CommandOutput::failed(1, "Error: Nothing is currently playing."),
        ));
        let base = serve(context(controller, MockModel::replying("x"), dir.path().into())?).await?;

        let info: Value = reqwest::get(format!("{base}/api/info")).await?.json().await?;
        assert_eq!(info["playing"], false);
        assert_eq!(info["player_state"], "IDLE");
        assert_eq!(info["volume"], 50);
        Ok(())
    }

    #[tokio::test]
    async fn controller_failure_and_timeout() -> TestResult {
        let dir = tempfile::tempdir()?;
        let controller = Arc::new(
            MockController::new()
                .with_response("pause", CommandOutput::failed(1, "device offline"))
                .with_response(
                    "play",
                    CommandOutput::from_error(&ControlError::Timeout(Duration::from_secs(10))),
                ),
        );
        let base = serve(context(controller, MockModel::replying("x"), dir.path().into())?).await?;
        let client = reqwest::Client::new();

        let resp = client.post(format!("{base}/api/pause")).send().await?;
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        let body: Value = resp.json().await?;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "device offline");

        let resp = client.post(format!("{base}/api/play")).send().await?;
        assert_eq!(resp.status(), reqwest::StatusCode::GATEWAY_TIMEOUT);
        let body: Value = resp.json().await?;
        assert_eq!(body["message"], "Timeout");
        Ok(())
    }

    #[tokio::test]
    async fn catalogs_are_listed_in_order() -> TestResult {
        let dir = tempfile::tempdir()?;
        let base = serve(context(Arc::new(MockController::new()), MockModel::replying("x"), dir.path().into())?).await?;

        let stations: Value = reqwest::get(format!("{base}/api/radio/stations")).await?.json().await?;
        assert_eq!(stations["stations"][0], "SRF 1");
        assert_eq!(stations["stations"].as_array().map(Vec::len), Some(16));
        let favorites: Value = reqwest::get(format!("{base}/api/youtube/list")).await?.json().await?;
        assert_eq!(favorites["favorites"].as_array().map(Vec::len), Some(7));
        Ok(())
    }

    #[tokio::test]
    async fn chat_text_validates_and_replies() -> TestResult {
        let dir = tempfile::tempdir()?;
        let base = serve(context(Arc::new(MockController::new()), MockModel::replying("Sali!"), dir.path().into())?).await?;
        let client = reqwest::Client::new();

        let resp = client
            .post(format!("{base}/api/assistant/chat/text"))
            .json(&json!({"text": "   "}))
            .send()
            .await?;
        assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);

        let body: Value = client
            .post(format!("{base}/api/assistant/chat/text"))
            .json(&json!({"text": "Wie heisst du eigentlich?"}))
            .send()
            .await?
            .json()
            .await?;
        assert_eq!(body["success"], true);
        assert_eq!(body["reply"], "Sali!");
        assert_eq!(body["memory_count"], 0);
        assert_eq!(body["degraded"], false);
        Ok(())
    }

    #[tokio::test]
    async fn unconfigured_model_is_500() -> TestResult {
        let dir = tempfile::tempdir()?;
        let base = serve(context(Arc::new(MockController::new()), MockModel::unconfigured(), dir.path().into())?).await?;

        let resp = reqwest::Client::new()
            .post(format!("{base}/api/assistant/chat/text"))
            .json(&json!({"text": "Wie wird das Wetter?"}))
            .send()
            .await?;
        assert_eq!(resp.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        Ok(())
    }

    #[tokio::test]
    async fn browser_chat_serves_audio() -> TestResult {
        let dir = tempfile::tempdir()?;
        let base = serve(context(Arc::new(MockController::new()), MockModel::replying("Grüezi"), dir.path().into())?).await?;
        let client = reqwest::Client::new();

        let body: Value = client
            .post(format!("{base}/api/assistant/chat/browser"))
            .json(&json!({"text": "Sag mal etwas Nettes"}))
            .send()
            .await?
            .json()
            .await?;
        let audio_url = body["audio_url"].as_str().unwrap_or_default().to_string();
        assert!(audio_url.starts_with("/audio/") && audio_url.ends_with(".mp3"));

        let resp = client.get(format!("{base}{audio_url}")).send().await?;
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        assert_eq!(resp.bytes().await?.as_ref(), b"ID3mock");

        let resp = client.get(format!("{base}/audio/missing.mp3")).send().await?;
        assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);
        let resp = client.get(format!("{base}/audio/notes.txt")).send().await?;
        assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);
        Ok(())
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn chat_casts_reply_and_marks_source() -> TestResult {
        let dir = tempfile::tempdir()?;
        let controller = Arc::new(MockController::new());
        let base = serve(context(controller, MockModel::replying("Mach ich."), dir.path().into())?).await?;
        let client = reqwest::Client::new();

        let body: Value = client
            .post(format!("{base}/api/assistant/chat"))
            .json(&json!({"text": "Spiel etwas Ruhiges", "use_memory": false}))
            .send()
            .await?
            .json()
            .await?;
        assert_eq!(body["success"], true);
        assert_eq!(body["reply"], "Mach ich.");

        let info: Value = client.get(format!("{base}/api/info")).send().await?.json().await?;
        assert_eq!(info["source"]["type"], "assistant");

        let health: Value = client.get(format!("{base}/api/assistant/health")).send().await?.json().await?;
        assert_eq!(health["llm"]["configured"], true);
        assert_eq!(health["memory"]["enabled"], false);
        assert_eq!(health["history"], 1);
        Ok(())
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failed_reply_cast_keeps_the_reply() -> TestResult {
        let dir = tempfile::tempdir()?;
        let ctx = context_with_caster(
            Arc::new(MockController::new()),
            MockModel::replying("Mach ich."),
            dir.path().into(),
            "false",
        )?;
        let base = serve(ctx).await?;

        let resp = reqwest::Client::new()
            .post(format!("{base}/api/assistant/chat"))
            .json(&json!({"text": "Spiel etwas Ruhiges", "use_memory": false}))
            .send()
            .await?;
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        let body: Value = resp.json().await?;
        assert_eq!(body["success"], false);
        assert!(!body["message"].as_str().unwrap_or_default().is_empty());
        assert_eq!(body["reply"], "Mach ich.");
        Ok(())
    }

    #[tokio::test]
    async fn malformed_requests_get_json_errors() -> TestResult {
        let dir = tempfile::tempdir()?;
        let controller = Arc::new(MockController::new());
        let base = serve(context(controller.clone(), MockModel::replying("x"), dir.path().into())?).await?;
        let client = reqwest::Client::new();

        let resp = client.post(format!("{base}/api/assistant/chat/text")).send().await?;
        assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
        let body: Value = resp.json().await?;
        assert_eq!(body["success"], false);
        assert!(body["message"].is_string());

        let resp = client
            .post(format!("{base}/api/assistant/chat"))
            .header("content-type", "application/json")
            .body("{\"text\": ")
            .send()
            .await?;
        assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
        let body: Value = resp.json().await?;
        assert_eq!(body["success"], false);

        let resp = client.post(format!("{base}/api/volume/loud")).send().await?;
        assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
        let body: Value = resp.json().await?;
        assert_eq!(body["success"], false);
        assert_eq!(controller.call_count(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn unknown_favorite_is_404_without_controller_call() -> TestResult {
        let dir = tempfile::tempdir()?;
        let controller = Arc::new(MockController::new());
        let base = serve(context(controller.clone(), MockModel::replying("x"), dir.path().into())?).await?;

        let resp = reqwest::Client::new()
            .post(format!("{base}/api/youtube/play/Unbekannt"))
            .send()
            .await?;
        assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);
        let body: Value = resp.json().await?;
        assert_eq!(body["success"], false);
        assert_eq!(controller.call_count(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn metrics_and_index_are_served() -> TestResult {
        let dir = tempfile::tempdir()?;
        let base = serve(context(Arc::new(MockController::new()), MockModel::replying("x"), dir.path().into())?).await?;
        let client = reqwest::Client::new();

        client.post(format!("{base}/api/skip")).send().await?;
        let text = client.get(format!("{base}/metrics")).send().await?.text().await?;
        assert!(text.contains("panel_controller_commands_total{command=\"skip\"} 1"));

        let html = client.get(format!("{base}/")).send().await?.text().await?;
        assert!(html.contains("app.js"));
        Ok(())
    }

    #[test]
    fn reply_file_names() {
        assert!(is_reply_file("0b3f0f0e-6a4c-4c1e-9a57-8e0c1c2d3e4f.mp3"));
        assert!(!is_reply_file(".mp3"));
        assert!(!is_reply_file("../secret.mp3"));
        assert!(!is_reply_file("reply.wav"));
    }
}
