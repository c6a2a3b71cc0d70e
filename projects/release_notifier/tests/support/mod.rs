#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path as UrlPath, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use projects_release_notifier::{config::Config, context::AppContext};
use serde_json::{json, Value};

pub const TOKEN: &str = "test-token";
pub const OWNER_CHAT: i64 = -100123;
pub const PROMO_CODE: &str = "4852";

async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake server");
    let addr = listener.local_addr().expect("fake server address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("fake server");
    });
    format!("http://{addr}")
}

pub fn album(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "album_type": "single",
        "release_date": "2025-02-14",
        "external_urls": {"spotify": format!("https://open.spotify.com/album/{id}")},
        "images": [{"url": format!("https://i.scdn.co/image/{id}"), "height": 640, "width": 640}]
    })
}

pub fn track(id: &str, name: &str, album_value: Value) -> Value {
    json!({
        "id": id,
        "name": name,
        "album": album_value,
        "artists": [{"id": "4pqIwzgTlrlpRqHvWvNtVd", "name": "Surreal.wav"}],
        "external_urls": {"spotify": format!("https://open.spotify.com/track/{id}")}
    })
}

pub fn playlist(id: &str, name: &str, followers: u64) -> Value {
    json!({
        "id": id,
        "name": name,
        "followers": {"href": null, "total": followers},
        "external_urls": {"spotify": format!("https://open.spotify.com/playlist/{id}")},
        "images": null
    })
}

// ---------- Spotify ----------

#[derive(Default)]
pub struct Catalog {
    pub issue_token: bool,
    pub latest: Vec<Value>,
    pub albums: HashMap<String, Value>,
    pub tracks: HashMap<String, Value>,
    pub playlists: HashMap<String, Value>,
    pub token_requests: usize,
    pub album_listing_queries: Vec<HashMap<String, String>>,
}

#[derive(Clone)]
pub struct FakeSpotify {
    pub url: String,
    pub catalog: Arc<Mutex<Catalog>>,
}

impl FakeSpotify {
    pub async fn start(catalog: Catalog) -> Self {
        let catalog = Arc::new(Mutex::new(Catalog {
            issue_token: true,
            ..catalog
        }));
        let router = Router::new()
            .route("/api/token", post(spotify_token))
            .route("/v1/artists/{id}/albums", get(spotify_artist_albums))
            .route("/v1/albums/{id}", get(spotify_album))
            .route("/v1/tracks/{id}", get(spotify_track))
            .route("/v1/playlists/{id}", get(spotify_playlist))
            .with_state(catalog.clone());
        Self {
            url: spawn(router).await,
            catalog,
        }
    }

    pub fn withhold_token(&self) {
        self.catalog.lock().unwrap().issue_token = false;
    }

    pub fn set_latest(&self, latest: Vec<Value>) {
        self.catalog.lock().unwrap().latest = latest;
    }

    pub fn set_followers(&self, id: &str, name: &str, followers: u64) {
        self.catalog
            .lock()
            .unwrap()
            .playlists
            .insert(id.to_string(), playlist(id, name, followers));
    }

    pub fn token_requests(&self) -> usize {
        self.catalog.lock().unwrap().token_requests
    }
}

type CatalogState = State<Arc<Mutex<Catalog>>>;

async fn spotify_token(State(catalog): CatalogState, headers: HeaderMap, body: String) -> Response {
    let mut catalog = catalog.lock().unwrap();
    catalog.token_requests += 1;

    let basic_auth = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("Basic "));
    if !basic_auth || body != "grant_type=client_credentials" {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "invalid_client"}))).into_response();
    }

    if catalog.issue_token {
        Json(json!({"access_token": TOKEN, "token_type": "Bearer", "expires_in": 3600})).into_response()
    } else {
        Json(json!({"token_type": "Bearer"})).into_response()
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        == Some(&format!("Bearer {TOKEN}")[..])
}

async fn spotify_artist_albums(
    State(catalog): CatalogState,
    UrlPath(_artist_id): UrlPath<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let mut catalog = catalog.lock().unwrap();
    catalog.album_listing_queries.push(query);
    Json(json!({"items": catalog.latest.clone(), "limit": 1, "total": catalog.latest.len()}))
        .into_response()
}

fn lookup(entry: Option<&Value>, headers: &HeaderMap) -> Response {
    if !authorized(headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    match entry {
        Some(value) => Json(value.clone()).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": {"status": 404, "message": "Resource not found"}})),
        )
            .into_response(),
    }
}

async fn spotify_album(
    State(catalog): CatalogState,
    UrlPath(id): UrlPath<String>,
    headers: HeaderMap,
) -> Response {
    let catalog = catalog.lock().unwrap();
    lookup(catalog.albums.get(&id), &headers)
}

async fn spotify_track(
    State(catalog): CatalogState,
    UrlPath(id): UrlPath<String>,
    headers: HeaderMap,
) -> Response {
    let catalog = catalog.lock().unwrap();
    lookup(catalog.tracks.get(&id), &headers)
}

async fn spotify_playlist(
    State(catalog): CatalogState,
    UrlPath(id): UrlPath<String>,
    headers: HeaderMap,
) -> Response {
    let catalog = catalog.lock().unwrap();
    lookup(catalog.playlists.get(&id), &headers)
}

// ---------- Discord ----------

#[derive(Default)]
pub struct DiscordLog {
    pub status: Option<StatusCode>,
    pub posts: Vec<Value>,
}

#[derive(Clone)]
pub struct FakeDiscord {
    pub url: String,
    pub log: Arc<Mutex<DiscordLog>>,
}

impl FakeDiscord {
    pub async fn start() -> Self {
        let log = Arc::new(Mutex::new(DiscordLog::default()));
        let router = Router::new()
            .route("/webhook", post(discord_webhook))
            .with_state(log.clone());
        let base = spawn(router).await;
        Self {
            url: format!("{base}/webhook"),
            log,
        }
    }

    pub fn fail_with(&self, status: StatusCode) {
        self.log.lock().unwrap().status = Some(status);
    }

    pub fn recover(&self) {
        self.log.lock().unwrap().status = None;
    }

    pub fn posts(&self) -> Vec<Value> {
        self.log.lock().unwrap().posts.clone()
    }
}

async fn discord_webhook(
    State(log): State<Arc<Mutex<DiscordLog>>>,
    Json(body): Json<Value>,
) -> Response {
    let mut log = log.lock().unwrap();
    log.posts.push(body);
    match log.status {
        Some(status) => (status, "webhook unavailable").into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

// ---------- Telegram ----------

#[derive(Default)]
pub struct TelegramLog {
    pub pending: Vec<Value>,
    pub calls: Vec<(String, Value)>,
}

#[derive(Clone)]
pub struct FakeTelegram {
    pub url: String,
    pub log: Arc<Mutex<TelegramLog>>,
}

impl FakeTelegram {
    pub async fn start() -> Self {
        let log = Arc::new(Mutex::new(TelegramLog::default()));
        let router = Router::new()
            .route("/{bot}/{method}", post(telegram_method))
            .with_state(log.clone());
        Self {
            url: spawn(router).await,
            log,
        }
    }

    pub fn push_text(&self, update_id: i64, chat_id: i64, text: &str) {
        self.log.lock().unwrap().pending.push(json!({
            "update_id": update_id,
            "message": {
                "message_id": update_id,
                "chat": {"id": chat_id, "type": "private"},
                "text": text
            }
        }));
    }

    /// Calls other than `getUpdates`.
    pub fn sent(&self) -> Vec<(String, Value)> {
        self.log
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|(method, _)| method != "getUpdates")
            .cloned()
            .collect()
    }

    pub fn get_updates_bodies(&self) -> Vec<Value> {
        self.log
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|(method, _)| method == "getUpdates")
            .map(|(_, body)| body.clone())
            .collect()
    }
}

async fn telegram_method(
    State(log): State<Arc<Mutex<TelegramLog>>>,
    UrlPath((bot, method)): UrlPath<(String, String)>,
    Json(body): Json<Value>,
) -> Response {
    if bot != "bot123:abc" {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"ok": false, "error_code": 401, "description": "Unauthorized"})),
        )
            .into_response();
    }

    let mut log = log.lock().unwrap();
    log.calls.push((method.clone(), body.clone()));

    match method.as_str() {
        "getUpdates" => {
            let offset = body.get("offset").and_then(Value::as_i64).unwrap_or(0);
            let updates: Vec<Value> = log
                .pending
                .iter()
                .filter(|update| update["update_id"].as_i64().unwrap_or(0) >= offset)
                .cloned()
                .collect();
            Json(json!({"ok": true, "result": updates})).into_response()
        }
        "sendMessage" | "sendPhoto" => Json(json!({
            "ok": true,
            "result": {"message_id": log.calls.len(), "chat": {"id": OWNER_CHAT}, "text": body["text"]}
        }))
        .into_response(),
        _ => Json(json!({"ok": false, "description": "Not Found"})).into_response(),
    }
}

// ---------- wiring ----------

pub struct Fakes {
    pub spotify: FakeSpotify,
    pub discord: FakeDiscord,
    pub telegram: FakeTelegram,
}

impl Fakes {
    pub async fn start(catalog: Catalog) -> Self {
        Self {
            spotify: FakeSpotify::start(catalog).await,
            discord: FakeDiscord::start().await,
            telegram: FakeTelegram::start().await,
        }
    }

    pub fn context(&self, state_file: &Path, extra: &[(&str, &str)]) -> AppContext {
        let mut vars: Vec<(String, String)> = vec![
            ("SPOTIFY_CLIENT_ID".into(), "client-id".into()),
            ("SPOTIFY_CLIENT_SECRET".into(), "client-secret".into()),
            ("SPOTIFY_ACCOUNTS_URL".into(), self.spotify.url.clone()),
            ("SPOTIFY_API_URL".into(), self.spotify.url.clone()),
            ("DISCORD_WEBHOOK_URL".into(), self.discord.url.clone()),
            ("DISCORD_ROLE_ID".into(), "1342206955745317005".into()),
            ("TELEGRAM_API_URL".into(), self.telegram.url.clone()),
            ("TELEGRAM_BOT_TOKEN".into(), "123:abc".into()),
            ("TELEGRAM_CHAT_ID".into(), OWNER_CHAT.to_string()),
            ("PROMO_CODE".into(), PROMO_CODE.into()),
            ("HTTP_TIMEOUT_SECS".into(), "5".into()),
            ("STATE_FILE".into(), state_file.display().to_string()),
        ];
        for (key, value) in extra {
            vars.retain(|(existing, _)| existing != key);
            vars.push((key.to_string(), value.to_string()));
        }

        let config = Config::from_vars(vars).expect("test config");
        AppContext::new(config).expect("test context")
    }
}
