//! In-process fakes of the trace.moe and AniList HTTP APIs.
//!
//! Each fake binds an ephemeral port on 127.0.0.1, records what it
//! receives, and answers with a configurable status and JSON body.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// A request as seen by the fake trace.moe.
#[derive(Debug, Clone, Default)]
pub struct CapturedSearch {
    pub method: &'static str,
    pub query: HashMap<String, String>,
    pub trace_key: Option<String>,
    /// Multipart field name, file name, content type and size.
    pub upload: Option<(String, Option<String>, Option<String>, usize)>,
}

#[derive(Default)]
struct TraceState {
    reply: Mutex<Option<(StatusCode, Value)>>,
    captured: Mutex<Vec<CapturedSearch>>,
}

/// Fake trace.moe `/search` endpoint.
pub struct FakeTraceMoe {
    addr: SocketAddr,
    state: Arc<TraceState>,
}

impl FakeTraceMoe {
    pub async fn start() -> Self {
        let state = Arc::new(TraceState::default());
        let app = Router::new()
            .route("/search", get(url_search).post(upload_search))
            .with_state(Arc::clone(&state));
        let addr = serve(app).await;
        Self { addr, state }
    }

    pub fn search_url(&self) -> String {
        format!("http://{}/search", self.addr)
    }

    /// Answer every request with this status and body.
    pub fn reply(&self, status: u16, body: Value) {
        let status = StatusCode::from_u16(status).unwrap();
        *self.state.reply.lock().unwrap() = Some((status, body));
    }

    pub fn captured(&self) -> Vec<CapturedSearch> {
        self.state.captured.lock().unwrap().clone()
    }
}

async fn url_search(
    State(state): State<Arc<TraceState>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    state.captured.lock().unwrap().push(CapturedSearch {
        method: "GET",
        query,
        trace_key: trace_key(&headers),
        upload: None,
    });
    current_reply(&state)
}

async fn upload_search(
    State(state): State<Arc<TraceState>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
    mut multipart: Multipart,
) -> (StatusCode, Json<Value>) {
    let mut upload = None;
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let size = field.bytes().await.map(|b| b.len()).unwrap_or(0);
        upload = Some((name, file_name, content_type, size));
    }

    state.captured.lock().unwrap().push(CapturedSearch {
        method: "POST",
        query,
        trace_key: trace_key(&headers),
        upload,
    });
    current_reply(&state)
}

fn trace_key(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-trace-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn current_reply(state: &TraceState) -> (StatusCode, Json<Value>) {
    let reply = state.reply.lock().unwrap().clone();
    let (status, body) = reply.unwrap_or((StatusCode::OK, json!({ "error": "", "result": [] })));
    (status, Json(body))
}

#[derive(Default)]
struct AniListState {
    media: Mutex<HashMap<u64, Value>>,
    status: Mutex<Option<StatusCode>>,
    requests: Mutex<Vec<Value>>,
}

/// Fake AniList GraphQL endpoint.
pub struct FakeAniList {
    addr: SocketAddr,
    state: Arc<AniListState>,
}

impl FakeAniList {
    pub async fn start() -> Self {
        let state = Arc::new(AniListState::default());
        let app = Router::new()
            .route("/", post(graphql))
            .with_state(Arc::clone(&state));
        let addr = serve(app).await;
        Self { addr, state }
    }

    pub fn endpoint(&self) -> String {
        format!("http://{}/", self.addr)
    }

    pub fn add_media(&self, id: u64, media: Value) {
        self.state.media.lock().unwrap().insert(id, media);
    }

    /// Fail every request with this status.
    pub fn fail_with(&self, status: u16) {
        *self.state.status.lock().unwrap() = Some(StatusCode::from_u16(status).unwrap());
    }

    /// Request bodies received so far.
    pub fn requests(&self) -> Vec<Value> {
        self.state.requests.lock().unwrap().clone()
    }
}

async fn graphql(
    State(state): State<Arc<AniListState>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.requests.lock().unwrap().push(body.clone());

    if let Some(status) = *state.status.lock().unwrap() {
        return (status, Json(json!({ "errors": [{ "message": "failure" }] })));
    }

    let id = body["variables"]["id"].as_u64().unwrap_or_default();
    let media = state.media.lock().unwrap().get(&id).cloned();
    match media {
        Some(media) => (StatusCode::OK, Json(json!({ "data": { "Media": media } }))),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "data": { "Media": null },
                "errors": [{ "message": "Not Found.", "status": 404 }]
            })),
        ),
    }
}

async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// A trace.moe match as returned with `anilistInfo`.
pub fn trace_match(anilist_id: u64, filename: &str) -> Value {
    json!({
        "anilist": {
            "id": anilist_id,
            "idMal": anilist_id + 1000,
            "title": { "native": "カウボーイビバップ", "romaji": "Cowboy Bebop", "english": null },
            "synonyms": [],
            "isAdult": false
        },
        "filename": filename,
        "episode": 5,
        "from": 1020.5,
        "to": 1023.25,
        "similarity": 0.9612,
        "video": "https://media.trace.moe/video/1/clip.mp4?t=1021",
        "image": "https://media.trace.moe/image/1/frame.jpg?t=1021"
    })
}

/// An AniList `Media` object.
pub fn anilist_media(id: u64, english: &str) -> Value {
    json!({
        "id": id,
        "idMal": id + 1000,
        "title": { "english": english, "native": null, "romaji": "Kaubōi Bibappu" },
        "description": "In the year 2071, <i>bounty hunters</i> roam the solar system.<br><br>(Source: AniList)",
        "seasonYear": 1998,
        "coverImage": {
            "extraLarge": format!("https://s4.anilist.co/cover/{}-xl.jpg", id),
            "large": format!("https://s4.anilist.co/cover/{}-l.jpg", id),
            "medium": null
        },
        "bannerImage": null,
        "genres": ["Action", "Sci-Fi"],
        "externalLinks": null,
        "averageScore": 86,
        "siteUrl": format!("https://anilist.co/anime/{}", id),
        "episodes": 26
    })
}
