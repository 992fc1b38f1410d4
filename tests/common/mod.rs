#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use axum::{
    extract::{Path, Query, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use reelax_api::{
    error::{AppError, AppResult},
    models::{CandidateRecord, MediaType},
    services::{AssemblySettings, DiscoverQuery, MetadataProvider},
};

pub const STUB_KEY: &str = "stub-key";

pub fn settings() -> AssemblySettings {
    AssemblySettings {
        image_base: "https://image.tmdb.org/t/p/w300".to_string(),
        batch_size: 20,
    }
}

/// Serves `app` on an ephemeral local port and returns its origin
pub async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

pub fn candidate(id: u64, with_poster: bool) -> CandidateRecord {
    CandidateRecord {
        id,
        title: Some(format!("Movie {id}")),
        overview: Some(format!("Overview {id}")),
        poster_path: with_poster.then(|| format!("/{id}.jpg")),
        release_date: Some("2015-10-01".to_string()),
        vote_average: Some(6.5),
        popularity: Some(100.0 - id as f64),
        ..Default::default()
    }
}

// ============================================================================
// In-process fake provider
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub enum FailMode {
    #[default]
    Healthy,
    Status(u16),
    Malformed,
}

/// Provider double that records every call
#[derive(Default)]
pub struct FakeProvider {
    pub candidates: Vec<CandidateRecord>,
    /// Detail runtimes by id; ids missing here fail their detail lookup
    pub runtimes: HashMap<u64, u32>,
    pub fail: FailMode,
    pub discover_calls: AtomicUsize,
    pub detail_calls: AtomicUsize,
    pub last_query: Mutex<Option<DiscoverQuery>>,
}

impl FakeProvider {
    pub fn with_candidates(candidates: Vec<CandidateRecord>, runtimes: &[(u64, u32)]) -> Self {
        Self {
            candidates,
            runtimes: runtimes.iter().copied().collect(),
            ..Default::default()
        }
    }

    pub fn discover_calls(&self) -> usize {
        self.discover_calls.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl MetadataProvider for FakeProvider {
    async fn discover(&self, query: &DiscoverQuery) -> AppResult<Vec<CandidateRecord>> {
        self.discover_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some(query.clone());
        match self.fail {
            FailMode::Healthy => Ok(self.candidates.clone()),
            FailMode::Status(status) => Err(AppError::ProviderStatus(status)),
            FailMode::Malformed => Err(AppError::ProviderMalformedResponse(
                "No results from TMDB".to_string(),
            )),
        }
    }

    async fn details(&self, _media_type: MediaType, id: u64) -> AppResult<Value> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        match self.runtimes.get(&id) {
            Some(runtime) => Ok(json!({ "id": id, "runtime": runtime })),
            None => Err(AppError::ProviderStatus(404)),
        }
    }

    async fn search_person(&self, _name: &str) -> AppResult<Option<u64>> {
        Ok(None)
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

// ============================================================================
// Stub TMDB HTTP server
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StubMode {
    #[default]
    Healthy,
    DiscoverDown,
}

/// Minimal stand-in for the TMDB v3 API
#[derive(Default)]
pub struct StubTmdb {
    pub movies: Vec<Value>,
    pub shows: Vec<Value>,
    /// Detail runtimes by id, shared by movies and shows
    pub runtimes: HashMap<u64, u32>,
    /// Person search answers by exact name
    pub people: HashMap<String, u64>,
    pub mode: StubMode,
    pub discover_calls: AtomicUsize,
    pub detail_calls: AtomicUsize,
    pub person_calls: AtomicUsize,
    pub last_discover: Mutex<HashMap<String, String>>,
    pub last_discover_path: Mutex<String>,
    pub detail_paths: Mutex<Vec<String>>,
}

impl StubTmdb {
    pub fn total_calls(&self) -> usize {
        self.discover_calls.load(Ordering::SeqCst)
            + self.detail_calls.load(Ordering::SeqCst)
            + self.person_calls.load(Ordering::SeqCst)
    }
}

pub fn stub_movie(id: u64, with_poster: bool) -> Value {
    json!({
        "id": id,
        "title": format!("Stub Movie {id}"),
        "original_title": format!("Stub Movie {id}"),
        "overview": format!("Short overview {id}"),
        "poster_path": if with_poster { json!(format!("/stub{id}.jpg")) } else { Value::Null },
        "release_date": "2012-06-01",
        "vote_average": 7.1,
        "popularity": 50.0,
    })
}

/// TV discovery entry, using TMDB's series field names
pub fn stub_show(id: u64) -> Value {
    json!({
        "id": id,
        "name": format!("Stub Show {id}"),
        "original_name": format!("Stub Show {id}"),
        "overview": format!("Short overview {id}"),
        "poster_path": format!("/show{id}.jpg"),
        "first_air_date": "2019-09-20",
        "vote_average": 8.0,
        "popularity": 40.0,
    })
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "status_code": 7, "status_message": "Invalid API key" })),
    )
        .into_response()
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "status_code": 34, "status_message": "not found" })),
    )
        .into_response()
}

fn authorized(params: &HashMap<String, String>) -> bool {
    params.get("api_key").map(String::as_str) == Some(STUB_KEY)
}

async fn stub_discover(
    State(stub): State<Arc<StubTmdb>>,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    stub.discover_calls.fetch_add(1, Ordering::SeqCst);
    if !authorized(&params) {
        return unauthorized();
    }
    *stub.last_discover.lock().unwrap() = params;
    *stub.last_discover_path.lock().unwrap() = uri.path().to_string();

    let results = if uri.path().ends_with("/tv") {
        &stub.shows
    } else {
        &stub.movies
    };

    match stub.mode {
        StubMode::Healthy => Json(json!({ "page": 1, "results": results })).into_response(),
        StubMode::DiscoverDown => StatusCode::SERVICE_UNAVAILABLE.into_response(),
    }
}

async fn stub_details(
    State(stub): State<Arc<StubTmdb>>,
    uri: Uri,
    Path(id): Path<u64>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    stub.detail_calls.fetch_add(1, Ordering::SeqCst);
    if !authorized(&params) {
        return unauthorized();
    }
    stub.detail_paths.lock().unwrap().push(uri.path().to_string());

    let Some(runtime) = stub.runtimes.get(&id) else {
        return not_found();
    };

    let body = if uri.path().starts_with("/3/tv/") {
        json!({
            "id": id,
            "name": format!("Stub Show {id}"),
            "episode_run_time": [runtime],
            "overview": format!("Full synopsis {id}"),
        })
    } else {
        json!({
            "id": id,
            "title": format!("Stub Movie {id}"),
            "runtime": runtime,
            "overview": format!("Full synopsis {id}"),
        })
    };
    Json(body).into_response()
}

async fn stub_search_person(
    State(stub): State<Arc<StubTmdb>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    stub.person_calls.fetch_add(1, Ordering::SeqCst);
    if !authorized(&params) {
        return unauthorized();
    }

    let results: Vec<Value> = params
        .get("query")
        .and_then(|name| stub.people.get(name).map(|id| (name, id)))
        .map(|(name, id)| json!({ "id": id, "name": name }))
        .into_iter()
        .collect();

    Json(json!({ "page": 1, "results": results })).into_response()
}

/// Starts the stub and returns its API base (origin plus `/3`)
pub async fn spawn_stub_tmdb(stub: Arc<StubTmdb>) -> String {
    let app = Router::new()
        .route("/3/discover/movie", get(stub_discover))
        .route("/3/discover/tv", get(stub_discover))
        .route("/3/movie/:id", get(stub_details))
        .route("/3/tv/:id", get(stub_details))
        .route("/3/search/person", get(stub_search_person))
        .with_state(stub);
    format!("{}/3", spawn(app).await)
}
