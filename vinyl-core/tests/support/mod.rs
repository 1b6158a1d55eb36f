use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::Router;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use vinyl_core::DiscogsClient;

/// Initialize tracing for tests with proper test output handling
#[allow(dead_code)]
pub fn tracing_init() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_line_number(true)
        .with_target(false)
        .with_file(true)
        .try_init();
}

/// Canned responses for the two catalog endpoints, plus what each one saw.
#[derive(Default)]
pub struct StubCatalog {
    pub search_status: u16,
    pub search_body: String,
    pub master_status: u16,
    pub master_body: String,
    pub search_hits: AtomicUsize,
    pub master_hits: AtomicUsize,
    pub search_queries: Mutex<Vec<HashMap<String, String>>>,
    pub search_auth_headers: Mutex<Vec<Option<String>>>,
    pub master_requests: Mutex<Vec<(u64, Option<String>, HashMap<String, String>)>>,
}

#[allow(dead_code)]
impl StubCatalog {
    pub fn new(search_status: u16, search_body: &str) -> Self {
        Self {
            search_status,
            search_body: search_body.to_string(),
            master_status: 404,
            master_body: r#"{"message": "Master not found."}"#.to_string(),
            ..Default::default()
        }
    }

    pub fn with_master(mut self, status: u16, body: &str) -> Self {
        self.master_status = status;
        self.master_body = body.to_string();
        self
    }

    pub fn search_hits(&self) -> usize {
        self.search_hits.load(Ordering::SeqCst)
    }

    pub fn master_hits(&self) -> usize {
        self.master_hits.load(Ordering::SeqCst)
    }

    pub fn last_search_query(&self) -> HashMap<String, String> {
        self.search_queries
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no search request recorded")
    }
}

fn status(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap()
}

fn authorization(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

async fn search(
    State(stub): State<Arc<StubCatalog>>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> (StatusCode, String) {
    stub.search_hits.fetch_add(1, Ordering::SeqCst);
    stub.search_queries.lock().unwrap().push(params);
    stub.search_auth_headers
        .lock()
        .unwrap()
        .push(authorization(&headers));
    (status(stub.search_status), stub.search_body.clone())
}

async fn master(
    State(stub): State<Arc<StubCatalog>>,
    Path(id): Path<u64>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> (StatusCode, String) {
    stub.master_hits.fetch_add(1, Ordering::SeqCst);
    stub.master_requests
        .lock()
        .unwrap()
        .push((id, authorization(&headers), params));
    (status(stub.master_status), stub.master_body.clone())
}

/// Serve the stub on an ephemeral port and return a client pointed at it.
pub async fn serve(stub: StubCatalog) -> (DiscogsClient, Arc<StubCatalog>) {
    let stub = Arc::new(stub);
    let app = Router::new()
        .route("/database/search", get(search))
        .route("/masters/:id", get(master))
        .with_state(stub.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr: SocketAddr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve stub") });

    let client = DiscogsClient::with_base_url(format!("http://{}", addr), "vinyl-notes-test/1.0");
    (client, stub)
}

/// A base URL nothing is listening on.
#[allow(dead_code)]
pub async fn closed_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}", addr)
}

#[allow(dead_code)]
pub fn search_body(results: &[serde_json::Value]) -> String {
    serde_json::json!({
        "pagination": {"page": 1, "pages": 1, "per_page": 50, "items": results.len()},
        "results": results,
    })
    .to_string()
}
