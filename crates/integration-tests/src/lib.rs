//! Integration test harness for Runner Bids.
//!
//! Each [`TestContext`] starts two servers on ephemeral ports:
//!
//! - a stub bidding backend serving `GET /cities` and
//!   `POST /customers/create-bid` with canned replies, counting every call
//! - the real site router, configured to talk to the stub
//!
//! Tests then drive the site over HTTP with a cookie-aware client that does
//! not follow redirects.

#![allow(clippy::missing_panics_doc, clippy::expect_used)]

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};

use runner_bids_site::{app, config::SiteConfig, state::AppState};

/// Form fields of a bid that passes every client-side check.
pub const VALID_BID: [(&str, &str); 7] = [
    ("name", "Ada Obi"),
    ("email", "ada@example.com"),
    ("city", "Lagos"),
    ("delivery_address", "12 Marina Road"),
    ("price_willing_to_pay", "2500.50"),
    ("special_instructions", "Leave at the gate"),
    ("payment_type", "Credit Card"),
];

/// A copy of [`VALID_BID`] with one field replaced.
#[must_use]
pub fn bid_with(field: &str, value: &'static str) -> Vec<(&'static str, &'static str)> {
    VALID_BID
        .iter()
        .map(|&(name, current)| (name, if name == field { value } else { current }))
        .collect()
}

// =============================================================================
// Stub Backend
// =============================================================================

/// Canned reply for `POST /customers/create-bid`.
#[derive(Debug, Clone)]
pub enum CreateBidReply {
    /// Reply with a status and a JSON body.
    Json(u16, Value),
    /// Reply with a status and a non-JSON body.
    Text(u16, &'static str),
}

impl CreateBidReply {
    /// `201 Created` with the stored bid echoed back.
    #[must_use]
    pub fn created() -> Self {
        Self::Json(201, json!({ "message": "Bid created" }))
    }
}

/// Behaviour of the stub backend.
#[derive(Debug, Clone)]
pub struct StubOptions {
    /// City list for `GET /cities`; `None` answers 500.
    pub cities: Option<Vec<(&'static str, &'static str)>>,
    pub create_bid: CreateBidReply,
}

impl Default for StubOptions {
    fn default() -> Self {
        Self {
            cities: Some(vec![("c1", "Lagos"), ("c2", "Abuja"), ("c3", "Port Harcourt")]),
            create_bid: CreateBidReply::created(),
        }
    }
}

#[derive(Default)]
struct StubCounters {
    cities_calls: AtomicUsize,
    create_calls: AtomicUsize,
    last_bid: Mutex<Option<Value>>,
}

#[derive(Clone)]
struct StubState {
    options: Arc<StubOptions>,
    counters: Arc<StubCounters>,
}

async fn stub_cities(State(stub): State<StubState>) -> Response {
    stub.counters.cities_calls.fetch_add(1, Ordering::SeqCst);

    match &stub.options.cities {
        Some(cities) => {
            let data: Vec<Value> = cities
                .iter()
                .map(|(id, name)| json!({ "_id": id, "city_name": name }))
                .collect();
            Json(json!({ "data": data })).into_response()
        }
        None => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "database unavailable" })),
        )
            .into_response(),
    }
}

async fn stub_create_bid(State(stub): State<StubState>, Json(body): Json<Value>) -> Response {
    stub.counters.create_calls.fetch_add(1, Ordering::SeqCst);
    *stub.counters.last_bid.lock().expect("stub lock poisoned") = Some(body);

    let status = |code: u16| StatusCode::from_u16(code).expect("valid status code");
    match &stub.options.create_bid {
        CreateBidReply::Json(code, body) => (status(*code), Json(body.clone())).into_response(),
        CreateBidReply::Text(code, body) => (status(*code), *body).into_response(),
    }
}

/// Handle to a running stub backend.
pub struct StubBackend {
    pub addr: SocketAddr,
    counters: Arc<StubCounters>,
}

impl StubBackend {
    /// Start the stub on an ephemeral port.
    pub async fn start(options: StubOptions) -> Self {
        let counters = Arc::new(StubCounters::default());
        let state = StubState {
            options: Arc::new(options),
            counters: Arc::clone(&counters),
        };

        let router = Router::new()
            .route("/cities", get(stub_cities))
            .route("/customers/create-bid", post(stub_create_bid))
            .with_state(state);

        let addr = serve(router.into_make_service_with_connect_info::<SocketAddr>()).await;
        Self { addr, counters }
    }

    /// Number of `GET /cities` calls received.
    #[must_use]
    pub fn cities_calls(&self) -> usize {
        self.counters.cities_calls.load(Ordering::SeqCst)
    }

    /// Number of `POST /customers/create-bid` calls received.
    #[must_use]
    pub fn create_calls(&self) -> usize {
        self.counters.create_calls.load(Ordering::SeqCst)
    }

    /// JSON body of the most recent bid submission.
    #[must_use]
    pub fn last_bid(&self) -> Option<Value> {
        self.counters
            .last_bid
            .lock()
            .expect("stub lock poisoned")
            .clone()
    }
}

async fn serve(
    service: axum::extract::connect_info::IntoMakeServiceWithConnectInfo<Router, SocketAddr>,
) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, service).await.expect("test server");
    });

    addr
}

// =============================================================================
// Test Context
// =============================================================================

/// Backend URL on a privileged port nothing listens on; connections are refused.
pub const UNREACHABLE_BACKEND_URL: &str = "http://127.0.0.1:1";

/// A running site wired to a stub backend.
pub struct TestContext {
    pub client: reqwest::Client,
    pub site_url: String,
    pub backend: StubBackend,
    next_client_ip: AtomicU8,
}

impl TestContext {
    /// Start the stub backend and the site.
    pub async fn start(options: StubOptions) -> Self {
        let backend = StubBackend::start(options).await;
        let backend_url = format!("http://{}", backend.addr);
        Self::start_site(backend, &backend_url).await
    }

    /// Start the site pointed at a port nothing listens on.
    ///
    /// The stub still runs so its counters can show it was never called.
    pub async fn with_unreachable_backend() -> Self {
        let backend = StubBackend::start(StubOptions::default()).await;
        Self::start_site(backend, UNREACHABLE_BACKEND_URL).await
    }

    async fn start_site(backend: StubBackend, backend_url: &str) -> Self {
        let config = SiteConfig::from_lookup(|key| match key {
            "SITE_BASE_URL" => Some("http://127.0.0.1".to_string()),
            "BID_API_BASE_URL" => Some(backend_url.to_string()),
            "BID_API_TIMEOUT_SECS" => Some("5".to_string()),
            _ => None,
        })
        .expect("test config");

        let state = AppState::new(config).expect("app state");
        let addr = serve(app(state).into_make_service_with_connect_info::<SocketAddr>()).await;

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("http client");

        Self {
            client,
            site_url: format!("http://{addr}"),
            backend,
            next_client_ip: AtomicU8::new(1),
        }
    }

    /// Start with the default stub behaviour.
    pub async fn with_defaults() -> Self {
        Self::start(StubOptions::default()).await
    }

    /// Absolute URL of a site path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.site_url)
    }

    /// GET a site path.
    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request")
    }

    /// POST the bid form.
    ///
    /// Each call claims a distinct forwarded client address so submissions
    /// within one test stay clear of the per-IP rate limit.
    pub async fn post_bid(&self, fields: &[(&str, &str)]) -> reqwest::Response {
        let octet = self.next_client_ip.fetch_add(1, Ordering::SeqCst);

        self.client
            .post(self.url("/bids"))
            .header("x-forwarded-for", format!("10.0.0.{octet}"))
            .form(fields)
            .send()
            .await
            .expect("POST request")
    }
}
