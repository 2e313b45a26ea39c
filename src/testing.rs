//! In-process HTTP fixtures: a fake quote source and a destination that
//! records what it was sent.

use crate::config::RuntimeConfig;
use axum::{
    extract::{RawQuery, State},
    http::{header, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use std::{
    net::SocketAddr,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};
use tokio::{net::TcpListener, sync::Mutex};
use url::Url;

pub fn test_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

pub fn test_config(source: &Url, destination: &Url) -> RuntimeConfig {
    RuntimeConfig {
        source_url: source.clone(),
        destination_url: destination.clone(),
        interval: Duration::from_secs(60),
        connect_timeout: Duration::from_secs(2),
        request_timeout: Duration::from_secs(5),
        max_body_bytes: 64 * 1024,
        exit_on_error: true,
    }
}

async fn serve(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

pub struct Source {
    pub url: Url,
    hits: Arc<AtomicUsize>,
}

impl Source {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Serves `body` with `status` on every GET of `/wp-json/posts`.
pub async fn spawn_source(status: u16, body: &str) -> Source {
    source_with_delay(status, body, Duration::ZERO).await
}

/// Like `spawn_source` with a 200, but each response is held back by `delay`.
pub async fn spawn_slow_source(body: &str, delay: Duration) -> Source {
    source_with_delay(200, body, delay).await
}

async fn source_with_delay(status: u16, body: &str, delay: Duration) -> Source {
    let status = StatusCode::from_u16(status).unwrap();
    let body = body.to_string();
    let hits = Arc::new(AtomicUsize::new(0));

    let counter = hits.clone();
    let router = Router::new().route(
        "/wp-json/posts",
        get(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            let body = body.clone();
            async move {
                tokio::time::sleep(delay).await;
                (status, [(header::CONTENT_TYPE, "application/json")], body)
            }
        }),
    );

    let addr = serve(router).await;
    let url = format!("http://{addr}/wp-json/posts?filter[orderby]=rand");
    Source {
        url: Url::parse(&url).unwrap(),
        hits,
    }
}

#[derive(Debug, Clone)]
pub struct ReceivedPost {
    pub raw_query: String,
    pub body: Value,
}

type Received = Arc<Mutex<Vec<ReceivedPost>>>;

pub struct Destination {
    pub url: Url,
    posts: Received,
}

impl Destination {
    pub async fn received(&self) -> Vec<ReceivedPost> {
        self.posts.lock().await.clone()
    }
}

/// Records every `POST /api/post` and answers with `status`.
pub async fn spawn_destination(status: u16) -> Destination {
    let status = StatusCode::from_u16(status).unwrap();
    let posts: Received = Arc::new(Mutex::new(Vec::new()));

    let router = Router::new()
        .route(
            "/api/post",
            post(
                move |State(posts): State<Received>,
                      RawQuery(query): RawQuery,
                      Json(body): Json<Value>| async move {
                    posts.lock().await.push(ReceivedPost {
                        raw_query: query.unwrap_or_default(),
                        body,
                    });
                    status
                },
            ),
        )
        .with_state(posts.clone());

    let addr = serve(router).await;
    Destination {
        url: Url::parse(&format!("http://{addr}/api/post")).unwrap(),
        posts,
    }
}

/// A loopback URL nothing is listening on.
pub async fn closed_port_url() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{addr}/wp-json/posts")).unwrap()
}
