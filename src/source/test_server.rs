//! In-process provider stand-in for tests.

use axum::Router;
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// A base URL with nothing listening behind it.
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn status_json() -> Value {
    json!({
        "justified_slot": 1234,
        "finalized_slot": 1200,
        "last_updated_ms": 1_700_000_000_000u64,
        "last_success_ms": 1_700_000_000_000u64,
        "stale": false,
        "error_count": 0,
        "last_error": null
    })
}

pub fn upstreams_json() -> Value {
    json!({
        "upstreams": [
            {
                "name": "zeam_0",
                "url": "http://127.0.0.1:8081",
                "path": "/lean/v0/states/finalized",
                "healthy": true,
                "last_success_ms": 1_700_000_000_000u64,
                "error_count": 0,
                "last_error": null,
                "last_justified_slot": 64,
                "last_finalized_slot": 32
            },
            {
                "name": "ream_0",
                "url": "http://127.0.0.1:8082",
                "path": "/lean/v0/states/finalized",
                "healthy": false,
                "last_success_ms": null,
                "error_count": 3,
                "last_error": "connection refused",
                "last_justified_slot": null,
                "last_finalized_slot": null
            }
        ],
        "consensus": {
            "total_upstreams": 2,
            "responding_upstreams": 1,
            "consensus_threshold": 50,
            "has_consensus": true
        }
    })
}
