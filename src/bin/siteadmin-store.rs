#![allow(clippy::result_large_err)]

//! Development row store speaking the same REST and auth protocol the
//! console uses against a hosted store.

use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Json, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use siteadmin::store::MemoryStore;

#[path = "siteadmin_store/http_error.rs"]
mod http_error;
use self::http_error::*;
#[path = "siteadmin_store/access.rs"]
mod access;
use self::access::*;
#[path = "siteadmin_store/query.rs"]
mod query;
#[path = "siteadmin_store/handlers_rest.rs"]
mod handlers_rest;
#[path = "siteadmin_store/handlers_auth.rs"]
mod handlers_auth;
#[path = "siteadmin_store/routes.rs"]
mod routes;
#[path = "siteadmin_store/runtime.rs"]
mod runtime;

struct AppState {
    store: MemoryStore,
    /// Public key every request must present in the `apikey` header.
    anon_key: String,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    runtime::run().await
}
