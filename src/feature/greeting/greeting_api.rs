//! Implementation of the greeting API. An API that returns a greeting based on a query parameter.

use crate::{
    core::greeting::greeting_service,
    infra::{extract::Query, state::AppState},
};
use axum::{routing::get, Router};
use serde::Deserialize;
use std::fmt::Debug;
use tracing::instrument;
use utoipa::IntoParams;

/// The greeting API endpoints.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/greet", get(greet))
}

/// A name query parameter.
#[derive(Deserialize, IntoParams)]
pub struct GreetingParams {
    name: Option<String>,
}

impl GreetingParams {
    /// Constructs new greeting parameters.
    pub fn new(name: Option<String>) -> Self {
        Self { name }
    }
}

impl Debug for GreetingParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.name.fmt(f)
    }
}

/// A handler for requests to the root endpoint.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Success", body = String, content_type = "text/plain"),
    )
)]
#[instrument]
pub async fn index() -> String {
    greeting_service::index()
}

/// A handler for requests to the greet endpoint.
#[utoipa::path(
    get,
    path = "/greet",
    params(GreetingParams),
    responses(
        (status = 200, description = "Success", body = String, content_type = "text/plain"),
    )
)]
#[instrument]
pub async fn greet(Query(params): Query<GreetingParams>) -> String {
    greeting_service::greet(params.name.as_deref())
}

#[cfg(test)]
mod tests {
    use super::{greet, index, GreetingParams};
    use crate::infra::extract::Query;

    #[tokio::test]
    async fn index_returns_hello_world() {
        let response = index().await;
        assert_eq!("Hello, World!", response);
    }

    #[tokio::test]
    async fn greet_without_name_defaults_to_world() {
        let response = greet(Query(GreetingParams::new(None))).await;
        assert_eq!("Hello, World!", response);
    }

    #[tokio::test]
    async fn greet_with_empty_name_defaults_to_world() {
        let response = greet(Query(GreetingParams::new(Some(String::new())))).await;
        assert_eq!("Hello, World!", response);
    }

    #[tokio::test]
    async fn greet_with_name() {
        let response = greet(Query(GreetingParams::new(Some("NotWorld".to_string())))).await;
        assert_eq!("Hello, NotWorld!", response);
    }
}
