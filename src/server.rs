//! Server construction and startup.
//!
//! # Examples
//!
//! Greeting API.
//!
//! ```rust
//! # tokio_test::block_on(async {
//! # let url = hello_service::server::spawn_app().await;
//! let response = reqwest::get(format!("{}/greet", url)).await.unwrap();
//! assert_eq!(200, response.status());
//! assert_eq!("Hello, World!", response.text().await.unwrap());
//! # });
//! ```
//!
//! Greeting API with name.
//!
//! ```rust
//! # tokio_test::block_on(async {
//! # let url = hello_service::server::spawn_app().await;
//! let response = reqwest::get(format!("{}/greet?name=Foo", url)).await.unwrap();
//! assert_eq!(200, response.status());
//! assert_eq!("Hello, Foo!", response.text().await.unwrap());
//! # });
//! ```

use crate::feature::greeting::greeting_api;
use crate::infra::middleware::{log_request_response, MakeRequestIdSpan};
use crate::infra::openapi::ApiDoc;
use crate::infra::{
    config::Config,
    error::{InternalError, PanicHandler},
    state::AppState,
};
use axum::error_handling::HandleErrorLayer;
use axum::response::IntoResponse;
use axum::Router;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Constructs the full axum application.
pub fn app(state: AppState) -> Router {
    // Fallible middleware from tower, mapped to infallible response with [`HandleErrorLayer`].
    let tower_middleware = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(|e| async move {
            InternalError::Other(format!("Tower middleware failed: {e}")).into_response()
        }))
        .concurrency_limit(500);

    // The greeting API plus interactive documentation.
    Router::new()
        .merge(greeting_api::routes())
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/openapi.json", ApiDoc::openapi()))
        // Layers
        .layer(TimeoutLayer::new(Duration::from_secs(10)))
        .layer(axum::middleware::from_fn(log_request_response))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(MakeRequestIdSpan)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
                .on_failure(()),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(tower_middleware)
        .layer(CatchPanicLayer::custom(PanicHandler))
}

/// Starts the axum server.
pub async fn run_app(addr: TcpListener, config: Config) -> Result<(), hyper::Error> {
    let state = AppState::new(config);
    let app = app(state).into_make_service();

    tracing::info!("Starting axum on {}", addr.local_addr().unwrap());
    let exit_result = axum::serve(addr, app)
        .with_graceful_shutdown(crate::shutdown("axum"))
        .await;

    match exit_result {
        Ok(_) => tracing::info!("Successfully shut down"),
        Err(e) => tracing::error!("Shutdown failed: {}", e),
    }

    Ok(())
}

/// Spawn a server on a random port.
pub async fn spawn_app() -> String {
    let address = "127.0.0.1";
    let listener = TcpListener::bind(format!("{address}:0")).await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let config = crate::infra::config::load_config().unwrap();
    tokio::spawn(run_app(listener, config));
    format!("http://{address}:{port}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use http::{header::CONTENT_TYPE, Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_app() -> Router {
        let config = crate::infra::config::load_config().unwrap();
        app(AppState::new(config))
    }

    async fn body_text(res: axum::response::Response) -> String {
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn index_gives_hello_world() {
        let app = test_app();
        let req = Request::get("/").body(Body::empty()).unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(StatusCode::OK, res.status());
        assert_eq!(
            "text/plain; charset=utf-8",
            res.headers()[CONTENT_TYPE].to_str().unwrap()
        );
        assert_eq!("Hello, World!", body_text(res).await);
    }

    #[tokio::test]
    async fn greet_without_name_gives_hello_world() {
        let app = test_app();
        let req = Request::get("/greet").body(Body::empty()).unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(StatusCode::OK, res.status());
        assert_eq!("Hello, World!", body_text(res).await);
    }

    #[tokio::test]
    async fn greet_with_name_gives_personal_greeting() {
        let app = test_app();
        let req = Request::get("/greet?name=Bob").body(Body::empty()).unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(StatusCode::OK, res.status());
        assert_eq!(
            "text/plain; charset=utf-8",
            res.headers()[CONTENT_TYPE].to_str().unwrap()
        );
        assert_eq!("Hello, Bob!", body_text(res).await);
    }

    #[tokio::test]
    async fn greet_with_empty_name_gives_hello_world() {
        let app = test_app();
        let req = Request::get("/greet?name=").body(Body::empty()).unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(StatusCode::OK, res.status());
        assert_eq!("Hello, World!", body_text(res).await);
    }

    #[tokio::test]
    async fn greet_with_multi_word_name() {
        let app = test_app();
        let req = Request::get("/greet?name=Bob%20Smith")
            .body(Body::empty())
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(StatusCode::OK, res.status());
        assert_eq!("Hello, Bob Smith!", body_text(res).await);
    }

    #[tokio::test]
    async fn post_greet_is_method_not_allowed() {
        let app = test_app();
        let req = Request::post("/greet").body(Body::empty()).unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(StatusCode::METHOD_NOT_ALLOWED, res.status());
    }

    #[tokio::test]
    async fn unmapped_path_is_not_found() {
        let app = test_app();
        let req = Request::get("/invalid").body(Body::empty()).unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(StatusCode::NOT_FOUND, res.status());
    }

    #[tokio::test]
    async fn swagger_ui_oneshot() {
        let app = test_app();
        let req = Request::get("/swagger-ui/index.html")
            .body(Body::empty())
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(StatusCode::OK, res.status());
    }

    #[tokio::test]
    async fn greet_gives_correct_response() {
        let url = spawn_app().await;
        let response = reqwest::get(format!("{url}/greet?name=World")).await.unwrap();
        assert_eq!(200, response.status());
        assert_eq!("Hello, World!", response.text().await.unwrap());
    }

    #[tokio::test]
    async fn index_gives_correct_response() {
        let url = spawn_app().await;
        let response = reqwest::get(format!("{url}/")).await.unwrap();
        assert_eq!(200, response.status());
        assert_eq!("Hello, World!", response.text().await.unwrap());
    }
}
