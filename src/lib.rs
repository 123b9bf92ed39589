//! Serve dynamic SVG cards from an Internet Computer canister. Each request
//! renders a fresh image from its query string and the current time, and
//! the response tells browsers and proxies never to keep a copy, so an
//! `<img>` tag pointing at the canister always shows live content.
//!
//! # Endpoints
//!
//! - **`/api/dynamic-svg`** — title, subtitle and the current rotation
//!   window. `?period=N` sets the window width in hours (default 4); the
//!   card shows the window index and when the next window begins. See
//!   [`window::compute_window`].
//! - **`/api/hello-svg`** — title and subtitle only.
//!
//! Both accept `title` and `subtitle` query parameters. Missing or
//! malformed parameters fall back to defaults; the cards always answer
//! `200 OK` with `content-type: image/svg+xml; charset=utf-8` and
//! `cache-control: no-store, max-age=0, must-revalidate`.
//!
//! # Certification
//!
//! Responses are produced on every query call and served with a
//! skip-certification proof. See [`certification`].
//!
//! # Quick Start
//!
//! ```rust,ignore
//! // src/lib.rs of the canister
//! use ic_cdk::{init, post_upgrade, query};
//! use ic_http_certification::{HttpRequest, HttpResponse};
//!
//! #[init]
//! fn init() {
//!     ic_dynamic_svg::setup(ic_dynamic_svg::SvgConfig::default());
//! }
//!
//! #[post_upgrade]
//! fn post_upgrade() {
//!     init();
//! }
//!
//! #[query]
//! fn http_request(req: HttpRequest) -> HttpResponse<'static> {
//!     ic_dynamic_svg::http_request(req)
//! }
//! ```
//!
//! Outside a canister, [`serve`] runs the same pipeline with an explicit
//! clock and configuration.

/// Debug logging macro gated behind the `debug-logging` feature flag.
/// When enabled, expands to `ic_cdk::println!`; otherwise compiles to nothing.
#[cfg(feature = "debug-logging")]
macro_rules! debug_log {
    ($($arg:tt)*) => { ic_cdk::println!($($arg)*) };
}

#[cfg(not(feature = "debug-logging"))]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

use std::{borrow::Cow, cell::RefCell};

use chrono::{DateTime, Utc};
use ic_cdk::api::{certified_data_set, data_certificate};
use ic_http_certification::{HttpCertificationTree, HttpRequest, HttpResponse, Method, StatusCode};

use certification::CertificationError;
use router::{RouteNode, RouteResult};

/// Skip-certification proofs for uncached responses.
pub mod certification;
/// Global configuration types: card defaults, cache control, security headers.
pub mod config;
/// Request context passed to handlers and query-string helpers.
pub mod context;
/// SVG markup for both cards.
pub mod render;
/// Route trie, handler types, and dispatch logic.
pub mod router;
/// The SVG handlers and the route table.
pub mod routes;
/// Epoch-aligned time windows.
pub mod window;

pub use config::{CardDefaults, SecurityHeaders, SvgConfig};
pub use context::{parse_period, parse_query, QueryParams, RouteContext};
pub use window::{compute_window, Period, Window};

thread_local! {
    static HTTP_TREE: RefCell<HttpCertificationTree> = RefCell::new(HttpCertificationTree::default());
    static CONFIG: RefCell<SvgConfig> = RefCell::new(SvgConfig::default());
    static ROUTES: RouteNode = routes::route_tree();
}

/// Build a 405 Method Not Allowed response with an `Allow` header listing the
/// permitted methods for the requested path.
fn method_not_allowed(allowed: &[Method]) -> HttpResponse<'static> {
    let allow = allowed
        .iter()
        .map(|m| m.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    HttpResponse::builder()
        .with_status_code(StatusCode::METHOD_NOT_ALLOWED)
        .with_headers(vec![
            ("allow".to_string(), allow),
            ("content-type".to_string(), "text/plain".to_string()),
        ])
        .with_body(Cow::<[u8]>::Owned(b"Method Not Allowed".to_vec()))
        .build()
}

/// Build a plain-text error response for the given HTTP status code and message.
///
/// This avoids canister traps by returning a well-formed HTTP response instead
/// of panicking on malformed input or missing internal state.
fn error_response(status: u16, message: &str) -> HttpResponse<'static> {
    HttpResponse::builder()
        .with_status_code(StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR))
        .with_headers(vec![("content-type".to_string(), "text/plain".to_string())])
        .with_body(Cow::<[u8]>::Owned(message.as_bytes().to_vec()))
        .build()
}

/// Install the global configuration and publish the certification root.
///
/// Call this from the canister's `init` and `post_upgrade` hooks.
pub fn setup(config: SvgConfig) {
    CONFIG.with(|c| {
        *c.borrow_mut() = config;
    });
    HTTP_TREE.with(|tree| {
        let mut tree = tree.borrow_mut();
        certification::insert_skip_certification(&mut tree);
        certified_data_set(tree.root_hash());
    });
    debug_log!("setup: skip certification published");
}

/// A copy of the active configuration.
pub fn config() -> SvgConfig {
    CONFIG.with(|c| c.borrow().clone())
}

/// Route `req` and run its handler at instant `now`.
///
/// Pure with respect to the IC runtime: no system API is called, so this
/// is the entry point for tests and non-canister hosts.
///
/// - malformed URL: `400`
/// - unknown path: `404`
/// - known path, unregistered method: `405` with an `allow` header
pub fn serve(
    req: &HttpRequest,
    routes: &RouteNode,
    now: DateTime<Utc>,
    config: &SvgConfig,
) -> HttpResponse<'static> {
    match req.get_path() {
        Ok(path) => dispatch(req, &path, routes, now, config),
        Err(_) => error_response(400, "Bad Request: malformed URL"),
    }
}

/// Resolve an already-decoded `path` and run the matching handler.
fn dispatch(
    req: &HttpRequest,
    path: &str,
    routes: &RouteNode,
    now: DateTime<Utc>,
    config: &SvgConfig,
) -> HttpResponse<'static> {
    match routes.resolve(path, req.method()) {
        RouteResult::Found(handler) => handler(RouteContext {
            query: parse_query(req.url()),
            method: req.method().clone(),
            now,
            config: config.clone(),
        }),
        RouteResult::MethodNotAllowed(allowed) => method_not_allowed(&allowed),
        RouteResult::NotFound => {
            debug_log!("dispatch: no route for {}", path);
            HttpResponse::not_found(
                b"Not Found",
                vec![("content-type".into(), "text/plain".into())],
            )
            .build()
        }
    }
}

/// Handle an HTTP query-path request.
///
/// This is the IC `http_request` entry point. It reads the IC clock, routes
/// the request with the global configuration the same way [`serve`] does,
/// and attaches the skip-certification proof. Every response is generated
/// on the spot; no request is ever upgraded to an update call.
pub fn http_request(req: HttpRequest) -> HttpResponse<'static> {
    debug_log!("http_request: {:?}", req.url());

    let path = match req.get_path() {
        Ok(p) => p,
        Err(_) => return error_response(400, "Bad Request: malformed URL"),
    };

    let now = window::instant_from_nanos(ic_cdk::api::time());
    let mut response = CONFIG.with_borrow(|config| {
        ROUTES.with(|routes| dispatch(&req, &path, routes, now, config))
    });

    let certified = HTTP_TREE.with_borrow(|tree| {
        let cert = data_certificate().ok_or(CertificationError::NoDataCertificate)?;
        certification::attach_skip_certificate(tree, &cert, &path, &mut response)
    });

    match certified {
        Ok(()) => response,
        Err(err) => {
            debug_log!("http_request: certification failed for {}: {}", path, err);
            error_response(500, &format!("Internal Server Error: {err}"))
        }
    }
}
