//! The SVG endpoints and the route table that serves them.

use std::borrow::Cow;

use ic_http_certification::{HttpResponse, Method, StatusCode};

use crate::context::RouteContext;
use crate::render::{render_edge, render_hello};
use crate::router::RouteNode;
use crate::window::compute_window;

/// Path of the windowed card.
pub const DYNAMIC_SVG_PATH: &str = "/api/dynamic-svg";
/// Path of the plain card.
pub const HELLO_SVG_PATH: &str = "/api/hello-svg";

/// GET /api/dynamic-svg — card with the current rotation window.
///
/// Query parameters: `title`, `subtitle`, `period` (hours, default 4).
pub fn dynamic_svg(ctx: RouteContext) -> HttpResponse<'static> {
    let defaults = &ctx.config.edge;
    let window = compute_window(ctx.now, ctx.period());
    debug_log!(
        "dynamic_svg: period={} window={} start={}",
        window.period,
        window.index,
        window.start
    );
    let svg = render_edge(
        ctx.param_or("title", &defaults.title),
        ctx.param_or("subtitle", &defaults.subtitle),
        &window,
    );
    svg_response(&ctx, svg)
}

/// GET /api/hello-svg — card with title and subtitle only.
///
/// Query parameters: `title`, `subtitle`. `period` is ignored.
pub fn hello_svg(ctx: RouteContext) -> HttpResponse<'static> {
    let defaults = &ctx.config.hello;
    let svg = render_hello(
        ctx.param_or("title", &defaults.title),
        ctx.param_or("subtitle", &defaults.subtitle),
    );
    svg_response(&ctx, svg)
}

/// Wrap rendered markup in a 200 response with the configured headers.
///
/// HEAD requests get the same headers and an empty body.
fn svg_response(ctx: &RouteContext, svg: String) -> HttpResponse<'static> {
    let body = if ctx.method == Method::HEAD {
        Vec::new()
    } else {
        svg.into_bytes()
    };
    HttpResponse::builder()
        .with_status_code(StatusCode::OK)
        .with_headers(ctx.config.response_headers())
        .with_body(Cow::<[u8]>::Owned(body))
        .build()
}

/// Build the route table served by the canister.
pub fn route_tree() -> RouteNode {
    let mut root = RouteNode::new("");
    for method in [Method::GET, Method::HEAD] {
        root.insert(DYNAMIC_SVG_PATH, method.clone(), dynamic_svg);
        root.insert(HELLO_SVG_PATH, method, hello_svg);
    }
    root
}
