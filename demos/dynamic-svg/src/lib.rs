use ic_cdk::{init, post_upgrade, query};
use ic_dynamic_svg::{SecurityHeaders, SvgConfig};
use ic_http_certification::{HttpRequest, HttpResponse};

// ---------------------------------------------------------------------------
// Canister lifecycle
// ---------------------------------------------------------------------------

fn setup() {
    ic_dynamic_svg::setup(SvgConfig {
        // Cards are meant to be embedded from other origins (READMEs, status
        // pages), so keep cross-origin embedding open.
        security_headers: SecurityHeaders::permissive(),
        custom_headers: vec![("x-robots-tag".to_string(), "noindex".to_string())],
        ..SvgConfig::default()
    });
}

#[init]
fn init() {
    setup();
}

#[post_upgrade]
fn post_upgrade() {
    setup();
}

// ---------------------------------------------------------------------------
// HTTP interface
// ---------------------------------------------------------------------------

#[query]
fn http_request(req: HttpRequest) -> HttpResponse<'static> {
    ic_dynamic_svg::http_request(req)
}
