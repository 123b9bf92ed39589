#[cfg(test)]
mod tests {
    use candid::Principal;
    use pocket_ic::PocketIc;
    use reqwest::blocking::{Client, Response};
    use std::time::Duration;

    /// Path to the pre-built demo canister WASM.
    /// The build_and_test.sh script compiles this before running the tests.
    const WASM_PATH: &str = concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../demos/dynamic-svg/target/wasm32-unknown-unknown/release/dynamic_svg.wasm"
    );

    /// Deploy the demo canister to a fresh PocketIC instance and start the HTTP gateway.
    /// Returns `(pic, client, gateway_url, canister_id)`.
    fn setup() -> (PocketIc, Client, String, Principal) {
        let mut pic = PocketIc::new();
        let canister_id = pic.create_canister();
        pic.add_cycles(canister_id, 2_000_000_000_000);

        let wasm = std::fs::read(WASM_PATH)
            .expect("demo canister WASM not found — run build_and_test.sh to compile it first");
        pic.install_canister(canister_id, wasm, vec![], None);

        let gateway_url = pic.make_live(None);
        let base = format!("http://localhost:{}", gateway_url.port().unwrap());

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap();

        // The HTTP gateway routes requests to the canister via the Host header
        // or the `canisterId` query parameter. We use the query parameter approach.
        let base_url = format!("{}/?canisterId={}", base, canister_id);

        (pic, client, base_url, canister_id)
    }

    /// Build a URL for a path (optionally with its own query) on the canister.
    /// The canisterId query param is appended for HTTP gateway routing.
    fn url_for(base: &str, path_and_query: &str) -> String {
        let (origin, canister) = base.split_once('?').unwrap_or((base, ""));
        let origin = origin.trim_end_matches('/');
        let (path, query) = path_and_query
            .split_once('?')
            .unwrap_or((path_and_query, ""));
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };
        let query = [query, canister]
            .into_iter()
            .filter(|q| !q.is_empty())
            .collect::<Vec<_>>()
            .join("&");
        if query.is_empty() {
            format!("{}{}", origin, path)
        } else {
            format!("{}{}?{}", origin, path, query)
        }
    }

    fn header(resp: &Response, name: &str) -> Option<String> {
        resp.headers()
            .get(name)
            .map(|v| v.to_str().unwrap().to_string())
    }

    /// Extract the number printed after `Window #` on the edge card.
    fn window_index(svg: &str) -> i64 {
        let rest = svg
            .split_once("Window #")
            .map(|(_, rest)| rest)
            .unwrap_or_else(|| panic!("no window index in body: {svg}"));
        let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
        digits.parse().unwrap()
    }

    // -----------------------------------------------------------------------
    // Response contract
    // -----------------------------------------------------------------------

    #[test]
    fn test_dynamic_svg_response_contract() {
        let (_pic, client, base_url, _cid) = setup();

        let resp = client
            .get(url_for(&base_url, "/api/dynamic-svg"))
            .send()
            .unwrap();
        assert_eq!(resp.status().as_u16(), 200, "GET /api/dynamic-svg should return 200");
        assert_eq!(
            header(&resp, "content-type").as_deref(),
            Some("image/svg+xml; charset=utf-8")
        );
        assert_eq!(
            header(&resp, "cache-control").as_deref(),
            Some("no-store, max-age=0, must-revalidate")
        );
        assert!(
            resp.headers().get("ic-certificate").is_some(),
            "IC-Certificate header missing on skip-certified response"
        );

        let body = resp.text().unwrap();
        assert!(body.starts_with("<svg"), "body should be an SVG document");
        assert!(body.contains("Dynamic SVG — Edge Runtime"));
        assert!(body.contains("Period: 4h"), "period should default to 4 hours");
    }

    #[test]
    fn test_hello_svg_response_contract() {
        let (_pic, client, base_url, _cid) = setup();

        let resp = client
            .get(url_for(&base_url, "/api/hello-svg?period=2"))
            .send()
            .unwrap();
        assert_eq!(resp.status().as_u16(), 200);
        assert_eq!(
            header(&resp, "cache-control").as_deref(),
            Some("no-store, max-age=0, must-revalidate")
        );

        let body = resp.text().unwrap();
        assert!(body.contains("Dynamic SVG — Hello"));
        assert!(!body.contains("Period:"), "hello card ignores period");
    }

    #[test]
    fn test_query_params_are_rendered_escaped() {
        let (_pic, client, base_url, _cid) = setup();

        let resp = client
            .get(url_for(
                &base_url,
                "/api/dynamic-svg?title=%3Cscript%3Ealert(1)%3C%2Fscript%3E&subtitle=A+%26+B&period=1",
            ))
            .send()
            .unwrap();
        assert_eq!(resp.status().as_u16(), 200);

        let body = resp.text().unwrap();
        assert!(!body.contains("<script>"), "title must not inject markup");
        assert!(body.contains("&lt;script&gt;"));
        assert!(body.contains("A &amp; B"));
        assert!(body.contains("Period: 1h"));
    }

    // -----------------------------------------------------------------------
    // Time windows
    // -----------------------------------------------------------------------

    #[test]
    fn test_window_index_advances_with_ic_time() {
        let (pic, client, base_url, _cid) = setup();
        let url = url_for(&base_url, "/api/dynamic-svg?period=4");

        let before = client.get(&url).send().unwrap().text().unwrap();

        pic.advance_time(Duration::from_secs(4 * 3600));
        pic.tick();

        let after = client.get(&url).send().unwrap().text().unwrap();
        assert_eq!(
            window_index(&after),
            window_index(&before) + 1,
            "advancing one period should move to the next window"
        );
    }

    #[test]
    fn test_responses_are_not_cached() {
        let (pic, client, base_url, _cid) = setup();
        let url = url_for(&base_url, "/api/dynamic-svg?period=1");

        let first = client.get(&url).send().unwrap().text().unwrap();

        pic.advance_time(Duration::from_secs(3600));
        pic.tick();

        let second = client.get(&url).send().unwrap().text().unwrap();
        assert_ne!(first, second, "each request must render a fresh card");
    }

    // -----------------------------------------------------------------------
    // Headers and routing
    // -----------------------------------------------------------------------

    #[test]
    fn test_security_and_custom_headers_present() {
        let (_pic, client, base_url, _cid) = setup();

        let resp = client
            .get(url_for(&base_url, "/api/dynamic-svg"))
            .send()
            .unwrap();
        assert_eq!(resp.status().as_u16(), 200);
        assert_eq!(
            header(&resp, "x-content-type-options").as_deref(),
            Some("nosniff")
        );
        assert_eq!(
            header(&resp, "cross-origin-resource-policy").as_deref(),
            Some("cross-origin")
        );
        assert_eq!(header(&resp, "x-robots-tag").as_deref(), Some("noindex"));
    }

    #[test]
    fn test_unknown_path_returns_404() {
        let (_pic, client, base_url, _cid) = setup();

        let resp = client
            .get(url_for(&base_url, "/nonexistent"))
            .send()
            .unwrap();
        assert_eq!(resp.status().as_u16(), 404, "GET /nonexistent should return 404");
        assert!(
            resp.headers().get("ic-certificate").is_some(),
            "IC-Certificate header should be present on 404 response"
        );
    }

    #[test]
    fn test_method_not_allowed() {
        let (_pic, client, base_url, _cid) = setup();

        let resp = client
            .post(url_for(&base_url, "/api/dynamic-svg"))
            .body("x")
            .send()
            .unwrap();
        assert_eq!(resp.status().as_u16(), 405);
        assert_eq!(header(&resp, "allow").as_deref(), Some("GET, HEAD"));
    }
}
