//! Endpoint configuration: card defaults, cache policy and response headers.

use ic_http_certification::HeaderField;

use crate::window::Period;

/// `cache-control` value sent with every SVG response by default.
///
/// The card changes with the clock and with its query string, so neither
/// browsers nor proxies may keep a copy.
pub const NO_STORE: &str = "no-store, max-age=0, must-revalidate";

/// Text shown when a request omits `title` or `subtitle`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardDefaults {
    pub title: String,
    pub subtitle: String,
}

impl CardDefaults {
    /// Defaults for the windowed card served at `/api/dynamic-svg`.
    pub fn edge() -> Self {
        Self {
            title: "Dynamic SVG — Edge Runtime".to_string(),
            subtitle: "Paso 2: base de rotación".to_string(),
        }
    }

    /// Defaults for the plain card served at `/api/hello-svg`.
    pub fn hello() -> Self {
        Self {
            title: "Dynamic SVG — Hello".to_string(),
            subtitle: "Paso 1: SVG dinámico".to_string(),
        }
    }
}

/// Security-related response headers.
///
/// Each field is the header value to send, or `None` to omit the header.
/// Pick a preset with [`SecurityHeaders::strict`],
/// [`SecurityHeaders::permissive`] or [`SecurityHeaders::none`], or fill the
/// fields individually:
///
/// ```
/// use ic_dynamic_svg::SecurityHeaders;
///
/// let headers = SecurityHeaders {
///     content_type_options: Some("nosniff".into()),
///     ..SecurityHeaders::none()
/// };
/// assert_eq!(headers.to_header_fields().len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SecurityHeaders {
    pub hsts: Option<String>,
    pub csp: Option<String>,
    pub content_type_options: Option<String>,
    pub frame_options: Option<String>,
    pub referrer_policy: Option<String>,
    pub cross_origin_resource_policy: Option<String>,
}

impl SecurityHeaders {
    /// Locks the image to same-origin embedding. Scripts inside the SVG are
    /// disabled through the content security policy.
    pub fn strict() -> Self {
        Self {
            hsts: Some("max-age=31536000; includeSubDomains".into()),
            csp: Some("default-src 'none'; style-src 'unsafe-inline'".into()),
            content_type_options: Some("nosniff".into()),
            frame_options: Some("DENY".into()),
            referrer_policy: Some("no-referrer".into()),
            cross_origin_resource_policy: Some("same-origin".into()),
        }
    }

    /// Lets any site embed the image (READMEs, dashboards) while keeping
    /// transport and sniffing protections. This is the default.
    pub fn permissive() -> Self {
        Self {
            hsts: Some("max-age=31536000; includeSubDomains".into()),
            csp: None,
            content_type_options: Some("nosniff".into()),
            frame_options: None,
            referrer_policy: Some("strict-origin-when-cross-origin".into()),
            cross_origin_resource_policy: Some("cross-origin".into()),
        }
    }

    /// No security headers at all.
    pub fn none() -> Self {
        Self {
            hsts: None,
            csp: None,
            content_type_options: None,
            frame_options: None,
            referrer_policy: None,
            cross_origin_resource_policy: None,
        }
    }

    /// The configured headers as name/value pairs, in a stable order.
    pub fn to_header_fields(&self) -> Vec<HeaderField> {
        [
            ("strict-transport-security", &self.hsts),
            ("content-security-policy", &self.csp),
            ("x-content-type-options", &self.content_type_options),
            ("x-frame-options", &self.frame_options),
            ("referrer-policy", &self.referrer_policy),
            (
                "cross-origin-resource-policy",
                &self.cross_origin_resource_policy,
            ),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.as_ref().map(|v| (name.to_string(), v.clone())))
        .collect()
    }
}

impl Default for SecurityHeaders {
    fn default() -> Self {
        Self::permissive()
    }
}

/// Global configuration, installed once with [`crate::setup`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SvgConfig {
    /// Defaults for the windowed card.
    pub edge: CardDefaults,
    /// Defaults for the plain card.
    pub hello: CardDefaults,
    /// Window width used when a request carries no usable `period`.
    pub default_period: Period,
    /// `cache-control` value for SVG responses.
    pub cache_control: String,
    pub security_headers: SecurityHeaders,
    /// Extra headers appended after the security headers.
    pub custom_headers: Vec<HeaderField>,
}

impl SvgConfig {
    /// Headers shared by every SVG response.
    ///
    /// Merge order, last write wins for duplicate names:
    /// 1. `content-type` and `cache-control`
    /// 2. Security headers
    /// 3. Custom headers
    pub fn response_headers(&self) -> Vec<HeaderField> {
        let mut headers: Vec<HeaderField> = vec![
            (
                "content-type".to_string(),
                "image/svg+xml; charset=utf-8".to_string(),
            ),
            ("cache-control".to_string(), self.cache_control.clone()),
        ];
        let overrides = self
            .security_headers
            .to_header_fields()
            .into_iter()
            .chain(self.custom_headers.iter().cloned());
        for (name, value) in overrides {
            headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
            headers.push((name, value));
        }
        headers
    }
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            edge: CardDefaults::edge(),
            hello: CardDefaults::hello(),
            default_period: Period::DEFAULT,
            cache_control: NO_STORE.to_string(),
            security_headers: SecurityHeaders::default(),
            custom_headers: vec![],
        }
    }
}
