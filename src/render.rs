//! SVG card markup.
//!
//! Both cards share one 760×220 frame: a dark gradient panel with a title,
//! a subtitle and a green check badge. The edge card adds two status lines
//! describing the current rotation window.

use std::borrow::Cow;

use crate::window::{format_refresh, Window};

const FONT_STACK: &str = "ui-sans-serif, system-ui, -apple-system, Segoe UI, Roboto, Arial";

/// Escape `&`, `<`, `>`, `"` and `'` so `text` can be placed inside element
/// content or a quoted attribute.
pub fn escape_xml(text: &str) -> Cow<'_, str> {
    html_escape::encode_quoted_attribute(text)
}

/// Card for `/api/hello-svg`: title and subtitle only.
pub fn render_hello(title: &str, subtitle: &str) -> String {
    card(title, subtitle, "")
}

/// Card for `/api/dynamic-svg`: title, subtitle, window index and the
/// approximate instant the window rolls over.
pub fn render_edge(title: &str, subtitle: &str, window: &Window) -> String {
    let status = format!(
        r##"
    <text x="32" y="154" font-family="{FONT_STACK}" font-size="15" fill="#94a3b8">
      Period: {period} · Window #{index}
    </text>
    <text x="32" y="178" font-family="{FONT_STACK}" font-size="13" fill="#94a3b8">
      Next refresh (approx): {refresh}
    </text>"##,
        period = window.period,
        index = window.index,
        refresh = format_refresh(window.next_refresh()),
    );
    card(title, subtitle, &status)
}

fn card(title: &str, subtitle: &str, status: &str) -> String {
    let title = escape_xml(title);
    let subtitle = escape_xml(subtitle);
    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="760" height="220" viewBox="0 0 760 220" role="img" aria-label="{title}">
  <defs>
    <linearGradient id="g" x1="0" x2="1" y1="0" y2="1">
      <stop offset="0%" stop-color="#0f172a"/>
      <stop offset="100%" stop-color="#1e293b"/>
    </linearGradient>
    <filter id="shadow" x="-20%" y="-20%" width="140%" height="140%">
      <feDropShadow dx="0" dy="2" stdDeviation="3" flood-opacity="0.25"/>
    </filter>
  </defs>
  <rect x="0" y="0" width="760" height="220" fill="url(#g)" rx="16" />
  <g filter="url(#shadow)">
    <text x="32" y="84" font-family="{FONT_STACK}" font-size="30" font-weight="700" fill="#ffffff">
      {title}
    </text>
    <text x="32" y="118" font-family="{FONT_STACK}" font-size="18" fill="#cbd5e1">
      {subtitle}
    </text>{status}
  </g>
  <g transform="translate(680, 28)">
    <circle cx="24" cy="24" r="24" fill="#22c55e" />
    <path d="M18 24l6 6 10-14" stroke="#fff" stroke-width="3" fill="none" stroke-linecap="round" stroke-linejoin="round"/>
  </g>
</svg>"##
    )
}
