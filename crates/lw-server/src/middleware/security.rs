//! Security headers middleware.
//!
//! Every response gets a fixed set of headers, overriding anything a handler set.

use axum::http::HeaderValue;
use axum::http::header::HeaderName;
use tower::ServiceBuilder;
use tower::layer::util::{Identity, Stack};
use tower_http::set_header::SetResponseHeaderLayer;

/// Content-Security-Policy for wiki pages.
///
/// Pages load only the stylesheet and carry no scripts. Page bodies are stored
/// markup emitted raw, so script execution is blocked outright.
const CSP: &str = "default-src 'self'; \
                   script-src 'none'; \
                   style-src 'self'; \
                   img-src 'self' data:; \
                   form-action 'self'; \
                   frame-ancestors 'none'";

/// Header names and values added to every response.
const HEADERS: [(&str, &str); 4] = [
    ("content-security-policy", CSP),
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("referrer-policy", "same-origin"),
];

type HeaderLayer = SetResponseHeaderLayer<HeaderValue>;

/// Stack of layers setting [`HEADERS`].
pub(crate) type SecurityHeaders =
    Stack<HeaderLayer, Stack<HeaderLayer, Stack<HeaderLayer, Stack<HeaderLayer, Identity>>>>;

/// Layer that overrides one response header with a static value.
fn fixed_header((name, value): (&'static str, &'static str)) -> HeaderLayer {
    SetResponseHeaderLayer::overriding(
        HeaderName::from_static(name),
        HeaderValue::from_static(value),
    )
}

/// Build the security header layers.
pub(crate) fn security_headers() -> ServiceBuilder<SecurityHeaders> {
    let [csp, nosniff, frame, referrer] = HEADERS;
    ServiceBuilder::new()
        .layer(fixed_header(csp))
        .layer(fixed_header(nosniff))
        .layer(fixed_header(frame))
        .layer(fixed_header(referrer))
}
