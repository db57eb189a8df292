//! Client address and user agent captured from the request.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::header::USER_AGENT;
use axum::http::request::Parts;

/// Where a request came from, as recorded with events and form submissions.
///
/// `address` is the raw `X-Forwarded-For` value when present, otherwise the
/// peer address, otherwise empty. Values are stored verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOrigin {
    pub address: String,
    pub user_agent: Option<String>,
}

impl RequestOrigin {
    /// The address as an optional column value (`None` when unknown).
    pub fn address_opt(&self) -> Option<String> {
        (!self.address.is_empty()).then(|| self.address.clone())
    }
}

impl<S: Send + Sync> FromRequestParts<S> for RequestOrigin {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let forwarded = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_string);

        let address = forwarded
            .or_else(|| {
                parts
                    .extensions
                    .get::<ConnectInfo<SocketAddr>>()
                    .map(|ConnectInfo(addr)| addr.ip().to_string())
            })
            .unwrap_or_default();

        let user_agent = parts
            .headers
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        Ok(Self {
            address,
            user_agent,
        })
    }
}

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;

    async fn origin_of(request: Request<()>) -> RequestOrigin {
        let (mut parts, ()) = request.into_parts();
        RequestOrigin::from_request_parts(&mut parts, &())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn forwarded_header_wins() {
        let mut request = Request::builder()
            .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
            .header("user-agent", "curl/8")
            .body(())
            .unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 9000))));

        let origin = origin_of(request).await;
        assert_eq!(origin.address, "203.0.113.7, 10.0.0.1");
        assert_eq!(origin.user_agent.as_deref(), Some("curl/8"));
    }

    #[tokio::test]
    async fn falls_back_to_peer_address() {
        let mut request = Request::builder().body(()).unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([192, 168, 1, 20], 51000))));

        let origin = origin_of(request).await;
        assert_eq!(origin.address, "192.168.1.20");
        assert_eq!(origin.user_agent, None);
    }

    #[tokio::test]
    async fn unknown_origin_is_empty() {
        let origin = origin_of(Request::builder().body(()).unwrap()).await;
        assert_eq!(origin.address, "");
        assert_eq!(origin.address_opt(), None);
    }
}
