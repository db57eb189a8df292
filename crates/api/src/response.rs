//! Shared response envelope types for handlers.
//!
//! Page view models and listings use a `{ "data": ... }` envelope. The
//! write endpoints keep their own small bodies ([`StatusResponse`],
//! [`OkResponse`]) because browser scripts depend on those exact shapes.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{"status": "success"}` returned by the analytics and progress writes.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    pub fn success() -> Self {
        Self { status: "success" }
    }
}

/// `{"ok": bool, "error"?: string}` returned by the public form endpoints.
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self {
            ok: true,
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(message.into()),
        }
    }
}
