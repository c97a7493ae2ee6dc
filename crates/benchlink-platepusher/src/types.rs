// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Request and response records.

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// Payload
// =============================================================================

/// JSON body of a device request.
///
/// Serializes as `{}` when empty and as `{"site": "A1"}` when a site is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    /// Target site of a move.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
}

impl Payload {
    /// An empty payload.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A payload addressing `site`.
    pub fn for_site(site: impl Into<String>) -> Self {
        Self {
            site: Some(site.into()),
        }
    }

    /// Returns `true` if no field is set.
    pub fn is_empty(&self) -> bool {
        self.site.is_none()
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

// =============================================================================
// ResponseStatus
// =============================================================================

/// Outcome reported by the device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    /// The request was accepted.
    #[default]
    Ok,
    /// The device rejected the request.
    Error,
}

impl ResponseStatus {
    /// Returns `true` for [`ResponseStatus::Ok`].
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::Error => write!(f, "error"),
        }
    }
}

// =============================================================================
// SimulatedResponse
// =============================================================================

/// Response to a device request: the status plus the URL and payload sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatedResponse {
    /// Device status.
    pub status: ResponseStatus,
    /// Full request URL.
    pub url: String,
    /// Payload that was sent, if any.
    #[serde(default)]
    pub payload: Option<Payload>,
}

impl SimulatedResponse {
    /// A successful response echoing `url` and `payload`.
    pub fn ok(url: impl Into<String>, payload: Option<Payload>) -> Self {
        Self {
            status: ResponseStatus::Ok,
            url: url.into(),
            payload,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_json() {
        assert_eq!(serde_json::to_string(&Payload::empty()).unwrap(), "{}");
        assert_eq!(
            serde_json::to_string(&Payload::for_site("A1")).unwrap(),
            r#"{"site":"A1"}"#
        );
        assert_eq!(Payload::for_site("B4").to_string(), r#"{"site":"B4"}"#);
        assert!(Payload::empty().is_empty());
    }

    #[test]
    fn test_response_json() {
        let response = SimulatedResponse::ok("http://x/home", Some(Payload::empty()));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "ok", "url": "http://x/home", "payload": {}})
        );

        let parsed: SimulatedResponse =
            serde_json::from_str(r#"{"status":"error","url":"http://x/move"}"#).unwrap();
        assert_eq!(parsed.status, ResponseStatus::Error);
        assert!(!parsed.status.is_ok());
        assert_eq!(parsed.payload, None);
    }
}
