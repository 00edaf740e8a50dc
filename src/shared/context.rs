//! Request context
//!
//! Carries the correlation id of one logical request through the service
//! layer so every log line for that request can be tied together.

use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestContext {
    pub request_id: String,
}

impl RequestContext {
    /// New context with a generated UUID v4 request id.
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
        }
    }

    /// Adopt a request id supplied by the caller (e.g. an `X-Request-Id` header).
    pub fn with_request_id(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_differ() {
        assert_ne!(RequestContext::new().request_id, RequestContext::new().request_id);
    }

    #[test]
    fn test_caller_supplied_id_is_kept() {
        let ctx = RequestContext::with_request_id("req-42");
        assert_eq!(ctx.request_id, "req-42");
    }
}
