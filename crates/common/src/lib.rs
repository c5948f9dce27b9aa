//! Shared plumbing for the save service crates: logging setup, startup
//! directory checks and the small JSON bodies every endpoint speaks.

pub mod types;
pub mod utils;
pub mod env;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn error_body_serializes_error_field() {
        let body = serde_json::to_value(types::ErrorBody::new("Save not found")).unwrap();
        assert_eq!(body, serde_json::json!({"error": "Save not found"}));
    }

    #[test]
    fn status_ack_is_ok() {
        let body = serde_json::to_value(types::StatusAck::ok()).unwrap();
        assert_eq!(body, serde_json::json!({"status": "ok"}));
    }
}
