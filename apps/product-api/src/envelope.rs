//! Success response envelope.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  verb          message                  data                            │
//! │  ────          ───────                  ────                            │
//! │  POST          "Created successfully"   yes                             │
//! │  PUT, PATCH    "Updated successfully"   no                              │
//! │  DELETE        "Deleted successfully"   no                              │
//! │  GET, other    "Retrieved successfully" GET only                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `status` repeats the HTTP status code of the response.

use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Message for a successful request with the given verb.
pub fn message_for(method: &Method) -> &'static str {
    match *method {
        Method::POST => "Created successfully",
        Method::PUT | Method::PATCH => "Updated successfully",
        Method::DELETE => "Deleted successfully",
        _ => "Retrieved successfully",
    }
}

/// Whether responses to this verb carry the result as `data`.
pub fn carries_data(method: &Method) -> bool {
    *method == Method::GET || *method == Method::POST
}

/// `{status, message, data?}` body of every successful response.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub status: u16,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    /// Wraps a handler result; `data` is dropped for verbs that do not carry it.
    pub fn new(method: &Method, status: StatusCode, data: T) -> Self {
        Envelope {
            status: status.as_u16(),
            message: message_for(method),
            data: carries_data(method).then_some(data),
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_messages_by_verb() {
        assert_eq!(message_for(&Method::POST), "Created successfully");
        assert_eq!(message_for(&Method::PUT), "Updated successfully");
        assert_eq!(message_for(&Method::PATCH), "Updated successfully");
        assert_eq!(message_for(&Method::DELETE), "Deleted successfully");
        assert_eq!(message_for(&Method::GET), "Retrieved successfully");
        assert_eq!(message_for(&Method::OPTIONS), "Retrieved successfully");
    }

    #[test]
    fn test_data_only_for_get_and_post() {
        let get = serde_json::to_value(Envelope::new(&Method::GET, StatusCode::OK, vec![1])).unwrap();
        assert_eq!(
            get,
            json!({"status": 200, "message": "Retrieved successfully", "data": [1]})
        );

        let post =
            serde_json::to_value(Envelope::new(&Method::POST, StatusCode::CREATED, "x")).unwrap();
        assert_eq!(post["status"], 201);
        assert_eq!(post["data"], "x");

        let put = serde_json::to_value(Envelope::new(&Method::PUT, StatusCode::OK, 5)).unwrap();
        assert_eq!(put, json!({"status": 200, "message": "Updated successfully"}));

        let delete =
            serde_json::to_value(Envelope::new(&Method::DELETE, StatusCode::OK, 5)).unwrap();
        assert!(delete.get("data").is_none());
    }

    #[test]
    fn test_empty_list_is_still_data() {
        let empty: Vec<i32> = Vec::new();
        let body = serde_json::to_value(Envelope::new(&Method::GET, StatusCode::OK, empty)).unwrap();
        assert_eq!(body["data"], json!([]));
    }
}
