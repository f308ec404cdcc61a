//! State-changing AJAX actions and per-record detail lookups

use crate::{ApiClient, ClientError};
use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use rms_search::OrderStatus;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Reply body of the write endpoints
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ActionResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
}

impl ActionResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    fn into_result(self, fallback: &str) -> Result<Self, ClientError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ClientError::Rejected(
                self.message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| fallback.to_string()),
            ))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CustomerStats {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub total_orders: u64,
    pub total_spent: Decimal,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OrderLine {
    pub name: String,
    pub quantity: u32,
    pub price: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OrderSummary {
    pub customer: String,
    /// Display label, e.g. "Preparing"
    pub status: String,
    pub items: Vec<OrderLine>,
    pub total_items: u64,
    pub total_price: Decimal,
}

impl ApiClient {
    /// Move an order to `status`. The server's `{"status": "error"}` reply becomes
    /// [`ClientError::Rejected`].
    pub fn update_order_status(
        &self,
        order_id: u64,
        status: OrderStatus,
    ) -> Result<ActionResponse, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        let body = format!("status={}", urlencoding::encode(status.as_str()));

        let response = self.send(
            Method::POST,
            &format!("/orders/ajax/{order_id}/status/"),
            headers,
            Some(body),
        )?;
        let reply: ActionResponse = response.json()?;
        reply.into_result("Error updating order status")
    }

    /// Flip a menu item between available and unavailable
    pub fn toggle_item_availability(&self, item_id: u64) -> Result<ActionResponse, ClientError> {
        let response = self.send(
            Method::POST,
            &format!("/menu/ajax/item/{item_id}/toggle/"),
            HeaderMap::new(),
            None,
        )?;
        let reply: ActionResponse = response.json()?;
        reply.into_result("Error toggling item availability")
    }

    pub fn customer_stats(&self, customer_id: u64) -> Result<CustomerStats, ClientError> {
        self.get_json(&format!("/customers/ajax/{customer_id}/stats/"))
    }

    pub fn order_summary(&self, order_id: u64) -> Result<OrderSummary, ClientError> {
        self.get_json(&format!("/orders/ajax/{order_id}/summary/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_reply_uses_server_message() {
        let reply: ActionResponse =
            serde_json::from_str(r#"{"status": "error", "message": "Invalid request"}"#).unwrap();
        let err = reply.into_result("fallback").unwrap_err();
        assert_eq!(err.to_string(), "Invalid request");
    }

    #[test]
    fn error_reply_without_message_uses_fallback() {
        let reply: ActionResponse = serde_json::from_str(r#"{"status": "error"}"#).unwrap();
        let err = reply.into_result("Error updating order status").unwrap_err();
        assert_eq!(err.to_string(), "Error updating order status");
    }

    #[test]
    fn success_reply_passes_through() {
        let reply: ActionResponse = serde_json::from_str(
            r#"{"status": "success", "new_status": "ready", "message": "Order status updated to Ready"}"#,
        )
        .unwrap();
        let ok = reply.into_result("fallback").unwrap();
        assert_eq!(ok.new_status.as_deref(), Some("ready"));
        assert_eq!(ok.is_available, None);
    }
}
