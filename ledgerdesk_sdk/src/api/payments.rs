//! Payments made by the logged in user.

use http::Method;
use serde::{Deserialize, Serialize};

use crate::{error::HttpError, Client, Result};

/// A payment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// The unique id of the payment.
    pub id: i64,
    /// The paid amount.
    pub amount: f64,
    /// The payment method that was used, e.g. "card".
    pub payment_method: String,
    /// What the payment was for.
    #[serde(default)]
    pub description: Option<String>,
    /// The invoice this payment settles, if any.
    #[serde(default)]
    pub invoice_id: Option<i64>,
    /// The status of the payment, e.g. "completed".
    pub status: String,
}

/// A new payment.
#[derive(Clone, Debug, Serialize)]
pub struct NewPayment {
    /// The amount to pay.
    pub amount: f64,
    /// The payment method to use.
    pub payment_method: String,
    /// What the payment is for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The invoice the payment settles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<i64>,
}

#[derive(Deserialize)]
struct PaymentsResponse {
    payments: Vec<Payment>,
}

#[derive(Deserialize)]
struct PaymentResponse {
    payment: Payment,
}

/// A handle to the payment endpoints.
#[derive(Clone, Debug)]
pub struct PaymentsHandle {
    client: Client,
}

impl PaymentsHandle {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// List the payments of the logged in user.
    pub async fn list(&self) -> Result<Vec<Payment>> {
        let response: PaymentsResponse = self.client.send(Method::GET, "/payments", None).await?;

        Ok(response.payments)
    }

    /// Fetch a single payment.
    pub async fn get(&self, id: i64) -> Result<Payment> {
        let response: PaymentResponse = self
            .client
            .send(Method::GET, &format!("/payments/{}", id), None)
            .await?;

        Ok(response.payment)
    }

    /// Make a new payment.
    pub async fn create(&self, payment: NewPayment) -> Result<Payment> {
        let response: PaymentResponse = self
            .client
            .send(
                Method::POST,
                "/payments",
                Some(serde_json::to_value(&payment).map_err(HttpError::Json)?),
            )
            .await?;

        Ok(response.payment)
    }
}

#[cfg(test)]
mod test {
    use ledgerdesk_sdk_test::test_json;
    use mockito::{mock, Matcher};

    use super::NewPayment;
    use crate::client::test::logged_in_client;

    #[tokio::test]
    async fn list_payments() {
        let client = logged_in_client("pay-1").await;

        let _m = mock("GET", "/payments")
            .match_header("authorization", "Bearer pay-1")
            .with_status(200)
            .with_body(test_json::PAYMENTS.to_string())
            .create();

        let payments = client.payments().list().await.unwrap();

        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].invoice_id, Some(3));
    }

    #[tokio::test]
    async fn create_payment() {
        let client = logged_in_client("pay-2").await;

        let _m = mock("POST", "/payments")
            .match_header("authorization", "Bearer pay-2")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "amount": 150.0,
                "payment_method": "card"
            })))
            .with_status(201)
            .with_body(test_json::PAYMENT.to_string())
            .create();

        let payment = client
            .payments()
            .create(NewPayment {
                amount: 150.0,
                payment_method: "card".to_owned(),
                description: None,
                invoice_id: Some(3),
            })
            .await
            .unwrap();

        assert_eq!(payment.status, "completed");
    }
}
