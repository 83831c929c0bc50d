//! Invoices issued to the logged in user.

use http::Method;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{client::MessageResponse, Client, Result};

/// An invoice.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// The unique id of the invoice.
    pub id: i64,
    /// The invoiced amount.
    pub amount: f64,
    /// The status of the invoice, e.g. "open" or "paid".
    pub status: String,
    /// The date the invoice is due, `YYYY-MM-DD`.
    #[serde(default)]
    pub due_date: Option<String>,
    /// What the invoice is for.
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Deserialize)]
struct InvoicesResponse {
    invoices: Vec<Invoice>,
}

#[derive(Deserialize)]
struct InvoiceResponse {
    invoice: Invoice,
}

/// A handle to the invoice endpoints.
#[derive(Clone, Debug)]
pub struct InvoicesHandle {
    client: Client,
}

impl InvoicesHandle {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// List the invoices of the logged in user.
    pub async fn list(&self) -> Result<Vec<Invoice>> {
        let response: InvoicesResponse = self.client.send(Method::GET, "/invoices", None).await?;

        Ok(response.invoices)
    }

    /// Fetch a single invoice.
    pub async fn get(&self, id: i64) -> Result<Invoice> {
        let response: InvoiceResponse = self
            .client
            .send(Method::GET, &format!("/invoices/{}", id), None)
            .await?;

        Ok(response.invoice)
    }

    /// Pay an open invoice.
    ///
    /// # Arguments
    ///
    /// * `id` - The id of the invoice to pay.
    ///
    /// * `payment_method` - The payment method to use, e.g. "card".
    pub async fn pay(&self, id: i64, payment_method: &str) -> Result<()> {
        let _: MessageResponse = self
            .client
            .send(
                Method::POST,
                &format!("/invoices/{}/pay", id),
                Some(json!({ "payment_method": payment_method })),
            )
            .await?;

        Ok(())
    }
}
