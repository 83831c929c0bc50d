//! The catalogue of offered services.

use http::Method;
use serde::{Deserialize, Serialize};

use crate::{Client, Result};

/// A service that can be booked.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Service {
    /// The unique id of the service.
    pub id: i64,
    /// The name of the service.
    pub name: String,
    /// A longer description of the service.
    #[serde(default)]
    pub description: Option<String>,
    /// The price of the service.
    pub price: f64,
    /// The category the service belongs to.
    #[serde(default)]
    pub category: Option<String>,
    /// How long an appointment for this service takes.
    #[serde(default)]
    pub duration_minutes: Option<i64>,
}

#[derive(Deserialize)]
struct ServicesResponse {
    services: Vec<Service>,
}

#[derive(Deserialize)]
struct ServiceResponse {
    service: Service,
}

#[derive(Deserialize)]
struct CategoriesResponse {
    categories: Vec<String>,
}

/// A handle to the service catalogue endpoints.
///
/// The catalogue is public, these endpoints work without a session.
#[derive(Clone, Debug)]
pub struct ServicesHandle {
    client: Client,
}

impl ServicesHandle {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// List all offered services.
    pub async fn list(&self) -> Result<Vec<Service>> {
        let response: ServicesResponse = self.client.send(Method::GET, "/services", None).await?;

        Ok(response.services)
    }

    /// Fetch the details of a single service.
    pub async fn get(&self, id: i64) -> Result<Service> {
        let response: ServiceResponse = self
            .client
            .send(Method::GET, &format!("/services/{}", id), None)
            .await?;

        Ok(response.service)
    }

    /// List the categories the services are grouped into.
    pub async fn categories(&self) -> Result<Vec<String>> {
        let response: CategoriesResponse = self
            .client
            .send(Method::GET, "/services/categories", None)
            .await?;

        Ok(response.categories)
    }
}
