// Copyright 2024 The LedgerDesk Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::{convert::TryFrom, fmt::Debug, sync::Arc};

use async_trait::async_trait;
use http::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    HeaderValue, Method, Response as HttpResponse, StatusCode,
};
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Deserialize};
use tokio::sync::RwLock;
use tracing::trace;
use url::Url;

use ledgerdesk_sdk_base::Session;

use crate::{
    error::{ApiError, HttpError, HttpResult},
    ClientConfig,
};

/// Abstraction around the HTTP layer. The allows implementors to use different
/// underlying HTTP libraries.
#[async_trait]
pub trait HttpSend: Send + Sync + Debug {
    /// The method abstracting sending request types and receiving response
    /// types.
    ///
    /// This is called by the client every time it wants to send anything to
    /// the backend.
    ///
    /// # Arguments
    ///
    /// * `request` - The http request that has been converted from a backend
    /// request.
    async fn send_request(
        &self,
        request: http::Request<Vec<u8>>,
    ) -> HttpResult<http::Response<Vec<u8>>>;
}

#[derive(Clone, Debug)]
pub(crate) struct HttpClient {
    pub(crate) inner: Arc<dyn HttpSend>,
    pub(crate) base_url: Arc<Url>,
    pub(crate) session: Arc<RwLock<Option<Session>>>,
}

impl HttpClient {
    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    async fn build_request(
        &self,
        method: &Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> HttpResult<http::Request<Vec<u8>>> {
        let mut builder = http::Request::builder()
            .method(method.clone())
            .uri(self.endpoint(path));

        if let Some(session) = self.session.read().await.as_ref() {
            builder = builder.header(
                AUTHORIZATION,
                format!("Bearer {}", session.access_token),
            );
        }

        if *method == Method::POST || *method == Method::PUT || *method == Method::DELETE {
            builder = builder.header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        let body = match body {
            Some(body) => serde_json::to_vec(body)?,
            None => Vec::new(),
        };

        Ok(builder.body(body)?)
    }

    /// Send a request to the backend and deserialize the JSON response body.
    ///
    /// The authorization header is attached whenever a session is active.
    pub async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> HttpResult<T> {
        trace!("{} {}", method, path);

        let request = self.build_request(&method, path, body.as_ref()).await?;
        let response = self.inner.send_request(request).await?;

        let status = response.status();
        let body = response.into_body();

        trace!("{} returned {}", path, status);

        if status == StatusCode::UNAUTHORIZED {
            return Err(HttpError::Unauthorized {
                message: error_message(&body),
            });
        } else if !status.is_success() {
            return Err(ApiError {
                status,
                message: error_message(&body),
            }
            .into());
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

/// Extract the error message from an error response body.
///
/// The backend sends `{"error": "..."}` bodies, anything else falls back to a
/// generic message.
fn error_message(body: &[u8]) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: String,
    }

    serde_json::from_slice::<ErrorBody>(body)
        .map(|e| e.error)
        .unwrap_or_else(|_| "An error occurred".to_owned())
}

/// Default http client used if none is specified using `Client::with_client`.
#[derive(Clone, Debug)]
pub struct DefaultHttpClient {
    inner: Client,
}

impl DefaultHttpClient {
    /// Build a client with the specified configuration.
    pub fn with_config(config: &ClientConfig) -> HttpResult<Self> {
        let http_client = reqwest::Client::builder();

        let http_client = if config.disable_ssl_verification {
            http_client.danger_accept_invalid_certs(true)
        } else {
            http_client
        };

        let http_client = match &config.proxy {
            Some(p) => http_client.proxy(p.clone()),
            None => http_client,
        };

        let http_client = match config.timeout {
            Some(x) => http_client.timeout(x),
            None => http_client,
        };

        let mut headers = reqwest::header::HeaderMap::new();

        let user_agent = match &config.user_agent {
            Some(a) => a.clone(),
            None => HeaderValue::from_str(&format!("ledgerdesk-rust-sdk {}", crate::VERSION))
                .map_err(http::Error::from)?,
        };

        headers.insert(reqwest::header::USER_AGENT, user_agent);

        let http_client = http_client.default_headers(headers);

        Ok(Self {
            inner: http_client.build()?,
        })
    }

    async fn response_to_http_response(
        &self,
        mut response: Response,
    ) -> HttpResult<http::Response<Vec<u8>>> {
        let status = response.status();
        let mut http_builder = HttpResponse::builder().status(status);

        if let Some(headers) = http_builder.headers_mut() {
            for (k, v) in response.headers_mut().drain() {
                if let Some(key) = k {
                    headers.insert(key, v);
                }
            }
        }

        let body = response.bytes().await?.as_ref().to_owned();

        Ok(http_builder.body(body)?)
    }
}

#[async_trait]
impl HttpSend for DefaultHttpClient {
    async fn send_request(
        &self,
        request: http::Request<Vec<u8>>,
    ) -> HttpResult<http::Response<Vec<u8>>> {
        let request = reqwest::Request::try_from(request)?;
        let response = self.inner.execute(request).await?;

        self.response_to_http_response(response).await
    }
}
