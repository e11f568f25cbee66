use reqwest::{header, Method, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument, warn};

use crate::{client::NewsClient, error::ClientError, query::QueryParams};

pub struct HttpRequest {
    method: Method,
    segments: Vec<String>,
    query_params: QueryParams,
}

impl HttpRequest {
    pub fn get<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method: Method::GET,
            segments: segments.into_iter().map(Into::into).collect(),
            query_params: QueryParams::default(),
        }
    }

    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.push(key, value);
        self
    }

    #[must_use]
    pub fn queries(mut self, params: QueryParams) -> Self {
        for (key, value) in params.into_pairs() {
            self.query_params.push(key, value);
        }
        self
    }

    /// Resolves the request against `base`, percent-encoding each path segment.
    pub fn url(&self, base: &Url) -> Result<Url, ClientError> {
        let mut url = base.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                ClientError::InvalidRequest(format!("Base URL '{base}' cannot be a base"))
            })?;
            path.pop_if_empty();
            path.extend(&self.segments);
        }

        if !self.query_params.is_empty() {
            url.set_query(Some(&self.query_params.to_query_string()));
        }

        Ok(url)
    }
}

#[async_trait::async_trait]
pub trait HttpClient {
    async fn request<T: DeserializeOwned>(&self, req: HttpRequest) -> Result<T, ClientError>;
}

#[async_trait::async_trait]
impl HttpClient for NewsClient {
    async fn request<T: DeserializeOwned>(&self, req: HttpRequest) -> Result<T, ClientError> {
        let res = self.execute_request(req).await?;
        let body = res.bytes().await?;
        Ok(serde_json::from_slice::<T>(&body)?)
    }
}

impl NewsClient {
    #[instrument(skip(self, req), fields(method = %req.method, path = %req.segments.join("/")))]
    async fn execute_request(&self, req: HttpRequest) -> Result<Response, ClientError> {
        match self.execute_single_request(&req).await {
            Ok(response) => {
                info!("HTTP request completed successfully");
                Ok(response)
            }
            Err(e) => {
                error!("HTTP request failed: {}", e);
                Err(e)
            }
        }
    }

    async fn execute_single_request(&self, req: &HttpRequest) -> Result<Response, ClientError> {
        let url = req.url(&self.base_url)?;
        debug!("Built request URL: {}", url);

        let request_builder = self
            .http_client
            .request(req.method.clone(), url)
            .header(header::ACCEPT, mime::APPLICATION_JSON.as_ref());

        debug!("Sending HTTP request");
        let res = request_builder.send().await.map_err(|e| {
            warn!("Network error occurred: {}", e);
            ClientError::RequestError(e)
        })?;

        let status = res.status();
        if status != StatusCode::OK {
            warn!(
                "Received HTTP status {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("")
            );
            return Err(ClientError::RequestFailed(status));
        }

        debug!("HTTP request completed with status: {}", status);

        Ok(res)
    }
}
