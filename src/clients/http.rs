use std::time::Duration;
use rquest::{Client, Response, RequestBuilder};
use rquest_util::Emulation;
use http::header::{HeaderMap, HeaderName, HeaderValue};
use crate::error::{Error, Result};
use crate::config::Settings;
use tracing::{error, debug};

pub struct HttpClient {
    client: Client,
    headers: HeaderMap,
}

impl HttpClient {
    pub fn new(settings: &Settings, emulation: Emulation) -> Result<Self> {
        let mut headers = HeaderMap::new();

        for (key, value) in settings.api.headers.iter() {
            if let (Ok(header_name), Ok(header_value)) = (
                HeaderName::from_bytes(key.as_bytes()),
                HeaderValue::from_str(value)
            ) {
                headers.insert(header_name, header_value);
                debug!(
                    header_key = key,
                    header_value = value,
                    "Adding header"
                );
            } else {
                error!(
                    header_key = key,
                    header_value = value,
                    "Invalid header value"
                );
            }
        }

        debug!(
            emulation = ?emulation,
            connect_timeout_secs = settings.api.connect_timeout_secs,
            read_timeout_secs = settings.api.read_timeout_secs,
            "Creating client with emulation"
        );

        let client = Client::builder()
            .emulation(emulation)
            .connect_timeout(Duration::from_secs_f64(settings.api.connect_timeout_secs))
            .timeout(Duration::from_secs_f64(settings.api.read_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            headers,
        })
    }

    pub fn post(&self, url: &str) -> RequestBuilder {
        let mut request = self.client.post(url);

        // Apply headers to each request
        for (key, value) in self.headers.iter() {
            request = request.header(key, value);
        }

        debug!(
            url = url,
            headers = ?self.headers,
            "Creating POST request with headers"
        );

        request
    }

    /// Sends the request and turns any non-success status into [`Error::Request`].
    pub async fn send(&self, request: RequestBuilder) -> Result<Response> {
        if let Some(built_request) = request.try_clone().and_then(|r| r.build().ok()) {
            debug!(
                url = %built_request.url(),
                headers = ?built_request.headers().iter()
                    .map(|(k, v)| (k.as_str(), v.to_str().unwrap_or("invalid")))
                    .collect::<Vec<_>>(),
                "Sending request"
            );
        }

        let response = request.send().await.map_err(Error::from_transport)?;

        debug!(
            status = response.status().as_u16(),
            url = %response.url(),
            "Response received"
        );

        let status = response.status();
        if !status.is_success() {
            error!(
                status = status.as_u16(),
                url = %response.url(),
                "Request failed"
            );
            return Err(Error::Request { status: status.as_u16() });
        }

        Ok(response)
    }
}
