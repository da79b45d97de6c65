// Sensor appliance local API
//
// An unregistered appliance serves a small anonymous plaintext HTTP API at
// `http://{ip}/api/1.0`. It is polled for liveness and then handed an
// activation key plus the control-plane host it should register with.

use std::net::IpAddr;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, ORIGIN, REFERER};
use tracing::debug;
use url::Url;

use crate::control::client::JSON_CONTENT_TYPE;
use crate::control::models::{ActivationRequest, ApplianceStatus};
use crate::error::Error;
use crate::transport::TransportConfig;

/// Status value an appliance reports while waiting for activation.
pub const NOT_CONNECTED: &str = "notConnected";

const APPLIANCE_TIMEOUT: Duration = Duration::from_secs(5);

/// Outcome of one liveness probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplianceProbe {
    pub http_status: u16,
    /// The decoded `status` field, when the body had one.
    pub status: Option<String>,
}

impl ApplianceProbe {
    /// HTTP 200 with the `notConnected` status.
    pub fn is_awaiting_activation(&self) -> bool {
        self.http_status == StatusCode::OK.as_u16() && self.status.as_deref() == Some(NOT_CONNECTED)
    }
}

/// Anonymous client for one appliance.
pub struct ApplianceClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApplianceClient {
    /// Client for `http://{ip}` with the default 5 second timeout.
    pub fn for_ip(ip: IpAddr) -> Result<Self, Error> {
        let base_url = match ip {
            IpAddr::V4(v4) => Url::parse(&format!("http://{v4}"))?,
            IpAddr::V6(v6) => Url::parse(&format!("http://[{v6}]"))?,
        };
        Self::with_base_url(base_url)
    }

    /// Client for an explicit appliance root URL.
    pub fn with_base_url(base_url: Url) -> Result<Self, Error> {
        let transport = TransportConfig {
            timeout: APPLIANCE_TIMEOUT,
            ..TransportConfig::default()
        };
        Ok(Self {
            http: transport.build_client()?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn api_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/api/1.0/{path}"))?)
    }

    /// Probe the appliance's setup status.
    ///
    /// `GET /api/1.0/status`. Transport failures are returned as errors;
    /// undecodable bodies yield a probe with no status.
    pub async fn status(&self) -> Result<ApplianceProbe, Error> {
        let url = self.api_url("status")?;
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        let http_status = resp.status().as_u16();
        let body = resp.text().await.map_err(Error::Transport)?;
        let status = serde_json::from_str::<ApplianceStatus>(&body)
            .ok()
            .map(|s| s.status);

        Ok(ApplianceProbe {
            http_status,
            status,
        })
    }

    /// Send the activation request and return the HTTP status.
    ///
    /// `POST /api/1.0/connect`
    pub async fn activate(&self, request: &ActivationRequest) -> Result<u16, Error> {
        let url = self.api_url("connect")?;
        debug!(name = %request.name, master_node = %request.master_node, "POST {}", url);

        let origin = self.base_url.origin().ascii_serialization();
        let resp = self
            .http
            .post(url)
            .header(ORIGIN, origin.as_str())
            .header(REFERER, format!("{origin}/"))
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(serde_json::to_vec(request)?)
            .send()
            .await
            .map_err(Error::Transport)?;

        Ok(resp.status().as_u16())
    }
}
