// Control-plane HTTP client
//
// Wraps `reqwest::Client` with session state, URL construction for the
// versioned API prefix, and the anti-forgery header convention the control
// plane enforces on every request. Endpoint modules (jobs, sensors, keys,
// license) are inherent methods in separate files.

use std::sync::Arc;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{CONTENT_TYPE, ORIGIN, REFERER};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::auth::{ApiVersion, Credentials};
use crate::error::{Error, body_preview};
use crate::transport::TransportConfig;

pub(crate) const XSRF_COOKIE: &str = "XSRF-TOKEN";
pub(crate) const XSRF_HEADER: &str = "X-XSRF-TOKEN";
pub(crate) const JSON_CONTENT_TYPE: &str = "application/json;charset=UTF-8";

/// An authenticated HTTP client plus the jar its cookies land in.
pub(crate) struct Session {
    pub(crate) http: reqwest::Client,
    pub(crate) jar: Arc<Jar>,
}

/// Raw HTTP client for the control plane's session API.
///
/// Created unauthenticated. [`authenticate`](Self::authenticate) must
/// succeed before any endpoint method is called; until then every call
/// fails with [`Error::NotAuthenticated`]. Endpoint methods take `&self`
/// and may run concurrently; re-authentication takes `&mut self`, so it
/// can never overlap in-flight requests.
pub struct ControlClient {
    base_url: Url,
    version: ApiVersion,
    credentials: Credentials,
    transport: TransportConfig,
    pub(crate) session: Option<Session>,
}

impl ControlClient {
    /// Create an unauthenticated client.
    ///
    /// `base_url` is the control-plane root, e.g. `https://tenant.alienvault.cloud`.
    pub fn new(
        base_url: Url,
        version: ApiVersion,
        credentials: Credentials,
        transport: TransportConfig,
    ) -> Result<Self, Error> {
        if base_url.host_str().is_none() {
            return Err(Error::InvalidUrl(url::ParseError::EmptyHost));
        }
        Ok(Self {
            base_url,
            version,
            credentials,
            transport,
            session: None,
        })
    }

    /// Create a client for `https://{host}`.
    pub fn for_host(
        host: &str,
        version: ApiVersion,
        credentials: Credentials,
        transport: TransportConfig,
    ) -> Result<Self, Error> {
        let base_url = Url::parse(&format!("https://{host}"))?;
        Self::new(base_url, version, credentials, transport)
    }

    /// The control-plane root URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The active API version.
    pub fn version(&self) -> ApiVersion {
        self.version
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub(crate) fn transport(&self) -> &TransportConfig {
        &self.transport
    }

    /// `host[:port]` of the control plane, as appliances expect it
    /// in their `masterNode` field.
    pub fn host_authority(&self) -> String {
        let host = self.base_url.host_str().unwrap_or_default();
        match self.base_url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_owned(),
        }
    }

    /// Whether `authenticate` has succeeded on this client.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Current anti-forgery token from the session cookie jar, if any.
    pub fn xsrf_token(&self) -> Option<String> {
        let session = self.session.as_ref()?;
        xsrf_from_jar(&session.jar, &self.base_url)
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}/api/{n}.0/{path}`.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let prefix = self.version.prefix();
        Ok(Url::parse(&format!("{base}{prefix}/{path}"))?)
    }

    /// The single-page login route, fetched to obtain the first XSRF cookie.
    pub(crate) fn login_page_url(&self) -> Result<Url, Error> {
        Ok(self.base_url.join("/#/login")?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    fn session(&self) -> Result<&Session, Error> {
        self.session.as_ref().ok_or(Error::NotAuthenticated)
    }

    /// Start a request on `session` with the anti-forgery headers applied.
    pub(crate) fn prepare(
        &self,
        session: &Session,
        method: Method,
        url: Url,
    ) -> reqwest::RequestBuilder {
        let origin = self.base_url.origin().ascii_serialization();
        let mut builder = session
            .http
            .request(method, url)
            .header(ORIGIN, origin.as_str())
            .header(REFERER, format!("{origin}/"))
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE);

        if let Some(token) = xsrf_from_jar(&session.jar, &self.base_url) {
            builder = builder.header(XSRF_HEADER, token);
        }
        builder
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<reqwest::Response, Error> {
        let session = self.session()?;
        let url = self.api_url(path)?;
        debug!("{} {}", method, url);

        let mut builder = self.prepare(session, method, url);
        if let Some(body) = body {
            builder = builder.body(body);
        }
        builder.send().await.map_err(Error::Transport)
    }

    /// Send a GET request and decode a 2xx JSON response.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        operation: &'static str,
    ) -> Result<T, Error> {
        let resp = self.send(Method::GET, path, None).await?;
        parse_json(resp, operation).await
    }

    /// Send a request with an optional JSON body and decode a 2xx JSON response.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&(impl Serialize + Sync)>,
        operation: &'static str,
    ) -> Result<T, Error> {
        let body = body.map(serde_json::to_vec).transpose()?;
        let resp = self.send(method, path, body).await?;
        parse_json(resp, operation).await
    }

    /// Send a request whose only success signal is one exact status code.
    pub(crate) async fn send_expect(
        &self,
        method: Method,
        path: &str,
        body: Option<&(impl Serialize + Sync)>,
        expected: StatusCode,
        operation: &'static str,
    ) -> Result<(), Error> {
        let body = body.map(serde_json::to_vec).transpose()?;
        let resp = self.send(method, path, body).await?;
        let status = resp.status();
        if status == expected {
            return Ok(());
        }
        Err(unexpected_status(resp, operation).await)
    }
}

/// Extract the `XSRF-TOKEN` value from the jar's cookie header for `url`.
fn xsrf_from_jar(jar: &Jar, url: &Url) -> Option<String> {
    let header = jar.cookies(url)?;
    let header = header.to_str().ok()?;
    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == XSRF_COOKIE).then(|| value.to_owned())
    })
}

pub(crate) async fn unexpected_status(resp: reqwest::Response, operation: &'static str) -> Error {
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    Error::UnexpectedStatus {
        operation,
        status,
        body: body_preview(&body),
    }
}

/// Decode a 2xx JSON response, or surface the status and body preview.
pub(crate) async fn parse_json<T: DeserializeOwned>(
    resp: reqwest::Response,
    operation: &'static str,
) -> Result<T, Error> {
    if !resp.status().is_success() {
        return Err(unexpected_status(resp, operation).await);
    }

    let body = resp.text().await.map_err(Error::Transport)?;
    serde_json::from_str(&body).map_err(|e| {
        let preview = body_preview(&body);
        Error::Deserialization {
            message: format!("{operation}: {e} (body preview: {preview:?})"),
            body,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn client(base: &str, version: ApiVersion) -> ControlClient {
        ControlClient::new(
            Url::parse(base).unwrap(),
            version,
            Credentials::new("ops@example.com", SecretString::from("pw")),
            TransportConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn api_url_includes_version_prefix() {
        let c = client("https://tenant.alienvault.cloud/", ApiVersion::V2);
        assert_eq!(
            c.api_url("sensors/key").unwrap().as_str(),
            "https://tenant.alienvault.cloud/api/2.0/sensors/key"
        );
        assert_eq!(
            c.login_page_url().unwrap().as_str(),
            "https://tenant.alienvault.cloud/#/login"
        );
    }

    #[test]
    fn host_authority_keeps_explicit_port() {
        assert_eq!(
            client("https://127.0.0.1:8443", ApiVersion::V1).host_authority(),
            "127.0.0.1:8443"
        );
        assert_eq!(
            client("https://tenant.alienvault.cloud", ApiVersion::V1).host_authority(),
            "tenant.alienvault.cloud"
        );
    }

    #[test]
    fn xsrf_cookie_is_found_among_others() {
        let url = Url::parse("https://tenant.alienvault.cloud/").unwrap();
        let jar = Jar::default();
        jar.add_cookie_str("JSESSIONID=s1; Path=/", &url);
        jar.add_cookie_str("XSRF-TOKEN=abc123; Path=/", &url);
        assert_eq!(xsrf_from_jar(&jar, &url).as_deref(), Some("abc123"));
    }

    #[test]
    fn missing_xsrf_cookie_yields_none() {
        let url = Url::parse("https://tenant.alienvault.cloud/").unwrap();
        let jar = Jar::default();
        jar.add_cookie_str("JSESSIONID=s1; Path=/", &url);
        assert_eq!(xsrf_from_jar(&jar, &url), None);
    }

    #[test]
    fn unauthenticated_client_has_no_token() {
        let c = client("https://tenant.alienvault.cloud", ApiVersion::V1);
        assert!(!c.is_authenticated());
        assert_eq!(c.xsrf_token(), None);
    }
}
