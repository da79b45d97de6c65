// Control-plane session authentication
//
// Three-step flow on a fresh cookie-bearing client: load the login page to
// obtain the first XSRF cookie, POST the credentials, then load the API root
// so the server rotates the token for the new session.

use std::sync::Arc;

use reqwest::cookie::Jar;
use reqwest::{Method, StatusCode};
use tracing::debug;

use crate::control::client::{ControlClient, Session};
use crate::error::Error;
use crate::transport::TransportConfig;

impl ControlClient {
    /// Establish a new session, discarding any previous one.
    ///
    /// On failure the client is left unauthenticated.
    pub async fn authenticate(&mut self) -> Result<(), Error> {
        self.session = None;

        let jar = Arc::new(Jar::default());
        let config = TransportConfig {
            cookie_jar: Some(Arc::clone(&jar)),
            ..self.transport().clone()
        }
        .for_target(self.base_url());
        let session = Session {
            http: config.build_client()?,
            jar,
        };

        let url = self.login_page_url()?;
        debug!("GET {}", url);
        let resp = self
            .prepare(&session, Method::GET, url)
            .send()
            .await
            .map_err(Error::Transport)?;
        debug!(status = %resp.status(), "login page loaded");

        let url = self.api_url("login")?;
        debug!(username = self.credentials().username(), "logging in at {}", url);
        let body = serde_json::to_vec(&self.credentials().login_body())?;
        let resp = self
            .prepare(&session, Method::POST, url)
            .body(body)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if status != StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Authentication {
                message: format!("login failed (HTTP {status}): {body}"),
            });
        }

        let url = self.api_url("")?;
        debug!("GET {}", url);
        let resp = self
            .prepare(&session, Method::GET, url)
            .send()
            .await
            .map_err(Error::Transport)?;
        debug!(status = %resp.status(), "session token refreshed");

        self.session = Some(session);
        debug!("login successful");
        Ok(())
    }
}
