// Session credentials and API version selection.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};

/// Username/password pair for the control plane's session login.
///
/// The password never appears in `Debug` output or log lines.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &SecretString {
        &self.password
    }

    /// The JSON document POSTed to `/login`.
    ///
    /// The control plane names the username field `email`.
    pub(crate) fn login_body(&self) -> Value {
        json!({
            "email": self.username,
            "password": self.password.expose_secret(),
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Render a secret for diagnostics: `****` followed by its last three characters.
///
/// Secrets shorter than three characters are fully masked.
pub fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count < 3 {
        return "****".into();
    }
    let tail: String = secret.chars().skip(count - 3).collect();
    format!("****{tail}")
}

/// Major version of the control-plane API.
///
/// Selects the URL prefix and the sensor-list response shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ApiVersion {
    #[default]
    V1,
    V2,
}

impl ApiVersion {
    /// Path prefix for every session endpoint, e.g. `/api/2.0`.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::V1 => "/api/1.0",
            Self::V2 => "/api/2.0",
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Self::V1 => 1,
            Self::V2 => 2,
        }
    }
}

impl TryFrom<u8> for ApiVersion {
    type Error = crate::error::Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::V1),
            2 => Ok(Self::V2),
            other => Err(crate::error::Error::UnsupportedVersion(other)),
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.0", self.number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_password() {
        let creds = Credentials::new("ops@example.com", SecretString::from("hunter22"));
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("ops@example.com"));
        assert!(!rendered.contains("hunter22"));
    }

    #[test]
    fn login_body_uses_email_field() {
        let creds = Credentials::new("ops@example.com", SecretString::from("hunter22"));
        assert_eq!(
            creds.login_body(),
            json!({"email": "ops@example.com", "password": "hunter22"})
        );
    }

    #[test]
    fn masking() {
        assert_eq!(mask_secret(""), "****");
        assert_eq!(mask_secret("ab"), "****");
        assert_eq!(mask_secret("abc"), "****abc");
        assert_eq!(mask_secret("secret"), "****ret");
    }

    #[test]
    fn version_prefixes() {
        assert_eq!(ApiVersion::default().prefix(), "/api/1.0");
        assert_eq!(ApiVersion::try_from(2).unwrap().prefix(), "/api/2.0");
        assert!(ApiVersion::try_from(3).is_err());
    }
}
