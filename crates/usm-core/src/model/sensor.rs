// ── Sensor domain types ──

use std::fmt;

use serde::{Serialize, Serializer};

/// Normalized sensor identifier.
///
/// The wire field differs by API version; conversion picks whichever one
/// the server filled so callers only ever see this.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SensorId(String);

impl SensorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SensorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SensorId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SensorId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ── Status ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SensorStatus {
    Ready,
    /// The sensor stopped reporting. It will never recover on its own.
    ConnectionLost,
    Other(String),
}

impl SensorStatus {
    pub fn from_wire(s: &str) -> Self {
        match s {
            "Ready" => Self::Ready,
            "Connection lost" => Self::ConnectionLost,
            other => Self::Other(other.to_owned()),
        }
    }

    pub fn as_wire(&self) -> &str {
        match self {
            Self::Ready => "Ready",
            Self::ConnectionLost => "Connection lost",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for SensorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

impl Serialize for SensorStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupStatus {
    Complete,
    Incomplete(String),
}

impl SetupStatus {
    pub const COMPLETE: &'static str = "Complete";

    pub fn from_wire(s: &str) -> Self {
        if s == Self::COMPLETE {
            Self::Complete
        } else {
            Self::Incomplete(s.to_owned())
        }
    }

    pub fn as_wire(&self) -> &str {
        match self {
            Self::Complete => Self::COMPLETE,
            Self::Incomplete(s) => s,
        }
    }
}

impl fmt::Display for SetupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

impl Serialize for SetupStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire())
    }
}

// ── Sensor ──────────────────────────────────────────────────────────

/// A sensor registered with the control plane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sensor {
    pub id: SensorId,
    pub name: String,
    pub description: String,
    pub activation_code: String,
    pub status: SensorStatus,
    pub setup_status: SetupStatus,
}

impl Sensor {
    pub fn is_ready(&self) -> bool {
        self.status == SensorStatus::Ready
    }

    pub fn is_dead(&self) -> bool {
        self.status == SensorStatus::ConnectionLost
    }

    pub fn is_setup_complete(&self) -> bool {
        self.setup_status == SetupStatus::Complete
    }
}

/// Desired sensor for provisioning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorSpec {
    pub name: String,
    pub description: String,
    /// Pre-existing activation code. When absent a key is minted.
    pub activation_code: Option<String>,
    /// Filled in once the sensor has registered.
    pub id: Option<SensorId>,
}

impl SensorSpec {
    pub const DEFAULT_DESCRIPTION: &'static str = "Created by usmctl";

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: Self::DEFAULT_DESCRIPTION.into(),
            activation_code: None,
            id: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_activation_code(mut self, code: impl Into<String>) -> Self {
        self.activation_code = Some(code.into());
        self
    }
}
