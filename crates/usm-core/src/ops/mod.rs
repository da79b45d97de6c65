// ── Resource operation sets ──
//
// Thin CRUD layers over the session client. Each set borrows an
// authenticated `ControlClient`; none of them holds state.

pub mod jobs;
pub mod keys;
pub mod sensors;

pub use jobs::JobSet;
pub use keys::SensorKeySet;
pub use sensors::SensorSet;
