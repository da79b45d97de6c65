// License endpoint

use crate::control::client::ControlClient;
use crate::control::models::LicenseRecord;
use crate::error::Error;

impl ControlClient {
    /// Fetch the account license.
    ///
    /// `GET /license`
    pub async fn get_license(&self) -> Result<LicenseRecord, Error> {
        self.get("license", "get license").await
    }
}
