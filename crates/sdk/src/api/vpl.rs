//! Virtual Programming Lab functions.

use crate::client::MoodleClient;
use crate::error::MoodleResult;
use crate::transport::WsParams;
use serde_json::Value;

/// `mod_vpl_*` functions.
pub struct VplApi<'a> {
    client: &'a MoodleClient,
}

impl<'a> VplApi<'a> {
    pub(crate) fn new(client: &'a MoodleClient) -> Self {
        Self { client }
    }

    /// Open a VPL activity by course-module id. The payload shape depends on
    /// the plugin version, so it is returned untouched.
    pub async fn open(&self, cm_id: i64) -> MoodleResult<Value> {
        let params = WsParams::new().arg("id", cm_id);
        self.client.http.read("mod_vpl_open", params).await
    }
}
