//! Enrolment functions.

use crate::client::MoodleClient;
use crate::error::MoodleResult;
use crate::transport::WsParams;
use moodle_mcp_core::types::EnrolledUser;

/// `core_enrol_*` functions.
pub struct EnrolApi<'a> {
    client: &'a MoodleClient,
}

impl<'a> EnrolApi<'a> {
    pub(crate) fn new(client: &'a MoodleClient) -> Self {
        Self { client }
    }

    /// Users enrolled in a course, with their roles.
    pub async fn enrolled_users(&self, course_id: i64) -> MoodleResult<Vec<EnrolledUser>> {
        let params = WsParams::new().arg("courseid", course_id);
        self.client
            .http
            .read("core_enrol_get_enrolled_users", params)
            .await
    }
}
