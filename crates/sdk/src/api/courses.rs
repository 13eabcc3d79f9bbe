//! Course catalogue functions.

use crate::client::MoodleClient;
use crate::error::MoodleResult;
use crate::transport::WsParams;
use moodle_mcp_core::types::{Course, CourseSection};
use serde::Deserialize;

/// `core_course_*` functions.
pub struct CoursesApi<'a> {
    client: &'a MoodleClient,
}

impl<'a> CoursesApi<'a> {
    pub(crate) fn new(client: &'a MoodleClient) -> Self {
        Self { client }
    }

    /// Keyword search over course names and summaries.
    pub async fn search(&self, keyword: &str) -> MoodleResult<Vec<Course>> {
        let params = WsParams::new()
            .arg("criterianame", "search")
            .arg("criteriavalue", keyword);
        let response: SearchCoursesResponse = self
            .client
            .http
            .read("core_course_search_courses", params)
            .await?;
        Ok(response.courses)
    }

    /// Every course visible to the token.
    pub async fn list(&self) -> MoodleResult<Vec<Course>> {
        self.client
            .http
            .read("core_course_get_courses", WsParams::new())
            .await
    }

    /// Sections and modules of a course.
    pub async fn contents(&self, course_id: i64) -> MoodleResult<Vec<CourseSection>> {
        let params = WsParams::new().arg("courseid", course_id);
        self.client
            .http
            .read("core_course_get_contents", params)
            .await
    }
}

#[derive(Debug, Deserialize)]
struct SearchCoursesResponse {
    #[serde(default)]
    courses: Vec<Course>,
}
