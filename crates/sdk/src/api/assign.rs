//! Assignment functions.

use crate::client::MoodleClient;
use crate::error::MoodleResult;
use crate::transport::WsParams;
use moodle_mcp_core::content::SubmissionStatus;
use moodle_mcp_core::types::{Assignment, Grade, GradeUpdate, Submission};
use serde::Deserialize;

/// Feedback text is stored as HTML.
const FEEDBACK_FORMAT_HTML: i32 = 1;

/// `mod_assign_*` functions.
pub struct AssignApi<'a> {
    client: &'a MoodleClient,
}

impl<'a> AssignApi<'a> {
    pub(crate) fn new(client: &'a MoodleClient) -> Self {
        Self { client }
    }

    /// Assignments of one course.
    ///
    /// The per-course `courses` list must be present; a body without it is
    /// reported as an unexpected response rather than an empty result.
    pub async fn assignments(&self, course_id: i64) -> MoodleResult<Vec<Assignment>> {
        let params = WsParams::new().list("courseids", &[course_id]);
        let response: AssignmentsResponse = self
            .client
            .http
            .read("mod_assign_get_assignments", params)
            .await?;

        Ok(response
            .courses
            .into_iter()
            .next()
            .map(|course| course.assignments)
            .unwrap_or_default())
    }

    /// Submissions of one assignment.
    pub async fn submissions(&self, assignment_id: i64) -> MoodleResult<Vec<Submission>> {
        let params = WsParams::new().list("assignmentids", &[assignment_id]);
        let response: SubmissionsResponse = self
            .client
            .http
            .read("mod_assign_get_submissions", params)
            .await?;

        Ok(response
            .assignments
            .into_iter()
            .next()
            .map(|a| a.submissions)
            .unwrap_or_default())
    }

    /// Grades of one assignment.
    pub async fn grades(&self, assignment_id: i64) -> MoodleResult<Vec<Grade>> {
        let params = WsParams::new().list("assignmentids", &[assignment_id]);
        let response: GradesResponse = self
            .client
            .http
            .read("mod_assign_get_grades", params)
            .await?;

        Ok(response
            .assignments
            .into_iter()
            .next()
            .map(|a| a.grades)
            .unwrap_or_default())
    }

    /// Detailed status of one student's submission, including plugin data.
    pub async fn submission_status(
        &self,
        assignment_id: i64,
        user_id: i64,
    ) -> MoodleResult<SubmissionStatus> {
        let params = WsParams::new()
            .arg("assignid", assignment_id)
            .arg("userid", user_id);
        self.client
            .http
            .read("mod_assign_get_submission_status", params)
            .await
    }

    /// Grade the latest attempt and attach feedback, released immediately.
    pub async fn save_grade(&self, update: &GradeUpdate) -> MoodleResult<()> {
        let params = WsParams::new()
            .arg("assignmentid", update.assignment_id)
            .arg("userid", update.user_id)
            .arg("grade", update.grade)
            .arg("attemptnumber", -1)
            .arg("addattempt", 0)
            .arg("workflowstate", "released")
            .arg("applytoall", 0)
            .nested(
                &["plugindata", "assignfeedbackcomments_editor", "text"],
                &update.feedback,
            )
            .nested(
                &["plugindata", "assignfeedbackcomments_editor", "format"],
                FEEDBACK_FORMAT_HTML,
            );

        let _: serde_json::Value = self
            .client
            .http
            .write("mod_assign_save_grade", params)
            .await?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct AssignmentsResponse {
    courses: Vec<CourseAssignments>,
}

#[derive(Debug, Deserialize)]
struct CourseAssignments {
    #[serde(default)]
    assignments: Vec<Assignment>,
}

#[derive(Debug, Deserialize)]
struct SubmissionsResponse {
    #[serde(default)]
    assignments: Vec<AssignmentSubmissions>,
}

#[derive(Debug, Deserialize)]
struct AssignmentSubmissions {
    #[serde(default)]
    submissions: Vec<Submission>,
}

#[derive(Debug, Deserialize)]
struct GradesResponse {
    #[serde(default)]
    assignments: Vec<AssignmentGrades>,
}

#[derive(Debug, Deserialize)]
struct AssignmentGrades {
    #[serde(default)]
    grades: Vec<Grade>,
}
