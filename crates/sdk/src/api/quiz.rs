//! Quiz functions.

use crate::client::MoodleClient;
use crate::error::MoodleResult;
use crate::transport::WsParams;
use moodle_mcp_core::types::{Quiz, QuizGrade};
use serde::Deserialize;

/// `mod_quiz_*` functions.
pub struct QuizApi<'a> {
    client: &'a MoodleClient,
}

impl<'a> QuizApi<'a> {
    pub(crate) fn new(client: &'a MoodleClient) -> Self {
        Self { client }
    }

    /// Quizzes of one course.
    pub async fn quizzes(&self, course_id: i64) -> MoodleResult<Vec<Quiz>> {
        let params = WsParams::new().list("courseids", &[course_id]);
        let response: QuizzesResponse = self
            .client
            .http
            .read("mod_quiz_get_quizzes_by_courses", params)
            .await?;
        Ok(response.quizzes)
    }

    /// Best grade of one user on one quiz.
    pub async fn best_grade(&self, quiz_id: i64, user_id: i64) -> MoodleResult<QuizGrade> {
        let params = WsParams::new()
            .arg("quizid", quiz_id)
            .arg("userid", user_id);
        self.client
            .http
            .read("mod_quiz_get_user_best_grade", params)
            .await
    }
}

#[derive(Debug, Deserialize)]
struct QuizzesResponse {
    #[serde(default)]
    quizzes: Vec<Quiz>,
}
