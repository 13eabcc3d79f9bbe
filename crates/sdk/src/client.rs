//! Main client for the Moodle web service.

use crate::api::*;
use crate::config::{ClientConfig, RetryConfig};
use crate::error::{MoodleError, MoodleResult};
use crate::transport::HttpTransport;
use async_trait::async_trait;
use moodle_mcp_core::content::SubmissionStatus;
use moodle_mcp_core::types::{
    Assignment, Course, CourseSection, Discussion, EnrolledUser, Forum, Grade, GradeUpdate, Quiz,
    QuizGrade, Submission,
};
use moodle_mcp_core::MoodleApi;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Client for a Moodle site's REST web service endpoint.
#[derive(Debug, Clone)]
pub struct MoodleClient {
    config: Arc<ClientConfig>,
    pub(crate) http: HttpTransport,
}

impl MoodleClient {
    /// Create a new client builder.
    pub fn builder() -> MoodleClientBuilder {
        MoodleClientBuilder::new()
    }

    /// Create a client from configuration.
    pub fn from_config(config: ClientConfig) -> MoodleResult<Self> {
        let config = Arc::new(config);
        let http = HttpTransport::new(config.clone())?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the course catalogue API.
    pub fn courses(&self) -> CoursesApi<'_> {
        CoursesApi::new(self)
    }

    /// Get the enrolment API.
    pub fn enrol(&self) -> EnrolApi<'_> {
        EnrolApi::new(self)
    }

    /// Get the assignments API.
    pub fn assign(&self) -> AssignApi<'_> {
        AssignApi::new(self)
    }

    /// Get the quiz API.
    pub fn quiz(&self) -> QuizApi<'_> {
        QuizApi::new(self)
    }

    /// Get the VPL API.
    pub fn vpl(&self) -> VplApi<'_> {
        VplApi::new(self)
    }

    /// Get the forum API.
    pub fn forum(&self) -> ForumApi<'_> {
        ForumApi::new(self)
    }
}

#[async_trait]
impl MoodleApi for MoodleClient {
    async fn search_courses(&self, keyword: &str) -> moodle_mcp_core::Result<Vec<Course>> {
        Ok(self.courses().search(keyword).await?)
    }

    async fn list_courses(&self) -> moodle_mcp_core::Result<Vec<Course>> {
        Ok(self.courses().list().await?)
    }

    async fn enrolled_users(&self, course_id: i64) -> moodle_mcp_core::Result<Vec<EnrolledUser>> {
        Ok(self.enrol().enrolled_users(course_id).await?)
    }

    async fn course_contents(
        &self,
        course_id: i64,
    ) -> moodle_mcp_core::Result<Vec<CourseSection>> {
        Ok(self.courses().contents(course_id).await?)
    }

    async fn assignments(&self, course_id: i64) -> moodle_mcp_core::Result<Vec<Assignment>> {
        Ok(self.assign().assignments(course_id).await?)
    }

    async fn submissions(&self, assignment_id: i64) -> moodle_mcp_core::Result<Vec<Submission>> {
        Ok(self.assign().submissions(assignment_id).await?)
    }

    async fn grades(&self, assignment_id: i64) -> moodle_mcp_core::Result<Vec<Grade>> {
        Ok(self.assign().grades(assignment_id).await?)
    }

    async fn submission_status(
        &self,
        assignment_id: i64,
        user_id: i64,
    ) -> moodle_mcp_core::Result<SubmissionStatus> {
        Ok(self
            .assign()
            .submission_status(assignment_id, user_id)
            .await?)
    }

    async fn save_grade(&self, update: &GradeUpdate) -> moodle_mcp_core::Result<()> {
        Ok(self.assign().save_grade(update).await?)
    }

    async fn quizzes(&self, course_id: i64) -> moodle_mcp_core::Result<Vec<Quiz>> {
        Ok(self.quiz().quizzes(course_id).await?)
    }

    async fn quiz_best_grade(
        &self,
        quiz_id: i64,
        user_id: i64,
    ) -> moodle_mcp_core::Result<QuizGrade> {
        Ok(self.quiz().best_grade(quiz_id, user_id).await?)
    }

    async fn vpl_open(&self, cm_id: i64) -> moodle_mcp_core::Result<Value> {
        Ok(self.vpl().open(cm_id).await?)
    }

    async fn forums(&self, course_id: i64) -> moodle_mcp_core::Result<Vec<Forum>> {
        Ok(self.forum().forums(course_id).await?)
    }

    async fn forum_discussions(&self, forum_id: i64) -> moodle_mcp_core::Result<Vec<Discussion>> {
        Ok(self.forum().discussions(forum_id).await?)
    }
}

/// Builder for creating a MoodleClient.
pub struct MoodleClientBuilder {
    base_url: Option<String>,
    token: Option<String>,
    timeout: Duration,
    retry_config: RetryConfig,
}

impl MoodleClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            base_url: None,
            token: None,
            timeout: Duration::from_secs(30),
            retry_config: RetryConfig::default(),
        }
    }

    /// Set the REST endpoint URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the web service token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the retry configuration.
    pub fn retry_config(mut self, config: RetryConfig) -> Self {
        self.retry_config = config;
        self
    }

    /// Build the client.
    pub fn build(self) -> MoodleResult<MoodleClient> {
        let base_url_str = self
            .base_url
            .ok_or_else(|| MoodleError::Config("base_url is required".to_string()))?;
        let token = self
            .token
            .ok_or_else(|| MoodleError::Config("token is required".to_string()))?;

        let base_url = Url::parse(&base_url_str)?;

        let config = ClientConfig {
            base_url,
            token,
            timeout: self.timeout,
            retry_config: self.retry_config,
        };

        MoodleClient::from_config(config)
    }
}

impl Default for MoodleClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
