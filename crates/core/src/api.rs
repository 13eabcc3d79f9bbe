// Remote web-service operations the resolver, aggregator and tools depend on

use crate::content::SubmissionStatus;
use crate::error::Result;
use crate::types::{
    Assignment, Course, CourseSection, Discussion, EnrolledUser, Forum, Grade, GradeUpdate, Quiz,
    QuizGrade, Submission,
};
use serde_json::Value;

/// One method per remote function. Implementations must be safe to call
/// concurrently; the aggregator issues several calls at once.
#[async_trait::async_trait]
pub trait MoodleApi: Send + Sync {
    /// `core_course_search_courses` by keyword
    async fn search_courses(&self, keyword: &str) -> Result<Vec<Course>>;

    /// `core_course_get_courses` with no filter (every visible course)
    async fn list_courses(&self) -> Result<Vec<Course>>;

    /// `core_enrol_get_enrolled_users`
    async fn enrolled_users(&self, course_id: i64) -> Result<Vec<EnrolledUser>>;

    /// `core_course_get_contents`
    async fn course_contents(&self, course_id: i64) -> Result<Vec<CourseSection>>;

    /// `mod_assign_get_assignments`; fails if the response is not the
    /// expected per-course structure
    async fn assignments(&self, course_id: i64) -> Result<Vec<Assignment>>;

    /// `mod_assign_get_submissions`
    async fn submissions(&self, assignment_id: i64) -> Result<Vec<Submission>>;

    /// `mod_assign_get_grades`
    async fn grades(&self, assignment_id: i64) -> Result<Vec<Grade>>;

    /// `mod_assign_get_submission_status`
    async fn submission_status(&self, assignment_id: i64, user_id: i64)
        -> Result<SubmissionStatus>;

    /// `mod_assign_save_grade`. Not idempotent from the caller's point of
    /// view; never retried.
    async fn save_grade(&self, update: &GradeUpdate) -> Result<()>;

    /// `mod_quiz_get_quizzes_by_courses`
    async fn quizzes(&self, course_id: i64) -> Result<Vec<Quiz>>;

    /// `mod_quiz_get_user_best_grade`
    async fn quiz_best_grade(&self, quiz_id: i64, user_id: i64) -> Result<QuizGrade>;

    /// `mod_vpl_open` for a course module; the payload is passed through as is
    async fn vpl_open(&self, cm_id: i64) -> Result<Value>;

    /// `mod_forum_get_forums_by_courses`
    async fn forums(&self, course_id: i64) -> Result<Vec<Forum>>;

    /// `mod_forum_get_forum_discussions`
    async fn forum_discussions(&self, forum_id: i64) -> Result<Vec<Discussion>>;
}
