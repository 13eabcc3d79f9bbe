// In-memory MoodleApi double for unit tests

use crate::api::MoodleApi;
use crate::content::SubmissionStatus;
use crate::error::{Error, Result};
use crate::types::{
    Assignment, Course, CourseSection, Discussion, EnrolledUser, Forum, Grade, GradeUpdate, Quiz,
    QuizGrade, Submission,
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Canned responses keyed by id; every call is recorded by function name.
#[derive(Default)]
pub struct FakeMoodle {
    pub search_results: Vec<Course>,
    pub all_courses: Vec<Course>,
    pub users: Vec<EnrolledUser>,
    pub sections: Vec<CourseSection>,
    /// `Err` simulates a malformed assignments response
    pub assignments: Option<Result<Vec<Assignment>>>,
    pub submissions: HashMap<i64, Result<Vec<Submission>>>,
    pub grades: HashMap<i64, Result<Vec<Grade>>>,
    /// Delay applied to the submissions call of an assignment
    pub delays: HashMap<i64, Duration>,
    calls: Mutex<Vec<String>>,
}

impl FakeMoodle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, function: &str) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(function.to_string());
        }
    }
}

#[async_trait::async_trait]
impl MoodleApi for FakeMoodle {
    async fn search_courses(&self, _keyword: &str) -> Result<Vec<Course>> {
        self.record("core_course_search_courses");
        Ok(self.search_results.clone())
    }

    async fn list_courses(&self) -> Result<Vec<Course>> {
        self.record("core_course_get_courses");
        Ok(self.all_courses.clone())
    }

    async fn enrolled_users(&self, _course_id: i64) -> Result<Vec<EnrolledUser>> {
        self.record("core_enrol_get_enrolled_users");
        Ok(self.users.clone())
    }

    async fn course_contents(&self, _course_id: i64) -> Result<Vec<CourseSection>> {
        self.record("core_course_get_contents");
        Ok(self.sections.clone())
    }

    async fn assignments(&self, _course_id: i64) -> Result<Vec<Assignment>> {
        self.record("mod_assign_get_assignments");
        self.assignments.clone().unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn submissions(&self, assignment_id: i64) -> Result<Vec<Submission>> {
        self.record("mod_assign_get_submissions");
        if let Some(delay) = self.delays.get(&assignment_id) {
            tokio::time::sleep(*delay).await;
        }
        self.submissions
            .get(&assignment_id)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn grades(&self, assignment_id: i64) -> Result<Vec<Grade>> {
        self.record("mod_assign_get_grades");
        self.grades
            .get(&assignment_id)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn submission_status(
        &self,
        _assignment_id: i64,
        _user_id: i64,
    ) -> Result<SubmissionStatus> {
        self.record("mod_assign_get_submission_status");
        Ok(SubmissionStatus::default())
    }

    async fn save_grade(&self, _update: &GradeUpdate) -> Result<()> {
        self.record("mod_assign_save_grade");
        Ok(())
    }

    async fn quizzes(&self, _course_id: i64) -> Result<Vec<Quiz>> {
        self.record("mod_quiz_get_quizzes_by_courses");
        Ok(Vec::new())
    }

    async fn quiz_best_grade(&self, _quiz_id: i64, _user_id: i64) -> Result<QuizGrade> {
        self.record("mod_quiz_get_user_best_grade");
        Err(Error::upstream("not configured"))
    }

    async fn vpl_open(&self, _cm_id: i64) -> Result<Value> {
        self.record("mod_vpl_open");
        Ok(Value::Null)
    }

    async fn forums(&self, _course_id: i64) -> Result<Vec<Forum>> {
        self.record("mod_forum_get_forums_by_courses");
        Ok(Vec::new())
    }

    async fn forum_discussions(&self, _forum_id: i64) -> Result<Vec<Discussion>> {
        self.record("mod_forum_get_forum_discussions");
        Ok(Vec::new())
    }
}
