// Fixed projections applied to single-call (pass-through) results

use crate::content::{SubmissionContent, SubmissionFile};
use crate::report::GradeCell;
use crate::types::{Course, CourseSection, EnrolledUser, QuizGrade};
use serde::Serialize;
use serde_json::Value;

const STUDENT_ROLE: &str = "student";
const VPL_MODNAME: &str = "vpl";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Student {
    pub id: i64,
    pub username: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
}

/// Participants holding the student role
pub fn students(users: Vec<EnrolledUser>) -> Vec<Student> {
    users
        .into_iter()
        .filter(|u| u.roles.iter().any(|r| r.shortname == STUDENT_ROLE))
        .map(|u| Student {
            id: u.id,
            username: u.username,
            firstname: u.firstname,
            lastname: u.lastname,
            email: u.email,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VplActivity {
    pub name: String,
    pub vplid: i64,
    pub cmid: i64,
    pub section: String,
    pub intro: String,
}

/// VPL modules across all sections, in section order
pub fn vpl_activities(sections: &[CourseSection]) -> Vec<VplActivity> {
    sections
        .iter()
        .flat_map(|section| {
            section
                .modules
                .iter()
                .filter(|m| m.modname == VPL_MODNAME)
                .map(move |m| VplActivity {
                    name: m.name.clone(),
                    vplid: m.instance,
                    cmid: m.id,
                    section: section.name.clone(),
                    intro: m.description.clone().unwrap_or_default(),
                })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSearchResult {
    pub search_term: String,
    pub total_found: usize,
    pub courses: Vec<Course>,
}

impl CourseSearchResult {
    pub fn new(search_term: impl Into<String>, courses: Vec<Course>) -> Self {
        Self {
            search_term: search_term.into(),
            total_found: courses.len(),
            courses,
        }
    }
}

/// Quiz grade tagged with the ids the caller asked about
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizGradeView {
    pub quiz_id: i64,
    pub student_id: i64,
    pub has_grade: bool,
    pub grade: GradeCell,
}

impl QuizGradeView {
    pub fn new(quiz_id: i64, student_id: i64, grade: &QuizGrade) -> Self {
        let value = match (grade.hasgrade, grade.grade) {
            (true, Some(g)) => GradeCell::Graded(g),
            _ => GradeCell::Ungraded,
        };
        Self {
            quiz_id,
            student_id,
            has_grade: grade.hasgrade,
            grade: value,
        }
    }
}

/// VPL open payload tagged with the ids the caller asked about
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VplSubmissionView {
    pub vpl_id: i64,
    pub student_id: i64,
    /// The module id the upstream call was made with
    pub cm_id: i64,
    pub submission_data: Value,
    pub status: Value,
}

impl VplSubmissionView {
    pub fn new(vpl_id: i64, student_id: i64, cm_id: i64, payload: Value) -> Self {
        let status = payload
            .get("status")
            .filter(|s| !s.is_null() && s.as_str() != Some(""))
            .cloned()
            .unwrap_or_else(|| Value::String("No submission found".to_string()));
        Self {
            vpl_id,
            student_id,
            cm_id,
            submission_data: payload,
            status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentPart {
    Onlinetext { content: String },
    File { files: Vec<SubmissionFile> },
}

/// Submission content tagged with the ids the caller asked about
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionContentView {
    pub assignment: i64,
    pub userid: i64,
    pub status: String,
    pub submissiontext: String,
    pub plugins: Vec<ContentPart>,
    pub timemodified: i64,
}

impl SubmissionContentView {
    pub fn new(assignment: i64, userid: i64, content: SubmissionContent) -> Self {
        Self {
            assignment,
            userid,
            status: content.status,
            submissiontext: content.submission_text.clone(),
            plugins: vec![
                ContentPart::Onlinetext {
                    content: content.submission_text,
                },
                ContentPart::File {
                    files: content.files,
                },
            ],
            timemodified: content.timemodified,
        }
    }
}
