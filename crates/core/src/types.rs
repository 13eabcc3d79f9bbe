use crate::loose;
use serde::{Deserialize, Serialize};

/// Sentinel shown where a grade has not been assigned yet.
pub const UNGRADED: &str = "No calificado";

/// Sentinel shown where a timestamp is zero or missing.
pub const NO_TIMESTAMP: &str = "N/A";

/// A course as returned by the course search or listing functions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    #[serde(default)]
    pub fullname: String,
    #[serde(default)]
    pub shortname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categoryid: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categoryname: Option<String>,
    #[serde(
        default,
        deserialize_with = "loose::opt_bool",
        skip_serializing_if = "Option::is_none"
    )]
    pub visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub startdate: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enddate: Option<i64>,
}

impl Course {
    pub fn new(id: i64, fullname: impl Into<String>, shortname: impl Into<String>) -> Self {
        Self {
            id,
            fullname: fullname.into(),
            shortname: shortname.into(),
            categoryid: None,
            categoryname: None,
            visible: None,
            startdate: None,
            enddate: None,
        }
    }
}

/// An assignment activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmid: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intro: Option<String>,
    #[serde(default, deserialize_with = "loose::int_or_zero")]
    pub duedate: i64,
    #[serde(default, deserialize_with = "loose::int_or_zero")]
    pub allowsubmissionsfromdate: i64,
    #[serde(default, deserialize_with = "loose::int_or_zero")]
    pub cutoffdate: i64,
    /// Maximum grade
    #[serde(default, deserialize_with = "loose::opt_number")]
    pub grade: Option<f64>,
    #[serde(default, deserialize_with = "loose::int_or_zero")]
    pub timemodified: i64,
}

impl Assignment {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            cmid: None,
            name: name.into(),
            intro: None,
            duedate: 0,
            allowsubmissionsfromdate: 0,
            cutoffdate: 0,
            grade: None,
            timemodified: 0,
        }
    }
}

/// A student's submission to an assignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    #[serde(default)]
    pub id: i64,
    pub userid: i64,
    /// "new", "submitted", "draft", "reopened", ...
    #[serde(default)]
    pub status: String,
    #[serde(default, deserialize_with = "loose::int_or_zero")]
    pub timemodified: i64,
    #[serde(default)]
    pub gradingstatus: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradefordisplay: Option<String>,
}

impl Submission {
    pub fn new(userid: i64, status: impl Into<String>, timemodified: i64) -> Self {
        Self {
            id: 0,
            userid,
            status: status.into(),
            timemodified,
            gradingstatus: String::new(),
            gradefordisplay: None,
        }
    }
}

/// A grade entry, keyed by user within one assignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    pub userid: i64,
    #[serde(default, deserialize_with = "loose::opt_number")]
    pub grade: Option<f64>,
}

/// A course participant with their roles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrolledUser {
    pub id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub roles: Vec<Role>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    #[serde(default)]
    pub roleid: i64,
    #[serde(default)]
    pub shortname: String,
}

/// A course section from the course contents listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseSection {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub modules: Vec<CourseModule>,
}

/// A course module (activity instance) inside a section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseModule {
    /// Course module id (cmid)
    pub id: i64,
    #[serde(default)]
    pub name: String,
    /// Id of the activity instance in its own module table
    #[serde(default)]
    pub instance: i64,
    #[serde(default)]
    pub modname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: i64,
    #[serde(default)]
    pub course: i64,
    #[serde(default)]
    pub coursemodule: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub intro: String,
    #[serde(default, deserialize_with = "loose::int_or_zero")]
    pub timeopen: i64,
    #[serde(default, deserialize_with = "loose::int_or_zero")]
    pub timeclose: i64,
    #[serde(default, deserialize_with = "loose::int_or_zero")]
    pub timelimit: i64,
    #[serde(default, deserialize_with = "loose::opt_number")]
    pub grade: Option<f64>,
    #[serde(default, deserialize_with = "loose::opt_number")]
    pub sumgrades: Option<f64>,
    #[serde(default, deserialize_with = "loose::int_or_zero")]
    pub attempts: i64,
    #[serde(default, deserialize_with = "loose::int_or_zero")]
    pub timemodified: i64,
}

/// Best grade of one user in one quiz
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizGrade {
    #[serde(default, deserialize_with = "loose::bool_or_false")]
    pub hasgrade: bool,
    #[serde(default, deserialize_with = "loose::opt_number")]
    pub grade: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forum {
    pub id: i64,
    #[serde(default)]
    pub course: i64,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub intro: String,
    #[serde(default, deserialize_with = "loose::int_or_zero")]
    pub numdiscussions: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmid: Option<i64>,
    #[serde(default, deserialize_with = "loose::int_or_zero")]
    pub timemodified: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discussion {
    pub id: i64,
    /// Id of the discussion this first post opens
    #[serde(default)]
    pub discussion: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub userid: i64,
    #[serde(default)]
    pub userfullname: String,
    #[serde(default, deserialize_with = "loose::int_or_zero")]
    pub created: i64,
    #[serde(default, deserialize_with = "loose::int_or_zero")]
    pub modified: i64,
    #[serde(default, deserialize_with = "loose::int_or_zero")]
    pub numreplies: i64,
    #[serde(default, deserialize_with = "loose::bool_or_false")]
    pub pinned: bool,
}

/// Grade and feedback comment to store for one student
#[derive(Debug, Clone, PartialEq)]
pub struct GradeUpdate {
    pub assignment_id: i64,
    pub user_id: i64,
    pub grade: f64,
    /// Feedback comment, stored as HTML
    pub feedback: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_course_from_listing() {
        let course: Course = serde_json::from_value(json!({
            "id": 7,
            "fullname": "Programación I",
            "shortname": "PROG1",
            "categoryid": 3,
            "visible": 1,
            "format": "topics"
        }))
        .unwrap();

        assert_eq!(course.id, 7);
        assert_eq!(course.visible, Some(true));
        assert!(course.categoryname.is_none());

        let out = serde_json::to_value(&course).unwrap();
        assert_eq!(out["visible"], json!(true));
        assert!(out.get("categoryname").is_none());
    }

    #[test]
    fn test_grade_string_encoding() {
        let grade: Grade = serde_json::from_value(json!({"userid": 4, "grade": "7.50000"})).unwrap();
        assert_eq!(grade.grade, Some(7.5));
    }

    #[test]
    fn test_forum_type_field() {
        let forum: Forum =
            serde_json::from_value(json!({"id": 1, "type": "news", "name": "Announcements"}))
                .unwrap();
        assert_eq!(forum.kind, "news");
        assert_eq!(serde_json::to_value(&forum).unwrap()["type"], "news");
    }

    #[test]
    fn test_enrolled_user_without_roles() {
        let user: EnrolledUser = serde_json::from_value(json!({"id": 2, "username": "ana"})).unwrap();
        assert!(user.roles.is_empty());
    }
}
