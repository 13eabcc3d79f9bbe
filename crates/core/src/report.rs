// Submissions-and-grades report for the assignments of one course

use crate::api::MoodleApi;
use crate::error::{Error, Result};
use crate::gather::{gather_ordered, DEFAULT_MAX_IN_FLIGHT};
use crate::types::{Assignment, Grade, Submission, NO_TIMESTAMP, UNGRADED};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Optional narrowing of a report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportFilter {
    pub assignment_id: Option<i64>,
    pub student_id: Option<i64>,
}

/// A grade, or the "not graded yet" sentinel
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradeCell {
    Graded(f64),
    Ungraded,
}

impl Serialize for GradeCell {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Graded(grade) => serializer.serialize_f64(*grade),
            Self::Ungraded => serializer.serialize_str(UNGRADED),
        }
    }
}

/// An epoch timestamp rendered as ISO-8601, or the "N/A" sentinel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    At(DateTime<Utc>),
    Missing,
}

impl Timestamp {
    pub fn from_epoch(secs: i64) -> Self {
        if secs <= 0 {
            return Self::Missing;
        }
        DateTime::<Utc>::from_timestamp(secs, 0)
            .map(Self::At)
            .unwrap_or(Self::Missing)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::At(at) => serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true)),
            Self::Missing => serializer.serialize_str(NO_TIMESTAMP),
        }
    }
}

/// One submission merged with its grade
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionRow {
    pub userid: i64,
    pub status: String,
    pub timemodified: Timestamp,
    pub grade: GradeCell,
}

/// Report entry for one assignment. `error` is set, and `submissions` left
/// empty, when that assignment's data could not be fetched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentReport {
    #[serde(rename = "assignment")]
    pub name: String,
    #[serde(rename = "assignmentId")]
    pub assignment_id: i64,
    pub submissions: Vec<SubmissionRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Builds submission reports by fanning out one branch per assignment
pub struct SubmissionsReporter {
    api: Arc<dyn MoodleApi>,
    max_in_flight: usize,
}

impl SubmissionsReporter {
    pub fn new(api: Arc<dyn MoodleApi>) -> Self {
        Self {
            api,
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
        }
    }

    pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.max_in_flight = max_in_flight.max(1);
        self
    }

    /// Fetch the course's assignments, then submissions and grades for each
    /// target assignment concurrently.
    ///
    /// A failed assignments call fails the whole report. A failure inside one
    /// assignment's branch is recorded on that entry only. Entries come back
    /// in the order the server listed the assignments.
    pub async fn build(&self, course_id: i64, filter: ReportFilter) -> Result<Vec<AssignmentReport>> {
        let assignments = self.api.assignments(course_id).await?;

        let targets: Vec<Assignment> = match filter.assignment_id {
            Some(id) => assignments.into_iter().filter(|a| a.id == id).collect(),
            None => assignments,
        };
        if targets.is_empty() {
            debug!(course_id, ?filter, "No assignments matched the report filter");
            return Ok(Vec::new());
        }

        debug!(course_id, assignments = targets.len(), "Fanning out submission fetches");
        let branches = targets.iter().map(|assignment| {
            let api = self.api.clone();
            let assignment_id = assignment.id;
            let student_id = filter.student_id;
            async move { fetch_rows(api.as_ref(), assignment_id, student_id).await }
        });
        let outcomes = gather_ordered(branches, self.max_in_flight).await;

        Ok(targets
            .into_iter()
            .zip(outcomes)
            .map(|(assignment, outcome)| match outcome {
                Ok(submissions) => AssignmentReport {
                    name: assignment.name,
                    assignment_id: assignment.id,
                    submissions,
                    error: None,
                },
                Err(e) => {
                    warn!(assignment_id = assignment.id, error = %e, "Assignment branch failed");
                    AssignmentReport {
                        name: assignment.name,
                        assignment_id: assignment.id,
                        submissions: Vec::new(),
                        error: Some(branch_error_message(&e)),
                    }
                }
            })
            .collect())
    }
}

async fn fetch_rows(
    api: &dyn MoodleApi,
    assignment_id: i64,
    student_id: Option<i64>,
) -> Result<Vec<SubmissionRow>> {
    let (submissions, grades) =
        tokio::try_join!(api.submissions(assignment_id), api.grades(assignment_id))?;
    Ok(merge_rows(submissions, &grades, student_id))
}

/// Join submissions with grades by user id. Submissions without a grade are
/// kept with the ungraded sentinel.
pub fn merge_rows(
    submissions: Vec<Submission>,
    grades: &[Grade],
    student_id: Option<i64>,
) -> Vec<SubmissionRow> {
    // First grade listed for a user wins
    let mut by_user: HashMap<i64, &Grade> = HashMap::with_capacity(grades.len());
    for grade in grades {
        by_user.entry(grade.userid).or_insert(grade);
    }

    submissions
        .into_iter()
        .filter(|s| student_id.map_or(true, |id| s.userid == id))
        .map(|s| SubmissionRow {
            userid: s.userid,
            timemodified: Timestamp::from_epoch(s.timemodified),
            grade: by_user
                .get(&s.userid)
                .and_then(|g| g.grade)
                .map(GradeCell::Graded)
                .unwrap_or(GradeCell::Ungraded),
            status: s.status,
        })
        .collect()
}

fn branch_error_message(error: &Error) -> String {
    match error {
        Error::Upstream { message } => message.clone(),
        other => other.to_string(),
    }
}
