// Assignment tools: listing, the submissions report, feedback and content

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{
    course_selector_properties, json_schema_number, json_schema_object, json_schema_string, Args,
    Tool, ToolContext,
};
use moodle_mcp_core::content::extract_submission_content;
use moodle_mcp_core::projection::SubmissionContentView;
use moodle_mcp_core::{Error, GradeUpdate, ReportFilter, Result};
use serde_json::Value;
use tracing::info;

pub const NO_ASSIGNMENTS: &str = "No assignments found for the given criteria.";

/// Assignments of a course
pub struct GetAssignmentsTool {
    ctx: ToolContext,
}

impl GetAssignmentsTool {
    pub fn new(ctx: ToolContext) -> Self {
        Self { ctx }
    }
}

#[async_trait::async_trait]
impl Tool for GetAssignmentsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_assignments".to_string(),
            description: "List the assignments of a course".to_string(),
            input_schema: json_schema_object(course_selector_properties(), vec![]),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args = Args::parse(arguments)?;
        let course_id = self.ctx.resolver.resolve(&args.course_query()?).await?;

        let assignments = self.ctx.api.assignments(course_id).await?;
        CallToolResult::json(&assignments)
    }
}

/// Submissions merged with grades, one entry per assignment
pub struct GetSubmissionsTool {
    ctx: ToolContext,
}

impl GetSubmissionsTool {
    pub fn new(ctx: ToolContext) -> Self {
        Self { ctx }
    }
}

#[async_trait::async_trait]
impl Tool for GetSubmissionsTool {
    fn schema(&self) -> ToolSchema {
        let mut properties = course_selector_properties();
        properties["studentId"] = json_schema_number("Only this student's submissions");
        properties["assignmentId"] = json_schema_number("Only this assignment");

        ToolSchema {
            name: "get_submissions".to_string(),
            description: "Submissions and grades per assignment of a course. Ungraded \
                          submissions show \"No calificado\""
                .to_string(),
            input_schema: json_schema_object(properties, vec![]),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args = Args::parse(arguments)?;
        let filter = ReportFilter {
            assignment_id: args.opt_id("assignmentId")?,
            student_id: args.opt_id("studentId")?,
        };
        let course_id = self.ctx.resolver.resolve(&args.course_query()?).await?;

        match self.ctx.reporter.build(course_id, filter).await {
            Ok(reports) if reports.is_empty() => Ok(CallToolResult::text(NO_ASSIGNMENTS)),
            Ok(reports) => CallToolResult::json(&reports),
            Err(Error::Upstream { message }) => Ok(CallToolResult::error(format!(
                "Moodle API error: {}. Check that the token is allowed to call \
                 mod_assign_get_submissions and mod_assign_get_grades.",
                message
            ))),
            Err(e) => Err(e),
        }
    }
}

/// Grade a submission and attach a feedback comment
pub struct ProvideFeedbackTool {
    ctx: ToolContext,
}

impl ProvideFeedbackTool {
    pub fn new(ctx: ToolContext) -> Self {
        Self { ctx }
    }
}

#[async_trait::async_trait]
impl Tool for ProvideFeedbackTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "provide_feedback".to_string(),
            description: "Save a grade and feedback comment on a student's latest attempt"
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "studentId": json_schema_number("Student user ID"),
                    "assignmentId": json_schema_number("Assignment ID"),
                    "grade": json_schema_number("Grade to assign (default 0)"),
                    "feedback": json_schema_string("Feedback comment, HTML allowed")
                }),
                vec!["studentId", "assignmentId", "feedback"],
            ),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args = Args::parse(arguments)?;
        let update = GradeUpdate {
            user_id: args.id("studentId")?,
            assignment_id: args.id("assignmentId")?,
            feedback: args.text("feedback")?,
            grade: args.opt_number("grade")?.unwrap_or(0.0),
        };

        info!(
            student_id = update.user_id,
            assignment_id = update.assignment_id,
            grade = update.grade,
            "Saving grade and feedback"
        );
        self.ctx.api.save_grade(&update).await?;

        Ok(CallToolResult::text(format!(
            "Feedback provided successfully for student {} on assignment {}.",
            update.user_id, update.assignment_id
        )))
    }
}

/// Text and files of one student's submission
pub struct GetSubmissionContentTool {
    ctx: ToolContext,
}

impl GetSubmissionContentTool {
    pub fn new(ctx: ToolContext) -> Self {
        Self { ctx }
    }
}

#[async_trait::async_trait]
impl Tool for GetSubmissionContentTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_submission_content".to_string(),
            description: "Online text and attached files of a student's assignment submission"
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "studentId": json_schema_number("Student user ID"),
                    "assignmentId": json_schema_number("Assignment ID")
                }),
                vec!["studentId", "assignmentId"],
            ),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args = Args::parse(arguments)?;
        let student_id = args.id("studentId")?;
        let assignment_id = args.id("assignmentId")?;

        let status = self
            .ctx
            .api
            .submission_status(assignment_id, student_id)
            .await?;
        let content = extract_submission_content(&status);

        CallToolResult::json(&SubmissionContentView::new(
            assignment_id,
            student_id,
            content,
        ))
    }
}
