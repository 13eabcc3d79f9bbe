// Virtual Programming Lab tools

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{course_selector_properties, json_schema_number, json_schema_object, Args, Tool, ToolContext};
use moodle_mcp_core::projection::{vpl_activities, VplSubmissionView};
use moodle_mcp_core::{Error, Result};
use serde_json::Value;

/// VPL activities across a course's sections
pub struct GetVplAssignmentsTool {
    ctx: ToolContext,
}

impl GetVplAssignmentsTool {
    pub fn new(ctx: ToolContext) -> Self {
        Self { ctx }
    }
}

#[async_trait::async_trait]
impl Tool for GetVplAssignmentsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_vpl_assignments".to_string(),
            description: "List the VPL (Virtual Programming Lab) activities of a course, with \
                          the course module id (cmid) needed to open them"
                .to_string(),
            input_schema: json_schema_object(course_selector_properties(), vec![]),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args = Args::parse(arguments)?;
        let course_id = self.ctx.resolver.resolve(&args.course_query()?).await?;

        let sections = self.ctx.api.course_contents(course_id).await?;
        CallToolResult::json(&vpl_activities(&sections))
    }
}

/// Open a student's VPL submission
pub struct GetVplSubmissionTool {
    ctx: ToolContext,
}

impl GetVplSubmissionTool {
    pub fn new(ctx: ToolContext) -> Self {
        Self { ctx }
    }
}

#[async_trait::async_trait]
impl Tool for GetVplSubmissionTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_vpl_submission".to_string(),
            description: "Open a student's VPL submission. Pass cmId when known; otherwise \
                          vplId is used as the module id"
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "vplId": json_schema_number("VPL instance ID"),
                    "studentId": json_schema_number("Student user ID"),
                    "cmId": json_schema_number("Course module ID of the VPL activity")
                }),
                vec!["vplId", "studentId"],
            ),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args = Args::parse(arguments)?;
        let vpl_id = args.id("vplId")?;
        let student_id = args.id("studentId")?;
        let cm_id = args.opt_id("cmId")?.unwrap_or(vpl_id);

        match self.ctx.api.vpl_open(cm_id).await {
            Ok(payload) => CallToolResult::json(&VplSubmissionView::new(
                vpl_id, student_id, cm_id, payload,
            )),
            Err(Error::Upstream { message }) => Ok(CallToolResult::error(format!(
                "Moodle API error: {}. VPL needs the course module id (cmId) of the activity.",
                message
            ))),
            Err(e) => Err(e),
        }
    }
}
