// Course lookup and participant tools

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{
    course_selector_properties, json_schema_object, json_schema_string, Args, Tool, ToolContext,
};
use moodle_mcp_core::projection::{students, CourseSearchResult};
use moodle_mcp_core::Result;
use serde_json::Value;
use tracing::info;

/// Two-tier course search by name
pub struct SearchCoursesTool {
    ctx: ToolContext,
}

impl SearchCoursesTool {
    pub fn new(ctx: ToolContext) -> Self {
        Self { ctx }
    }
}

#[async_trait::async_trait]
impl Tool for SearchCoursesTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "search_courses".to_string(),
            description: "Search courses by name. Matching ignores accents and case, and \
                          falls back to partial matches on full and short names"
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "courseName": json_schema_string("Course name or part of it")
                }),
                vec!["courseName"],
            ),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args = Args::parse(arguments)?;
        let name = args.text("courseName")?;

        let courses = self.ctx.resolver.search(&name).await?;
        info!(term = %name, found = courses.len(), "Course search");

        CallToolResult::json(&CourseSearchResult::new(name, courses))
    }
}

/// Students enrolled in a course
pub struct GetStudentsTool {
    ctx: ToolContext,
}

impl GetStudentsTool {
    pub fn new(ctx: ToolContext) -> Self {
        Self { ctx }
    }
}

#[async_trait::async_trait]
impl Tool for GetStudentsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_students".to_string(),
            description: "List the students enrolled in a course".to_string(),
            input_schema: json_schema_object(course_selector_properties(), vec![]),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args = Args::parse(arguments)?;
        let course_id = self.ctx.resolver.resolve(&args.course_query()?).await?;

        let users = self.ctx.api.enrolled_users(course_id).await?;
        CallToolResult::json(&students(users))
    }
}
