pub mod args;
pub mod assignments;
pub mod courses;
pub mod forums;
pub mod quizzes;
pub mod vpl;
mod registry;

pub use args::Args;
pub use assignments::{
    GetAssignmentsTool, GetSubmissionContentTool, GetSubmissionsTool, ProvideFeedbackTool,
};
pub use courses::{GetStudentsTool, SearchCoursesTool};
pub use forums::{GetForumDiscussionsTool, GetForumsTool};
pub use quizzes::{GetQuizGradeTool, GetQuizzesTool};
pub use registry::{
    course_selector_properties, json_schema_number, json_schema_object, json_schema_string, Tool,
    ToolRegistry,
};
pub use vpl::{GetVplAssignmentsTool, GetVplSubmissionTool};

use moodle_mcp_core::{CourseResolver, MoodleApi, SubmissionsReporter};
use std::sync::Arc;

/// Everything a tool needs to reach Moodle, shared by all tools.
#[derive(Clone)]
pub struct ToolContext {
    pub api: Arc<dyn MoodleApi>,
    pub resolver: Arc<CourseResolver>,
    pub reporter: Arc<SubmissionsReporter>,
}

/// Registry holding every Moodle tool, in the order they are listed.
pub fn moodle_tools(ctx: ToolContext) -> ToolRegistry {
    let mut registry = ToolRegistry::new();

    registry.register(Arc::new(SearchCoursesTool::new(ctx.clone())));
    registry.register(Arc::new(GetStudentsTool::new(ctx.clone())));
    registry.register(Arc::new(GetAssignmentsTool::new(ctx.clone())));
    registry.register(Arc::new(GetQuizzesTool::new(ctx.clone())));
    registry.register(Arc::new(GetVplAssignmentsTool::new(ctx.clone())));
    registry.register(Arc::new(GetSubmissionsTool::new(ctx.clone())));
    registry.register(Arc::new(GetVplSubmissionTool::new(ctx.clone())));
    registry.register(Arc::new(ProvideFeedbackTool::new(ctx.clone())));
    registry.register(Arc::new(GetSubmissionContentTool::new(ctx.clone())));
    registry.register(Arc::new(GetQuizGradeTool::new(ctx.clone())));
    registry.register(Arc::new(GetForumsTool::new(ctx.clone())));
    registry.register(Arc::new(GetForumDiscussionsTool::new(ctx)));

    registry
}
