// Forum tools

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{course_selector_properties, json_schema_number, json_schema_object, Args, Tool, ToolContext};
use moodle_mcp_core::Result;
use serde_json::Value;

/// Forums of a course
pub struct GetForumsTool {
    ctx: ToolContext,
}

impl GetForumsTool {
    pub fn new(ctx: ToolContext) -> Self {
        Self { ctx }
    }
}

#[async_trait::async_trait]
impl Tool for GetForumsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_forums".to_string(),
            description: "List the forums of a course".to_string(),
            input_schema: json_schema_object(course_selector_properties(), vec![]),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args = Args::parse(arguments)?;
        let course_id = self.ctx.resolver.resolve(&args.course_query()?).await?;

        let forums = self.ctx.api.forums(course_id).await?;
        CallToolResult::json(&forums)
    }
}

/// Discussions of one forum
pub struct GetForumDiscussionsTool {
    ctx: ToolContext,
}

impl GetForumDiscussionsTool {
    pub fn new(ctx: ToolContext) -> Self {
        Self { ctx }
    }
}

#[async_trait::async_trait]
impl Tool for GetForumDiscussionsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_forum_discussions".to_string(),
            description: "List the discussions of a forum".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "forumId": json_schema_number("Forum ID")
                }),
                vec!["forumId"],
            ),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args = Args::parse(arguments)?;
        let forum_id = args.id("forumId")?;

        let discussions = self.ctx.api.forum_discussions(forum_id).await?;
        CallToolResult::json(&discussions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{context, mount, payload};
    use moodle_mcp_core::Error;
    use serde_json::json;
    use wiremock::MockServer;

    #[tokio::test]
    async fn test_forums_keep_type_field() {
        let server = MockServer::start().await;
        mount(
            &server,
            "mod_forum_get_forums_by_courses",
            json!([{"id": 3, "course": 42, "type": "news", "name": "Avisos", "numdiscussions": 2}]),
        )
        .await;

        let tool = GetForumsTool::new(context(&server, Some(42)));
        let body = payload(&tool.execute(json!({})).await.unwrap());

        assert_eq!(body[0]["type"], "news");
        assert_eq!(body[0]["numdiscussions"], 2);
    }

    #[tokio::test]
    async fn test_discussions() {
        let server = MockServer::start().await;
        mount(
            &server,
            "mod_forum_get_forum_discussions",
            json!({"discussions": [
                {"id": 100, "discussion": 50, "name": "Duda examen", "subject": "Duda examen",
                 "userid": 10, "numreplies": 3, "pinned": false}
            ]}),
        )
        .await;

        let tool = GetForumDiscussionsTool::new(context(&server, None));
        let body = payload(&tool.execute(json!({"forumId": 3})).await.unwrap());

        assert_eq!(body[0]["subject"], "Duda examen");
        assert_eq!(body[0]["numreplies"], 3);
    }

    #[tokio::test]
    async fn test_discussions_require_forum_id() {
        let server = MockServer::start().await;
        let tool = GetForumDiscussionsTool::new(context(&server, None));

        let err = tool.execute(json!({})).await.unwrap_err();
        assert_eq!(err, Error::invalid_argument("forumId is required"));
    }
}
