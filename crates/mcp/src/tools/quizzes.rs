// Quiz tools

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{course_selector_properties, json_schema_number, json_schema_object, Args, Tool, ToolContext};
use moodle_mcp_core::projection::QuizGradeView;
use moodle_mcp_core::Result;
use serde_json::Value;

/// Quizzes of a course
pub struct GetQuizzesTool {
    ctx: ToolContext,
}

impl GetQuizzesTool {
    pub fn new(ctx: ToolContext) -> Self {
        Self { ctx }
    }
}

#[async_trait::async_trait]
impl Tool for GetQuizzesTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_quizzes".to_string(),
            description: "List the quizzes of a course".to_string(),
            input_schema: json_schema_object(course_selector_properties(), vec![]),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args = Args::parse(arguments)?;
        let course_id = self.ctx.resolver.resolve(&args.course_query()?).await?;

        let quizzes = self.ctx.api.quizzes(course_id).await?;
        CallToolResult::json(&quizzes)
    }
}

/// Best grade of a student in a quiz
pub struct GetQuizGradeTool {
    ctx: ToolContext,
}

impl GetQuizGradeTool {
    pub fn new(ctx: ToolContext) -> Self {
        Self { ctx }
    }
}

#[async_trait::async_trait]
impl Tool for GetQuizGradeTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_quiz_grade".to_string(),
            description: "Best grade of a student in a quiz".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "studentId": json_schema_number("Student user ID"),
                    "quizId": json_schema_number("Quiz ID")
                }),
                vec!["studentId", "quizId"],
            ),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args = Args::parse(arguments)?;
        let student_id = args.id("studentId")?;
        let quiz_id = args.id("quizId")?;

        let grade = self.ctx.api.quiz_best_grade(quiz_id, student_id).await?;
        CallToolResult::json(&QuizGradeView::new(quiz_id, student_id, &grade))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{context, mount, payload};
    use serde_json::json;
    use wiremock::MockServer;

    #[tokio::test]
    async fn test_quiz_grade_echoes_ids() {
        let server = MockServer::start().await;
        mount(
            &server,
            "mod_quiz_get_user_best_grade",
            json!({"hasgrade": true, "grade": "7.50000", "warnings": []}),
        )
        .await;

        let tool = GetQuizGradeTool::new(context(&server, None));
        let body = payload(&tool.execute(json!({"studentId": 10, "quizId": 3})).await.unwrap());

        assert_eq!(
            body,
            json!({"quizId": 3, "studentId": 10, "hasGrade": true, "grade": 7.5})
        );
    }

    #[tokio::test]
    async fn test_quiz_without_grade() {
        let server = MockServer::start().await;
        mount(&server, "mod_quiz_get_user_best_grade", json!({"hasgrade": false})).await;

        let tool = GetQuizGradeTool::new(context(&server, None));
        let body = payload(&tool.execute(json!({"studentId": 10, "quizId": 3})).await.unwrap());

        assert_eq!(body["hasGrade"], false);
        assert_eq!(body["grade"], "No calificado");
    }

    #[tokio::test]
    async fn test_get_quizzes() {
        let server = MockServer::start().await;
        mount(
            &server,
            "mod_quiz_get_quizzes_by_courses",
            json!({"quizzes": [{"id": 3, "course": 42, "coursemodule": 90, "name": "Parcial"}]}),
        )
        .await;

        let tool = GetQuizzesTool::new(context(&server, None));
        let body = payload(&tool.execute(json!({"courseId": "42"})).await.unwrap());
        assert_eq!(body[0]["name"], "Parcial");
    }
}
