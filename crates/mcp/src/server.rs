// MCP request dispatcher

use crate::protocol::{
    CallToolParams, CallToolResult, InitializeParams, InitializeResult, JsonRpcError,
    JsonRpcRequest, JsonRpcResponse, ListToolsResult, JSONRPC_VERSION,
};
use crate::tools::ToolRegistry;
use moodle_mcp_core::Error;
use serde_json::Value;
use tracing::{debug, error, info, warn};

/// Answers MCP requests by dispatching `tools/call` to the registry.
pub struct McpServer {
    registry: ToolRegistry,
}

impl McpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Handle one raw line. Returns `None` when nothing should be written
    /// back (notifications).
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "Unparseable message");
                return Some(JsonRpcResponse::error(Value::Null, JsonRpcError::parse_error()));
            }
        };

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => Some(JsonRpcResponse::error(
                id,
                JsonRpcError::invalid_request(format!("Invalid Request: {}", e)),
            )),
        }
    }

    /// Handle one decoded request.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id.clone() else {
            debug!(method = %request.method, "Notification received");
            return None;
        };

        if request.jsonrpc != JSONRPC_VERSION {
            return Some(JsonRpcResponse::error(
                id,
                JsonRpcError::invalid_request(format!(
                    "Unsupported jsonrpc version: {}",
                    request.jsonrpc
                )),
            ));
        }

        let response = match request.method.as_str() {
            "initialize" => {
                let params: InitializeParams = request
                    .params
                    .and_then(|p| serde_json::from_value(p).ok())
                    .unwrap_or_default();
                info!(
                    client = params.client_info.as_ref().map(|c| c.name.as_str()).unwrap_or("unknown"),
                    protocol_version = %params.protocol_version,
                    "Client initializing"
                );
                JsonRpcResponse::success(id, InitializeResult::current())
            }
            "ping" => JsonRpcResponse::success(id, serde_json::json!({})),
            "tools/list" => JsonRpcResponse::success(
                id,
                ListToolsResult {
                    tools: self.registry.list_schemas(),
                },
            ),
            "tools/call" => self.call_tool(id, request.params).await,
            other => JsonRpcResponse::error(id, JsonRpcError::method_not_found(other)),
        };

        Some(response)
    }

    async fn call_tool(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let params: CallToolParams = match params.map(serde_json::from_value) {
            Some(Ok(params)) => params,
            Some(Err(e)) => {
                return JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_params(format!("Invalid tools/call params: {}", e)),
                )
            }
            None => {
                return JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_params("Missing tools/call params"),
                )
            }
        };

        let Some(tool) = self.registry.get(&params.name) else {
            return JsonRpcResponse::error(
                id,
                JsonRpcError::custom(
                    JsonRpcError::METHOD_NOT_FOUND,
                    format!("Unknown tool: {}", params.name),
                ),
            );
        };

        info!(tool = %params.name, "Tool call");
        match tool.execute(params.arguments).await {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(e) if e.is_caller_error() => {
                debug!(tool = %params.name, error = %e, "Rejected tool call");
                JsonRpcResponse::error(id, JsonRpcError::invalid_params(e.to_string()))
            }
            Err(Error::Upstream { message }) => {
                warn!(tool = %params.name, error = %message, "Moodle call failed");
                JsonRpcResponse::success(
                    id,
                    CallToolResult::error(format!("Moodle API error: {}", message)),
                )
            }
            Err(e) => {
                error!(tool = %params.name, error = %e, "Tool failed");
                JsonRpcResponse::error(id, JsonRpcError::internal_error(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{context, mount};
    use crate::tools::moodle_tools;
    use serde_json::json;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn server(mock: &MockServer, default_course_id: Option<i64>) -> McpServer {
        McpServer::new(moodle_tools(context(mock, default_course_id)))
    }

    fn call(id: i64, name: &str, arguments: Value) -> JsonRpcRequest {
        JsonRpcRequest::new(id, "tools/call", json!({"name": name, "arguments": arguments}))
    }

    fn to_json(response: Option<JsonRpcResponse>) -> Value {
        serde_json::to_value(response.unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_initialize_and_list() {
        let mock = MockServer::start().await;
        let server = server(&mock, None);

        let init = to_json(
            server
                .handle_request(JsonRpcRequest::new(
                    1,
                    "initialize",
                    json!({"protocolVersion": "2024-11-05", "capabilities": {},
                           "clientInfo": {"name": "test-agent", "version": "1.0"}}),
                ))
                .await,
        );
        assert_eq!(init["result"]["serverInfo"]["name"], "moodle-mcp-server");

        let list = to_json(
            server
                .handle_request(JsonRpcRequest::new(2, "tools/list", json!({})))
                .await,
        );
        let names: Vec<&str> = list["result"]["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            vec![
                "search_courses",
                "get_students",
                "get_assignments",
                "get_quizzes",
                "get_vpl_assignments",
                "get_submissions",
                "get_vpl_submission",
                "provide_feedback",
                "get_submission_content",
                "get_quiz_grade",
                "get_forums",
                "get_forum_discussions",
            ]
        );
        assert_eq!(
            list["result"]["tools"][7]["inputSchema"]["required"],
            json!(["studentId", "assignmentId", "feedback"])
        );
    }

    #[tokio::test]
    async fn test_notifications_are_not_answered() {
        let mock = MockServer::start().await;
        let server = server(&mock, None);

        let response = server
            .handle_request(JsonRpcRequest::notification("notifications/initialized"))
            .await;
        assert!(response.is_none());
    }

    #[tokio::test]
    async fn test_provide_feedback_without_feedback_is_invalid_params() {
        let mock = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("null"))
            .expect(0)
            .mount(&mock)
            .await;
        let server = server(&mock, Some(42));

        let response = to_json(
            server
                .handle_request(call(3, "provide_feedback", json!({"studentId": 10, "assignmentId": 7})))
                .await,
        );
        assert_eq!(response["id"], 3);
        assert_eq!(response["error"]["code"], -32602);
    }

    #[tokio::test]
    async fn test_unknown_course_name_is_invalid_params() {
        let mock = MockServer::start().await;
        mount(&mock, "core_course_search_courses", json!({"courses": []})).await;
        mount(&mock, "core_course_get_courses", json!([])).await;
        let server = server(&mock, None);

        let response = to_json(
            server
                .handle_request(call(4, "get_quizzes", json!({"courseName": "Astrofísica"})))
                .await,
        );
        assert_eq!(response["error"]["code"], -32602);
        assert!(response["error"]["message"]
            .as_str()
            .unwrap()
            .contains("No course found with name: Astrofísica"));
    }

    #[tokio::test]
    async fn test_upstream_error_is_tool_error_result() {
        let mock = MockServer::start().await;
        mount(
            &mock,
            "mod_forum_get_forum_discussions",
            json!({"exception": "moodle_exception", "errorcode": "invalidtoken",
                   "message": "Invalid token - token not found"}),
        )
        .await;
        let server = server(&mock, None);

        let response = to_json(
            server
                .handle_request(call(5, "get_forum_discussions", json!({"forumId": 3})))
                .await,
        );
        assert!(response.get("error").is_none());
        assert_eq!(response["result"]["isError"], true);
        assert_eq!(
            response["result"]["content"][0]["text"],
            "Moodle API error: Invalid token - token not found"
        );
    }

    #[tokio::test]
    async fn test_unknown_tool_and_method() {
        let mock = MockServer::start().await;
        let server = server(&mock, None);

        let response = to_json(server.handle_request(call(6, "get_grades", json!({}))).await);
        assert_eq!(response["error"]["code"], -32601);

        let response = to_json(
            server
                .handle_request(JsonRpcRequest::new(7, "resources/list", json!({})))
                .await,
        );
        assert_eq!(response["error"]["code"], -32601);
    }

    #[tokio::test]
    async fn test_malformed_line_is_parse_error() {
        let mock = MockServer::start().await;
        let server = server(&mock, None);

        let response = to_json(server.handle_line("{not json").await);
        assert_eq!(response["error"]["code"], -32700);
        assert_eq!(response["id"], Value::Null);

        let response = to_json(server.handle_line(r#"{"jsonrpc":"2.0","id":9}"#).await);
        assert_eq!(response["error"]["code"], -32600);
        assert_eq!(response["id"], 9);
    }

    #[tokio::test]
    async fn test_ping() {
        let mock = MockServer::start().await;
        let server = server(&mock, None);

        let response = to_json(
            server
                .handle_line(r#"{"jsonrpc":"2.0","id":"p1","method":"ping"}"#)
                .await,
        );
        assert_eq!(response["id"], "p1");
        assert_eq!(response["result"], json!({}));
    }
}
