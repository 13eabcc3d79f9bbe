// Wiremock-backed tool context for tests

use crate::tools::ToolContext;
use moodle_mcp_core::{CourseResolver, MoodleApi, ResolverConfig, SubmissionsReporter};
use moodle_sdk::{MoodleClient, RetryConfig};
use serde_json::Value;
use std::sync::Arc;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub(crate) fn context(server: &MockServer, default_course_id: Option<i64>) -> ToolContext {
    let client = MoodleClient::builder()
        .base_url(format!("{}/webservice/rest/server.php", server.uri()))
        .token("test-token")
        .retry_config(RetryConfig::no_retry())
        .build()
        .unwrap();
    let api: Arc<dyn MoodleApi> = Arc::new(client);

    ToolContext {
        resolver: Arc::new(CourseResolver::new(
            api.clone(),
            ResolverConfig {
                default_course_id,
                ..Default::default()
            },
        )),
        reporter: Arc::new(SubmissionsReporter::new(api.clone())),
        api,
    }
}

/// Answer every call to `function` with `body`.
pub(crate) async fn mount(server: &MockServer, function: &str, body: Value) {
    Mock::given(method("GET"))
        .and(query_param("wsfunction", function))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Parse the JSON text of a successful tool result.
pub(crate) fn payload(result: &crate::protocol::CallToolResult) -> Value {
    assert!(!result.is_error(), "unexpected error result: {:?}", result);
    serde_json::from_str(result.content[0].as_text()).unwrap()
}
