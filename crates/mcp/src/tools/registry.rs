// Tool trait, registry and JSON schema helpers

use crate::protocol::{CallToolResult, ToolSchema};
use moodle_mcp_core::Result;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Tool executor trait
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool schema for MCP
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with given arguments.
    ///
    /// `InvalidArgument` and `NotFound` become protocol errors; `Upstream`
    /// becomes an `isError` result at the dispatcher.
    async fn execute(&self, arguments: Value) -> Result<CallToolResult>;
}

/// Tool registry, listed in registration order
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    by_name: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Register a tool. A later registration under the same name replaces
    /// the earlier one in place.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.schema().name;
        match self.by_name.get(&name) {
            Some(&index) => self.tools[index] = tool,
            None => {
                self.by_name.insert(name, self.tools.len());
                self.tools.push(tool);
            }
        }
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.by_name.get(name).map(|&index| self.tools[index].clone())
    }

    /// List all tool schemas
    pub fn list_schemas(&self) -> Vec<ToolSchema> {
        self.tools.iter().map(|t| t.schema()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// Helper functions for creating tool schemas

pub fn json_schema_object(properties: Value, required: Vec<&str>) -> Value {
    serde_json::json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

pub fn json_schema_string(description: &str) -> Value {
    serde_json::json!({
        "type": "string",
        "description": description
    })
}

pub fn json_schema_number(description: &str) -> Value {
    serde_json::json!({
        "type": "number",
        "description": description
    })
}

/// The optional `courseId`/`courseName` pair shared by course-scoped tools.
pub fn course_selector_properties() -> Value {
    serde_json::json!({
        "courseId": json_schema_number(
            "Course ID. Takes precedence over courseName; falls back to the configured default course"
        ),
        "courseName": json_schema_string(
            "Course name or part of it, accents and case ignored"
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named(&'static str, &'static str);

    #[async_trait::async_trait]
    impl Tool for Named {
        fn schema(&self) -> ToolSchema {
            ToolSchema {
                name: self.0.to_string(),
                description: self.1.to_string(),
                input_schema: json_schema_object(serde_json::json!({}), vec![]),
            }
        }

        async fn execute(&self, _arguments: Value) -> Result<CallToolResult> {
            Ok(CallToolResult::text(self.1))
        }
    }

    #[test]
    fn test_registration_order_is_kept() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(Named("search_courses", "a")));
        registry.register(Arc::new(Named("get_students", "b")));
        registry.register(Arc::new(Named("get_assignments", "c")));

        let names: Vec<String> = registry.list_schemas().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["search_courses", "get_students", "get_assignments"]);
        assert!(registry.contains("get_students"));
        assert!(registry.get("get_grades").is_none());
    }

    #[test]
    fn test_reregistration_replaces() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(Named("get_forums", "old")));
        registry.register(Arc::new(Named("get_forums", "new")));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.list_schemas()[0].description, "new");
    }

    #[test]
    fn test_course_selector_properties() {
        let props = course_selector_properties();
        assert_eq!(props["courseId"]["type"], "number");
        assert_eq!(props["courseName"]["type"], "string");
    }
}
