// Tool argument access with Moodle-friendly number handling

use moodle_mcp_core::loose::{int_from_value, number_from_value};
use moodle_mcp_core::{CourseQuery, Error, Result};
use serde_json::{Map, Value};

/// Arguments of one tool call.
///
/// Agents send ids as integers, floats (`42.0`) or strings (`"42"`); all are
/// accepted. Anything else under a known key is an invalid argument.
#[derive(Debug, Clone, Default)]
pub struct Args {
    map: Map<String, Value>,
}

impl Args {
    /// Accepts an object, or null / absent for tools without required input.
    pub fn parse(arguments: Value) -> Result<Self> {
        match arguments {
            Value::Object(map) => Ok(Self { map }),
            Value::Null => Ok(Self::default()),
            other => Err(Error::invalid_argument(format!(
                "arguments must be an object, got {}",
                kind(&other)
            ))),
        }
    }

    fn present(&self, key: &str) -> Option<&Value> {
        self.map.get(key).filter(|v| !v.is_null())
    }

    pub fn opt_id(&self, key: &str) -> Result<Option<i64>> {
        match self.present(key) {
            None => Ok(None),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
            Some(value) => int_from_value(value)
                .map(Some)
                .ok_or_else(|| Error::invalid_argument(format!("{} must be an integer", key))),
        }
    }

    pub fn id(&self, key: &str) -> Result<i64> {
        self.opt_id(key)?
            .ok_or_else(|| Error::invalid_argument(format!("{} is required", key)))
    }

    pub fn opt_number(&self, key: &str) -> Result<Option<f64>> {
        match self.present(key) {
            None => Ok(None),
            Some(value) => number_from_value(value)
                .map(Some)
                .ok_or_else(|| Error::invalid_argument(format!("{} must be a number", key))),
        }
    }

    /// Non-blank string; blank counts as absent.
    pub fn opt_text(&self, key: &str) -> Result<Option<String>> {
        match self.present(key) {
            None => Ok(None),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(Error::invalid_argument(format!("{} must be a string", key))),
        }
    }

    pub fn text(&self, key: &str) -> Result<String> {
        self.opt_text(key)?
            .ok_or_else(|| Error::invalid_argument(format!("{} is required", key)))
    }

    /// `courseId` / `courseName` as a resolver query.
    pub fn course_query(&self) -> Result<CourseQuery> {
        Ok(CourseQuery::new(
            self.opt_id("courseId")?,
            self.opt_text("courseName")?,
        ))
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
