//! Query parameter encoding for web service calls.

use std::fmt::Display;

/// Ordered query parameters for one web service function.
///
/// Moodle expects arrays as indexed keys (`courseids[0]=5`) and nested
/// structures as bracketed paths (`plugindata[editor][text]=...`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WsParams {
    pairs: Vec<(String, String)>,
}

impl WsParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scalar parameter.
    pub fn arg(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.pairs.push((key.into(), value.to_string()));
        self
    }

    /// Array parameter encoded as `key[0]`, `key[1]`, ...
    pub fn list<V: Display>(mut self, key: &str, values: &[V]) -> Self {
        for (index, value) in values.iter().enumerate() {
            self.pairs
                .push((format!("{}[{}]", key, index), value.to_string()));
        }
        self
    }

    /// Nested parameter encoded as `root[a][b]`.
    pub fn nested(mut self, path: &[&str], value: impl Display) -> Self {
        let mut segments = path.iter();
        let mut key = segments.next().map(|s| s.to_string()).unwrap_or_default();
        for segment in segments {
            key.push('[');
            key.push_str(segment);
            key.push(']');
        }
        self.pairs.push((key, value.to_string()));
        self
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_and_list() {
        let params = WsParams::new().arg("courseid", 5).list("assignmentids", &[7, 9]);
        assert_eq!(
            params.pairs(),
            &[
                ("courseid".to_string(), "5".to_string()),
                ("assignmentids[0]".to_string(), "7".to_string()),
                ("assignmentids[1]".to_string(), "9".to_string()),
            ]
        );
    }

    #[test]
    fn test_nested() {
        let params = WsParams::new().nested(
            &["plugindata", "assignfeedbackcomments_editor", "text"],
            "Bien hecho",
        );
        assert_eq!(
            params.pairs()[0].0,
            "plugindata[assignfeedbackcomments_editor][text]"
        );
        assert_eq!(params.pairs()[0].1, "Bien hecho");
    }

    #[test]
    fn test_empty_list_adds_nothing() {
        let params = WsParams::new().list::<i64>("courseids", &[]);
        assert!(params.is_empty());
    }
}
