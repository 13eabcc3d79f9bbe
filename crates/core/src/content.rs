// Best-effort extraction of text and files from a submission status payload
//
// The payload is plugin-defined and loosely typed. Every field defaults, so a
// missing or partial plugin yields empty values instead of an error.

use serde::{Deserialize, Serialize};

const ONLINE_TEXT_PLUGIN: &str = "onlinetext";
const ONLINE_TEXT_FIELD: &str = "onlinetext";
const FILE_PLUGIN: &str = "file";
const SUBMISSION_FILES_AREA: &str = "submission_files";

/// Raw `mod_assign_get_submission_status` response (only the parts we read)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionStatus {
    #[serde(default)]
    pub submission: Option<AttemptSubmission>,
    #[serde(default)]
    pub lastattempt: Option<LastAttempt>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LastAttempt {
    #[serde(default)]
    pub submission: Option<AttemptSubmission>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttemptSubmission {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "crate::loose::int_or_zero")]
    pub timemodified: i64,
    #[serde(default)]
    pub plugins: Vec<SubmissionPlugin>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionPlugin {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub editorfields: Vec<EditorField>,
    #[serde(default)]
    pub fileareas: Vec<FileArea>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditorField {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileArea {
    #[serde(default)]
    pub area: String,
    #[serde(default)]
    pub files: Vec<UpstreamFile>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamFile {
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub fileurl: String,
    #[serde(default, deserialize_with = "crate::loose::int_or_zero")]
    pub filesize: i64,
    #[serde(default)]
    pub mimetype: String,
}

/// A file attached to a submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionFile {
    pub filename: String,
    pub fileurl: String,
    pub filesize: i64,
    pub filetype: String,
}

impl From<&UpstreamFile> for SubmissionFile {
    fn from(file: &UpstreamFile) -> Self {
        Self {
            filename: file.filename.clone(),
            fileurl: file.fileurl.clone(),
            filesize: file.filesize,
            filetype: file.mimetype.clone(),
        }
    }
}

/// What a student handed in, flattened out of the plugin list
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionContent {
    pub status: String,
    pub submission_text: String,
    pub files: Vec<SubmissionFile>,
    pub timemodified: i64,
}

impl SubmissionStatus {
    /// The attempt submission, falling back to the top-level object.
    fn attempt(&self) -> Option<&AttemptSubmission> {
        self.lastattempt
            .as_ref()
            .and_then(|a| a.submission.as_ref())
            .or(self.submission.as_ref())
    }
}

pub fn extract_submission_content(status: &SubmissionStatus) -> SubmissionContent {
    let attempt = status.attempt();
    let plugins = attempt.map(|a| a.plugins.as_slice()).unwrap_or_default();

    let submission_text = plugins
        .iter()
        .filter(|p| p.kind == ONLINE_TEXT_PLUGIN)
        .find_map(|p| p.editorfields.iter().find(|f| f.name == ONLINE_TEXT_FIELD))
        .and_then(|f| f.text.clone())
        .unwrap_or_default();

    let files = plugins
        .iter()
        .filter(|p| p.kind == FILE_PLUGIN)
        .flat_map(|p| p.fileareas.iter().filter(|a| a.area == SUBMISSION_FILES_AREA))
        .flat_map(|a| a.files.iter().map(SubmissionFile::from))
        .collect();

    SubmissionContent {
        status: attempt
            .and_then(|a| a.status.clone())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "unknown".to_string()),
        submission_text,
        files,
        timemodified: attempt.map(|a| a.timemodified).unwrap_or(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> SubmissionStatus {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_text_and_files() {
        let status = parse(json!({
            "lastattempt": {
                "submission": {
                    "status": "submitted",
                    "timemodified": 1700000000,
                    "plugins": [
                        {
                            "type": "onlinetext",
                            "name": "Online text",
                            "editorfields": [
                                {"name": "onlinetext", "text": "hello", "format": 1}
                            ]
                        },
                        {
                            "type": "file",
                            "fileareas": [
                                {
                                    "area": "submission_files",
                                    "files": [{
                                        "filename": "main.c",
                                        "fileurl": "https://lms.example/pluginfile.php/1/main.c",
                                        "filesize": 812,
                                        "mimetype": "text/x-csrc"
                                    }]
                                }
                            ]
                        }
                    ]
                }
            }
        }));

        let content = extract_submission_content(&status);
        assert_eq!(content.submission_text, "hello");
        assert_eq!(content.status, "submitted");
        assert_eq!(content.timemodified, 1700000000);
        assert_eq!(content.files.len(), 1);
        assert_eq!(
            content.files[0],
            SubmissionFile {
                filename: "main.c".to_string(),
                fileurl: "https://lms.example/pluginfile.php/1/main.c".to_string(),
                filesize: 812,
                filetype: "text/x-csrc".to_string(),
            }
        );
    }

    #[test]
    fn test_other_file_areas_ignored() {
        let status = parse(json!({
            "lastattempt": {"submission": {"plugins": [{
                "type": "file",
                "fileareas": [
                    {"area": "feedback_files", "files": [{"filename": "rubric.pdf"}]}
                ]
            }]}}
        }));
        assert!(extract_submission_content(&status).files.is_empty());
    }

    #[test]
    fn test_empty_payload() {
        let content = extract_submission_content(&parse(json!({})));
        assert_eq!(content.status, "unknown");
        assert_eq!(content.submission_text, "");
        assert!(content.files.is_empty());
        assert_eq!(content.timemodified, 0);
    }

    #[test]
    fn test_plugin_without_fields() {
        let status = parse(json!({
            "lastattempt": {"submission": {"status": "new", "plugins": [
                {"type": "onlinetext"},
                {"type": "file", "fileareas": [{"area": "submission_files"}]},
                {"type": "comments"}
            ]}}
        }));
        let content = extract_submission_content(&status);
        assert_eq!(content.status, "new");
        assert_eq!(content.submission_text, "");
        assert!(content.files.is_empty());
    }

    #[test]
    fn test_top_level_submission_fallback() {
        let status = parse(json!({
            "submission": {"status": "draft", "timemodified": 5}
        }));
        let content = extract_submission_content(&status);
        assert_eq!(content.status, "draft");
        assert_eq!(content.timemodified, 5);
    }
}
