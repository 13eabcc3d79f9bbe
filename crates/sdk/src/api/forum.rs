//! Forum functions.

use crate::client::MoodleClient;
use crate::error::MoodleResult;
use crate::transport::WsParams;
use moodle_mcp_core::types::{Discussion, Forum};
use serde::Deserialize;

/// `mod_forum_*` functions.
pub struct ForumApi<'a> {
    client: &'a MoodleClient,
}

impl<'a> ForumApi<'a> {
    pub(crate) fn new(client: &'a MoodleClient) -> Self {
        Self { client }
    }

    /// Forums of one course.
    pub async fn forums(&self, course_id: i64) -> MoodleResult<Vec<Forum>> {
        let params = WsParams::new().list("courseids", &[course_id]);
        let response: ForumsResponse = self
            .client
            .http
            .read("mod_forum_get_forums_by_courses", params)
            .await?;
        Ok(response.into_forums())
    }

    /// Discussions of one forum.
    pub async fn discussions(&self, forum_id: i64) -> MoodleResult<Vec<Discussion>> {
        let params = WsParams::new().arg("forumid", forum_id);
        let response: DiscussionsResponse = self
            .client
            .http
            .read("mod_forum_get_forum_discussions", params)
            .await?;
        Ok(response.discussions)
    }
}

/// Stock Moodle returns a bare list; some deployments wrap it.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ForumsResponse {
    List(Vec<Forum>),
    Wrapped {
        #[serde(default)]
        forums: Vec<Forum>,
    },
}

impl ForumsResponse {
    fn into_forums(self) -> Vec<Forum> {
        match self {
            Self::List(forums) | Self::Wrapped { forums } => forums,
        }
    }
}

#[derive(Debug, Deserialize)]
struct DiscussionsResponse {
    #[serde(default)]
    discussions: Vec<Discussion>,
}
