// Course resolution: explicit id, then name search, then configured default

use crate::api::MoodleApi;
use crate::error::{Error, Result};
use crate::normalize::normalize;
use crate::types::Course;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// How to choose when a name matches more than one course
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// Take the first course in the order the server listed them
    #[default]
    FirstListed,
}

impl TieBreak {
    fn pick<'a>(&self, courses: &'a [Course]) -> Option<&'a Course> {
        match self {
            Self::FirstListed => courses.first(),
        }
    }
}

/// Resolver settings, built once at startup
#[derive(Debug, Clone, Default)]
pub struct ResolverConfig {
    /// Course used when a request names neither an id nor a course name
    pub default_course_id: Option<i64>,
    pub tie_break: TieBreak,
}

/// How a request addresses a course. Blank names count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseQuery {
    pub id: Option<i64>,
    pub name: Option<String>,
}

impl CourseQuery {
    pub fn new(id: Option<i64>, name: Option<String>) -> Self {
        Self { id, name }
    }

    pub fn by_id(id: i64) -> Self {
        Self {
            id: Some(id),
            name: None,
        }
    }

    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
        }
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim).filter(|n| !n.is_empty())
    }
}

pub struct CourseResolver {
    api: Arc<dyn MoodleApi>,
    config: ResolverConfig,
}

impl CourseResolver {
    pub fn new(api: Arc<dyn MoodleApi>, config: ResolverConfig) -> Self {
        Self { api, config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Two-tier course search.
    ///
    /// Asks the server's keyword search first. If that finds nothing, lists
    /// every course and keeps those whose full or short name contains the
    /// term after accent and case folding. Servers differ in how their search
    /// treats accents and partial words; the fallback covers both.
    pub async fn search(&self, name: &str) -> Result<Vec<Course>> {
        let courses = self.api.search_courses(name).await?;
        if !courses.is_empty() {
            debug!(term = name, found = courses.len(), "Keyword search matched");
            return Ok(courses);
        }

        debug!(term = name, "Keyword search empty, filtering full course listing");
        let term = normalize(name);
        let matches: Vec<Course> = self
            .api
            .list_courses()
            .await?
            .into_iter()
            .filter(|c| {
                normalize(&c.fullname).contains(&term) || normalize(&c.shortname).contains(&term)
            })
            .collect();

        debug!(term = name, found = matches.len(), "Listing filter finished");
        Ok(matches)
    }

    /// Resolve a query to one course id.
    ///
    /// An explicit id wins and is returned without any remote call or
    /// existence check.
    pub async fn resolve(&self, query: &CourseQuery) -> Result<i64> {
        if let Some(id) = query.id {
            return Ok(id);
        }

        if let Some(name) = query.name() {
            let courses = self.search(name).await?;
            let course = self
                .config
                .tie_break
                .pick(&courses)
                .ok_or_else(|| Error::not_found(format!("No course found with name: {}", name)))?;

            if courses.len() > 1 {
                warn!(
                    term = name,
                    candidates = courses.len(),
                    chosen = %course.fullname,
                    "Course name is ambiguous, using first listed match"
                );
            }
            info!(course_id = course.id, fullname = %course.fullname, "Resolved course name");
            return Ok(course.id);
        }

        self.config.default_course_id.ok_or_else(|| {
            Error::invalid_argument(
                "courseId, courseName, or a configured default course (MOODLE_COURSE_ID) is required",
            )
        })
    }
}
