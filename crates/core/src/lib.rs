// Core domain logic for the Moodle MCP server: course resolution, report
// aggregation and the payload projections behind each tool

pub mod api;
pub mod content;
pub mod error;
pub mod gather;
pub mod loose;
pub mod normalize;
pub mod projection;
pub mod report;
pub mod resolver;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use api::MoodleApi;
pub use error::{Error, Result};
pub use report::{AssignmentReport, ReportFilter, SubmissionsReporter};
pub use resolver::{CourseQuery, CourseResolver, ResolverConfig, TieBreak};
pub use types::*;
