//! # Moodle SDK
//!
//! Async client for the Moodle REST web service, covering the course,
//! enrolment, assignment, quiz, VPL and forum functions.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use moodle_sdk::{MoodleClient, MoodleResult};
//!
//! #[tokio::main]
//! async fn main() -> MoodleResult<()> {
//!     let client = MoodleClient::builder()
//!         .base_url("https://lms.example.edu/webservice/rest/server.php")
//!         .token("your-ws-token")
//!         .build()?;
//!
//!     let courses = client.courses().search("cálculo").await?;
//!     println!("Found {} courses", courses.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! [`MoodleClient`] also implements [`moodle_mcp_core::MoodleApi`], so it can be
//! handed to the course resolver and the submissions reporter directly.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod transport;

pub use client::{MoodleClient, MoodleClientBuilder};
pub use config::{ClientConfig, RetryConfig};
pub use error::{MoodleError, MoodleResult};
