//! Transport layer for the Moodle client.

pub mod http;
pub mod params;

pub use http::HttpTransport;
pub use params::WsParams;
