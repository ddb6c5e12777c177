#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

/// authorization module
pub mod auth;

/// client to execute RESTful API
pub mod client;

/// immutable client configuration
pub mod config;

/// error module
pub mod error;

/// toggl resources
pub mod proto;

/// convinent prelude to import module
pub mod prelude {
    pub use crate::auth::*;
    pub use crate::client::*;
    pub use crate::config::*;
    pub use crate::error::*;
    pub use crate::proto::*;
}
