//! member-search library
//!
//! Dynamic member/team search over PostgreSQL: optional search fields are
//! composed into a filter, executed through a [`repositories::MemberStore`],
//! and returned as flat lists or pages.

use shadow_rs::shadow;
shadow!(build);

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod logger;
pub mod models;
pub mod query;
pub mod repositories;
pub mod schema;
pub mod seed;
pub mod services;

pub use error::{AppError, AppResult};
pub use query::{CountStrategy, MemberSearchCondition, Page, PageRequest};
pub use services::MemberSearchService;

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}

pub fn clap_long_version() -> &'static str {
    build::CLAP_LONG_VERSION
}
