//! Service layer for member search.
//!
//! Services encapsulate the search rules and coordinate with the
//! [`MemberStore`](crate::repositories::MemberStore) seam.

mod member_search_service;

pub use member_search_service::MemberSearchService;
