//! Repository layer for member and team data access.
//!
//! [`MemberStore`] is the seam the search service talks to. The PostgreSQL
//! implementation is used by the binary; the in-memory one backs tests and
//! dry runs.

mod member_repo;
mod memory;
mod traits;

pub use member_repo::MemberRepository;
pub use memory::InMemoryMemberStore;
pub use traits::MemberStore;
