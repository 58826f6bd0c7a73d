//! Search conditions, filters and pagination.
//!
//! - `condition` - optional search fields and their composition into a filter
//! - `filter` - the clause/filter expression consumed by member stores
//! - `page` - page requests, paged results and count strategies

pub mod condition;
pub mod filter;
pub mod page;

pub use condition::{MemberSearchCondition, all_eq, compose};
pub use filter::{Clause, MemberFilter};
pub use page::{CountStrategy, Page, PageRequest};
