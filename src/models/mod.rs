mod member;
mod projection;
mod team;

pub use member::{Member, NewMember};
pub use projection::{AgeSummary, MemberDto, MemberTeamDto, MemberTeamRow, TeamAgeAverage};
pub use team::{NewTeam, Team};
