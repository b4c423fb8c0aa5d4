//! Rendering of classified tasks into chat lines.
//!
//! `aggregate` holds the two grouping layouts (by area, by assignee set);
//! `compose` wraps them into the complete digests sent per board, per area
//! and per person.

mod aggregate;
mod compose;
mod mention;

pub use aggregate::{lines_by_category, lines_by_recipients, mention_line, LineStyle};
pub use compose::{area_digest, category_digest, personal_digest, recipient_digest, NO_ACTIVITIES_TODAY};
pub use mention::{format_short_date, Mention, FORMAT_ERROR_LABEL, UNASSIGNED_LABEL};
