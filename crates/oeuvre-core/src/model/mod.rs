pub mod catalog;
pub mod ids;
pub mod lenient;
pub mod milestone;
pub mod track;
pub mod work;

pub use catalog::Catalog;
pub use ids::{MilestoneId, WorkId};
pub use milestone::{Milestone, MilestoneKind, ReleaseStatus};
pub use track::MilestoneTrack;
pub use work::{Category, SubCategory, Work};
