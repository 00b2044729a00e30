pub mod estimate;
pub mod schedule;

pub use estimate::{compute_results, WithholdingResult};
pub use schedule::BracketSchedule;
