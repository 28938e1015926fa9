mod coach;

pub use coach::{Coach, TurnOutcome};
