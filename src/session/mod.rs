pub mod learning;

pub use learning::{KnownReport, LearningSession, SessionOptions};
