pub mod history;
pub mod mastery;
pub mod progression;
pub mod queue;
pub mod view;
