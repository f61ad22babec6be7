pub mod builtin;
pub mod loader;
pub mod pager;
pub mod word;

pub use pager::Pager;
pub use word::WordRecord;
