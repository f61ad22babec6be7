pub mod dictionary;
pub mod markers;
pub mod progress_bar;
pub mod session_sidebar;
pub mod stats_header;
pub mod word_card;
pub mod word_list;
