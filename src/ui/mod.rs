pub mod components;
pub mod layout;
pub mod markup;
pub mod path_input;
pub mod theme;
