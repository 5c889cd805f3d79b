pub mod compare;
pub mod completions;
pub mod compute;
