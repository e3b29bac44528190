pub mod content;
pub mod quiz;
pub mod session;
