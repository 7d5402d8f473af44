pub mod config;
pub mod note;
pub mod session;
pub mod stopwatch;
