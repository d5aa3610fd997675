pub mod misc;
pub mod retrieve;
pub mod store;
