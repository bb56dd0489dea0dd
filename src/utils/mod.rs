pub mod durationparser;
pub mod paths;
pub mod render;
pub mod size;
