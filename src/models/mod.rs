// Data models for poses, exercises and tracker output

pub mod exercise;
pub mod landmark;
pub mod tracking;
pub mod workout;

pub use exercise::*;
pub use landmark::*;
pub use tracking::*;
pub use workout::*;
