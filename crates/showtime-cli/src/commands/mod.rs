pub mod config;
pub mod normalize;
pub mod parse;
pub mod progress;
