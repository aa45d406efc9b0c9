pub mod chain;
pub mod collision;
pub mod constants;
pub mod environment;
pub mod math;
pub mod round;
pub mod trajectory;
pub mod types;
