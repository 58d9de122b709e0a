pub mod display;
pub mod interactive;
