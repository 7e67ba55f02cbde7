pub mod push;
pub mod register;
pub mod start;
