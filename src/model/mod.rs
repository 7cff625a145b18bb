pub mod catalog;
pub mod common;
pub mod matrix;

pub use catalog::*;
pub use common::*;
pub use matrix::*;
