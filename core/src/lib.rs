#![no_std]

extern crate alloc;

pub use board::*;
pub use cell::*;
pub use controller::*;
pub use error::*;
pub use selection::*;
pub use symbol::*;
pub use types::*;

mod board;
mod cell;
mod controller;
mod error;
mod selection;
mod symbol;
mod types;
