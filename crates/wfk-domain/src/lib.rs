//! Pure domain layer for the workflow kernel: entities, the declarative
//! artifact schema registry, the finite-state machine, and the ports the
//! application layer drives. No I/O happens in this crate.

pub mod entities;
pub mod error;
pub mod fsm;
#[macro_use]
mod macros;
pub mod ports;
pub mod schema;

pub use error::{Error, Result};
