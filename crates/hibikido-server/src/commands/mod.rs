//! Inbound command decoding and dispatch (spec.md §6, §4.7).

mod bodies;
mod decode;
mod dispatch;

pub use decode::{decode, Command};
pub use dispatch::{handle, Outcome};
