//! Orogue terminal client (workspace facade crate).
//!
//! The implementation lives in dedicated crates under `crates/`; this package
//! re-exports them as `orogue::{client,core,input,protocol,term,types}` and
//! ships the `orogue` binary.

pub use orogue_client as client;
pub use orogue_core as core;
pub use orogue_input as input;
pub use orogue_protocol as protocol;
pub use orogue_term as term;
pub use orogue_types as types;
