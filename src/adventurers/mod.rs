//! Adventurers: roles, the shared record, and per-role movement rules.
//!
//! Roles are a closed enum. Every exception to the common rules is read
//! from `Role::capabilities` and matched exhaustively; there are no
//! per-role types.

pub mod adventurer;
pub mod movement;
pub mod role;

pub use adventurer::{Adventurer, Hand};
pub use role::{Capabilities, Role};
