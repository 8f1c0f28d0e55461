//! Object transfer between repositories
//!
//! Push and fetch both copy the closure of a branch tip from one object store
//! into another; only the direction differs.

pub mod transfer;
