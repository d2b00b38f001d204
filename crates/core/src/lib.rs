//! Domain types and rules for the laundry machine tracker.
//!
//! Zero I/O: everything here is pure so the storage and HTTP crates can
//! share it and test it without a running store.

pub mod device;
pub mod error;
pub mod location;
pub mod machine;
pub mod raspi;
pub mod types;
pub mod usage;
