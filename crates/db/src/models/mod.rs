//! DTOs and stored entities owned by the storage layer.
//!
//! Each submodule contains:
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//! - A `Deserialize` filter for searches

pub mod device;
pub mod machine;
pub mod raspi;
