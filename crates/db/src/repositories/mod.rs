//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&dyn KvStore` (and, for machine stops, `&dyn UsageStore`) as the
//! first arguments.

pub mod device_repo;
pub mod machine_repo;
pub mod raspi_repo;

pub use device_repo::DeviceRepo;
pub use machine_repo::MachineRepo;
pub use raspi_repo::RaspiRepo;
