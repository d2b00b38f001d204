//! Request extractors that run before any handler logic.
//!
//! - [`api_key::RequireApiKey`] -- Requires the shared API key in `Authorization`.
//! - [`device::DeviceSlot`] -- Resolves the `x-esp-id` header to a machine slot.

pub mod api_key;
pub mod device;
