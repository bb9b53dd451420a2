//! Screen implementations. Each screen is a top-level Component.

pub mod detail;
pub mod devices;

pub use detail::DetailScreen;
pub use devices::DevicesScreen;
