//! Rule entities and the loaded, cross-linked rule database
//!
//! Entities are identified by integer ids that stay stable across rule file
//! versions. The [`Data`] container owns the entities, keeps patterns in
//! evaluation order and resolves every cross-reference at construction time,
//! so detection works on index lookups only.

mod browser;
mod container;
mod device;
mod operating_system;
mod pattern;
mod robot;

pub use browser::{Browser, BrowserPattern};
pub use container::Data;
pub use device::{Device, DevicePattern};
pub use operating_system::{OperatingSystemEntry, OperatingSystemPattern};
pub use pattern::CompiledPattern;
pub use robot::Robot;
