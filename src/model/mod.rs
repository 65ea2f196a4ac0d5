//! Immutable detection result records
//!
//! Every detection produces a fresh [`UserAgent`] value record; records are
//! never mutated after construction and compare field-wise. The `unknown`
//! sentinels ([`UserAgent::empty`], [`OperatingSystem::empty`]) are both the
//! initial builder state and the result for undetectable input.

mod agent_type;
mod operating_system;
mod user_agent;

pub use agent_type::UserAgentType;
pub use operating_system::{OperatingSystem, OperatingSystemBuilder, ReadableOperatingSystem};
pub use user_agent::{ReadableUserAgent, UserAgent, UserAgentBuilder};
