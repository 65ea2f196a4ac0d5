use std::fmt;

use serde::Serialize;

use super::operating_system::{OperatingSystem, ReadableOperatingSystem};

/// Read-only view over the seven user agent fields.
pub trait ReadableUserAgent {
    fn family(&self) -> &str;
    fn name(&self) -> &str;
    fn operating_system(&self) -> &OperatingSystem;
    fn producer(&self) -> &str;
    fn producer_url(&self) -> &str;
    fn type_name(&self) -> &str;
    fn url(&self) -> &str;
}

/// Immutable record describing a web client: browser, crawler, feed reader,
/// library and so on, together with the operating system it runs on.
///
/// All fields are non-absent strings (the empty string replaces absence);
/// the record is value-compared and value-hashed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct UserAgent {
    family: String,
    name: String,
    operating_system: OperatingSystem,
    producer: String,
    producer_url: String,
    #[serde(rename = "type")]
    type_name: String,
    url: String,
}

impl UserAgent {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        family: impl Into<String>,
        name: impl Into<String>,
        operating_system: OperatingSystem,
        producer: impl Into<String>,
        producer_url: impl Into<String>,
        type_name: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            family: family.into(),
            name: name.into(),
            operating_system,
            producer: producer.into(),
            producer_url: producer_url.into(),
            type_name: type_name.into(),
            url: url.into(),
        }
    }

    /// The `unknown` sentinel returned when nothing matches.
    pub fn empty() -> Self {
        Self::new("unknown", "unknown", OperatingSystem::empty(), "", "", "", "")
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::empty()
    }
}

impl ReadableUserAgent for UserAgent {
    fn family(&self) -> &str {
        &self.family
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn operating_system(&self) -> &OperatingSystem {
        &self.operating_system
    }

    fn producer(&self) -> &str {
        &self.producer
    }

    fn producer_url(&self) -> &str {
        &self.producer_url
    }

    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn url(&self) -> &str {
        &self.url
    }
}

impl Default for UserAgent {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for UserAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "UserAgent [family={}, name={}, operating_system={}, producer={}, producer_url={}, type={}, url={}]",
            self.family,
            self.name,
            self.operating_system,
            self.producer,
            self.producer_url,
            self.type_name,
            self.url
        )
    }
}

/// Builder for [`UserAgent`], initialized to the `unknown` sentinel.
///
/// Exposes the same read accessors as the finished record, so a half-built
/// value can be inspected through [`ReadableUserAgent`].
#[derive(Debug, Clone)]
pub struct UserAgentBuilder {
    family: String,
    name: String,
    operating_system: OperatingSystem,
    producer: String,
    producer_url: String,
    type_name: String,
    url: String,
}

impl UserAgentBuilder {
    pub fn new() -> Self {
        let empty = UserAgent::empty();
        Self {
            family: empty.family,
            name: empty.name,
            operating_system: empty.operating_system,
            producer: empty.producer,
            producer_url: empty.producer_url,
            type_name: empty.type_name,
            url: empty.url,
        }
    }

    pub fn set_family(mut self, family: impl Into<String>) -> Self {
        self.family = family.into();
        self
    }

    pub fn set_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Take ownership of a concrete operating system record.
    pub fn set_operating_system(mut self, operating_system: OperatingSystem) -> Self {
        self.operating_system = operating_system;
        self
    }

    /// Copy the five operating system fields out of a read-only view.
    ///
    /// Never aliases caller-supplied state: the view is copied into a fresh
    /// owned record.
    pub fn set_operating_system_view(mut self, view: &dyn ReadableOperatingSystem) -> Self {
        self.operating_system = OperatingSystem::from_view(view);
        self
    }

    pub fn set_producer(mut self, producer: impl Into<String>) -> Self {
        self.producer = producer.into();
        self
    }

    pub fn set_producer_url(mut self, producer_url: impl Into<String>) -> Self {
        self.producer_url = producer_url.into();
        self
    }

    pub fn set_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = type_name.into();
        self
    }

    pub fn set_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn build(self) -> UserAgent {
        UserAgent {
            family: self.family,
            name: self.name,
            operating_system: self.operating_system,
            producer: self.producer,
            producer_url: self.producer_url,
            type_name: self.type_name,
            url: self.url,
        }
    }
}

impl ReadableUserAgent for UserAgentBuilder {
    fn family(&self) -> &str {
        &self.family
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn operating_system(&self) -> &OperatingSystem {
        &self.operating_system
    }

    fn producer(&self) -> &str {
        &self.producer
    }

    fn producer_url(&self) -> &str {
        &self.producer_url
    }

    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn url(&self) -> &str {
        &self.url
    }
}

impl Default for UserAgentBuilder {
    fn default() -> Self {
        Self::new()
    }
}
