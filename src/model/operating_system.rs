use std::fmt;

use serde::Serialize;

/// Read-only view over the five operating system fields.
///
/// Implemented by both the owned record and its builder so either can be
/// handed to [`crate::model::UserAgentBuilder::set_operating_system_view`].
pub trait ReadableOperatingSystem {
    fn family(&self) -> &str;
    fn name(&self) -> &str;
    fn producer(&self) -> &str;
    fn producer_url(&self) -> &str;
    fn url(&self) -> &str;
}

/// Immutable operating system record emitted by detection.
///
/// Fields are never absent; the empty string stands in for missing data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct OperatingSystem {
    family: String,
    name: String,
    producer: String,
    producer_url: String,
    url: String,
}

impl OperatingSystem {
    pub fn new(
        family: impl Into<String>,
        name: impl Into<String>,
        producer: impl Into<String>,
        producer_url: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            family: family.into(),
            name: name.into(),
            producer: producer.into(),
            producer_url: producer_url.into(),
            url: url.into(),
        }
    }

    /// The `unknown` sentinel, used as initial and fallback value.
    pub fn empty() -> Self {
        Self::new("unknown", "unknown", "", "", "")
    }

    /// Defensively copy the five fields out of any read-only view.
    pub fn from_view(view: &dyn ReadableOperatingSystem) -> Self {
        Self::new(
            view.family(),
            view.name(),
            view.producer(),
            view.producer_url(),
            view.url(),
        )
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::empty()
    }
}

impl ReadableOperatingSystem for OperatingSystem {
    fn family(&self) -> &str {
        &self.family
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn producer(&self) -> &str {
        &self.producer
    }

    fn producer_url(&self) -> &str {
        &self.producer_url
    }

    fn url(&self) -> &str {
        &self.url
    }
}

impl Default for OperatingSystem {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for OperatingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OperatingSystem [family={}, name={}, producer={}, producer_url={}, url={}]",
            self.family, self.name, self.producer, self.producer_url, self.url
        )
    }
}

/// Builder for [`OperatingSystem`], initialized to the `unknown` sentinel.
#[derive(Debug, Clone)]
pub struct OperatingSystemBuilder {
    family: String,
    name: String,
    producer: String,
    producer_url: String,
    url: String,
}

impl OperatingSystemBuilder {
    pub fn new() -> Self {
        let empty = OperatingSystem::empty();
        Self {
            family: empty.family,
            name: empty.name,
            producer: empty.producer,
            producer_url: empty.producer_url,
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

    pub fn set_producer(mut self, producer: impl Into<String>) -> Self {
        self.producer = producer.into();
        self
    }

    pub fn set_producer_url(mut self, producer_url: impl Into<String>) -> Self {
        self.producer_url = producer_url.into();
        self
    }

    pub fn set_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn build(self) -> OperatingSystem {
        OperatingSystem {
            family: self.family,
            name: self.name,
            producer: self.producer,
            producer_url: self.producer_url,
            url: self.url,
        }
    }
}

impl ReadableOperatingSystem for OperatingSystemBuilder {
    fn family(&self) -> &str {
        &self.family
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn producer(&self) -> &str {
        &self.producer
    }

    fn producer_url(&self) -> &str {
        &self.producer_url
    }

    fn url(&self) -> &str {
        &self.url
    }
}

impl Default for OperatingSystemBuilder {
    fn default() -> Self {
        Self::new()
    }
}
