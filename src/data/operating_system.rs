use super::pattern::CompiledPattern;

/// An operating system entry of the rule database.
///
/// Distinct from [`crate::model::OperatingSystem`]: this is the rule entity
/// with an id; detection copies its fields into a fresh value record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatingSystemEntry {
    pub id: u32,
    pub family: String,
    pub name: String,
    pub producer: String,
    pub producer_url: String,
    pub url: String,
    pub icon: String,
    pub info_url: String,
}

/// A regex rule owned by an [`OperatingSystemEntry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatingSystemPattern {
    pub id: u32,
    pub os_id: u32,
    pub order: u32,
    pub pattern: CompiledPattern,
}
