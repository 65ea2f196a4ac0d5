use super::pattern::CompiledPattern;

/// A device category entry of the rule database ("Personal computer",
/// "Smartphone", ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub id: u32,
    pub name: String,
    pub icon: String,
    pub info_url: String,
}

/// A regex rule owned by a [`Device`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevicePattern {
    pub id: u32,
    pub device_id: u32,
    pub order: u32,
    pub pattern: CompiledPattern,
}
