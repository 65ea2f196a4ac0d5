use super::pattern::CompiledPattern;

/// A browser (or any regex-matched client) entry of the rule database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Browser {
    pub id: u32,
    pub family: String,
    /// Type name resolved from the rule file type table ("Browser",
    /// "Mobile Browser", "Library", ...).
    pub type_name: String,
    pub producer: String,
    pub producer_url: String,
    pub url: String,
    pub icon: String,
    pub info_url: String,
}

/// A regex rule owned by a [`Browser`], evaluated in ascending `order`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserPattern {
    pub id: u32,
    pub browser_id: u32,
    pub order: u32,
    pub pattern: CompiledPattern,
}
