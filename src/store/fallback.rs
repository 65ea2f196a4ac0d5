//! Bundled fallback rule database
//!
//! A snapshot of the rule file ships inside the binary so detection is
//! serviceable on a cold start with no cache and no network.

use std::borrow::Cow;

use rust_embed::Embed;

// 使用 RustEmbed 自动嵌入兜底规则库
#[derive(Embed)]
#[folder = "resources/"]
struct BundledData;

const BUNDLED_FILE: &str = "uas.json";

/// The embedded rule file bytes, if the resource was bundled.
pub fn bundled_rule_file() -> Option<Cow<'static, [u8]>> {
    BundledData::get(BUNDLED_FILE).map(|f| f.data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::DataLoader;

    #[test]
    fn test_bundled_rule_file_loads() {
        let bytes = bundled_rule_file().expect("bundled rule file present");
        let data = DataLoader::from_bytes(&bytes).expect("bundled rule file valid");
        assert!(!data.version().is_empty());
        assert!(!data.browsers().is_empty());
        assert!(!data.robots().is_empty());
    }
}
