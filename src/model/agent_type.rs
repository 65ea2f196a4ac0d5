use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, IntoEnumIterator};

/// Client category as declared by the rule database type table.
///
/// The serialized token is the exact type name used in the rule file
/// (`"Mobile Browser"`, `"Email client"`, ...). `Unknown` carries the empty
/// token and is the category of the `unknown` sentinel record.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumIter, AsRefStr,
)]
pub enum UserAgentType {
    #[strum(serialize = "Browser")]
    Browser,
    #[strum(serialize = "Email client")]
    EmailClient,
    #[strum(serialize = "Feed Reader")]
    FeedReader,
    #[strum(serialize = "Library")]
    Library,
    #[strum(serialize = "Mobile Browser")]
    MobileBrowser,
    #[strum(serialize = "Offline Browser")]
    OfflineBrowser,
    #[strum(serialize = "Other")]
    Other,
    #[strum(serialize = "Robot")]
    Robot,
    #[strum(serialize = "Useragent Anonymizer")]
    UseragentAnonymizer,
    #[strum(serialize = "Validator")]
    Validator,
    #[strum(serialize = "Wap Browser")]
    WapBrowser,
    #[default]
    Unknown,
}

impl UserAgentType {
    /// Resolve a type name from the rule database to a category.
    ///
    /// Unrecognized names map to `Unknown`; the raw name string is still
    /// carried verbatim on the detection record.
    pub fn evaluate(type_name: &str) -> Self {
        UserAgentType::iter()
            .find(|t| t.as_ref() == type_name)
            .unwrap_or(UserAgentType::Unknown)
    }

    pub fn token(&self) -> &'static str {
        // AsRefStr gives back the serialize token
        match self {
            UserAgentType::Browser => "Browser",
            UserAgentType::EmailClient => "Email client",
            UserAgentType::FeedReader => "Feed Reader",
            UserAgentType::Library => "Library",
            UserAgentType::MobileBrowser => "Mobile Browser",
            UserAgentType::OfflineBrowser => "Offline Browser",
            UserAgentType::Other => "Other",
            UserAgentType::Robot => "Robot",
            UserAgentType::UseragentAnonymizer => "Useragent Anonymizer",
            UserAgentType::Validator => "Validator",
            UserAgentType::WapBrowser => "Wap Browser",
            UserAgentType::Unknown => "",
        }
    }
}

impl std::fmt::Display for UserAgentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}

impl std::str::FromStr for UserAgentType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserAgentType::iter()
            .find(|t| t.as_ref().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Invalid user agent type: '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_known_names() {
        assert_eq!(UserAgentType::evaluate("Browser"), UserAgentType::Browser);
        assert_eq!(
            UserAgentType::evaluate("Mobile Browser"),
            UserAgentType::MobileBrowser
        );
        assert_eq!(UserAgentType::evaluate("Robot"), UserAgentType::Robot);
    }

    #[test]
    fn test_evaluate_unknown_name() {
        assert_eq!(UserAgentType::evaluate("Hologram"), UserAgentType::Unknown);
        assert_eq!(UserAgentType::evaluate(""), UserAgentType::Unknown);
    }

    #[test]
    fn test_display_round_trip() {
        assert_eq!(UserAgentType::FeedReader.to_string(), "Feed Reader");
        assert_eq!(
            "feed reader".parse::<UserAgentType>().unwrap(),
            UserAgentType::FeedReader
        );
        assert!("no-such-type".parse::<UserAgentType>().is_err());
    }
}
