use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use uadetector::model::{
    OperatingSystem, OperatingSystemBuilder, ReadableOperatingSystem, ReadableUserAgent, UserAgent,
    UserAgentBuilder, UserAgentType,
};

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod user_agent_tests {
    use super::*;

    fn chrome_on_linux() -> UserAgent {
        UserAgentBuilder::new()
            .set_family("Chrome")
            .set_name("Chrome 91.0.4472.114")
            .set_operating_system(OperatingSystem::new(
                "Linux",
                "Linux",
                "",
                "",
                "https://www.kernel.org/",
            ))
            .set_producer("Google Inc.")
            .set_producer_url("https://www.google.com/")
            .set_type_name("Browser")
            .set_url("https://www.google.com/chrome/")
            .build()
    }

    #[test]
    fn test_empty_sentinel() {
        let empty = UserAgent::empty();
        assert_eq!(empty.family(), "unknown");
        assert_eq!(empty.name(), "unknown");
        assert_eq!(empty.producer(), "");
        assert_eq!(empty.producer_url(), "");
        assert_eq!(empty.type_name(), "");
        assert_eq!(empty.url(), "");
        assert_eq!(*empty.operating_system(), OperatingSystem::empty());
        assert!(empty.is_empty());
    }

    #[test]
    fn test_builder_defaults_to_empty() {
        assert_eq!(UserAgentBuilder::new().build(), UserAgent::empty());
        assert_eq!(UserAgent::default(), UserAgent::empty());
    }

    #[test]
    fn test_equality_is_field_wise() {
        assert_eq!(chrome_on_linux(), chrome_on_linux());
        let renamed = UserAgentBuilder::new()
            .set_family("Chrome")
            .set_name("Chrome 92.0")
            .build();
        assert_ne!(chrome_on_linux(), renamed);
    }

    #[test]
    fn test_hash_consistent_with_equality() {
        let a = chrome_on_linux();
        let b = chrome_on_linux();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_eq!(hash_of(&UserAgent::empty()), hash_of(&UserAgent::empty()));
    }

    #[test]
    fn test_builder_exposes_read_accessors() {
        let builder = UserAgentBuilder::new()
            .set_family("Firefox")
            .set_name("Firefox 121.0")
            .set_type_name("Browser");
        assert_eq!(builder.family(), "Firefox");
        assert_eq!(builder.name(), "Firefox 121.0");
        assert_eq!(builder.type_name(), "Browser");

        let agent = builder.build();
        assert_eq!(agent.family(), "Firefox");
        assert_eq!(agent.name(), "Firefox 121.0");
    }

    #[test]
    fn test_operating_system_view_is_copied() {
        // an OS builder is itself a read-only view
        let view = OperatingSystemBuilder::new()
            .set_family("iOS")
            .set_name("iOS")
            .set_producer("Apple Inc.");

        let agent = UserAgentBuilder::new()
            .set_operating_system_view(&view)
            .build();

        assert_eq!(agent.operating_system().family(), "iOS");
        assert_eq!(agent.operating_system().producer(), "Apple Inc.");
        // the copy is a fresh owned record equal to what the view showed
        assert_eq!(*agent.operating_system(), view.clone().build());
    }

    #[test]
    fn test_display_includes_every_field() {
        let rendered = chrome_on_linux().to_string();
        for field in [
            "Chrome",
            "Chrome 91.0.4472.114",
            "Linux",
            "Google Inc.",
            "https://www.google.com/",
            "Browser",
            "https://www.google.com/chrome/",
        ] {
            assert!(rendered.contains(field), "missing {} in {}", field, rendered);
        }
    }

    #[test]
    fn test_json_rendering_uses_type_key() {
        let json = serde_json::to_string(&chrome_on_linux()).unwrap();
        assert!(json.contains("\"type\":\"Browser\""), "{}", json);
        assert!(json.contains("\"family\":\"Chrome\""), "{}", json);
    }
}

#[cfg(test)]
mod operating_system_tests {
    use super::*;

    #[test]
    fn test_empty_sentinel() {
        let empty = OperatingSystem::empty();
        assert_eq!(empty.family(), "unknown");
        assert_eq!(empty.name(), "unknown");
        assert_eq!(empty.producer(), "");
        assert!(empty.is_empty());
        assert_eq!(OperatingSystem::default(), empty);
    }

    #[test]
    fn test_builder_round_trip() {
        let os = OperatingSystemBuilder::new()
            .set_family("Windows")
            .set_name("Windows 10")
            .set_producer("Microsoft Corporation")
            .set_producer_url("https://www.microsoft.com/")
            .set_url("https://www.microsoft.com/windows/")
            .build();

        assert_eq!(os.family(), "Windows");
        assert_eq!(os.name(), "Windows 10");
        assert_eq!(
            os,
            OperatingSystem::new(
                "Windows",
                "Windows 10",
                "Microsoft Corporation",
                "https://www.microsoft.com/",
                "https://www.microsoft.com/windows/",
            )
        );
        assert_eq!(hash_of(&os), hash_of(&os.clone()));
    }

    #[test]
    fn test_from_view_copies_all_fields() {
        let original = OperatingSystem::new("Android", "Android", "Google Inc.", "", "");
        let copied = OperatingSystem::from_view(&original);
        assert_eq!(original, copied);
    }

    #[test]
    fn test_display_includes_every_field() {
        let os = OperatingSystem::new("OS X", "OS X", "Apple Inc.", "https://www.apple.com/", "");
        let rendered = os.to_string();
        assert!(rendered.contains("OS X"));
        assert!(rendered.contains("Apple Inc."));
        assert!(rendered.contains("https://www.apple.com/"));
    }
}

#[cfg(test)]
mod user_agent_type_tests {
    use super::*;

    #[test]
    fn test_evaluate_matches_database_names() {
        assert_eq!(UserAgentType::evaluate("Browser"), UserAgentType::Browser);
        assert_eq!(
            UserAgentType::evaluate("Mobile Browser"),
            UserAgentType::MobileBrowser
        );
        assert_eq!(UserAgentType::evaluate("Library"), UserAgentType::Library);
        assert_eq!(UserAgentType::evaluate("unheard of"), UserAgentType::Unknown);
    }

    #[test]
    fn test_robot_token() {
        assert_eq!(UserAgentType::Robot.to_string(), "Robot");
        assert_eq!(UserAgentType::default(), UserAgentType::Unknown);
    }
}
