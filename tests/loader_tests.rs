use uadetector::data::Data;
use uadetector::loader::DataLoader;

fn fixture() -> String {
    r#"{
        "version": "test-1",
        "timestamp": "2026-01-01T00:00:00Z",
        "browser_types": [
            { "id": 1, "name": "Browser" },
            { "id": 3, "name": "Library" }
        ],
        "browsers": [
            { "id": 1, "family": "Chrome", "type_id": 1, "producer": "Google Inc.", "producer_url": "https://www.google.com/", "url": "https://www.google.com/chrome/" },
            { "id": 2, "family": "curl", "type_id": 3, "url": "https://curl.se/" }
        ],
        "browser_patterns": [
            { "id": 11, "browser_id": 2, "order": 20, "regex": "/^curl\\/([0-9.]+)/i" },
            { "id": 10, "browser_id": 1, "order": 10, "regex": "/chrome\\/([0-9.]+)/i" }
        ],
        "operating_systems": [
            { "id": 1, "family": "Linux", "name": "Linux", "url": "https://www.kernel.org/" }
        ],
        "operating_system_patterns": [
            { "id": 20, "os_id": 1, "order": 1, "regex": "/linux/i" }
        ],
        "browser_operating_system": [
            { "browser_id": 2, "os_id": 1 }
        ],
        "devices": [
            { "id": 1, "name": "Personal computer" }
        ],
        "device_patterns": [
            { "id": 30, "device_id": 1, "order": 1, "regex": "/linux/i" }
        ],
        "robots": [
            { "id": 40, "user_agent_string": "TestBot/1.0", "family": "TestBot", "name": "TestBot/1.0" }
        ]
    }"#
    .to_string()
}

#[cfg(test)]
mod load_tests {
    use super::*;

    #[test]
    fn test_valid_rule_file_loads() {
        let data = DataLoader::from_json(&fixture()).unwrap();
        assert_eq!(data.version(), "test-1");
        assert_eq!(data.browsers().len(), 2);
        assert_eq!(data.browser_patterns().len(), 2);
        assert_eq!(data.operating_systems().len(), 1);
        assert_eq!(data.robots().len(), 1);
        assert_eq!(data.devices().len(), 1);
    }

    #[test]
    fn test_patterns_are_kept_in_evaluation_order() {
        let data = DataLoader::from_json(&fixture()).unwrap();
        let orders: Vec<u32> = data.browser_patterns().iter().map(|p| p.order).collect();
        assert_eq!(orders, vec![10, 20], "ascending order regardless of declaration order");
    }

    #[test]
    fn test_type_table_is_resolved() {
        let data = DataLoader::from_json(&fixture()).unwrap();
        assert_eq!(data.browser_by_id(1).unwrap().type_name, "Browser");
        assert_eq!(data.browser_by_id(2).unwrap().type_name, "Library");
    }

    #[test]
    fn test_cross_references_are_resolved() {
        let data = DataLoader::from_json(&fixture()).unwrap();
        assert!(data.robot_by_user_agent("TestBot/1.0").is_some());
        assert_eq!(
            data.default_operating_system_for_browser(2).unwrap().name,
            "Linux"
        );
        assert!(data.default_operating_system_for_browser(1).is_none());
    }

    #[test]
    fn test_from_bytes_rejects_invalid_utf8() {
        let err = DataLoader::from_bytes(&[0xff, 0xfe, 0x00]).unwrap_err();
        assert_eq!(err.code(), "E002");
    }

    #[test]
    fn test_malformed_json_is_data_corrupt() {
        let err = DataLoader::from_json("{ not json").unwrap_err();
        assert_eq!(err.code(), "E002");
    }

    #[test]
    fn test_minimal_document_loads_empty_tables() {
        let data =
            DataLoader::from_json(r#"{ "version": "v", "timestamp": "2026-01-01T00:00:00Z" }"#)
                .unwrap();
        assert_eq!(data.version(), "v");
        assert!(data.browsers().is_empty());
        assert!(data.robots().is_empty());
    }
}

#[cfg(test)]
mod validation_tests {
    use super::*;

    fn load_with(replace: &str, with: &str) -> Result<Data, uadetector::UaDetectorError> {
        DataLoader::from_json(&fixture().replace(replace, with))
    }

    #[test]
    fn test_duplicate_order_is_rejected() {
        let err = load_with("\"order\": 20", "\"order\": 10").unwrap_err();
        assert_eq!(err.code(), "E002");
        assert!(err.message().contains("order"), "{}", err);
    }

    #[test]
    fn test_unknown_browser_reference_is_rejected() {
        let err = load_with("\"browser_id\": 2, \"order\": 20", "\"browser_id\": 99, \"order\": 20")
            .unwrap_err();
        assert_eq!(err.code(), "E002");
        assert!(err.message().contains("11"), "names the offending pattern: {}", err);
        assert!(err.message().contains("99"), "{}", err);
    }

    #[test]
    fn test_unknown_type_reference_is_rejected() {
        let err = load_with("\"type_id\": 3", "\"type_id\": 77").unwrap_err();
        assert_eq!(err.code(), "E002");
        assert!(err.message().contains("77"), "{}", err);
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        let err = load_with("/linux/i", "/linux/ig").unwrap_err();
        assert_eq!(err.code(), "E002");
        assert!(err.message().contains("flag"), "{}", err);
    }

    #[test]
    fn test_uncompilable_regex_names_the_pattern() {
        let err = load_with("/chrome\\\\/([0-9.]+)/i", "/chrome([/i").unwrap_err();
        assert_eq!(err.code(), "E002");
        assert!(err.message().contains("10"), "names the offending id: {}", err);
    }

    #[test]
    fn test_duplicate_robot_user_agent_is_rejected() {
        let doubled = fixture().replace(
            r#""robots": ["#,
            r#""robots": [
            { "id": 41, "user_agent_string": "TestBot/1.0", "family": "OtherBot", "name": "OtherBot" },"#,
        );
        let err = DataLoader::from_json(&doubled).unwrap_err();
        assert_eq!(err.code(), "E002");
    }

    #[test]
    fn test_mapping_to_unknown_os_is_rejected() {
        let err = load_with("\"os_id\": 1 }", "\"os_id\": 12 }").unwrap_err();
        assert_eq!(err.code(), "E002");
    }
}

#[cfg(test)]
mod round_trip_tests {
    use super::*;

    #[test]
    fn test_serialize_then_reload_yields_equal_container() {
        let data = DataLoader::from_json(&fixture()).unwrap();
        let serialized = DataLoader::to_json(&data).unwrap();
        let reloaded = DataLoader::from_json(&serialized).unwrap();
        assert_eq!(data, reloaded);
    }

    #[test]
    fn test_round_trip_is_stable() {
        let data = DataLoader::from_json(&fixture()).unwrap();
        let first = DataLoader::to_json(&data).unwrap();
        let second = DataLoader::to_json(&DataLoader::from_json(&first).unwrap()).unwrap();
        assert_eq!(first, second);
    }
}
