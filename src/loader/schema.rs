//! Serde mapping of the rule file wire format
//!
//! A single JSON document with a `version`, an ISO-8601 `timestamp`, entity
//! tables and pattern/join tables. Ids are positive integers; regexes are
//! delimited `/body/flags` strings.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::data::Data;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleFile {
    pub version: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub browser_types: Vec<BrowserTypeRecord>,
    #[serde(default)]
    pub browsers: Vec<BrowserRecord>,
    #[serde(default)]
    pub browser_patterns: Vec<BrowserPatternRecord>,
    #[serde(default)]
    pub operating_systems: Vec<OperatingSystemRecord>,
    #[serde(default)]
    pub operating_system_patterns: Vec<OperatingSystemPatternRecord>,
    #[serde(default)]
    pub browser_operating_system: Vec<BrowserOperatingSystemRecord>,
    #[serde(default)]
    pub devices: Vec<DeviceRecord>,
    #[serde(default)]
    pub device_patterns: Vec<DevicePatternRecord>,
    #[serde(default)]
    pub robots: Vec<RobotRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowserTypeRecord {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowserRecord {
    pub id: u32,
    pub family: String,
    pub type_id: u32,
    #[serde(default)]
    pub producer: String,
    #[serde(default)]
    pub producer_url: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub info_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowserPatternRecord {
    pub id: u32,
    pub browser_id: u32,
    pub order: u32,
    pub regex: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatingSystemRecord {
    pub id: u32,
    pub family: String,
    pub name: String,
    #[serde(default)]
    pub producer: String,
    #[serde(default)]
    pub producer_url: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub info_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatingSystemPatternRecord {
    pub id: u32,
    pub os_id: u32,
    pub order: u32,
    pub regex: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowserOperatingSystemRecord {
    pub browser_id: u32,
    pub os_id: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceRecord {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub info_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DevicePatternRecord {
    pub id: u32,
    pub device_id: u32,
    pub order: u32,
    pub regex: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RobotRecord {
    pub id: u32,
    pub user_agent_string: String,
    pub family: String,
    pub name: String,
    #[serde(default)]
    pub producer: String,
    #[serde(default)]
    pub producer_url: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub info_url: String,
}

impl RuleFile {
    /// Rebuild the wire document from a loaded container.
    ///
    /// The container flattens the type table into each browser, so type ids
    /// are re-synthesized here: distinct type names sorted alphabetically,
    /// numbered from 1. Stable input gives stable output.
    pub fn from_data(data: &Data) -> Self {
        let names: BTreeSet<&str> = data.browsers().iter().map(|b| b.type_name.as_str()).collect();
        let type_ids: BTreeMap<&str, u32> = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| (name, i as u32 + 1))
            .collect();

        let browser_types = type_ids
            .iter()
            .map(|(&name, &id)| BrowserTypeRecord {
                id,
                name: name.to_string(),
            })
            .collect();

        let browsers = data
            .browsers()
            .iter()
            .map(|b| BrowserRecord {
                id: b.id,
                family: b.family.clone(),
                type_id: type_ids[b.type_name.as_str()],
                producer: b.producer.clone(),
                producer_url: b.producer_url.clone(),
                url: b.url.clone(),
                icon: b.icon.clone(),
                info_url: b.info_url.clone(),
            })
            .collect();

        let browser_patterns = data
            .browser_patterns()
            .iter()
            .map(|p| BrowserPatternRecord {
                id: p.id,
                browser_id: p.browser_id,
                order: p.order,
                regex: p.pattern.to_wire(),
            })
            .collect();

        let operating_systems = data
            .operating_systems()
            .iter()
            .map(|o| OperatingSystemRecord {
                id: o.id,
                family: o.family.clone(),
                name: o.name.clone(),
                producer: o.producer.clone(),
                producer_url: o.producer_url.clone(),
                url: o.url.clone(),
                icon: o.icon.clone(),
                info_url: o.info_url.clone(),
            })
            .collect();

        let operating_system_patterns = data
            .operating_system_patterns()
            .iter()
            .map(|p| OperatingSystemPatternRecord {
                id: p.id,
                os_id: p.os_id,
                order: p.order,
                regex: p.pattern.to_wire(),
            })
            .collect();

        let mut browser_operating_system: Vec<BrowserOperatingSystemRecord> = data
            .browser_os_mappings()
            .map(|(browser_id, os_id)| BrowserOperatingSystemRecord { browser_id, os_id })
            .collect();
        browser_operating_system.sort_by_key(|m| m.browser_id);

        let devices = data
            .devices()
            .iter()
            .map(|d| DeviceRecord {
                id: d.id,
                name: d.name.clone(),
                icon: d.icon.clone(),
                info_url: d.info_url.clone(),
            })
            .collect();

        let device_patterns = data
            .device_patterns()
            .iter()
            .map(|p| DevicePatternRecord {
                id: p.id,
                device_id: p.device_id,
                order: p.order,
                regex: p.pattern.to_wire(),
            })
            .collect();

        let robots = data
            .robots()
            .iter()
            .map(|r| RobotRecord {
                id: r.id,
                user_agent_string: r.user_agent_string.clone(),
                family: r.family.clone(),
                name: r.name.clone(),
                producer: r.producer.clone(),
                producer_url: r.producer_url.clone(),
                url: r.url.clone(),
                icon: r.icon.clone(),
                info_url: r.info_url.clone(),
            })
            .collect();

        RuleFile {
            version: data.version().to_string(),
            timestamp: data.timestamp(),
            browser_types,
            browsers,
            browser_patterns,
            operating_systems,
            operating_system_patterns,
            browser_operating_system,
            devices,
            device_patterns,
            robots,
        }
    }
}
