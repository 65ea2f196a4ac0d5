use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

use crate::errors::{Result, UaDetectorError};
use crate::utils::pattern_precedence;

use super::{
    Browser, BrowserPattern, Device, DevicePattern, OperatingSystemEntry, OperatingSystemPattern,
    Robot,
};

/// The loaded, validated rule database for one refresh generation.
///
/// Owns its entities; consumers get read-only views. Patterns are kept in
/// evaluation order (ascending `order`, ties broken by `id`) and all
/// cross-references are resolved to indexes at construction, so a container
/// that exists is internally consistent.
#[derive(Debug, Clone, PartialEq)]
pub struct Data {
    version: String,
    timestamp: DateTime<Utc>,
    browsers: Vec<Browser>,
    browser_patterns: Vec<BrowserPattern>,
    operating_systems: Vec<OperatingSystemEntry>,
    operating_system_patterns: Vec<OperatingSystemPattern>,
    devices: Vec<Device>,
    device_patterns: Vec<DevicePattern>,
    robots: Vec<Robot>,
    /// Default OS for a browser when no OS pattern matched.
    browser_os_map: HashMap<u32, u32>,
    browser_index: HashMap<u32, usize>,
    os_index: HashMap<u32, usize>,
    device_index: HashMap<u32, usize>,
    robot_index: HashMap<String, usize>,
}

impl Data {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        version: impl Into<String>,
        timestamp: DateTime<Utc>,
        browsers: Vec<Browser>,
        mut browser_patterns: Vec<BrowserPattern>,
        operating_systems: Vec<OperatingSystemEntry>,
        mut operating_system_patterns: Vec<OperatingSystemPattern>,
        devices: Vec<Device>,
        mut device_patterns: Vec<DevicePattern>,
        robots: Vec<Robot>,
        browser_os_mappings: Vec<(u32, u32)>,
    ) -> Result<Self> {
        let browser_index = entity_index("browser", browsers.iter().map(|b| b.id))?;
        let os_index = entity_index("operating system", operating_systems.iter().map(|o| o.id))?;
        let device_index = entity_index("device", devices.iter().map(|d| d.id))?;

        browser_patterns.sort_by(|a, b| pattern_precedence((a.order, a.id), (b.order, b.id)));
        operating_system_patterns
            .sort_by(|a, b| pattern_precedence((a.order, a.id), (b.order, b.id)));
        device_patterns.sort_by(|a, b| pattern_precedence((a.order, a.id), (b.order, b.id)));

        check_orders(
            "browser pattern",
            browser_patterns.iter().map(|p| (p.id, p.order)),
        )?;
        check_orders(
            "operating system pattern",
            operating_system_patterns.iter().map(|p| (p.id, p.order)),
        )?;
        check_orders(
            "device pattern",
            device_patterns.iter().map(|p| (p.id, p.order)),
        )?;

        for p in &browser_patterns {
            if !browser_index.contains_key(&p.browser_id) {
                return Err(UaDetectorError::data_corrupt(format!(
                    "browser pattern {} references unknown browser {}",
                    p.id, p.browser_id
                )));
            }
        }
        for p in &operating_system_patterns {
            if !os_index.contains_key(&p.os_id) {
                return Err(UaDetectorError::data_corrupt(format!(
                    "operating system pattern {} references unknown operating system {}",
                    p.id, p.os_id
                )));
            }
        }
        for p in &device_patterns {
            if !device_index.contains_key(&p.device_id) {
                return Err(UaDetectorError::data_corrupt(format!(
                    "device pattern {} references unknown device {}",
                    p.id, p.device_id
                )));
            }
        }

        let mut robot_index = HashMap::with_capacity(robots.len());
        for (idx, robot) in robots.iter().enumerate() {
            if robot_index
                .insert(robot.user_agent_string.clone(), idx)
                .is_some()
            {
                return Err(UaDetectorError::data_corrupt(format!(
                    "robot {} duplicates the user agent string of an earlier robot",
                    robot.id
                )));
            }
        }

        let mut browser_os_map = HashMap::with_capacity(browser_os_mappings.len());
        for (browser_id, os_id) in browser_os_mappings {
            if !browser_index.contains_key(&browser_id) {
                return Err(UaDetectorError::data_corrupt(format!(
                    "browser/OS mapping references unknown browser {}",
                    browser_id
                )));
            }
            if !os_index.contains_key(&os_id) {
                return Err(UaDetectorError::data_corrupt(format!(
                    "browser/OS mapping for browser {} references unknown operating system {}",
                    browser_id, os_id
                )));
            }
            browser_os_map.insert(browser_id, os_id);
        }

        Ok(Self {
            version: version.into(),
            timestamp,
            browsers,
            browser_patterns,
            operating_systems,
            operating_system_patterns,
            devices,
            device_patterns,
            robots,
            browser_os_map,
            browser_index,
            os_index,
            device_index,
            robot_index,
        })
    }

    /// A valid container with no rules. Everything parses to the `unknown`
    /// sentinel against it.
    pub fn empty() -> Self {
        Self {
            version: String::new(),
            timestamp: DateTime::UNIX_EPOCH,
            browsers: Vec::new(),
            browser_patterns: Vec::new(),
            operating_systems: Vec::new(),
            operating_system_patterns: Vec::new(),
            devices: Vec::new(),
            device_patterns: Vec::new(),
            robots: Vec::new(),
            browser_os_map: HashMap::new(),
            browser_index: HashMap::new(),
            os_index: HashMap::new(),
            device_index: HashMap::new(),
            robot_index: HashMap::new(),
        }
    }

    /// Opaque version identifier assigned by the database publisher.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Build timestamp declared by the rule file.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn browsers(&self) -> &[Browser] {
        &self.browsers
    }

    /// Browser patterns in evaluation order.
    pub fn browser_patterns(&self) -> &[BrowserPattern] {
        &self.browser_patterns
    }

    pub fn operating_systems(&self) -> &[OperatingSystemEntry] {
        &self.operating_systems
    }

    /// Operating system patterns in evaluation order.
    pub fn operating_system_patterns(&self) -> &[OperatingSystemPattern] {
        &self.operating_system_patterns
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    /// Device patterns in evaluation order.
    pub fn device_patterns(&self) -> &[DevicePattern] {
        &self.device_patterns
    }

    pub fn robots(&self) -> &[Robot] {
        &self.robots
    }

    pub fn browser_by_id(&self, id: u32) -> Option<&Browser> {
        self.browser_index.get(&id).map(|&idx| &self.browsers[idx])
    }

    pub fn operating_system_by_id(&self, id: u32) -> Option<&OperatingSystemEntry> {
        self.os_index
            .get(&id)
            .map(|&idx| &self.operating_systems[idx])
    }

    pub fn device_by_id(&self, id: u32) -> Option<&Device> {
        self.device_index.get(&id).map(|&idx| &self.devices[idx])
    }

    /// Exact lookup on the raw `User-Agent` value.
    pub fn robot_by_user_agent(&self, user_agent: &str) -> Option<&Robot> {
        self.robot_index
            .get(user_agent)
            .map(|&idx| &self.robots[idx])
    }

    /// Default OS for a browser when no OS pattern matched the input.
    pub fn default_operating_system_for_browser(
        &self,
        browser_id: u32,
    ) -> Option<&OperatingSystemEntry> {
        self.browser_os_map
            .get(&browser_id)
            .and_then(|&os_id| self.operating_system_by_id(os_id))
    }

    pub fn browser_os_mappings(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.browser_os_map.iter().map(|(&b, &o)| (b, o))
    }

    pub fn is_empty(&self) -> bool {
        self.browsers.is_empty() && self.robots.is_empty() && self.operating_systems.is_empty()
    }
}

fn entity_index(kind: &str, ids: impl Iterator<Item = u32>) -> Result<HashMap<u32, usize>> {
    let mut index = HashMap::new();
    for (idx, id) in ids.enumerate() {
        if index.insert(id, idx).is_some() {
            return Err(UaDetectorError::data_corrupt(format!(
                "duplicate {} id {}",
                kind, id
            )));
        }
    }
    Ok(index)
}

/// `order` must be unique within a pattern kind; the input is pre-sorted so
/// duplicates are adjacent.
fn check_orders(kind: &str, patterns: impl Iterator<Item = (u32, u32)>) -> Result<()> {
    let mut seen_ids = HashSet::new();
    let mut last: Option<(u32, u32)> = None;
    for (id, order) in patterns {
        if !seen_ids.insert(id) {
            return Err(UaDetectorError::data_corrupt(format!(
                "duplicate {} id {}",
                kind, id
            )));
        }
        if let Some((last_id, last_order)) = last {
            if last_order == order {
                return Err(UaDetectorError::data_corrupt(format!(
                    "{} {} duplicates order {} of {} {}",
                    kind, id, order, kind, last_id
                )));
            }
        }
        last = Some((id, order));
    }
    Ok(())
}
