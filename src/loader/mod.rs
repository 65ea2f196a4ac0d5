//! Rule file loader
//!
//! Turns a serialized rule document into a validated [`Data`] container.
//! Every regex is compiled here, at load time; a pattern that fails to
//! compile (or uses an unsupported flag) aborts the load with the offending
//! id. The loader never touches the network, that is the store's job.

pub mod schema;

use std::collections::HashMap;

use tracing::debug;

use crate::data::{
    Browser, BrowserPattern, CompiledPattern, Data, Device, DevicePattern, OperatingSystemEntry,
    OperatingSystemPattern, Robot,
};
use crate::errors::{Result, UaDetectorError};

use schema::RuleFile;

pub struct DataLoader;

impl DataLoader {
    /// Decode a raw rule file. The document must be UTF-8 encoded JSON.
    pub fn from_bytes(bytes: &[u8]) -> Result<Data> {
        let text = std::str::from_utf8(bytes).map_err(|e| {
            UaDetectorError::data_corrupt(format!("rule file is not valid UTF-8: {}", e))
        })?;
        Self::from_json(text)
    }

    pub fn from_json(text: &str) -> Result<Data> {
        let file: RuleFile = serde_json::from_str(text).map_err(|e| {
            UaDetectorError::data_corrupt(format!("rule file failed to parse: {}", e))
        })?;
        Self::build(file)
    }

    /// Assemble and validate a container from the parsed document.
    pub fn build(file: RuleFile) -> Result<Data> {
        let mut type_names: HashMap<u32, String> = HashMap::with_capacity(file.browser_types.len());
        for t in &file.browser_types {
            if type_names.insert(t.id, t.name.clone()).is_some() {
                return Err(UaDetectorError::data_corrupt(format!(
                    "duplicate browser type id {}",
                    t.id
                )));
            }
        }

        let browsers = file
            .browsers
            .iter()
            .map(|b| {
                let type_name = type_names.get(&b.type_id).cloned().ok_or_else(|| {
                    UaDetectorError::data_corrupt(format!(
                        "browser {} references unknown type {}",
                        b.id, b.type_id
                    ))
                })?;
                Ok(Browser {
                    id: b.id,
                    family: b.family.clone(),
                    type_name,
                    producer: b.producer.clone(),
                    producer_url: b.producer_url.clone(),
                    url: b.url.clone(),
                    icon: b.icon.clone(),
                    info_url: b.info_url.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let browser_patterns = file
            .browser_patterns
            .iter()
            .map(|p| {
                Ok(BrowserPattern {
                    id: p.id,
                    browser_id: p.browser_id,
                    order: p.order,
                    pattern: compile_pattern("browser pattern", p.id, &p.regex)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let operating_systems = file
            .operating_systems
            .iter()
            .map(|o| OperatingSystemEntry {
                id: o.id,
                family: o.family.clone(),
                name: o.name.clone(),
                producer: o.producer.clone(),
                producer_url: o.producer_url.clone(),
                url: o.url.clone(),
                icon: o.icon.clone(),
                info_url: o.info_url.clone(),
            })
            .collect::<Vec<_>>();

        let operating_system_patterns = file
            .operating_system_patterns
            .iter()
            .map(|p| {
                Ok(OperatingSystemPattern {
                    id: p.id,
                    os_id: p.os_id,
                    order: p.order,
                    pattern: compile_pattern("operating system pattern", p.id, &p.regex)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let devices = file
            .devices
            .iter()
            .map(|d| Device {
                id: d.id,
                name: d.name.clone(),
                icon: d.icon.clone(),
                info_url: d.info_url.clone(),
            })
            .collect::<Vec<_>>();

        let device_patterns = file
            .device_patterns
            .iter()
            .map(|p| {
                Ok(DevicePattern {
                    id: p.id,
                    device_id: p.device_id,
                    order: p.order,
                    pattern: compile_pattern("device pattern", p.id, &p.regex)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let robots = file
            .robots
            .iter()
            .map(|r| Robot {
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
            .collect::<Vec<_>>();

        let mappings = file
            .browser_operating_system
            .iter()
            .map(|m| (m.browser_id, m.os_id))
            .collect::<Vec<_>>();

        let data = Data::new(
            file.version,
            file.timestamp,
            browsers,
            browser_patterns,
            operating_systems,
            operating_system_patterns,
            devices,
            device_patterns,
            robots,
            mappings,
        )?;

        debug!(
            "rule database {} loaded: {} browsers, {} browser patterns, {} operating systems, {} robots",
            data.version(),
            data.browsers().len(),
            data.browser_patterns().len(),
            data.operating_systems().len(),
            data.robots().len()
        );

        Ok(data)
    }

    /// Serialize a container back to the wire format.
    ///
    /// Reloading the output yields an equal container.
    pub fn to_json(data: &Data) -> Result<String> {
        let file = RuleFile::from_data(data);
        Ok(serde_json::to_string_pretty(&file)?)
    }
}

fn compile_pattern(kind: &str, id: u32, raw: &str) -> Result<CompiledPattern> {
    CompiledPattern::compile(raw)
        .map_err(|e| UaDetectorError::data_corrupt(format!("{} {}: {}", kind, id, e.message())))
}
