use crate::model::{OperatingSystem, UserAgent, UserAgentType};

/// A non-interactive client matched by exact string equality on the raw
/// `User-Agent` value, not by regex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Robot {
    pub id: u32,
    pub user_agent_string: String,
    pub family: String,
    pub name: String,
    pub producer: String,
    pub producer_url: String,
    pub url: String,
    pub icon: String,
    pub info_url: String,
}

impl Robot {
    /// Derive the detection record for this robot. Robots carry no
    /// operating system information.
    pub fn to_user_agent(&self) -> UserAgent {
        UserAgent::new(
            self.family.clone(),
            self.name.clone(),
            OperatingSystem::empty(),
            self.producer.clone(),
            self.producer_url.clone(),
            UserAgentType::Robot.token(),
            self.url.clone(),
        )
    }
}
