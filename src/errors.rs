use std::fmt;

#[derive(Debug, Clone)]
pub enum UaDetectorError {
    InvalidArgument(String),
    DataCorrupt(String),
    NetworkUnavailable(String),
    IoOperation(String),
    Serialization(String),
}

impl UaDetectorError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            UaDetectorError::InvalidArgument(_) => "E001",
            UaDetectorError::DataCorrupt(_) => "E002",
            UaDetectorError::NetworkUnavailable(_) => "E003",
            UaDetectorError::IoOperation(_) => "E004",
            UaDetectorError::Serialization(_) => "E005",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            UaDetectorError::InvalidArgument(_) => "Invalid Argument",
            UaDetectorError::DataCorrupt(_) => "Data Corrupt",
            UaDetectorError::NetworkUnavailable(_) => "Network Unavailable",
            UaDetectorError::IoOperation(_) => "IO Operation Error",
            UaDetectorError::Serialization(_) => "Serialization Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            UaDetectorError::InvalidArgument(msg) => msg,
            UaDetectorError::DataCorrupt(msg) => msg,
            UaDetectorError::NetworkUnavailable(msg) => msg,
            UaDetectorError::IoOperation(msg) => msg,
            UaDetectorError::Serialization(msg) => msg,
        }
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for UaDetectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for UaDetectorError {}

// 便捷的构造函数
impl UaDetectorError {
    pub fn invalid_argument<T: Into<String>>(msg: T) -> Self {
        UaDetectorError::InvalidArgument(msg.into())
    }

    pub fn data_corrupt<T: Into<String>>(msg: T) -> Self {
        UaDetectorError::DataCorrupt(msg.into())
    }

    pub fn network_unavailable<T: Into<String>>(msg: T) -> Self {
        UaDetectorError::NetworkUnavailable(msg.into())
    }

    pub fn io_operation<T: Into<String>>(msg: T) -> Self {
        UaDetectorError::IoOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        UaDetectorError::Serialization(msg.into())
    }
}

impl From<std::io::Error> for UaDetectorError {
    fn from(err: std::io::Error) -> Self {
        UaDetectorError::IoOperation(err.to_string())
    }
}

impl From<serde_json::Error> for UaDetectorError {
    fn from(err: serde_json::Error) -> Self {
        UaDetectorError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, UaDetectorError>;
