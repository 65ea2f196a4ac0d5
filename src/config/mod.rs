mod structs;

pub use structs::DetectorConfig;
