use std::fmt;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Requested analysis mode.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Eq, PartialEq, ValueEnum, Default)]
#[serde(rename_all = "lowercase")]
pub enum TestType {
    #[default]
    Static,
    Dynamic,
    Both,
}

impl TestType {
    pub fn includes_dynamic(&self) -> bool {
        matches!(self, TestType::Dynamic | TestType::Both)
    }

    pub fn includes_static(&self) -> bool {
        matches!(self, TestType::Static | TestType::Both)
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            TestType::Static => "static",
            TestType::Dynamic => "dynamic",
            TestType::Both => "both",
        };
        write!(f, "{}", name)
    }
}
