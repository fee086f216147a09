//! 点分版本号解析与比较

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("empty version string")]
    Empty,
    #[error("invalid version segment '{segment}' in '{input}'")]
    InvalidSegment { input: String, segment: String },
}

/// 版本号：非负整数序列，比较时短的一方在右侧补零
#[derive(Debug, Clone)]
pub struct Version {
    parts: Vec<u64>,
}

impl Version {
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(VersionError::Empty);
        }
        let parts = input
            .split('.')
            .map(|segment| {
                // u64::from_str 会接受 "+1"，这里只允许纯数字
                if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(VersionError::InvalidSegment {
                        input: input.to_string(),
                        segment: segment.to_string(),
                    });
                }
                segment.parse::<u64>().map_err(|_| VersionError::InvalidSegment {
                    input: input.to_string(),
                    segment: segment.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { parts })
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text: Vec<String> = self.parts.iter().map(|p| p.to_string()).collect();
        write!(f, "{}", text.join("."))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.parts.len().max(other.parts.len());
        let padded = |parts: &[u64]| -> Vec<u64> {
            let mut v = parts.to_vec();
            v.resize(len, 0);
            v
        };
        padded(&self.parts).cmp(&padded(&other.parts))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// 与 Ord 保持一致："1.2" == "1.2.0"
impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

/// 比较两个版本字符串
pub fn compare(a: &str, b: &str) -> Result<Ordering, VersionError> {
    Ok(Version::parse(a)?.cmp(&Version::parse(b)?))
}
