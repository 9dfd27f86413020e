//! Read cursors into log partitions.
//!
//! A [`Position`] names a log file (file name + generation) and a byte offset
//! inside it. Positions are totally ordered: by file name, then generation,
//! then offset. The engine never interprets them beyond ordering and
//! equality.
//!
//! # Examples
//!
//! ```
//! use multilog_core::{LogFile, Position};
//!
//! let start = Position::initial();
//! let later = Position::new(LogFile::new("2024-01-01", 0), 4096);
//! assert!(start < later);
//! assert_eq!(later.to_string(), "2024-01-01#0@4096");
//! ```

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One physical file of a partition, identified by name and generation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct LogFile {
    name: String,
    generation: u32,
}

impl LogFile {
    pub fn new(name: impl Into<String>, generation: u32) -> Self {
        Self {
            name: name.into(),
            generation,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for LogFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name, self.generation)
    }
}

/// A cursor into a partition: log file plus offset within that file.
///
/// Field order matters: the derived `Ord` compares the log file first and the
/// offset second.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    log_file: LogFile,
    offset: i64,
}

impl Position {
    pub fn new(log_file: LogFile, offset: i64) -> Self {
        Self { log_file, offset }
    }

    /// The "beginning of the partition" sentinel, used when no committed
    /// position exists yet. Orders before every real position.
    pub fn initial() -> Self {
        Self::default()
    }

    pub fn log_file(&self) -> &LogFile {
        &self.log_file
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    pub fn is_initial(&self) -> bool {
        *self == Self::initial()
    }

    /// Same file, offset moved forward by `delta`.
    pub fn advanced_by(&self, delta: i64) -> Self {
        Self {
            log_file: self.log_file.clone(),
            offset: self.offset + delta,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.log_file, self.offset)
    }
}

/// Wire shape: `[file name, generation, offset]`.
impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.log_file.name, self.log_file.generation, self.offset).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (name, generation, offset) = <(String, u32, i64)>::deserialize(deserializer)?;
        Ok(Self::new(LogFile::new(name, generation), offset))
    }
}
