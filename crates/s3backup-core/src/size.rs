//! Human readable byte sizes.

use std::fmt;

const UNITS: [&str; 8] = ["", "K", "M", "G", "T", "P", "E", "Z"];

/// A byte count rendered with binary (1024) unit steps, e.g. `1.5Kb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ByteSize(pub u64);

impl fmt::Display for ByteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        #[allow(clippy::cast_precision_loss)]
        let mut size = self.0 as f64;

        for unit in UNITS {
            if size.abs() < 1024.0 {
                return write!(f, "{size:3.1}{unit}b");
            }
            size /= 1024.0;
        }

        write!(f, "{size:.1}Yb")
    }
}
