//! Screen identifiers.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    #[default]
    Devices,
    Detail,
}

impl ScreenId {
    /// Short label for the status bar.
    pub fn label(self) -> &'static str {
        match self {
            Self::Devices => "Devices",
            Self::Detail => "Detail",
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
