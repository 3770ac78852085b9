//! Output verbosity.

use std::str::FromStr;

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show every check plus description/action/impact for failures.
    Verbose,
    /// Show every check and the summary.
    #[default]
    Normal,
    /// Show failures and the summary only.
    Quiet,
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "verbose" => Ok(Self::Verbose),
            "normal" => Ok(Self::Normal),
            "quiet" => Ok(Self::Quiet),
            _ => Err(format!("unknown output mode: {}", s)),
        }
    }
}

impl OutputMode {
    /// Whether passing and skipped checks are listed.
    pub fn shows_passing(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }

    /// Whether failing checks carry their action and impact text.
    pub fn shows_details(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Whether progress counters are shown.
    pub fn shows_progress(&self) -> bool {
        matches!(self, Self::Verbose)
    }
}
