//! Priority tiers
//!
//! Informational metadata on boards and tasks. Nothing in ordering or
//! progress derivation keys off it; statistics group by it.

use serde::{Deserialize, Serialize};

/// Priority tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Low priority (default)
    #[default]
    Low,
    /// Medium priority
    Medium,
    /// High priority
    High,
    /// Urgent - drop everything
    Urgent,
}

impl Priority {
    /// All tiers, most urgent first
    pub const ALL: [Self; 4] = [Self::Urgent, Self::High, Self::Medium, Self::Low];
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Urgent => write!(f, "urgent"),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" | "l" => Ok(Self::Low),
            "medium" | "med" | "m" => Ok(Self::Medium),
            "high" | "h" => Ok(Self::High),
            "urgent" | "u" | "critical" => Ok(Self::Urgent),
            _ => Err(format!("Invalid priority: {s}. Use: low, medium, high, urgent")),
        }
    }
}
