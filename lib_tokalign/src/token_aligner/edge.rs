use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// One unit of correspondence between source and target token positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Edge {
    /// The source token aligns to the target token, whether they are equal or not.
    Link { source: usize, target: usize },
    /// The source token has no counterpart in the target.
    SkipSource { source: usize },
    /// The target token has no counterpart in the source.
    SkipTarget { target: usize },
}

impl Edge {
    pub fn source_index(&self) -> Option<usize> {
        match *self {
            Self::Link { source, .. } | Self::SkipSource { source } => Some(source),
            Self::SkipTarget { .. } => None,
        }
    }

    pub fn target_index(&self) -> Option<usize> {
        match *self {
            Self::Link { target, .. } | Self::SkipTarget { target } => Some(target),
            Self::SkipSource { .. } => None,
        }
    }
}

impl Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Link { source, target } => write!(f, "Link({source}, {target})"),
            Self::SkipSource { source } => write!(f, "SkipSource({source})"),
            Self::SkipTarget { target } => write!(f, "SkipTarget({target})"),
        }
    }
}
