//! Distortion measure selection.

use std::fmt;
use std::str::FromStr;

use crate::error::DistortionError;

/// Which distortion measure to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DistortionKind {
    /// Log ratio of flat to fiducial triangle area around each vertex.
    #[default]
    Areal,
    /// Mean difference of flat and fiducial edge lengths at each vertex.
    Metric,
}

impl DistortionKind {
    /// Lower-case kind name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Areal => "areal",
            Self::Metric => "metric",
        }
    }
}

impl fmt::Display for DistortionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DistortionKind {
    type Err = DistortionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "areal" => Ok(Self::Areal),
            "metric" => Ok(Self::Metric),
            _ => Err(DistortionError::UnsupportedKind {
                kind: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parse_kinds() {
        assert_eq!("areal".parse::<DistortionKind>().unwrap(), DistortionKind::Areal);
        assert_eq!("Metric".parse::<DistortionKind>().unwrap(), DistortionKind::Metric);
        let err = "angular".parse::<DistortionKind>().unwrap_err();
        assert!(format!("{err}").contains("'angular'"));
    }

    #[test]
    fn display_round_trips_names() {
        for kind in [DistortionKind::Areal, DistortionKind::Metric] {
            assert_eq!(kind.to_string().parse::<DistortionKind>().unwrap(), kind);
        }
    }
}
