use std::fmt;

use serde::{Deserialize, Serialize};

/// Attenuation curve slots exposed by the external authoring system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CurveType {
    #[default]
    #[serde(rename = "VolumeDryUsage")]
    Volume,
    #[serde(rename = "VolumeWetGameUsage")]
    GameAuxSend,
    #[serde(rename = "VolumeWetUserUsage")]
    UserAuxSend,
    #[serde(rename = "LowPassFilterUsage")]
    LowPassFilter,
    #[serde(rename = "HighPassFilterUsage")]
    HighPassFilter,
    #[serde(rename = "SpreadUsage")]
    Spread,
    #[serde(rename = "FocusUsage")]
    Focus,
}

impl CurveType {
    pub const ALL: [CurveType; 7] = [
        CurveType::Volume,
        CurveType::GameAuxSend,
        CurveType::UserAuxSend,
        CurveType::LowPassFilter,
        CurveType::HighPassFilter,
        CurveType::Spread,
        CurveType::Focus,
    ];

    pub fn external_id(self) -> &'static str {
        match self {
            CurveType::Volume => "VolumeDryUsage",
            CurveType::GameAuxSend => "VolumeWetGameUsage",
            CurveType::UserAuxSend => "VolumeWetUserUsage",
            CurveType::LowPassFilter => "LowPassFilterUsage",
            CurveType::HighPassFilter => "HighPassFilterUsage",
            CurveType::Spread => "SpreadUsage",
            CurveType::Focus => "FocusUsage",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CurveType::Volume => "Volume",
            CurveType::GameAuxSend => "Auxiliary send volumes (Game-defined)",
            CurveType::UserAuxSend => "Auxiliary send volumes (User-defined)",
            CurveType::LowPassFilter => "Low-pass filter",
            CurveType::HighPassFilter => "High-pass filter",
            CurveType::Spread => "Spread",
            CurveType::Focus => "Focus",
        }
    }

    pub fn from_external_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.external_id() == id)
    }

    pub fn domain(self) -> YDomain {
        match self {
            CurveType::Volume | CurveType::GameAuxSend | CurveType::UserAuxSend => {
                YDomain::Attenuation
            }
            CurveType::LowPassFilter
            | CurveType::HighPassFilter
            | CurveType::Spread
            | CurveType::Focus => YDomain::Percent,
        }
    }

    /// Plot color as a `#rrggbb` string.
    pub fn color(self) -> &'static str {
        match self {
            CurveType::Volume => "#da2121",
            CurveType::GameAuxSend => "#c98036",
            CurveType::UserAuxSend => "#7c4d1d",
            CurveType::LowPassFilter => "#0080ff",
            CurveType::HighPassFilter => "#30bffd",
            CurveType::Spread => "#8bd100",
            CurveType::Focus => "#639400",
        }
    }
}

impl fmt::Display for CurveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Value range of the y axis for a curve type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YDomain {
    /// Attenuation level in dB, `[-200, 0]`.
    Attenuation,
    /// Percentage, `[0, 100]`.
    Percent,
}

impl YDomain {
    pub fn range(self) -> (f64, f64) {
        match self {
            YDomain::Attenuation => (-200.0, 0.0),
            YDomain::Percent => (0.0, 100.0),
        }
    }

    pub fn clamp(self, y: f64) -> f64 {
        let (min, max) = self.range();
        y.clamp(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_like_types_use_attenuation_domain() {
        let attenuation: Vec<_> = CurveType::ALL
            .into_iter()
            .filter(|kind| kind.domain() == YDomain::Attenuation)
            .collect();
        assert_eq!(
            attenuation,
            vec![
                CurveType::Volume,
                CurveType::GameAuxSend,
                CurveType::UserAuxSend
            ]
        );
    }

    #[test]
    fn external_ids_round_trip_through_serde() {
        for kind in CurveType::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.external_id()));
            assert_eq!(CurveType::from_external_id(kind.external_id()), Some(kind));
        }
    }

    #[test]
    fn clamps_into_domain() {
        assert_eq!(YDomain::Attenuation.clamp(50.0), 0.0);
        assert_eq!(YDomain::Attenuation.clamp(-250.0), -200.0);
        assert_eq!(YDomain::Percent.clamp(-10.0), 0.0);
        assert_eq!(YDomain::Percent.clamp(150.0), 100.0);
    }
}
