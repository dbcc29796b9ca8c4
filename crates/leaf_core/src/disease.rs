//! Disease labels and the static reference table shown for each of them.

use std::fmt;

/// Classification outcome for a leaf image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiseaseLabel {
    Healthy,
    Sigatoka,
    PanamaDisease,
    BananaBunchyTop,
    CordanaLeafSpot,
}

impl DiseaseLabel {
    /// Every label the classifier can produce, in display order.
    pub const ALL: [DiseaseLabel; 5] = [
        DiseaseLabel::Healthy,
        DiseaseLabel::Sigatoka,
        DiseaseLabel::PanamaDisease,
        DiseaseLabel::BananaBunchyTop,
        DiseaseLabel::CordanaLeafSpot,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DiseaseLabel::Healthy => "Healthy",
            DiseaseLabel::Sigatoka => "Sigatoka",
            DiseaseLabel::PanamaDisease => "Panama Disease",
            DiseaseLabel::BananaBunchyTop => "Banana Bunchy Top",
            DiseaseLabel::CordanaLeafSpot => "Cordana Leaf Spot",
        }
    }

    /// Exact-match lookup by display name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|label| label.name() == name)
    }

    /// Total lookup: names outside the closed set resolve to `Healthy`.
    pub fn resolve(name: &str) -> Self {
        Self::from_name(name).unwrap_or(DiseaseLabel::Healthy)
    }

    pub fn info(self) -> &'static DiseaseInfo {
        match self {
            DiseaseLabel::Healthy => &HEALTHY,
            DiseaseLabel::Sigatoka => &SIGATOKA,
            DiseaseLabel::PanamaDisease => &PANAMA_DISEASE,
            DiseaseLabel::BananaBunchyTop => &BUNCHY_TOP,
            DiseaseLabel::CordanaLeafSpot => &CORDANA_LEAF_SPOT,
        }
    }
}

impl fmt::Display for DiseaseLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Icon shown next to a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    CheckCircle,
    AlertCircle,
}

/// How urgently the grower should act.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SeverityTier {
    None,
    Moderate,
    Severe,
}

/// Reference metadata for one disease label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiseaseInfo {
    pub icon: Icon,
    pub severity: SeverityTier,
    pub description: &'static str,
    /// Severity summary plus the recommended action, e.g. "Moderate - Apply fungicide treatment".
    pub action: &'static str,
}

static HEALTHY: DiseaseInfo = DiseaseInfo {
    icon: Icon::CheckCircle,
    severity: SeverityTier::None,
    description: "The banana leaf appears to be healthy with no signs of disease.",
    action: "No action needed",
};

static SIGATOKA: DiseaseInfo = DiseaseInfo {
    icon: Icon::AlertCircle,
    severity: SeverityTier::Moderate,
    description: "Black Sigatoka disease detected. This fungal disease causes dark spots on leaves.",
    action: "Moderate - Apply fungicide treatment",
};

static PANAMA_DISEASE: DiseaseInfo = DiseaseInfo {
    icon: Icon::AlertCircle,
    severity: SeverityTier::Severe,
    description: "Panama disease detected. A serious fungal infection affecting the vascular system.",
    action: "Severe - Isolate affected plants",
};

static BUNCHY_TOP: DiseaseInfo = DiseaseInfo {
    icon: Icon::AlertCircle,
    severity: SeverityTier::Severe,
    description: "Bunchy Top Virus detected. Transmitted by aphids, causes stunted growth.",
    action: "Severe - Remove infected plants",
};

static CORDANA_LEAF_SPOT: DiseaseInfo = DiseaseInfo {
    icon: Icon::AlertCircle,
    severity: SeverityTier::Moderate,
    description: "Cordana leaf spot detected. Fungal disease causing brown spots on leaves.",
    action: "Moderate - Apply copper-based fungicide",
};

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Healthy", DiseaseLabel::Healthy)]
    #[case("Sigatoka", DiseaseLabel::Sigatoka)]
    #[case("Panama Disease", DiseaseLabel::PanamaDisease)]
    #[case("Banana Bunchy Top", DiseaseLabel::BananaBunchyTop)]
    #[case("Cordana Leaf Spot", DiseaseLabel::CordanaLeafSpot)]
    fn names_round_trip(#[case] name: &str, #[case] label: DiseaseLabel) {
        assert_eq!(DiseaseLabel::from_name(name), Some(label));
        assert_eq!(label.name(), name);
        assert_eq!(label.to_string(), name);
    }

    #[rstest]
    #[case("")]
    #[case("healthy")]
    #[case("Black Sigatoka")]
    #[case("Fusarium Wilt")]
    fn unknown_names_resolve_to_healthy(#[case] name: &str) {
        assert_eq!(DiseaseLabel::from_name(name), None);
        assert_eq!(DiseaseLabel::resolve(name), DiseaseLabel::Healthy);
    }

    #[test]
    fn severity_tiers_match_actions() {
        for label in DiseaseLabel::ALL {
            let info = label.info();
            match info.severity {
                SeverityTier::None => assert_eq!(info.icon, Icon::CheckCircle),
                SeverityTier::Moderate => assert!(info.action.starts_with("Moderate - ")),
                SeverityTier::Severe => assert!(info.action.starts_with("Severe - ")),
            }
        }
    }
}
