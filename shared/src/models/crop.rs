//! Crop type and growth stage models

use serde::{Deserialize, Serialize};

/// Crop grown on a field
///
/// Serialized as its lower-case name so catalogs can introduce crops the
/// platform has no dedicated variant for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum CropType {
    Corn,
    Soybean,
    Wheat,
    Rice,
    /// Any other crop, by normalized name
    Other(String),
}

impl CropType {
    pub fn name(&self) -> &str {
        match self {
            CropType::Corn => "corn",
            CropType::Soybean => "soybean",
            CropType::Wheat => "wheat",
            CropType::Rice => "rice",
            CropType::Other(name) => name,
        }
    }
}

impl From<&str> for CropType {
    fn from(value: &str) -> Self {
        let normalized = value.trim().to_lowercase();
        match normalized.as_str() {
            "corn" | "maize" => CropType::Corn,
            "soybean" | "soybeans" | "soy" => CropType::Soybean,
            "wheat" => CropType::Wheat,
            "rice" => CropType::Rice,
            _ => CropType::Other(normalized),
        }
    }
}

impl From<String> for CropType {
    fn from(value: String) -> Self {
        CropType::from(value.as_str())
    }
}

impl From<CropType> for String {
    fn from(value: CropType) -> Self {
        value.name().to_string()
    }
}

impl std::fmt::Display for CropType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Phenological growth stage
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GrowthStage {
    Germination,
    Emergence,
    #[serde(alias = "vegetative")]
    VegetativeEarly,
    VegetativeLate,
    Flowering,
    Fruiting,
    GrainFill,
    Maturity,
}

impl std::fmt::Display for GrowthStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrowthStage::Germination => write!(f, "germination"),
            GrowthStage::Emergence => write!(f, "emergence"),
            GrowthStage::VegetativeEarly => write!(f, "vegetative_early"),
            GrowthStage::VegetativeLate => write!(f, "vegetative_late"),
            GrowthStage::Flowering => write!(f, "flowering"),
            GrowthStage::Fruiting => write!(f, "fruiting"),
            GrowthStage::GrainFill => write!(f, "grain_fill"),
            GrowthStage::Maturity => write!(f, "maturity"),
        }
    }
}

/// Output of the crop-stage detection service for one field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropStageInfo {
    pub current: GrowthStage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<GrowthStage>,
}

impl CropStageInfo {
    pub fn new(current: GrowthStage) -> Self {
        Self {
            current,
            next: None,
        }
    }

    pub fn with_next(mut self, next: GrowthStage) -> Self {
        self.next = Some(next);
        self
    }
}
