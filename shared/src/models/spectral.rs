//! Multispectral reflectance and derived vegetation index models

use serde::{Deserialize, Serialize};

/// Surface reflectance for a single pixel or sample location
///
/// `red` and `nir` are always present; the remaining bands depend on the
/// sensor and may be missing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct SpectralSample {
    pub red: f64,
    pub nir: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blue: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub green: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swir1: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swir2: Option<f64>,
}

impl SpectralSample {
    pub fn new(red: f64, nir: f64) -> Self {
        Self {
            red,
            nir,
            ..Default::default()
        }
    }

    pub fn with_blue(mut self, blue: f64) -> Self {
        self.blue = Some(blue);
        self
    }

    pub fn with_green(mut self, green: f64) -> Self {
        self.green = Some(green);
        self
    }

    pub fn with_swir(mut self, swir1: f64, swir2: Option<f64>) -> Self {
        self.swir1 = Some(swir1);
        self.swir2 = swir2;
        self
    }
}

/// Vegetation indices derived from one [`SpectralSample`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct VegetationIndexSet {
    /// Normalized Difference Vegetation Index, [-1, 1]
    pub ndvi: f64,
    /// Soil-Adjusted Vegetation Index
    pub savi: f64,
    /// Enhanced Vegetation Index
    pub evi: f64,
    /// Normalized Difference Water Index, [-1, 1]
    pub ndwi: f64,
    /// Normalized Difference Moisture Index, [-1, 1]
    pub ndmi: f64,
    /// Green NDVI, [-1, 1]
    pub gndvi: f64,
    /// Leaf Area Index estimate, [0, 8]
    pub lai: f64,
    /// Fractional Vegetation Cover, [0, 1]
    pub fvc: f64,
}
