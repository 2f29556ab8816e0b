//! Spectral vegetation and water indices
//!
//! Indices are computed per sample from surface reflectance. Missing optional
//! bands and zero denominators never raise: EVI and GNDVI fall back to NDVI,
//! NDWI/NDMI fall back to 0, and a zero denominator yields 0.

use super::{finite_or_zero, round_to};
use crate::maybe_rayon::*;
use crate::models::{SpectralSample, VegetationIndexSet};

/// SAVI soil-brightness correction factor
pub const SOIL_BRIGHTNESS_FACTOR: f64 = 0.5;
/// Light extinction coefficient of the Beer-Lambert LAI inversion
pub const LAI_EXTINCTION_COEFFICIENT: f64 = 0.5;
pub const MAX_LAI: f64 = 8.0;
/// NDVI of bare soil, the zero point of the cover stretch
pub const BARE_SOIL_NDVI: f64 = 0.05;
/// NDVI of full canopy cover
pub const FULL_COVER_NDVI: f64 = 0.95;

const INDEX_DECIMALS: i32 = 4;
const LAI_DECIMALS: i32 = 2;
const FVC_DECIMALS: i32 = 3;

/// `(a - b) / (a + b)` clamped to [-1, 1], or 0 when the sum is zero
pub fn normalized_difference(a: f64, b: f64) -> f64 {
    let sum = a + b;
    if sum == 0.0 || !sum.is_finite() {
        return 0.0;
    }
    finite_or_zero((a - b) / sum).clamp(-1.0, 1.0)
}

/// Normalized Difference Vegetation Index
///
/// `NDVI = (NIR - Red) / (NIR + Red)`
///
/// - Dense vegetation: 0.6 to 0.9
/// - Sparse vegetation: 0.2 to 0.5
/// - Bare soil: 0.1 to 0.2
/// - Water/clouds: -1.0 to 0.0
pub fn ndvi(red: f64, nir: f64) -> f64 {
    round_to(normalized_difference(nir, red), INDEX_DECIMALS)
}

/// Soil Adjusted Vegetation Index (Huete, 1988)
///
/// `SAVI = ((NIR - Red) / (NIR + Red + L)) * (1 + L)` with `L = 0.5`
pub fn savi(red: f64, nir: f64) -> f64 {
    let denominator = nir + red + SOIL_BRIGHTNESS_FACTOR;
    if denominator == 0.0 {
        return 0.0;
    }
    let value = (nir - red) / denominator * (1.0 + SOIL_BRIGHTNESS_FACTOR);
    round_to(finite_or_zero(value), INDEX_DECIMALS)
}

/// Enhanced Vegetation Index
///
/// `EVI = 2.5 * (NIR - Red) / (NIR + 6*Red - 7.5*Blue + 1)`
///
/// Without a blue band this is approximated by NDVI.
pub fn evi(red: f64, nir: f64, blue: Option<f64>) -> f64 {
    let Some(blue) = blue else {
        return ndvi(red, nir);
    };
    let denominator = nir + 6.0 * red - 7.5 * blue + 1.0;
    if denominator == 0.0 {
        return 0.0;
    }
    round_to(finite_or_zero(2.5 * (nir - red) / denominator), INDEX_DECIMALS)
}

/// Green NDVI, `(NIR - Green) / (NIR + Green)`, or NDVI without a green band
pub fn gndvi(red: f64, nir: f64, green: Option<f64>) -> f64 {
    match green {
        Some(green) => round_to(normalized_difference(nir, green), INDEX_DECIMALS),
        None => ndvi(red, nir),
    }
}

/// NIR/SWIR1 moisture index shared by NDWI and NDMI, or 0 without SWIR1
pub fn moisture_index(nir: f64, swir1: Option<f64>) -> f64 {
    match swir1 {
        Some(swir1) => round_to(normalized_difference(nir, swir1), INDEX_DECIMALS),
        None => 0.0,
    }
}

/// Leaf Area Index from NDVI by Beer-Lambert inversion
///
/// `LAI = -ln(1 - NDVI) / k`, clamped to [0, 8]
pub fn leaf_area_index(ndvi: f64) -> f64 {
    if !ndvi.is_finite() || ndvi <= 0.0 {
        return 0.0;
    }
    if ndvi >= 1.0 {
        return MAX_LAI;
    }
    let lai = -(1.0 - ndvi).ln() / LAI_EXTINCTION_COEFFICIENT;
    round_to(lai.clamp(0.0, MAX_LAI), LAI_DECIMALS)
}

/// Fractional vegetation cover by linear stretch between bare soil and full canopy
pub fn fractional_vegetation_cover(ndvi: f64) -> f64 {
    if !ndvi.is_finite() {
        return 0.0;
    }
    let fvc = (ndvi - BARE_SOIL_NDVI) / (FULL_COVER_NDVI - BARE_SOIL_NDVI);
    round_to(fvc.clamp(0.0, 1.0), FVC_DECIMALS)
}

/// Compute every vegetation index for one sample
pub fn compute_vegetation_indices(sample: &SpectralSample) -> VegetationIndexSet {
    let SpectralSample {
        red,
        nir,
        blue,
        green,
        swir1,
        ..
    } = *sample;

    let raw_ndvi = normalized_difference(nir, red);
    let moisture = moisture_index(nir, swir1);

    VegetationIndexSet {
        ndvi: round_to(raw_ndvi, INDEX_DECIMALS),
        savi: savi(red, nir),
        evi: evi(red, nir, blue),
        ndwi: moisture,
        ndmi: moisture,
        gndvi: gndvi(red, nir, green),
        lai: leaf_area_index(raw_ndvi),
        fvc: fractional_vegetation_cover(raw_ndvi),
    }
}

/// Compute indices for a batch of samples, preserving input order
///
/// Runs on the rayon pool when the `parallel` feature is enabled.
pub fn compute_vegetation_indices_batch(samples: &[SpectralSample]) -> Vec<VegetationIndexSet> {
    samples
        .into_par_iter()
        .map(compute_vegetation_indices)
        .collect()
}
