//! Vegetation index and field statistics integration tests
//!
//! Tests for the per-pixel and per-field calculators including:
//! - NDVI bounds and degenerate inputs
//! - Pixel accounting in field statistics
//! - Bare-soil field scenario

use proptest::prelude::*;
use shared::{
    aggregate_field_statistics, compute_vegetation_indices, compute_vegetation_indices_batch,
    fractional_vegetation_cover, leaf_area_index, ndvi, FieldIndexStatistics, SpectralSample,
};

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// NDVI reference value for red 0.1, NIR 0.5
    #[test]
    fn test_ndvi_reference() {
        assert!((ndvi(0.1, 0.5) - 0.6667).abs() <= 1e-4);
    }

    /// Zero reflectance in both bands is the degenerate case
    #[test]
    fn test_ndvi_zero_bands() {
        assert_eq!(ndvi(0.0, 0.0), 0.0);
    }

    /// Dense canopy sample with every optional band
    #[test]
    fn test_full_band_sample() {
        let sample = SpectralSample::new(0.04, 0.5)
            .with_blue(0.02)
            .with_green(0.06)
            .with_swir(0.2, Some(0.1));
        let indices = compute_vegetation_indices(&sample);

        assert!(indices.ndvi > 0.8);
        assert!(indices.evi > 0.0 && indices.evi != indices.ndvi);
        assert!(indices.gndvi != indices.ndvi);
        assert!(indices.ndwi > 0.0);
        assert!(indices.lai > 3.0);
        assert!(indices.fvc > 0.85);
    }

    /// Empty input yields an all-zero record
    #[test]
    fn test_empty_statistics() {
        assert_eq!(aggregate_field_statistics(&[]), FieldIndexStatistics::default());
    }

    /// All-NaN input yields zeros with every pixel cloudy
    #[test]
    fn test_all_nan_statistics() {
        let stats = aggregate_field_statistics(&[f64::NAN, f64::NAN]);
        assert_eq!(stats.valid_pixels, 0);
        assert_eq!(stats.cloudy_pixels, 2);
        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.median, 0.0);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.percentile_75, 0.0);
    }

    /// Ten low-NDVI pixels are all classed as bare soil
    #[test]
    fn test_bare_soil_field() {
        let values = [0.1, 0.15, 0.12, 0.18, 0.2, 0.22, 0.19, 0.16, 0.14, 0.11];
        let stats = aggregate_field_statistics(&values);

        assert_eq!(stats.bare_soil_pixels, 10);
        assert_eq!(stats.valid_pixels, 10);
        assert_eq!(stats.water_pixels, 0);
        assert!((stats.mean - 0.157).abs() < 1e-3);
        assert_eq!(stats.min, 0.1);
        assert_eq!(stats.max, 0.22);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for reflectance including slightly negative atmospheric residue
    fn reflectance() -> impl Strategy<Value = f64> {
        -0.05f64..1.2
    }

    /// Strategy for raw pixel values, including no-data and out-of-range noise
    fn pixel_value() -> impl Strategy<Value = f64> {
        prop_oneof![
            8 => -1.0f64..=1.0,
            1 => Just(f64::NAN),
            1 => Just(f64::INFINITY),
            1 => 1.0f64..10.0,
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// NDVI stays within [-1, 1] for any reflectance pair
        #[test]
        fn prop_ndvi_bounded(red in reflectance(), nir in reflectance()) {
            let value = ndvi(red, nir);
            prop_assert!((-1.0..=1.0).contains(&value), "ndvi {} out of range", value);
        }

        /// Equal bands give zero NDVI
        #[test]
        fn prop_ndvi_equal_bands_zero(x in 0.001f64..1.0) {
            prop_assert_eq!(ndvi(x, x), 0.0);
        }

        /// LAI and FVC stay within their physical bounds
        #[test]
        fn prop_canopy_bounds(value in -1.0f64..=1.0) {
            let lai = leaf_area_index(value);
            let fvc = fractional_vegetation_cover(value);
            prop_assert!((0.0..=8.0).contains(&lai));
            prop_assert!((0.0..=1.0).contains(&fvc));
        }

        /// Valid and cloudy pixels always account for every input
        #[test]
        fn prop_pixel_accounting(values in prop::collection::vec(pixel_value(), 0..200)) {
            let stats = aggregate_field_statistics(&values);
            prop_assert_eq!(stats.valid_pixels + stats.cloudy_pixels, values.len());
            prop_assert_eq!(stats.total_pixels, values.len());
            prop_assert!(stats.water_pixels + stats.bare_soil_pixels <= stats.valid_pixels);
        }

        /// Percentiles are ordered within the observed range
        #[test]
        fn prop_percentiles_ordered(values in prop::collection::vec(-1.0f64..=1.0, 1..100)) {
            let stats = aggregate_field_statistics(&values);
            prop_assert!(stats.min <= stats.percentile_25);
            prop_assert!(stats.percentile_25 <= stats.median);
            prop_assert!(stats.median <= stats.percentile_75);
            prop_assert!(stats.percentile_75 <= stats.max);
        }

        /// Batch computation matches per-sample computation in order
        #[test]
        fn prop_batch_matches_single(
            pairs in prop::collection::vec((reflectance(), reflectance()), 0..50)
        ) {
            let samples: Vec<SpectralSample> =
                pairs.iter().map(|(r, n)| SpectralSample::new(*r, *n)).collect();
            let batch = compute_vegetation_indices_batch(&samples);
            prop_assert_eq!(batch.len(), samples.len());
            for (sample, indices) in samples.iter().zip(&batch) {
                prop_assert_eq!(*indices, compute_vegetation_indices(sample));
            }
        }
    }
}
