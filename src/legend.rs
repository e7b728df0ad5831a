// src/legend.rs
//! Class names of common land-cover products.

use std::collections::BTreeMap;

const MODIS_IGBP: &[(i64, &str)] = &[
    (1, "Evergreen Needleleaf Forests"),
    (2, "Evergreen Broadleaf Forests"),
    (3, "Deciduous Needleleaf Forests"),
    (4, "Deciduous Broadleaf Forests"),
    (5, "Mixed Forests"),
    (6, "Closed Shrublands"),
    (7, "Open Shrublands"),
    (8, "Woody Savannas"),
    (9, "Savannas"),
    (10, "Grasslands"),
    (11, "Permanent Wetlands"),
    (12, "Croplands"),
    (13, "Urban and Built-up Lands"),
    (14, "Cropland/Natural Vegetation Mosaics"),
    (15, "Permanent Snow and Ice"),
    (16, "Barren"),
    (17, "Water Bodies"),
];

const ESA_WORLDCOVER: &[(i64, &str)] = &[
    (10, "Tree cover"),
    (20, "Shrubland"),
    (30, "Grassland"),
    (40, "Cropland"),
    (50, "Built-up"),
    (60, "Bare / sparse vegetation"),
    (70, "Snow and ice"),
    (80, "Permanent water bodies"),
    (90, "Herbaceous wetland"),
    (95, "Mangroves"),
    (100, "Moss and lichen"),
];

/// Mapping of class values to names for one land-cover product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Legend {
    name: &'static str,
    classes: BTreeMap<i64, &'static str>,
}

impl Legend {
    /// Legend of a known dataset, matched on its Earth Engine id
    /// (e.g. `MODIS/061/MCD12Q1`, `ESA/WorldCover/v100`).
    pub fn for_dataset(dataset_id: &str) -> Option<Legend> {
        let (name, table) = if dataset_id.contains("MCD12Q1") {
            ("MODIS Land Cover Type 1 (IGBP)", MODIS_IGBP)
        } else if dataset_id.contains("WorldCover") {
            ("ESA WorldCover", ESA_WORLDCOVER)
        } else {
            return None;
        };

        Some(Legend {
            name,
            classes: table.iter().copied().collect(),
        })
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn class_name(&self, class: i64) -> Option<&'static str> {
        self.classes.get(&class).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i64, &'static str)> + '_ {
        self.classes.iter().map(|(&class, &name)| (class, name))
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modis_legend_matches_any_collection_version() {
        for id in ["MODIS/006/MCD12Q1", "MODIS/061/MCD12Q1"] {
            let legend = Legend::for_dataset(id).unwrap();
            assert_eq!(legend.len(), 17);
            assert_eq!(legend.class_name(1), Some("Evergreen Needleleaf Forests"));
            assert_eq!(legend.class_name(17), Some("Water Bodies"));
            assert_eq!(legend.class_name(0), None);
        }
    }

    #[test]
    fn worldcover_legend() {
        let legend = Legend::for_dataset("ESA/WorldCover/v200").unwrap();
        assert_eq!(legend.len(), 11);
        assert_eq!(legend.class_name(95), Some("Mangroves"));
        assert_eq!(legend.iter().next(), Some((10, "Tree cover")));
    }

    #[test]
    fn unknown_dataset_has_no_legend() {
        assert!(Legend::for_dataset("USGS/SRTMGL1_003").is_none());
    }
}
