//! Bundled reference dataset
//!
//! Daily recommended intakes follow the D-A-CH reference values; upper
//! limits follow the EFSA/IOM tolerable upper intake levels. Where no upper
//! limit is established (or the established one applies to supplements only
//! and sits below the recommendation), none is recorded.
//!
//! Column order for every row: male, female, then the child brackets from
//! [`CHILD_BRACKETS`] youngest first.

use super::band::{Band, CHILD_BRACKETS};
use super::table::{ReferenceDocument, ReferenceEntry};
use crate::models::NutrientKind;

/// Version tag of the bundled dataset
pub const BUNDLED_VERSION: &str = "dach-efsa-2024.1";

const COLUMNS: usize = 2 + CHILD_BRACKETS.len();

struct Row {
    nutrient: NutrientKind,
    recommended: [f64; COLUMNS],
    upper: [Option<f64>; COLUMNS],
}

const NO_UPPER: [Option<f64>; COLUMNS] = [None; COLUMNS];

#[rustfmt::skip]
const ROWS: [Row; 17] = [
    Row {
        nutrient: NutrientKind::VitaminA,
        recommended: [850.0, 700.0, 400.0, 300.0, 350.0, 450.0, 600.0, 800.0, 800.0],
        upper: [Some(3000.0), Some(3000.0), Some(600.0), Some(800.0), Some(1100.0), Some(1500.0), Some(1700.0), Some(2000.0), Some(2600.0)],
    },
    Row {
        nutrient: NutrientKind::VitaminB1,
        recommended: [1.2, 1.0, 0.2, 0.6, 0.7, 0.9, 1.0, 1.2, 1.3],
        upper: NO_UPPER,
    },
    Row {
        nutrient: NutrientKind::VitaminB2,
        recommended: [1.4, 1.1, 0.4, 0.7, 0.8, 1.0, 1.1, 1.3, 1.4],
        upper: NO_UPPER,
    },
    Row {
        nutrient: NutrientKind::Niacin,
        recommended: [15.0, 12.0, 2.0, 8.0, 9.0, 11.0, 13.0, 15.0, 16.0],
        upper: [Some(35.0), Some(35.0), None, Some(10.0), Some(15.0), Some(20.0), Some(20.0), Some(30.0), Some(30.0)],
    },
    Row {
        nutrient: NutrientKind::VitaminB6,
        recommended: [1.6, 1.4, 0.3, 0.6, 0.7, 1.0, 1.2, 1.4, 1.6],
        upper: [Some(25.0), Some(25.0), None, Some(5.0), Some(7.0), Some(10.0), Some(12.0), Some(15.0), Some(20.0)],
    },
    Row {
        nutrient: NutrientKind::Folate,
        recommended: [300.0, 300.0, 80.0, 120.0, 140.0, 180.0, 240.0, 300.0, 300.0],
        upper: [Some(1000.0), Some(1000.0), None, Some(200.0), Some(300.0), Some(400.0), Some(600.0), Some(800.0), Some(800.0)],
    },
    Row {
        nutrient: NutrientKind::VitaminB12,
        recommended: [4.0, 4.0, 0.8, 1.5, 2.0, 2.5, 3.5, 4.0, 4.0],
        upper: NO_UPPER,
    },
    Row {
        nutrient: NutrientKind::VitaminC,
        recommended: [110.0, 95.0, 20.0, 20.0, 30.0, 45.0, 65.0, 85.0, 105.0],
        upper: [Some(2000.0), Some(2000.0), None, Some(400.0), Some(650.0), Some(650.0), Some(1200.0), Some(1200.0), Some(1800.0)],
    },
    Row {
        nutrient: NutrientKind::VitaminD,
        recommended: [20.0, 20.0, 10.0, 20.0, 20.0, 20.0, 20.0, 20.0, 20.0],
        upper: [Some(100.0), Some(100.0), Some(25.0), Some(50.0), Some(50.0), Some(50.0), Some(100.0), Some(100.0), Some(100.0)],
    },
    Row {
        nutrient: NutrientKind::VitaminE,
        recommended: [14.0, 12.0, 4.0, 6.0, 8.0, 9.0, 11.0, 14.0, 15.0],
        upper: [Some(300.0), Some(300.0), None, Some(100.0), Some(120.0), Some(160.0), Some(220.0), Some(260.0), Some(260.0)],
    },
    Row {
        nutrient: NutrientKind::VitaminK,
        recommended: [70.0, 60.0, 10.0, 15.0, 20.0, 30.0, 40.0, 50.0, 70.0],
        upper: NO_UPPER,
    },
    Row {
        nutrient: NutrientKind::Calcium,
        recommended: [1000.0, 1000.0, 330.0, 600.0, 750.0, 900.0, 1100.0, 1200.0, 1200.0],
        upper: [Some(2500.0), Some(2500.0), Some(1500.0), Some(2500.0), Some(2500.0), Some(2500.0), Some(3000.0), Some(3000.0), Some(3000.0)],
    },
    Row {
        nutrient: NutrientKind::Magnesium,
        recommended: [350.0, 300.0, 60.0, 170.0, 230.0, 230.0, 250.0, 310.0, 350.0],
        upper: NO_UPPER,
    },
    Row {
        nutrient: NutrientKind::Iron,
        recommended: [10.0, 15.0, 8.0, 8.0, 8.0, 10.0, 12.0, 15.0, 15.0],
        upper: [Some(45.0), Some(45.0), Some(40.0), Some(40.0), Some(40.0), Some(40.0), Some(40.0), Some(45.0), Some(45.0)],
    },
    Row {
        nutrient: NutrientKind::Zinc,
        recommended: [14.0, 8.0, 2.5, 3.0, 4.0, 6.0, 8.0, 11.0, 12.0],
        upper: [Some(25.0), Some(25.0), None, Some(7.0), Some(10.0), Some(13.0), Some(18.0), Some(22.0), Some(25.0)],
    },
    Row {
        nutrient: NutrientKind::Iodine,
        recommended: [200.0, 200.0, 80.0, 100.0, 120.0, 140.0, 180.0, 200.0, 200.0],
        upper: [Some(600.0), Some(600.0), None, Some(200.0), Some(250.0), Some(300.0), Some(450.0), Some(450.0), Some(500.0)],
    },
    Row {
        nutrient: NutrientKind::Selenium,
        recommended: [70.0, 60.0, 15.0, 15.0, 20.0, 30.0, 45.0, 60.0, 70.0],
        upper: [Some(300.0), Some(300.0), Some(45.0), Some(60.0), Some(90.0), Some(130.0), Some(200.0), Some(250.0), Some(300.0)],
    },
];

fn column_bands() -> [Band; COLUMNS] {
    let mut bands = [Band::Male; COLUMNS];
    bands[1] = Band::Female;
    for (i, bracket) in CHILD_BRACKETS.iter().enumerate() {
        bands[i + 2] = Band::Child(*bracket);
    }
    bands
}

pub(super) fn bundled_document() -> ReferenceDocument {
    let bands = column_bands();
    let entries = ROWS
        .iter()
        .flat_map(|row| {
            bands.iter().enumerate().map(move |(i, &band)| ReferenceEntry {
                nutrient: row.nutrient,
                band,
                recommended_amount: row.recommended[i],
                upper_limit: row.upper[i],
            })
        })
        .collect();

    ReferenceDocument {
        version: BUNDLED_VERSION.to_string(),
        child_brackets: CHILD_BRACKETS.to_vec(),
        entries,
    }
}
