//! Shared fixtures for integration tests

#![allow(dead_code)]

use catalog::prelude::*;

const FOUR_WHEELER_MAKES: [(&str, &str); 4] = [
    ("Tata", "Nexon"),
    ("Hyundai", "Creta"),
    ("Maruti Suzuki", "Baleno"),
    ("Mahindra", "XUV300"),
];

const TWO_WHEELER_MAKES: [(&str, &str); 3] = [
    ("Honda", "Activa 6G"),
    ("TVS", "Raider"),
    ("Royal Enfield", "Classic 350"),
];

/// Twenty published listings, three of them featured
///
/// - ids 1..=12: four-wheelers priced 500000..=1500000
/// - id 13: four-wheeler above the range, id 14 below it
/// - ids 15..=20: two-wheelers
/// - featured: 3 and 8 (four-wheelers in range) and 16 (two-wheeler)
///
/// Years repeat every eight listings so several sort keys tie.
pub fn fleet() -> Vec<Vehicle> {
    let mut vehicles = Vec::with_capacity(20);

    for id in 1..=14u64 {
        let (make, model) = FOUR_WHEELER_MAKES[(id as usize - 1) % FOUR_WHEELER_MAKES.len()];
        let price = match id {
            12 => 1_500_000,
            13 => 2_000_000,
            14 => 450_000,
            _ => 500_000 + (id - 1) * 90_000,
        };
        let features: &[&str] = match id % 3 {
            0 => &["Sunroof", "ABS"],
            1 => &["ABS"],
            _ => &["Sunroof", "ABS", "ADAS"],
        };
        vehicles.push(
            Vehicle::new(id, VehicleCategory::FourWheeler, make, model, year_for(id), price)
                .with_mileage(60_000 - id * 3_000)
                .with_color(if id % 2 == 0 { "White" } else { "Grey" })
                .with_features(features.iter().copied())
                .with_rating(3.0 + (id % 5) as f64 * 0.4, id as u32),
        );
    }

    for id in 15..=20u64 {
        let (make, model) = TWO_WHEELER_MAKES[(id as usize - 15) % TWO_WHEELER_MAKES.len()];
        vehicles.push(
            Vehicle::new(
                id,
                VehicleCategory::TwoWheeler,
                make,
                model,
                year_for(id),
                60_000 + (id - 15) * 25_000,
            )
            .with_mileage(id * 500)
            .with_color("Black"),
        );
    }

    for featured in [3, 8, 16] {
        if let Some(v) = vehicles.iter_mut().find(|v| v.id == featured) {
            v.is_featured = true;
        }
    }

    vehicles
}

fn year_for(id: u64) -> u16 {
    2016 + (id % 8) as u16
}

pub fn ids<'a>(vehicles: impl IntoIterator<Item = &'a Vehicle>) -> Vec<u64> {
    vehicles.into_iter().map(|v| v.id).collect()
}

/// Free-text parser that always answers with the same filter
pub fn fixed_parser(filter: ParsedFilter) -> impl FreeTextParser {
    FnParser(move |_: &str, _: &CatalogDomain| -> std::result::Result<ParsedFilter, ParseError> {
        Ok(filter.clone())
    })
}

/// Free-text parser that always fails
pub fn failing_parser() -> impl FreeTextParser {
    FnParser(|_: &str, _: &CatalogDomain| -> std::result::Result<ParsedFilter, ParseError> {
        Err(ParseError::Rejected {
            status: 500,
            message: "AI Error".to_string(),
        })
    })
}
