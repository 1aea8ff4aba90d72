//! Sort criteria and the featured-first comparator

use crate::core::vehicle::Vehicle;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// User-selectable ordering applied after the featured-first key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortOrder {
    /// Year descending
    #[default]
    YearDesc,
    /// Average rating descending, unrated last
    RatingDesc,
    PriceAsc,
    PriceDesc,
    MileageAsc,
}

impl SortOrder {
    pub const ALL: [SortOrder; 5] = [
        SortOrder::YearDesc,
        SortOrder::RatingDesc,
        SortOrder::PriceAsc,
        SortOrder::PriceDesc,
        SortOrder::MileageAsc,
    ];

    /// Wire name, e.g. `PRICE_ASC`
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::YearDesc => "YEAR_DESC",
            SortOrder::RatingDesc => "RATING_DESC",
            SortOrder::PriceAsc => "PRICE_ASC",
            SortOrder::PriceDesc => "PRICE_DESC",
            SortOrder::MileageAsc => "MILEAGE_ASC",
        }
    }

    /// Label shown in the sort selector
    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::YearDesc => "Newest First",
            SortOrder::RatingDesc => "Rating: High to Low",
            SortOrder::PriceAsc => "Price: Low to High",
            SortOrder::PriceDesc => "Price: High to Low",
            SortOrder::MileageAsc => "Mileage: Low to High",
        }
    }

    /// Parse a wire name, falling back to [`SortOrder::YearDesc`]
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }

    /// Featured listings first, then this criterion
    pub fn compare(&self, a: &Vehicle, b: &Vehicle) -> Ordering {
        b.is_featured
            .cmp(&a.is_featured)
            .then_with(|| self.compare_key(a, b))
    }

    fn compare_key(&self, a: &Vehicle, b: &Vehicle) -> Ordering {
        match self {
            SortOrder::YearDesc => b.year.cmp(&a.year),
            SortOrder::RatingDesc => rating_key(b).total_cmp(&rating_key(a)),
            SortOrder::PriceAsc => a.price.cmp(&b.price),
            SortOrder::PriceDesc => b.price.cmp(&a.price),
            SortOrder::MileageAsc => a.mileage.cmp(&b.mileage),
        }
    }
}

fn rating_key(vehicle: &Vehicle) -> f64 {
    vehicle.effective_rating().max(0.0)
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|o| o.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| format!("unknown sort order: {}", s))
    }
}

/// Sort in place; ties keep their input order
pub fn sort_vehicles<V: Borrow<Vehicle>>(vehicles: &mut [V], order: SortOrder) {
    vehicles.sort_by(|a, b| order.compare(a.borrow(), b.borrow()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vehicle::VehicleCategory;

    fn car(id: u64, year: u16, price: u64) -> Vehicle {
        Vehicle::new(id, VehicleCategory::FourWheeler, "Tata", "Nexon", year, price)
    }

    fn ids(vehicles: &[Vehicle]) -> Vec<u64> {
        vehicles.iter().map(|v| v.id).collect()
    }

    #[test]
    fn test_year_desc_default() {
        let mut list = vec![car(1, 2019, 1), car(2, 2023, 1), car(3, 2021, 1)];
        sort_vehicles(&mut list, SortOrder::default());
        assert_eq!(ids(&list), vec![2, 3, 1]);
    }

    #[test]
    fn test_featured_first_for_every_order() {
        for order in SortOrder::ALL {
            let mut list = vec![
                car(1, 2024, 100).with_mileage(10).with_rating(5.0, 3),
                car(2, 2010, 900_000).with_mileage(99_000).featured(),
            ];
            sort_vehicles(&mut list, order);
            assert_eq!(list[0].id, 2, "featured listing must lead under {}", order);
        }
    }

    #[test]
    fn test_stable_on_ties_for_every_order() {
        for order in SortOrder::ALL {
            let mut list: Vec<Vehicle> = (1..=6)
                .map(|id| car(id, 2020, 500_000).with_mileage(1_000).with_rating(4.0, 1))
                .collect();
            sort_vehicles(&mut list, order);
            assert_eq!(ids(&list), vec![1, 2, 3, 4, 5, 6], "unstable under {}", order);
        }
    }

    #[test]
    fn test_rating_desc_puts_unrated_last() {
        let mut list = vec![
            car(1, 2020, 1),
            car(2, 2020, 1).with_rating(3.5, 2),
            car(3, 2020, 1).with_rating(0.0, 0),
            car(4, 2020, 1).with_rating(4.8, 9),
        ];
        sort_vehicles(&mut list, SortOrder::RatingDesc);
        assert_eq!(ids(&list), vec![4, 2, 1, 3]);
    }

    #[test]
    fn test_price_and_mileage_orders() {
        let mut list = vec![
            car(1, 2020, 300).with_mileage(5),
            car(2, 2020, 100).with_mileage(50),
            car(3, 2020, 200).with_mileage(1),
        ];

        sort_vehicles(&mut list, SortOrder::PriceAsc);
        assert_eq!(ids(&list), vec![2, 3, 1]);

        sort_vehicles(&mut list, SortOrder::PriceDesc);
        assert_eq!(ids(&list), vec![1, 3, 2]);

        sort_vehicles(&mut list, SortOrder::MileageAsc);
        assert_eq!(ids(&list), vec![3, 1, 2]);
    }

    #[test]
    fn test_parse_wire_names() {
        assert_eq!("PRICE_ASC".parse::<SortOrder>().unwrap(), SortOrder::PriceAsc);
        assert_eq!("mileage_asc".parse::<SortOrder>().unwrap(), SortOrder::MileageAsc);
        assert_eq!(SortOrder::parse_lenient("custom_sort_order"), SortOrder::YearDesc);
        assert_eq!(
            serde_json::to_string(&SortOrder::RatingDesc).unwrap(),
            "\"RATING_DESC\""
        );
    }
}
