//! Catalog Server Example
//!
//! Serves a seeded in-memory catalog, or the listing source named in a YAML
//! config file passed as the first argument:
//!
//! ```text
//! cargo run --example catalog_server
//! cargo run --example catalog_server --features remote -- catalog.yaml
//! ```
//!
//! Without an AI proxy, free-text search uses a small keyword parser so the
//! `/search` route can be tried offline.

use catalog::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,catalog=debug")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => CatalogConfig::from_yaml_file(&path)?,
        None => CatalogConfig::default(),
    };

    let remote = cfg!(feature = "remote");
    let mut builder = ServerBuilder::from_config(config.clone())?;
    if config.listings_file.is_none() && (config.listings_url.is_none() || !remote) {
        builder = builder.with_repository(InMemoryListingRepository::with_vehicles(seed_vehicles())?);
    }
    if config.ai_proxy_url.is_none() || !remote {
        builder = builder.with_parser(FnParser(keyword_parser));
    }

    println!("\n🌐 Catalog running on http://{}", config.listen_addr);
    println!("\n  GET    /vehicles?category=Four%20Wheeler&max_price=1500000&sort=PRICE_ASC");
    println!("  GET    /vehicles/facets");
    println!("  POST   /search   {{\"query\": \"tata under 10 lakh with sunroof\"}}");
    println!("  GET    /health\n");

    builder.serve_configured().await
}

/// Offline stand-in for the AI proxy: picks out known makes and features and
/// reads "under N lakh" as a price ceiling.
fn keyword_parser(query: &str, domain: &CatalogDomain) -> Result<ParsedFilter, ParseError> {
    let lowered = query.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();

    let make = domain
        .makes()
        .find(|make| words.contains(&make.to_lowercase().as_str()))
        .map(str::to_string);
    let features = domain
        .features
        .iter()
        .filter(|feature| lowered.contains(&feature.to_lowercase()))
        .cloned()
        .collect();
    let max_price = words
        .windows(3)
        .find(|w| w[0] == "under" && w[2].starts_with("lakh"))
        .and_then(|w| w[1].parse::<f64>().ok())
        .map(|lakh| lakh * 100_000.0);

    let parsed = ParsedFilter {
        make,
        max_price,
        features,
        ..Default::default()
    };
    if parsed.is_empty() {
        return Err(ParseError::InvalidResponse(format!("nothing recognised in '{}'", query)));
    }
    Ok(parsed)
}

fn seed_vehicles() -> Vec<Vehicle> {
    use VehicleCategory::{FourWheeler, TwoWheeler};

    vec![
        Vehicle::new(1, FourWheeler, "Tata", "Nexon", 2023, 950_000)
            .with_variant("XZ+")
            .with_mileage(12_000)
            .with_color("White")
            .with_features(["Sunroof", "ABS", "Touchscreen"])
            .with_rating(4.5, 32)
            .featured(),
        Vehicle::new(2, FourWheeler, "Tata", "Harrier", 2022, 1_850_000)
            .with_variant("XZA")
            .with_mileage(28_000)
            .with_color("Grey")
            .with_features(["Sunroof", "ABS", "ADAS"])
            .with_rating(4.3, 18),
        Vehicle::new(3, FourWheeler, "Hyundai", "Creta", 2021, 1_250_000)
            .with_variant("SX(O)")
            .with_mileage(35_000)
            .with_color("White")
            .with_features(["Sunroof", "ABS", "Cruise Control"])
            .with_rating(4.6, 51)
            .featured(),
        Vehicle::new(4, FourWheeler, "Maruti Suzuki", "Swift", 2020, 550_000)
            .with_variant("VXi")
            .with_mileage(42_000)
            .with_color("Red")
            .with_features(["ABS"]),
        Vehicle::new(5, FourWheeler, "Mahindra", "XUV700", 2023, 2_150_000)
            .with_variant("AX7")
            .with_mileage(9_000)
            .with_color("Black")
            .with_features(["Sunroof", "ADAS", "Cruise Control"])
            .with_rating(4.8, 64),
        Vehicle::new(6, TwoWheeler, "Royal Enfield", "Classic 350", 2022, 185_000)
            .with_mileage(8_500)
            .with_color("Black")
            .with_features(["ABS"])
            .with_rating(4.4, 77),
        Vehicle::new(7, TwoWheeler, "TVS", "Raider", 2023, 95_000)
            .with_mileage(3_200)
            .with_color("Blue")
            .featured(),
        Vehicle::new(8, TwoWheeler, "Honda", "Activa 6G", 2021, 68_000)
            .with_mileage(14_000)
            .with_color("Grey"),
    ]
}
