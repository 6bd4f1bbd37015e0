//! Seed marketplace data for demos and tests.
//!
//! Mirrors the listings and manifest history a fresh client install shows
//! before the user has posted anything.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::error::{Result, SymbiosisError};
use crate::ledger::Ledger;
use crate::types::{Direction, Listing, Material, ManifestStatus, MaterialCategory, Unit};

/// Business id the demo acts as
pub const HOME_COMPANY: &str = "My Company";

fn date(year: i32, month: u32, day: u32) -> Result<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .ok_or_else(|| SymbiosisError::InvalidInput(format!("invalid date {year}-{month}-{day}")))
}

#[allow(clippy::too_many_arguments)]
fn listing(
    id: &str,
    owner: &str,
    company: &str,
    direction: Direction,
    category: MaterialCategory,
    quantity: i64,
    unit: Unit,
    price: i64,
    location: &str,
    description: &str,
    posted: DateTime<Utc>,
) -> Result<Listing> {
    Ok(Listing::new(
        id,
        owner,
        direction,
        Material::Known(category),
        Decimal::from(quantity),
        unit,
        location,
        posted,
    )?
    .with_company_name(company)
    .with_price_per_unit(Decimal::from(price))
    .with_description(description))
}

/// The four seed listings
pub fn listings() -> Result<Vec<Listing>> {
    Ok(vec![
        listing(
            "l1",
            "u2",
            "Alpha Textiles",
            Direction::Offer,
            MaterialCategory::Textile,
            500,
            Unit::Kg,
            20,
            "Panipat, Haryana",
            "Cotton scraps from denim production.",
            date(2023, 10, 25)?,
        )?,
        listing(
            "l2",
            "u3",
            "EcoPack Solutions",
            Direction::Request,
            MaterialCategory::Plastic,
            2,
            Unit::Tons,
            45,
            "Gurugram, Haryana",
            "Need LDPE plastic for recycling plant.",
            date(2023, 10, 26)?,
        )?,
        listing(
            "l3",
            "u4",
            "Green Earth Compost",
            Direction::Request,
            MaterialCategory::Organic,
            1000,
            Unit::Kg,
            5,
            "Noida, UP",
            "Looking for vegetable market waste.",
            date(2023, 10, 27)?,
        )?,
        listing(
            "l4",
            "u5",
            "MetalWorks Ind",
            Direction::Offer,
            MaterialCategory::Metal,
            300,
            Unit::Kg,
            150,
            "Manesar, Haryana",
            "Aluminum shavings from lathe operations.",
            date(2023, 10, 28)?,
        )?,
    ])
}

/// A request `party` posts when it has none open: scrap metal for its
/// Gurugram plant
pub fn request_for(party: &str) -> Result<Listing> {
    listing(
        &format!("{party}-request"),
        party,
        party,
        Direction::Request,
        MaterialCategory::Metal,
        300,
        Unit::Kg,
        150,
        "Gurugram, Haryana",
        "Aluminum or steel offcuts for casting.",
        date(2023, 10, 30)?,
    )
}

/// Replay the seed manifest history into `ledger`
///
/// Settled manifests are driven through the real lifecycle, so their carbon
/// figures come from the ledger's estimator.
pub fn seed_manifests(ledger: &mut Ledger) -> Result<()> {
    let history = [
        ("Plastic Scraps", "200 kg", HOME_COMPANY, "RecyclePro Inc", date(2023, 10, 15)?, ManifestStatus::Verified),
        ("Cardboard Waste", "500 kg", HOME_COMPANY, "Paper Mill Ltd", date(2023, 10, 20)?, ManifestStatus::Completed),
        ("Organic Sludge", "1 ton", "FoodCo", HOME_COMPANY, date(2023, 10, 29)?, ManifestStatus::InTransit),
    ];

    for (material, quantity, source, destination, created, status) in history {
        let manifest = ledger.create_at(source, destination, material, quantity, created);
        let mut current = manifest.status;
        while current != status {
            let Some(next) = current.next() else { break };
            ledger.transition(&manifest.id, destination, next)?;
            current = next;
        }
    }
    Ok(())
}
