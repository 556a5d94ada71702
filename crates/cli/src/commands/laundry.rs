//! `fitify laundry`: inspect and advance the wash.

use super::{describe, open_stylist};

pub async fn list() -> Result<(), Box<dyn std::error::Error>> {
    let stylist = open_stylist().await?;
    let laundry = stylist.wardrobe().laundry();

    if laundry.is_empty() {
        println!("🧺 The laundry is empty.");
        return Ok(());
    }

    println!("🧺 In the laundry ({} refreshes per wash):", laundry.threshold());
    for item in laundry.entries() {
        println!("  {}  [{}/{}]", describe(item), item.wear_count, laundry.threshold());
    }
    Ok(())
}

pub async fn tick() -> Result<(), Box<dyn std::error::Error>> {
    let mut stylist = open_stylist().await?;
    let outcome = stylist.tick_laundry().await?;

    if outcome.returned.is_empty() {
        println!("Nothing came back from the laundry yet.");
    } else {
        println!("✅ Back from the laundry:");
        for item in &outcome.returned {
            println!("  {}", describe(item));
        }
    }
    println!("   {} still washing.", stylist.wardrobe().laundry().len());
    Ok(())
}
