//! `fitify items`: wardrobe item management.

use std::path::Path;

use fitify_core::item::{Category, NewItem};
use fitify_core::oracle::ImageUpload;

use super::{describe, open_stylist};

pub async fn list() -> Result<(), Box<dyn std::error::Error>> {
    let stylist = open_stylist().await?;
    let store = stylist.wardrobe().store();

    if store.is_empty() {
        println!("No items yet. Add one with `fitify items add --type t-shirt`.");
        return Ok(());
    }

    for category in Category::ALL {
        let items = store.by_category(category);
        if items.is_empty() {
            continue;
        }
        println!("{}s ({}):", category, items.len());
        for item in items {
            println!("  {}", describe(item));
        }
    }

    let washing = stylist.wardrobe().laundry().len();
    if washing > 0 {
        println!("\n{washing} more in the laundry (`fitify laundry list`).");
    }
    Ok(())
}

pub async fn add(
    item_type: String,
    form: String,
    color: String,
    weather: Vec<String>,
    notes: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut stylist = open_stylist().await?;
    let item = stylist
        .add_item(NewItem {
            item_type,
            form,
            weather_tags: weather.into_iter().collect(),
            color,
            notes,
            image_path: String::new(),
        })
        .await?;

    println!("✅ Added {}", describe(&item));
    Ok(())
}

pub async fn remove(id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut stylist = open_stylist().await?;
    let item = stylist.remove_item(id).await?;
    println!("🗑️  Removed {}", describe(&item));
    Ok(())
}

pub async fn identify(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("photo.png")
        .to_string();

    let mut stylist = open_stylist().await?;
    eprint!("  Looking at the photo...");
    let result = stylist.identify_and_add(ImageUpload::new(bytes, file_name)).await;
    eprint!("\r                          \r");

    let item = result?;
    println!("✅ Added {}", describe(&item));
    if !item.image_path.is_empty() {
        println!("   Photo saved to {}", item.image_path);
    }
    Ok(())
}
