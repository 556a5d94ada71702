pub mod gateway;
pub mod history;
pub mod items;
pub mod laundry;
pub mod onboard;
pub mod outfit;
pub mod status;

use fitify_config::AppConfig;
use fitify_core::item::WardrobeItem;
use fitify_wardrobe::Stylist;

pub fn load_config() -> Result<AppConfig, Box<dyn std::error::Error>> {
    Ok(AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?)
}

/// Load config and open the wardrobe with every configured collaborator.
pub async fn open_stylist() -> Result<Stylist, Box<dyn std::error::Error>> {
    let config = load_config()?;
    Ok(fitify_gateway::build_stylist(&config).await?)
}

/// One-line description, e.g. `top1  navy cotton t-shirt`.
pub fn describe(item: &WardrobeItem) -> String {
    let words: Vec<&str> = [item.color.as_str(), item.form.as_str(), item.item_type.as_str()]
        .into_iter()
        .filter(|w| !w.is_empty())
        .collect();
    format!("{:<10} {}", item.id, words.join(" "))
}
