//! `fitify status`: configuration summary and wardrobe counts.

use fitify_config::AppConfig;
use fitify_core::item::Category;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config()?;
    let stylist = fitify_gateway::build_stylist(&config).await?;
    let wardrobe = stylist.wardrobe();

    println!("👕 Fitify Status");
    println!("================");
    println!("  Config dir:   {}", AppConfig::config_dir().display());
    println!("  Data dir:     {}", config.data_dir().display());
    println!("  Oracle:       {} ({})", config.oracle.provider, config.oracle.text_model);
    println!("  API key:      {}", if config.has_api_key() { "set" } else { "missing" });
    println!("  Weather:      {} ({})", config.weather.provider, config.weather.default_location);
    println!("  Calendar:     {}", if config.calendar.enabled { "enabled" } else { "disabled" });
    println!("  Laundry:      {} refreshes per wash", wardrobe.laundry().threshold());
    println!("  Gateway:      {}:{}", config.gateway.host, config.gateway.port);

    println!();
    for category in Category::ALL {
        println!(
            "  {:<12}  {}",
            format!("{category}s:"),
            wardrobe.store().by_category(category).len()
        );
    }
    println!("  In laundry:    {}", wardrobe.laundry().len());
    println!("  Outfits worn:  {}", wardrobe.history().len());

    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        println!("\n  ✅ Config file found");
    } else {
        println!("\n  ⚠️  No config file, run `fitify onboard` first");
    }

    Ok(())
}
