//! `fitify onboard`: first-time setup.

use fitify_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = AppConfig::config_dir();
    let config_path = config_dir.join("config.toml");
    let config = AppConfig::default();

    println!("👕 Fitify: First-Time Setup");
    println!("===========================\n");

    for (label, dir) in [
        ("config", config_dir.clone()),
        ("data", config.data_dir()),
        ("photo", config.image_dir()),
    ] {
        if dir.exists() {
            println!("  {label} directory exists: {}", dir.display());
        } else {
            std::fs::create_dir_all(&dir)?;
            println!("✅ Created {label} directory: {}", dir.display());
        }
    }

    if config_path.exists() {
        println!("\n⚠️  Config already exists at: {}", config_path.display());
        println!("   Edit it manually or delete and re-run onboard.\n");
    } else {
        std::fs::write(&config_path, AppConfig::default_toml())?;
        println!("✅ Created config.toml at: {}", config_path.display());
        println!("\n📝 Next steps:");
        println!("   1. Set MISTRAL_API_KEY and FITIFY_WEATHER_API_KEY (or edit the config)");
        println!("   2. Add clothes: fitify items add --type t-shirt --color navy");
        println!("   3. Run: fitify outfit\n");
    }

    println!("🎉 Setup complete!\n");
    Ok(())
}
