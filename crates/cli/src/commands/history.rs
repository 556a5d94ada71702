//! `fitify history`: accepted outfits, newest first.

use fitify_core::outfit::Slot;

use super::open_stylist;

pub async fn run(limit: usize) -> Result<(), Box<dyn std::error::Error>> {
    let stylist = open_stylist().await?;
    let entries = stylist.history(Some(limit));

    if entries.is_empty() {
        println!("No outfits logged yet. Run `fitify outfit` to pick one.");
        return Ok(());
    }

    for entry in entries {
        let slots: Vec<String> = Slot::ALL
            .iter()
            .map(|s| format!("{s}: {}", entry.slots.get(*s).unwrap_or("-")))
            .collect();
        println!("📅 {}  {} ({})", entry.date, entry.activity, entry.formality);
        println!("   {}", slots.join("  "));
        if let Some(weather) = &entry.weather {
            println!("   {:.0}°F, {}", weather.temperature, weather.conditions);
        }
        if !entry.notes.is_empty() {
            println!("   📝 {}", entry.notes);
        }
    }
    Ok(())
}
