//! `fitify outfit`: suggest an outfit, then refine it interactively.
//!
//! `yes` wears it, `no` asks which slot to replace (1 top, 2 bottom,
//! 3 shoes), `quit` leaves without logging anything. An outfit with empty
//! slots is only worn after an explicit "anyway"; one with no slots at all
//! cannot be worn until a swap fills something.

use std::io::Write;

use fitify_core::error::{Error, WardrobeError};
use fitify_core::outfit::{Formality, Slot};
use fitify_wardrobe::{ItemStore, ProposedOutfit, Stylist, SuggestRequest, Suggestion};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use super::{describe, open_stylist};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reply {
    Accept,
    Swap,
    Quit,
}

impl Reply {
    fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "yes" | "y" => Some(Reply::Accept),
            "no" | "n" => Some(Reply::Swap),
            "quit" | "q" | "exit" => Some(Reply::Quit),
            _ => None,
        }
    }
}

/// What the outfit on screen can be used for.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Offer {
    Ready,
    Partial(Vec<Slot>),
    Nothing,
}

impl Offer {
    fn for_outfit(outfit: Option<&ProposedOutfit>) -> Self {
        match outfit {
            Some(o) if o.is_complete() => Offer::Ready,
            Some(o) if !o.slots.is_empty() => Offer::Partial(o.missing()),
            _ => Offer::Nothing,
        }
    }

    fn question(&self) -> String {
        match self {
            Offer::Ready => "Wear this? (yes / no / quit)".to_string(),
            Offer::Partial(missing) => {
                let missing: Vec<String> = missing.iter().map(Slot::to_string).collect();
                format!(
                    "Nothing suitable for {}. Wear it anyway? (yes / no to swap / quit)",
                    missing.join(" or ")
                )
            }
            Offer::Nothing => "Nothing to wear yet. Swap a slot? (no to swap / quit)".to_string(),
        }
    }
}

fn render(outfit: &ProposedOutfit, store: &ItemStore) -> String {
    let mut out = String::new();
    if !outfit.name.is_empty() {
        out.push_str(&format!("  ✨ {}\n", outfit.name));
    }
    for (n, slot) in Slot::ALL.iter().enumerate() {
        let line = match outfit.slots.get(*slot) {
            Some(id) => store
                .get(id)
                .map(describe)
                .unwrap_or_else(|| id.to_string()),
            None => "(nothing suitable)".to_string(),
        };
        out.push_str(&format!("  {}. {:<7} {}\n", n + 1, slot.to_string(), line));
    }
    if !outfit.style_notes.is_empty() {
        out.push_str(&format!("  💬 {}\n", outfit.style_notes));
    }
    for tip in &outfit.recommendations {
        out.push_str(&format!("  • {tip}\n"));
    }
    out
}

fn print_suggestion(suggestion: &Suggestion, store: &ItemStore) {
    let w = &suggestion.weather;
    println!();
    println!(
        "  🌤️  {}: {:.0}°F, {} ({})",
        w.location, w.reading.temperature, w.reading.conditions, w.analysis.temperature_category
    );
    if !suggestion.returned_from_laundry.is_empty() {
        println!(
            "  🧺 Back from the laundry: {}",
            suggestion.returned_from_laundry.join(", ")
        );
    }
    for window in &suggestion.calendar.activities {
        println!("  🏃 Workout at {} for {}", window.time, window.duration);
    }
    println!();
    print!("{}", render(&suggestion.outfit, store));

    if let Some(athletic) = &suggestion.athletic {
        println!("\n  For the workout:");
        print!("{}", render(athletic, store));
    }
}

async fn prompt(
    lines: &mut Lines<BufReader<Stdin>>,
    question: &str,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    print!("\n  {question} > ");
    std::io::stdout().flush()?;
    Ok(lines.next_line().await?)
}

pub async fn run(
    location: Option<String>,
    formality: Option<String>,
    activity: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let formality = formality
        .map(|f| f.parse::<Formality>())
        .transpose()?;

    let mut stylist = open_stylist().await?;

    eprint!("  Picking an outfit...");
    let suggestion = stylist
        .suggest(SuggestRequest {
            location,
            formality,
            activity,
        })
        .await;
    eprint!("\r                     \r");
    let suggestion = suggestion?;
    print_suggestion(&suggestion, stylist.wardrobe().store());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let offer = Offer::for_outfit(stylist.current());
        let Some(answer) = prompt(&mut lines, &offer.question()).await? else {
            break;
        };
        match Reply::parse(&answer) {
            Some(Reply::Accept) if offer == Offer::Nothing => {
                println!("  There is nothing to wear yet. Answer no to fill a slot, or quit.");
            }
            Some(Reply::Accept) => {
                let notes = prompt(&mut lines, "Any notes? (enter to skip)")
                    .await?
                    .unwrap_or_default();
                accept(&mut stylist, notes.trim()).await?;
                return Ok(());
            }
            Some(Reply::Swap) => swap(&mut stylist, &mut lines).await?,
            Some(Reply::Quit) => break,
            None => println!("  Please answer yes, no or quit."),
        }
    }

    stylist.discard();
    println!("\n  Nothing logged. See you tomorrow! 👋\n");
    Ok(())
}

async fn swap(
    stylist: &mut Stylist,
    lines: &mut Lines<BufReader<Stdin>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(choice) = prompt(lines, "Replace which? (1 top / 2 bottom / 3 shoes)").await? else {
        return Ok(());
    };
    let slot: Slot = match choice.parse() {
        Ok(slot) => slot,
        Err(e) => {
            println!("  {e}");
            return Ok(());
        }
    };

    eprint!("  Looking for another {slot}...");
    let result = stylist.swap(slot).await;
    eprint!("\r                                  \r");

    match result {
        Ok(outcome) => {
            if !outcome.notes.is_empty() {
                println!("  💬 {}", outcome.notes);
            }
        }
        Err(Error::Wardrobe(WardrobeError::NoAlternativeFound { .. })) => {
            println!("  No other {slot} works with this outfit, keeping it.");
        }
        Err(e) => return Err(e.into()),
    }

    if let Some(outfit) = stylist.current() {
        println!();
        print!("{}", render(outfit, stylist.wardrobe().store()));
    }
    Ok(())
}

async fn accept(stylist: &mut Stylist, notes: &str) -> Result<(), Box<dyn std::error::Error>> {
    let entry = stylist.accept(notes).await?;
    let washing: Vec<&str> = entry
        .slots
        .filled()
        .filter(|(slot, _)| *slot != Slot::Shoes)
        .map(|(_, id)| id)
        .collect();
    println!("\n  ✅ Logged for {}. Enjoy your day!", entry.date);
    if !washing.is_empty() {
        println!("  🧺 Into the laundry: {}", washing.join(", "));
    }
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitify_core::item::WardrobeItem;
    use fitify_core::outfit::{OutfitContext, OutfitSlots};
    use fitify_core::weather::{WeatherReading, WeatherReport};

    fn item(id: &str, item_type: &str, color: &str) -> WardrobeItem {
        WardrobeItem {
            id: id.into(),
            item_type: item_type.into(),
            form: "cotton".into(),
            weather_tags: Default::default(),
            color: color.into(),
            notes: String::new(),
            wear_count: 0,
            image_path: String::new(),
        }
    }

    fn outfit(slots: OutfitSlots) -> ProposedOutfit {
        ProposedOutfit {
            slots,
            name: "Weekend".into(),
            style_notes: "Easy going".into(),
            recommendations: vec!["Roll the cuffs".into()],
            context: OutfitContext {
                weather: WeatherReport::new(
                    "Chicago, US",
                    WeatherReading {
                        temperature: 70.0,
                        conditions: "Clear".into(),
                        humidity: 40,
                        wind_speed: 3.0,
                    },
                ),
                formality: Formality::Casual,
                activity: "school".into(),
            },
        }
    }

    #[test]
    fn replies_are_case_insensitive() {
        assert_eq!(Reply::parse(" YES "), Some(Reply::Accept));
        assert_eq!(Reply::parse("n"), Some(Reply::Swap));
        assert_eq!(Reply::parse("Quit"), Some(Reply::Quit));
        assert_eq!(Reply::parse("maybe"), None);
    }

    #[test]
    fn render_numbers_slots_and_marks_empty_ones() {
        let store = ItemStore::new(vec![
            item("top1", "t-shirt", "navy"),
            item("bottom1", "jeans", "blue"),
        ]);
        let text = render(
            &outfit(OutfitSlots {
                top: Some("top1".into()),
                bottom: Some("bottom1".into()),
                shoes: None,
            }),
            &store,
        );

        assert!(text.contains("1. top"));
        assert!(text.contains("navy cotton t-shirt"));
        assert!(text.contains("2. bottom"));
        assert!(text.contains("3. shoes   (nothing suitable)"));
        assert!(text.contains("Roll the cuffs"));
    }

    #[test]
    fn offer_depends_on_filled_slots() {
        let full = outfit(OutfitSlots {
            top: Some("top1".into()),
            bottom: Some("bottom1".into()),
            shoes: Some("shoe1".into()),
        });
        let no_shoes = outfit(OutfitSlots {
            top: Some("top1".into()),
            bottom: Some("bottom1".into()),
            shoes: None,
        });
        let empty = outfit(OutfitSlots::default());

        assert_eq!(Offer::for_outfit(Some(&full)), Offer::Ready);
        assert_eq!(Offer::for_outfit(Some(&no_shoes)), Offer::Partial(vec![Slot::Shoes]));
        assert_eq!(Offer::for_outfit(Some(&empty)), Offer::Nothing);
        assert_eq!(Offer::for_outfit(None), Offer::Nothing);
    }

    #[test]
    fn incomplete_offers_ask_for_confirmation_or_a_swap() {
        let partial = Offer::Partial(vec![Slot::Bottom, Slot::Shoes]).question();
        assert!(partial.contains("bottom or shoes"));
        assert!(partial.contains("anyway"));

        let nothing = Offer::Nothing.question();
        assert!(!nothing.contains("yes"));
        assert!(Offer::Ready.question().starts_with("Wear this?"));
    }
}
