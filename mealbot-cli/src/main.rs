// Interactive meal dialog client
//
// Drives the dialog core over the stub collaborators: reads answers from
// stdin, routes each turn to validation or fulfillment, and plays the part
// of the external dialog manager for the slots the core delegates back.

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use mealbot::config::ServiceConfig;
use mealbot::dialog::{ConfirmationStatus, DialogAction, DialogEvent, MealDialog};
use mealbot::providers::{StaticMealSource, StubGeocoder};

#[derive(Parser, Debug)]
#[command(name = "mealbot", about = "Meal-finding dialog demo over stub collaborators")]
struct Args {
    /// Path to a TOML service configuration
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Override the configured service city
    #[arg(long)]
    city: Option<String>,

    /// Dump every dialog action as JSON before rendering it
    #[arg(long)]
    show_actions: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ServiceConfig::from_toml_str(&std::fs::read_to_string(path)?)?,
        None => ServiceConfig::default(),
    };
    if let Some(city) = args.city {
        config.city = city;
    }

    let source = Arc::new(StaticMealSource::sample());
    let dialog = MealDialog::new(
        Arc::new(StubGeocoder::new()),
        source.clone(),
        source,
        config,
    );

    let mut event = DialogEvent::new("FindMeals");
    println!("Hi! Let's find you a meal. (ctrl-d to quit)");

    loop {
        let action = if event.current_intent.slots.confirmed_flag() {
            dialog.fulfill_turn(&mut event).await?
        } else {
            dialog.validate_turn(&mut event).await?
        };

        if args.show_actions {
            println!("{}", serde_json::to_string_pretty(&action)?);
        }

        // carry the returned state into the next turn
        if let Some(attributes) = action.session_attributes() {
            event.session_attributes = attributes.clone();
        }
        if let Some(slots) = action.slots() {
            event.current_intent.slots = slots.clone();
        }

        match action {
            DialogAction::ElicitSlot {
                slot_to_elicit,
                message,
                ..
            } => {
                let reply = ask(&message)?;
                event.input_transcript = reply.clone();
                set_slot(&mut event, &slot_to_elicit, reply);
            }
            DialogAction::ButtonElicitSlot {
                slot_to_elicit,
                message,
                prompt,
                buttons,
                ..
            } => {
                println!("{}", message);
                for (index, button) in buttons.iter().enumerate() {
                    println!("  {}. {}", index + 1, button.text);
                }
                let reply = ask(&prompt)?;
                event.input_transcript = reply.clone();
                let value = match reply.parse::<usize>() {
                    Ok(n) if n >= 1 && n <= buttons.len() => buttons[n - 1].value.clone(),
                    _ => reply,
                };
                set_slot(&mut event, &slot_to_elicit, value);
            }
            DialogAction::ConfirmAddress { address, .. } => {
                let reply = ask(&format!(
                    "Looks like you are at {}. Is that right? (yes/no)",
                    address
                ))?;
                event.current_intent.confirmation_status =
                    if reply.eq_ignore_ascii_case("yes") {
                        ConfirmationStatus::Confirmed
                    } else {
                        ConfirmationStatus::Denied
                    };
            }
            DialogAction::Delegate { .. } => {
                // play the dialog manager: fill whichever slot the core is
                // waiting on, or fall through to fulfillment once confirmed
                let slots = &mut event.current_intent.slots;
                if slots.date.is_none() {
                    let reply = ask("What date? (YYYY-MM-DD)")?;
                    event.current_intent.slots.date = Some(reply);
                } else if slots.time.is_none() {
                    let reply = ask("What time? (HH:MM)")?;
                    event.input_transcript = reply.clone();
                    event.current_intent.slots.time = Some(reply);
                } else if slots.intersection.is_none() && !slots.confirmed_flag() {
                    let reply = ask("Where are you? (address, intersection, or landmark)")?;
                    event.current_intent.slots.intersection = Some(reply);
                }
            }
            DialogAction::Fail { message } | DialogAction::Fulfill { message } => {
                println!("{}", message);
                break;
            }
        }
    }

    Ok(())
}

fn ask(prompt: &str) -> Result<String> {
    println!("{}", prompt);
    print!("> ");
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        anyhow::bail!("end of input");
    }
    Ok(line.trim().to_string())
}

fn set_slot(event: &mut DialogEvent, name: &str, value: String) {
    let slots = &mut event.current_intent.slots;
    match name {
        "mealNow" => slots.meal_now = Some(value),
        "Eligibility" => slots.eligibility = Some(value),
        "Age" => slots.age = Some(value),
        "Gender" => slots.gender = Some(value),
        "Intersection" => slots.intersection = Some(value),
        "Time" => slots.time = Some(value),
        "ShowMore" => slots.show_more = Some(value),
        other => eprintln!("(no slot named {})", other),
    }
}
