//! Terminal front-end for the picker session
//!
//! Drives a [`hexwheel::Session`] from stdin commands: type hex digits to
//! build a color, pick from the wheel by coordinate, save favorites, and
//! inspect the enriched color-space data.

use hexwheel::{FavoriteStore, HexColor, LookupClient, PreferenceStore, Session};
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

const WHEEL_DIAMETER: u32 = 256;

#[tokio::main]
async fn main() -> hexwheel::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
        .init();

    let favorites = FavoriteStore::open("hexwheel.db").await?;
    let prefs = PreferenceStore::new("hexwheel-prefs.json");
    let lookup = LookupClient::new()?;
    let mut session = Session::new(favorites, prefs, lookup).await?;

    print_help();
    print_state(&session);

    let stdin = io::stdin();
    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        let line = line.trim();
        let mut parts = line.split_whitespace();

        match parts.next() {
            None => continue,
            Some("quit") | Some("q") => break,
            Some("help") | Some("h") => print_help(),
            Some("back") => session.backspace(),
            Some("clear") => session.clear_input(),
            Some("random") => session.random_color(),
            Some("fav") => session.toggle_favorite(),
            Some("unfav") => match parts.next().map(HexColor::parse) {
                Some(Ok(color)) => session.remove_favorite(color),
                _ => eprintln!("Usage: unfav <RRGGBB>"),
            },
            Some("pick") => {
                let x = parts.next().and_then(|v| v.parse::<f32>().ok());
                let y = parts.next().and_then(|v| v.parse::<f32>().ok());
                match (x, y) {
                    (Some(x), Some(y)) => {
                        session.begin_picking();
                        match session.wheel_sample(WHEEL_DIAMETER, x, y) {
                            Some(color) => println!("picked #{color}"),
                            None => println!("no color at ({x}, {y}); selection unchanged"),
                        }
                        session.end_picking();
                    }
                    _ => eprintln!("Usage: pick <x> <y>  (wheel is {0}x{0})", WHEEL_DIAMETER),
                }
            }
            Some("history") => {
                for color in session.state().history {
                    println!("#{color}");
                }
            }
            Some("list") => {
                session.flush().await;
                for favorite in session.state().favorites {
                    println!("#{} saved {}", favorite.hex, favorite.created_at.to_rfc3339());
                }
            }
            Some("info") => {
                // Wait out the in-flight lookup before printing
                session.flush().await;
                match session.details() {
                    Some(details) => match serde_json::to_string_pretty(details) {
                        Ok(json) => println!("{json}"),
                        Err(e) => eprintln!("Error serializing details: {e}"),
                    },
                    None => println!("no enrichment data for #{}", session.background()),
                }
            }
            Some(word) if word.chars().all(|c| c.is_ascii_hexdigit()) => {
                for digit in word.chars() {
                    session.push_digit(digit);
                }
            }
            Some(word) => {
                eprintln!("Unknown command: {word}");
                eprintln!("Use help for usage information");
            }
        }

        session.drain_updates();
        print_state(&session);
    }

    session.flush().await;
    Ok(())
}

fn print_state(session: &Session) {
    let state = session.state();
    println!(
        "#{:<6}  background #{}  text #{}  history {}  favorites {}",
        state.input,
        state.background,
        session.contrast_color(),
        state.history.len(),
        state.favorites.len(),
    );
}

fn print_help() {
    eprintln!("Commands:");
    eprintln!("  <hex digits>   append digits; the sixth commits the color");
    eprintln!("  back           delete the last digit");
    eprintln!("  clear          clear the input");
    eprintln!("  random         pick a random color");
    eprintln!("  pick <x> <y>   sample the color wheel at a position");
    eprintln!("  fav            save or unsave the current color");
    eprintln!("  unfav <hex>    delete a saved color");
    eprintln!("  list           show saved colors (hue order)");
    eprintln!("  history        show recent colors (newest first)");
    eprintln!("  info           show fetched color-space data");
    eprintln!("  quit           exit");
}
