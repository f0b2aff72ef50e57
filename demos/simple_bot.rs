//! Simple chat bot example
//!
//! Connects to a channel, logs every chat message, and answers `!hello`.
//! Credentials come from the environment:
//!
//! ```text
//! TWITCH_USERNAME=mybot TWITCH_TOKEN=oauth:... TWITCH_CHANNEL=somechannel \
//!     cargo run --example simple_bot
//! ```

use std::env;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use twirc::TwitchClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let username = env::var("TWITCH_USERNAME").context("TWITCH_USERNAME not set")?;
    let token = env::var("TWITCH_TOKEN").context("TWITCH_TOKEN not set")?;
    let channel = env::var("TWITCH_CHANNEL").context("TWITCH_CHANNEL not set")?;

    let client = Arc::new(TwitchClient::new());
    client.configure(&username, &token, &channel);

    client.on_connect(|| println!("✓ connected"));
    client.on_error(|e| eprintln!("error: {e}"));
    client.on_disconnect(|err| match err {
        Some(e) => eprintln!("connection lost: {e}"),
        None => println!("disconnected"),
    });

    let responder = Arc::clone(&client);
    client.on_message(move |msg| {
        let badge = if msg.author.is_moderator() { "[mod] " } else { "" };
        println!("{badge}<{}> {}", msg.author.display_name, msg.content);

        for emote in &msg.emotes {
            println!("  emote {} at {}..={}  {}", emote.id, emote.start_index, emote.end_index, emote.url());
        }

        if msg.content.starts_with("!hello") {
            responder.send_chat_message(format!("Hello, {}!", msg.author.display_name));
        }
    });

    client.connect().await;

    // The client runs on background tasks; keep the process alive until
    // interrupted.
    tokio::signal::ctrl_c().await?;
    client.disconnect();
    tokio::time::sleep(Duration::from_millis(100)).await;
    Ok(())
}
