// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Zoltar CLI
//!
//! Headless front-end for the fortune session:
//! - `zoltar onboard <name> [birthday MM/DD/YYYY] [--astrology] [--announce]`
//! - `zoltar fortune` (default)
//! - `zoltar history`

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use zoltar::{
    config::Config,
    services::{NoopNarrator, NoopScheduler},
    store::SecureStore,
    ZoltarSession,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(store = %config.store_path.display(), "Starting Zoltar");

    let store = SecureStore::open(&config.store_path, &config.store_key);
    let session = ZoltarSession::new(
        config,
        store,
        Arc::new(NoopScheduler),
        Arc::new(NoopNarrator),
    );

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("onboard") => onboard(&session, &args[1..]).await?,
        Some("history") => history(&session).await?,
        Some("fortune") | None => fortune(&session).await?,
        Some(other) => {
            eprintln!("Unknown command: {}", other);
            eprintln!("Usage: zoltar [onboard <name> [birthday] [--astrology] [--announce] | fortune | history]");
            std::process::exit(2);
        }
    }

    Ok(())
}

async fn onboard(session: &ZoltarSession, args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let name = args
        .iter()
        .find(|a| !a.starts_with("--"))
        .cloned()
        .unwrap_or_default();
    let birthday = args
        .iter()
        .filter(|a| !a.starts_with("--"))
        .nth(1)
        .map(String::as_str);
    let use_astrology = args.iter().any(|a| a == "--astrology");
    let announce = args.iter().any(|a| a == "--announce");

    match session
        .profiles()
        .onboard(&name, birthday, use_astrology, announce)
        .await
    {
        Ok(profile) => {
            println!("Welcome, {}.", profile.name);
            if let Some(sign) = profile.sign() {
                println!("Your sign is {}.", sign);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

async fn fortune(session: &ZoltarSession) -> Result<(), Box<dyn std::error::Error>> {
    if session.profile().await.is_none() {
        eprintln!("No profile yet. Run: zoltar onboard <name> [birthday MM/DD/YYYY]");
        std::process::exit(1);
    }

    session.initialize().await;

    let view = session.state().snapshot();
    if !view.allowed {
        if let Some(wait) = view.wait_message {
            println!("{}", wait);
        }
        return Ok(());
    }

    session.get_fortune().await?;

    let view = session.state().snapshot();
    println!("{}", view.header);
    println!("{}", view.body);
    if !view.luck.is_empty() {
        println!("{}", view.luck);
    }
    if let Some(wait) = view.wait_message {
        println!("{}", wait);
    }

    Ok(())
}

async fn history(session: &ZoltarSession) -> Result<(), Box<dyn std::error::Error>> {
    let fortunes = session.previous_fortunes().await?;
    if fortunes.is_empty() {
        println!("No previous fortunes.");
        return Ok(());
    }

    for entry in fortunes {
        if let Some(record) = entry.record {
            println!(
                "[{}] {}: {}",
                zoltar::time_utils::format_utc_rfc3339(entry.timestamp),
                record.header,
                record.body
            );
        }
    }

    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("zoltar=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
