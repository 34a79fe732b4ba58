//! ward-runner: headless runner for the wardline complaint tracker.
//!
//! Seeds a few representative complaints, advances a simulated clock by
//! the sweep interval, and prints the dashboard state as JSON after each
//! sweep. Stands in for the UI and the 5-minute scheduler.
//!
//! Usage:
//!   ward-runner --sweeps 12 --interval-mins 120
//!   ward-runner --config tracker.json --sweeps 6

use anyhow::Result;
use chrono::{Duration, Utc};
use std::sync::Arc;
use wardline_core::{
    ComplaintCounts, ComplaintDesk, ComplaintDraft, ComplaintFilter, ComplaintStore, LogNotifier,
    TrackerConfig,
};

#[derive(serde::Serialize)]
struct UiState {
    sweep: u64,
    now: String,
    escalated_this_sweep: Vec<String>,
    counts: ComplaintCounts,
    complaints: Vec<wardline_core::Complaint>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let sweeps = parse_arg(&args, "--sweeps", 12u64);
    let config = match args
        .windows(2)
        .find(|w| w[0] == "--config")
        .map(|w| w[1].as_str())
    {
        Some(path) => TrackerConfig::load(path)?,
        None => TrackerConfig::default(),
    };
    let interval_mins = parse_arg(&args, "--interval-mins", config.sweep_interval_minutes as i64);

    println!("wardline — ward-runner");
    println!("  sweeps:        {sweeps}");
    println!("  interval_mins: {interval_mins}");
    println!();

    let mut desk = ComplaintDesk::with_bounded_notifier(
        config,
        ComplaintStore::new(),
        Arc::new(LogNotifier),
    )?;
    let mut now = Utc::now();

    seed_complaints(&mut desk, now);

    for sweep in 1..=sweeps {
        now += Duration::minutes(interval_mins);
        let escalated = desk.sweep(now);

        let state = UiState {
            sweep,
            now: now.to_rfc3339(),
            escalated_this_sweep: escalated,
            counts: desk.counts(now),
            complaints: desk.list(&ComplaintFilter::default(), now),
        };
        println!("{}", serde_json::to_string_pretty(&state)?);
    }

    Ok(())
}

fn seed_complaints(desk: &mut ComplaintDesk, now: chrono::DateTime<Utc>) {
    let drafts = [
        ComplaintDraft {
            ward_id: "icu-1".into(),
            category: "beds".into(),
            text: "Two patients sharing one bed in ICU Ward 1.".into(),
            language: "english".into(),
            audio_reference: None,
        },
        ComplaintDraft {
            ward_id: "general-1".into(),
            category: "water".into(),
            text: "No water supply in the washroom for three hours.".into(),
            language: "english".into(),
            audio_reference: None,
        },
        ComplaintDraft {
            ward_id: "icu-2".into(),
            category: "staff".into(),
            text: "No nursing staff available; emergency bell not working.".into(),
            language: "english".into(),
            audio_reference: Some("recordings/icu-2-0012.ogg".into()),
        },
    ];

    for draft in drafts {
        desk.submit(draft, now);
    }
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
