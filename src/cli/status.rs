//! `workswitch status` command implementation

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use super::AppContext;
use crate::profile::{ModeSource, ProfileStore, Slot};

#[derive(Args, Default)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct SlotStatus {
    slot: Slot,
    path: String,
    saved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<String>,
    apps: usize,
    tabs: usize,
}

#[derive(Debug, Serialize)]
struct StatusJson {
    current_mode: Slot,
    source: &'static str,
    slots: Vec<SlotStatus>,
}

pub fn run(ctx: &AppContext, args: StatusArgs) -> Result<()> {
    let (mode, source) = ctx.detector().detect();
    let status = StatusJson {
        current_mode: mode,
        source: source_label(source),
        slots: collect(&ctx.store)?,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("Current mode: {} ({})", status.current_mode, status.source);
    println!();
    for slot in &status.slots {
        if slot.saved {
            println!(
                "  {:<9} {} apps, {} tabs, saved {}",
                slot.slot.as_str(),
                slot.apps,
                slot.tabs,
                slot.timestamp.as_deref().unwrap_or("at an unknown time")
            );
        } else {
            println!("  {:<9} never saved", slot.slot.as_str());
        }
        println!("            {}", slot.path);
    }

    Ok(())
}

fn source_label(source: ModeSource) -> &'static str {
    match source {
        ModeSource::Marker => "from last switch",
        ModeSource::Timestamps => "inferred from state file timestamps",
    }
}

fn collect(store: &ProfileStore) -> Result<Vec<SlotStatus>> {
    Slot::ALL
        .iter()
        .map(|&slot| -> Result<SlotStatus> {
            let snapshot = store.load(slot)?;
            Ok(SlotStatus {
                slot,
                path: store.path(slot).display().to_string(),
                saved: snapshot.is_some(),
                timestamp: snapshot.as_ref().map(|s| {
                    s.captured_at()
                        .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
                        .unwrap_or_else(|| s.timestamp.clone())
                }),
                apps: snapshot.as_ref().map_or(0, |s| s.running_apps.len()),
                tabs: snapshot.as_ref().map_or(0, |s| s.chrome_tabs.len()),
            })
        })
        .collect()
}
