//! Plain-text state report.

use econsim_core::{Country, ResourceKind, WorldState};
use std::fmt::{self, Write};

const RESERVE_KINDS: [ResourceKind; 5] = [
    ResourceKind::Steel,
    ResourceKind::Tungsten,
    ResourceKind::Chromium,
    ResourceKind::Aluminium,
    ResourceKind::Oil,
];

pub fn render_world(state: &WorldState) -> Result<String, fmt::Error> {
    let mut out = String::new();
    for country in &state.countries {
        write_country(&mut out, country)?;
        out.push('\n');
    }
    Ok(out)
}

pub fn render_country(c: &Country) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_country(&mut out, c)?;
    Ok(out)
}

fn write_country(out: &mut String, c: &Country) -> fmt::Result {
    writeln!(out, "Country({}, {})", c.name(), c.ideology())?;
    writeln!(
        out,
        "  Factories: CIV={} | MIL={} | REFINERIES={}",
        c.total_civilian_factories(),
        c.total_military_factories(),
        c.refineries()
    )?;

    let reserves: Vec<String> = RESERVE_KINDS
        .iter()
        .map(|&kind| format!("{}={}", kind, c.total_reserve(kind)))
        .collect();
    writeln!(out, "  Reserves: {}", reserves.join(" | "))?;

    writeln!(
        out,
        "  Daily Production ({}): {}",
        c.economy().production.name(),
        c.daily_production()
    )?;
    writeln!(out, "  Stock: {}", c.stockpile())?;

    writeln!(out, "  Provinces:")?;
    for p in c.provinces() {
        writeln!(out, "    - {}", p)?;
    }

    if c.queue().is_empty() {
        writeln!(out, "  Construction Queue: (empty)")?;
    } else {
        writeln!(out, "  Construction Queue:")?;
        for task in c.queue() {
            writeln!(out, "    - {} {:.0}%", task, task.progress() * 100.0)?;
        }
    }
    Ok(())
}
