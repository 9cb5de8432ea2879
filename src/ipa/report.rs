// The text report printed at the end of a run.

use std::io;

use crate::ipa::config_reader::IpaConfig;
use crate::ipa::glossary::{pillar, Glossary};
use ipa_analysis::*;

const LEGEND: [(Strategy, &str); 4] = [
    (Strategy::Retain, "high importance, high performance"),
    (Strategy::ImproveFirst, "high importance, low performance"),
    (Strategy::Overinvested, "low importance, high performance"),
    (Strategy::LowPriority, "low importance, low performance"),
];

fn item_name(id: &str, glossary: &Glossary) -> String {
    match glossary.describe(id) {
        Some(desc) => format!("{} ({})", id, desc),
        None => id.to_string(),
    }
}

pub fn write_report<W: io::Write>(
    w: &mut W,
    config: &IpaConfig,
    res: &AnalysisResult,
    glossary: &Glossary,
) -> io::Result<()> {
    let title = &config.output_settings.analysis_title;
    if !title.is_empty() {
        writeln!(w, "{}", title)?;
    }
    writeln!(w, "Items: {}", res.items.len())?;
    writeln!(w, "Mean importance:  {:.2}", res.means.importance_mean)?;
    writeln!(w, "Mean performance: {:.2}", res.means.performance_mean)?;
    writeln!(w)?;
    for (strategy, desc) in LEGEND.iter() {
        writeln!(w, "  {:<14} {}", strategy.label(), desc)?;
    }

    for g in res.groups.iter() {
        writeln!(w)?;
        writeln!(
            w,
            "{} ({} items, importance {:.2}, performance {:.2})",
            g.strategy,
            g.members.len(),
            g.mean_importance,
            g.mean_performance
        )?;
        for m in g.members.iter() {
            writeln!(
                w,
                "  - {} -> {}",
                item_name(&m.item.id, glossary),
                m.recommendation
            )?;
        }
    }

    writeln!(w)?;
    writeln!(
        w,
        "{:<10} {:>10} {:>11}  {:<14} {:<13}",
        "Item", "Importance", "Performance", "Strategy", "Pillar"
    )?;
    for ci in res.items.iter() {
        writeln!(
            w,
            "{:<10} {:>10.2} {:>11.2}  {:<14} {:<13}",
            ci.item.id,
            ci.item.importance,
            ci.item.performance,
            ci.strategy.label(),
            pillar(&ci.item.id).unwrap_or("-")
        )?;
    }
    Ok(())
}
