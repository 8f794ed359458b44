//! Settings command - view and edit stored preferences

use crate::config::{Settings, SettingsStore, Theme};
use crate::models::MetricName;
use crate::scoring::Band;
use anyhow::{Context, Result};
use console::style;

/// Print every preference with its band, then the badges they earn
pub fn show(store: &SettingsStore) -> Result<()> {
    let settings = store.load()?;
    println!("\n{}", style("Preferences").bold());
    println!("  {}\n", style(store.path().display()).dim());

    for metric in MetricName::ALL {
        let value = settings.preference(metric);
        let band = Band::of(value);
        let shown = format!("{:>6.2}", value);
        let shown = match band {
            Band::Low => style(shown).red(),
            Band::Medium => style(shown).yellow(),
            Band::High => style(shown).green(),
        };
        println!(
            "  {:<22} {:<22}{}  {}",
            metric.label(),
            style(metric.canonical()).dim(),
            shown,
            style(band).dim()
        );
    }
    println!("\n  Theme: {}", style(settings.theme).cyan());

    let summary = settings.summary();
    println!("  Average: {:.2}", summary.average);
    if summary.badges.is_empty() {
        println!("  {}", style("No badges earned").dim());
    } else {
        for badge in &summary.badges {
            println!(
                "  {} {}  {}",
                style("✓").green(),
                style(badge.name).bold(),
                style(badge.description).dim()
            );
        }
    }
    println!();
    Ok(())
}

/// Store one preference; `metric` may be a canonical name or an alias
pub fn set(store: &SettingsStore, metric: &str, value: f64) -> Result<()> {
    let name = MetricName::from_key(metric).with_context(|| {
        let valid: Vec<&str> = MetricName::ALL.iter().map(|m| m.canonical()).collect();
        format!("Unknown metric '{}'. Valid metrics: {}", metric, valid.join(", "))
    })?;
    if !value.is_finite() {
        anyhow::bail!("Preference must be a finite number, got {}", value);
    }

    let mut settings = store.load()?;
    settings.set_preference(name, value);
    store.save(&settings)?;
    println!(
        "{} Set {} to {:.2}",
        style("✓").green(),
        style(name.label()).bold(),
        settings.preference(name)
    );
    Ok(())
}

pub fn theme(store: &SettingsStore, theme: Theme) -> Result<()> {
    let mut settings = store.load()?;
    settings.theme = theme;
    store.save(&settings)?;
    println!("{} Theme set to {}", style("✓").green(), style(theme).cyan());
    Ok(())
}

/// Switch between light and dark
pub fn toggle_theme(store: &SettingsStore) -> Result<()> {
    let current = store.load()?.theme;
    theme(store, current.toggled())
}

/// Put every metric preference back to 50. The theme and unrelated keys stay.
pub fn reset(store: &SettingsStore) -> Result<()> {
    let settings = Settings {
        theme: store.load()?.theme,
        ..Settings::default()
    };
    store.save(&settings)?;
    println!("{} Preferences reset to defaults", style("✓").green());
    Ok(())
}
