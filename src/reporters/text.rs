//! Text (terminal) reporter: one nutrition label per analysis

use crate::models::{Analysis, MetricName};
use crate::scoring::Band;
use console::Style;

const RULE: &str = "──────────────────────────────────────";

/// Styles for one render, all switched off when colour is disabled
struct Palette {
    bold: Style,
    dim: Style,
    low: Style,
    medium: Style,
    high: Style,
    badge: Style,
}

impl Palette {
    fn new(color: bool) -> Self {
        Self {
            bold: Style::new().bold().force_styling(color),
            dim: Style::new().dim().force_styling(color),
            low: Style::new().red().force_styling(color),
            medium: Style::new().yellow().force_styling(color),
            high: Style::new().green().force_styling(color),
            badge: Style::new().cyan().bold().force_styling(color),
        }
    }

    fn band(&self, band: Band) -> &Style {
        match band {
            Band::Low => &self.low,
            Band::Medium => &self.medium,
            Band::High => &self.high,
        }
    }
}

/// Render analyses as nutrition labels separated by a blank line
pub fn render(analyses: &[Analysis], color: bool) -> String {
    let palette = Palette::new(color);
    analyses
        .iter()
        .map(|a| render_label(a, &palette))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_label(analysis: &Analysis, p: &Palette) -> String {
    let mut out = String::new();

    out.push_str(&format!("\n{}\n", p.bold.apply_to("Content Nutrition Facts")));
    let title = if analysis.title.trim().is_empty() {
        "Untitled"
    } else {
        analysis.title.trim()
    };
    out.push_str(&format!("{}\n", title));
    if !analysis.url.trim().is_empty() {
        out.push_str(&format!("{}\n", p.dim.apply_to(analysis.url.trim())));
    }
    out.push_str(&format!("{}\n", p.dim.apply_to(RULE)));

    for metric in MetricName::ALL {
        let value = analysis.metrics.get(metric);
        let band = Band::of(value);
        // Pad before styling so escape codes don't break alignment
        let shown = format!("{:>6.2}", value);
        out.push_str(&format!(
            "{:<22}{}  {}\n",
            metric.label(),
            p.band(band).apply_to(shown),
            p.dim.apply_to(band)
        ));
    }

    out.push_str(&format!("{}\n", p.dim.apply_to(RULE)));
    let average = format!("{:>6.2}", analysis.summary.average);
    out.push_str(&format!(
        "{:<22}{}\n",
        p.bold.apply_to("Average"),
        p.band(Band::of(analysis.summary.average)).apply_to(average)
    ));

    if analysis.summary.badges.is_empty() {
        out.push_str(&format!("{}\n", p.dim.apply_to("No badges earned")));
    } else {
        out.push_str(&format!("\n{}\n", p.bold.apply_to("BADGES")));
        for badge in &analysis.summary.badges {
            out.push_str(&format!(
                "  {}  {}\n",
                p.badge.apply_to(badge.name),
                p.dim.apply_to(badge.description)
            ));
        }
    }

    out.push_str(&format!(
        "\n{}\n",
        p.dim.apply_to(format!("Source: {}", analysis.source))
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_analysis;

    #[test]
    fn test_label_lists_every_metric() {
        let out = render(&[test_analysis()], false);
        for metric in MetricName::ALL {
            assert!(out.contains(metric.label()), "missing {}", metric.label());
        }
        assert!(out.contains("Test Article"));
        assert!(out.contains("https://www.bbc.com/news/article"));
        assert!(out.contains(" 48.33"));
        assert!(out.contains("Source: heuristic"));
    }

    #[test]
    fn test_label_shows_badges() {
        let out = render(&[test_analysis()], false);
        assert!(out.contains("Fact Checker"));
        assert!(out.contains("Perspective Seeker"));
        assert!(!out.contains("Balanced Diet"));
    }

    #[test]
    fn test_no_color_has_no_escape_codes() {
        let out = render(&[test_analysis()], false);
        assert!(!out.contains('\x1b'));
    }

    #[test]
    fn test_color_uses_escape_codes() {
        let out = render(&[test_analysis()], true);
        assert!(out.contains('\x1b'));
    }

    #[test]
    fn test_untitled_page() {
        let mut analysis = test_analysis();
        analysis.title = "  ".to_string();
        analysis.url.clear();
        analysis.summary.badges.clear();
        let out = render(&[analysis], false);
        assert!(out.contains("Untitled"));
        assert!(out.contains("No badges earned"));
    }

    #[test]
    fn test_bands_in_label() {
        let out = render(&[test_analysis()], false);
        let bias_line = out
            .lines()
            .find(|l| l.starts_with("Bias Content"))
            .expect("bias line");
        assert!(bias_line.ends_with("low"));
        let source_line = out
            .lines()
            .find(|l| l.starts_with("Source Minerals"))
            .expect("source line");
        assert!(source_line.ends_with("high"));
    }
}
