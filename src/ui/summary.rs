//! End-of-run summary rendering.

use crate::runner::RunSummary;

use super::output::format_duration;
use super::theme::SetupTheme;

/// Render the run summary box.
pub fn render_summary(summary: &RunSummary, theme: &SetupTheme) -> Vec<String> {
    let b = &theme.border;
    let mut lines = vec![format!(
        "  {} {}",
        b.apply_to("┌─"),
        b.apply_to("Summary ──────────────────────────")
    )];

    for name in &summary.installed {
        lines.push(format!(
            "  {} {} {:<20} {}",
            b.apply_to("│"),
            theme.success.apply_to("✓"),
            name,
            theme.dim.apply_to("installed")
        ));
    }
    for name in &summary.already_installed {
        lines.push(format!(
            "  {} {} {:<20} {}",
            b.apply_to("│"),
            theme.dim.apply_to("○"),
            name,
            theme.dim.apply_to("already installed")
        ));
    }
    for (name, reason) in &summary.failed {
        lines.push(format!(
            "  {} {} {:<20} {}",
            b.apply_to("│"),
            theme.error.apply_to("✗"),
            name,
            reason
        ));
    }

    lines.push(format!(
        "  {}",
        b.apply_to("├────────────────────────────────────")
    ));
    lines.push(format!(
        "  {} Total: {} {} {} installed {} {} already installed {} {} failed {} {:.1}% success",
        b.apply_to("│"),
        theme.duration.apply_to(format_duration(summary.duration)),
        theme.dim.apply_to("·"),
        summary.installed.len(),
        theme.dim.apply_to("·"),
        summary.already_installed.len(),
        theme.dim.apply_to("·"),
        summary.failed.len(),
        theme.dim.apply_to("·"),
        summary.success_rate(),
    ));
    lines.push(format!(
        "  {}",
        b.apply_to("└────────────────────────────────────")
    ));

    if !summary.warnings.is_empty() {
        lines.push(String::new());
        lines.extend(
            summary
                .warnings
                .iter()
                .map(|w| format!("  {}", theme.format_warning(w))),
        );
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn sample() -> RunSummary {
        RunSummary {
            installed: vec!["git".into(), "nodejs".into()],
            already_installed: vec!["python".into()],
            failed: vec![(
                "docker".into(),
                "Installer for 'docker' exited with code 1".into(),
            )],
            warnings: vec!["docker failed to install; continuing".into()],
            duration: Duration::from_millis(1500),
        }
    }

    #[test]
    fn lists_every_component() {
        let text = render_summary(&sample(), &SetupTheme::plain()).join("\n");
        assert!(text.contains("✓ git"));
        assert!(text.contains("○ python"));
        assert!(text.contains("✗ docker"));
        assert!(text.contains("exited with code 1"));
    }

    #[test]
    fn footer_has_totals_and_rate() {
        let lines = render_summary(&sample(), &SetupTheme::plain());
        let footer = lines.iter().find(|l| l.contains("Total:")).unwrap();
        assert!(footer.contains("1.5s"));
        assert!(footer.contains("2 installed"));
        assert!(footer.contains("1 failed"));
        assert!(footer.contains("75.0% success"));
    }

    #[test]
    fn warnings_follow_the_box() {
        let lines = render_summary(&sample(), &SetupTheme::plain());
        assert_eq!(
            lines.last().unwrap(),
            "  ⚠ docker failed to install; continuing"
        );
    }

    #[test]
    fn no_warning_section_when_clean() {
        let summary = RunSummary {
            installed: vec!["git".into()],
            ..Default::default()
        };
        let lines = render_summary(&summary, &SetupTheme::plain());
        assert!(lines.last().unwrap().contains("└"));
    }
}
