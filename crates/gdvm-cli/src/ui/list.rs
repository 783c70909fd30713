//! Column layout for `godot list`, `templates list` and `versions list`.

use super::theme::Theme;
use crossterm::style::Stylize;
use gdvm_schema::Semver;

/// Print `versions` as aligned rows, or `empty` when there are none.
pub fn print_versions(versions: &[Semver], empty: &str) {
    let theme = Theme::default();

    if versions.is_empty() {
        println!();
        println!("  {empty}");
        return;
    }

    println!();
    let header = format!(
        "  {:<vw$} {:<rw$} {}",
        "version",
        "release",
        "flavour",
        vw = theme.layout.version_width,
        rw = theme.layout.release_width,
    );
    println!("{}", header.with(theme.colors.header));

    for semver in versions {
        println!("{}", format_row(&theme, semver));
    }
}

fn format_row(theme: &Theme, semver: &Semver) -> String {
    let version = format!(
        "{:<width$}",
        semver.version.remote_string(),
        width = theme.layout.version_width
    );
    let release = format!(
        "{:<width$}",
        semver.release.to_string(),
        width = theme.layout.release_width
    );
    let flavour = if semver.mono { "mono" } else { "standard" };

    format!(
        "  {} {} {}",
        version.with(theme.colors.version),
        release.with(theme.colors.secondary),
        flavour.with(theme.colors.secondary)
    )
}
