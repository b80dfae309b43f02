//! Terminal output for menv.
//!
//! Every message menv prints, errors included, goes to stdout through
//! anstream. Colors are off when `--no-color` is given, when `NO_COLOR` is set,
//! when `TERM=dumb`, or when stdout is not a terminal in `auto` mode.

use anstream::println;
use anstyle::{AnsiColor, Color, Style};
use comfy_table::{Attribute, Cell, ContentArrangement, Table, presets};
use std::io::IsTerminal;

/// Value of `--color`
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Always,
    /// Colors only on a terminal
    #[default]
    Auto,
    Never,
}

impl std::str::FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "always" => Ok(Self::Always),
            "auto" => Ok(Self::Auto),
            "never" => Ok(Self::Never),
            _ => Err(format!("invalid color mode: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Ui {
    pub color_enabled: bool,
}

impl Default for Ui {
    fn default() -> Self {
        Self::new(ColorMode::Auto, false)
    }
}

impl Ui {
    pub fn new(mode: ColorMode, no_color_flag: bool) -> Self {
        let color_enabled = !no_color_flag && !no_color_env() && Self::wants_color(mode);

        if !color_enabled {
            anstream::ColorChoice::write_global(anstream::ColorChoice::Never);
        }
        Self { color_enabled }
    }

    fn wants_color(mode: ColorMode) -> bool {
        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }

    fn label(&self, color: AnsiColor) -> Style {
        if self.color_enabled {
            Style::new().fg_color(Some(Color::Ansi(color))).bold()
        } else {
            Style::new()
        }
    }

    fn styled(&self, style: Style, s: &str) -> String {
        if self.color_enabled {
            format!("{style}{s}{style:#}")
        } else {
            s.to_string()
        }
    }

    pub fn ok(&self, msg: impl AsRef<str>) {
        let label = self.label(AnsiColor::Green);
        println!("{label}OK{label:#} {}", msg.as_ref());
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        let label = self.label(AnsiColor::Yellow);
        println!("{label}WARN{label:#} {}", msg.as_ref());
    }

    pub fn err(&self, msg: impl AsRef<str>) {
        let label = self.label(AnsiColor::Red);
        println!("{label}ERROR{label:#} {}", msg.as_ref());
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        let label = self.label(AnsiColor::Cyan);
        println!("{label}INFO{label:#} {}", msg.as_ref());
    }

    /// Gray text, used for paths and marker locations
    pub fn dim(&self, s: impl AsRef<str>) -> String {
        let style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::BrightBlack)));
        self.styled(style, s.as_ref())
    }

    pub fn bold(&self, s: impl AsRef<str>) -> String {
        self.styled(Style::new().bold(), s.as_ref())
    }

    /// Marker in front of the active profile in `ls`
    pub fn active_marker(&self) -> &'static str {
        if self.color_enabled { "✓" } else { "*" }
    }

    /// Borderless table for profile listings
    pub fn simple_table(&self) -> Table {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.load_preset(presets::NOTHING);
        table
    }

    pub fn cell(&self, content: impl Into<String>) -> Cell {
        Cell::new(content.into())
    }

    pub fn header_cell(&self, content: impl Into<String>) -> Cell {
        let cell = Cell::new(content.into());
        if self.color_enabled {
            cell.add_attribute(Attribute::Bold)
        } else {
            cell
        }
    }

    /// Profile name cell for the active profile, green when colors are on.
    /// Styled through comfy-table so column widths ignore escape codes.
    pub fn active_cell(&self, content: impl Into<String>) -> Cell {
        let cell = Cell::new(content.into());
        if self.color_enabled {
            cell.fg(comfy_table::Color::Green)
        } else {
            cell
        }
    }

    pub fn println(&self, msg: impl AsRef<str>) {
        println!("{}", msg.as_ref());
    }

    pub fn newline(&self) {
        println!();
    }

    pub fn section(&self, title: impl AsRef<str>) {
        println!("{}", self.bold(title));
    }
}

fn no_color_env() -> bool {
    std::env::var_os("NO_COLOR").is_some()
        || std::env::var("TERM").is_ok_and(|term| term == "dumb")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> Ui {
        Ui::new(ColorMode::Never, false)
    }

    #[test]
    fn test_color_mode_from_str() {
        assert_eq!("always".parse::<ColorMode>().unwrap(), ColorMode::Always);
        assert_eq!("Auto".parse::<ColorMode>().unwrap(), ColorMode::Auto);
        assert_eq!("NEVER".parse::<ColorMode>().unwrap(), ColorMode::Never);
        assert!("sometimes".parse::<ColorMode>().is_err());
    }

    #[test]
    fn test_no_color_flag_beats_always() {
        assert!(!Ui::new(ColorMode::Always, true).color_enabled);
        assert!(!plain().color_enabled);
    }

    #[test]
    fn test_plain_active_marker() {
        assert_eq!(plain().active_marker(), "*");
    }

    #[test]
    fn test_plain_styles_are_identity() {
        let ui = plain();
        assert_eq!(ui.dim("/root/.config/menv"), "/root/.config/menv");
        assert_eq!(ui.bold("menv"), "menv");
    }

    #[test]
    fn test_plain_profile_table_has_no_escapes() {
        let ui = plain();
        let mut table = ui.simple_table();
        table.set_header(vec![ui.header_cell("Profile")]);
        table.add_row(vec![ui.cell("*"), ui.active_cell("work")]);

        let rendered = table.to_string();
        assert!(rendered.contains("work"));
        assert!(!rendered.contains('\u{1b}'));
    }
}
