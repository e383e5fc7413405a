use colored::{ColoredString, Colorize};
use is_terminal::IsTerminal;
use std::env;
use std::io::stdout;

/// When to color the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    #[default]
    Auto, // color only when stdout is a terminal
    Always,
    Never,
}

impl std::str::FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ColorMode::Auto),
            "always" => Ok(ColorMode::Always),
            "never" => Ok(ColorMode::Never),
            _ => Err(format!(
                "Invalid color mode: '{}'. Valid options: auto, always, never",
                s
            )),
        }
    }
}

/// TTY-aware color helper that respects NO_COLOR
#[derive(Debug, Clone)]
pub struct ColorHelper {
    mode: ColorMode,
    stdout_is_terminal: bool,
    no_color: bool,
}

impl ColorHelper {
    pub fn new(mode: ColorMode) -> Self {
        Self {
            mode,
            stdout_is_terminal: stdout().is_terminal(),
            no_color: env::var("NO_COLOR").is_ok_and(|v| !v.is_empty()),
        }
    }

    /// Helper that never emits escape codes, whatever the environment says
    pub fn plain() -> Self {
        Self {
            mode: ColorMode::Never,
            stdout_is_terminal: false,
            no_color: true,
        }
    }

    pub fn enabled(&self) -> bool {
        if self.no_color {
            return false;
        }

        match self.mode {
            ColorMode::Never => false,
            ColorMode::Always => true,
            ColorMode::Auto => self.stdout_is_terminal,
        }
    }

    fn paint(&self, text: &str, apply: fn(&str) -> ColoredString) -> ColoredString {
        if self.enabled() {
            apply(text)
        } else {
            text.normal()
        }
    }

    pub fn red(&self, text: &str) -> ColoredString {
        self.paint(text, |t| t.red().bold())
    }

    pub fn green(&self, text: &str) -> ColoredString {
        self.paint(text, |t| t.green().bold())
    }

    pub fn yellow(&self, text: &str) -> ColoredString {
        self.paint(text, |t| t.yellow())
    }

    pub fn cyan(&self, text: &str) -> ColoredString {
        self.paint(text, |t| t.cyan())
    }

    pub fn heading(&self, text: &str) -> ColoredString {
        self.paint(text, |t| t.blue().bold())
    }

    pub fn dimmed(&self, text: &str) -> ColoredString {
        self.paint(text, |t| t.dimmed())
    }
}
