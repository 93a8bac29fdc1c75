use colored::Colorize;
use std::fmt;
use std::sync::{OnceLock, RwLock};

use crate::config::Theme;
use crate::currency::Currency;
use crate::ledger::{CategoryIcon, TransactionKind};

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Section,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputPreferences {
    pub theme: Theme,
    /// Suppresses styling entirely, e.g. when `NO_COLOR` is set.
    pub plain: bool,
}

impl Default for OutputPreferences {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            plain: false,
        }
    }
}

static PREFERENCES: OnceLock<RwLock<OutputPreferences>> = OnceLock::new();

pub fn set_preferences(prefs: OutputPreferences) {
    let lock = PREFERENCES.get_or_init(|| RwLock::new(OutputPreferences::default()));
    if let Ok(mut guard) = lock.write() {
        *guard = prefs;
    }
}

fn preferences() -> OutputPreferences {
    PREFERENCES
        .get_or_init(|| RwLock::new(OutputPreferences::default()))
        .read()
        .map(|guard| *guard)
        .unwrap_or_default()
}

fn label(kind: MessageKind) -> &'static str {
    match kind {
        MessageKind::Success => "[ok]",
        MessageKind::Warning => "[!]",
        MessageKind::Error => "[x]",
        MessageKind::Info | MessageKind::Section => "",
    }
}

fn apply_style(kind: MessageKind, message: impl fmt::Display, prefs: &OutputPreferences) -> String {
    let text = message.to_string();
    let formatted = match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()),
        MessageKind::Info => text,
        _ => format!("{} {text}", label(kind)),
    };

    if prefs.plain {
        return formatted;
    }

    let dark = prefs.theme.is_dark();
    match kind {
        MessageKind::Success if dark => formatted.bright_green().to_string(),
        MessageKind::Success => formatted.green().to_string(),
        MessageKind::Warning if dark => formatted.bright_yellow().to_string(),
        MessageKind::Warning => formatted.yellow().to_string(),
        MessageKind::Error if dark => formatted.bright_red().to_string(),
        MessageKind::Error => formatted.red().to_string(),
        MessageKind::Section => formatted.bold().to_string(),
        MessageKind::Info => formatted,
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let formatted = apply_style(kind, message, &preferences());
    match kind {
        MessageKind::Section => println!("\n{formatted}"),
        MessageKind::Error | MessageKind::Warning => eprintln!("{formatted}"),
        _ => println!("{formatted}"),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

/// `+Rs.1.5k` for income, `-Rs.1.5k` for expenses.
pub fn signed_money(kind: TransactionKind, amount: f64, currency: Currency) -> String {
    let sign = match kind {
        TransactionKind::Income => '+',
        TransactionKind::Expense => '-',
    };
    format!("{sign}{}", currency.format(amount.abs()))
}

/// Colors an already formatted amount by direction.
pub fn tint(kind: TransactionKind, text: &str) -> String {
    let prefs = preferences();
    if prefs.plain {
        return text.to_string();
    }
    match (kind, prefs.theme.is_dark()) {
        (TransactionKind::Income, true) => text.bright_green().to_string(),
        (TransactionKind::Income, false) => text.green().to_string(),
        (TransactionKind::Expense, true) => text.bright_red().to_string(),
        (TransactionKind::Expense, false) => text.red().to_string(),
    }
}

/// Fixed-width text bar for a whole percent, e.g. `[####------]`.
pub fn progress_bar(percent: u32, width: usize) -> String {
    let filled = (percent.min(100) as usize * width + 50) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// Category label with its icon glyph; unknown names get the fallback icon.
pub fn category_label(name: &str, icon: Option<CategoryIcon>) -> String {
    format!("{} {name}", icon.unwrap_or_default().glyph())
}
