//! Spending categories and the closed icon set they draw from.

use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::common::{Identifiable, RecordId};

pub const DEFAULT_CATEGORY_COLOR: &str = "#38BDF8";

/// Labels ledger activity. Categories are append-only and unique by name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: RecordId,
    pub name: String,
    pub icon: CategoryIcon,
    pub color: String,
}

impl Category {
    pub fn new(name: impl Into<String>, icon: CategoryIcon, color: impl Into<String>) -> Self {
        Self {
            id: RecordId::generate(),
            name: name.into(),
            icon,
            color: color.into(),
        }
    }

    /// Case-insensitive name comparison used for uniqueness and lookups.
    pub fn matches_name(&self, candidate: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(candidate.trim())
    }
}

impl Identifiable for Category {
    fn id(&self) -> &RecordId {
        &self.id
    }
}

/// Symbolic icon keys. Unknown keys resolve to [`CategoryIcon::ShoppingBag`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(from = "String", into = "String")]
pub enum CategoryIcon {
    Utensils,
    Bus,
    #[default]
    ShoppingBag,
    GraduationCap,
    Heart,
    Gamepad2,
    Home,
    Briefcase,
    Coffee,
    Zap,
    Car,
    Plane,
    Gift,
    Plus,
    Coins,
    Banknote,
    TrendingUp,
    Wallet,
    Award,
    Gem,
    Landmark,
}

impl CategoryIcon {
    pub const ALL: [CategoryIcon; 21] = [
        CategoryIcon::Utensils,
        CategoryIcon::Bus,
        CategoryIcon::ShoppingBag,
        CategoryIcon::GraduationCap,
        CategoryIcon::Heart,
        CategoryIcon::Gamepad2,
        CategoryIcon::Home,
        CategoryIcon::Briefcase,
        CategoryIcon::Coffee,
        CategoryIcon::Zap,
        CategoryIcon::Car,
        CategoryIcon::Plane,
        CategoryIcon::Gift,
        CategoryIcon::Plus,
        CategoryIcon::Coins,
        CategoryIcon::Banknote,
        CategoryIcon::TrendingUp,
        CategoryIcon::Wallet,
        CategoryIcon::Award,
        CategoryIcon::Gem,
        CategoryIcon::Landmark,
    ];

    pub fn key(self) -> &'static str {
        match self {
            CategoryIcon::Utensils => "Utensils",
            CategoryIcon::Bus => "Bus",
            CategoryIcon::ShoppingBag => "ShoppingBag",
            CategoryIcon::GraduationCap => "GraduationCap",
            CategoryIcon::Heart => "Heart",
            CategoryIcon::Gamepad2 => "Gamepad2",
            CategoryIcon::Home => "Home",
            CategoryIcon::Briefcase => "Briefcase",
            CategoryIcon::Coffee => "Coffee",
            CategoryIcon::Zap => "Zap",
            CategoryIcon::Car => "Car",
            CategoryIcon::Plane => "Plane",
            CategoryIcon::Gift => "Gift",
            CategoryIcon::Plus => "Plus",
            CategoryIcon::Coins => "Coins",
            CategoryIcon::Banknote => "Banknote",
            CategoryIcon::TrendingUp => "TrendingUp",
            CategoryIcon::Wallet => "Wallet",
            CategoryIcon::Award => "Award",
            CategoryIcon::Gem => "Gem",
            CategoryIcon::Landmark => "Landmark",
        }
    }

    /// Resolves a symbolic key; matching ignores ASCII case.
    pub fn from_key(key: &str) -> Self {
        let key = key.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|icon| icon.key().eq_ignore_ascii_case(key))
            .unwrap_or_default()
    }

    /// Terminal rendering handle.
    pub fn glyph(self) -> &'static str {
        match self {
            CategoryIcon::Utensils => "🍴",
            CategoryIcon::Bus => "🚌",
            CategoryIcon::ShoppingBag => "🛍",
            CategoryIcon::GraduationCap => "🎓",
            CategoryIcon::Heart => "❤",
            CategoryIcon::Gamepad2 => "🎮",
            CategoryIcon::Home => "🏠",
            CategoryIcon::Briefcase => "💼",
            CategoryIcon::Coffee => "☕",
            CategoryIcon::Zap => "⚡",
            CategoryIcon::Car => "🚗",
            CategoryIcon::Plane => "✈",
            CategoryIcon::Gift => "🎁",
            CategoryIcon::Plus => "➕",
            CategoryIcon::Coins => "🪙",
            CategoryIcon::Banknote => "💵",
            CategoryIcon::TrendingUp => "📈",
            CategoryIcon::Wallet => "👛",
            CategoryIcon::Award => "🏅",
            CategoryIcon::Gem => "💎",
            CategoryIcon::Landmark => "🏛",
        }
    }
}

impl From<String> for CategoryIcon {
    fn from(value: String) -> Self {
        Self::from_key(&value)
    }
}

impl From<CategoryIcon> for String {
    fn from(value: CategoryIcon) -> Self {
        value.key().to_string()
    }
}

impl fmt::Display for CategoryIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

static DEFAULT_CATEGORIES: Lazy<Vec<Category>> = Lazy::new(|| {
    [
        ("cat-1", "Food", CategoryIcon::Utensils, "#FB923C"),
        ("cat-2", "Transport", CategoryIcon::Bus, "#38BDF8"),
        ("cat-3", "Shopping", CategoryIcon::ShoppingBag, "#EC4899"),
        ("cat-4", "Education", CategoryIcon::GraduationCap, "#8B5CF6"),
        ("cat-5", "Health", CategoryIcon::Heart, "#EF4444"),
        ("cat-6", "Fun", CategoryIcon::Gamepad2, "#F59E0B"),
        ("cat-7", "Rent", CategoryIcon::Home, "#10B981"),
        ("cat-8", "Salary", CategoryIcon::Briefcase, "#3B82F6"),
    ]
    .into_iter()
    .map(|(id, name, icon, color)| Category {
        id: RecordId::from(id),
        name: name.into(),
        icon,
        color: color.into(),
    })
    .collect()
});

/// Starter set seeded on first launch and after a reset.
pub fn default_categories() -> Vec<Category> {
    DEFAULT_CATEGORIES.clone()
}
