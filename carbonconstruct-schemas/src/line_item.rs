use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The three kinds of line item a project is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Material,
    Transport,
    Energy,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Material, Category::Transport, Category::Energy];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Material => "material",
            Category::Transport => "transport",
            Category::Energy => "energy",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown category '{}', expected material, transport or energy", s))
    }
}

/// Common view over material, transport and energy line items.
pub trait LineItem {
    const CATEGORY: Category;

    /// The specific material, transport mode or energy source.
    fn subtype(&self) -> &str;

    /// Quantity, distance or amount depending on the category.
    fn magnitude(&self) -> f64;

    /// Positional comparison used for cache keys.
    fn matches(&self, other: &Self) -> bool {
        self.subtype() == other.subtype() && self.magnitude() == other.magnitude()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialItem {
    #[serde(rename = "type")]
    pub material_type: String,
    /// Mass in kg.
    pub quantity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportItem {
    #[serde(rename = "type")]
    pub mode: String,
    /// Distance in km.
    pub distance: f64,
    /// Payload in kg.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyItem {
    #[serde(rename = "type")]
    pub source: String,
    pub amount: f64,
}

impl MaterialItem {
    pub fn new(material_type: impl Into<String>, quantity: f64) -> Self {
        Self { material_type: material_type.into(), quantity }
    }
}

impl TransportItem {
    pub fn new(mode: impl Into<String>, distance: f64, weight: Option<f64>) -> Self {
        Self { mode: mode.into(), distance, weight }
    }
}

impl EnergyItem {
    pub fn new(source: impl Into<String>, amount: f64) -> Self {
        Self { source: source.into(), amount }
    }
}

impl LineItem for MaterialItem {
    const CATEGORY: Category = Category::Material;

    fn subtype(&self) -> &str {
        &self.material_type
    }

    fn magnitude(&self) -> f64 {
        self.quantity
    }
}

impl LineItem for TransportItem {
    const CATEGORY: Category = Category::Transport;

    fn subtype(&self) -> &str {
        &self.mode
    }

    fn magnitude(&self) -> f64 {
        self.distance
    }

    // The payload scales the emissions of a leg, so it is part of the key.
    fn matches(&self, other: &Self) -> bool {
        self.mode == other.mode && self.distance == other.distance && self.weight == other.weight
    }
}

impl LineItem for EnergyItem {
    const CATEGORY: Category = Category::Energy;

    fn subtype(&self) -> &str {
        &self.source
    }

    fn magnitude(&self) -> f64 {
        self.amount
    }
}
