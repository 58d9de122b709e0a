use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::error::CalcError;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AiModel {
    #[default]
    #[serde(rename = "ChatGPT-3.5")]
    ChatGpt35,
    #[serde(rename = "ChatGPT-4")]
    ChatGpt4,
    #[serde(rename = "Claude")]
    Claude,
    #[serde(rename = "Gemini")]
    Gemini,
}

/// kg CO2 per query. Fixed for the lifetime of the process.
pub const EMISSION_FACTORS: [(AiModel, f64); 4] = [
    (AiModel::ChatGpt35, AiModel::ChatGpt35.emission_factor()),
    (AiModel::ChatGpt4, AiModel::ChatGpt4.emission_factor()),
    (AiModel::Claude, AiModel::Claude.emission_factor()),
    (AiModel::Gemini, AiModel::Gemini.emission_factor()),
];

impl AiModel {
    /// Menu order.
    pub const ALL: [AiModel; 4] = [
        AiModel::ChatGpt35,
        AiModel::ChatGpt4,
        AiModel::Claude,
        AiModel::Gemini,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AiModel::ChatGpt35 => "ChatGPT-3.5",
            AiModel::ChatGpt4 => "ChatGPT-4",
            AiModel::Claude => "Claude",
            AiModel::Gemini => "Gemini",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(AiModel::name).collect()
    }

    pub const fn emission_factor(&self) -> f64 {
        match self {
            AiModel::ChatGpt35 => 0.0028,
            AiModel::ChatGpt4 => 0.0045,
            AiModel::Claude => 0.0032,
            AiModel::Gemini => 0.0037,
        }
    }

    /// Filesystem-safe form of the name, used in export file names.
    pub fn slug(&self) -> String {
        self.name().to_lowercase().replace('.', "")
    }
}

impl fmt::Display for AiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AiModel {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|model| model.name() == trimmed)
            .ok_or_else(|| CalcError::UnknownModel {
                model: trimmed.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationInput {
    pub queries: u32,
    pub model: AiModel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquivalenceKind {
    CarKilometers,
    SmartphoneCharges,
    CoffeePercent,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Equivalence {
    pub kind: EquivalenceKind,
    pub quantity: f64,
}

impl Equivalence {
    pub fn statement(&self) -> String {
        match self.kind {
            EquivalenceKind::CarKilometers => format!(
                "Equivalent to driving a car for approximately {:.2} kilometers.",
                self.quantity
            ),
            EquivalenceKind::SmartphoneCharges => format!(
                "About the same CO2 as charging {:.2} smartphones.",
                self.quantity
            ),
            EquivalenceKind::CoffeePercent => format!(
                "Roughly {:.2}% of the carbon footprint of a typical coffee.",
                self.quantity
            ),
        }
    }
}

/// Car, smartphone, coffee; always in that order.
pub type ComparativeContext = [String; 3];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSlice {
    pub label: String,
    pub value: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub title: String,
    pub slices: [ChartSlice; 2],
}

impl ChartData {
    pub fn values(&self) -> [f64; 2] {
        [self.slices[0].value, self.slices[1].value]
    }

    /// Fraction of the pie each slice occupies.
    pub fn shares(&self) -> [f64; 2] {
        let total: f64 = self.slices.iter().map(|s| s.value).sum();
        if total > 0.0 {
            [self.slices[0].value / total, self.slices[1].value / total]
        } else {
            [0.0, 0.0]
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionsReport {
    pub model: AiModel,
    pub queries: u32,
    pub emissions_kg: f64,
    pub metric_label: String,
    pub metric_value: String,
    pub context: ComparativeContext,
    pub chart: ChartData,
    pub generated_at: DateTime<Utc>,
}

impl EmissionsReport {
    /// `emissions_chatgpt-35_10`
    pub fn file_stem(&self) -> String {
        format!("emissions_{}_{}", self.model.slug(), self.queries)
    }
}
