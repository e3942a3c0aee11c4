//! Pricing plans and the quantity slider they are quoted against.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::calculator::compute_price;

/// A subscription plan priced by base fee plus a per-unit cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingPlan {
    /// Display name
    pub name: String,

    /// One-line pitch
    #[serde(default)]
    pub description: String,

    /// Monthly base fee
    pub base_price: f64,

    /// Cost per managed account
    pub per_unit_cost: f64,

    /// Feature bullet points
    #[serde(default)]
    pub features: Vec<String>,

    /// Shown with the "Most Popular" badge
    #[serde(default)]
    pub highlight: bool,
}

impl PricingPlan {
    /// Create a plan with no description or features
    pub fn new(name: impl Into<String>, base_price: f64, per_unit_cost: f64) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            base_price,
            per_unit_cost,
            features: Vec::new(),
            highlight: false,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add feature bullet points
    pub fn with_features(mut self, features: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.features.extend(features.into_iter().map(Into::into));
        self
    }

    /// Mark as the highlighted plan
    pub fn highlighted(mut self) -> Self {
        self.highlight = true;
        self
    }

    /// Displayed monthly price for `quantity` units
    pub fn price_for(&self, quantity: u32) -> u64 {
        compute_price(self.base_price, self.per_unit_cost, quantity)
    }
}

/// The built-in plan table
pub fn default_plans() -> Vec<PricingPlan> {
    vec![
        PricingPlan::new("Starter", 29.0, 2.0)
            .with_description("Perfect for small teams starting out.")
            .with_features([
                "Up to 3 team members",
                "Basic analytics",
                "Email support",
                "Community access",
            ]),
        PricingPlan::new("Pro", 79.0, 1.5)
            .with_description("For growing agencies and businesses.")
            .with_features([
                "Up to 10 team members",
                "Advanced analytics",
                "Priority support",
                "AI-powered suggestions",
            ])
            .highlighted(),
        PricingPlan::new("Enterprise", 199.0, 1.0)
            .with_description("For large-scale operations and enterprises.")
            .with_features([
                "Unlimited team members",
                "Custom integrations",
                "Dedicated manager",
                "24/7 premium support",
            ]),
    ]
}

/// Invalid slider bounds
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("Quantity range is empty: min {min} > max {max}")]
    Empty { min: u32, max: u32 },

    #[error("Default quantity {default} outside {min}..={max}")]
    DefaultOutOfRange { min: u32, max: u32, default: u32 },
}

/// Bounds of the quantity slider offered next to the plans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityRange {
    #[serde(default = "default_min")]
    pub min: u32,

    #[serde(default = "default_max")]
    pub max: u32,

    #[serde(default = "default_quantity")]
    pub default: u32,
}

fn default_min() -> u32 {
    1
}
fn default_max() -> u32 {
    50
}
fn default_quantity() -> u32 {
    10
}

impl Default for QuantityRange {
    fn default() -> Self {
        Self {
            min: default_min(),
            max: default_max(),
            default: default_quantity(),
        }
    }
}

impl QuantityRange {
    /// Check `min <= default <= max`
    pub fn validate(&self) -> Result<(), RangeError> {
        if self.min > self.max {
            return Err(RangeError::Empty {
                min: self.min,
                max: self.max,
            });
        }
        if self.default < self.min || self.default > self.max {
            return Err(RangeError::DefaultOutOfRange {
                min: self.min,
                max: self.max,
                default: self.default,
            });
        }
        Ok(())
    }

    /// Restrict `quantity` to the slider bounds
    pub fn clamp(&self, quantity: u32) -> u32 {
        quantity.clamp(self.min, self.max)
    }
}

/// One plan's price at a given quantity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanQuote {
    pub name: String,
    pub highlight: bool,
    pub quantity: u32,
    pub price: u64,
}

/// Price every plan at `quantity`, in table order
pub fn quote(plans: &[PricingPlan], quantity: u32) -> Vec<PlanQuote> {
    plans
        .iter()
        .map(|plan| PlanQuote {
            name: plan.name.clone(),
            highlight: plan.highlight,
            quantity,
            price: plan.price_for(quantity),
        })
        .collect()
}
