use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Volume type tag the quote provider expects for every package.
pub const VOLUME_TYPE_BOX: &str = "BOX";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentRequest {
    pub destination_zip_code: String,
    /// Package weight in the configured unit.
    pub package_weight: f64,
    #[serde(default)]
    pub package_value: f64,
    #[serde(default)]
    pub lines: Vec<CartLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: u64,
    pub name: String,
    pub quantity: u32,
    pub unit_weight: f64,
    pub unit_price: f64,
    #[serde(default)]
    pub dimensions: ProductDimensions,
}

/// Dimensions as stored in the catalog; any of them may be unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductDimensions {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub length: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub length: f64,
}

impl ProductDimensions {
    /// All-or-nothing: one missing or non-positive side discards the other two.
    pub fn complete(&self) -> Option<Dimensions> {
        let positive = |v: Option<f64>| v.filter(|x| *x > 0.0);
        Some(Dimensions {
            width: positive(self.width)?,
            height: positive(self.height)?,
            length: positive(self.length)?,
        })
    }
}

impl CartLine {
    pub fn has_dimensions(&self) -> bool {
        self.dimensions.complete().is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteRequestDocument {
    pub origin_zip_code: String,
    pub destination_zip_code: String,
    pub volumes: Vec<VolumeRecord>,
    /// Normalized package weight in kilograms. Not sent to the provider.
    #[serde(skip)]
    pub package_weight_kg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumeRecord {
    pub volume_type: String,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub length: Option<f64>,
    pub weight: f64,
    pub cost_of_goods: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProviderResponse {
    pub content: ProviderContent,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProviderContent {
    #[serde(default)]
    pub delivery_options: Vec<DeliveryOption>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DeliveryOption {
    pub description: String,
    pub final_shipping_cost: f64,
    pub provider_shipping_cost: f64,
    #[serde(default)]
    pub deadline: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarrierRateOption {
    pub carrier: String,
    pub carrier_title: String,
    pub method: String,
    pub method_title: String,
    pub price: f64,
    pub cost: f64,
}

/// Rates offered by the carrier. Empty means "quoted, nothing available",
/// which is not the same as the carrier declining to quote.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RateQuoteResult {
    pub rates: Vec<CarrierRateOption>,
}

impl RateQuoteResult {
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }
}

/// Unit the storefront stores package weights in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeightUnit {
    Grams,
    Kilograms,
    /// Anything else found in configuration; weights pass through as kilograms.
    Unrecognized(String),
}

impl WeightUnit {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "gr" => WeightUnit::Grams,
            "" | "kg" => WeightUnit::Kilograms,
            other => WeightUnit::Unrecognized(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DimensionPolicy {
    /// Publish a notice and refuse to quote when any product lacks dimensions.
    pub notify_on_missing_dimensions: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeSeverity {
    Critical,
    Major,
    Minor,
    Notice,
}

/// One aggregated admin notice about products that block quoting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionNotice {
    pub severity: NoticeSeverity,
    pub title: String,
    pub message: String,
    pub product_ids: Vec<u64>,
    pub created_at: DateTime<Utc>,
}
