use crate::core::notifier::DimensionNotifier;
use crate::core::{
    CartLine, DimensionPolicy, NotificationChannel, QuoteRequestDocument, ShipmentRequest,
    VolumeRecord, WeightUnit, VOLUME_TYPE_BOX,
};
use crate::utils::error::FreightError;
use crate::utils::round2;
use crate::utils::validation::digits_only;

/// Why a request document was not produced.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildAbort {
    EmptyCart,
    /// Every line lacking complete dimensions, in cart order.
    MissingDimensions(Vec<CartLine>),
}

impl From<&BuildAbort> for FreightError {
    fn from(abort: &BuildAbort) -> Self {
        match abort {
            BuildAbort::EmptyCart => FreightError::ValidationError {
                message: "cart is empty".to_string(),
            },
            BuildAbort::MissingDimensions(lines) => FreightError::MissingDimensionsError {
                count: lines.len(),
            },
        }
    }
}

/// Converts a value in `unit` to kilograms, rounded to two decimals.
pub fn normalize_weight(weight: f64, unit: &WeightUnit) -> f64 {
    round2(to_kilograms(weight, unit))
}

fn to_kilograms(weight: f64, unit: &WeightUnit) -> f64 {
    match unit {
        WeightUnit::Grams => weight / 1000.0,
        WeightUnit::Kilograms | WeightUnit::Unrecognized(_) => weight,
    }
}

pub struct QuoteRequestBuilder {
    origin_zip_code: String,
    weight_unit: WeightUnit,
    policy: DimensionPolicy,
}

impl QuoteRequestBuilder {
    pub fn new(
        origin_zip_code: impl Into<String>,
        weight_unit: WeightUnit,
        policy: DimensionPolicy,
    ) -> Self {
        if let WeightUnit::Unrecognized(raw) = &weight_unit {
            tracing::warn!(unit = %raw, "Unrecognized weight unit, assuming kilograms");
        }
        Self {
            origin_zip_code: origin_zip_code.into(),
            weight_unit,
            policy,
        }
    }

    /// Assembles the provider request for one quote attempt.
    ///
    /// With `notify_on_missing_dimensions` set, a single incomplete line
    /// aborts the whole quote after the notice is handed to `notifier`.
    pub fn build<N: NotificationChannel>(
        &self,
        request: &ShipmentRequest,
        notifier: &DimensionNotifier<N>,
    ) -> Result<QuoteRequestDocument, BuildAbort> {
        if request.lines.is_empty() {
            return Err(BuildAbort::EmptyCart);
        }

        let incomplete: Vec<CartLine> = request
            .lines
            .iter()
            .filter(|line| !line.has_dimensions())
            .cloned()
            .collect();

        if !incomplete.is_empty() {
            tracing::warn!(
                count = incomplete.len(),
                products = ?incomplete.iter().map(|l| l.product_id).collect::<Vec<_>>(),
                "Product does not have dimensions set"
            );
            if self.policy.notify_on_missing_dimensions {
                notifier.notify(&incomplete);
                return Err(BuildAbort::MissingDimensions(incomplete));
            }
        }

        let volumes = request.lines.iter().map(|line| self.volume_for(line)).collect();

        let document = QuoteRequestDocument {
            origin_zip_code: digits_only(&self.origin_zip_code),
            destination_zip_code: digits_only(&request.destination_zip_code),
            volumes,
            package_weight_kg: normalize_weight(request.package_weight, &self.weight_unit),
        };

        tracing::debug!(
            origin = %document.origin_zip_code,
            destination = %document.destination_zip_code,
            volumes = document.volumes.len(),
            weight_kg = document.package_weight_kg,
            "Quote request built"
        );

        Ok(document)
    }

    // Unit values are rounded before multiplying by quantity, so totals can
    // differ from round(unit * qty). Existing quotes depend on this. The outer
    // round only strips float noise from the product.
    fn volume_for(&self, line: &CartLine) -> VolumeRecord {
        let quantity = f64::from(line.quantity);
        let dimensions = line.dimensions.complete();
        let unit_weight = round2(to_kilograms(line.unit_weight, &self.weight_unit));

        VolumeRecord {
            volume_type: VOLUME_TYPE_BOX.to_string(),
            width: dimensions.map(|d| d.width),
            height: dimensions.map(|d| d.height),
            length: dimensions.map(|d| d.length),
            weight: round2(unit_weight * quantity).max(0.0),
            cost_of_goods: round2(round2(line.unit_price) * quantity).max(0.0),
        }
    }
}
