use crate::core::{CarrierRateOption, DeliveryOption, ProviderResponse, RateQuoteResult};

pub struct RateMapper {
    carrier_code: String,
    carrier_title: String,
    show_deadline: bool,
}

impl RateMapper {
    pub fn new(carrier_code: impl Into<String>, carrier_title: impl Into<String>) -> Self {
        Self {
            carrier_code: carrier_code.into(),
            carrier_title: carrier_title.into(),
            show_deadline: false,
        }
    }

    /// Appends the delivery deadline to method titles, e.g. `Express (2 days)`.
    pub fn with_deadline(mut self, show_deadline: bool) -> Self {
        self.show_deadline = show_deadline;
        self
    }

    /// One rate per delivery option, in provider order.
    pub fn map(&self, response: &ProviderResponse) -> RateQuoteResult {
        let rates = response
            .content
            .delivery_options
            .iter()
            .map(|option| self.rate_for(option))
            .collect();
        RateQuoteResult { rates }
    }

    fn rate_for(&self, option: &DeliveryOption) -> CarrierRateOption {
        let method_title = match option.deadline {
            Some(days) if self.show_deadline => {
                format!("{} {}", option.description, format_deadline(days))
            }
            _ => option.description.clone(),
        };

        CarrierRateOption {
            carrier: self.carrier_code.clone(),
            carrier_title: self.carrier_title.clone(),
            method: option.description.clone(),
            method_title,
            price: option.final_shipping_cost,
            cost: option.provider_shipping_cost,
        }
    }
}

/// Human label for a deadline in days. The provider uses 101 for
/// "delivered on acknowledgment".
pub fn format_deadline(days: u32) -> String {
    match days {
        0 => "(same day)".to_string(),
        1 => "(1 day)".to_string(),
        101 => "(On acknowledgment)".to_string(),
        n => format!("({} days)", n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ProviderContent;

    fn option(description: &str, price: f64, cost: f64, deadline: Option<u32>) -> DeliveryOption {
        DeliveryOption {
            description: description.to_string(),
            final_shipping_cost: price,
            provider_shipping_cost: cost,
            deadline,
        }
    }

    fn response(options: Vec<DeliveryOption>) -> ProviderResponse {
        ProviderResponse {
            content: ProviderContent {
                delivery_options: options,
            },
        }
    }

    #[test]
    fn test_maps_options_in_order() {
        let mapper = RateMapper::new("intelipost", "E-Sprinter");
        let result = mapper.map(&response(vec![
            option("Standard", 19.90, 15.00, Some(5)),
            option("Express", 39.90, 30.00, Some(1)),
        ]));

        assert_eq!(result.len(), 2);
        assert_eq!(
            result.rates[0],
            CarrierRateOption {
                carrier: "intelipost".to_string(),
                carrier_title: "E-Sprinter".to_string(),
                method: "Standard".to_string(),
                method_title: "Standard".to_string(),
                price: 19.90,
                cost: 15.00,
            }
        );
        assert_eq!(result.rates[1].method, "Express");
        assert_eq!(result.rates[1].method_title, "Express");
        assert_eq!(result.rates[1].price, 39.90);
        assert_eq!(result.rates[1].cost, 30.00);
        assert_eq!(result.rates[1].carrier, "intelipost");
        assert_eq!(result.rates[1].carrier_title, "E-Sprinter");
    }

    #[test]
    fn test_no_options_is_empty_result() {
        let mapper = RateMapper::new("intelipost", "E-Sprinter");
        let result = mapper.map(&response(vec![]));
        assert!(result.is_empty());
    }

    #[test]
    fn test_deadline_suffix_when_enabled() {
        let mapper = RateMapper::new("intelipost", "E-Sprinter").with_deadline(true);
        let result = mapper.map(&response(vec![
            option("Express", 39.90, 30.00, Some(2)),
            option("Pickup", 0.0, 0.0, None),
        ]));

        assert_eq!(result.rates[0].method, "Express");
        assert_eq!(result.rates[0].method_title, "Express (2 days)");
        assert_eq!(result.rates[1].method_title, "Pickup");
    }

    #[test]
    fn test_format_deadline() {
        assert_eq!(format_deadline(0), "(same day)");
        assert_eq!(format_deadline(1), "(1 day)");
        assert_eq!(format_deadline(7), "(7 days)");
        assert_eq!(format_deadline(101), "(On acknowledgment)");
    }
}
