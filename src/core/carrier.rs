use crate::core::builder::{BuildAbort, QuoteRequestBuilder};
use crate::core::client::QuoteClient;
use crate::core::mapper::RateMapper;
use crate::core::notifier::DimensionNotifier;
use crate::core::validator::{self, Rejection, ValidationOutcome};
use crate::core::{
    ConfigProvider, NotificationChannel, QuoteTransport, RateQuoteResult, SecretResolver,
    ShipmentRequest,
};
use crate::utils::error::{FreightError, Result, TransportError};
use std::collections::BTreeMap;

/// Terminal state of one quote attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum QuoteOutcome {
    Rejected(Rejection),
    Aborted(BuildAbort),
    TransportFailed(TransportError),
    Mapped(RateQuoteResult),
}

impl QuoteOutcome {
    /// `None` whenever the carrier should be left out of checkout.
    pub fn into_rates(self) -> Option<RateQuoteResult> {
        match self {
            QuoteOutcome::Mapped(result) => Some(result),
            _ => None,
        }
    }

    /// Why no rates came back, as a categorized error; `None` for `Mapped`.
    pub fn decline_error(&self) -> Option<FreightError> {
        match self {
            QuoteOutcome::Rejected(rejection) => Some(rejection.into()),
            QuoteOutcome::Aborted(abort) => Some(abort.into()),
            QuoteOutcome::TransportFailed(e) => Some(FreightError::Transport(e.clone())),
            QuoteOutcome::Mapped(_) => None,
        }
    }
}

/// Storefront-facing carrier: validate, build, call, map.
pub struct FreightCarrier<C, R, T, N>
where
    C: ConfigProvider,
    R: SecretResolver,
    T: QuoteTransport,
    N: NotificationChannel,
{
    config: C,
    secrets: R,
    transport: T,
    notifier: DimensionNotifier<N>,
}

impl<C, R, N> FreightCarrier<C, R, QuoteClient, N>
where
    C: ConfigProvider,
    R: SecretResolver,
    N: NotificationChannel,
{
    /// Carrier backed by the HTTP client, using the configured timeout.
    pub fn with_http(config: C, secrets: R, channel: N) -> Result<Self> {
        let transport = QuoteClient::new(config.request_timeout())?;
        Ok(Self::new(config, secrets, transport, channel))
    }
}

impl<C, R, T, N> FreightCarrier<C, R, T, N>
where
    C: ConfigProvider,
    R: SecretResolver,
    T: QuoteTransport,
    N: NotificationChannel,
{
    pub fn new(config: C, secrets: R, transport: T, channel: N) -> Self {
        let notifier = DimensionNotifier::new(channel, config.product_edit_url());
        Self {
            config,
            secrets,
            transport,
            notifier,
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn notifier(&self) -> &DimensionNotifier<N> {
        &self.notifier
    }

    pub fn allowed_methods(&self) -> BTreeMap<String, String> {
        BTreeMap::from([(
            self.config.carrier_code().to_string(),
            self.config.display_name().to_string(),
        )])
    }

    /// Rates to show at checkout, or `None` when this carrier sits out.
    ///
    /// Only data-integrity faults come back as `Err`.
    pub async fn collect_rates(
        &self,
        request: &ShipmentRequest,
    ) -> Result<Option<RateQuoteResult>> {
        Ok(self.quote(request).await?.into_rates())
    }

    pub async fn quote(&self, request: &ShipmentRequest) -> Result<QuoteOutcome> {
        let credentials = match validator::validate(&self.config, &self.secrets, request)? {
            ValidationOutcome::Accepted(credentials) => credentials,
            ValidationOutcome::Rejected(rejection) => {
                tracing::info!(
                    carrier = self.config.carrier_code(),
                    "Declined to quote: {}",
                    rejection
                );
                return Ok(QuoteOutcome::Rejected(rejection));
            }
        };

        let builder = QuoteRequestBuilder::new(
            self.config.origin_zip_code(),
            self.config.weight_unit(),
            self.config.dimension_policy(),
        );
        let document = match builder.build(request, &self.notifier) {
            Ok(document) => document,
            Err(abort) => {
                tracing::info!(
                    carrier = self.config.carrier_code(),
                    "Quote aborted: {}",
                    abort_label(&abort)
                );
                return Ok(QuoteOutcome::Aborted(abort));
            }
        };

        tracing::info!(
            carrier = self.config.carrier_code(),
            volumes = document.volumes.len(),
            "📡 Requesting freight quote"
        );
        let response = match self
            .transport
            .quote(self.config.api_base_url(), &credentials.api_key, &document)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(
                    carrier = self.config.carrier_code(),
                    kind = e.kind(),
                    "❌ Quote transport failed: {}",
                    e
                );
                return Ok(QuoteOutcome::TransportFailed(e));
            }
        };

        let mapper = RateMapper::new(self.config.carrier_code(), self.config.carrier_title())
            .with_deadline(self.config.show_deadline());
        let result = mapper.map(&response);
        tracing::info!(
            carrier = self.config.carrier_code(),
            rates = result.len(),
            "✅ Freight quote mapped"
        );

        Ok(QuoteOutcome::Mapped(result))
    }
}

fn abort_label(abort: &BuildAbort) -> &'static str {
    match abort {
        BuildAbort::EmptyCart => "empty cart",
        BuildAbort::MissingDimensions(_) => "products missing dimensions",
    }
}
