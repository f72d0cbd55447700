use anyhow::Result;
use freight_quote::core::{CartLine, ProductDimensions, ShipmentRequest};
use freight_quote::utils::error::FreightError;
use freight_quote::{
    FreightCarrier, LogChannel, PlainTextSecrets, QuoteOutcome, TomlConfig, TransportError,
};
use httpmock::prelude::*;
use std::time::Duration;

fn config_for(base_url: &str) -> Result<TomlConfig> {
    let content = format!(
        r#"
[carrier]
active = true
name = "Intelipost"
origin_zip_code = "01310-100"
weight_unit = "gr"

[api]
base_url = "{}"
timeout_seconds = 1

[credentials]
account = "store-42"
password = "secret"
api_key = "key-123"
token = "tok-456"
"#,
        base_url
    );
    Ok(TomlConfig::from_toml_str(&content)?)
}

fn http_carrier(
    base_url: &str,
) -> Result<FreightCarrier<TomlConfig, PlainTextSecrets, freight_quote::QuoteClient, LogChannel>> {
    Ok(FreightCarrier::with_http(
        config_for(base_url)?,
        PlainTextSecrets,
        LogChannel,
    )?)
}

fn cart_line(product_id: u64, quantity: u32, unit_weight: f64, unit_price: f64) -> CartLine {
    CartLine {
        product_id,
        name: format!("Product {}", product_id),
        quantity,
        unit_weight,
        unit_price,
        dimensions: ProductDimensions {
            width: Some(15.0),
            height: Some(10.0),
            length: Some(20.0),
        },
    }
}

fn request() -> ShipmentRequest {
    ShipmentRequest {
        destination_zip_code: "22290-030".to_string(),
        package_weight: 1500.0,
        package_value: 88.5,
        lines: vec![cart_line(1, 3, 500.0, 29.5)],
    }
}

#[tokio::test]
async fn test_end_to_end_quote_with_real_http() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/quote")
            .header("api_key", "key-123")
            .json_body(serde_json::json!({
                "origin_zip_code": "01310100",
                "destination_zip_code": "22290030",
                "volumes": [{
                    "volume_type": "BOX",
                    "width": 15.0,
                    "height": 10.0,
                    "length": 20.0,
                    "weight": 1.5,
                    "cost_of_goods": 88.5
                }]
            }));
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "status": "OK",
                "content": {
                    "delivery_options": [
                        {
                            "description": "Standard",
                            "final_shipping_cost": 19.90,
                            "provider_shipping_cost": 15.00,
                            "deadline": 5
                        },
                        {
                            "description": "Express",
                            "final_shipping_cost": 39.90,
                            "provider_shipping_cost": 30.00,
                            "deadline": 1
                        }
                    ]
                }
            }));
    });

    let carrier = http_carrier(&server.base_url())?;
    let rates = carrier.collect_rates(&request()).await?.expect("rates");

    api_mock.assert();
    assert_eq!(rates.len(), 2);
    assert_eq!(rates.rates[0].carrier, "intelipost");
    assert_eq!(rates.rates[0].carrier_title, "E-Sprinter");
    assert_eq!(rates.rates[0].method, "Standard");
    assert_eq!(rates.rates[0].method_title, "Standard");
    assert_eq!(rates.rates[0].price, 19.90);
    assert_eq!(rates.rates[0].cost, 15.00);
    assert_eq!(rates.rates[1].method, "Express");
    assert_eq!(rates.rates[1].price, 39.90);
    assert_eq!(rates.rates[1].cost, 30.00);
    Ok(())
}

#[tokio::test]
async fn test_deadline_titles_when_enabled() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/quote");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "content": {
                    "delivery_options": [
                        {
                            "description": "Express",
                            "final_shipping_cost": 39.90,
                            "provider_shipping_cost": 30.00,
                            "deadline": 1
                        }
                    ]
                }
            }));
    });

    let mut config = config_for(&server.base_url())?;
    config.carrier.show_deadline = Some(true);

    let carrier = FreightCarrier::with_http(config, PlainTextSecrets, LogChannel)?;
    let rates = carrier.collect_rates(&request()).await?.expect("rates");

    assert_eq!(rates.rates[0].method, "Express");
    assert_eq!(rates.rates[0].method_title, "Express (1 day)");
    Ok(())
}

#[tokio::test]
async fn test_provider_error_is_no_quote() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/quote");
        then.status(500).body("internal error");
    });

    let carrier = http_carrier(&server.base_url())?;

    let outcome = carrier.quote(&request()).await?;
    api_mock.assert();
    assert!(matches!(
        outcome,
        QuoteOutcome::TransportFailed(TransportError::Status { status: 500, .. })
    ));
    Ok(())
}

#[tokio::test]
async fn test_timeout_is_no_quote() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/quote");
        then.status(200)
            .delay(Duration::from_secs(3))
            .json_body(serde_json::json!({"content": {"delivery_options": []}}));
    });

    let carrier = http_carrier(&server.base_url())?;

    let outcome = carrier.quote(&request()).await?;
    assert_eq!(
        outcome,
        QuoteOutcome::TransportFailed(TransportError::Timeout {
            timeout: Duration::from_secs(1)
        })
    );
    Ok(())
}

#[tokio::test]
async fn test_refused_connection_is_no_quote() -> Result<()> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    drop(listener);

    let carrier = http_carrier(&format!("http://{}", addr))?;

    let outcome = carrier.quote(&request()).await?;
    assert!(matches!(
        outcome,
        QuoteOutcome::TransportFailed(TransportError::Connection(_))
    ));
    let reason = outcome.decline_error().expect("decline reason");
    assert!(matches!(
        reason,
        FreightError::Transport(TransportError::Connection(_))
    ));
    assert!(carrier.collect_rates(&request()).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_zero_quantity_line_makes_no_http_call() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/quote");
        then.status(200);
    });

    let carrier = http_carrier(&server.base_url())?;
    let mut request = request();
    request.lines.push(cart_line(2, 0, 250.0, 10.0));

    let outcome = carrier.quote(&request).await?;
    assert!(matches!(outcome, QuoteOutcome::Rejected(_)));
    api_mock.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn test_invalid_zip_makes_no_http_call() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/quote");
        then.status(200);
    });

    let carrier = http_carrier(&server.base_url())?;
    let mut request = request();
    request.destination_zip_code = "2229".to_string();

    let rates = carrier.collect_rates(&request).await?;
    assert!(rates.is_none());
    api_mock.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn test_empty_cart_makes_no_http_call() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/quote");
        then.status(200);
    });

    let carrier = http_carrier(&server.base_url())?;
    let mut request = request();
    request.lines.clear();

    let rates = carrier.collect_rates(&request).await?;
    assert!(rates.is_none());
    api_mock.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn test_unset_credentials_decline_without_http_call() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/quote");
        then.status(200);
    });

    let mut config = config_for(&server.base_url())?;
    config.credentials.api_key = Some("${FREIGHT_QUOTE_NEVER_SET}".to_string());

    let carrier = FreightCarrier::with_http(config, PlainTextSecrets, LogChannel)?;
    let outcome = carrier.quote(&request()).await?;

    assert!(matches!(outcome, QuoteOutcome::Rejected(_)));
    api_mock.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn test_zero_weight_raises() -> Result<()> {
    let server = MockServer::start();
    let carrier = http_carrier(&server.base_url())?;
    let mut request = request();
    request.package_weight = 0.0;

    let err = carrier.collect_rates(&request).await.unwrap_err();
    assert!(matches!(err, FreightError::DataIntegrityError { .. }));
    Ok(())
}

#[tokio::test]
async fn test_allowed_methods_uses_display_name() -> Result<()> {
    let carrier = FreightCarrier::with_http(
        config_for("http://localhost:8080")?,
        PlainTextSecrets,
        LogChannel,
    )?;

    let methods = carrier.allowed_methods();
    assert_eq!(methods.get("intelipost").map(String::as_str), Some("Intelipost"));
    Ok(())
}
