//! Weather route with a time-bounded response cache.
//!
//! Payloads are cached per `(city, unit system)` for the cache TTL. Without
//! an API credential the route serves a fixed mock payload; the mock is
//! cached too, so hit/miss behavior is identical either way. The cache lock
//! is never held while a fetch is in flight.

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;
use tracing::debug;

use crate::context::Context;
use crate::fetch::FetchError;
use crate::http::{QueryParams, Response, StatusCode};

use super::bad_query;

/// Payload served when no API credential is configured.
pub const MOCK_PAYLOAD: &str = r#"{"main":{"temp":20}}"#;

#[derive(Debug, Deserialize)]
struct WeatherPayload {
    main: MainSection,
}

#[derive(Debug, Deserialize)]
struct MainSection {
    temp: f64,
}

/// `weather?` route: the current temperature for `city` in unit `unit`
/// (`f` for Fahrenheit, anything else Celsius).
pub async fn weather(ctx: &Context, query: &str) -> Response {
    let params = match QueryParams::decode(query) {
        Ok(params) => params,
        Err(e) => return bad_query(e),
    };

    let (Some(city), Some(unit)) = (params.get("city"), params.get("unit")) else {
        return Response::plain(
            StatusCode::BadRequest,
            "Missing parameters. Usage: /weather?city=London&unit=c",
        );
    };

    let unit = unit.to_lowercase();
    let units_param = if unit == "f" { "imperial" } else { "metric" };
    let cache_key = format!("{}_{units_param}", city.to_lowercase());

    let payload = match ctx.cache.get_fresh(&cache_key).await {
        Some(payload) => {
            debug!(key = %cache_key, "weather cache hit");
            payload
        }
        None => match refresh(ctx, city, units_param, &cache_key).await {
            Ok(payload) => payload,
            Err(e) => {
                return Response::plain(
                    StatusCode::InternalServerError,
                    format!("Unexpected error: {e}"),
                );
            }
        },
    };

    let parsed: WeatherPayload = match serde_json::from_str(&payload) {
        Ok(parsed) => parsed,
        Err(e) => {
            return Response::plain(
                StatusCode::InternalServerError,
                format!("Unexpected error: {e}"),
            );
        }
    };

    let symbol = if unit == "f" { "°F" } else { "°C" };
    Response::plain(
        StatusCode::Ok,
        format!(
            "The current temperature in {city} is {}{symbol}.",
            format_temp(parsed.main.temp)
        ),
    )
}

// Obtains a fresh payload (mock or live) and unconditionally overwrites the
// cache entry for this key.
async fn refresh(
    ctx: &Context,
    city: &str,
    units_param: &str,
    cache_key: &str,
) -> Result<String, FetchError> {
    let payload = match &ctx.config.weather_api_key {
        None => MOCK_PAYLOAD.to_owned(),
        Some(key) => {
            let encoded_city = utf8_percent_encode(city, NON_ALPHANUMERIC);
            let url = format!(
                "http://api.openweathermap.org/data/2.5/weather?q={encoded_city}&appid={key}&units={units_param}"
            );
            ctx.fetcher.fetch(&url).await?
        }
    };

    debug!(key = %cache_key, "weather cache refreshed");
    ctx.cache.insert(cache_key, payload.clone()).await;
    Ok(payload)
}

/// Renders an integral temperature with one decimal (`20` → `"20.0"`),
/// everything else with its shortest form.
fn format_temp(temp: f64) -> String {
    if temp.fract() == 0.0 {
        format!("{temp:.1}")
    } else {
        format!("{temp}")
    }
}
