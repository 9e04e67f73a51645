//! Weather gateway backed by the public Open-Meteo APIs.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::config::WeatherConfig;
use crate::domain::{CityName, Coordinates, Temperature, WindSpeed};
use crate::ports::outbound::{GeocodeResult, WeatherGateway, WeatherGatewayError, WeatherReading};

/// Open-Meteo geocoding + forecast client.
pub struct OpenMeteoGateway {
    client: reqwest::Client,
    geocoding_url: String,
    forecast_url: String,
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Vec<GeocodingHit>,
}

#[derive(Debug, Deserialize)]
struct GeocodingHit {
    latitude: f64,
    longitude: f64,
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentConditions,
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    temperature_2m: f64,
    weather_code: i64,
    wind_speed_10m: f64,
}

impl OpenMeteoGateway {
    /// Build a gateway whose every request is bounded by `config.timeout_secs`.
    pub fn new(config: &WeatherConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("mcp-demo/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            geocoding_url: config.geocoding_url.clone(),
            forecast_url: config.forecast_url.clone(),
        })
    }

    async fn get_text(&self, request: reqwest::RequestBuilder) -> Result<String, WeatherGatewayError> {
        let response = request.send().await.map_err(transport_error)?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(WeatherGatewayError::Status(status.as_u16()));
        }

        response.text().await.map_err(transport_error)
    }
}

fn transport_error(e: reqwest::Error) -> WeatherGatewayError {
    if e.is_timeout() {
        WeatherGatewayError::Timeout
    } else {
        WeatherGatewayError::Network(e.to_string())
    }
}

/// Interpret a geocoding response body; the first hit wins.
fn parse_geocoding(body: &str, city: &CityName) -> Result<GeocodeResult, WeatherGatewayError> {
    let parsed: GeocodingResponse = serde_json::from_str(body)
        .map_err(|e| WeatherGatewayError::MalformedPayload(e.to_string()))?;

    let hit = parsed
        .results
        .into_iter()
        .next()
        .ok_or_else(|| WeatherGatewayError::CityNotFound(city.to_string()))?;

    Ok(GeocodeResult {
        coordinates: Coordinates::new(hit.latitude, hit.longitude)?,
        country: hit.country.unwrap_or_else(|| "Unknown".to_string()),
    })
}

/// Interpret a forecast response body.
fn parse_forecast(body: &str) -> Result<WeatherReading, WeatherGatewayError> {
    let parsed: ForecastResponse = serde_json::from_str(body)
        .map_err(|e| WeatherGatewayError::MalformedPayload(e.to_string()))?;
    let current = parsed.current;

    Ok(WeatherReading {
        temperature: Temperature::celsius(current.temperature_2m)?,
        condition_code: current.weather_code,
        wind_speed: WindSpeed::km_per_hour(current.wind_speed_10m)?,
    })
}

#[async_trait]
impl WeatherGateway for OpenMeteoGateway {
    async fn geocode(&self, city: &CityName) -> Result<GeocodeResult, WeatherGatewayError> {
        debug!(city = %city, "Geocoding city");

        let request = self.client.get(&self.geocoding_url).query(&[
            ("name", city.as_str()),
            ("count", "1"),
            ("language", "en"),
            ("format", "json"),
        ]);
        let body = self.get_text(request).await?;

        parse_geocoding(&body, city)
    }

    async fn current_weather(
        &self,
        coordinates: Coordinates,
    ) -> Result<WeatherReading, WeatherGatewayError> {
        debug!(%coordinates, "Fetching current weather");

        let latitude = format!("{:.2}", coordinates.latitude());
        let longitude = format!("{:.2}", coordinates.longitude());
        let request = self.client.get(&self.forecast_url).query(&[
            ("latitude", latitude.as_str()),
            ("longitude", longitude.as_str()),
            ("current", "temperature_2m,weather_code,wind_speed_10m"),
            ("temperature_unit", "celsius"),
        ]);
        let body = self.get_text(request).await?;

        parse_forecast(&body)
    }
}
