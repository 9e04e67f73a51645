//! Weather query use case: geocode, then fetch current conditions.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{CityName, Weather, WeatherCondition};
use crate::ports::inbound::{WeatherQueryError, WeatherQueryUseCase};
use crate::ports::outbound::{Logger, WeatherGateway, WeatherGatewayError};

pub struct WeatherQueryService {
    gateway: Arc<dyn WeatherGateway>,
    logger: Arc<dyn Logger>,
}

impl WeatherQueryService {
    pub fn new(gateway: Arc<dyn WeatherGateway>, logger: Arc<dyn Logger>) -> Self {
        Self { gateway, logger }
    }

    fn failed(&self, city: &CityName, source: WeatherGatewayError) -> WeatherQueryError {
        let error = WeatherQueryError {
            city: city.to_string(),
            source,
        };
        self.logger
            .error(&format!("Weather lookup failed for {}", city), Some(&error.source));
        error
    }
}

#[async_trait]
impl WeatherQueryUseCase for WeatherQueryService {
    async fn weather_for_city(&self, city: CityName) -> Result<Weather, WeatherQueryError> {
        self.logger
            .info(&format!("Fetching weather for city: {}", city));

        let location = self
            .gateway
            .geocode(&city)
            .await
            .map_err(|e| self.failed(&city, e))?;
        self.logger.info(&format!(
            "City located at coordinates: {}",
            location.coordinates
        ));

        let reading = self
            .gateway
            .current_weather(location.coordinates)
            .await
            .map_err(|e| self.failed(&city, e))?;

        let weather = Weather {
            city,
            country: location.country,
            temperature: reading.temperature,
            condition: WeatherCondition::from_wmo_code(reading.condition_code),
            wind_speed: reading.wind_speed,
        };

        self.logger
            .info(&format!("Fetched weather for {}", weather.city));
        Ok(weather)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::inbound::FailureKind;
    use crate::testing::{RecordingLogger, ScriptedWeather};
    use std::sync::atomic::Ordering;

    fn city(name: &str) -> CityName {
        CityName::new(name).unwrap()
    }

    #[tokio::test]
    async fn test_assembles_weather() {
        let service = WeatherQueryService::new(
            Arc::new(ScriptedWeather::sunny()),
            Arc::new(RecordingLogger::default()),
        );

        let weather = service.weather_for_city(city("Paris")).await.unwrap();
        assert_eq!(weather.country, "France");
        assert_eq!(weather.condition, WeatherCondition::PartlyCloudy);
        assert_eq!(
            weather.format(),
            "Weather in Paris (France):\nTemperature: 21.5°C\nCondition: Partly cloudy\nWind: 11.0 km/h"
        );
    }

    #[tokio::test]
    async fn test_geocode_failure_skips_weather_call() {
        let gateway = Arc::new(ScriptedWeather::failing_geocode(
            WeatherGatewayError::CityNotFound("Atlantis".to_string()),
        ));
        let logger = Arc::new(RecordingLogger::default());
        let service = WeatherQueryService::new(gateway.clone(), logger.clone());

        let err = service.weather_for_city(city("Atlantis")).await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::NotFound);
        assert_eq!(
            err.to_string(),
            "Failed to fetch weather for Atlantis: City not found: Atlantis"
        );
        assert_eq!(gateway.weather_calls.load(Ordering::SeqCst), 0);
        assert!(logger
            .lines()
            .iter()
            .any(|l| l.starts_with("ERROR Weather lookup failed for Atlantis")));
    }

    #[tokio::test]
    async fn test_timeout_is_unavailable() {
        let service = WeatherQueryService::new(
            Arc::new(ScriptedWeather::failing_reading(WeatherGatewayError::Timeout)),
            Arc::new(RecordingLogger::default()),
        );

        let err = service.weather_for_city(city("Paris")).await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::Unavailable);
        assert_eq!(err.source, WeatherGatewayError::Timeout);
    }
}
