//! Forecast port — where weather forecasts come from.

use std::future::Future;
use std::sync::Arc;

use weatherbulb_domain::error::WeatherBulbError;
use weatherbulb_domain::forecast::ForecastWindow;
use weatherbulb_domain::id::ZipCode;

/// Source of 3-hour forecasts, nearest sample first.
pub trait ForecastProvider: Send + Sync {
    /// Fetch the forecast for a US zip code, temperatures in Fahrenheit.
    fn fetch_forecast(
        &self,
        zip_code: &ZipCode,
    ) -> impl Future<Output = Result<ForecastWindow, WeatherBulbError>> + Send;
}

impl<T: ForecastProvider> ForecastProvider for Arc<T> {
    fn fetch_forecast(
        &self,
        zip_code: &ZipCode,
    ) -> impl Future<Output = Result<ForecastWindow, WeatherBulbError>> + Send {
        (**self).fetch_forecast(zip_code)
    }
}
