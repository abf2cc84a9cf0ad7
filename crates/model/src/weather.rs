use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ExampleData;

/// Weather condition categories derived from WMO weather codes.
/// See <https://open-meteo.com/en/docs#weathervariables>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum WeatherCondition {
    Clear,
    Cloudy,
    Fog,
    Rain,
    Snow,
    Thunderstorm,
    Variable,
}

impl WeatherCondition {
    pub fn from_wmo_code(code: i32) -> Self {
        match code {
            0 => Self::Clear,
            1..=3 => Self::Cloudy,
            45..=48 => Self::Fog,
            51..=67 => Self::Rain,
            71..=77 => Self::Snow,
            95.. => Self::Thunderstorm,
            _ => Self::Variable,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Clear => "Clear sky",
            Self::Cloudy => "Cloudy",
            Self::Fog => "Fog",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::Thunderstorm => "Thunderstorm",
            Self::Variable => "Variable",
        }
    }

    pub fn icon(&self, is_day: bool) -> &'static str {
        match (self, is_day) {
            (Self::Clear, true) => "☀️",
            (Self::Clear, false) => "🌙",
            (Self::Cloudy, true) => "🌤️",
            (Self::Cloudy, false) => "☁️",
            (Self::Fog, _) => "🌫️",
            (Self::Rain, _) => "🌧️",
            (Self::Snow, _) => "❄️",
            (Self::Thunderstorm, _) => "⚡",
            (Self::Variable, _) => "🌤️",
        }
    }
}

/// Current weather at a single location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    /// Air temperature two meters above ground, in °C.
    pub temperature: f64,
    pub weather_code: i32,
    pub is_day: bool,
    pub condition: WeatherCondition,
    pub description: String,
    pub icon: String,
}

impl WeatherReport {
    pub fn new(temperature: f64, weather_code: i32, is_day: bool) -> Self {
        let condition = WeatherCondition::from_wmo_code(weather_code);
        Self {
            temperature,
            weather_code,
            is_day,
            condition,
            description: condition.description().to_owned(),
            icon: condition.icon(is_day).to_owned(),
        }
    }
}

impl ExampleData for WeatherReport {
    fn example_data() -> Self {
        Self::new(21.5, 1, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_wmo_code_ranges() {
        assert_eq!(WeatherCondition::from_wmo_code(0), WeatherCondition::Clear);
        assert_eq!(WeatherCondition::from_wmo_code(3), WeatherCondition::Cloudy);
        assert_eq!(WeatherCondition::from_wmo_code(48), WeatherCondition::Fog);
        assert_eq!(WeatherCondition::from_wmo_code(61), WeatherCondition::Rain);
        assert_eq!(WeatherCondition::from_wmo_code(67), WeatherCondition::Rain);
        assert_eq!(WeatherCondition::from_wmo_code(75), WeatherCondition::Snow);
        assert_eq!(
            WeatherCondition::from_wmo_code(99),
            WeatherCondition::Thunderstorm
        );
        assert_eq!(WeatherCondition::from_wmo_code(50), WeatherCondition::Variable);
        assert_eq!(WeatherCondition::from_wmo_code(80), WeatherCondition::Variable);
    }

    #[test]
    fn icons_depend_on_daylight() {
        assert_eq!(WeatherReport::new(10.0, 0, false).icon, "🌙");
        assert_eq!(WeatherReport::new(10.0, 2, false).icon, "☁️");
        assert_eq!(WeatherReport::new(10.0, 2, true).icon, "🌤️");
        assert_eq!(WeatherReport::new(10.0, 95, false).icon, "⚡");
    }
}
