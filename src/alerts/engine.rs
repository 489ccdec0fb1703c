//! Condition rule engine
//!
//! Evaluates a weather reading against the threshold table and produces alert
//! cards. Every family is tested independently, so one reading can raise
//! several cards. A family whose input is absent raises nothing.
//!
//! The output is stable-sorted by severity (danger, warning, info). Cards of
//! equal severity keep family order: heat wave, cold wave, UV, air quality,
//! strong wind, car wash, laundry.

use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::debug;

use super::card::{CardKind, ConditionCard, Severity};
use super::thresholds::RuleThresholds;
use crate::models::WeatherReading;

#[derive(Debug, Clone, Default)]
pub struct ConditionRuleEngine {
    thresholds: RuleThresholds,
}

impl ConditionRuleEngine {
    #[must_use]
    pub fn new(thresholds: RuleThresholds) -> Self {
        Self { thresholds }
    }

    #[must_use]
    pub fn thresholds(&self) -> &RuleThresholds {
        &self.thresholds
    }

    /// Evaluate a reading, stamping cards with the current time
    #[must_use]
    pub fn evaluate(&self, reading: &WeatherReading) -> Vec<ConditionCard> {
        self.evaluate_at(reading, Utc::now())
    }

    /// Evaluate a reading with an explicit creation timestamp
    #[must_use]
    pub fn evaluate_at(
        &self,
        reading: &WeatherReading,
        created_at: DateTime<Utc>,
    ) -> Vec<ConditionCard> {
        let t = &self.thresholds;
        let mut cards = Vec::new();

        push_card(&mut cards, heat_wave(reading, t, created_at));
        push_card(&mut cards, cold_wave(reading, t, created_at));
        push_card(&mut cards, uv_index(reading, t, created_at));
        push_card(&mut cards, air_quality(reading, t, created_at));
        push_card(&mut cards, strong_wind(reading, t, created_at));
        push_card(&mut cards, car_wash(reading, t, created_at));
        push_card(&mut cards, laundry(reading, t, created_at));

        // sort_by is stable, family order survives within a severity
        cards.sort_by(|a, b| b.severity.cmp(&a.severity));

        debug!("Evaluated reading into {} cards", cards.len());
        cards
    }
}

fn push_card(cards: &mut Vec<ConditionCard>, card: Option<ConditionCard>) {
    if let Some(card) = card {
        cards.push(card);
    }
}

fn heat_wave(
    reading: &WeatherReading,
    t: &RuleThresholds,
    created_at: DateTime<Utc>,
) -> Option<ConditionCard> {
    let temperature = reading.temperature;
    let severity = if temperature >= t.heat_danger {
        Severity::Danger
    } else if temperature >= t.heat_warning {
        Severity::Warning
    } else {
        return None;
    };

    Some(ConditionCard {
        kind: CardKind::HeatWave,
        severity,
        message: format!(
            "Heat wave: {} (feels like {:.1}°C). Avoid strenuous activity outdoors.",
            reading.format_temperature(),
            reading.feels_like
        ),
        data: json!({
            "temperature": temperature,
            "feelsLike": reading.feels_like,
        }),
        created_at,
    })
}

fn cold_wave(
    reading: &WeatherReading,
    t: &RuleThresholds,
    created_at: DateTime<Utc>,
) -> Option<ConditionCard> {
    let temperature = reading.temperature;
    let severity = if temperature <= t.cold_danger {
        Severity::Danger
    } else if temperature <= t.cold_warning {
        Severity::Warning
    } else {
        return None;
    };

    Some(ConditionCard {
        kind: CardKind::ColdWave,
        severity,
        message: format!(
            "Cold wave: {} (feels like {:.1}°C). Watch for frostbite and frozen pipes.",
            reading.format_temperature(),
            reading.feels_like
        ),
        data: json!({
            "temperature": temperature,
            "feelsLike": reading.feels_like,
        }),
        created_at,
    })
}

fn uv_index(
    reading: &WeatherReading,
    t: &RuleThresholds,
    created_at: DateTime<Utc>,
) -> Option<ConditionCard> {
    let uv = reading.uv_index?;
    let (severity, level) = if uv >= t.uv_danger {
        (Severity::Danger, "extreme")
    } else if uv >= t.uv_warning {
        (Severity::Warning, "very high")
    } else if uv >= t.uv_info {
        (Severity::Info, "high")
    } else {
        return None;
    };

    Some(ConditionCard {
        kind: CardKind::UvIndex,
        severity,
        message: format!("UV index {level} ({uv:.0}). Wear sunscreen and limit midday sun."),
        data: json!({ "uvIndex": uv }),
        created_at,
    })
}

fn air_quality(
    reading: &WeatherReading,
    t: &RuleThresholds,
    created_at: DateTime<Utc>,
) -> Option<ConditionCard> {
    let aqi = reading.air_quality?;
    let (severity, level) = if aqi >= t.air_quality_danger {
        (Severity::Danger, "very poor")
    } else if aqi >= t.air_quality_warning {
        (Severity::Warning, "poor")
    } else {
        return None;
    };

    let mut data = json!({ "airQuality": aqi });
    if let Some(pm2_5) = reading.pm2_5 {
        data["pm2_5"] = json!(pm2_5);
    }
    if let Some(pm10) = reading.pm10 {
        data["pm10"] = json!(pm10);
    }

    Some(ConditionCard {
        kind: CardKind::AirQuality,
        severity,
        message: format!("Air quality is {level} (AQI {aqi}). Wear a mask outdoors."),
        data,
        created_at,
    })
}

fn strong_wind(
    reading: &WeatherReading,
    t: &RuleThresholds,
    created_at: DateTime<Utc>,
) -> Option<ConditionCard> {
    let speed = reading.wind_speed;
    let severity = if speed >= t.wind_danger {
        Severity::Danger
    } else if speed >= t.wind_warning {
        Severity::Warning
    } else {
        return None;
    };

    Some(ConditionCard {
        kind: CardKind::StrongWind,
        severity,
        message: format!("Strong wind: {}. Secure loose objects.", reading.format_wind()),
        data: json!({ "windSpeed": speed }),
        created_at,
    })
}

fn car_wash(
    reading: &WeatherReading,
    t: &RuleThresholds,
    created_at: DateTime<Utc>,
) -> Option<ConditionCard> {
    let aqi = reading.air_quality?;
    let precipitation = reading.precipitation_probability;

    if precipitation >= t.car_wash_max_precipitation || aqi > t.car_wash_max_air_quality {
        return None;
    }

    Some(ConditionCard {
        kind: CardKind::CarWash,
        severity: Severity::Info,
        message: "Good day to wash the car: low chance of rain and clean air.".to_string(),
        data: json!({
            "precipitationProbability": precipitation,
            "airQuality": aqi,
        }),
        created_at,
    })
}

fn laundry(
    reading: &WeatherReading,
    t: &RuleThresholds,
    created_at: DateTime<Utc>,
) -> Option<ConditionCard> {
    let precipitation = reading.precipitation_probability;
    let humidity = reading.humidity;
    let wind = reading.wind_speed;

    let dry = precipitation < t.laundry_max_precipitation && humidity < t.laundry_max_humidity;
    let breezy = (t.laundry_min_wind..=t.laundry_max_wind).contains(&wind);
    if !(dry && breezy) {
        return None;
    }

    Some(ConditionCard {
        kind: CardKind::Laundry,
        severity: Severity::Info,
        message: "Good day to dry laundry outside: dry air and a light breeze.".to_string(),
        data: json!({
            "precipitationProbability": precipitation,
            "humidity": humidity,
            "windSpeed": wind,
        }),
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn stamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 8, 1, 6, 0, 0).unwrap()
    }

    fn evaluate(reading: &WeatherReading) -> Vec<ConditionCard> {
        ConditionRuleEngine::default().evaluate_at(reading, stamp())
    }

    fn kinds(cards: &[ConditionCard]) -> Vec<(CardKind, Severity)> {
        cards.iter().map(|c| (c.kind, c.severity)).collect()
    }

    /// Mild, humid, still reading that raises nothing on its own
    fn quiet_reading() -> WeatherReading {
        WeatherReading {
            temperature: 20.0,
            feels_like: 20.0,
            humidity: 80.0,
            wind_speed: 0.5,
            description: "broken clouds".to_string(),
            pressure: 1013.0,
            visibility: 10_000.0,
            precipitation_probability: 0.6,
            ..WeatherReading::default()
        }
    }

    #[test]
    fn test_quiet_reading_has_no_cards() {
        assert!(evaluate(&quiet_reading()).is_empty());
    }

    #[rstest]
    #[case(32.9, None)]
    #[case(33.0, Some(Severity::Warning))]
    #[case(34.9, Some(Severity::Warning))]
    #[case(35.0, Some(Severity::Danger))]
    #[case(41.0, Some(Severity::Danger))]
    fn test_heat_wave_boundaries(#[case] temperature: f64, #[case] expected: Option<Severity>) {
        let cards = evaluate(&WeatherReading::with_temperature(temperature));
        match expected {
            Some(severity) => assert_eq!(kinds(&cards), vec![(CardKind::HeatWave, severity)]),
            None => assert!(cards.is_empty()),
        }
    }

    #[rstest]
    #[case(-11.9, None)]
    #[case(-12.0, Some(Severity::Warning))]
    #[case(-15.0, Some(Severity::Danger))]
    #[case(-30.0, Some(Severity::Danger))]
    fn test_cold_wave_boundaries(#[case] temperature: f64, #[case] expected: Option<Severity>) {
        let cards = evaluate(&WeatherReading::with_temperature(temperature));
        match expected {
            Some(severity) => assert_eq!(kinds(&cards), vec![(CardKind::ColdWave, severity)]),
            None => assert!(cards.is_empty()),
        }
    }

    #[rstest]
    #[case(5.9, None)]
    #[case(6.0, Some(Severity::Info))]
    #[case(8.0, Some(Severity::Warning))]
    #[case(10.9, Some(Severity::Warning))]
    #[case(11.0, Some(Severity::Danger))]
    fn test_uv_boundaries(#[case] uv: f64, #[case] expected: Option<Severity>) {
        let reading = WeatherReading {
            uv_index: Some(uv),
            ..quiet_reading()
        };
        let cards = evaluate(&reading);
        match expected {
            Some(severity) => assert_eq!(kinds(&cards), vec![(CardKind::UvIndex, severity)]),
            None => assert!(cards.is_empty()),
        }
    }

    #[rstest]
    #[case(3, None)]
    #[case(4, Some(Severity::Warning))]
    #[case(5, Some(Severity::Danger))]
    fn test_air_quality_levels(#[case] aqi: u8, #[case] expected: Option<Severity>) {
        let reading = WeatherReading {
            air_quality: Some(aqi),
            ..quiet_reading()
        };
        let cards = evaluate(&reading);
        match expected {
            Some(severity) => assert_eq!(kinds(&cards), vec![(CardKind::AirQuality, severity)]),
            None => assert!(cards.is_empty()),
        }
    }

    #[rstest]
    #[case(8.9, None)]
    #[case(9.0, Some(Severity::Warning))]
    #[case(14.0, Some(Severity::Danger))]
    fn test_wind_boundaries(#[case] speed: f64, #[case] expected: Option<Severity>) {
        let reading = WeatherReading {
            wind_speed: speed,
            ..quiet_reading()
        };
        let cards = evaluate(&reading);
        match expected {
            Some(severity) => assert_eq!(kinds(&cards), vec![(CardKind::StrongWind, severity)]),
            None => assert!(cards.is_empty()),
        }
    }

    #[test]
    fn test_absent_optionals_suppress_rules() {
        let reading = WeatherReading {
            uv_index: None,
            air_quality: None,
            precipitation_probability: 0.0,
            ..quiet_reading()
        };
        let cards = evaluate(&reading);
        assert!(cards.iter().all(|c| c.kind != CardKind::UvIndex));
        assert!(cards.iter().all(|c| c.kind != CardKind::AirQuality));
        // car wash needs an air quality reading
        assert!(cards.iter().all(|c| c.kind != CardKind::CarWash));
    }

    #[test]
    fn test_car_wash_needs_dry_and_clean_air() {
        let reading = WeatherReading {
            air_quality: Some(2),
            precipitation_probability: 0.1,
            ..quiet_reading()
        };
        assert_eq!(kinds(&evaluate(&reading)), vec![(CardKind::CarWash, Severity::Info)]);

        let hazy = WeatherReading {
            air_quality: Some(3),
            ..reading.clone()
        };
        assert!(evaluate(&hazy).is_empty());

        let wet = WeatherReading {
            precipitation_probability: 0.3,
            ..reading
        };
        assert!(evaluate(&wet).is_empty());
    }

    #[test]
    fn test_laundry_needs_dry_air_and_light_breeze() {
        let reading = WeatherReading {
            humidity: 45.0,
            wind_speed: 3.0,
            precipitation_probability: 0.1,
            ..quiet_reading()
        };
        assert_eq!(kinds(&evaluate(&reading)), vec![(CardKind::Laundry, Severity::Info)]);

        for (humidity, wind, pop) in [(60.0, 3.0, 0.1), (45.0, 0.5, 0.1), (45.0, 5.5, 0.1), (45.0, 3.0, 0.2)] {
            let reading = WeatherReading {
                humidity,
                wind_speed: wind,
                precipitation_probability: pop,
                ..quiet_reading()
            };
            assert!(evaluate(&reading).is_empty(), "{humidity} {wind} {pop}");
        }
    }

    #[test]
    fn test_air_quality_payload_includes_particulates() {
        let reading = WeatherReading {
            air_quality: Some(5),
            pm2_5: Some(88.0),
            pm10: None,
            ..quiet_reading()
        };
        let cards = evaluate(&reading);
        assert_eq!(cards[0].data["airQuality"], 5);
        assert_eq!(cards[0].data["pm2_5"], 88.0);
        assert!(cards[0].data.get("pm10").is_none());
    }

    #[test]
    fn test_mixed_severities_sorted() {
        let reading = WeatherReading {
            temperature: 34.0,
            feels_like: 37.0,
            humidity: 30.0,
            wind_speed: 14.5,
            uv_index: Some(6.5),
            air_quality: Some(4),
            precipitation_probability: 0.0,
            ..WeatherReading::default()
        };
        let cards = evaluate(&reading);
        assert_eq!(
            kinds(&cards),
            vec![
                (CardKind::StrongWind, Severity::Danger),
                (CardKind::HeatWave, Severity::Warning),
                (CardKind::AirQuality, Severity::Warning),
                (CardKind::UvIndex, Severity::Info),
            ]
        );
        assert!(cards.windows(2).all(|pair| pair[0].severity >= pair[1].severity));
    }

    #[test]
    fn test_activity_cards_follow_alerts() {
        let reading = WeatherReading {
            temperature: 35.5,
            humidity: 40.0,
            wind_speed: 2.0,
            air_quality: Some(1),
            precipitation_probability: 0.0,
            ..WeatherReading::default()
        };
        assert_eq!(
            kinds(&evaluate(&reading)),
            vec![
                (CardKind::HeatWave, Severity::Danger),
                (CardKind::CarWash, Severity::Info),
                (CardKind::Laundry, Severity::Info),
            ]
        );
    }

    #[test]
    fn test_cards_are_stamped_and_deterministic() {
        let reading = WeatherReading {
            uv_index: Some(12.0),
            ..WeatherReading::with_temperature(36.0)
        };
        let first = evaluate(&reading);
        let second = evaluate(&reading);
        assert_eq!(first, second);
        assert!(first.iter().all(|c| c.created_at == stamp()));
    }

    #[test]
    fn test_messages_carry_readings() {
        let reading = WeatherReading {
            wind_speed: 14.5,
            ..WeatherReading::with_temperature(36.04)
        };
        let cards = evaluate(&reading);
        assert!(cards[0].message.starts_with("Heat wave: 36.0°C (feels like 36.0°C)"));
        assert!(cards[1].message.starts_with("Strong wind: 14.5 m/s."));

        let cards = evaluate(&WeatherReading::with_temperature(-16.0));
        assert!(cards[0].message.starts_with("Cold wave: -16.0°C"));
    }

    #[test]
    fn test_custom_thresholds() {
        let engine = ConditionRuleEngine::new(RuleThresholds {
            heat_warning: 30.0,
            ..RuleThresholds::default()
        });
        let cards = engine.evaluate_at(&WeatherReading::with_temperature(31.0), stamp());
        assert_eq!(kinds(&cards), vec![(CardKind::HeatWave, Severity::Warning)]);
    }
}
