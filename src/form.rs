use crate::models::{Entry, Gender};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDomain {
    pub name: &'static str,
    pub label: &'static str,
    pub default: f64,
    pub min: f64,
    pub max: f64,
    pub integer: bool,
}

impl FieldDomain {
    pub fn clamp(&self, value: f64) -> f64 {
        let value = if self.integer { value.round() } else { value };
        value.clamp(self.min, self.max)
    }

    pub fn resolve(&self, value: Option<f64>) -> f64 {
        match value {
            Some(value) if value.is_finite() => self.clamp(value),
            Some(value) => {
                warn!(field = self.name, %value, "non-finite input, using default");
                self.default
            }
            None => self.default,
        }
    }

    fn resolve_u32(&self, value: Option<f64>) -> u32 {
        // Bounds are non-negative and well inside u32.
        self.resolve(value) as u32
    }

    pub fn step(&self) -> &'static str {
        if self.integer { "1" } else { "any" }
    }
}

pub const HEIGHT: FieldDomain = FieldDomain {
    name: "height_cm",
    label: "Height (cm)",
    default: 170.0,
    min: 50.0,
    max: 250.0,
    integer: false,
};

pub const AGE: FieldDomain = FieldDomain {
    name: "age_years",
    label: "Age",
    default: 25.0,
    min: 1.0,
    max: 120.0,
    integer: true,
};

pub const WEIGHT: FieldDomain = FieldDomain {
    name: "weight_kg",
    label: "Weight (kg)",
    default: 60.0,
    min: 20.0,
    max: 200.0,
    integer: false,
};

pub const CALORIES: FieldDomain = FieldDomain {
    name: "calories",
    label: "Calories Consumed",
    default: 2000.0,
    min: 0.0,
    max: 10000.0,
    integer: true,
};

pub const STEPS: FieldDomain = FieldDomain {
    name: "steps",
    label: "Steps Walked",
    default: 5000.0,
    min: 0.0,
    max: 100000.0,
    integer: true,
};

/// Body of an add action, shared by the HTML form and the JSON API.
#[derive(Debug, Default, Deserialize)]
pub struct EntryInput {
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub height_cm: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub age_years: Option<f64>,
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub weight_kg: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub calories: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub steps: Option<f64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
}

/// Form bodies carry numbers as text and send cleared inputs as `""`.
/// Blank or unreadable text becomes `None` so the field default applies.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<RawNumber>::deserialize(deserializer)? {
        None => None,
        Some(RawNumber::Number(value)) => Some(value),
        Some(RawNumber::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                None
            } else {
                let parsed = text.parse::<f64>().ok();
                if parsed.is_none() {
                    warn!(input = text, "unreadable number, using default");
                }
                parsed
            }
        }
    };
    Ok(value)
}

impl EntryInput {
    pub fn into_entry(self, today: NaiveDate) -> Entry {
        let date = match self.date.as_deref().map(str::trim) {
            None | Some("") => today,
            Some(raw) => parse_date(raw).unwrap_or_else(|| {
                warn!(input = raw, "unreadable date, using today");
                today
            }),
        };

        let gender = match self.gender.as_deref() {
            None => Gender::default(),
            Some(raw) => Gender::parse(raw).unwrap_or_else(|| {
                warn!(input = raw, "unknown gender, using default");
                Gender::default()
            }),
        };

        Entry {
            date,
            height_cm: HEIGHT.resolve(self.height_cm),
            age_years: AGE.resolve_u32(self.age_years),
            gender,
            weight_kg: WEIGHT.resolve(self.weight_kg),
            calories: CALORIES.resolve_u32(self.calories),
            steps: STEPS.resolve_u32(self.steps),
        }
    }
}

/// Accepts a bare date or a timestamp; timestamps are truncated to the day.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(stamp.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|stamp| stamp.date())
}
