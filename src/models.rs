use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Gender {
    #[default]
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|gender| gender.label().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One logged day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub date: NaiveDate,
    pub height_cm: f64,
    pub age_years: u32,
    pub gender: Gender,
    pub weight_kg: f64,
    pub calories: u32,
    pub steps: u32,
}

/// Entries of one session, kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct EntryLog {
    entries: Vec<Entry>,
}

impl EntryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Last appended entry, whatever its date.
    pub fn latest(&self) -> Option<&Entry> {
        self.entries.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// Entries ordered by date ascending, paired with their 1-based insertion
    /// position. Same-day entries keep insertion order.
    pub fn chronological(&self) -> Vec<(usize, &Entry)> {
        let mut rows: Vec<(usize, &Entry)> = self
            .entries
            .iter()
            .enumerate()
            .map(|(index, entry)| (index + 1, entry))
            .collect();
        rows.sort_by_key(|(_, entry)| entry.date);
        rows
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyAverage {
    pub month: String,
    pub entries: usize,
    pub avg_weight_kg: f64,
    pub avg_calories: f64,
    pub avg_steps: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyAverage {
    pub year: i32,
    pub entries: usize,
    pub avg_weight_kg: f64,
    pub avg_calories: f64,
    pub avg_steps: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub latest: Entry,
    pub monthly_averages: Vec<MonthlyAverage>,
    pub yearly_averages: Vec<YearlyAverage>,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub entries: usize,
    pub summary: Option<Summary>,
}
