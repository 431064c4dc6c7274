use crate::models::{Entry, EntryLog, MonthlyAverage, Summary, YearlyAverage};
use chrono::Datelike;
use std::collections::BTreeMap;

pub fn summarize(log: &EntryLog) -> Option<Summary> {
    let latest = log.latest()?.clone();

    Some(Summary {
        latest,
        monthly_averages: monthly_averages(log),
        yearly_averages: yearly_averages(log),
    })
}

pub fn monthly_averages(log: &EntryLog) -> Vec<MonthlyAverage> {
    group_by(log, month_key)
        .into_iter()
        .map(|((year, month), totals)| MonthlyAverage {
            month: format!("{year:04}-{month:02}"),
            entries: totals.count,
            avg_weight_kg: totals.mean(totals.weight_kg),
            avg_calories: totals.mean(totals.calories),
            avg_steps: totals.mean(totals.steps),
        })
        .collect()
}

pub fn yearly_averages(log: &EntryLog) -> Vec<YearlyAverage> {
    group_by(log, year_key)
        .into_iter()
        .map(|(year, totals)| YearlyAverage {
            year,
            entries: totals.count,
            avg_weight_kg: totals.mean(totals.weight_kg),
            avg_calories: totals.mean(totals.calories),
            avg_steps: totals.mean(totals.steps),
        })
        .collect()
}

#[derive(Debug, Default)]
struct Totals {
    count: usize,
    weight_kg: f64,
    calories: f64,
    steps: f64,
}

impl Totals {
    fn add(&mut self, entry: &Entry) {
        self.count += 1;
        self.weight_kg += entry.weight_kg;
        self.calories += f64::from(entry.calories);
        self.steps += f64::from(entry.steps);
    }

    fn mean(&self, sum: f64) -> f64 {
        // Groups only exist once an entry landed in them.
        sum / self.count as f64
    }
}

fn group_by<K: Ord>(log: &EntryLog, key: impl Fn(&Entry) -> K) -> BTreeMap<K, Totals> {
    log.iter().fold(BTreeMap::new(), |mut groups, entry| {
        groups.entry(key(entry)).or_insert_with(Totals::default).add(entry);
        groups
    })
}

fn month_key(entry: &Entry) -> (i32, u32) {
    (entry.date.year(), entry.date.month())
}

fn year_key(entry: &Entry) -> i32 {
    entry.date.year()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;

    fn entry(date: &str, weight_kg: f64, calories: u32, steps: u32) -> Entry {
        Entry {
            date: date.parse().unwrap(),
            height_cm: 170.0,
            age_years: 25,
            gender: Gender::Female,
            weight_kg,
            calories,
            steps,
        }
    }

    fn sample_log() -> EntryLog {
        let mut log = EntryLog::new();
        log.push(entry("2024-01-05", 70.0, 2000, 4000));
        log.push(entry("2024-01-20", 72.0, 2200, 6000));
        log.push(entry("2024-02-01", 75.0, 1800, 9000));
        log
    }

    #[test]
    fn monthly_averages_group_by_month() {
        let months = monthly_averages(&sample_log());

        assert_eq!(months.len(), 2);
        assert_eq!(months[0].month, "2024-01");
        assert_eq!(months[0].entries, 2);
        assert_eq!(months[0].avg_weight_kg, 71.0);
        assert_eq!(months[0].avg_calories, 2100.0);
        assert_eq!(months[0].avg_steps, 5000.0);
        assert_eq!(months[1].month, "2024-02");
        assert_eq!(months[1].avg_weight_kg, 75.0);
    }

    #[test]
    fn yearly_averages_group_by_year() {
        let years = yearly_averages(&sample_log());

        assert_eq!(years.len(), 1);
        assert_eq!(years[0].year, 2024);
        assert_eq!(years[0].entries, 3);
        assert!((years[0].avg_weight_kg - 217.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn buckets_are_ascending_regardless_of_insertion_order() {
        let mut log = EntryLog::new();
        log.push(entry("2025-03-02", 80.0, 2000, 5000));
        log.push(entry("2023-11-30", 82.0, 2000, 5000));
        log.push(entry("2025-03-15", 78.0, 2000, 5000));
        log.push(entry("2024-06-01", 81.0, 2000, 5000));

        let months: Vec<String> = monthly_averages(&log).into_iter().map(|m| m.month).collect();
        assert_eq!(months, vec!["2023-11", "2024-06", "2025-03"]);

        let years: Vec<i32> = yearly_averages(&log).into_iter().map(|y| y.year).collect();
        assert_eq!(years, vec![2023, 2024, 2025]);
    }

    #[test]
    fn summary_latest_is_last_added() {
        let mut log = sample_log();
        log.push(entry("2023-12-31", 90.0, 2500, 1000));

        let summary = summarize(&log).expect("summary");
        assert_eq!(summary.latest.date.to_string(), "2023-12-31");
        assert_eq!(summary.latest.weight_kg, 90.0);
    }

    #[test]
    fn empty_log_has_no_summary() {
        assert!(summarize(&EntryLog::new()).is_none());
        assert!(monthly_averages(&EntryLog::new()).is_empty());
    }
}
