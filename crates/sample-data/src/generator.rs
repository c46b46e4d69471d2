use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use core_types::{GridMetrics, Scalar, TimeSeriesPoint};
use std::collections::BTreeMap;
use std::f64::consts::TAU;

const CATEGORIES: [&str; 5] = ["A", "B", "C", "D", "E"];
const REGIONS: [&str; 5] = ["North", "South", "East", "West", "Central"];
const STATUSES: [&str; 4] = ["Active", "Inactive", "Pending", "Completed"];
const PRIORITIES: [&str; 3] = ["High", "Medium", "Low"];

/// A deterministic generator of sample grid data.
///
/// Seeded once at construction; the same seed produces byte-identical records
/// on every run. Timestamps are anchored to a fixed base date for the same
/// reason: nothing here reads the wall clock.
#[derive(Debug, Clone)]
pub struct SampleDataGenerator {
    state: u64,
}

impl SampleDataGenerator {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Generates `num_rows` grid records with the full production column set.
    pub fn grid_records(&mut self, num_rows: usize) -> Vec<BTreeMap<String, Scalar>> {
        (0..num_rows).map(|i| self.grid_record(i as i64 + 1)).collect()
    }

    fn grid_record(&mut self, id: i64) -> BTreeMap<String, Scalar> {
        let mut row = BTreeMap::new();
        row.insert("id".to_string(), Scalar::Int(id));
        row.insert("category".to_string(), self.pick(&CATEGORIES).into());
        row.insert("region".to_string(), self.pick(&REGIONS).into());
        row.insert("status".to_string(), self.pick(&STATUSES).into());
        row.insert(
            "value".to_string(),
            Scalar::Float(round_dp(self.uniform(10.0, 1000.0), 2)),
        );
        row.insert("quantity".to_string(), Scalar::Int(self.int_range(1, 100)));
        row.insert(
            "score".to_string(),
            Scalar::Float(round_dp(self.uniform(0.0, 100.0), 2)),
        );
        let timestamp = base_date() + Duration::days(self.int_range(0, 365));
        row.insert("timestamp".to_string(), Scalar::Timestamp(timestamp));
        row.insert("priority".to_string(), self.pick(&PRIORITIES).into());
        row.insert(
            "efficiency".to_string(),
            Scalar::Float(round_dp(self.uniform(0.5, 1.0), 3)),
        );
        row.insert(
            "cost".to_string(),
            Scalar::Float(round_dp(self.uniform(100.0, 5000.0), 2)),
        );
        row.insert(
            "revenue".to_string(),
            Scalar::Float(round_dp(self.uniform(150.0, 6000.0), 2)),
        );
        row
    }

    /// A sample of the `/metrics` payload shape.
    pub fn metrics(&mut self) -> GridMetrics {
        GridMetrics {
            total_records: self.int_range(1_000, 10_000) as u64,
            active_users: self.int_range(50, 500) as u64,
            avg_response_time: round_dp(self.uniform(0.1, 2.0), 3),
            success_rate: round_dp(self.uniform(0.85, 0.99), 4),
            uptime: round_dp(self.uniform(0.95, 0.999), 5),
            last_updated: base_date(),
        }
    }

    /// A daily series with a linear trend plus gaussian noise; `moving_avg`
    /// carries the noise-free trend line.
    pub fn time_series(&mut self, num_points: usize) -> Vec<TimeSeriesPoint> {
        let start = series_start();
        let base_value = 100.0;
        (0..num_points)
            .map(|i| {
                let trend = i as f64 * 0.5;
                let noise = self.gaussian(0.0, 10.0);
                TimeSeriesPoint {
                    date: start + Duration::days(i as i64),
                    value: round_dp((base_value + trend + noise).max(0.0), 2),
                    moving_avg: round_dp(base_value + trend, 2),
                }
            })
            .collect()
    }

    // --- Deterministic randomness ---

    // 64-bit LCG; the top 31 bits of the state are the usable output.
    fn next(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1);
        self.state >> 33
    }

    /// A uniform draw in `[0, 1)`.
    fn unit(&mut self) -> f64 {
        self.next() as f64 / (1u64 << 31) as f64
    }

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.unit() * (hi - lo)
    }

    /// An inclusive integer draw in `[lo, hi]`.
    fn int_range(&mut self, lo: i64, hi: i64) -> i64 {
        lo + (self.next() % (hi - lo + 1) as u64) as i64
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.next() as usize % items.len()]
    }

    /// Box-Muller transform over two uniform draws.
    fn gaussian(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.unit().max(f64::MIN_POSITIVE);
        let u2 = self.unit();
        mean + std_dev * (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
    }
}

/// The fixed anchor for generated timestamps: one year of history ending here.
fn base_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap()
}

fn series_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

fn round_dp(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{ColumnType, Dataset};

    #[test]
    fn same_seed_reproduces_identical_records() {
        let a = SampleDataGenerator::new(42).grid_records(25);
        let b = SampleDataGenerator::new(42).grid_records(25);
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_diverge() {
        let a = SampleDataGenerator::new(42).grid_records(25);
        let b = SampleDataGenerator::new(43).grid_records(25);
        assert_ne!(a, b);
    }

    #[test]
    fn records_carry_the_full_column_set() {
        let rows = SampleDataGenerator::new(7).grid_records(3);
        let expected = [
            "category", "cost", "efficiency", "id", "priority", "quantity", "region",
            "revenue", "score", "status", "timestamp", "value",
        ];
        for row in &rows {
            let names: Vec<&str> = row.keys().map(String::as_str).collect();
            assert_eq!(names, expected);
        }
    }

    #[test]
    fn numeric_columns_stay_in_range() {
        let mut generator = SampleDataGenerator::new(1);
        for row in generator.grid_records(200) {
            let value = row["value"].as_f64().unwrap();
            assert!((10.0..=1000.0).contains(&value));
            let efficiency = row["efficiency"].as_f64().unwrap();
            assert!((0.5..=1.0).contains(&efficiency));
            let quantity = row["quantity"].as_f64().unwrap();
            assert!((1.0..=100.0).contains(&quantity));
        }
    }

    #[test]
    fn generated_records_form_a_valid_dataset() {
        let rows = SampleDataGenerator::new(42).grid_records(50);
        let dataset = Dataset::from_records(rows).unwrap();
        assert_eq!(dataset.len(), 50);
        assert_eq!(
            dataset.schema().column("value").unwrap().kind,
            ColumnType::Numeric
        );
        assert_eq!(
            dataset.schema().column("region").unwrap().kind,
            ColumnType::Categorical
        );
    }

    #[test]
    fn time_series_is_daily_with_trend() {
        let series = SampleDataGenerator::new(9).time_series(10);
        assert_eq!(series.len(), 10);
        for window in series.windows(2) {
            assert_eq!(window[1].date - window[0].date, Duration::days(1));
            assert!(window[1].moving_avg > window[0].moving_avg);
        }
    }

    #[test]
    fn metrics_rates_are_fractions() {
        let metrics = SampleDataGenerator::new(5).metrics();
        assert!((0.85..=0.99).contains(&metrics.success_rate));
        assert!((0.95..=0.999).contains(&metrics.uptime));
    }
}
