//! Aggregation of recorded sales into monthly and per-complex statistics.

use std::collections::BTreeMap;

use super::entities::{ComplexSummary, DealRecord, MonthlyAverage, MonthlyDealStats};

type MonthKey = (i32, u8);

fn month_key(record: &DealRecord) -> MonthKey {
    (record.deal_date.year(), u8::from(record.deal_date.month()))
}

fn group_by_month<'a, I>(records: I) -> BTreeMap<MonthKey, Vec<&'a DealRecord>>
where
    I: IntoIterator<Item = &'a DealRecord>,
{
    let mut groups: BTreeMap<MonthKey, Vec<&DealRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(month_key(record)).or_default().push(record);
    }
    groups
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0_usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

fn median(values: &mut [f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

/// Rounds to whole won, halves going to the even neighbour.
fn whole_won(value: f64) -> i64 {
    value.round_ties_even() as i64
}

/// Monthly statistics in chronological order.
pub fn monthly_stats(records: &[DealRecord]) -> Vec<MonthlyDealStats> {
    group_by_month(records)
        .into_iter()
        .map(|((year, month), deals)| {
            let mut prices: Vec<f64> = deals.iter().map(|d| d.deal_price).collect();
            MonthlyDealStats {
                year,
                month,
                avg_price: whole_won(mean(prices.iter().copied())),
                median_price: whole_won(median(&mut prices)),
                avg_price_per_m2: whole_won(mean(deals.iter().map(|d| d.deal_price / d.area_m2))),
                deal_count: deals.len(),
            }
        })
        .collect()
}

/// One summary per complex, sorted by name.
pub fn complex_summaries(records: &[DealRecord]) -> Vec<ComplexSummary> {
    let mut by_complex: BTreeMap<&str, Vec<&DealRecord>> = BTreeMap::new();
    for record in records {
        by_complex
            .entry(record.complex_name.as_str())
            .or_default()
            .push(record);
    }

    by_complex
        .into_iter()
        .map(|(name, deals)| {
            let monthly = group_by_month(deals.iter().copied())
                .into_iter()
                .map(|((year, month), group)| MonthlyAverage {
                    year,
                    month,
                    avg_price: mean(group.iter().map(|d| d.deal_price)),
                })
                .collect();
            ComplexSummary {
                name: name.to_string(),
                average_price: mean(deals.iter().map(|d| d.deal_price)).trunc() as i64,
                monthly,
            }
        })
        .collect()
}

/// Mean sale price per calendar year, for fitting a trend line.
pub fn trend_points(records: &[DealRecord]) -> Vec<(i32, f64)> {
    let mut by_year: BTreeMap<i32, Vec<f64>> = BTreeMap::new();
    for record in records {
        by_year
            .entry(record.deal_date.year())
            .or_default()
            .push(record.deal_price);
    }
    by_year
        .into_iter()
        .map(|(year, prices)| (year, mean(prices.into_iter())))
        .collect()
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    fn deal(name: &str, date: time::Date, price: f64, area: f64) -> DealRecord {
        DealRecord {
            complex_name: name.to_string(),
            deal_date: date,
            deal_price: price,
            area_m2: area,
        }
    }

    fn sample() -> Vec<DealRecord> {
        vec![
            deal("한남더힐", date!(2023 - 03 - 14), 3_000_000_000.0, 100.0),
            deal("한남더힐", date!(2023 - 03 - 02), 2_000_000_000.0, 80.0),
            deal("한남하이츠", date!(2023 - 03 - 20), 1_000_000_001.0, 50.0),
            deal("한남하이츠", date!(2022 - 11 - 05), 900_000_000.0, 60.0),
            deal("한남더힐", date!(2023 - 03 - 30), 4_000_000_000.0, 100.0),
        ]
    }

    #[test]
    fn monthly_stats_are_chronological() {
        let stats = monthly_stats(&sample());
        assert_eq!(stats.len(), 2);
        assert_eq!((stats[0].year, stats[0].month), (2022, 11));
        assert_eq!(stats[0].deal_count, 1);
        assert_eq!(stats[0].avg_price_per_m2, 15_000_000);
        assert_eq!((stats[1].year, stats[1].month), (2023, 3));
        assert_eq!(stats[1].deal_count, 4);
    }

    #[test]
    fn even_month_median_averages_middles() {
        let stats = monthly_stats(&sample());
        // 1_000_000_001, 2e9, 3e9, 4e9
        assert_eq!(stats[1].median_price, 2_500_000_000);
        assert_eq!(stats[1].avg_price, 2_500_000_000);
    }

    #[test]
    fn complex_average_truncates() {
        let summaries = complex_summaries(&sample());
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].name, "한남더힐");
        assert_eq!(summaries[0].average_price, 3_000_000_000);
        assert_eq!(summaries[1].name, "한남하이츠");
        assert_eq!(summaries[1].average_price, 950_000_000);
        assert_eq!(summaries[1].monthly.len(), 2);
    }

    #[test]
    fn trend_points_average_by_year() {
        let points = trend_points(&sample());
        assert_eq!(points[0], (2022, 900_000_000.0));
        assert_eq!(points[1].0, 2023);
    }
}
