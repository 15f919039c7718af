// src/scenarios/inventory.rs

use crate::sampling::stream::{draw_from, DigitStream};
use crate::sampling::table::IntervalTable;
use crate::simulation::config::ConfigError;
use serde::Serialize;

/// Parameters for the periodic-review (M, N) inventory model: every N days
/// the position is reviewed and an order of `order_quantity` is placed when
/// the position has fallen to the reorder point M or below.
#[derive(Debug, Clone)]
pub struct InventoryConfig {
    pub initial_inventory: i32,
    /// N, in days.
    pub cycle_length: u32,
    /// M.
    pub reorder_point: i32,
    pub order_quantity: u32,
    pub days: u32,
    pub demand: IntervalTable<u32>,
    pub lead_time: IntervalTable<u32>,
}

/// One simulated day. Optional columns stay empty except on the days they
/// apply, mirroring the printed table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryRow {
    /// Cycle number, shown on the cycle's first day only.
    pub cycle: Option<u32>,
    pub day_in_cycle: u32,
    pub begin_inventory: i32,
    pub demand_digit: u32,
    pub demand: u32,
    pub end_inventory: i32,
    pub shortage: Option<i32>,
    pub order_placed: Option<u32>,
    pub lead_time_digit: Option<u32>,
    pub days_until_arrival: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventorySummary {
    pub avg_ending_inventory: f64,
    pub shortage_days: u32,
    pub shortage_percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryReport {
    pub rows: Vec<InventoryRow>,
    pub summary: InventorySummary,
}

pub fn simulate(
    config: &InventoryConfig,
    digits: &mut dyn DigitStream,
) -> Result<InventoryReport, ConfigError> {
    if config.cycle_length == 0 {
        return Err(ConfigError::ZeroCycleLength);
    }
    if config.days == 0 {
        return Err(ConfigError::ZeroDays);
    }

    let mut rows = Vec::with_capacity(config.days as usize);

    // Position goes negative while demand is backlogged; the displayed
    // ending inventory floors at zero and the deficit shows as shortage.
    let mut position = config.initial_inventory;
    let mut pending: Option<(u32, u32)> = None; // (arrival day, quantity)

    for day in 1..=config.days {
        let cycle = (day - 1) / config.cycle_length + 1;
        let day_in_cycle = match day % config.cycle_length {
            0 => config.cycle_length,
            d => d,
        };

        if let Some((arrival_day, quantity)) = pending {
            if day == arrival_day {
                position += quantity as i32;
                pending = None;
            }
        }

        let begin_inventory = position.max(0);

        let demand_draw = draw_from(&config.demand, digits);
        position -= demand_draw.outcome as i32;

        let (end_inventory, shortage) = if position >= 0 {
            (position, None)
        } else {
            (0, Some(-position))
        };

        // Countdown column for an order already in transit.
        let mut order_placed = None;
        let mut lead_time_digit = None;
        let mut days_until_arrival = pending
            .map(|(arrival_day, _)| (i64::from(arrival_day) - i64::from(day) - 1).max(0) as u32);

        let review_day = day % config.cycle_length == 0;
        if review_day && position <= config.reorder_point && pending.is_none() {
            let lead_draw = draw_from(&config.lead_time, digits);
            pending = Some((day + lead_draw.outcome + 1, config.order_quantity));
            order_placed = Some(config.order_quantity);
            lead_time_digit = Some(lead_draw.digit);
            days_until_arrival = Some(lead_draw.outcome);
        }

        rows.push(InventoryRow {
            cycle: (day_in_cycle == 1).then_some(cycle),
            day_in_cycle,
            begin_inventory,
            demand_digit: demand_draw.digit,
            demand: demand_draw.outcome,
            end_inventory,
            shortage,
            order_placed,
            lead_time_digit,
            days_until_arrival,
        });
    }

    let summary = summarize(&rows);
    Ok(InventoryReport { rows, summary })
}

fn summarize(rows: &[InventoryRow]) -> InventorySummary {
    let days = rows.len() as f64;
    let total_ending: i32 = rows.iter().map(|row| row.end_inventory).sum();
    let shortage_days = rows.iter().filter(|row| row.shortage.is_some()).count() as u32;

    InventorySummary {
        avg_ending_inventory: f64::from(total_ending) / days,
        shortage_days,
        shortage_percent: f64::from(shortage_days) / days * 100.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::distributions::{inventory_demand_distribution, lead_time_distribution};
    use crate::sampling::stream::ScriptedDigits;

    fn config(days: u32) -> InventoryConfig {
        InventoryConfig {
            initial_inventory: 12,
            cycle_length: 5,
            reorder_point: 6,
            order_quantity: 10,
            days,
            demand: inventory_demand_distribution(),
            lead_time: lead_time_distribution(),
        }
    }

    #[test]
    fn review_day_places_an_order_when_position_reaches_the_reorder_point() {
        // Demand digit 80 -> 3 units per day, so the position runs
        // 12, 9, 6, 3, 0, -3 over days 1..=5. Day 5 reviews at -3 <= 6;
        // lead digit 10 -> 1 day, so the order arrives on day 7.
        let mut digits = ScriptedDigits::new(vec![80, 80, 80, 80, 80, 10, 80, 80]);
        let report = simulate(&config(7), &mut digits).unwrap();

        let day5 = &report.rows[4];
        assert_eq!(day5.end_inventory, 0);
        assert_eq!(day5.shortage, Some(3));
        assert_eq!(day5.order_placed, Some(10));
        assert_eq!(day5.lead_time_digit, Some(10));
        assert_eq!(day5.days_until_arrival, Some(1));

        // Day 6 backlogs further demand; day 7 receives the 10 units
        // against a position of -6 and begins with 4 on hand.
        let day6 = &report.rows[5];
        assert_eq!(day6.begin_inventory, 0);
        assert_eq!(day6.shortage, Some(6));
        assert_eq!(day6.days_until_arrival, Some(0));

        let day7 = &report.rows[6];
        assert_eq!(day7.begin_inventory, 4);
        assert_eq!(day7.end_inventory, 1);
        assert_eq!(day7.shortage, None);
    }

    #[test]
    fn no_order_while_one_is_already_outstanding() {
        // Heavy demand (digit 95 -> 4/day) forces the position low fast;
        // lead digit 90 -> 3 days, so the day-5 order is still pending at
        // the day-10 review... arrival on day 9 clears it first.
        let mut digits = ScriptedDigits::new(vec![95]);
        let report = simulate(&config(10), &mut digits).unwrap();

        let orders: Vec<u32> = report
            .rows
            .iter()
            .filter(|row| row.order_placed.is_some())
            .map(|row| row.day_in_cycle)
            .collect();
        // Reviews happen on days 5 and 10 only.
        assert_eq!(orders.len(), 2);
        assert!(report.rows[4].order_placed.is_some());
        assert!(report.rows[9].order_placed.is_some());
    }

    #[test]
    fn cycle_numbering_restarts_the_day_counter() {
        let mut digits = ScriptedDigits::new(vec![1]);
        let report = simulate(&config(12), &mut digits).unwrap();

        assert_eq!(report.rows[0].cycle, Some(1));
        assert_eq!(report.rows[0].day_in_cycle, 1);
        assert_eq!(report.rows[4].cycle, None);
        assert_eq!(report.rows[4].day_in_cycle, 5);
        assert_eq!(report.rows[5].cycle, Some(2));
        assert_eq!(report.rows[5].day_in_cycle, 1);
        assert_eq!(report.rows[10].cycle, Some(3));
    }

    #[test]
    fn summary_counts_shortage_days_and_averages_ending_inventory() {
        let mut digits = ScriptedDigits::new(vec![80, 80, 80, 80, 80, 10, 80, 80]);
        let report = simulate(&config(7), &mut digits).unwrap();
        let summary = &report.summary;

        // Ending inventories: 9, 6, 3, 0, 0, 0, 1.
        assert!((summary.avg_ending_inventory - 19.0 / 7.0).abs() < 1e-9);
        assert_eq!(summary.shortage_days, 2);
        assert!((summary.shortage_percent - 200.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_degenerate_parameters() {
        let mut digits = ScriptedDigits::new(vec![1]);
        let mut zero_cycle = config(7);
        zero_cycle.cycle_length = 0;
        assert_eq!(
            simulate(&zero_cycle, &mut digits).unwrap_err(),
            ConfigError::ZeroCycleLength
        );

        let zero_days = config(0);
        assert_eq!(
            simulate(&zero_days, &mut digits).unwrap_err(),
            ConfigError::ZeroDays
        );
    }
}
