// src/scenarios/single_server.rs

use crate::sampling::stream::{draw_from, DigitStream};
use crate::sampling::table::IntervalTable;
use crate::simulation::config::ConfigError;
use serde::Serialize;

/// Parameters for the single-server row-recurrence model. Not event-driven:
/// each customer's start time is `max(arrival, previous completion)`.
#[derive(Debug, Clone)]
pub struct SingleServerConfig {
    pub customers: u32,
    pub arrivals: IntervalTable<u32>,
    pub service: IntervalTable<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SingleServerRow {
    pub customer: u32,
    pub arrival_digit: u32,
    pub interarrival: u32,
    pub arrival: u32,
    pub service_digit: u32,
    pub service_time: u32,
    pub service_start: u32,
    pub wait: u32,
    pub service_end: u32,
    pub idle: u32,
    pub time_in_system: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SingleServerSummary {
    pub avg_wait: f64,
    pub prob_wait: f64,
    /// Busy fraction of `busy + idle` time.
    pub utilization: f64,
    pub prob_idle: f64,
    pub avg_service_time: f64,
    pub avg_time_in_system: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SingleServerReport {
    pub rows: Vec<SingleServerRow>,
    pub summary: SingleServerSummary,
}

pub fn simulate(
    config: &SingleServerConfig,
    digits: &mut dyn DigitStream,
) -> Result<SingleServerReport, ConfigError> {
    if config.customers == 0 {
        return Err(ConfigError::ZeroCustomers);
    }

    let mut rows = Vec::with_capacity(config.customers as usize);

    // First customer: the arrival digit is drawn and recorded, but the
    // interarrival is fixed at zero. Service starts the moment the doors
    // open.
    let first_arrival = draw_from(&config.arrivals, digits);
    let first_service = draw_from(&config.service, digits);
    rows.push(SingleServerRow {
        customer: 1,
        arrival_digit: first_arrival.digit,
        interarrival: 0,
        arrival: 0,
        service_digit: first_service.digit,
        service_time: first_service.outcome,
        service_start: 0,
        wait: 0,
        service_end: first_service.outcome,
        idle: 0,
        time_in_system: first_service.outcome,
    });

    let mut last_arrival = 0u32;
    let mut last_end = first_service.outcome;

    for customer in 2..=config.customers {
        let arrival_draw = draw_from(&config.arrivals, digits);
        let arrival = last_arrival + arrival_draw.outcome;
        let service_draw = draw_from(&config.service, digits);

        let (start, wait, idle) = if arrival < last_end {
            (last_end, last_end - arrival, 0)
        } else {
            (arrival, 0, arrival - last_end)
        };
        let end = start + service_draw.outcome;

        rows.push(SingleServerRow {
            customer,
            arrival_digit: arrival_draw.digit,
            interarrival: arrival_draw.outcome,
            arrival,
            service_digit: service_draw.digit,
            service_time: service_draw.outcome,
            service_start: start,
            wait,
            service_end: end,
            idle,
            time_in_system: end - arrival,
        });

        last_arrival = arrival;
        last_end = end;
    }

    let summary = summarize(&rows);
    Ok(SingleServerReport { rows, summary })
}

fn summarize(rows: &[SingleServerRow]) -> SingleServerSummary {
    let n = rows.len() as f64;
    let total_service: u32 = rows.iter().map(|row| row.service_time).sum();
    let total_idle: u32 = rows.iter().map(|row| row.idle).sum();
    let total_wait: u32 = rows.iter().map(|row| row.wait).sum();
    let waited = rows.iter().filter(|row| row.wait > 0).count() as f64;
    let total_in_system: u32 = rows.iter().map(|row| row.time_in_system).sum();

    let busy_plus_idle = f64::from(total_service + total_idle);
    let (utilization, prob_idle) = if busy_plus_idle > 0.0 {
        (
            f64::from(total_service) / busy_plus_idle,
            f64::from(total_idle) / busy_plus_idle,
        )
    } else {
        (0.0, 0.0)
    };

    SingleServerSummary {
        avg_wait: f64::from(total_wait) / n,
        prob_wait: waited / n,
        utilization,
        prob_idle,
        avg_service_time: f64::from(total_service) / n,
        avg_time_in_system: f64::from(total_in_system) / n,
    }
}
