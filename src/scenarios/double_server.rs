// src/scenarios/double_server.rs

use crate::sampling::stream::{draw_from, DigitStream};
use crate::sampling::table::IntervalTable;
use crate::simulation::config::ConfigError;
use serde::Serialize;

/// Parameters for the two-server (Able and Baker) row-recurrence model.
/// Each server has its own service-time distribution; an arriving customer
/// goes to whichever server frees first, server 1 preferred on ties.
#[derive(Debug, Clone)]
pub struct DoubleServerConfig {
    pub customers: u32,
    pub arrivals: IntervalTable<u32>,
    pub server1_service: IntervalTable<u32>,
    pub server2_service: IntervalTable<u32>,
}

/// Per-customer row. The columns of the inactive server hold zeros.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DoubleServerRow {
    pub customer: u32,
    pub arrival_digit: u32,
    pub interarrival: u32,
    pub arrival: u32,
    pub service_digit: u32,
    pub server1_time: u32,
    pub server1_begin: u32,
    pub server1_end: u32,
    pub server2_time: u32,
    pub server2_begin: u32,
    pub server2_end: u32,
    pub wait: u32,
    pub time_in_system: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoubleServerSummary {
    /// Latest completion time across both servers.
    pub time_horizon: u32,
    pub avg_wait: f64,
    pub prob_wait: f64,
    pub server1_utilization: f64,
    pub server2_utilization: f64,
    /// Combined busy time over twice the horizon.
    pub system_utilization: f64,
    pub server1_idle_prob: f64,
    pub server2_idle_prob: f64,
    pub avg_service_time: f64,
    pub avg_time_in_system: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DoubleServerReport {
    pub rows: Vec<DoubleServerRow>,
    pub summary: DoubleServerSummary,
}

pub fn simulate(
    config: &DoubleServerConfig,
    digits: &mut dyn DigitStream,
) -> Result<DoubleServerReport, ConfigError> {
    if config.customers == 0 {
        return Err(ConfigError::ZeroCustomers);
    }

    let mut rows = Vec::with_capacity(config.customers as usize);

    // First customer arrives at time zero and is served by server 1.
    let first_arrival = draw_from(&config.arrivals, digits);
    let first_service = draw_from(&config.server1_service, digits);
    rows.push(DoubleServerRow {
        customer: 1,
        arrival_digit: first_arrival.digit,
        interarrival: 0,
        arrival: 0,
        service_digit: first_service.digit,
        server1_time: first_service.outcome,
        server1_begin: 0,
        server1_end: first_service.outcome,
        server2_time: 0,
        server2_begin: 0,
        server2_end: 0,
        wait: 0,
        time_in_system: first_service.outcome,
    });

    let mut last_arrival = 0u32;
    let mut server1_free_at = first_service.outcome;
    let mut server2_free_at = 0u32;

    for customer in 2..=config.customers {
        let arrival_draw = draw_from(&config.arrivals, digits);
        let arrival = last_arrival + arrival_draw.outcome;

        let serve_on_1 = server1_free_at <= server2_free_at;
        let free_at = if serve_on_1 {
            server1_free_at
        } else {
            server2_free_at
        };
        let (start, wait) = if arrival < free_at {
            (free_at, free_at - arrival)
        } else {
            (arrival, 0)
        };

        let service_table = if serve_on_1 {
            &config.server1_service
        } else {
            &config.server2_service
        };
        let service_draw = draw_from(service_table, digits);
        let end = start + service_draw.outcome;

        let mut row = DoubleServerRow {
            customer,
            arrival_digit: arrival_draw.digit,
            interarrival: arrival_draw.outcome,
            arrival,
            service_digit: service_draw.digit,
            server1_time: 0,
            server1_begin: 0,
            server1_end: 0,
            server2_time: 0,
            server2_begin: 0,
            server2_end: 0,
            wait,
            time_in_system: end - arrival,
        };
        if serve_on_1 {
            row.server1_time = service_draw.outcome;
            row.server1_begin = start;
            row.server1_end = end;
            server1_free_at = end;
        } else {
            row.server2_time = service_draw.outcome;
            row.server2_begin = start;
            row.server2_end = end;
            server2_free_at = end;
        }
        rows.push(row);

        last_arrival = arrival;
    }

    let summary = summarize(&rows, server1_free_at.max(server2_free_at));
    Ok(DoubleServerReport { rows, summary })
}

fn summarize(rows: &[DoubleServerRow], time_horizon: u32) -> DoubleServerSummary {
    let n = rows.len() as f64;
    let busy1: u32 = rows.iter().map(|row| row.server1_time).sum();
    let busy2: u32 = rows.iter().map(|row| row.server2_time).sum();
    let total_wait: u32 = rows.iter().map(|row| row.wait).sum();
    let waited = rows.iter().filter(|row| row.wait > 0).count() as f64;
    let total_in_system: u32 = rows.iter().map(|row| row.time_in_system).sum();

    let horizon = f64::from(time_horizon);
    let ratio = |busy: u32| if horizon > 0.0 { f64::from(busy) / horizon } else { 0.0 };

    DoubleServerSummary {
        time_horizon,
        avg_wait: f64::from(total_wait) / n,
        prob_wait: waited / n,
        server1_utilization: ratio(busy1),
        server2_utilization: ratio(busy2),
        system_utilization: ratio(busy1 + busy2) / 2.0,
        server1_idle_prob: ratio(time_horizon.saturating_sub(busy1)),
        server2_idle_prob: ratio(time_horizon.saturating_sub(busy2)),
        avg_service_time: f64::from(busy1 + busy2) / n,
        avg_time_in_system: f64::from(total_in_system) / n,
    }
}
