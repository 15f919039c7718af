// src/simulation/engine.rs

use crate::sampling::stream::{draw_from, DigitStream};
use crate::simulation::config::EngineConfig;
use crate::simulation::fel::{Event, EventKind, FutureEventList};
use crate::simulation::stats::TimeWeightedStats;
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt::Write as _;

/// How many pending events the trace's FEL column shows.
const FEL_PREVIEW_LEN: usize = 5;

/// Why a run ended. Both bounds are armed on every run; whichever is
/// satisfied first wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StopReason {
    TimeLimitReached,
    CountLimitReached,
    EventListExhausted,
}

// Serialize so the trace can be written straight to CSV.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceRow {
    pub clock: f64,
    /// Event label, e.g. "Arr(C3)" or "Dep(C3)".
    pub event: String,
    /// Queue length after the event's handler ran.
    pub queue_length: usize,
    /// Server-busy indicator after the handler ran (0 or 1).
    pub server_busy: u32,
    /// Up to five pending events as "(kind,time)" pairs.
    pub fel_preview: String,
    /// Running number-in-system area.
    pub area_num_in_system: f64,
    pub departures: u32,
    /// Running server-busy area.
    pub area_server_busy: f64,
    pub max_queue_length: usize,
}

/// End-of-run performance measures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub total_time: f64,
    pub departures: u32,
    pub max_queue_length: usize,
    pub utilization: f64,
    pub avg_number_in_system: f64,
    pub avg_queue_length: f64,
}

/// Next-event time-advance simulation of a single-server queue.
///
/// The clock jumps from event to event; between jumps the time-weighted
/// accumulators are charged with the state that held over the closing
/// interval. One value drives exactly one run: construct a fresh instance
/// (and a fresh digit stream) per invocation.
pub struct EventSchedulingSim {
    config: EngineConfig,

    clock: f64,
    /// Customer currently in service, if any.
    in_service: Option<u32>,
    queue: VecDeque<u32>,
    fel: FutureEventList,
    stats: TimeWeightedStats,

    departures: u32,
    max_queue_length: usize,
    next_customer: u32,
    stop_reason: Option<StopReason>,

    pub history: Vec<TraceRow>,
}

impl EventSchedulingSim {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            clock: 0.0,
            in_service: None,
            queue: VecDeque::new(),
            fel: FutureEventList::new(),
            stats: TimeWeightedStats::new(),
            departures: 0,
            max_queue_length: 0,
            next_customer: 1,
            stop_reason: None,
            history: Vec::new(),
        }
    }

    /// Runs to completion and returns why the run stopped. Calling again on
    /// a stopped simulation returns the same reason without re-running.
    pub fn run(&mut self, digits: &mut dyn DigitStream) -> StopReason {
        if let Some(reason) = self.stop_reason {
            return reason;
        }

        // Bootstrap: the first customer walks in at time zero.
        let first = self.take_customer_id();
        self.fel.insert(Event {
            kind: EventKind::Arrival,
            time: 0.0,
            customer: first,
        });

        let reason = loop {
            // Count cap is checked at loop entry, never mid-step.
            if self.departures >= self.config.max_departures {
                break StopReason::CountLimitReached;
            }

            let event = match self.fel.pop_earliest() {
                Ok(event) => event,
                Err(_) => break StopReason::EventListExhausted,
            };

            if event.time > self.config.stop_time {
                // Charge the tail interval with the state that held
                // throughout it, then pin the clock to the stop time.
                self.observe_interval(self.config.stop_time);
                self.clock = self.config.stop_time;
                break StopReason::TimeLimitReached;
            }

            // Integrate the state that was true for the interval just
            // ending, before the event mutates it.
            self.observe_interval(event.time);
            self.clock = event.time;

            if self.queue.len() > self.max_queue_length {
                self.max_queue_length = self.queue.len();
            }

            match event.kind {
                EventKind::Arrival => self.handle_arrival(event, digits),
                EventKind::Departure => self.handle_departure(digits),
            }

            self.record_row(&event);
        };

        self.stop_reason = Some(reason);
        reason
    }

    /// End-of-run performance measures; derived once, not incrementally.
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            total_time: self.clock,
            departures: self.departures,
            max_queue_length: self.max_queue_length,
            utilization: self.stats.utilization(self.clock),
            avg_number_in_system: self.stats.avg_number_in_system(self.clock),
            avg_queue_length: self.stats.avg_queue_length(self.clock),
        }
    }

    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stop_reason
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn departures(&self) -> u32 {
        self.departures
    }

    fn take_customer_id(&mut self) -> u32 {
        let id = self.next_customer;
        self.next_customer += 1;
        id
    }

    fn number_in_system(&self) -> u32 {
        self.queue.len() as u32 + u32::from(self.in_service.is_some())
    }

    fn observe_interval(&mut self, new_time: f64) {
        self.stats
            .observe(self.number_in_system(), self.in_service.is_some(), new_time);
    }

    /// An arrival schedules its own successor (unless past the cutoff) and
    /// either seizes the idle server or joins the queue.
    fn handle_arrival(&mut self, event: Event, digits: &mut dyn DigitStream) {
        let interarrival = draw_from(&self.config.interarrival, digits);
        let next_arrival = self.clock + f64::from(interarrival.outcome);
        if next_arrival <= self.config.stop_time + self.config.arrival_cutoff_grace {
            let customer = self.take_customer_id();
            self.fel.insert(Event {
                kind: EventKind::Arrival,
                time: next_arrival,
                customer,
            });
        }

        if self.in_service.is_none() {
            self.start_service(event.customer, digits);
        } else {
            self.queue.push_back(event.customer);
        }
    }

    /// A departure frees the server; the head of the queue, if any, goes
    /// straight into service.
    fn handle_departure(&mut self, digits: &mut dyn DigitStream) {
        self.departures += 1;
        match self.queue.pop_front() {
            Some(next) => self.start_service(next, digits),
            None => self.in_service = None,
        }
    }

    fn start_service(&mut self, customer: u32, digits: &mut dyn DigitStream) {
        self.in_service = Some(customer);
        let service = draw_from(&self.config.service, digits);
        self.fel.insert(Event {
            kind: EventKind::Departure,
            time: self.clock + f64::from(service.outcome),
            customer,
        });
    }

    fn record_row(&mut self, event: &Event) {
        let label = match event.kind {
            EventKind::Arrival => format!("Arr(C{})", event.customer),
            EventKind::Departure => format!("Dep(C{})", event.customer),
        };

        let mut fel_preview = String::new();
        for pending in self.fel.peek_upcoming(FEL_PREVIEW_LEN) {
            let _ = write!(fel_preview, "({},{}) ", pending.kind.code(), pending.time);
        }

        self.history.push(TraceRow {
            clock: self.clock,
            event: label,
            queue_length: self.queue.len(),
            server_busy: u32::from(self.in_service.is_some()),
            fel_preview,
            area_num_in_system: self.stats.area_num_in_system,
            departures: self.departures,
            area_server_busy: self.stats.area_server_busy,
            max_queue_length: self.max_queue_length,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::stream::ScriptedDigits;
    use crate::sampling::table::IntervalTable;

    fn config(stop_time: f64, max_departures: u32) -> EngineConfig {
        EngineConfig::new(
            stop_time,
            max_departures,
            IntervalTable::uniform(1, 8).unwrap(),
            IntervalTable::uniform(1, 6).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn zero_stop_time_stops_immediately_with_time_limit() {
        let mut sim = EventSchedulingSim::new(config(0.0, 10));
        let mut digits = ScriptedDigits::new(vec![4, 3]);
        let reason = sim.run(&mut digits);

        assert_eq!(reason, StopReason::TimeLimitReached);
        let summary = sim.summary();
        assert_eq!(summary.departures, 0);
        assert_eq!(summary.utilization, 0.0);
        assert_eq!(summary.total_time, 0.0);
    }

    #[test]
    fn departure_cap_of_one_processes_exactly_one_departure() {
        // Interarrival 8, service 1: every arrival finds the server idle.
        let cfg = EngineConfig::new(
            1000.0,
            1,
            IntervalTable::uniform(8, 8).unwrap(),
            IntervalTable::uniform(1, 1).unwrap(),
        )
        .unwrap();
        let mut sim = EventSchedulingSim::new(cfg);
        let mut digits = ScriptedDigits::new(vec![8, 1]);
        let reason = sim.run(&mut digits);

        assert_eq!(reason, StopReason::CountLimitReached);
        assert_eq!(sim.departures(), 1);
        let departures = sim
            .history
            .iter()
            .filter(|row| row.event.starts_with("Dep"))
            .count();
        assert_eq!(departures, 1);
    }

    #[test]
    fn identical_parameters_and_digits_give_identical_traces() {
        let digits = vec![3, 2, 6, 1, 4, 5, 2, 2, 7, 3, 1, 6];

        let mut first = EventSchedulingSim::new(config(30.0, 10));
        let mut second = EventSchedulingSim::new(config(30.0, 10));
        first.run(&mut ScriptedDigits::new(digits.clone()));
        second.run(&mut ScriptedDigits::new(digits));

        assert_eq!(first.history, second.history);
        assert_eq!(first.summary(), second.summary());
    }

    #[test]
    fn run_respects_both_bounds_on_completion() {
        for seed_digits in [vec![1, 1], vec![8, 6, 2], vec![5, 3, 3, 1, 7]] {
            let mut sim = EventSchedulingSim::new(config(40.0, 6));
            sim.run(&mut ScriptedDigits::new(seed_digits));
            let summary = sim.summary();
            assert!(summary.departures <= 6);
            assert!(summary.total_time <= 40.0);
        }
    }

    #[test]
    fn trace_accumulators_and_clock_never_decrease() {
        let mut sim = EventSchedulingSim::new(config(60.0, 10));
        sim.run(&mut ScriptedDigits::new(vec![4, 2, 1, 6, 3, 5, 2, 8]));

        let mut clock = 0.0;
        let mut s = 0.0;
        let mut b = 0.0;
        for row in &sim.history {
            assert!(row.clock >= clock);
            assert!(row.area_num_in_system >= s);
            assert!(row.area_server_busy >= b);
            clock = row.clock;
            s = row.area_num_in_system;
            b = row.area_server_busy;
        }
    }

    #[test]
    fn arrival_at_time_zero_starts_service_without_waiting() {
        let mut sim = EventSchedulingSim::new(config(60.0, 10));
        sim.run(&mut ScriptedDigits::new(vec![4, 3, 5, 2, 6, 1]));

        let first = &sim.history[0];
        assert_eq!(first.clock, 0.0);
        assert_eq!(first.event, "Arr(C1)");
        assert_eq!(first.queue_length, 0);
        assert_eq!(first.server_busy, 1);
        assert_eq!(first.departures, 0);
    }

    #[test]
    fn rerunning_a_stopped_simulation_is_a_no_op() {
        let mut sim = EventSchedulingSim::new(config(0.0, 10));
        let mut digits = ScriptedDigits::new(vec![4, 3]);
        let reason = sim.run(&mut digits);
        let rows = sim.history.len();

        assert_eq!(sim.run(&mut digits), reason);
        assert_eq!(sim.history.len(), rows);
    }

    #[test]
    fn queue_grows_when_arrivals_outpace_service() {
        // Interarrival 1, service 6: the queue builds up.
        let cfg = EngineConfig::new(
            20.0,
            100,
            IntervalTable::uniform(1, 1).unwrap(),
            IntervalTable::uniform(6, 6).unwrap(),
        )
        .unwrap();
        let mut sim = EventSchedulingSim::new(cfg);
        sim.run(&mut ScriptedDigits::new(vec![1]));

        let summary = sim.summary();
        assert!(summary.max_queue_length > 0);
        assert!(summary.avg_queue_length > 0.0);
        assert!(summary.utilization > 0.9);
    }
}
