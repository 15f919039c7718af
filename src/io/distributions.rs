// src/io/distributions.rs

//! The textbook interval tables the scenarios were published with. Each
//! constructor returns a validated table; the literals below are total
//! partitions of their ranges, so construction cannot fail.

use crate::sampling::table::IntervalTable;
use crate::scenarios::newsvendor::DayKind;

/// Interarrival minutes over random digits 0-99, shared by both queueing
/// row models.
pub fn classic_arrival_distribution() -> IntervalTable<u32> {
    IntervalTable::new(vec![(5, 0, 29), (10, 30, 69), (15, 70, 89), (20, 90, 99)])
        .expect("arrival table is a total partition")
}

/// Service minutes for the single-server model (same table as Able's).
pub fn classic_service_distribution() -> IntervalTable<u32> {
    IntervalTable::new(vec![(15, 0, 24), (20, 25, 64), (30, 65, 89), (45, 90, 99)])
        .expect("service table is a total partition")
}

/// Server 1 ("Able") service minutes.
pub fn able_service_distribution() -> IntervalTable<u32> {
    classic_service_distribution()
}

/// Server 2 ("Baker") service minutes; Baker is the faster of the pair.
pub fn baker_service_distribution() -> IntervalTable<u32> {
    IntervalTable::new(vec![(10, 0, 19), (15, 20, 59), (25, 60, 89), (35, 90, 99)])
        .expect("service table is a total partition")
}

/// Uniform 1..=8 interarrival minutes for the event-scheduling model.
pub fn event_interarrival_distribution() -> IntervalTable<u32> {
    IntervalTable::uniform(1, 8).expect("identity table is a total partition")
}

/// Uniform 1..=6 service minutes for the event-scheduling model.
pub fn event_service_distribution() -> IntervalTable<u32> {
    IntervalTable::uniform(1, 6).expect("identity table is a total partition")
}

/// Daily demand for the periodic-review inventory model, digits 1-100.
pub fn inventory_demand_distribution() -> IntervalTable<u32> {
    IntervalTable::new(vec![
        (0, 1, 33),
        (1, 34, 58),
        (2, 59, 78),
        (3, 79, 90),
        (4, 91, 100),
    ])
    .expect("demand table is a total partition")
}

/// Supplier lead time in days, digits 1-100.
pub fn lead_time_distribution() -> IntervalTable<u32> {
    IntervalTable::new(vec![(1, 1, 30), (2, 31, 80), (3, 81, 100)])
        .expect("lead time table is a total partition")
}

/// Kind of news day, digits 1-100.
pub fn newsday_type_distribution() -> IntervalTable<DayKind> {
    IntervalTable::new(vec![
        (DayKind::Good, 1, 35),
        (DayKind::Fair, 36, 80),
        (DayKind::Poor, 81, 100),
    ])
    .expect("day type table is a total partition")
}

/// Papers demanded on a good news day.
pub fn good_day_demand_distribution() -> IntervalTable<u32> {
    IntervalTable::new(vec![
        (40, 1, 3),
        (50, 4, 8),
        (60, 9, 23),
        (70, 24, 43),
        (80, 44, 78),
        (90, 79, 93),
        (100, 94, 100),
    ])
    .expect("demand table is a total partition")
}

/// Papers demanded on a fair news day. The published table ends with an
/// unreachable catch-all branch for 90 papers; the sampler's last-band
/// fallback carries that meaning.
pub fn fair_day_demand_distribution() -> IntervalTable<u32> {
    IntervalTable::new(vec![
        (40, 1, 10),
        (50, 11, 28),
        (60, 29, 68),
        (70, 69, 88),
        (80, 89, 96),
        (90, 97, 100),
    ])
    .expect("demand table is a total partition")
}

/// Papers demanded on a poor news day.
pub fn poor_day_demand_distribution() -> IntervalTable<u32> {
    IntervalTable::new(vec![
        (40, 1, 44),
        (50, 45, 66),
        (60, 67, 82),
        (70, 83, 94),
        (80, 95, 100),
    ])
    .expect("demand table is a total partition")
}
