// src/scenarios/newsvendor.rs

use crate::sampling::stream::{draw_from, DigitStream};
use crate::sampling::table::IntervalTable;
use crate::simulation::config::ConfigError;
use serde::Serialize;
use std::collections::BTreeMap;

/// Kind of news day; demand is conditioned on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DayKind {
    Good,
    Fair,
    Poor,
}

/// Unit economics of a single paper.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaperEconomics {
    pub cost_per_paper: f64,
    pub selling_price: f64,
    pub salvage_value: f64,
}

impl Default for PaperEconomics {
    fn default() -> Self {
        Self {
            cost_per_paper: 0.33,
            selling_price: 0.50,
            salvage_value: 0.05,
        }
    }
}

impl PaperEconomics {
    /// Profit forgone on each paper of unmet demand.
    pub fn lost_profit_per_unit(&self) -> f64 {
        self.selling_price - self.cost_per_paper
    }
}

/// Parameters for the single-period newsvendor model: the same stack of
/// papers is bought every morning and demand is drawn per day.
#[derive(Debug, Clone)]
pub struct NewsvendorConfig {
    pub papers: u32,
    pub days: u32,
    pub economics: PaperEconomics,
    pub day_type: IntervalTable<DayKind>,
    pub good_demand: IntervalTable<u32>,
    pub fair_demand: IntervalTable<u32>,
    pub poor_demand: IntervalTable<u32>,
}

impl NewsvendorConfig {
    fn demand_table(&self, kind: DayKind) -> &IntervalTable<u32> {
        match kind {
            DayKind::Good => &self.good_demand,
            DayKind::Fair => &self.fair_demand,
            DayKind::Poor => &self.poor_demand,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsvendorRow {
    pub day: u32,
    pub day_type_digit: u32,
    pub day_type: DayKind,
    pub demand_digit: u32,
    pub demand: u32,
    pub revenue: f64,
    pub lost_profit: f64,
    pub salvage: f64,
    pub profit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsvendorSummary {
    pub total_revenue: f64,
    pub total_cost: f64,
    pub total_lost_profit: f64,
    pub total_salvage: f64,
    pub net_profit: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewsvendorReport {
    pub rows: Vec<NewsvendorRow>,
    pub summary: NewsvendorSummary,
}

pub fn simulate(
    config: &NewsvendorConfig,
    digits: &mut dyn DigitStream,
) -> Result<NewsvendorReport, ConfigError> {
    if config.days == 0 {
        return Err(ConfigError::ZeroDays);
    }

    let economics = config.economics;
    let papers = f64::from(config.papers);
    let daily_cost = papers * economics.cost_per_paper;

    let mut rows = Vec::with_capacity(config.days as usize);
    for day in 1..=config.days {
        let type_draw = draw_from(&config.day_type, digits);
        let demand_draw = draw_from(config.demand_table(type_draw.outcome), digits);
        let demand = demand_draw.outcome;

        let sold = demand.min(config.papers);
        let revenue = f64::from(sold) * economics.selling_price;

        let lost_profit = if demand > config.papers {
            f64::from(demand - config.papers) * economics.lost_profit_per_unit()
        } else {
            0.0
        };
        let salvage = if config.papers > demand {
            f64::from(config.papers - demand) * economics.salvage_value
        } else {
            0.0
        };

        rows.push(NewsvendorRow {
            day,
            day_type_digit: type_draw.digit,
            day_type: type_draw.outcome,
            demand_digit: demand_draw.digit,
            demand,
            revenue,
            lost_profit,
            salvage,
            profit: revenue - daily_cost - lost_profit + salvage,
        });
    }

    let summary = summarize(&rows, daily_cost);
    Ok(NewsvendorReport { rows, summary })
}

fn summarize(rows: &[NewsvendorRow], daily_cost: f64) -> NewsvendorSummary {
    NewsvendorSummary {
        total_revenue: rows.iter().map(|row| row.revenue).sum(),
        total_cost: daily_cost * rows.len() as f64,
        total_lost_profit: rows.iter().map(|row| row.lost_profit).sum(),
        total_salvage: rows.iter().map(|row| row.salvage).sum(),
        net_profit: rows.iter().map(|row| row.profit).sum(),
    }
}

/// Critical ratio of the newsvendor problem: the service level at which
/// the cost of stocking one paper too few balances the cost of stocking
/// one too many.
pub fn critical_ratio(economics: &PaperEconomics) -> f64 {
    let underage = economics.selling_price - economics.cost_per_paper;
    let overage = economics.cost_per_paper - economics.salvage_value;
    if underage + overage <= 0.0 {
        return 0.0;
    }
    underage / (underage + overage)
}

/// Smallest stocking level whose probability of covering demand reaches
/// the critical ratio, computed over the day-type demand mixture.
///
/// The discrete quantile over the empirical tables plays the role the
/// normal quantile plays in the continuous model.
pub fn optimal_papers(config: &NewsvendorConfig) -> u32 {
    let target = critical_ratio(&config.economics);

    let type_span = f64::from(config.day_type.span());
    let mut mixture: BTreeMap<u32, f64> = BTreeMap::new();
    for kind in [DayKind::Good, DayKind::Fair, DayKind::Poor] {
        let weight: f64 = config
            .day_type
            .bands()
            .iter()
            .filter(|band| band.outcome == kind)
            .map(|band| f64::from(band.width()) / type_span)
            .sum();

        let table = config.demand_table(kind);
        let demand_span = f64::from(table.span());
        for band in table.bands() {
            *mixture.entry(band.outcome).or_default() +=
                weight * f64::from(band.width()) / demand_span;
        }
    }

    let mut cumulative = 0.0;
    let mut best = 0;
    for (&level, &probability) in &mixture {
        best = level;
        cumulative += probability;
        if cumulative >= target - 1e-9 {
            return level;
        }
    }
    best
}
