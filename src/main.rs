use next_event_sim::io::distributions;
use next_event_sim::io::reporting;
use next_event_sim::sampling::stream::RandomDigits;
use next_event_sim::scenarios::{double_server, inventory, newsvendor, single_server};
use next_event_sim::simulation::config::EngineConfig;
use next_event_sim::simulation::engine::EventSchedulingSim;

fn main() {
    println!("=== Discrete-Event Simulation Workbench ===");

    // 1. EVENT SCHEDULING (the next-event engine)
    // One server, uniform 1-8 interarrivals and 1-6 service times,
    // stopped by whichever bound trips first.
    let config = EngineConfig::new(
        60.0,
        10,
        distributions::event_interarrival_distribution(),
        distributions::event_service_distribution(),
    )
    .expect("demo parameters are valid");

    let mut digits = RandomDigits::from_entropy();
    let mut sim = EventSchedulingSim::new(config);
    let reason = sim.run(&mut digits);
    let summary = sim.summary();

    println!("\n=== Event Scheduling ===");
    println!("Stopped because: {:?}", reason);
    println!("Total Simulation Time:   {} min", summary.total_time);
    println!("Total Departures:        {}", summary.departures);
    println!("Max Queue Length:        {}", summary.max_queue_length);
    println!("Server Utilization:      {:.2}", summary.utilization);
    println!("Avg Number In System:    {:.2}", summary.avg_number_in_system);
    println!("Avg Queue Length:        {:.2}", summary.avg_queue_length);

    // 2. EXPORT THE EVENT TRACE
    let output_file = "event_trace.csv";
    match reporting::write_rows(output_file, &sim.history) {
        Ok(_) => println!("Trace written to ./{}", output_file),
        Err(e) => eprintln!("Error writing CSV: {}", e),
    }

    // 3. SINGLE SERVER (row recurrence)
    let ss_config = single_server::SingleServerConfig {
        customers: 10,
        arrivals: distributions::classic_arrival_distribution(),
        service: distributions::classic_service_distribution(),
    };
    match single_server::simulate(&ss_config, &mut digits) {
        Ok(report) => {
            println!("\n=== Single Server ({} customers) ===", ss_config.customers);
            println!("Average waiting time:    {:.2} min", report.summary.avg_wait);
            println!("Probability of waiting:  {:.2}", report.summary.prob_wait);
            println!("Server utilization:      {:.2}", report.summary.utilization);
            println!("Average time in system:  {:.2} min", report.summary.avg_time_in_system);
        }
        Err(e) => eprintln!("Single server rejected: {}", e),
    }

    // 4. DOUBLE SERVER (Able and Baker)
    let ds_config = double_server::DoubleServerConfig {
        customers: 10,
        arrivals: distributions::classic_arrival_distribution(),
        server1_service: distributions::able_service_distribution(),
        server2_service: distributions::baker_service_distribution(),
    };
    match double_server::simulate(&ds_config, &mut digits) {
        Ok(report) => {
            println!("\n=== Double Server ({} customers) ===", ds_config.customers);
            println!("Time horizon:            {} min", report.summary.time_horizon);
            println!("Able utilization:        {:.2}", report.summary.server1_utilization);
            println!("Baker utilization:       {:.2}", report.summary.server2_utilization);
            println!("System utilization:      {:.2}", report.summary.system_utilization);
            println!("Average waiting time:    {:.2} min", report.summary.avg_wait);
        }
        Err(e) => eprintln!("Double server rejected: {}", e),
    }

    // 5. PERIODIC-REVIEW INVENTORY
    let inv_config = inventory::InventoryConfig {
        initial_inventory: 12,
        cycle_length: 7,
        reorder_point: 6,
        order_quantity: 10,
        days: 28,
        demand: distributions::inventory_demand_distribution(),
        lead_time: distributions::lead_time_distribution(),
    };
    match inventory::simulate(&inv_config, &mut digits) {
        Ok(report) => {
            println!("\n=== M-N Inventory ({} days) ===", inv_config.days);
            println!(
                "Average ending inventory: {:.2} units",
                report.summary.avg_ending_inventory
            );
            println!(
                "Shortage days:            {} ({:.1}%)",
                report.summary.shortage_days, report.summary.shortage_percent
            );
        }
        Err(e) => eprintln!("Inventory rejected: {}", e),
    }

    // 6. NEWSVENDOR
    let np_config = newsvendor::NewsvendorConfig {
        papers: 70,
        days: 20,
        economics: newsvendor::PaperEconomics::default(),
        day_type: distributions::newsday_type_distribution(),
        good_demand: distributions::good_day_demand_distribution(),
        fair_demand: distributions::fair_day_demand_distribution(),
        poor_demand: distributions::poor_day_demand_distribution(),
    };
    match newsvendor::simulate(&np_config, &mut digits) {
        Ok(report) => {
            println!("\n=== Newsvendor ({} papers, {} days) ===", np_config.papers, np_config.days);
            println!("Total revenue:     ${:.2}", report.summary.total_revenue);
            println!("Total cost:        ${:.2}", report.summary.total_cost);
            println!("Total lost profit: ${:.2}", report.summary.total_lost_profit);
            println!("Total salvage:     ${:.2}", report.summary.total_salvage);
            println!("Net profit:        ${:.2}", report.summary.net_profit);
            println!(
                "Suggested stack (critical ratio {:.2}): {} papers",
                newsvendor::critical_ratio(&np_config.economics),
                newsvendor::optimal_papers(&np_config)
            );
        }
        Err(e) => eprintln!("Newsvendor rejected: {}", e),
    }

    println!("\nSimulation Complete.");
}
