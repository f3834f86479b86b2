use anyhow::Result;
use clap::Parser;

use routing_lab::trace::format_cost;
use routing_lab::{
    CostMetric, Cost, Graph, Protocol, SimulatorConfig, SolveData, build_steps, solve,
};

#[derive(Parser)]
#[command(name = "routing_lab")]
#[command(about = "Simulate link-state and distance-vector routing over a lab topology")]
struct Cli {
    #[arg(long, default_value = "A")]
    source: String,

    #[arg(long, default_value = "F")]
    destination: String,

    /// link-state (ospf) or distance-vector (rip)
    #[arg(long)]
    protocol: Option<Protocol>,

    /// weight or bandwidth (link-state only)
    #[arg(long)]
    metric: Option<CostMetric>,

    /// Metric ceiling; routes beyond it are unreachable (RIP uses 15)
    #[arg(long)]
    hop_limit: Option<Cost>,

    /// Topology JSON file; defaults to the built-in sample lab
    #[arg(long)]
    topology: Option<String>,

    /// Simulator config JSON file
    #[arg(long)]
    config: Option<String>,

    /// Print the solve trace
    #[arg(long)]
    show_log: bool,

    /// Print the per-router routing tables (distance-vector only)
    #[arg(long)]
    show_tables: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SimulatorConfig::load_from_file(path)?,
        None => SimulatorConfig::default(),
    };
    if let Some(protocol) = cli.protocol {
        config.protocol = protocol;
    }
    if let Some(metric) = cli.metric {
        config.metric = metric;
    }
    if let Some(limit) = cli.hop_limit {
        config.hop_limit = Some(limit);
    }

    let graph = match &cli.topology {
        Some(path) => Graph::load_from_file(path)?,
        None => Graph::sample(),
    };
    println!(
        "Topology: {} routers, {} links",
        graph.routers().len(),
        graph.links().len()
    );

    let result = solve(
        &graph,
        &cli.source,
        &cli.destination,
        config.protocol,
        &config.solve_options(),
    )?;

    if cli.show_log {
        println!("\n=== Solve trace ({}) ===", config.protocol);
        for line in result.trace.lines() {
            println!("{line}");
        }
    }

    match &result.data {
        SolveData::LinkState { distances, .. } => {
            println!(
                "\nDistance {} -> {}: {}",
                cli.source,
                cli.destination,
                format_cost(distances[&cli.destination])
            );
        }
        SolveData::DistanceVector {
            tables,
            converged,
            iterations,
            ..
        } => {
            println!(
                "\nTables after {iterations} iteration(s), converged: {converged}"
            );
            println!(
                "Distance {} -> {}: {}",
                cli.source,
                cli.destination,
                format_cost(tables[&cli.source].distance_to(&cli.destination))
            );
            if cli.show_tables {
                for router in graph.routers() {
                    println!("\nRouting table for {}:", router.id);
                    for destination in graph.routers() {
                        if let Some(entry) = tables[&router.id].get_route(&destination.id) {
                            let next_hop = entry.next_hop.as_deref().unwrap_or("-");
                            println!(
                                "  {} distance {} via {}",
                                entry.destination,
                                format_cost(entry.distance),
                                next_hop
                            );
                        }
                    }
                }
            }
        }
    }

    if result.path.is_empty() {
        println!("\nNo route from {} to {}", cli.source, cli.destination);
        return Ok(());
    }

    println!("\nPath: {}", result.path.join(" -> "));
    println!("\n=== Simulation steps ===");
    for step in build_steps(&result.path) {
        let duration = result
            .path
            .get(step.step + 1)
            .and_then(|next| graph.link_between(&step.node, next))
            .map(|link| config.segment_duration(link.weight));
        match duration {
            Some(duration) => println!("{}. {} ({}ms to next hop)", step.step, step, duration.as_millis()),
            None => println!("{}. {}", step.step, step),
        }
    }

    Ok(())
}
