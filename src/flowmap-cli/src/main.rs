// Copyright 2026 The Flowmap Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::fs;
use std::result::Result as StdResult;

use pico_args::Arguments;

use flowmap_engine::datamodel::{DisplacementData, FeatureCollection};
use flowmap_engine::{Result, SimConfig, Simulation, eprintln};

const VERSION: &str = "1.0";
const EXIT_FAILURE: i32 = 1;

#[macro_export]
macro_rules! die(
    ($($arg:tt)*) => { {
        use std;
        eprintln!($($arg)*);
        std::process::exit(EXIT_FAILURE)
    } }
);

fn usage() -> ! {
    let argv0 = std::env::args()
        .next()
        .unwrap_or_else(|| "<flowmap>".to_string());
    die!(
        concat!(
            "flowmap {}: Simulate displacement flows between regions.\n\
         \n\
         USAGE:\n",
            "    {} [SUBCOMMAND] [OPTION...] BOUNDARIES_JSON DISPLACEMENT_JSON\n",
            "\n\
         OPTIONS:\n",
            "    -h, --help       show this message\n",
            "    --width PX       canvas width in pixels (default 1280)\n",
            "    --height PX      canvas height in pixels (default 800)\n",
            "    --ticks N        simulation ticks to run (default 600)\n",
            "    --dt SECONDS     delta time per tick (default 1/60)\n",
            "    --seed N         RNG seed for the agent population\n",
            "    --output FILE    path to write output file\n",
            "    --no-output      don't print agent state (for benchmarking)\n",
            "\n\
         SUBCOMMANDS:\n",
            "    simulate         Run the agent simulation and print agent state as TSV\n",
            "    export           Write agent trajectories as an SVG line drawing\n",
        ),
        VERSION,
        argv0
    );
}

#[derive(Clone, Default, Debug)]
struct Args {
    boundaries_path: Option<String>,
    displacement_path: Option<String>,
    output: Option<String>,
    width: f64,
    height: f64,
    ticks: u32,
    dt: f64,
    seed: Option<u64>,
    is_export: bool,
    is_no_output: bool,
}

fn parse_args() -> StdResult<Args, Box<dyn std::error::Error>> {
    let mut parsed = Arguments::from_env();
    if parsed.contains(["-h", "--help"]) {
        usage();
    }

    let subcommand = parsed.subcommand()?;
    if subcommand.is_none() {
        eprintln!("error: subcommand required");
        usage();
    }

    let mut args: Args = Default::default();

    let subcommand = subcommand.unwrap();
    if subcommand == "export" {
        args.is_export = true;
    } else if subcommand == "simulate" {
    } else {
        eprintln!("error: unknown subcommand {}", subcommand);
        usage();
    }

    args.width = parsed.value_from_str("--width").unwrap_or(1280.0);
    args.height = parsed.value_from_str("--height").unwrap_or(800.0);
    args.ticks = parsed.value_from_str("--ticks").unwrap_or(600);
    args.dt = parsed.value_from_str("--dt").unwrap_or(1.0 / 60.0);
    args.seed = parsed.value_from_str("--seed").ok();
    args.output = parsed.value_from_str("--output").ok();
    args.is_no_output = parsed.contains("--no-output");

    let free_arguments = parsed.finish();
    if free_arguments.len() < 2 {
        eprintln!("error: boundary and displacement paths required");
        usage();
    }

    args.boundaries_path = free_arguments[0].to_str().map(|s| s.to_owned());
    args.displacement_path = free_arguments[1].to_str().map(|s| s.to_owned());

    Ok(args)
}

fn load_simulation(args: &Args) -> Result<Simulation> {
    use flowmap_engine::{Error, ErrorCode, ErrorKind};

    let read = |path: &str| {
        fs::read_to_string(path).map_err(|err| {
            Error::new(
                ErrorKind::Data,
                ErrorCode::DoesNotExist,
                Some(format!("{path}: {err}")),
            )
        })
    };

    let boundaries_path = args.boundaries_path.as_deref().unwrap_or_default();
    let displacement_path = args.displacement_path.as_deref().unwrap_or_default();

    let boundaries = FeatureCollection::from_json_str(&read(boundaries_path)?)?;
    let displacement = DisplacementData::from_json_str(&read(displacement_path)?)?;

    let mut config = SimConfig::default();
    if let Some(seed) = args.seed {
        config.random_seed = seed;
    }

    Simulation::new(boundaries, displacement, args.width, args.height, config)
}

fn print_agents_tsv(sim: &Simulation) {
    println!("origin\tdestination\tx\ty\theading");
    for agent in sim.agents() {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            agent.origin,
            agent.destination,
            agent.pos.x,
            agent.pos.y,
            agent.heading()
        );
    }
}

fn simulate(args: &Args) -> Result<()> {
    let mut sim = load_simulation(args)?;
    eprintln!("simulating {} agents for {} ticks", sim.agents().len(), args.ticks);

    for _ in 0..args.ticks {
        sim.tick(args.dt);
    }

    if !args.is_no_output {
        print_agents_tsv(&sim);
    }

    Ok(())
}

fn export(args: &Args) -> Result<()> {
    let sim = load_simulation(args)?;
    let Some(svg) = sim.export_trajectories() else {
        // empty population degrades to a no-op, matching the engine
        return Ok(());
    };

    match args.output.as_deref() {
        Some(path) => {
            fs::write(path, &svg).map_err(|err| {
                flowmap_engine::Error::new(
                    flowmap_engine::ErrorKind::Export,
                    flowmap_engine::ErrorCode::Generic,
                    Some(format!("{path}: {err}")),
                )
            })?;
            eprintln!("wrote {} trajectories to {path}", sim.agents().len());
        }
        None => print!("{svg}"),
    }

    Ok(())
}

fn main() {
    let args = match parse_args() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("error: {}", err);
            usage();
        }
    };

    let result = if args.is_export {
        export(&args)
    } else {
        simulate(&args)
    };

    if let Err(err) = result {
        die!("error: {}", err);
    }
}
