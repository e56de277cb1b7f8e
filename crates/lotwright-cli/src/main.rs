//! Headless lotwright runner.
//!
//! Subcommands:
//!   evolve [seed]          full evolution run, writes out/floorplan.svg
//!                          and out/floorplan.dna.json
//!   score <dna.json>       materialize a DNA record and print its score
//!   frob <pairs.txt> [n]   train evaluator weights on preference pairs
//!   check [seed]           invariant sweep, non-zero exit on any failure

use std::env;
use std::error::Error;
use std::fs;
use std::path::Path;
use std::process;

use rand::rngs::StdRng;
use rand::SeedableRng;

use lotwright_core::plan::FloorPlan;
use lotwright_core::room::{RoomProgram, RoomRole};
use lotwright_export::params::RenderParams;
use lotwright_export::svg::SvgRenderer;
use lotwright_gen::builder::FloorplanBuilder;
use lotwright_gen::centrifuge::{standard_house_programs, PopulationCentrifuge};
use lotwright_gen::dna::{load_dna, read_preference_pairs, save_dna, PlanDna};
use lotwright_gen::doors::{eligible_edges, DoorJudge};
use lotwright_gen::door_shaker::GeneticDoorShaker;
use lotwright_gen::evaluator::{plan_features, FloorplanEvaluator, TreeWeights};
use lotwright_gen::genetic::GaConfig;
use lotwright_gen::tree::generate_tree;
use lotwright_gen::tree_shaker::GeneticTreeShaker;
use lotwright_gen::weight_frobber::GeneticWeightFrobber;

fn main() {
    env_logger::init();
    let args: Vec<String> = env::args().skip(1).collect();
    let command = args.first().map(String::as_str).unwrap_or("evolve");
    let result = match command {
        "evolve" => cmd_evolve(args.get(1)),
        "score" => cmd_score(args.get(1)),
        "frob" => cmd_frob(args.get(1), args.get(2)),
        "check" => cmd_check(args.get(1)),
        "help" | "--help" | "-h" => {
            usage();
            Ok(())
        }
        other => {
            eprintln!("unknown command: {other}");
            usage();
            process::exit(2);
        }
    };
    if let Err(error) = result {
        eprintln!("error: {error}");
        process::exit(1);
    }
}

fn usage() {
    println!("usage: lotwright <command> [args]");
    println!("  evolve [seed]          evolve a floorplan, write out/floorplan.svg + DNA");
    println!("  score <dna.json>       score a saved DNA record");
    println!("  frob <pairs.txt> [n]   train evaluator weights on preference pairs");
    println!("  check [seed]           run the invariant sweep");
}

fn parse_seed(arg: Option<&String>) -> Result<u64, Box<dyn Error>> {
    match arg {
        Some(text) => Ok(text
            .parse::<u64>()
            .map_err(|e| format!("seed must be an unsigned number: {e}"))?),
        None => Ok(rand::random()),
    }
}

fn cmd_evolve(seed_arg: Option<&String>) -> Result<(), Box<dyn Error>> {
    let seed = parse_seed(seed_arg)?;
    let mut rng = StdRng::seed_from_u64(seed);
    let centrifuge = PopulationCentrifuge::default();
    let evolved = centrifuge.create_perfect_floorplan(&mut rng)?;

    fs::create_dir_all("out")?;
    let dna = PlanDna::new(
        centrifuge.lot_width,
        centrifuge.lot_height,
        centrifuge.programs.clone(),
        evolved.tree.clone(),
    );
    save_dna(Path::new("out/floorplan.dna.json"), &dna)?;
    let renderer = SvgRenderer::new(RenderParams::new(
        centrifuge.lot_width,
        centrifuge.lot_height,
    ));
    renderer.render_to_file(
        &evolved.plan,
        &centrifuge.programs,
        Path::new("out/floorplan.svg"),
    )?;

    println!(
        "seed {seed}: score {:.3}, {} rooms",
        evolved.score,
        evolved.plan.room_count()
    );
    print_room_table(&evolved.plan, &centrifuge.programs);
    println!("wrote out/floorplan.svg and out/floorplan.dna.json");
    Ok(())
}

fn cmd_score(path_arg: Option<&String>) -> Result<(), Box<dyn Error>> {
    let path = path_arg.ok_or("score needs a DNA file path")?;
    let dna = load_dna(Path::new(path))?;
    let weights = TreeWeights::default();
    let plan = dna.materialize(weights)?;
    let evaluator = FloorplanEvaluator::new(weights);
    println!("score: {:.4}", evaluator.score_floorplan(&plan, &dna.programs));
    print_room_table(&plan, &dna.programs);
    Ok(())
}

fn cmd_frob(
    pairs_arg: Option<&String>,
    generations_arg: Option<&String>,
) -> Result<(), Box<dyn Error>> {
    let pairs_path = pairs_arg.ok_or("frob needs a preference-pair file")?;
    let generations = match generations_arg {
        Some(text) => text
            .parse::<usize>()
            .map_err(|e| format!("generation count: {e}"))?,
        None => 1000,
    };

    let weights = TreeWeights::default();
    let pair_paths = read_preference_pairs(Path::new(pairs_path))?;
    if pair_paths.is_empty() {
        return Err("no usable pairs in the training file".into());
    }
    let mut pairs = Vec::with_capacity(pair_paths.len());
    for (greater, lesser) in &pair_paths {
        log::debug!("pair: {} over {}", greater.display(), lesser.display());
        let better = load_dna(greater)?;
        let worse = load_dna(lesser)?;
        let better_plan = better.materialize(weights)?;
        let worse_plan = worse.materialize(weights)?;
        pairs.push((
            plan_features(&better_plan, &better.programs),
            plan_features(&worse_plan, &worse.programs),
        ));
    }
    println!("loaded {} preference pairs", pairs.len());

    let mut rng = StdRng::seed_from_u64(0);
    let mut frobber = GeneticWeightFrobber::new(weights, pairs, GaConfig::default(), &mut rng)
        .map_err(|errors| format!("search config rejected: {errors:?}"))?;
    for generation in 0..generations {
        frobber.run_generation(&mut rng);
        if (generation + 1) % 100 == 0 {
            if let Some(best) = frobber.best() {
                println!(
                    "generation {:>6}: ranking accuracy {:.3}",
                    generation + 1,
                    best.fitness
                );
            }
        }
    }
    if let Some(best) = frobber.best() {
        println!("best weights: {}", serde_json::to_string_pretty(&best.candidate)?);
        println!("ranking accuracy: {:.3}", best.fitness);
    }
    Ok(())
}

fn print_room_table(plan: &FloorPlan, programs: &[RoomProgram]) {
    println!("{:<16} {:>8} {:>8} {:>10}", "room", "width", "height", "area");
    for (id, room) in plan.rooms() {
        let bounds = plan.room_bounds(id);
        let label = room
            .role
            .map(|role| role.label(programs).to_string())
            .unwrap_or_else(|| "unassigned".to_string());
        println!(
            "{:<16} {:>8.1} {:>8.1} {:>10.1}",
            label,
            bounds.width(),
            bounds.height(),
            bounds.area()
        );
    }
}

// ── Invariant sweep ──────────────────────────────────────────────────

struct CheckResult {
    name: &'static str,
    passed: bool,
    detail: String,
}

fn cmd_check(seed_arg: Option<&String>) -> Result<(), Box<dyn Error>> {
    let seed = parse_seed(seed_arg)?;
    println!("lotwright invariant sweep (seed {seed})");
    println!("=====================================");

    let mut results = Vec::new();
    check_area_conservation(seed, &mut results);
    check_adjacency(seed, &mut results);
    check_role_coverage(seed, &mut results);
    check_tree_elitism(seed, &mut results);
    check_door_feasibility(seed, &mut results);

    let mut failed = 0;
    for result in &results {
        let mark = if result.passed { "✓" } else { "✗" };
        println!("  {mark} {:<28} {}", result.name, result.detail);
        if !result.passed {
            failed += 1;
        }
    }
    println!("{} checks, {failed} failed", results.len());
    if failed > 0 {
        process::exit(1);
    }
    Ok(())
}

fn house_builder() -> FloorplanBuilder {
    match FloorplanBuilder::new(
        100.0,
        60.0,
        standard_house_programs(),
        TreeWeights::default(),
    ) {
        Ok(builder) => builder,
        Err(errors) => {
            eprintln!("standard house config rejected: {errors:?}");
            process::exit(1);
        }
    }
}

fn random_plans(seed: u64, count: usize) -> Vec<FloorPlan> {
    let builder = house_builder();
    let indexes: Vec<usize> = (0..builder.programs().len()).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    let mut plans = Vec::with_capacity(count);
    for _ in 0..count {
        let mut tree = generate_tree(&indexes, &mut rng);
        match builder.build(&mut tree) {
            Ok(plan) => plans.push(plan),
            Err(error) => {
                eprintln!("random tree failed to build: {error}");
                process::exit(1);
            }
        }
    }
    plans
}

fn check_area_conservation(seed: u64, results: &mut Vec<CheckResult>) {
    let mut worst: f32 = 0.0;
    for plan in random_plans(seed, 10) {
        worst = worst.max((plan.total_area() - 6000.0).abs());
    }
    results.push(CheckResult {
        name: "area conservation",
        passed: worst < 0.5,
        detail: format!("worst drift {worst:.4} over 10 random plans"),
    });
}

fn check_adjacency(seed: u64, results: &mut Vec<CheckResult>) {
    let mut faults = 0usize;
    for plan in random_plans(seed.wrapping_add(1), 10) {
        for (room_id, room) in plan.rooms() {
            for &edge_id in &room.edges {
                let edge = plan.edge(edge_id);
                if edge.is_retired()
                    || (edge.negative != Some(room_id) && edge.positive != Some(room_id))
                {
                    faults += 1;
                }
            }
        }
        for (edge_id, edge) in plan.edges() {
            for side in [edge.negative, edge.positive].into_iter().flatten() {
                if !plan.room(side).edges.contains(&edge_id) {
                    faults += 1;
                }
            }
        }
    }
    results.push(CheckResult {
        name: "adjacency bidirectional",
        passed: faults == 0,
        detail: format!("{faults} dangling references"),
    });
}

fn check_role_coverage(seed: u64, results: &mut Vec<CheckResult>) {
    let mut unassigned = 0usize;
    let mut duplicates = 0usize;
    for plan in random_plans(seed.wrapping_add(2), 10) {
        let mut placed: Vec<usize> = Vec::new();
        for (_, room) in plan.rooms() {
            match room.role {
                Some(RoomRole::Program(i)) => placed.push(i),
                Some(_) => {}
                None => unassigned += 1,
            }
        }
        let before = placed.len();
        placed.sort_unstable();
        placed.dedup();
        duplicates += before - placed.len();
    }
    results.push(CheckResult {
        name: "role coverage",
        passed: unassigned == 0 && duplicates == 0,
        detail: format!("{unassigned} unassigned, {duplicates} duplicated programs"),
    });
}

fn check_tree_elitism(seed: u64, results: &mut Vec<CheckResult>) {
    let config = GaConfig {
        population_size: 10,
        elite_count: 2,
        ..GaConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(3));
    let mut shaker = match GeneticTreeShaker::new(house_builder(), config, &mut rng) {
        Ok(shaker) => shaker,
        Err(errors) => {
            eprintln!("tree search config rejected: {errors:?}");
            process::exit(1);
        }
    };
    let mut previous = f32::NEG_INFINITY;
    let mut regressions = 0usize;
    for _ in 0..6 {
        if let Err(error) = shaker.run_generation(&mut rng) {
            eprintln!("tree search failed: {error}");
            process::exit(1);
        }
        let best = shaker.population[0].fitness;
        if best < previous - 1e-4 {
            regressions += 1;
        }
        previous = best;
    }
    results.push(CheckResult {
        name: "tree search elitism",
        passed: regressions == 0,
        detail: format!("{regressions} regressions over 6 generations"),
    });
}

fn check_door_feasibility(seed: u64, results: &mut Vec<CheckResult>) {
    let config = GaConfig {
        population_size: 8,
        elite_count: 1,
        ..GaConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(4));
    let plan = match random_plans(seed.wrapping_add(4), 1).pop() {
        Some(plan) => plan,
        None => {
            eprintln!("no plan produced for the door check");
            process::exit(1);
        }
    };
    let eligible = eligible_edges(&plan).len();
    let mut shaker =
        match GeneticDoorShaker::new(plan.clone(), DoorJudge::default(), config, &mut rng) {
            Ok(shaker) => shaker,
            Err(errors) => {
                eprintln!("door search config rejected: {errors:?}");
                process::exit(1);
            }
        };
    for _ in 0..5 {
        shaker.run_generation(&mut rng);
    }
    let mut out_of_band = 0usize;
    for entry in &shaker.population {
        for placed in &entry.candidate {
            let length = plan.edge(placed.edge).length();
            let feasible = lotwright_core::door::Door::feasible_range(placed.door.width, length)
                .map_or(false, |(lo, hi)| placed.door.t >= lo && placed.door.t <= hi);
            if !feasible {
                out_of_band += 1;
            }
        }
    }
    results.push(CheckResult {
        name: "door feasibility",
        passed: out_of_band == 0,
        detail: format!("{out_of_band} doors out of band across {eligible} eligible walls"),
    });
}
