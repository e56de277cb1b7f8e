//! Genetic search over partition trees.
//!
//! Candidates are whole trees; fitness is the evaluator score of the
//! floorplan each tree materializes into. Crossover grafts a donor
//! subtree whose index set has the same size as the replaced one, then
//! renumbers the grafted leaves from the replaced subtree's indexes so
//! the partition invariant survives breeding.

use log::trace;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::builder::{BuildError, FloorplanBuilder};
use crate::evaluator::FloorplanEvaluator;
use crate::genetic::{rank, tournament, GaConfig, GaConfigError, Scored};
use crate::tree::{generate_tree, Node};

pub struct GeneticTreeShaker {
    builder: FloorplanBuilder,
    evaluator: FloorplanEvaluator,
    config: GaConfig,
    pub population: Vec<Scored<Node>>,
}

impl GeneticTreeShaker {
    /// Seeds a fresh population of random trees over the builder's
    /// program indexes. Config problems are all reported at once, the
    /// same way the builder reports its own.
    pub fn new(
        builder: FloorplanBuilder,
        config: GaConfig,
        rng: &mut impl Rng,
    ) -> Result<GeneticTreeShaker, Vec<GaConfigError>> {
        let errors = config.validate();
        if !errors.is_empty() {
            return Err(errors);
        }
        let indexes: Vec<usize> = (0..builder.programs().len()).collect();
        let population = (0..config.population_size)
            .map(|_| Scored {
                candidate: generate_tree(&indexes, rng),
                fitness: 0.0,
            })
            .collect();
        let evaluator = FloorplanEvaluator::new(*builder.weights());
        Ok(GeneticTreeShaker {
            builder,
            evaluator,
            config,
            population,
        })
    }

    pub fn builder(&self) -> &FloorplanBuilder {
        &self.builder
    }

    /// One generation: score everyone, rank, carry elites, refill by
    /// tournament selection with crossover and mutation. After this
    /// returns, `population[0]` is the best candidate scored so far.
    pub fn run_generation(&mut self, rng: &mut impl Rng) -> Result<(), BuildError> {
        for entry in &mut self.population {
            let plan = self.builder.build(&mut entry.candidate)?;
            entry.fitness = self
                .evaluator
                .score_floorplan(&plan, self.builder.programs());
        }
        rank(&mut self.population);
        trace!(
            "tree generation ranked, best {:.3}",
            self.population[0].fitness
        );

        let elite = self.config.elite_count.min(self.population.len());
        let mut next: Vec<Scored<Node>> = self.population[..elite].to_vec();
        while next.len() < self.population.len() {
            let parent = tournament(&self.population, self.config.tournament_size, rng);
            let mut child = if rng.gen_bool(self.config.crossover_rate) {
                let donor = tournament(&self.population, self.config.tournament_size, rng);
                crossover(&parent.candidate, &donor.candidate, rng)
            } else {
                parent.candidate.clone()
            };
            if rng.gen_bool(self.config.mutation_rate) {
                mutate(&mut child, rng);
            }
            next.push(Scored {
                candidate: child,
                fitness: 0.0,
            });
        }
        self.population = next;
        Ok(())
    }

    /// Best candidate of the last ranked generation.
    pub fn best(&self) -> Option<&Scored<Node>> {
        self.population.first()
    }
}

/// Grafts a donor subtree of matching index-set size onto a clone of
/// `base`. Falls back to a plain clone when the donor offers no
/// compatible subtree.
pub fn crossover(base: &Node, donor: &Node, rng: &mut impl Rng) -> Node {
    let mut child = base.clone();
    let target_index = rng.gen_range(0..child.node_count());
    let (size, pool) = match child.nth_node(target_index) {
        Some(node) => (node.room_indexes.len(), node.room_indexes.clone()),
        None => return child,
    };

    let mut candidates = Vec::new();
    donor.nodes_with_index_count(size, &mut candidates);
    let Some(&donor_subtree) = candidates.choose(rng) else {
        return child;
    };

    let mut graft = donor_subtree.clone();
    renumber(&mut graft, &pool);
    if let Some(target) = child.nth_node_mut(target_index) {
        *target = graft;
    }
    child
}

/// Reassigns leaf indexes from `pool` in preorder and rebuilds the
/// internal index sets bottom-up. Stale scores are cleared along the way.
fn renumber(node: &mut Node, pool: &[usize]) {
    let mut next = 0usize;
    assign_leaves(node, pool, &mut next);
    rebuild_index_sets(node);
}

fn assign_leaves(node: &mut Node, pool: &[usize], next: &mut usize) {
    if node.is_leaf() {
        if let Some(&index) = pool.get(*next) {
            node.room_indexes = vec![index];
        }
        node.score = None;
        *next += 1;
        return;
    }
    for child in &mut node.children {
        assign_leaves(child, pool, next);
    }
}

fn rebuild_index_sets(node: &mut Node) {
    if node.is_leaf() {
        return;
    }
    for child in &mut node.children {
        rebuild_index_sets(child);
    }
    node.room_indexes = node
        .children
        .iter()
        .flat_map(|c| c.room_indexes.iter().copied())
        .collect();
    node.score = None;
}

/// Point mutation: rerolls one structural knob on one node.
pub fn mutate(tree: &mut Node, rng: &mut impl Rng) {
    let count = tree.node_count();
    let Some(node) = tree.nth_node_mut(rng.gen_range(0..count)) else {
        return;
    };
    match rng.gen_range(0..4) {
        0 => node.orientation = node.orientation.negate(),
        1 => node.padding = !node.padding,
        2 => node.order = node.order.flip(),
        _ => node.t = (node.t + rng.gen_range(-0.15..0.15)).clamp(0.1, 0.9),
    }
}
