//! Example Environment
extern crate ng_core;
extern crate ng_models;

use std::sync::Arc;
use std::time::SystemTime;

use self::ng_core::error::Result;
use self::ng_core::generation::{FitnessSummary, Population};
use self::ng_core::model::{Evaluator, Initializer};
use self::ng_core::optimizer::{Environment, ScoreLogger, State};
use self::ng_core::sampler;
use self::ng_models::nn::Network;

use crate::bin_utils::config::RunConfig;

/// Rewards networks whose first output on a fixed input lands near a target.
/// Fitness is `1 - |target - output|`.
pub struct MidpointEnv {
    input: Vec<f32>,
    target: f32,
}

impl MidpointEnv {
    /// Scores the output on `[-1, 1]` against 0.5
    pub fn new() -> Self {
        MidpointEnv::with_target(vec![-1., 1.], 0.5)
    }

    /// Scores the output on `[-1, 1, -1, ..]` of length `inputs` against 0.5
    pub fn for_inputs(inputs: usize) -> Self {
        let input = (0..inputs)
            .map(|i| if i % 2 == 0 { -1. } else { 1. })
            .collect();
        MidpointEnv::with_target(input, 0.5)
    }

    /// Scores the output on `input` against `target`
    pub fn with_target(input: Vec<f32>, target: f32) -> Self {
        MidpointEnv {
            input: input,
            target: target,
        }
    }
}

impl Default for MidpointEnv {
    fn default() -> Self {
        MidpointEnv::new()
    }
}

impl Environment<Network> for MidpointEnv {
    fn eval(&self, state: &Network) -> Result<(f32, Option<ScoreLogger>)> {
        let out = state.evaluate(&self.input[..])?;
        Ok((1. - (self.target - out[0]).abs(), None))
    }
}

/// Drives a population through score/evolve cycles and keeps the per-cycle
/// report.  All run state lives here.
pub struct Trainer<E: Environment<Network>> {
    population: Population<Network>,
    env: E,
    generations: usize,
    report_iter: usize,
    history: Vec<ScoreLogger>,
}

impl<E: Environment<Network>> Trainer<E> {
    /// Builds a random basis network and seeds the population with it
    pub fn new(config: &RunConfig, env: E) -> Result<Self> {
        let mut rng = match config.seed {
            Some(seed) => sampler::seeded(seed),
            None => sampler::from_entropy(),
        };
        let basis = config.architecture.init(&mut rng)?;
        let population: Population<Network> =
            Population::with_config(config.population, basis, config.generation, rng)?;

        Ok(Trainer {
            population: population,
            env: env,
            generations: config.generations,
            report_iter: config.report_iter,
            history: Vec::new(),
        })
    }

    /// Evaluates every individual and stores its fitness
    pub fn score(&mut self) -> Result<FitnessSummary> {
        for i in 0..self.population.len() {
            let (fitness, _logger) = self.env.eval(self.population.individual(i)?)?;
            self.population.set_fitness(i, fitness)?;
        }
        self.population.log_fitness()
    }

    /// Runs one cycle: score, record, evolve
    pub fn step(&mut self) -> Result<FitnessSummary> {
        self.env.step();
        let summary = self.score()?;

        let mut logger = ScoreLogger::new(None);
        logger.insert("Max".into(), summary.max);
        logger.insert("Avg".into(), summary.mean);
        logger.insert("Min".into(), summary.min);
        self.history.push(logger);

        self.population.evolve()?;
        Ok(summary)
    }

    /// Runs all configured cycles, reporting every `report_iter`
    pub fn run(&mut self) -> Result<()> {
        let now = SystemTime::now();
        for pass in 0..self.generations {
            let summary = self.step()?;
            if self.report_iter > 0 && pass % self.report_iter == 0 {
                let (s, m) = now
                    .elapsed()
                    .map(|e| (e.as_secs(), e.subsec_millis()))
                    .unwrap_or((0, 0));
                println!(
                    "Time:{}.{:03},\tIteration: {},\tMax: {:.04},\tAvg: {:.04},\tMin: {:.04}",
                    s, m, pass, summary.max, summary.mean, summary.min
                );
            }
        }
        Ok(())
    }

    /// The managed population
    pub fn population(&self) -> &Population<Network> {
        &self.population
    }

    /// Max/Avg/Min of every completed cycle
    pub fn history(&self) -> &[ScoreLogger] {
        &self.history
    }

    /// Best individual of the last completed cycle
    pub fn best(&self) -> Option<&State<Arc<Network>>> {
        self.population.best()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ng_core::error::Error;
    use ng_models::nn::Architecture;

    fn config(seed: u64, generations: usize) -> RunConfig {
        let mut config = RunConfig::default();
        config.architecture = Architecture::new(2, 1, 2, 3).unwrap();
        config.population = 20;
        config.generation.selection_factor = 2.;
        config.generations = generations;
        config.report_iter = 0;
        config.seed = Some(seed);
        config
    }

    #[test]
    fn test_midpoint_env() {
        let arch = Architecture::new(2, 1, 1, 1).unwrap();
        // All zeros: hidden = 0.5, output = sigmoid(0) = 0.5
        let net = Network::from_weights(arch, vec![vec![vec![0.; 3]], vec![vec![0.; 2]]]).unwrap();
        let (fitness, logger) = MidpointEnv::new().eval(&net).unwrap();
        assert!((fitness - 1.).abs() < 1e-6);
        assert!(logger.is_none());

        let env = MidpointEnv::with_target(vec![0., 0., 0.], 0.5);
        assert_eq!(
            env.eval(&net).err(),
            Some(Error::InvalidInput {
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn test_env_matches_inputs() {
        assert_eq!(MidpointEnv::for_inputs(2).input, vec![-1., 1.]);
        assert_eq!(MidpointEnv::for_inputs(3).input, vec![-1., 1., -1.]);

        let mut c = config(4, 5);
        c.architecture.inputs = 3;
        let env = MidpointEnv::for_inputs(c.architecture.inputs);
        let mut trainer = Trainer::new(&c, env).unwrap();
        trainer.run().unwrap();
        assert_eq!(trainer.population().gentop().len(), 5);
    }

    #[test]
    fn test_huge_generation_count() {
        let mut c = config(1, 0);
        c.generations = usize::max_value();
        let mut trainer = Trainer::new(&c, MidpointEnv::new()).unwrap();
        trainer.step().unwrap();
        assert_eq!(trainer.history().len(), 1);
    }

    #[test]
    fn test_invalid_config() {
        let mut c = config(1, 10);
        c.population = 0;
        assert_eq!(
            Trainer::new(&c, MidpointEnv::new()).err().map(|e| e.to_string()),
            Some(Error::EmptyPopulation.to_string())
        );

        let mut c = config(1, 10);
        c.architecture.hidden_layers = 0;
        match Trainer::new(&c, MidpointEnv::new()) {
            Err(Error::InvalidArchitecture(_)) => (),
            _ => panic!("hidden_layers = 0 should be rejected"),
        }
    }

    #[test]
    fn test_history_tracks_cycles() {
        let mut trainer = Trainer::new(&config(3, 25), MidpointEnv::new()).unwrap();
        trainer.run().unwrap();
        assert_eq!(trainer.history().len(), 25);
        assert_eq!(trainer.population().gentop().len(), 25);
        assert_eq!(trainer.population().generation(), 25);
        for log in trainer.history() {
            let (max, avg, min) = (
                log.get("Max").unwrap(),
                log.get("Avg").unwrap(),
                log.get("Min").unwrap(),
            );
            assert!(min <= avg + 1e-6 && avg <= max + 1e-6);
        }
    }

    #[test]
    fn test_seeded_runs_match() {
        let mut a = Trainer::new(&config(17, 50), MidpointEnv::new()).unwrap();
        let mut b = Trainer::new(&config(17, 50), MidpointEnv::new()).unwrap();
        a.run().unwrap();
        b.run().unwrap();
        assert_eq!(a.best().unwrap().fitness, b.best().unwrap().fitness);
        assert_eq!(a.best().unwrap().model, b.best().unwrap().model);
    }

    #[test]
    fn test_midpoint_evolution() {
        for seed in 0..5 {
            let mut trainer = Trainer::new(&config(seed, 1000), MidpointEnv::new()).unwrap();
            let first = trainer.step().unwrap();
            for _ in 1..1000 {
                let summary = trainer.step().unwrap();
                for v in &[summary.max, summary.mean, summary.min] {
                    assert!(*v >= 0. && *v <= 1.);
                }
            }
            let last = trainer.score().unwrap();
            assert!(last.max >= first.max);
            assert!(last.max > 0.98, "seed {} only reached {}", seed, last.max);

            let best = trainer.best().unwrap();
            let out = best.model.run(&[-1., 1.]).unwrap();
            assert!((1. - (0.5 - out[0]).abs() - best.fitness).abs() < 1e-6);
        }
    }
}
