//! The generation manager: a fixed-size population which is scored externally
//! and regenerated through elitism plus rank-biased mutation.
extern crate float_ord;
extern crate rand;
extern crate rand_xorshift;

use std::cmp::Reverse;
use std::sync::Arc;

use self::float_ord::FloatOrd;
use self::rand::Rng;
use self::rand_xorshift::XorShiftRng;

use crate::error::{Error, Result};
use crate::model::Genome;
use crate::optimizer::State;
use crate::sampler;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
/// Settings for the generation manager
pub struct GenerationConfig {
    /// Exponent applied to the uniform draw when picking a parent.  Higher
    /// values pick the fittest ranks more often.
    pub selection_factor: f32,

    /// Fraction of the population carried over unchanged each cycle
    pub elite_fraction: f32,

    /// Probability that any single weight is replaced during mutation
    pub mutation_chance: f32,

    /// Replaced weights are drawn from `[-mutation_change, mutation_change)`
    pub mutation_change: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig {
            selection_factor: 2.,
            elite_fraction: 0.1,
            mutation_chance: 0.1,
            mutation_change: 1.,
        }
    }
}

impl GenerationConfig {
    /// Default settings with the provided selection factor
    pub fn with_selection_factor(selection_factor: f32) -> Self {
        GenerationConfig {
            selection_factor: selection_factor,
            ..GenerationConfig::default()
        }
    }

    fn validate(&self) -> Result<()> {
        if !self.selection_factor.is_finite() || self.selection_factor <= 0. {
            return Err(Error::InvalidSelectionFactor(self.selection_factor));
        }
        Ok(())
    }

    /// Number of elites kept for a population of `size`
    pub fn elites(&self, size: usize) -> usize {
        let count = (size as f64 * self.elite_fraction.max(0.) as f64).floor() as usize;
        count.min(size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Max, mean and min of a fully scored generation
pub struct FitnessSummary {
    /// Highest fitness
    pub max: f32,
    /// Average fitness
    pub mean: f32,
    /// Lowest fitness
    pub min: f32,
}

/// A fixed-size population of genomes sharing one architecture.
///
/// Generation 0 is genomically uniform: every slot holds a reference to the
/// same basis genome until the first `evolve` diversifies them.  Individuals
/// are immutable once created, so elites and the `gentop` history share them
/// by reference as well.
pub struct Population<G: Genome, R: Rng = XorShiftRng> {
    pop: Vec<Arc<G>>,
    fitness: Vec<Option<f32>>,
    gentop: Vec<State<Arc<G>>>,
    config: GenerationConfig,
    generation: usize,
    rng: R,
}

impl<G: Genome, R: Rng> Population<G, R> {
    /// Creates a population of `size` references to `basis`, using default
    /// mutation settings and the provided selection factor.
    pub fn new<B: Into<Arc<G>>>(size: usize, basis: B, selection_factor: f32, rng: R) -> Result<Self> {
        Self::with_config(
            size,
            basis,
            GenerationConfig::with_selection_factor(selection_factor),
            rng,
        )
    }

    /// Creates a population of `size` references to `basis`
    pub fn with_config<B: Into<Arc<G>>>(
        size: usize,
        basis: B,
        config: GenerationConfig,
        rng: R,
    ) -> Result<Self> {
        if size == 0 {
            return Err(Error::EmptyPopulation);
        }
        config.validate()?;

        let basis = basis.into();
        Ok(Population {
            pop: vec![basis; size],
            fitness: vec![None; size],
            gentop: Vec::new(),
            config: config,
            generation: 0,
            rng: rng,
        })
    }

    #[inline]
    /// Population size.  Constant over the population's lifetime.
    pub fn len(&self) -> usize {
        self.pop.len()
    }

    #[inline]
    /// Always false: a population holds at least one individual
    pub fn is_empty(&self) -> bool {
        self.pop.is_empty()
    }

    /// Settings used by `evolve`
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Selection pressure exponent
    pub fn selection_factor(&self) -> f32 {
        self.config.selection_factor
    }

    /// Number of completed `evolve` cycles
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Gets the individual at `index`
    pub fn individual(&self, index: usize) -> Result<&Arc<G>> {
        let size = self.len();
        self.pop
            .get(index)
            .ok_or(Error::IndexOutOfRange { index, size })
    }

    /// All individuals of the current cycle, in slot order
    pub fn individuals(&self) -> &[Arc<G>] {
        &self.pop
    }

    /// Sets the fitness of the individual at `index` for the current cycle.
    /// NaN and infinite values are rejected and leave the slot untouched.
    pub fn set_fitness(&mut self, index: usize, value: f32) -> Result<()> {
        let size = self.len();
        match self.fitness.get_mut(index) {
            Some(_) if !value.is_finite() => Err(Error::InvalidFitness(value)),
            Some(slot) => {
                *slot = Some(value);
                Ok(())
            }
            None => Err(Error::IndexOutOfRange { index, size }),
        }
    }

    /// Fitness of the individual at `index`, if set this cycle
    pub fn fitness(&self, index: usize) -> Option<f32> {
        self.fitness.get(index).and_then(|f| *f)
    }

    /// History of the best individual of every completed cycle, oldest first
    pub fn gentop(&self) -> &[State<Arc<G>>] {
        &self.gentop
    }

    /// Best individual of the most recently completed cycle
    pub fn best(&self) -> Option<&State<Arc<G>>> {
        self.gentop.last()
    }

    // Returns the fitness of every slot, or how many are still missing
    fn scored(&self) -> Result<Vec<f32>> {
        let missing = self.fitness.iter().filter(|f| f.is_none()).count();
        if missing > 0 {
            return Err(Error::IncompleteFitness {
                missing: missing,
                size: self.len(),
            });
        }
        Ok(self.fitness.iter().filter_map(|f| *f).collect())
    }

    /// Computes max, mean and min over the current cycle's fitness
    pub fn log_fitness(&self) -> Result<FitnessSummary> {
        let mut sorted = self.scored()?;
        sorted.sort_by_key(|f| Reverse(FloatOrd(*f)));

        let mean = sorted.iter().sum::<f32>() / sorted.len() as f32;
        Ok(FitnessSummary {
            max: sorted[0],
            mean: mean,
            min: sorted[sorted.len() - 1],
        })
    }

    /// Moves to the next generation in place.
    ///
    /// Ranks the current individuals by fitness, records the top one in
    /// `gentop`, keeps the elites unchanged and fills the remaining slots with
    /// mutated copies of rank-biased picks.  Fitness is reset afterwards.
    pub fn evolve(&mut self) -> Result<&mut Self> {
        let fitness = self.scored()?;
        let size = self.len();

        // Stable, so ties keep slot order
        let mut ranked: Vec<(Arc<G>, f32)> = self.pop.iter().cloned().zip(fitness).collect();
        ranked.sort_by_key(|(_, f)| Reverse(FloatOrd(*f)));

        self.gentop
            .push(State::new(ranked[0].0.clone(), ranked[0].1, None));

        let mut next: Vec<Arc<G>> = ranked
            .iter()
            .take(self.config.elites(size))
            .map(|(g, _)| g.clone())
            .collect();

        while next.len() < size {
            let rank = sampler::rank_biased_index(&mut self.rng, size, self.config.selection_factor);
            let child = ranked[rank].0.mutate(
                self.config.mutation_chance,
                self.config.mutation_change,
                &mut self.rng,
            );
            next.push(Arc::new(child));
        }

        self.pop = next;
        self.fitness = vec![None; size];
        self.generation += 1;
        Ok(self)
    }
}
