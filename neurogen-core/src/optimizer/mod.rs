extern crate hashbrown;
use std::fmt::Debug;

use self::hashbrown::HashMap;

use crate::error::Result;

#[derive(Clone, Default)]
/// Logger for outputting scores
pub struct ScoreLogger {
    /// Score name to score value
    counts: HashMap<String, f32>,
}

impl ScoreLogger {
    /// Returns a new ScoreLogger
    pub fn new(counts_opt: Option<HashMap<String, f32>>) -> ScoreLogger {
        match counts_opt {
            Some(counts) => ScoreLogger { counts: counts },
            None => ScoreLogger {
                counts: HashMap::new(),
            },
        }
    }

    #[inline]
    /// Adds a score
    pub fn insert(&mut self, key: String, value: f32) -> () {
        self.counts.insert(key, value);
    }

    #[inline]
    /// Gets a score
    pub fn get(&self, key: &str) -> Option<f32> {
        self.counts.get(key).map(|x| *x)
    }

    /// Number of logged scores
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether nothing has been logged
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterates over the logged scores
    pub fn iter(&self) -> impl Iterator<Item = (&String, &f32)> {
        self.counts.iter()
    }
}

impl Debug for ScoreLogger {
    /// Prints the scores
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        // sort counts
        let mut data: Vec<(&String, &f32)> = self.counts.iter().collect();
        data.sort_by_key(|(k, _v)| *k);
        write!(f, "{:?}", data)
    }
}

#[derive(Clone, Debug)]
/// A model paired with the fitness it was scored with
pub struct State<S: Clone> {
    /// The scored model
    pub model: S,
    /// Fitness the model received
    pub fitness: f32,
    /// Optional named scores from the evaluation
    pub logger: Option<ScoreLogger>,
}

impl<S: Clone> State<S> {
    /// Returns a new state
    pub fn new(model: S, fitness: f32, logger: Option<ScoreLogger>) -> Self {
        State {
            model: model,
            fitness: fitness,
            logger: logger,
        }
    }
}

/// Fitness function which evaluates state.  Implemented by drivers; the core
/// never calls it directly.
pub trait Environment<State> {
    /// Updates the environment before a new cycle.
    /// `true` indicates the environment is stochastic
    fn step(&mut self) -> bool {
        false
    }

    /// Evaluates a given state, returning the fitness.
    /// Higher is better.
    fn eval(&self, s: &State) -> Result<(f32, Option<ScoreLogger>)>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_insert_get() {
        let mut logger = ScoreLogger::new(None);
        assert!(logger.is_empty());
        logger.insert("Max".into(), 0.9);
        logger.insert("Min".into(), 0.1);
        logger.insert("Max".into(), 0.95);
        assert_eq!(logger.len(), 2);
        assert_eq!(logger.get("Max"), Some(0.95));
        assert_eq!(logger.get("Avg"), None);
        assert_eq!(format!("{:?}", logger), "[(\"Max\", 0.95), (\"Min\", 0.1)]");
    }
}
