extern crate ng_core;
extern crate ng_models;
extern crate serde_json;
extern crate thiserror;

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use self::ng_core::generation::GenerationConfig;
use self::ng_models::nn::Architecture;
use self::thiserror::Error;

#[derive(Debug, Error)]
/// Error conditions due to loading a run configuration
pub enum ConfigError {
    /// Config file couldn't be read
    #[error("unable to read config: {0}")]
    Io(#[from] io::Error),

    /// Config file isn't valid json for a `RunConfig`
    #[error("unable to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A command line value couldn't be parsed
    #[error("invalid value for --{name}: {value}")]
    InvalidArg {
        /// Argument name
        name: String,
        /// Value as given
        value: String,
    },

    /// The sample input doesn't fit the configured network
    #[error("sample has {found} values but the network takes {inputs} inputs")]
    SampleMismatch {
        /// Configured input count
        inputs: usize,
        /// Length of the sample
        found: usize,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
/// Everything the driver needs to run an evolution
pub struct RunConfig {
    /// Shape of every network in the population
    pub architecture: Architecture,

    /// Number of individuals
    pub population: usize,

    /// Selection and mutation settings
    pub generation: GenerationConfig,

    /// Number of score/evolve cycles to run
    pub generations: usize,

    /// How often to report progress.  0 disables reporting
    pub report_iter: usize,

    /// Random seed.  Runs are not reproducible without one
    pub seed: Option<u64>,

    /// Input the final best network is run on
    pub sample: Vec<f32>,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            architecture: Architecture {
                inputs: 2,
                outputs: 1,
                hidden_layers: 3,
                neurons: 3,
            },
            population: 20,
            generation: GenerationConfig::default(),
            generations: 1000,
            report_iter: 100,
            seed: None,
            sample: vec![10., 13.],
        }
    }
}

impl RunConfig {
    /// Reads a json config.  Missing fields take their default value
    pub fn from_reader<A: Read>(reader: A) -> Result<Self, ConfigError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Loads a json config from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        RunConfig::from_reader(BufReader::new(file))
    }

    /// Checks that the sample input can be fed to the configured network
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample.len() != self.architecture.inputs {
            return Err(ConfigError::SampleMismatch {
                inputs: self.architecture.inputs,
                found: self.sample.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate tempfile;

    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = RunConfig::default();
        assert_eq!(config.population, 20);
        assert_eq!(config.generation.selection_factor, 2.);
        assert_eq!(config.generation.mutation_chance, 0.1);
        assert!(config.architecture.validate().is_ok());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sample_must_fit_inputs() {
        let mut config = RunConfig::default();
        config.architecture.inputs = 3;
        match config.validate() {
            Err(ConfigError::SampleMismatch { inputs: 3, found: 2 }) => (),
            other => panic!("expected SampleMismatch, got {:?}", other),
        }
        config.sample = vec![0., 1., 2.];
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let json = r#"{"population": 50, "generation": {"selection_factor": 3.0}, "seed": 7}"#;
        let config = RunConfig::from_reader(json.as_bytes()).unwrap();
        assert_eq!(config.population, 50);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.generation.selection_factor, 3.);
        assert_eq!(config.generation.elite_fraction, 0.1);
        assert_eq!(config.architecture, RunConfig::default().architecture);
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"architecture": {{"inputs": 4, "outputs": 2, "hidden_layers": 1, "neurons": 8}}}}"#
        )
        .unwrap();

        let config = RunConfig::load(file.path()).unwrap();
        assert_eq!(config.architecture.inputs, 4);
        assert_eq!(config.architecture.neurons, 8);
        assert_eq!(config.generations, 1000);
    }

    #[test]
    fn test_load_errors() {
        match RunConfig::load("/this/path/does/not/exist.json") {
            Err(ConfigError::Io(_)) => (),
            other => panic!("expected io error, got {:?}", other),
        }
        match RunConfig::from_reader("{ not json".as_bytes()) {
            Err(ConfigError::Parse(_)) => (),
            other => panic!("expected parse error, got {:?}", other),
        }
    }
}
