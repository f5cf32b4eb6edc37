use std::str::FromStr;

use clap::{App, Arg, ArgMatches};

use super::config::{ConfigError, RunConfig};

/// Trait to add new arguments to the current app
pub trait ArgAugmenter {
    /// Type of struct to output from this parser
    type Output;

    /// Specifies arguments to add
    fn add_args<'a, 'b>(&self, app: App<'a, 'b>) -> App<'a, 'b>;

    /// Parses the arguments
    fn load_from_args<'a>(&self, args: &ArgMatches<'a>) -> Self::Output;
}

// Parses an optional argument, failing on values that don't parse
fn opt_value<T: FromStr>(args: &ArgMatches, name: &str) -> Result<Option<T>, ConfigError> {
    match args.value_of(name) {
        None => Ok(None),
        Some(v) => v
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidArg {
                name: name.into(),
                value: v.into(),
            }),
    }
}

/// Struct defining the run arguments using ArgAugmenter.  Values given on the
/// command line override the ones from `--config`.
pub struct RunArgs;

impl ArgAugmenter for RunArgs {
    type Output = Result<RunConfig, ConfigError>;

    /// Specifies arguments to add for the run
    fn add_args<'a, 'b>(&self, app: App<'a, 'b>) -> App<'a, 'b> {
        app
      .arg(Arg::with_name("config")
           .short("c")
           .long("config")
           .takes_value(true)
           .help("Json file with the run configuration"))
      .arg(Arg::with_name("inputs")
           .long("inputs")
           .takes_value(true)
           .help("Number of input nodes"))
      .arg(Arg::with_name("outputs")
           .long("outputs")
           .takes_value(true)
           .help("Number of output nodes"))
      .arg(Arg::with_name("hidden-layers")
           .long("hidden-layers")
           .takes_value(true)
           .help("Number of hidden layers.  Must be at least 1"))
      .arg(Arg::with_name("neurons")
           .long("neurons")
           .takes_value(true)
           .help("Neurons per hidden layer"))
      .arg(Arg::with_name("population")
           .short("p")
           .long("population")
           .takes_value(true)
           .help("Number of individuals per generation"))
      .arg(Arg::with_name("selection-factor")
           .short("s")
           .long("selection-factor")
           .takes_value(true)
           .help("Selection pressure.  Higher values favor the fittest more"))
      .arg(Arg::with_name("generations")
           .short("i")
           .long("generations")
           .takes_value(true)
           .help("Number of generations to run before exiting"))
      .arg(Arg::with_name("report")
           .short("r")
           .long("report")
           .takes_value(true)
           .help("How often to report progress.  0 disables reports"))
      .arg(Arg::with_name("seed")
           .long("seed")
           .takes_value(true)
           .help("Random seed for reproducible runs"))
      .arg(Arg::with_name("sample")
           .long("sample")
           .takes_value(true)
           .multiple(true)
           .allow_hyphen_values(true)
           .help("Input to run the best network on once finished"))
    }

    /// Parses the arguments for the run
    fn load_from_args<'a>(&self, args: &ArgMatches<'a>) -> Self::Output {
        let mut config = match args.value_of("config") {
            Some(path) => RunConfig::load(path)?,
            None => RunConfig::default(),
        };

        if let Some(v) = opt_value(args, "inputs")? {
            config.architecture.inputs = v;
        }
        if let Some(v) = opt_value(args, "outputs")? {
            config.architecture.outputs = v;
        }
        if let Some(v) = opt_value(args, "hidden-layers")? {
            config.architecture.hidden_layers = v;
        }
        if let Some(v) = opt_value(args, "neurons")? {
            config.architecture.neurons = v;
        }
        if let Some(v) = opt_value(args, "population")? {
            config.population = v;
        }
        if let Some(v) = opt_value(args, "selection-factor")? {
            config.generation.selection_factor = v;
        }
        if let Some(v) = opt_value(args, "generations")? {
            config.generations = v;
        }
        if let Some(v) = opt_value(args, "report")? {
            config.report_iter = v;
        }
        if let Some(v) = opt_value(args, "seed")? {
            config.seed = Some(v);
        }
        if let Some(values) = args.values_of("sample") {
            let mut sample = Vec::new();
            for v in values {
                sample.push(v.parse::<f32>().map_err(|_| ConfigError::InvalidArg {
                    name: "sample".into(),
                    value: v.into(),
                })?);
            }
            config.sample = sample;
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Result<RunConfig, ConfigError> {
        let app = RunArgs.add_args(App::new("test"));
        let matches = app.get_matches_from(argv.iter().cloned());
        RunArgs.load_from_args(&matches)
    }

    #[test]
    fn test_defaults() {
        assert_eq!(parse(&["test"]).unwrap(), RunConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = parse(&[
            "test",
            "--inputs",
            "3",
            "--hidden-layers",
            "2",
            "-p",
            "40",
            "-s",
            "1.5",
            "--seed",
            "99",
            "--sample",
            "0.5",
            "-1",
            "2",
        ])
        .unwrap();
        assert_eq!(config.architecture.inputs, 3);
        assert_eq!(config.architecture.hidden_layers, 2);
        assert_eq!(config.architecture.outputs, 1);
        assert_eq!(config.population, 40);
        assert_eq!(config.generation.selection_factor, 1.5);
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.sample, vec![0.5, -1., 2.]);
    }

    #[test]
    fn test_inputs_without_matching_sample() {
        match parse(&["test", "--inputs", "3"]) {
            Err(ConfigError::SampleMismatch { inputs, found }) => {
                assert_eq!(inputs, 3);
                assert_eq!(found, 2);
            }
            other => panic!("expected SampleMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_value() {
        match parse(&["test", "--population", "many"]) {
            Err(ConfigError::InvalidArg { name, value }) => {
                assert_eq!(name, "population");
                assert_eq!(value, "many");
            }
            other => panic!("expected InvalidArg, got {:?}", other),
        }
    }
}
