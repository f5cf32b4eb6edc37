extern crate clap;
extern crate ng;

use std::error::Error;
use std::process;

use clap::App;

use ng::bin_utils::args::{ArgAugmenter, RunArgs};
use ng::example::{MidpointEnv, Trainer};

fn run() -> Result<(), Box<dyn Error>> {
    let app = App::new("neurogen")
        .version("0.1.0")
        .about("Evolves a feed-forward network to output 0.5 on [-1, 1, ..]");
    let args = RunArgs.add_args(app).get_matches();
    let config = RunArgs.load_from_args(&args)?;

    println!(
        "Population: {},\tSelection factor: {},\tArchitecture: {:?}",
        config.population, config.generation.selection_factor, config.architecture
    );

    let mut trainer = Trainer::new(&config, MidpointEnv::for_inputs(config.architecture.inputs))?;
    trainer.run()?;

    if let Some(best) = trainer.best() {
        println!("Best Score: {}, Best Model: {:?}", best.fitness, best.model.weights());
        println!(
            "Output on {:?}: {:?}",
            config.sample,
            best.model.run(&config.sample)?
        );
    }
    Ok(())
}

fn main() -> () {
    if let Err(e) = run() {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
