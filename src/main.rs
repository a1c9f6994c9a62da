use chrono::Local;
use clap::{Command, CommandFactory, Parser};
use clap_complete::{generate, Generator};
use conv_testgen::{
    cmd_args::Args, settings::Settings, GenerationResult, InputGenerator, Pipeline,
};
use log::info;
use std::io;
fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let start_time = std::time::Instant::now();

    let mut config_names = vec![String::from("configs/default.toml")];
    let args = Args::parse();
    if let Some(generator) = args.generator {
        let mut cmd = Args::command();
        eprintln!("Generating completion file for {:?}...", generator);
        print_completions(generator, &mut cmd);
        return Ok(());
    }
    let level = if args.verbose {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    simple_logger::init_with_level(level)?;
    println!("{:?}", args);

    // config_names append args
    for arg in args.config_names.into_iter() {
        config_names.push(arg);
    }

    let mut results = GenerationResult::new();
    let mut settings = Settings::new(config_names)?;
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    let mut generator = match settings.seed {
        Some(seed) => InputGenerator::new(seed),
        None => {
            let generator = InputGenerator::from_entropy();
            info!("no seed configured, using {}", generator.seed());
            generator
        }
    };
    settings.seed = Some(generator.seed());
    results.settings = Some(settings.clone());
    println!("{}", serde_json::to_string_pretty(&settings)?);

    let pipeline = Pipeline::new(settings)?;
    let mut stat = pipeline.run(&mut generator)?;

    // record the generation time
    let generation_time = start_time.elapsed().as_millis();
    let seconds = generation_time / 1000;
    let millis = generation_time % 1000;
    stat.generation_time = format!("{}.{:03}s", seconds, millis);
    println!("{}", stat);

    results.stats = Some(stat);
    // create the folder for the report
    std::fs::create_dir_all(&args.report_dir)?;
    let current_time: String = Local::now().format("%Y-%m-%d-%H-%M-%S%.6f").to_string();
    let output_path = format!("{}/{}.json", args.report_dir, current_time);

    println!("{}", serde_json::to_string_pretty(&results)?);
    // write json of results to output_path
    std::fs::write(output_path, serde_json::to_string_pretty(&results)?)?;
    Ok(())
}
