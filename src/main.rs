use std::{env, process};

use anyhow::Context;
use log::info;

use descent::{TrainerBuilder, loader, specs::TrainingSpec};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        eprintln!("Usage: {} <training.json>", args[0]);
        process::exit(1);
    }

    if let Err(e) = run(&args[1]) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(config_path: &str) -> anyhow::Result<()> {
    let mut spec = TrainingSpec::load(config_path)
        .with_context(|| format!("cannot load training spec '{config_path}'"))?;
    spec.apply_env()?;

    let dataset = loader::load_csv(&spec.dataset.path, &spec.dataset.feature, &spec.dataset.target)
        .with_context(|| format!("cannot load dataset '{}'", spec.dataset.path.display()))?;

    let range = dataset
        .feature_range()
        .context("the dataset has no valid points to fit")?;

    let builder = TrainerBuilder::new();
    let trainer = builder.build(&spec)?;
    let params = builder.initial_params(&spec);
    info!("starting from weight {} and bias {}", params.weight, params.bias);

    let mut training = trainer.train(&dataset, params);

    for snapshot in training.by_ref() {
        let s = snapshot?;
        let [(x0, y0), (x1, y1)] = s.fit_line(range);

        println!(
            "iteration {:>8}  weight {:>14.6}  bias {:>14.6}  cost {:>16.4}  line ({x0}, {y0:.2}) -> ({x1}, {y1:.2})",
            s.iteration, s.weight, s.bias, s.cost
        );
    }

    let result = training
        .outcome()
        .context("training stopped before its last iteration")?;

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
