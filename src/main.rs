use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use momentum::bake::overshootbaker::OvershootBaker;
use momentum::bake::scene::Scene;
use momentum::configuration::Configuration;
use momentum::momentumerror::MomentumError;

#[derive(Parser, Debug)]
#[command(author, version, about = "Bake overshoot keyframes past the selected keyframe of each curve")]
struct Args {
    /// JSON scene with channels and bake records
    #[arg(long)]
    scene: PathBuf,
    /// JSON configuration (overshoot / estimator settings)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Where to write the baked scene; defaults to overwriting --scene
    #[arg(long)]
    output: Option<PathBuf>,
    #[arg(long)]
    timing: Option<u32>,
    #[arg(long)]
    decay: Option<f64>,
    #[arg(long)]
    amplitude: Option<f64>,
    /// Stop baking at the first existing keyframe instead of overwriting it
    #[arg(long)]
    no_overwrite: bool,
}

fn load_configuration(args: &Args) -> Result<Configuration, MomentumError> {
    let mut configuration = match &args.config {
        Some(path) => Configuration::from_reader(path)?,
        None => Configuration::new(),
    };
    if let Some(timing) = args.timing {
        configuration.overshoot.timing = timing;
    }
    if let Some(decay) = args.decay {
        configuration.overshoot.decay = decay;
    }
    if let Some(amplitude) = args.amplitude {
        configuration.overshoot.amplitude = amplitude;
    }
    if args.no_overwrite {
        configuration.overshoot.overwrite_keyframes = false;
    }
    configuration.validate()?;
    Ok(configuration)
}

fn run(args: &Args) -> Result<(), MomentumError> {
    let configuration = load_configuration(args)?;
    let mut scene = Scene::from_reader(&args.scene)?;

    let baker = OvershootBaker::new(&configuration);
    let report = baker.bake(&mut scene.channels, &mut scene.bake_records)?;
    for message in report.messages() {
        println!("{}", message);
    }

    let output = args.output.as_ref().unwrap_or(&args.scene);
    scene.to_writer(output)?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if error.is_input_error() {
                println!("[ERROR] {}", error);
            } else {
                eprintln!("momentum: {}", error);
            }
            ExitCode::FAILURE
        }
    }
}
