use anyhow::{bail, Result};
use log::info;
use std::path::PathBuf;

use repwise::audio::Beeper;
use repwise::pipeline::ExercisePipeline;
use repwise::source::{PoseSource, ReplaySource};
use repwise::storage::{save_session_stats, DEFAULT_WORKOUT_DIR};
use repwise::{policy_for, NullAlerter};

struct Args {
    exercise: String,
    input: PathBuf,
    out_dir: PathBuf,
    mute: bool,
}

fn parse_args() -> Result<Args> {
    let mut exercise = "squat".to_string();
    let mut input: Option<PathBuf> = None;
    let mut out_dir = PathBuf::from(DEFAULT_WORKOUT_DIR);
    let mut mute = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--exercise" => {
                exercise = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--exercise needs a value"))?;
            }
            "--input" => {
                input = Some(PathBuf::from(
                    args.next()
                        .ok_or_else(|| anyhow::anyhow!("--input needs a value"))?,
                ));
            }
            "--out" => {
                out_dir = PathBuf::from(
                    args.next()
                        .ok_or_else(|| anyhow::anyhow!("--out needs a value"))?,
                );
            }
            "--mute" => mute = true,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => bail!("unknown argument: {other}"),
        }
    }

    let Some(input) = input else {
        print_usage();
        bail!("--input is required");
    };
    Ok(Args {
        exercise,
        input,
        out_dir,
        mute,
    })
}

fn print_usage() {
    eprintln!(
        "Usage: repwise --input <frames.jsonl> [--exercise squat|pushup] \
         [--out <dir>] [--mute]"
    );
}

fn main() -> Result<()> {
    env_logger::init();
    let args = parse_args()?;

    let Some(policy) = policy_for(&args.exercise) else {
        bail!("unknown exercise: {} (expected squat or pushup)", args.exercise);
    };
    info!("starting {} session from {}", policy.name, args.input.display());

    let mut pipeline = if args.mute {
        ExercisePipeline::new(policy, Box::new(NullAlerter))
    } else {
        ExercisePipeline::new(policy, Box::new(Beeper::new()))
    };

    let mut source = ReplaySource::open(&args.input)?;
    let mut frames = 0u64;
    let mut last_count = 0.0;
    while let Some(frame) = source.next_frame()? {
        let result = pipeline.process_frame(&frame);
        frames += 1;
        if result.count != last_count {
            last_count = result.count;
            println!(
                "rep {:>5.1}  ({:3.0}%)  {}",
                result.count, result.percentage, result.feedback
            );
        }
    }
    info!("processed {frames} frames");

    match pipeline.analytics().stats() {
        Some(stats) => {
            println!(
                "\nSession summary: {} reps, avg depth {:.1}%, good form {:.1}%, \
                 {:.1} reps/min over {:.1} min",
                stats.total_reps,
                stats.avg_depth,
                stats.good_form_percentage,
                stats.reps_per_min,
                stats.session_duration_min,
            );
            let path = save_session_stats(&stats, &args.out_dir)?;
            println!("Saved workout data to {}", path.display());
        }
        None => println!("\nNo reps recorded this session."),
    }

    Ok(())
}
