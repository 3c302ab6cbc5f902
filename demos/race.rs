use std::time::Duration;

use clap::{Parser, ValueEnum};

use peterson_rs::broken::BrokenMutualExclusion;
use peterson_rs::harness::{run_until, RunConfig, RunReport, Session};
use peterson_rs::peterson::CorrectMutualExclusion;

#[derive(Debug, Copy, Clone, ValueEnum)]
enum Variant {
    /// Flag/turn protocol with a check-then-act race.
    Broken,
    /// Peterson's algorithm.
    Correct,
}

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Primitive to run.
    #[arg(long, value_enum, default_value = "broken")]
    variant: Variant,

    /// Accesses per participant per session.
    #[arg(long, value_name = "INT", default_value = "500000")]
    iterations: usize,

    /// Time budget in seconds.
    #[arg(long, value_name = "INT", default_value = "10")]
    seconds: u64,

    /// Keep running after the first diverging session.
    #[arg(long)]
    keep_going: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let args = Cli::parse();
    println!("args = {:?}", args);

    let config = RunConfig {
        iterations: args.iterations,
        time_budget: Duration::from_secs(args.seconds),
    };

    let mut diverged = 0usize;
    let stop = |session: &Session| {
        if session.is_consistent() {
            return false;
        }
        diverged += 1;
        println!("diverged: {} (lost {})", session, session.lost());
        !args.keep_going
    };

    let report: RunReport = match args.variant {
        Variant::Broken => run_until::<BrokenMutualExclusion, _>(config, stop)?,
        Variant::Correct => run_until::<CorrectMutualExclusion, _>(config, stop)?,
    };

    println!(
        "{:?}: {} sessions, {} diverged, done in {:.3} s",
        args.variant,
        report.sessions,
        diverged,
        report.elapsed.as_secs_f64()
    );

    Ok(())
}
