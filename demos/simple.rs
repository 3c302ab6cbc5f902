use peterson_rs::broken::BrokenMutualExclusion;
use peterson_rs::harness::run_session;
use peterson_rs::peterson::CorrectMutualExclusion;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Debug,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let correct = CorrectMutualExclusion::default();
    println!("correct = {:?}", correct);
    let broken = BrokenMutualExclusion::default();
    println!("broken = {:?}", broken);

    let iterations = 100_000;

    let session = run_session::<CorrectMutualExclusion>(iterations)?;
    println!("correct: {} (consistent = {})", session, session.is_consistent());

    let session = run_session::<BrokenMutualExclusion>(iterations)?;
    println!("broken: {} (consistent = {})", session, session.is_consistent());

    Ok(())
}
