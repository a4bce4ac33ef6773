use valour_games::guessing::{simulate_random_guesser, DEFAULT_HIGH, DEFAULT_LOW};

const ROUNDS: u32 = 1000;

fn main() -> anyhow::Result<()> {
    valour_games::init_logging();

    let average = simulate_random_guesser(ROUNDS, DEFAULT_LOW, DEFAULT_HIGH, &mut rand::thread_rng())?;
    println!("The average number of guesses is {average}");
    Ok(())
}
