use valour_games::console::prompt;
use valour_games::guessing::{Bisector, Feedback, DEFAULT_HIGH, DEFAULT_LOW};

fn main() -> anyhow::Result<()> {
    valour_games::init_logging();

    println!("\nI am going to guess a number that you are thinking of from {DEFAULT_LOW} to {DEFAULT_HIGH}\n");
    let mut bisector = Bisector::new(DEFAULT_LOW, DEFAULT_HIGH)?;

    loop {
        let guess = bisector.next_guess()?;
        let Some(answer) = prompt(&format!("Is the number {guess} too high (h), too low (l), or correct (c)? "))? else {
            return Ok(());
        };

        let feedback = match answer.parse::<Feedback>() {
            Ok(feedback) => feedback,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        if let Err(e) = bisector.apply(feedback) {
            println!("Hmm, {e}. Let's start over.");
            return Ok(());
        }
        if bisector.found().is_some() {
            break;
        }
    }

    println!("I guessed your number correctly in {} tries!", bisector.attempts());
    Ok(())
}
