use valour_games::console::prompt;
use valour_games::guessing::{Feedback, HiddenNumber, DEFAULT_HIGH, DEFAULT_LOW};

fn main() -> anyhow::Result<()> {
    valour_games::init_logging();

    let mut hidden = HiddenNumber::random(DEFAULT_LOW, DEFAULT_HIGH, &mut rand::thread_rng())?;
    println!("\nI picked a number from {DEFAULT_LOW} to {DEFAULT_HIGH}. Can you find it?\n");

    loop {
        let Some(answer) = prompt("Your guess: ")? else {
            return Ok(());
        };
        let Ok(guess) = answer.parse::<i64>() else {
            println!("{answer:?} is not a number, please try again.");
            continue;
        };

        match hidden.check(guess) {
            Feedback::Correct => break,
            other => println!("{guess} is {other}."),
        }
    }

    println!("You found it in {} tries!", hidden.attempts());
    Ok(())
}
