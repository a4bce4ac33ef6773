use anyhow::Context;

use valour_games::console::prompt;
use valour_games::hangman::{pick_word, Game, GuessOutcome, WORDS};

fn main() -> anyhow::Result<()> {
    valour_games::init_logging();

    let word = pick_word(WORDS, &mut rand::thread_rng()).context("word list has no playable words")?;
    let mut game = Game::new(&word);

    while !game.is_won() {
        println!("\n\nYou have used these letters: {}", game.used_letters());
        println!("Current word: {}", game.masked());

        let Some(answer) = prompt("Guess a letter: ")? else {
            return Ok(());
        };

        match game.guess(&answer) {
            GuessOutcome::Hit | GuessOutcome::Miss => {}
            GuessOutcome::AlreadyUsed(letter) => println!("Letter {letter} is already used, please try again."),
            GuessOutcome::NotALetter => println!("{} is not a letter, please try again.", answer.to_uppercase()),
        }
    }

    println!("\nCongrats, you guessed the word {} in {} tries!\n", game.word(), game.attempts());
    Ok(())
}
