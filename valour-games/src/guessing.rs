//! Number guessing: the computer bisecting a human's number, the human
//! hunting a computer's number, and a simulation of a random guesser.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

pub const DEFAULT_LOW: i64 = 1;
pub const DEFAULT_HIGH: i64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    TooHigh,
    TooLow,
    Correct,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected h, l or c but got {0:?}")]
pub struct ParseFeedbackError(pub String);

impl FromStr for Feedback {
    type Err = ParseFeedbackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "h" => Ok(Feedback::TooHigh),
            "l" => Ok(Feedback::TooLow),
            "c" => Ok(Feedback::Correct),
            _ => Err(ParseFeedbackError(s.to_string())),
        }
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Feedback::TooHigh => "too high",
            Feedback::TooLow => "too low",
            Feedback::Correct => "correct",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuessError {
    #[error("empty range {low}..={high}")]
    InvalidRange { low: i64, high: i64 },
    #[error("those answers contradict each other, no number is left between {low} and {high}")]
    Contradiction { low: i64, high: i64 },
    #[error("there is no open guess to answer")]
    NoOpenGuess,
    #[error("the number was already found")]
    Finished,
}

/// The computer guesses a number in `[low, high]` by halving the interval.
#[derive(Debug, Clone)]
pub struct Bisector {
    low: i64,
    high: i64,
    open_guess: Option<i64>,
    attempts: u32,
    found: Option<i64>,
}

impl Bisector {
    pub fn new(low: i64, high: i64) -> Result<Self, GuessError> {
        if low > high {
            return Err(GuessError::InvalidRange { low, high });
        }
        Ok(Self { low, high, open_guess: None, attempts: 0, found: None })
    }

    pub fn next_guess(&mut self) -> Result<i64, GuessError> {
        if self.found.is_some() {
            return Err(GuessError::Finished);
        }
        if let Some(guess) = self.open_guess {
            return Ok(guess);
        }

        let guess = self.low + (self.high - self.low) / 2;
        self.open_guess = Some(guess);
        self.attempts += 1;
        Ok(guess)
    }

    /// Narrow the interval with the answer to the open guess.
    pub fn apply(&mut self, feedback: Feedback) -> Result<(), GuessError> {
        let guess = self.open_guess.take().ok_or(GuessError::NoOpenGuess)?;

        match feedback {
            Feedback::Correct => {
                self.found = Some(guess);
                return Ok(());
            }
            Feedback::TooHigh => self.high = guess - 1,
            Feedback::TooLow => self.low = guess + 1,
        }

        if self.low > self.high {
            return Err(GuessError::Contradiction { low: self.low, high: self.high });
        }
        Ok(())
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn found(&self) -> Option<i64> {
        self.found
    }
}

/// A number picked by the computer for the human to find.
#[derive(Debug, Clone)]
pub struct HiddenNumber {
    secret: i64,
    attempts: u32,
}

impl HiddenNumber {
    pub fn random<R: Rng + ?Sized>(low: i64, high: i64, rng: &mut R) -> Result<Self, GuessError> {
        if low > high {
            return Err(GuessError::InvalidRange { low, high });
        }
        Ok(Self::with_secret(rng.gen_range(low..=high)))
    }

    pub fn with_secret(secret: i64) -> Self {
        Self { secret, attempts: 0 }
    }

    /// Compare a guess with the secret. Every call counts as an attempt.
    pub fn check(&mut self, guess: i64) -> Feedback {
        self.attempts += 1;
        match guess.cmp(&self.secret) {
            std::cmp::Ordering::Greater => Feedback::TooHigh,
            std::cmp::Ordering::Less => Feedback::TooLow,
            std::cmp::Ordering::Equal => Feedback::Correct,
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}

/// Guesses a random guesser needs to find `secret` when every guess is
/// drawn uniformly from the interval still open.
pub fn random_guess_count<R: Rng + ?Sized>(secret: i64, low: i64, high: i64, rng: &mut R) -> u32 {
    let (mut low, mut high) = (low, high);
    let mut count = 0;

    loop {
        let guess = if low >= high { low } else { rng.gen_range(low..=high) };
        count += 1;
        match guess.cmp(&secret) {
            std::cmp::Ordering::Greater => high = guess - 1,
            std::cmp::Ordering::Less => low = guess + 1,
            std::cmp::Ordering::Equal => return count,
        }
    }
}

/// Average guess count of the random guesser over `rounds` random secrets.
pub fn simulate_random_guesser<R: Rng + ?Sized>(
    rounds: u32,
    low: i64,
    high: i64,
    rng: &mut R,
) -> Result<f64, GuessError> {
    if low > high {
        return Err(GuessError::InvalidRange { low, high });
    }
    if rounds == 0 {
        return Ok(0.0);
    }

    let mut total: u64 = 0;
    for _ in 0..rounds {
        let secret = rng.gen_range(low..=high);
        total += u64::from(random_guess_count(secret, low, high, rng));
    }

    let average = total as f64 / f64::from(rounds);
    tracing::debug!(rounds, low, high, average, "simulation finished");
    Ok(average)
}
