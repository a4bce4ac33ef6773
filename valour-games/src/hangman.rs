//! Word guessing, one letter at a time.

use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::Rng;

pub const WORDS: &[&str] = &[
    "abruptly", "absurd", "abyss", "affix", "askew", "avenue", "awkward", "axiom", "bagpipes",
    "bandwagon", "banjo", "bayou", "beekeeper", "blitz", "blizzard", "boggle", "bookworm", "boxcar",
    "buckaroo", "buffalo", "buzzard", "buzzwords", "caliph", "cobweb", "cockiness", "croquet",
    "crypt", "curacao", "cycle", "daiquiri", "dirndl", "disavow", "dizzying", "duplex", "dwarves",
    "embezzle", "equip", "espionage", "exodus", "faking", "fishhook", "fixable", "fjord", "flapjack",
    "flopping", "fluffiness", "flyby", "foxglove", "frazzled", "frizzled", "fuchsia", "funny",
    "gabby", "galaxy", "galvanize", "gazebo", "giaour", "gizmo", "glowworm", "glyph", "gnarly",
    "gnostic", "gossip", "grogginess", "haiku", "haphazard", "hyphen", "iatrogenic", "icebox",
    "injury", "ivory", "ivy", "jackpot", "jaundice", "jawbreaker", "jaywalk", "jazziest", "jelly",
    "jigsaw", "jinx", "jiujitsu", "jockey", "jogging", "joking", "jovial", "joyful", "juicy",
    "jukebox", "jumbo", "kayak", "kazoo", "keyhole", "khaki", "kilobyte", "kiosk", "kitsch",
    "kiwifruit", "klutz", "knapsack", "larynx", "lengths", "lucky", "luxury", "lymph", "marquis",
    "matrix", "megahertz", "microwave", "mnemonic", "mystify", "naphtha", "nightclub", "nowadays",
    "numbskull", "nymph", "onyx", "ovary", "oxidize", "oxygen", "pajama", "peekaboo", "phlegm",
    "pixel", "pizazz", "pneumonia", "polka", "pshaw", "psyche", "puppy", "puzzling", "quartz",
    "queue", "quips", "quixotic", "quiz", "quizzes", "quorum", "razzmatazz", "rhubarb", "rhythm",
    "rickshaw", "schnapps", "scratch", "shiv", "snazzy", "sphinx", "spritz", "squawk", "staff",
    "strength", "strengths", "stretch", "stronghold", "stymied", "subway", "swivel", "syndrome",
    "thriftless", "thumbscrew", "topaz", "transcript", "transgress", "transplant", "triphthong",
    "twelfth", "twelfths", "unknown", "unworthy", "unzip", "uptown", "vaporize", "vixen", "vodka",
    "voodoo", "vortex", "voyeurism", "walkway", "waltz", "wave", "wavy", "waxy", "wellspring",
    "wheezy", "whiskey", "whizzing", "whomever", "wimpy", "witchcraft", "wizard", "woozy",
    "wristwatch", "wyvern", "xylophone", "yachtsman", "yippee", "yoked", "youthful", "yummy",
    "zephyr", "zigzag", "zigzagging", "zilch", "zipper", "zodiac", "zombie", "ice-cream",
    "living room", "x-ray", "well-being", "post office",
];

/// Words with spaces or hyphens are never chosen.
pub fn is_playable(word: &str) -> bool {
    !word.is_empty() && !word.contains(['-', ' '])
}

/// A random playable word from `words`, uppercased.
pub fn pick_word<R: Rng + ?Sized>(words: &[&str], rng: &mut R) -> Option<String> {
    let playable: Vec<&str> = words.iter().copied().filter(|w| is_playable(w)).collect();
    playable.choose(rng).map(|w| w.to_uppercase())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Hit,
    Miss,
    AlreadyUsed(char),
    NotALetter,
}

#[derive(Debug, Clone)]
pub struct Game {
    word: String,
    missing: BTreeSet<char>,
    used: BTreeSet<char>,
    attempts: u32,
}

impl Game {
    pub fn new(word: &str) -> Self {
        let word = word.to_uppercase();
        let missing = word.chars().filter(char::is_ascii_alphabetic).collect();
        Self { word, missing, used: BTreeSet::new(), attempts: 0 }
    }

    /// Try one letter. Only a single new ASCII letter counts as an attempt.
    pub fn guess(&mut self, input: &str) -> GuessOutcome {
        let mut chars = input.trim().chars();
        let letter = match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => c.to_ascii_uppercase(),
            _ => return GuessOutcome::NotALetter,
        };

        if !self.used.insert(letter) {
            return GuessOutcome::AlreadyUsed(letter);
        }
        self.attempts += 1;

        if self.missing.remove(&letter) {
            GuessOutcome::Hit
        } else {
            GuessOutcome::Miss
        }
    }

    pub fn is_won(&self) -> bool {
        self.missing.is_empty()
    }

    /// The word with unguessed letters as `_`, space separated.
    pub fn masked(&self) -> String {
        self.word
            .chars()
            .map(|c| if self.missing.contains(&c) { '_' } else { c })
            .map(String::from)
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn used_letters(&self) -> String {
        self.used.iter().map(char::to_string).collect::<Vec<_>>().join(" ")
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn word(&self) -> &str {
        &self.word
    }
}
