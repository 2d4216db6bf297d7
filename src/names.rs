//! Procedural country names and cultures.

use rand::seq::SliceRandom;
use rand::Rng;

const NAME_KANJI: [&str; 15] = [
    "山", "川", "田", "海", "空", "風", "光", "花", "森", "星", "雨", "雷", "火", "地", "雪",
];

const CULTURE_KANA: &str = "あいうえおかきくけこさしすせそたちつてとなにぬねのはひふへほまみむめもやゆよらりるれろわをん";

const CULTURE_LEN: usize = 10;

/// Two-kanji country name, e.g. 山川.
pub fn country_name(rng: &mut impl Rng) -> String {
    let prefix = NAME_KANJI.choose(rng).expect("kanji table is non-empty");
    let suffix = NAME_KANJI.choose(rng).expect("kanji table is non-empty");
    format!("{prefix}{suffix}")
}

/// Ten random kana characters describing a country's culture.
pub fn culture(rng: &mut impl Rng) -> String {
    let kana: Vec<char> = CULTURE_KANA.chars().collect();
    (0..CULTURE_LEN)
        .map(|_| *kana.choose(rng).expect("kana table is non-empty"))
        .collect()
}
