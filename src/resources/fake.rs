//! Random field values for the generators.
//!
//! Every helper draws from the caller's rng, so a seeded rng yields reproducible
//! records.

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "Robert", "Patricia", "John", "Jennifer", "Michael", "Linda", "David",
    "Elizabeth", "William", "Barbara", "Richard", "Susan", "Joseph", "Jessica", "Thomas", "Sarah",
    "Charles", "Karen", "Daniel", "Nancy", "Matthew", "Lisa", "Anthony", "Betty", "Mark",
    "Margaret", "Paul", "Sandra",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White", "Harris",
];

const EMAIL_DOMAINS: &[&str] = &["example.com", "example.org", "example.net", "mail.test"];

const STREETS: &[&str] = &[
    "Main Street", "Oak Avenue", "Pine Road", "Maple Drive", "Cedar Lane", "Elm Street",
    "Washington Boulevard", "Lake View", "Hill Crest", "River Road",
];

const CITIES: &[&str] = &[
    "Springfield", "Riverside", "Fairview", "Franklin", "Greenville", "Bristol", "Clinton",
    "Madison", "Georgetown", "Salem", "Ashland", "Oakland",
];

const COUNTRIES: &[&str] = &[
    "United States", "Canada", "France", "Germany", "Spain", "Italy", "Japan", "Brazil",
    "Australia", "India", "Mexico", "Norway",
];

const COMPANY_WORDS: &[&str] = &[
    "Acme", "Globex", "Initech", "Umbrella", "Stark", "Wayne", "Hooli", "Vandelay", "Soylent",
    "Cyberdyne", "Tyrell", "Wonka",
];

const COMPANY_SUFFIXES: &[&str] = &["Inc", "LLC", "Group", "and Sons", "Ltd", "Corp"];

const JOBS: &[&str] = &[
    "Accountant", "Software Engineer", "Data Analyst", "Product Manager", "Designer",
    "Sales Representative", "Nurse", "Teacher", "Architect", "Consultant", "Technician",
    "Marketing Specialist", "Lawyer", "Logistics Coordinator",
];

const BUZZ_VERBS: &[&str] = &[
    "Streamline", "Empower", "Synergize", "Leverage", "Optimize", "Reinvent", "Harness",
    "Integrate", "Scale", "Deliver",
];

const BUZZ_NOUNS: &[&str] = &[
    "solutions", "platforms", "paradigms", "networks", "channels", "experiences", "models",
    "architectures", "markets", "infrastructures",
];

const WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "labore", "dolore", "magna", "aliqua", "enim", "minim",
    "veniam", "quis", "nostrud", "exercitation", "ullamco", "laboris", "nisi", "aliquip",
    "commodo", "consequat", "duis", "aute", "irure", "voluptate", "velit", "esse", "cillum",
];

const CURRENCIES: &[&str] = &[
    "US Dollar (USD)", "Euro (EUR)", "Japanese Yen (JPY)", "Pound Sterling (GBP)",
    "Swiss Franc (CHF)", "Canadian Dollar (CAD)", "Australian Dollar (AUD)",
    "Brazilian Real (BRL)", "Indian Rupee (INR)", "Norwegian Krone (NOK)",
];

/// Uniformly picks one of `choices`.
pub fn pick<'a, R: Rng>(rng: &mut R, choices: &[&'a str]) -> &'a str {
    choices.choose(rng).copied().unwrap_or_default()
}

pub fn first_name<R: Rng>(rng: &mut R) -> String {
    pick(rng, FIRST_NAMES).to_string()
}

pub fn last_name<R: Rng>(rng: &mut R) -> String {
    pick(rng, LAST_NAMES).to_string()
}

pub fn full_name<R: Rng>(rng: &mut R) -> String {
    format!("{} {}", first_name(rng), last_name(rng))
}

pub fn email<R: Rng>(rng: &mut R, first: &str, last: &str) -> String {
    format!(
        "{}.{}{}@{}",
        first.to_lowercase(),
        last.to_lowercase(),
        rng.gen_range(1..100),
        pick(rng, EMAIL_DOMAINS)
    )
}

pub fn username<R: Rng>(rng: &mut R, first: &str, last: &str) -> String {
    let initial = first.chars().next().unwrap_or('x').to_ascii_lowercase();
    format!("{initial}{}{}", last.to_lowercase(), rng.gen_range(10..1000))
}

/// Random alphanumeric secret of `len` characters.
pub fn password<R: Rng>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| char::from(rng.sample(rand::distributions::Alphanumeric)))
        .collect()
}

pub fn phone_number<R: Rng>(rng: &mut R) -> String {
    format!(
        "+1-{:03}-{:03}-{:04}",
        rng.gen_range(200..1000),
        rng.gen_range(200..1000),
        rng.gen_range(0..10_000)
    )
}

pub fn street_address<R: Rng>(rng: &mut R) -> String {
    format!("{} {}", rng.gen_range(1..9999), pick(rng, STREETS))
}

pub fn postal_code<R: Rng>(rng: &mut R) -> String {
    format!("{:05}", rng.gen_range(501..99_951))
}

pub fn city<R: Rng>(rng: &mut R) -> String {
    pick(rng, CITIES).to_string()
}

pub fn country<R: Rng>(rng: &mut R) -> String {
    pick(rng, COUNTRIES).to_string()
}

pub fn company<R: Rng>(rng: &mut R) -> String {
    format!("{} {}", pick(rng, COMPANY_WORDS), pick(rng, COMPANY_SUFFIXES))
}

pub fn job<R: Rng>(rng: &mut R) -> String {
    pick(rng, JOBS).to_string()
}

/// Marketing-speak product name, e.g. "Optimize scalable networks".
pub fn catch_phrase<R: Rng>(rng: &mut R) -> String {
    format!(
        "{} {} {}",
        pick(rng, BUZZ_VERBS),
        pick(rng, WORDS),
        pick(rng, BUZZ_NOUNS)
    )
}

/// Capitalized sentence of `words` words ending with a period.
pub fn sentence<R: Rng>(rng: &mut R, words: usize) -> String {
    let body: Vec<&str> = (0..words.max(1)).map(|_| pick(rng, WORDS)).collect();
    let mut text = body.join(" ");
    if let Some(first) = text.get(0..1) {
        let upper = first.to_uppercase();
        text.replace_range(0..1, &upper);
    }
    text.push('.');
    text
}

pub fn paragraph<R: Rng>(rng: &mut R, sentences: usize) -> String {
    (0..sentences.max(1))
        .map(|_| {
            let words = rng.gen_range(4..12);
            sentence(rng, words)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text no longer than `max_chars`, cut on a sentence boundary where possible.
pub fn text<R: Rng>(rng: &mut R, max_chars: usize) -> String {
    let mut out = String::new();
    loop {
        let words = rng.gen_range(4..12);
        let next = sentence(rng, words);
        let needed = if out.is_empty() { next.len() } else { next.len() + 1 };
        if out.len() + needed > max_chars {
            break;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&next);
    }
    if out.is_empty() {
        out = sentence(rng, 3);
        out.truncate(max_chars);
    }
    out
}

/// `NNN-NN-NNNN`, never starting with `000`, `666` or `9`.
pub fn ssn<R: Rng>(rng: &mut R) -> String {
    let area = loop {
        let area = rng.gen_range(1..900);
        if area != 666 {
            break area;
        }
    };
    format!(
        "{area:03}-{:02}-{:04}",
        rng.gen_range(1..100),
        rng.gen_range(1..10_000)
    )
}

/// Currency name with its ISO code, e.g. `Euro (EUR)`.
pub fn currency<R: Rng>(rng: &mut R) -> String {
    pick(rng, CURRENCIES).to_string()
}

/// 64 lowercase hex characters.
pub fn sha256_hex<R: Rng>(rng: &mut R) -> String {
    let bytes: [u8; 32] = rng.gen();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// A 13-digit EAN with a valid check digit.
pub fn ean13<R: Rng>(rng: &mut R) -> String {
    let digits: Vec<u32> = (0..12).map(|_| rng.gen_range(0..10)).collect();
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| if i % 2 == 0 { *d } else { d * 3 })
        .sum();
    let check = (10 - sum % 10) % 10;
    digits
        .iter()
        .chain(std::iter::once(&check))
        .map(|d| char::from_digit(*d, 10).unwrap_or('0'))
        .collect()
}

pub fn boolean<R: Rng>(rng: &mut R) -> bool {
    rng.gen_bool(0.5)
}

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Float in `[min, max]` rounded to `decimals` places.
pub fn decimal<R: Rng>(rng: &mut R, min: f64, max: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let value = (rng.gen_range(min..=max) * factor).round() / factor;
    value.clamp(min, max)
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// A date between `min_days` and `max_days` from today (negative is the past).
pub fn date_within<R: Rng>(rng: &mut R, min_days: i64, max_days: i64) -> NaiveDate {
    today() + Duration::days(rng.gen_range(min_days..=max_days))
}

/// A datetime with second precision up to `max_days` in the past.
pub fn datetime_within_past<R: Rng>(rng: &mut R, max_days: i64) -> NaiveDateTime {
    let now = Utc::now().naive_utc();
    let offset = rng.gen_range(0..=max_days.max(0) * 86_400);
    let moment = now - Duration::seconds(offset);
    moment.with_nanosecond(0).unwrap_or(moment)
}

/// Birth date for someone between `min_age` and `max_age` years old.
pub fn date_of_birth<R: Rng>(rng: &mut R, min_age: i64, max_age: i64) -> NaiveDate {
    date_within(rng, -(max_age * 365), -(min_age * 365))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn ssn_has_three_groups() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let ssn = ssn(&mut rng);
            let groups: Vec<&str> = ssn.split('-').collect();
            assert_eq!(groups.iter().map(|g| g.len()).collect::<Vec<_>>(), vec![3, 2, 4]);
            assert!(!groups[0].starts_with('9'));
            assert_ne!(groups[0], "000");
            assert_ne!(groups[0], "666");
        }
    }

    #[test]
    fn ean13_has_valid_check_digit() {
        let mut rng = StdRng::seed_from_u64(1);
        let code = ean13(&mut rng);
        assert_eq!(code.len(), 13);
        let sum: u32 = code
            .chars()
            .filter_map(|c| c.to_digit(10))
            .enumerate()
            .map(|(i, d)| if i % 2 == 0 { d } else { d * 3 })
            .sum();
        assert_eq!(sum % 10, 0);
    }

    #[test]
    fn text_respects_max_chars() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..20 {
            assert!(text(&mut rng, 200).len() <= 200);
        }
    }

    #[test]
    fn sentence_is_capitalized() {
        let mut rng = StdRng::seed_from_u64(3);
        let s = sentence(&mut rng, 5);
        assert!(s.chars().next().unwrap().is_uppercase());
        assert!(s.ends_with('.'));
        assert_eq!(sha256_hex(&mut rng).len(), 64);
    }

    #[test]
    fn decimal_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..100 {
            let v = decimal(&mut rng, 1.0, 5.0, 1);
            assert!((1.0..=5.0).contains(&v));
        }
    }
}
