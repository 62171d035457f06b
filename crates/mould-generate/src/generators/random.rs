//! Bounded random generators.
//!
//! Every generator here draws from a [`SharedRng`] handed over at
//! construction, normally `Engine::rng()`.  Seed the engine and the values
//! become reproducible.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use mould_core::{MouldError, MouldResult, SharedRng, TypeName, Value};

use crate::{GenerationContext, ValueGenerator};

const LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const ALPHANUMERIC: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

const SECONDS_PER_DAY: u32 = 24 * 60 * 60;

/// Uniform integer in `minimum..=maximum`.  Bounds given in the wrong order
/// are swapped.
pub struct RandomIntegerGenerator {
    minimum: i64,
    maximum: i64,
    rng: SharedRng,
}

impl RandomIntegerGenerator {
    pub fn new(minimum: i64, maximum: i64, rng: SharedRng) -> Self {
        Self {
            minimum: minimum.min(maximum),
            maximum: minimum.max(maximum),
            rng,
        }
    }

    pub fn next_int(&self) -> i64 {
        self.rng.borrow_mut().gen_range(self.minimum..=self.maximum)
    }
}

impl ValueGenerator for RandomIntegerGenerator {
    fn generate(&self, _ty: &TypeName, _cx: &dyn GenerationContext) -> MouldResult<Value> {
        Ok(Value::Int(self.next_int()))
    }
}

/// String of random characters drawn from an alphabet, with a length in
/// `minimum..=maximum`.  Default alphabet: ASCII letters.
pub struct RandomStringGenerator {
    minimum: usize,
    maximum: usize,
    letters: Vec<char>,
    rng: SharedRng,
}

impl RandomStringGenerator {
    /// Length between one (zero when `maximum` is zero) and `maximum`.
    pub fn up_to(maximum: usize, rng: SharedRng) -> Self {
        Self::new(maximum.min(1), maximum, rng)
    }

    pub fn new(minimum: usize, maximum: usize, rng: SharedRng) -> Self {
        Self {
            minimum: minimum.min(maximum),
            maximum: minimum.max(maximum),
            letters: LETTERS.chars().collect(),
            rng,
        }
    }

    /// Letters and digits.
    pub fn alphanumeric(self) -> Self {
        self.letters(ALPHANUMERIC)
    }

    /// Replace the alphabet.  An empty alphabet produces empty strings.
    pub fn letters(mut self, letters: &str) -> Self {
        self.letters = letters.chars().collect();
        self
    }

    pub fn next_string(&self) -> String {
        if self.letters.is_empty() {
            return String::new();
        }
        let mut rng = self.rng.borrow_mut();
        let length = rng.gen_range(self.minimum..=self.maximum);
        (0..length)
            .map(|_| self.letters[rng.index(self.letters.len())])
            .collect()
    }
}

impl ValueGenerator for RandomStringGenerator {
    fn generate(&self, _ty: &TypeName, _cx: &dyn GenerationContext) -> MouldResult<Value> {
        Ok(Value::Text(self.next_string()))
    }
}

/// Uniform calendar date in `minimum..=maximum`.
pub struct RandomDateGenerator {
    minimum: NaiveDate,
    maximum: NaiveDate,
    rng: SharedRng,
}

impl RandomDateGenerator {
    pub fn new(minimum: NaiveDate, maximum: NaiveDate, rng: SharedRng) -> Self {
        Self {
            minimum: minimum.min(maximum),
            maximum: minimum.max(maximum),
            rng,
        }
    }

    pub fn next_date(&self) -> MouldResult<NaiveDate> {
        random_date(self.minimum, self.maximum, &self.rng)
    }
}

impl ValueGenerator for RandomDateGenerator {
    fn generate(&self, _ty: &TypeName, _cx: &dyn GenerationContext) -> MouldResult<Value> {
        self.next_date().map(Value::Date)
    }
}

/// Date drawn like [`RandomDateGenerator`], combined with a uniformly
/// random whole-second time of day.
pub struct RandomDateTimeGenerator {
    minimum: NaiveDate,
    maximum: NaiveDate,
    rng: SharedRng,
}

impl RandomDateTimeGenerator {
    pub fn new(minimum: NaiveDate, maximum: NaiveDate, rng: SharedRng) -> Self {
        Self {
            minimum: minimum.min(maximum),
            maximum: minimum.max(maximum),
            rng,
        }
    }

    pub fn next_date_time(&self) -> MouldResult<NaiveDateTime> {
        let date = random_date(self.minimum, self.maximum, &self.rng)?;
        Ok(date.and_time(random_time(&self.rng)?))
    }
}

impl ValueGenerator for RandomDateTimeGenerator {
    fn generate(&self, _ty: &TypeName, _cx: &dyn GenerationContext) -> MouldResult<Value> {
        self.next_date_time().map(Value::DateTime)
    }
}

/// Uniformly random whole-second time of day.
pub struct RandomTimeGenerator {
    rng: SharedRng,
}

impl RandomTimeGenerator {
    pub fn new(rng: SharedRng) -> Self {
        Self { rng }
    }

    pub fn next_time(&self) -> MouldResult<NaiveTime> {
        random_time(&self.rng)
    }
}

impl ValueGenerator for RandomTimeGenerator {
    fn generate(&self, _ty: &TypeName, _cx: &dyn GenerationContext) -> MouldResult<Value> {
        self.next_time().map(Value::Time)
    }
}

fn random_time(rng: &SharedRng) -> MouldResult<NaiveTime> {
    let seconds = rng.borrow_mut().gen_range(0..SECONDS_PER_DAY);
    NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0)
        .ok_or_else(|| MouldError::Unsupported(format!("invalid time of day: {seconds}s")))
}

fn random_date(minimum: NaiveDate, maximum: NaiveDate, rng: &SharedRng) -> MouldResult<NaiveDate> {
    let span = (maximum - minimum).num_days();
    let offset = rng.borrow_mut().gen_range(0..=span);
    minimum
        .checked_add_signed(Duration::days(offset))
        .ok_or_else(|| MouldError::Unsupported(format!("date out of range: {minimum} + {offset} days")))
}

/// One of a fixed pool of values, picked uniformly.  An empty pool yields
/// `Null`.
pub struct RandomAnyOfGenerator {
    values: Vec<Value>,
    rng: SharedRng,
}

impl RandomAnyOfGenerator {
    pub fn new<I, V>(values: I, rng: SharedRng) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
            rng,
        }
    }
}

impl ValueGenerator for RandomAnyOfGenerator {
    fn generate(&self, _ty: &TypeName, _cx: &dyn GenerationContext) -> MouldResult<Value> {
        if self.values.is_empty() {
            return Ok(Value::Null);
        }
        let index = self.rng.borrow_mut().index(self.values.len());
        Ok(self.values[index].clone())
    }
}
