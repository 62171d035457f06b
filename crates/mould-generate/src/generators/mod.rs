//! Built-in value generators.
//!
//! | Module         | Generators                                                         |
//! |----------------|--------------------------------------------------------------------|
//! | [`constant`]   | constant, first enum variant, empty array, current time, unsupported, nullary construct, saving, engine |
//! | [`increment`]  | generic incrementer, integer counter                               |
//! | [`sequential`] | fixed sequence, optionally repeating                               |
//! | [`random`]     | bounded integer, string, date, date-time, any-of                   |
//! | [`uuid`]       | random v4 UUID                                                     |

pub mod constant;
pub mod increment;
pub mod random;
pub mod sequential;
pub mod uuid;

pub use constant::{
    ConstantValueGenerator, CurrentTimeGenerator, EmptyArrayValueGenerator, EngineGenerator,
    FirstEnumValueGenerator, NullaryConstructGenerator, SavingValueGenerator,
    UnsupportedValueGenerator, constant,
};
pub use increment::{IncrementingIntegerGenerator, IncrementingValueGenerator};
pub use random::{
    RandomAnyOfGenerator, RandomDateGenerator, RandomDateTimeGenerator, RandomIntegerGenerator,
    RandomStringGenerator, RandomTimeGenerator,
};
pub use sequential::SequentialValueGenerator;
pub use self::uuid::UuidStringGenerator;
