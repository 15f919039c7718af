pub mod stream;
pub mod table;

pub use stream::{draw_from, DigitStream, RandomDigits, Sampled, ScriptedDigits};
pub use table::{Band, IntervalTable, TableError};
