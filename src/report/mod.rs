pub mod export;
pub mod letter;

pub use export::CsvExport;
pub use letter::{Letter, LetterRequest, LetterType};
