pub mod input;
pub mod select;

pub use input::{Input, NumberInput};
pub use select::{select_options, Select};
