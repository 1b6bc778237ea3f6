pub mod lookup;

pub use lookup::{LookupMode, LookupUseCase};
