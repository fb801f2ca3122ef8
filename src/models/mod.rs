pub mod cafe;

pub use cafe::{yes_to_bool, Cafe, NewCafe};
