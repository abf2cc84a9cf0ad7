pub mod airport;
pub mod flight;
pub mod travel;
pub mod weather;

pub use serde_with;

/// Types exposing a representative value, used for example data in json schemas.
pub trait ExampleData {
    fn example_data() -> Self;
}
