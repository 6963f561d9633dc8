pub mod clock;
pub mod loader;

pub use clock::{Clock, FixedClock, SystemClock};
pub use loader::{load_dataset, read_dataset, REQUIRED_COLUMNS};
