pub use timer::{Stopwatch, as_ms};

mod timer;
