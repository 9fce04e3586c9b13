// Adapters layer: concrete product sources and presentation for the ports in `domain`.

pub mod console;
pub mod source;

pub use console::ConsoleRenderer;
pub use source::{FileProductSource, HttpProductSource, SampleProductSource};
