//! Processing pipeline components.

mod coordinator;
mod demo_order;
mod processor;
pub mod progress;

pub use coordinator::{CleanOptions, CleanSummary, clean_module};
pub use demo_order::DemoOrder;
pub use processor::{ProcessContext, process_xml_file};
