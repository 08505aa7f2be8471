pub mod compose;
pub mod config;
pub mod derive;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod record;
pub mod schema;
pub mod view;

pub use error::{PipelineError, Result};
pub use posko_parser::ParserError;
pub use pipeline::{build_dataset, process_sheet, Dataset};
pub use record::{Contact, LocationRecord, UpdateEntry};
