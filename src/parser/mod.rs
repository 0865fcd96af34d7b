/// A submodule that provides the [Tag] marker pair and the line based
/// [TagStream] every game data file is read with.
mod tag_stream;
pub use tag_stream::{extract_field, Tag, TagStream};

/// The error taxonomy shared by every stage of the extraction.
mod error;
pub use error::{MissingMarker, ParsingError};

/// The markers of the game data format.
pub mod tags;
