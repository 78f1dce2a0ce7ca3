//! Graph notation: node instances and the decoders that produce them

mod decoder;
mod instance;
mod penman;


pub use decoder::{DecodeError, GraphDecoder, GraphError};
pub use instance::NodeInstance;
pub use penman::PenmanDecoder;
