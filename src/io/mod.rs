//! Model artifact read/write.

mod model_file;

pub use model_file::{read_model_json, write_model_json, ModelFile, TOOL_NAME};
