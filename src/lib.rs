pub mod cli;
pub mod error;
pub mod models;
pub mod utils;

// Re-export commonly used items
pub use error::{ErrorKind, Result, UtilsError};
pub use models::ConfigBox;
pub use utils::{
    create_directories, decode_image, encode_image_into_base64, get_size, load_bin, load_json,
    read_yaml, read_yaml_as, save_bin, save_json,
};
