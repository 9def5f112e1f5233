pub mod bin_file;
pub mod file_utils;
pub mod image;
pub mod json_file;
pub mod logging;
pub mod yaml_file;

pub use bin_file::{load_bin, save_bin};
pub use file_utils::{create_directories, get_size, size_in_kb};
pub use image::{decode_image, encode_image_into_base64};
pub use json_file::{load_json, save_json};
pub use yaml_file::{read_yaml, read_yaml_as};
