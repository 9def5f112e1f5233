mod config_box;

pub use config_box::ConfigBox;
