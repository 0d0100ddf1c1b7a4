pub mod dest_dir;
pub mod domain;
pub mod fetch;
