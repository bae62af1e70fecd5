pub mod io;

pub use self::io::{
    is_image_path, load_rgb_image, save_gray_image, save_rgb_image, write_json_file,
};
