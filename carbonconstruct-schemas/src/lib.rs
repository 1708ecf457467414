pub mod calculation;
pub mod factor;
pub mod file_formats;
pub mod line_item;
