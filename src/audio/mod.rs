pub mod energy;
pub mod file;

pub use energy::peak_window_start;
pub use file::AudioFile;
