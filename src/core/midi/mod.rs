mod input;

pub use input::MidiBridge;
