pub mod history;
pub mod midi;
pub mod notes;

pub use history::HistoryBuffer;
pub use notes::NoteStore;
