mod reader;

pub use reader::{InputReader, echo_text, is_blank};
