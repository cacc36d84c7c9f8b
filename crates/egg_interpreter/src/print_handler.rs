//! Where `print` sends its output.
//!
//! The host picks the destination when building an evaluator:
//! - `Stdout`: the interactive shell (default), each line prefixed with `Output: `
//! - `Buffer`: tests and embedding, where output is read back afterwards
//! - `Silent`: discard everything
//! - `Custom`: any host callback

use std::{cell::RefCell, fmt};

/// Prefix the shell puts in front of every printed value.
pub const STDOUT_PREFIX: &str = "Output: ";

/// Captures printed lines in memory.
#[derive(Debug, Default)]
pub struct BufferPrintHandler {
    buffer: RefCell<String>,
}

impl BufferPrintHandler {
    pub fn new() -> Self {
        BufferPrintHandler {
            buffer: RefCell::new(String::new()),
        }
    }

    pub fn println(&self, msg: &str) {
        let mut buf = self.buffer.borrow_mut();
        buf.push_str(msg);
        buf.push('\n');
    }

    pub fn output(&self) -> String {
        self.buffer.borrow().clone()
    }

    pub fn clear(&self) {
        self.buffer.borrow_mut().clear();
    }
}

pub enum PrintHandler {
    Stdout,
    Buffer(BufferPrintHandler),
    Silent,
    /// Receives each printed value without the trailing newline.
    Custom(Box<dyn Fn(&str)>),
}

impl PrintHandler {
    pub fn buffer() -> Self {
        PrintHandler::Buffer(BufferPrintHandler::new())
    }

    pub fn custom(f: impl Fn(&str) + 'static) -> Self {
        PrintHandler::Custom(Box::new(f))
    }

    /// Emit one printed value on its own line.
    pub fn println(&self, msg: &str) {
        match self {
            PrintHandler::Stdout => println!("{}", stdout_line(msg)),
            PrintHandler::Buffer(handler) => handler.println(msg),
            PrintHandler::Silent => {}
            PrintHandler::Custom(f) => f(msg),
        }
    }

    /// Everything captured so far. Empty for handlers that don't capture.
    pub fn output(&self) -> String {
        match self {
            PrintHandler::Buffer(handler) => handler.output(),
            PrintHandler::Stdout | PrintHandler::Silent | PrintHandler::Custom(_) => String::new(),
        }
    }

    pub fn clear(&self) {
        if let PrintHandler::Buffer(handler) = self {
            handler.clear();
        }
    }
}

fn stdout_line(msg: &str) -> String {
    format!("{}{}", STDOUT_PREFIX, msg)
}

impl fmt::Debug for PrintHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrintHandler::Stdout => f.write_str("Stdout"),
            PrintHandler::Buffer(handler) => f.debug_tuple("Buffer").field(handler).finish(),
            PrintHandler::Silent => f.write_str("Silent"),
            PrintHandler::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl Default for PrintHandler {
    fn default() -> Self {
        PrintHandler::Stdout
    }
}
