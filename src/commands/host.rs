use std::io::Write;

/// A trait incorporating all I/O for the commands, making it possible to test the command implementations.
pub trait Host: Send + Sync {
    /// Returns a writer for normal output.
    fn output(&mut self) -> impl Write;

    /// Returns a writer for error output.
    fn error(&mut self) -> impl Write;

    /// Exits the process with the given exit code.
    fn exit(&mut self, code: i32);
}

#[cfg(test)]
pub struct TestHost {
    output: Vec<u8>,
    error: Vec<u8>,
    exit_code: Option<i32>,
}

#[cfg(test)]
impl TestHost {
    pub const fn new() -> Self {
        Self {
            output: Vec::new(),
            error: Vec::new(),
            exit_code: None,
        }
    }

    /// Everything the command wrote to the output stream so far.
    pub fn output_text(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }

    /// Everything the command wrote to the error stream so far.
    pub fn error_text(&self) -> String {
        String::from_utf8_lossy(&self.error).into_owned()
    }

    /// The exit code the command requested, if any.
    pub const fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }
}

#[cfg(test)]
impl Host for TestHost {
    fn output(&mut self) -> impl Write {
        &mut self.output
    }

    fn error(&mut self) -> impl Write {
        &mut self.error
    }

    fn exit(&mut self, code: i32) {
        self.exit_code = Some(code);
    }
}
