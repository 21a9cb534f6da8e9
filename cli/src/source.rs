//! Payload sources for `add`: a code given on the command line, or the first
//! line of stdin when none was given.

use std::io::BufRead;

use gw2bl_core::PayloadSource;

/// Hands out the code passed as an argument, once
pub struct ArgumentSource(Option<String>);

impl ArgumentSource {
    pub fn new(code: String) -> Self {
        Self(Some(code))
    }
}

impl PayloadSource for ArgumentSource {
    fn fetch(&mut self) -> Option<String> {
        self.0.take()
    }
}

/// Reads one line from stdin
pub struct StdinSource;

impl PayloadSource for StdinSource {
    fn fetch(&mut self) -> Option<String> {
        let mut line = String::new();
        match std::io::stdin().lock().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read build code from stdin");
                None
            }
        }
    }
}
