//! Where candidate chat links come from
//!
//! The library never polls for input; front-ends hand it a source (clipboard,
//! command-line argument, stdin) when the user asks to store a template.

/// Supplies raw chat link text on demand
pub trait PayloadSource {
    /// Current candidate text, `None` when the source has nothing to offer
    fn fetch(&mut self) -> Option<String>;
}

impl<F> PayloadSource for F
where
    F: FnMut() -> Option<String>,
{
    fn fetch(&mut self) -> Option<String> {
        self()
    }
}
