use failure::Error;

use std::fmt::Debug;
use std::fs;
use std::path::Path;

use crate::log;
use crate::Interpreter;

impl Interpreter {
    /// run a whole file as one program, so forms may span lines
    pub fn run_file<P>(&self, path: P) -> Result<(), Error>
    where
        P: AsRef<Path> + Debug,
    {
        log::info(format!("running {:?}...", path));

        let source = fs::read_to_string(path)?;
        if let Some(value) = self.interpret(&source)? {
            log::info(format!("=> {}", value));
        }

        Ok(())
    }
}
