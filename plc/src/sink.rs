use crate::error::Error;
use mepa::Inst;
use std::io::Write;

/// Append-only destination of emitted instructions.
pub trait Sink {
    fn emit(&mut self, inst: Inst) -> Result<(), Error>;
}

impl Sink for Vec<Inst> {
    fn emit(&mut self, inst: Inst) -> Result<(), Error> {
        self.push(inst);
        Ok(())
    }
}

/// Writes one listing line per instruction as soon as it is emitted.
pub struct Stream<W: Write> {
    out: W,
    count: usize,
}

impl<W: Write> Stream<W> {
    pub fn new(out: W) -> Self {
        Self { out, count: 0 }
    }

    /// Number of lines written.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Render a finished listing as a YAML sequence of instructions.
pub fn yaml(code: &[Inst]) -> Result<String, Error> {
    Ok(serde_yaml::to_string(code)?)
}

impl<W: Write> Sink for Stream<W> {
    fn emit(&mut self, inst: Inst) -> Result<(), Error> {
        writeln!(self.out, "{}", inst)?;
        self.count += 1;
        Ok(())
    }
}
