use crate::error::Error;
use crate::sink::Sink;
use indexmap::IndexSet;
use mepa::{Inst, Label};

/// Monotonic label counter. Ids start at 1 and live for the whole compilation.
#[derive(Debug, Default)]
pub struct Labels {
    next: u32,
    defined: IndexSet<Label>,
}

impl Labels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> Label {
        self.next += 1;
        Label(self.next)
    }

    /// Place `label` at the current end of the listing.
    pub fn define<S: Sink>(&mut self, label: Label, sink: &mut S) -> Result<(), Error> {
        let fresh = self.defined.insert(label);
        debug_assert!(fresh, "label {} defined twice", label);
        sink.emit(Inst::LABEL(label))
    }

    /// Number of labels handed out so far.
    pub fn allocated(&self) -> u32 {
        self.next
    }

    /// Defined labels, in definition order.
    pub fn defined(&self) -> impl Iterator<Item = Label> + '_ {
        self.defined.iter().copied()
    }

    /// Allocated labels not yet defined.
    pub fn pending(&self) -> impl Iterator<Item = Label> + '_ {
        (1..=self.next)
            .map(Label)
            .filter(|label| !self.defined.contains(label))
    }
}
