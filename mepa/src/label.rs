use serde::{Deserialize, Serialize};
use std::fmt;

/// Control-flow target. Ids start at 1 and are never reused within one listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(pub u32);

impl Label {
    pub fn id(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.id())
    }
}

#[test]
fn test() {
    assert_eq!(Label(1).to_string(), "L1");
    assert_eq!(Label(42).to_string(), "L42");
    assert_eq!(Label(7).id(), 7);
}
