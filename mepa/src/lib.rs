pub mod inst;
pub mod label;

pub use inst::{Inst, Word};
pub use label::Label;
