use crate::label::Label;

use color_print::cformat;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::IntoStaticStr;

/// Machine word of the MEPA stack machine.
pub type Word = i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr)]
pub enum Inst {
    // Program frame
    INPP,
    PARA,
    AMEM(usize),

    // Memory
    CRCT(Word),
    CRVL(usize),
    ARMZ(usize),

    // Arithmetic
    SOMA,
    SUBT,
    MULT,
    DIVI,
    MODI,
    INVR,

    // Logic
    CONJ,
    DISJ,
    NEGA,

    // Comparison
    CMME,
    CMMA,
    CMIG,
    CMDG,
    CMEG,
    CMAG,

    // Control
    DSVF(Label),
    DSVS(Label),
    #[strum(serialize = "NADA")]
    LABEL(Label),

    // I/O
    LEIT,
    IMPR,
}

impl Inst {
    pub fn mnemonic(&self) -> &'static str {
        self.into()
    }

    /// Branch target, if this is a jump.
    pub fn target(&self) -> Option<Label> {
        match self {
            Inst::DSVF(label) | Inst::DSVS(label) => Some(*label),
            _ => None,
        }
    }

    /// Label placed by this line, if it is a label definition.
    pub fn defines(&self) -> Option<Label> {
        match self {
            Inst::LABEL(label) => Some(*label),
            _ => None,
        }
    }

    pub fn cformat(&self) -> String {
        match self {
            Inst::LABEL(label) => cformat!("<g>{}:</> <r>{}</>", label, self.mnemonic()),
            Inst::DSVF(label) | Inst::DSVS(label) => {
                cformat!("<r>{:<6}</><g>{}</>", self.mnemonic(), label)
            }
            Inst::AMEM(n) | Inst::CRVL(n) | Inst::ARMZ(n) => {
                cformat!("<r>{:<6}</><b>{}</>", self.mnemonic(), n)
            }
            Inst::CRCT(k) => cformat!("<r>{:<6}</><y>{}</>", self.mnemonic(), k),
            _ => cformat!("<r>{}</>", self.mnemonic()),
        }
    }
}

impl fmt::Display for Inst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.mnemonic();
        match self {
            Inst::LABEL(label) => write!(f, "{}: {}", label, name),
            Inst::DSVF(label) | Inst::DSVS(label) => write!(f, "{} {}", name, label),
            Inst::AMEM(n) | Inst::CRVL(n) | Inst::ARMZ(n) => write!(f, "{} {}", name, n),
            Inst::CRCT(k) => write!(f, "{} {}", name, k),
            _ => write!(f, "{}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_inst {
        ($($name:ident: $inst:expr => $text:expr,)*) => {
            $(
                #[test]
                fn $name() {
                    assert_eq!($inst.to_string(), $text);
                }
            )*
        }
    }

    test_inst! {
        test_inpp: Inst::INPP => "INPP",
        test_para: Inst::PARA => "PARA",
        test_amem: Inst::AMEM(3) => "AMEM 3",
        test_crct: Inst::CRCT(-5) => "CRCT -5",
        test_crvl: Inst::CRVL(2) => "CRVL 2",
        test_armz: Inst::ARMZ(0) => "ARMZ 0",
        test_soma: Inst::SOMA => "SOMA",
        test_modi: Inst::MODI => "MODI",
        test_cmeg: Inst::CMEG => "CMEG",
        test_dsvf: Inst::DSVF(Label(1)) => "DSVF L1",
        test_dsvs: Inst::DSVS(Label(2)) => "DSVS L2",
        test_label: Inst::LABEL(Label(3)) => "L3: NADA",
        test_leit: Inst::LEIT => "LEIT",
        test_impr: Inst::IMPR => "IMPR",
    }

    #[test]
    fn test_targets() {
        assert_eq!(Inst::DSVF(Label(4)).target(), Some(Label(4)));
        assert_eq!(Inst::DSVS(Label(5)).target(), Some(Label(5)));
        assert_eq!(Inst::LABEL(Label(4)).target(), None);
        assert_eq!(Inst::LABEL(Label(4)).defines(), Some(Label(4)));
        assert_eq!(Inst::ARMZ(4).defines(), None);
    }

    #[test]
    fn test_yaml() {
        let code = vec![Inst::INPP, Inst::AMEM(1), Inst::DSVF(Label(1)), Inst::PARA];
        let text = serde_yaml::to_string(&code).unwrap();
        let back: Vec<Inst> = serde_yaml::from_str(&text).unwrap();
        assert_eq!(code, back);
    }
}
