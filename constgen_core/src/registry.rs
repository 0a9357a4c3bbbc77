//! The compiled-in set of constant classes.
//!
//! Each [`ConstantClass`] names one Python value-group, the enum kind it is
//! built with, and the header naming convention its enumerators follow.

use std::fmt;

/// Which `enum` module constructor builds the value-group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumKind {
    /// Mutually exclusive values (`enum.Enum`).
    Enum,
    /// Combinable bitmasks (`enum.Flag`).
    Flag,
}

impl EnumKind {
    /// Name of the constructor in Python's `enum` module.
    pub fn as_str(&self) -> &'static str {
        match self {
            EnumKind::Enum => "Enum",
            EnumKind::Flag => "Flag",
        }
    }
}

impl fmt::Display for EnumKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static description of one constant class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstantClass {
    /// Python class name, also used for the C storage and doc symbols.
    pub name: &'static str,
    pub kind: EnumKind,
    /// Regex matching a full enumerator identifier. Every capture group is
    /// part of the short name; groups are joined with `_`.
    pub pattern: &'static str,
    /// Identifier suffix that disqualifies a match. Used where an identifier
    /// shares this class's prefix but belongs to another class.
    pub exclude: Option<&'static str>,
    /// `(name, value)` pairs emitted ahead of anything scanned.
    pub seeded: &'static [(&'static str, &'static str)],
}

impl ConstantClass {
    pub const fn new(name: &'static str, kind: EnumKind, pattern: &'static str) -> Self {
        Self {
            name,
            kind,
            pattern,
            exclude: None,
            seeded: &[],
        }
    }

    pub const fn excluding(mut self, suffix: &'static str) -> Self {
        self.exclude = Some(suffix);
        self
    }

    pub const fn seeded(mut self, seeded: &'static [(&'static str, &'static str)]) -> Self {
        self.seeded = seeded;
        self
    }
}

/// Every class the generator emits, in emission order.
pub static CONSTANT_CLASSES: &[ConstantClass] = &[
    ConstantClass::new("Architecture", EnumKind::Enum, r"DRGN_ARCH_([a-zA-Z0-9_]+)"),
    ConstantClass::new(
        "FindObjectFlags",
        EnumKind::Flag,
        r"DRGN_FIND_OBJECT_([a-zA-Z0-9_]+)",
    ),
    ConstantClass::new("PlatformFlags", EnumKind::Flag, r"DRGN_PLATFORM_([a-zA-Z0-9_]+)")
        .excluding("DRGN_PLATFORM_DEFAULT_FLAGS"),
    ConstantClass::new("PrimitiveType", EnumKind::Enum, r"DRGN_(C)_TYPE_([a-zA-Z0-9_]+)"),
    ConstantClass::new("ProgramFlags", EnumKind::Flag, r"DRGN_PROGRAM_([a-zA-Z0-9_]+)")
        .excluding("DRGN_PROGRAM_ENDIAN"),
    ConstantClass::new("Qualifiers", EnumKind::Flag, r"DRGN_QUALIFIER_([a-zA-Z0-9_]+)")
        .seeded(&[("NONE", "0")]),
    ConstantClass::new(
        "SymbolBinding",
        EnumKind::Enum,
        r"DRGN_SYMBOL_BINDING_([a-zA-Z0-9_]+)",
    ),
    ConstantClass::new("SymbolKind", EnumKind::Enum, r"DRGN_SYMBOL_KIND_([a-zA-Z0-9_]+)"),
    ConstantClass::new("TypeKind", EnumKind::Enum, r"DRGN_TYPE_([a-zA-Z0-9_]+)"),
];

/// Looks up a compiled-in class by its Python name.
pub fn find_class(name: &str) -> Option<&'static ConstantClass> {
    CONSTANT_CLASSES.iter().find(|class| class.name == name)
}
