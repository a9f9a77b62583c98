//! `Tag`, the closed set of instruction kinds, and `Instruction`, the
//! uniform record every tag is stored as.

use crate::arg::Arg;

/// The closed set of instruction kinds. Order here only matters for
/// `Tag::ALL`; schema lookup (`schema::schema_for`) is what assigns each tag
/// its text name and argument signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Str,
    Int,
    Primitive,
    FnType,
    Fn,
    Export,
    Asm,
    As,
    IntCast,
    BitCast,
    PtrToInt,
    Deref,
    FieldPtr,
    ElemPtr,
    Add,
    Unreachable,
}

impl Tag {
    pub const ALL: &'static [Tag] = &[
        Tag::Str,
        Tag::Int,
        Tag::Primitive,
        Tag::FnType,
        Tag::Fn,
        Tag::Export,
        Tag::Asm,
        Tag::As,
        Tag::IntCast,
        Tag::BitCast,
        Tag::PtrToInt,
        Tag::Deref,
        Tag::FieldPtr,
        Tag::ElemPtr,
        Tag::Add,
        Tag::Unreachable,
    ];
}

/// One instruction: its tag, source offset, and the argument values the
/// schema for that tag says it must have — in schema order, not keyed by
/// name, since the schema already fixes the order.
#[derive(Debug, Clone)]
pub struct Instruction {
    pub tag: Tag,
    /// Byte offset of the instruction's tag name in the source, or (for
    /// lowered instructions) the typed-IR's own source offset.
    pub offset: usize,
    pub positionals: Vec<Arg>,
    pub keywords: Vec<Arg>,
}

impl Instruction {
    pub fn new(tag: Tag, offset: usize, positionals: Vec<Arg>, keywords: Vec<Arg>) -> Self {
        Self {
            tag,
            offset,
            positionals,
            keywords,
        }
    }
}
