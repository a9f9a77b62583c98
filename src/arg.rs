//! `Arg`: the tagged sum type backing every positional and keyword argument
//! value, across all instruction tags. Grounded on the `InstData`/`Immediate`
//! split in the teacher's sibling `lpc-lpir` crate, which stores one
//! instruction's varying payload as a single enum rather than a hierarchy of
//! per-opcode structs.

use crate::bigint::BigInt;
use crate::callconv::CallingConv;
use crate::entity::Inst;
use crate::types::BuiltinType;

/// Which of the closed set of value kinds an `Arg` holds. Drives both the
/// parser's value dispatch and the renderer's value-printing dispatch; see
/// `schema::ArgKind` usage in [`crate::schema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    Inst,
    /// An optional instruction reference (only `asm`'s `output` keyword uses
    /// this today). Kept as its own kind rather than `Option<Arg>` at every
    /// call site, so a slot always holds exactly one `Arg`.
    InstOpt,
    InstList,
    /// A function body: syntactically a block of `%name = instr` lines.
    Block,
    Str,
    BigInt,
    Bool,
    BuiltinType,
    CallingConv,
}

/// One concrete argument value.
#[derive(Debug, Clone)]
pub enum Arg {
    Inst(Inst),
    InstOpt(Option<Inst>),
    InstList(Vec<Inst>),
    Block(Vec<Inst>),
    Str(Vec<u8>),
    BigInt(BigInt),
    Bool(bool),
    BuiltinType(BuiltinType),
    CallingConv(CallingConv),
}

impl Arg {
    pub fn kind(&self) -> ArgKind {
        match self {
            Arg::Inst(_) => ArgKind::Inst,
            Arg::InstOpt(_) => ArgKind::InstOpt,
            Arg::InstList(_) => ArgKind::InstList,
            Arg::Block(_) => ArgKind::Block,
            Arg::Str(_) => ArgKind::Str,
            Arg::BigInt(_) => ArgKind::BigInt,
            Arg::Bool(_) => ArgKind::Bool,
            Arg::BuiltinType(_) => ArgKind::BuiltinType,
            Arg::CallingConv(_) => ArgKind::CallingConv,
        }
    }

    pub fn as_inst(&self) -> Inst {
        match self {
            Arg::Inst(h) => *h,
            other => panic!("expected Arg::Inst, found {:?}", other.kind()),
        }
    }

    pub fn as_inst_opt(&self) -> Option<Inst> {
        match self {
            Arg::InstOpt(h) => *h,
            other => panic!("expected Arg::InstOpt, found {:?}", other.kind()),
        }
    }

    pub fn as_inst_list(&self) -> &[Inst] {
        match self {
            Arg::InstList(v) => v,
            other => panic!("expected Arg::InstList, found {:?}", other.kind()),
        }
    }

    pub fn as_block(&self) -> &[Inst] {
        match self {
            Arg::Block(v) => v,
            other => panic!("expected Arg::Block, found {:?}", other.kind()),
        }
    }

    pub fn as_str_bytes(&self) -> &[u8] {
        match self {
            Arg::Str(bytes) => bytes,
            other => panic!("expected Arg::Str, found {:?}", other.kind()),
        }
    }

    pub fn as_bigint(&self) -> &BigInt {
        match self {
            Arg::BigInt(v) => v,
            other => panic!("expected Arg::BigInt, found {:?}", other.kind()),
        }
    }

    pub fn as_bool(&self) -> bool {
        match self {
            Arg::Bool(v) => *v,
            other => panic!("expected Arg::Bool, found {:?}", other.kind()),
        }
    }

    pub fn as_builtin_type(&self) -> BuiltinType {
        match self {
            Arg::BuiltinType(v) => *v,
            other => panic!("expected Arg::BuiltinType, found {:?}", other.kind()),
        }
    }

    pub fn as_calling_conv(&self) -> CallingConv {
        match self {
            Arg::CallingConv(v) => *v,
            other => panic!("expected Arg::CallingConv, found {:?}", other.kind()),
        }
    }

    /// Structural equality used by the renderer's default-elision policy —
    /// two `Arg`s are equal iff they'd print identically.
    pub fn equals(&self, other: &Arg) -> bool {
        match (self, other) {
            (Arg::Inst(a), Arg::Inst(b)) => a == b,
            (Arg::InstOpt(a), Arg::InstOpt(b)) => a == b,
            (Arg::InstList(a), Arg::InstList(b)) => a == b,
            (Arg::Block(a), Arg::Block(b)) => a == b,
            (Arg::Str(a), Arg::Str(b)) => a == b,
            (Arg::BigInt(a), Arg::BigInt(b)) => a == b,
            (Arg::Bool(a), Arg::Bool(b)) => a == b,
            (Arg::BuiltinType(a), Arg::BuiltinType(b)) => a == b,
            (Arg::CallingConv(a), Arg::CallingConv(b)) => a == b,
            _ => false,
        }
    }
}
