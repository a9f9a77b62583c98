//! Stand-in for the external typed-IR/semantic-analysis stage the lowerer
//! (§4.5) consumes. No such crate exists in this corpus, so this module
//! describes just enough of its shape — exports, functions, types, and
//! values classified into the categories the lowerer dispatches on — for
//! [`crate::lower`] to be a complete, independently testable unit. A real
//! build would lower from the actual semantic analyzer's output types
//! instead of this one.

use crate::bigint::BigInt;
use crate::callconv::CallingConv;
use crate::types::BuiltinType;

/// Identifies one entry in [`Module::consts`]. Lowering memoizes on this so
/// that two references to the same typed constant share one ZIR
/// declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ConstId(pub usize);

/// Identifies one entry in [`Module::functions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuncId(pub usize);

/// Identifies an instruction's result within its own function body — just
/// its position in [`Function::body`].
pub type TypedValueId = usize;

/// A type, classified into the categories type emission dispatches on.
#[derive(Debug, Clone)]
pub enum TypedType {
    Builtin(BuiltinType),
    Function(TypedFnType),
    /// Any category type emission does not (yet) know how to lower.
    Unsupported,
}

#[derive(Debug, Clone)]
pub struct TypedFnType {
    pub params: Vec<TypedType>,
    pub ret: Box<TypedType>,
    pub cc: CallingConv,
}

/// A value, classified into the categories typed-value emission dispatches
/// on (§4.5).
#[derive(Debug, Clone)]
pub enum TypedValue {
    PtrToArrayOfBytes(Vec<u8>),
    ComptimeInt(BigInt),
    SizedInt { dest_type: BuiltinType, value: BigInt },
    Type(TypedType),
    Function(FuncId),
    /// Any category typed-value emission does not (yet) know how to lower.
    Unsupported,
}

/// One operand of a body instruction: either an earlier result in the same
/// body, or a module-level constant to be lowered (and memoized) on first
/// reference.
#[derive(Debug, Clone, Copy)]
pub enum TypedOperand {
    Local(TypedValueId),
    Const(ConstId),
}

#[derive(Debug, Clone)]
pub struct TypedAsm {
    pub asm_source: Vec<u8>,
    pub return_type: TypedType,
    pub volatile: bool,
    pub output: Option<TypedOperand>,
    pub inputs: Vec<TypedOperand>,
    /// Clobbered register names. Unlike the other asm sub-arguments these
    /// are literal text, not SSA operands, so there is nothing to resolve —
    /// each just becomes its own `str` declaration.
    pub clobbers: Vec<Vec<u8>>,
    pub args: Vec<TypedOperand>,
}

/// One instruction in a typed function body.
#[derive(Debug, Clone)]
pub enum TypedInst {
    Unreachable,
    Asm(TypedAsm),
    PtrToInt { operand: TypedOperand },
    BitCast { dest_type: TypedType, operand: TypedOperand },
    /// Never valid as a body element — a constant is only ever reached
    /// through [`TypedOperand::Const`]. A typed-IR producer that places one
    /// directly in a body has a bug; the lowerer treats it as such.
    Constant(ConstId),
}

#[derive(Debug, Clone)]
pub struct Function {
    pub offset: usize,
    pub ty: TypedFnType,
    pub body: Vec<TypedInst>,
}

#[derive(Debug, Clone)]
pub struct Export {
    pub offset: usize,
    pub symbol_name: Vec<u8>,
    pub value: TypedValue,
}

/// A complete typed-IR module, as the lowerer expects to receive it.
#[derive(Debug, Clone, Default)]
pub struct Module {
    pub consts: Vec<TypedValue>,
    pub exports: Vec<Export>,
    pub functions: Vec<Function>,
}

impl Module {
    pub fn new() -> Self {
        Self {
            consts: Vec::new(),
            exports: Vec::new(),
            functions: Vec::new(),
        }
    }
}
