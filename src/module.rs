//! `Module`: the container a parse, render, or lower operation produces or
//! consumes.

use std::fmt;

use crate::diagnostic::Diagnostic;
use crate::entity::Inst;
use crate::entity_map::PrimaryMap;
use crate::inst::Instruction;

/// A ZIR module: the owning arena of every instruction reachable from
/// `decls`, the ordered top-level declarations themselves, and any
/// diagnostics accumulated while producing it.
///
/// There is no explicit `destroy` — dropping a `Module` drops `insts`,
/// `decls`, and `errors` together, which is the idiomatic-Rust realization
/// of "the arena frees all at once."
#[derive(Debug, Default)]
pub struct Module {
    pub(crate) insts: PrimaryMap<Instruction>,
    pub decls: Vec<Inst>,
    pub errors: Vec<Diagnostic>,
}

impl Module {
    pub fn new() -> Self {
        Self {
            insts: PrimaryMap::new(),
            decls: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Parse a complete ZIR program. Always returns a `Module`; syntactic
    /// problems land in `errors` rather than aborting the parse.
    pub fn parse(source: &str) -> Module {
        crate::parser::parse_module(source)
    }

    /// Insert `instruction` into the arena and return its handle.
    pub(crate) fn push_instruction(&mut self, instruction: Instruction) -> Inst {
        self.insts.push(instruction)
    }

    /// Look up an instruction by handle. Every handle that exists was
    /// minted by this module's own `push_instruction`, so this never fails
    /// for a handle obtained from this `Module`.
    pub fn inst(&self, handle: Inst) -> &Instruction {
        self.insts.get(handle)
    }

    pub fn inst_count(&self) -> usize {
        self.insts.len()
    }

    /// Lower a typed-IR module into its ZIR form. Always returns a
    /// `Module`; unsupported typed-IR shapes land in `errors` instead of
    /// aborting the lowering.
    pub fn lower(source: &crate::typed_ir::Module) -> Module {
        crate::lower::Lowerer::lower_module(source)
    }

    /// Render this module to canonical text.
    pub fn write(&self, out: &mut impl fmt::Write) -> fmt::Result {
        crate::renderer::render_module(self, out)
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        // `write` only fails if the underlying `fmt::Write` does, and
        // `String`'s impl is infallible.
        self.write(&mut out).expect("writing to a String cannot fail");
        out
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_module_is_empty() {
        let module = Module::new();
        assert_eq!(module.decls.len(), 0);
        assert_eq!(module.errors.len(), 0);
        assert_eq!(module.inst_count(), 0);
    }
}
