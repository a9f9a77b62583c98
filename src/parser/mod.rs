//! Recursive-descent parser for the textual format, split into the same
//! concerns the teacher's own `parser/` directory uses (primitives, value
//! grammar, instruction grammar), just not built on `nom` — see
//! `SPEC_FULL.md` §4.3 for why.
//!
//! Every production either succeeds or pushes exactly one [`Diagnostic`]
//! and returns [`Recovered`]; callers propagate `Recovered` with `?` until
//! they reach a point they know how to resynchronize from.

mod cursor;
mod instr;
mod value;

use std::collections::BTreeMap;

use crate::diagnostic::Diagnostic;
use crate::entity::Inst;
use crate::module::Module;

/// Marker meaning "a diagnostic describing this failure has already been
/// pushed; abandon the current production." Carries no data — the
/// diagnostic itself lives in `Parser::module.errors`.
pub(crate) struct Recovered;

pub(crate) type PResult<T> = Result<T, Recovered>;

struct Parser {
    /// Source bytes plus one trailing NUL sentinel, so every scan can check
    /// for end-of-input by comparing a byte instead of a length.
    bytes: Vec<u8>,
    pos: usize,
    module: Module,
    /// Names bound by `@name = ...` declarations seen so far.
    module_scope: BTreeMap<String, Inst>,
}

impl Parser {
    fn new(source: &str) -> Self {
        let mut bytes = source.as_bytes().to_vec();
        bytes.push(0);
        Self {
            bytes,
            pos: 0,
            module: Module::new(),
            module_scope: BTreeMap::new(),
        }
    }

    fn error(&mut self, offset: usize, message: impl Into<String>) -> Recovered {
        self.module.errors.push(Diagnostic::new(offset, message));
        Recovered
    }

    fn run(&mut self) {
        loop {
            self.skip_trivia();
            match self.peek() {
                0 => break,
                b'@' => self.parse_decl(),
                _ => {
                    let offset = self.pos;
                    self.error(offset, "expected a declaration starting with '@'");
                    self.resync();
                }
            }
        }
    }

    fn parse_decl(&mut self) {
        let decl_start = self.pos;
        self.advance(); // '@'
        let name = self.read_ident(&[b'=']);
        if name.is_empty() {
            self.error(self.pos, "expected an identifier after '@'");
            self.resync();
            return;
        }
        self.skip_space();
        if !self.eat_byte(b'=') {
            let offset = self.pos;
            self.error(offset, "expected '=' after declaration name");
            self.resync();
            return;
        }
        self.skip_space();
        match self.parse_instruction(None) {
            Ok(handle) => {
                if self.module_scope.contains_key(&name) {
                    self.error(decl_start, format!("redefinition of identifier '{name}'"));
                } else {
                    self.module_scope.insert(name, handle);
                }
                self.module.decls.push(handle);
            }
            Err(Recovered) => self.resync(),
        }
    }

    /// Recover from a failed declaration by scanning to the next `@` that
    /// starts a line, which is the next plausible declaration boundary.
    fn resync(&mut self) {
        loop {
            match self.peek() {
                0 => return,
                b'@' if self.pos == 0 || self.bytes[self.pos - 1] == b'\n' => return,
                _ => self.advance(),
            }
        }
    }
}

/// Parse a complete module. Always returns a `Module`, with any syntactic
/// problems recorded in [`Module::errors`] instead of aborting the parse.
pub(crate) fn parse_module(source: &str) -> Module {
    let mut parser = Parser::new(source);
    parser.run();
    parser.module
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inst::Tag;

    #[test]
    fn empty_source_is_an_empty_module() {
        let module = parse_module("");
        assert!(module.decls.is_empty());
        assert!(module.errors.is_empty());
    }

    #[test]
    fn single_string_declaration() {
        let module = parse_module(r#"@0 = str("hi")"#);
        assert!(module.errors.is_empty());
        assert_eq!(module.decls.len(), 1);
        let inst = module.inst(module.decls[0]);
        assert_eq!(inst.tag, Tag::Str);
        assert_eq!(inst.positionals[0].as_str_bytes(), b"hi");
    }

    #[test]
    fn unknown_tag_is_a_diagnostic_not_a_panic() {
        let module = parse_module("@0 = bogus()\n@1 = str(\"ok\")");
        assert_eq!(module.errors.len(), 1);
        // Recovery should still find the next declaration.
        assert_eq!(module.decls.len(), 1);
        assert_eq!(module.inst(module.decls[0]).tag, Tag::Str);
    }

    #[test]
    fn cross_scope_percent_reference_is_a_diagnostic() {
        let module = parse_module("@0 = str(\"x\")\n@1 = primitive(%0)");
        assert!(!module.errors.is_empty());
    }

    #[test]
    fn duplicate_declaration_name_is_a_diagnostic() {
        let module = parse_module("@0 = str(\"a\")\n@0 = str(\"b\")");
        assert_eq!(module.errors.len(), 1);
        // Both declarations still parse and land in the arena.
        assert_eq!(module.decls.len(), 2);
    }

    #[test]
    fn function_with_body_is_three_declarations() {
        let src = "@0 = primitive(void)\n\
                    @1 = fntype([], @0)\n\
                    @2 = fn(@1, { %0 = unreachable() })";
        let module = parse_module(src);
        assert!(module.errors.is_empty(), "{:?}", module.errors);
        assert_eq!(module.decls.len(), 3);
        let func = module.inst(module.decls[2]);
        assert_eq!(func.tag, Tag::Fn);
        assert_eq!(func.positionals[1].as_block().len(), 1);
    }

    #[test]
    fn asm_volatile_keyword_round_trips_through_default() {
        let src = "@0 = str(\"nop\")\n\
                    @1 = primitive(void)\n\
                    @2 = asm(@0, @1, volatile=1)";
        let module = parse_module(src);
        assert!(module.errors.is_empty(), "{:?}", module.errors);
        let asm = module.inst(module.decls[2]);
        assert!(asm.keywords[0].as_bool());
    }
}
