//! Per-`ArgKind` value grammar: everything that can appear as a positional
//! or keyword argument once the schema says which kind is expected.

use std::collections::BTreeMap;

use super::{Parser, PResult};
use crate::arg::{Arg, ArgKind};
use crate::bigint::{self, BigInt};
use crate::callconv::CallingConv;
use crate::entity::Inst;
use crate::strlit;
use crate::types::BuiltinType;

impl Parser {
    /// Parse one value of the given kind. `block_scope` is the innermost
    /// block's `%name` bindings, if any are currently in scope — `@name`
    /// always resolves against `self.module_scope` regardless.
    pub(super) fn parse_value(
        &mut self,
        kind: ArgKind,
        block_scope: Option<&BTreeMap<String, Inst>>,
    ) -> PResult<Arg> {
        match kind {
            ArgKind::Inst => Ok(Arg::Inst(self.parse_inst_ref(block_scope)?)),
            ArgKind::InstOpt => Ok(Arg::InstOpt(Some(self.parse_inst_ref(block_scope)?))),
            ArgKind::InstList => Ok(Arg::InstList(self.parse_inst_list(block_scope)?)),
            ArgKind::Block => Ok(Arg::Block(self.parse_block_body()?)),
            ArgKind::Str => Ok(Arg::Str(self.parse_string_literal()?)),
            ArgKind::BigInt => Ok(Arg::BigInt(self.parse_bigint()?)),
            ArgKind::Bool => Ok(Arg::Bool(self.parse_bool()?)),
            ArgKind::BuiltinType => Ok(Arg::BuiltinType(self.parse_builtin_type()?)),
            ArgKind::CallingConv => Ok(Arg::CallingConv(self.parse_calling_conv()?)),
        }
    }

    fn parse_inst_ref(&mut self, block_scope: Option<&BTreeMap<String, Inst>>) -> PResult<Inst> {
        let start = self.pos;
        let sigil = self.peek();
        if sigil != b'@' && sigil != b'%' {
            return Err(self.error(start, "expected an instruction reference ('@name' or '%name')"));
        }
        self.advance();
        let name = self.read_ident(&[b',', b')', b']']);
        if name.is_empty() {
            return Err(self.error(start, "expected an identifier after the reference sigil"));
        }
        if sigil == b'@' {
            match self.module_scope.get(&name) {
                Some(handle) => Ok(*handle),
                None => Err(self.error(start, format!("unrecognized identifier '@{name}'"))),
            }
        } else {
            match block_scope {
                None => Err(self.error(start, "referencing a % instruction in global scope")),
                Some(scope) => match scope.get(&name) {
                    Some(handle) => Ok(*handle),
                    None => Err(self.error(start, format!("unrecognized identifier '%{name}'"))),
                },
            }
        }
    }

    fn parse_inst_list(&mut self, block_scope: Option<&BTreeMap<String, Inst>>) -> PResult<Vec<Inst>> {
        let start = self.pos;
        if !self.eat_byte(b'[') {
            return Err(self.error(start, "expected '['"));
        }
        self.skip_trivia();
        let mut items = Vec::new();
        if !self.eat_byte(b']') {
            loop {
                self.skip_trivia();
                items.push(self.parse_inst_ref(block_scope)?);
                self.skip_trivia();
                if self.eat_byte(b',') {
                    continue;
                }
                break;
            }
            self.skip_trivia();
            if !self.eat_byte(b']') {
                let offset = self.pos;
                return Err(self.error(offset, "expected ',' or ']'"));
            }
        }
        Ok(items)
    }

    /// A function body: `{` then zero or more `%name = instr` lines, then
    /// `}`. Builds its own scope, local to this body, for `%` references.
    pub(super) fn parse_block_body(&mut self) -> PResult<Vec<Inst>> {
        let start = self.pos;
        if !self.eat_byte(b'{') {
            return Err(self.error(start, "expected '{'"));
        }
        let mut scope: BTreeMap<String, Inst> = BTreeMap::new();
        let mut order = Vec::new();
        loop {
            self.skip_trivia();
            match self.peek() {
                b'}' => {
                    self.advance();
                    break;
                }
                0 => {
                    let offset = self.pos;
                    return Err(self.error(offset, "unexpected end of input inside a function body"));
                }
                b'%' => {
                    let name_start = self.pos;
                    self.advance();
                    let name = self.read_ident(&[b'=']);
                    if name.is_empty() {
                        return Err(self.error(name_start, "expected an identifier after '%'"));
                    }
                    self.skip_space();
                    if !self.eat_byte(b'=') {
                        let offset = self.pos;
                        return Err(self.error(offset, "expected '=' after local name"));
                    }
                    self.skip_space();
                    let handle = self.parse_instruction(Some(&scope))?;
                    if scope.contains_key(&name) {
                        self.error(name_start, format!("redefinition of identifier '{name}'"));
                    } else {
                        scope.insert(name, handle);
                    }
                    order.push(handle);
                }
                _ => {
                    let offset = self.pos;
                    return Err(self.error(offset, "expected '%name = ...' or '}'"));
                }
            }
        }
        Ok(order)
    }

    fn parse_string_literal(&mut self) -> PResult<Vec<u8>> {
        let start = self.pos;
        if !self.eat_byte(b'"') {
            return Err(self.error(start, "expected a string literal"));
        }
        let content_start = self.pos;
        loop {
            match self.peek() {
                0 => {
                    let offset = self.pos;
                    return Err(self.error(offset, "unexpected end of input in string literal"));
                }
                b'\\' => {
                    self.advance();
                    if self.peek() == 0 {
                        let offset = self.pos;
                        return Err(self.error(offset, "unexpected end of input in string literal"));
                    }
                    self.advance();
                }
                b'"' => break,
                _ => self.advance(),
            }
        }
        let content = self.bytes[content_start..self.pos].to_vec();
        self.advance(); // closing quote
        match strlit::unescape(&content) {
            Ok(bytes) => Ok(bytes),
            Err(rel_offset) => {
                let offset = content_start + rel_offset;
                Err(self.error(offset, "invalid escape in string literal"))
            }
        }
    }

    fn parse_bigint(&mut self) -> PResult<BigInt> {
        let start = self.pos;
        self.eat_byte(b'-');
        let digits_start = self.pos;
        while self.peek().is_ascii_digit() {
            self.advance();
        }
        if self.pos == digits_start {
            return Err(self.error(start, "expected an integer literal"));
        }
        let text = String::from_utf8_lossy(&self.bytes[start..self.pos]).into_owned();
        bigint::parse_decimal(&text).map_err(|_| self.error(start, "invalid integer literal"))
    }

    fn parse_bool(&mut self) -> PResult<bool> {
        let start = self.pos;
        if self.eat_byte(b'0') {
            Ok(false)
        } else if self.eat_byte(b'1') {
            Ok(true)
        } else {
            Err(self.error(start, "expected '0' or '1'"))
        }
    }

    fn parse_builtin_type(&mut self) -> PResult<BuiltinType> {
        let start = self.pos;
        let name = self.read_ident(&[b',', b')']);
        match BuiltinType::from_name(&name) {
            Some(ty) => Ok(ty),
            None => Err(self.error(start, format!("tag '{name}' not a member of enum 'BuiltinType'"))),
        }
    }

    fn parse_calling_conv(&mut self) -> PResult<CallingConv> {
        let start = self.pos;
        let name = self.read_ident(&[b',', b')']);
        match CallingConv::from_name(&name) {
            Some(cc) => Ok(cc),
            None => Err(self.error(start, format!("tag '{name}' not a member of enum 'CallingConv'"))),
        }
    }
}
