//! Schema-driven instruction grammar: `Ident '(' args ')'`, where the set
//! and kind of `args` comes entirely from [`crate::schema::schema_for`].
//! There is exactly one parsing function here regardless of how many tags
//! exist — adding a tag means adding a schema entry, not a parser function.

use std::collections::BTreeMap;

use super::{Parser, PResult};
use crate::arg::Arg;
use crate::entity::Inst;
use crate::inst::Instruction;
use crate::schema;

impl Parser {
    pub(super) fn parse_instruction(
        &mut self,
        block_scope: Option<&BTreeMap<String, Inst>>,
    ) -> PResult<Inst> {
        let tag_start = self.pos;
        let name = self.read_ident(&[b'(']);
        if !self.eat_byte(b'(') {
            let offset = self.pos;
            return Err(self.error(offset, "expected '(' after instruction tag"));
        }
        let tag = match schema::lookup_tag(&name) {
            Some(tag) => tag,
            None => return Err(self.error(tag_start, format!("unknown instruction tag '{name}'"))),
        };
        let schema = schema::schema_for(tag);

        let mut positionals = Vec::with_capacity(schema.positionals.len());
        for (i, spec) in schema.positionals.iter().enumerate() {
            self.skip_trivia();
            if self.peek() == b')' {
                let offset = self.pos;
                return Err(self.error(offset, format!("missing argument '{}'", spec.name)));
            }
            positionals.push(self.parse_value(spec.kind, block_scope)?);
            self.skip_trivia();
            if i + 1 < schema.positionals.len() {
                // A separating ',' is accepted but not required.
                self.eat_byte(b',');
                self.skip_trivia();
            }
        }

        let mut keyword_values: Vec<Option<Arg>> = schema.keywords.iter().map(|_| None).collect();
        loop {
            self.skip_trivia();
            if self.peek() == b')' {
                break;
            }
            self.eat_byte(b',');
            self.skip_trivia();
            if self.peek() == b')' {
                break;
            }
            let kw_start = self.pos;
            let kw_name = self.read_ident(&[b'=']);
            if kw_name.is_empty() {
                let offset = self.pos;
                return Err(self.error(offset, "expected a keyword argument name"));
            }
            if !self.eat_byte(b'=') {
                let offset = self.pos;
                return Err(self.error(offset, "expected '=' after keyword name"));
            }
            self.skip_trivia();
            match schema.keywords.iter().position(|k| k.name == kw_name.as_str()) {
                Some(i) => {
                    let value = self.parse_value(schema.keywords[i].kind, block_scope)?;
                    keyword_values[i] = Some(value);
                }
                None => {
                    return Err(self.error(
                        kw_start,
                        format!("'{kw_name}' is not a keyword argument of '{}'", schema.text_name),
                    ));
                }
            }
        }
        if !self.eat_byte(b')') {
            let offset = self.pos;
            return Err(self.error(offset, "expected ')'"));
        }

        let keywords: Vec<Arg> = keyword_values
            .into_iter()
            .enumerate()
            .map(|(i, v)| v.unwrap_or_else(|| (schema.keywords[i].default)()))
            .collect();

        let instruction = Instruction::new(tag, tag_start, positionals, keywords);
        Ok(self.module.push_instruction(instruction))
    }
}
