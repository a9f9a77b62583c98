//! ZIR: a textual, linear, SSA-style intermediate representation.
//!
//! This crate provides three operations over it:
//!
//! - **Parse** ([`Module::parse`]) — textual source to a [`Module`],
//!   recovering from syntax errors at declaration boundaries rather than
//!   aborting on the first one.
//! - **Render** ([`Module::write`] / [`Module::to_text`]) — a `Module` back
//!   to its canonical text, with a single source of truth (the instruction
//!   [`schema`]) driving both directions.
//! - **Lower** ([`Module::lower`]) — a typed-IR module (§4.5; see
//!   [`typed_ir`]) into the ZIR that represents it, memoizing repeated
//!   constant references.
//!
//! Every instruction, regardless of tag, is stored the same way: a
//! [`Tag`](inst::Tag), a source offset, and its positional/keyword
//! argument values ([`arg::Arg`]) in schema order. `schema::schema_for`
//! is the single table the parser, renderer, and lowerer all consult for a
//! tag's argument layout — there is no per-tag parsing, printing, or
//! lowering function to keep in sync by hand.

mod arg;
mod bigint;
mod callconv;
mod diagnostic;
mod entity;
mod entity_map;
mod inst;
mod lower;
mod module;
mod parser;
mod renderer;
mod schema;
mod strlit;
pub mod typed_ir;
mod types;

pub use arg::{Arg, ArgKind};
pub use bigint::BigInt;
pub use callconv::CallingConv;
pub use diagnostic::Diagnostic;
pub use entity::Inst;
pub use inst::{Instruction, Tag};
pub use module::Module;
pub use schema::{schema_for, KeywordSpec, PositionalSpec, TagSchema};
pub use types::BuiltinType;

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn parse_render_lower_are_all_reachable_from_the_crate_root() {
        let module = Module::parse(r#"@0 = str("ok")"#);
        assert!(module.errors.is_empty());
        assert_eq!(module.to_text(), "@0 = str(\"ok\")\n");

        let mut typed = typed_ir::Module::new();
        typed.exports.push(typed_ir::Export {
            offset: 0,
            symbol_name: b"ok".to_vec(),
            value: typed_ir::TypedValue::PtrToArrayOfBytes(b"ok".to_vec()),
        });
        let lowered = Module::lower(&typed);
        assert!(lowered.errors.is_empty());
    }
}
