//! Canonical-text renderer. Two passes, mirroring the style of the
//! teacher's own `Display` impls for `Function`/`Module`: first decide
//! where each instruction prints (as a top-level `@N` declaration or a
//! block-local `%N`), then walk the tree again and emit text using that
//! table. Per-tag printing is schema-driven, same as parsing.

use std::collections::HashMap;
use std::fmt;

use crate::arg::{Arg, ArgKind};
use crate::bigint;
use crate::entity::Inst;
use crate::module::Module;
use crate::schema;
use crate::strlit;

/// Where an instruction's canonical text lives: a numbered top-level
/// declaration, or a numbered local inside the enclosing function's body.
#[derive(Clone, Copy, PartialEq, Eq)]
enum PrintLoc {
    Decl(u32),
    BlockLocal(u32),
}

impl fmt::Display for PrintLoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrintLoc::Decl(n) => write!(f, "@{n}"),
            PrintLoc::BlockLocal(n) => write!(f, "%{n}"),
        }
    }
}

pub(crate) fn render_module(module: &Module, out: &mut impl fmt::Write) -> fmt::Result {
    let mut locs: HashMap<Inst, PrintLoc> = HashMap::new();
    for (n, &handle) in module.decls.iter().enumerate() {
        locs.insert(handle, PrintLoc::Decl(n as u32));
        assign_block_locals(module, handle, &mut locs);
    }

    for (n, &handle) in module.decls.iter().enumerate() {
        if n > 0 {
            out.write_char('\n')?;
        }
        write!(out, "@{n} = ")?;
        render_instruction(module, handle, &locs, out)?;
        out.write_char('\n')?;
    }
    Ok(())
}

/// Assign `%N` locations to every instruction inside `handle`'s body, if it
/// has one (only `fn` does). Numbering restarts at 0 per function body,
/// matching the per-block-local scope the parser builds when reading one.
fn assign_block_locals(module: &Module, handle: Inst, locs: &mut HashMap<Inst, PrintLoc>) {
    let inst = module.inst(handle);
    if inst.tag != crate::inst::Tag::Fn {
        return;
    }
    let body = inst.positionals[1].as_block();
    for (n, &local) in body.iter().enumerate() {
        locs.insert(local, PrintLoc::BlockLocal(n as u32));
    }
}

fn render_instruction(
    module: &Module,
    handle: Inst,
    locs: &HashMap<Inst, PrintLoc>,
    out: &mut impl fmt::Write,
) -> fmt::Result {
    let inst = module.inst(handle);
    let schema = schema::schema_for(inst.tag);
    write!(out, "{}(", schema.text_name)?;

    let mut first = true;
    for value in &inst.positionals {
        if !first {
            out.write_str(", ")?;
        }
        first = false;
        render_value(module, value, locs, out)?;
    }

    for (i, spec) in schema.keywords.iter().enumerate() {
        let value = &inst.keywords[i];
        if value.equals(&(spec.default)()) {
            continue;
        }
        if !first {
            out.write_str(", ")?;
        }
        first = false;
        write!(out, "{}=", spec.name)?;
        render_value(module, value, locs, out)?;
    }

    out.write_char(')')
}

fn render_value(
    module: &Module,
    value: &Arg,
    locs: &HashMap<Inst, PrintLoc>,
    out: &mut impl fmt::Write,
) -> fmt::Result {
    match value.kind() {
        ArgKind::Inst => render_ref(value.as_inst(), locs, out),
        ArgKind::InstOpt => match value.as_inst_opt() {
            Some(handle) => render_ref(handle, locs, out),
            None => Ok(()),
        },
        ArgKind::InstList => {
            out.write_char('[')?;
            for (i, &handle) in value.as_inst_list().iter().enumerate() {
                if i > 0 {
                    out.write_str(", ")?;
                }
                render_ref(handle, locs, out)?;
            }
            out.write_char(']')
        }
        ArgKind::Block => {
            out.write_str("{\n")?;
            for &handle in value.as_block() {
                let loc = locs.get(&handle).copied().unwrap_or(PrintLoc::BlockLocal(0));
                write!(out, "  {loc} = ")?;
                render_instruction(module, handle, locs, out)?;
                out.write_char('\n')?;
            }
            out.write_char('}')
        }
        ArgKind::Str => {
            out.write_char('"')?;
            let mut text = String::new();
            strlit::render(value.as_str_bytes(), &mut text);
            out.write_str(&text)?;
            out.write_char('"')
        }
        ArgKind::BigInt => {
            let mut text = String::new();
            bigint::render(value.as_bigint(), &mut text);
            out.write_str(&text)
        }
        ArgKind::Bool => out.write_char(if value.as_bool() { '1' } else { '0' }),
        ArgKind::BuiltinType => out.write_str(value.as_builtin_type().name()),
        ArgKind::CallingConv => out.write_str(value.as_calling_conv().name()),
    }
}

fn render_ref(handle: Inst, locs: &HashMap<Inst, PrintLoc>, out: &mut impl fmt::Write) -> fmt::Result {
    match locs.get(&handle) {
        Some(loc) => write!(out, "{loc}"),
        // Every reachable instruction was assigned a location by
        // `render_module`'s first pass; this only happens for a handle
        // that was never reachable from `decls`, which lowering never
        // produces and the parser never permits.
        None => write!(out, "@?{}", handle.index()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::Module;

    #[test]
    fn renders_a_single_string_declaration() {
        let module = Module::parse(r#"@0 = str("hi")"#);
        assert_eq!(module.to_text(), "@0 = str(\"hi\")\n");
    }

    #[test]
    fn omits_keyword_equal_to_default() {
        let module = Module::parse("@0 = str(\"nop\")\n@1 = primitive(void)\n@2 = asm(@0, @1)");
        let text = module.to_text();
        assert!(text.contains("asm(@0, @1)"));
        assert!(!text.contains("volatile"));
    }

    #[test]
    fn keeps_keyword_that_differs_from_default() {
        let module = Module::parse("@0 = str(\"nop\")\n@1 = primitive(void)\n@2 = asm(@0, @1, volatile=1)");
        assert!(module.to_text().contains("volatile=1"));
    }

    #[test]
    fn parse_then_render_is_a_fixed_point() {
        let src = "@0 = primitive(void)\n@1 = fntype([], @0)\n@2 = fn(@1, { %0 = unreachable() })\n";
        let module = Module::parse(src);
        assert!(module.errors.is_empty());
        let rendered = module.to_text();
        let reparsed = Module::parse(&rendered);
        assert!(reparsed.errors.is_empty());
        assert_eq!(reparsed.to_text(), rendered);
    }
}
