//! The instruction schema: the single table that parser, renderer, and
//! lowerer all consult to learn a tag's positional and keyword argument
//! signature. Adding a new `Tag` means adding one variant (`inst::Tag`) and
//! one arm of the `match` in [`schema_for`] — nothing else in this crate
//! needs to change.

use crate::arg::{Arg, ArgKind};
use crate::callconv::CallingConv;
use crate::inst::Tag;

/// One positional argument's name and expected kind.
pub struct PositionalSpec {
    pub name: &'static str,
    pub kind: ArgKind,
}

/// One keyword argument's name, expected kind, and the `Arg` it takes when
/// omitted from the source text.
pub struct KeywordSpec {
    pub name: &'static str,
    pub kind: ArgKind,
    pub default: fn() -> Arg,
}

/// A tag's full argument signature.
pub struct TagSchema {
    pub text_name: &'static str,
    pub positionals: &'static [PositionalSpec],
    pub keywords: &'static [KeywordSpec],
}

const fn pos(name: &'static str, kind: ArgKind) -> PositionalSpec {
    PositionalSpec { name, kind }
}

const fn kw(name: &'static str, kind: ArgKind, default: fn() -> Arg) -> KeywordSpec {
    KeywordSpec {
        name,
        kind,
        default,
    }
}

fn default_false() -> Arg {
    Arg::Bool(false)
}

fn default_inst_absent() -> Arg {
    Arg::InstOpt(None)
}

fn default_empty_inst_list() -> Arg {
    Arg::InstList(Vec::new())
}

fn default_cc_unspecified() -> Arg {
    Arg::CallingConv(CallingConv::Unspecified)
}

static STR_POS: &[PositionalSpec] = &[pos("bytes", ArgKind::Str)];
static INT_POS: &[PositionalSpec] = &[pos("int", ArgKind::BigInt)];
static PRIMITIVE_POS: &[PositionalSpec] = &[pos("tag", ArgKind::BuiltinType)];
static FNTYPE_POS: &[PositionalSpec] = &[
    pos("param_types", ArgKind::InstList),
    pos("return_type", ArgKind::Inst),
];
static FNTYPE_KW: &[KeywordSpec] = &[kw("cc", ArgKind::CallingConv, default_cc_unspecified)];
static FN_POS: &[PositionalSpec] = &[pos("fn_type", ArgKind::Inst), pos("body", ArgKind::Block)];
static EXPORT_POS: &[PositionalSpec] = &[
    pos("symbol_name", ArgKind::Inst),
    pos("value", ArgKind::Inst),
];
static ASM_POS: &[PositionalSpec] = &[
    pos("asm_source", ArgKind::Inst),
    pos("return_type", ArgKind::Inst),
];
static ASM_KW: &[KeywordSpec] = &[
    kw("volatile", ArgKind::Bool, default_false),
    kw("output", ArgKind::InstOpt, default_inst_absent),
    kw("inputs", ArgKind::InstList, default_empty_inst_list),
    kw("clobbers", ArgKind::InstList, default_empty_inst_list),
    kw("args", ArgKind::InstList, default_empty_inst_list),
];
static DEST_VALUE_POS: &[PositionalSpec] = &[
    pos("dest_type", ArgKind::Inst),
    pos("value", ArgKind::Inst),
];
static DEST_OPERAND_POS: &[PositionalSpec] = &[
    pos("dest_type", ArgKind::Inst),
    pos("operand", ArgKind::Inst),
];
static PTR_POS: &[PositionalSpec] = &[pos("ptr", ArgKind::Inst)];
static FIELDPTR_POS: &[PositionalSpec] = &[
    pos("object_ptr", ArgKind::Inst),
    pos("field_name", ArgKind::Inst),
];
static ELEMPTR_POS: &[PositionalSpec] = &[
    pos("array_ptr", ArgKind::Inst),
    pos("index", ArgKind::Inst),
];
static ADD_POS: &[PositionalSpec] = &[pos("lhs", ArgKind::Inst), pos("rhs", ArgKind::Inst)];
static NO_POS: &[PositionalSpec] = &[];
static NO_KW: &[KeywordSpec] = &[];

/// Look up the argument schema for `tag`. The only place in the crate that
/// knows every tag's positional/keyword layout.
pub fn schema_for(tag: Tag) -> TagSchema {
    match tag {
        Tag::Str => TagSchema {
            text_name: "str",
            positionals: STR_POS,
            keywords: NO_KW,
        },
        Tag::Int => TagSchema {
            text_name: "int",
            positionals: INT_POS,
            keywords: NO_KW,
        },
        Tag::Primitive => TagSchema {
            text_name: "primitive",
            positionals: PRIMITIVE_POS,
            keywords: NO_KW,
        },
        Tag::FnType => TagSchema {
            text_name: "fntype",
            positionals: FNTYPE_POS,
            keywords: FNTYPE_KW,
        },
        Tag::Fn => TagSchema {
            text_name: "fn",
            positionals: FN_POS,
            keywords: NO_KW,
        },
        Tag::Export => TagSchema {
            text_name: "export",
            positionals: EXPORT_POS,
            keywords: NO_KW,
        },
        Tag::Asm => TagSchema {
            text_name: "asm",
            positionals: ASM_POS,
            keywords: ASM_KW,
        },
        Tag::As => TagSchema {
            text_name: "as",
            positionals: DEST_VALUE_POS,
            keywords: NO_KW,
        },
        Tag::IntCast => TagSchema {
            text_name: "intcast",
            positionals: DEST_VALUE_POS,
            keywords: NO_KW,
        },
        Tag::BitCast => TagSchema {
            text_name: "bitcast",
            positionals: DEST_OPERAND_POS,
            keywords: NO_KW,
        },
        Tag::PtrToInt => TagSchema {
            text_name: "ptrtoint",
            positionals: PTR_POS,
            keywords: NO_KW,
        },
        Tag::Deref => TagSchema {
            text_name: "deref",
            positionals: PTR_POS,
            keywords: NO_KW,
        },
        Tag::FieldPtr => TagSchema {
            text_name: "fieldptr",
            positionals: FIELDPTR_POS,
            keywords: NO_KW,
        },
        Tag::ElemPtr => TagSchema {
            text_name: "elemptr",
            positionals: ELEMPTR_POS,
            keywords: NO_KW,
        },
        Tag::Add => TagSchema {
            text_name: "add",
            positionals: ADD_POS,
            keywords: NO_KW,
        },
        Tag::Unreachable => TagSchema {
            text_name: "unreachable",
            positionals: NO_POS,
            keywords: NO_KW,
        },
    }
}

/// Look up a `Tag` by its textual name (the `Ident` preceding `(` in an
/// instruction). Linear scan over sixteen tags; a `match` on `&str` would
/// work just as well, but this keeps `schema_for` as the sole place that
/// enumerates tags against their text names.
pub fn lookup_tag(name: &str) -> Option<Tag> {
    Tag::ALL.iter().copied().find(|t| schema_for(*t).text_name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tag_has_a_schema_with_matching_text_name() {
        for tag in Tag::ALL {
            let schema = schema_for(*tag);
            assert_eq!(lookup_tag(schema.text_name), Some(*tag));
        }
    }

    #[test]
    fn fntype_cc_defaults_to_unspecified() {
        let schema = schema_for(Tag::FnType);
        let default = (schema.keywords[0].default)();
        assert_eq!(default.as_calling_conv(), CallingConv::Unspecified);
    }

    #[test]
    fn asm_has_five_keywords_all_optional_in_source() {
        let schema = schema_for(Tag::Asm);
        assert_eq!(schema.keywords.len(), 5);
    }

    #[test]
    fn unreachable_takes_no_arguments() {
        let schema = schema_for(Tag::Unreachable);
        assert!(schema.positionals.is_empty());
        assert!(schema.keywords.is_empty());
    }
}
