//! The eight literal boundary scenarios from the format's design notes,
//! each checked against parse, render, or lower directly.

use zir::typed_ir::{
    ConstId, Export, FuncId, Function, Module as TypedModule, TypedFnType, TypedInst,
    TypedOperand, TypedType, TypedValue,
};
use zir::{BuiltinType, CallingConv, Module};

#[test]
fn empty_module_has_zero_decls_and_zero_errors() {
    let module = Module::parse("");
    assert_eq!(module.decls.len(), 0);
    assert_eq!(module.errors.len(), 0);
}

#[test]
fn single_string_round_trips_byte_identical() {
    let source = "@0 = str(\"hi\")\n";
    let module = Module::parse(source);
    assert!(module.errors.is_empty());
    assert_eq!(module.decls.len(), 1);
    assert_eq!(module.inst(module.decls[0]).positionals[0].as_str_bytes(), b"hi");
    assert_eq!(module.to_text(), source);
}

#[test]
fn unrecognized_primitive_tag_is_a_diagnostic() {
    let module = Module::parse("@0 = primitive(i32)\n");
    assert_eq!(module.errors.len(), 1);
    assert_eq!(module.errors[0].message, "tag 'i32' not a member of enum 'BuiltinType'");
}

#[test]
fn function_with_body_produces_three_declarations() {
    let source = "@0 = primitive(void)\n\
                   @1 = fntype([], @0)\n\
                   @2 = fn(@1, {\n  %0 = unreachable()\n})\n";
    let module = Module::parse(source);
    assert!(module.errors.is_empty(), "{:?}", module.errors);
    assert_eq!(module.decls.len(), 3);
    let body = module.inst(module.decls[2]).positionals[1].as_block();
    assert_eq!(body.len(), 1);
}

#[test]
fn percent_reference_in_global_scope_is_a_diagnostic() {
    let module = Module::parse("@0 = ptrtoint(%7)\n");
    assert_eq!(module.errors.len(), 1);
    assert_eq!(module.errors[0].message, "referencing a % instruction in global scope");
}

#[test]
fn duplicate_top_level_identifier_is_a_diagnostic() {
    let source = "@x = primitive(bool)\n@x = primitive(void)\n";
    let module = Module::parse(source);
    assert_eq!(module.errors.len(), 1);
    assert_eq!(module.errors[0].message, "redefinition of identifier 'x'");
    // Both declarations still parse; only the name binding collided.
    assert_eq!(module.decls.len(), 2);
}

#[test]
fn asm_volatile_omitted_is_false_and_round_trips_explicit() {
    let omitted = Module::parse("@0 = str(\"s\")\n@1 = primitive(void)\n@2 = asm(@0, @1)\n");
    assert!(omitted.errors.is_empty());
    assert!(!omitted.inst(omitted.decls[2]).keywords[0].as_bool());
    assert!(!omitted.to_text().contains("volatile"));

    let explicit = Module::parse("@0 = str(\"s\")\n@1 = primitive(void)\n@2 = asm(@0, @1, volatile=1)\n");
    assert!(explicit.errors.is_empty());
    assert!(explicit.inst(explicit.decls[2]).keywords[0].as_bool());
    assert!(explicit.to_text().contains("volatile=1"));

    // render(parse(render(parse(...)))) is idempotent under the
    // always-omit-default-equal-values policy.
    let twice = Module::parse(&explicit.to_text());
    assert_eq!(twice.to_text(), explicit.to_text());
}

#[test]
fn lowerer_memoizes_a_constant_shared_by_two_functions() {
    let mut typed = TypedModule::new();
    typed.consts.push(TypedValue::ComptimeInt(zir::BigInt::from(42)));

    let fn_type = TypedFnType {
        params: Vec::new(),
        ret: Box::new(TypedType::Builtin(BuiltinType::Usize)),
        cc: CallingConv::C,
    };
    let body = vec![TypedInst::BitCast {
        dest_type: TypedType::Builtin(BuiltinType::Usize),
        operand: TypedOperand::Const(ConstId(0)),
    }];
    typed.functions.push(Function {
        offset: 0,
        ty: fn_type.clone(),
        body: body.clone(),
    });
    typed.functions.push(Function {
        offset: 0,
        ty: fn_type,
        body,
    });
    typed.exports.push(Export {
        offset: 0,
        symbol_name: b"a".to_vec(),
        value: TypedValue::Function(FuncId(0)),
    });
    typed.exports.push(Export {
        offset: 0,
        symbol_name: b"b".to_vec(),
        value: TypedValue::Function(FuncId(1)),
    });

    let module = Module::lower(&typed);
    assert!(module.errors.is_empty(), "{:?}", module.errors);
    let int_decls = module
        .decls
        .iter()
        .filter(|&&h| module.inst(h).tag == zir::Tag::Int)
        .count();
    assert_eq!(int_decls, 1, "the shared constant must be lowered once");
}
