//! Round-trip properties from the design notes: render∘parse is the
//! identity on canonical text, and parse∘render is isomorphic on anything
//! syntactically valid. A handful of representative programs, not an
//! exhaustive grid — each exercises a different argument kind.

use zir::Module;

fn assert_canonical_fixed_point(source: &str) {
    let module = Module::parse(source);
    assert!(module.errors.is_empty(), "unexpected errors for {source:?}: {:?}", module.errors);
    assert_eq!(module.to_text(), source, "render(parse(source)) changed canonical text");
}

#[test]
fn string_declaration_is_a_fixed_point() {
    assert_canonical_fixed_point("@0 = str(\"hello, world\\n\")\n");
}

#[test]
fn integer_declaration_is_a_fixed_point() {
    assert_canonical_fixed_point("@0 = int(-123456789012345678901234567890)\n");
}

#[test]
fn inst_list_declaration_is_a_fixed_point() {
    let source = "@0 = primitive(isize)\n\
                   @1 = primitive(usize)\n\
                   @2 = fntype([@0, @1], @0, cc=C)\n";
    assert_canonical_fixed_point(source);
}

#[test]
fn asm_with_all_keywords_explicit_is_a_fixed_point() {
    let source = "@0 = str(\"nop\")\n\
                   @1 = primitive(void)\n\
                   @2 = str(\"out\")\n\
                   @3 = str(\"in\")\n\
                   @4 = str(\"eax\")\n\
                   @5 = asm(@0, @1, volatile=1, output=@2, inputs=[@3], clobbers=[@4], args=[@3])\n";
    assert_canonical_fixed_point(source);
}

#[test]
fn function_body_is_a_fixed_point() {
    let source = "@0 = primitive(void)\n\
                   @1 = fntype([], @0)\n\
                   @2 = fn(@1, {\n  %0 = unreachable()\n})\n";
    assert_canonical_fixed_point(source);
}

#[test]
fn parse_then_render_is_isomorphic_even_with_comments_and_loose_spacing() {
    let loose = "; a comment before the first declaration\n\
                 @0   =   str(\"hi\")   ; trailing comment\n\
                 @1 = primitive( void )\n";
    let module = Module::parse(loose);
    assert!(module.errors.is_empty(), "{:?}", module.errors);
    assert_eq!(module.decls.len(), 2);

    let canonical = module.to_text();
    let reparsed = Module::parse(&canonical);
    assert!(reparsed.errors.is_empty());
    assert_eq!(reparsed.decls.len(), module.decls.len());
    for (a, b) in module.decls.iter().zip(&reparsed.decls) {
        assert_eq!(module.inst(*a).tag, reparsed.inst(*b).tag);
    }
    // Once in canonical form, a second round trip changes nothing further.
    assert_eq!(Module::parse(&canonical).to_text(), canonical);
}
