//! Lowerer: turns a [`typed_ir::Module`] into a ZIR [`Module`] (§4.5).
//! Structured the way the teacher's sibling crate structures a function
//! builder — one state-carrying struct, one `&mut self` method per
//! instruction/value shape it knows how to emit — except every emission
//! returns `Option` instead of panicking, so an unsupported typed-IR shape
//! becomes a diagnostic rather than aborting the whole lowering.

use std::collections::BTreeMap;

use crate::arg::Arg;
use crate::diagnostic::Diagnostic;
use crate::entity::Inst;
use crate::inst::{Instruction, Tag};
use crate::module::Module;
use crate::typed_ir::{self, ConstId, FuncId, TypedValueId};

pub(crate) struct Lowerer {
    module: Module,
    consts: BTreeMap<ConstId, Inst>,
    errors: Vec<Diagnostic>,
}

impl Lowerer {
    fn new() -> Self {
        Self {
            module: Module::new(),
            consts: BTreeMap::new(),
            errors: Vec::new(),
        }
    }

    pub(crate) fn lower_module(source: &typed_ir::Module) -> Module {
        let mut lowerer = Self::new();
        for export in &source.exports {
            lowerer.lower_export(source, export);
        }
        lowerer.module.errors.append(&mut lowerer.errors);
        lowerer.module
    }

    fn fatal(&mut self, offset: usize, message: impl Into<String>) {
        self.errors.push(Diagnostic::new(offset, message));
    }

    /// Push a new top-level declaration.
    fn decl(&mut self, instruction: Instruction) -> Inst {
        let handle = self.module.push_instruction(instruction);
        self.module.decls.push(handle);
        handle
    }

    /// Push a new instruction that only lives inside a function body block
    /// (never a top-level declaration on its own).
    fn local(&mut self, instruction: Instruction) -> Inst {
        self.module.push_instruction(instruction)
    }

    fn push_str(&mut self, bytes: Vec<u8>, offset: usize) -> Inst {
        self.decl(Instruction::new(Tag::Str, offset, vec![Arg::Str(bytes)], Vec::new()))
    }

    fn push_int(&mut self, value: crate::bigint::BigInt, offset: usize) -> Inst {
        self.decl(Instruction::new(Tag::Int, offset, vec![Arg::BigInt(value)], Vec::new()))
    }

    fn lower_export(&mut self, source: &typed_ir::Module, export: &typed_ir::Export) {
        let Some(value_inst) = self.lower_value(source, &export.value, export.offset) else {
            return;
        };
        let name_inst = self.push_str(export.symbol_name.clone(), export.offset);
        self.decl(Instruction::new(
            Tag::Export,
            export.offset,
            vec![Arg::Inst(name_inst), Arg::Inst(value_inst)],
            Vec::new(),
        ));
    }

    fn lower_value(&mut self, source: &typed_ir::Module, value: &typed_ir::TypedValue, offset: usize) -> Option<Inst> {
        match value {
            typed_ir::TypedValue::PtrToArrayOfBytes(bytes) => Some(self.push_str(bytes.clone(), offset)),
            typed_ir::TypedValue::ComptimeInt(n) => Some(self.push_int(n.clone(), offset)),
            typed_ir::TypedValue::SizedInt { dest_type, value } => {
                let int_decl = self.push_int(value.clone(), offset);
                let type_decl = self.decl(Instruction::new(
                    Tag::Primitive,
                    offset,
                    vec![Arg::BuiltinType(*dest_type)],
                    Vec::new(),
                ));
                Some(self.decl(Instruction::new(
                    Tag::As,
                    offset,
                    vec![Arg::Inst(type_decl), Arg::Inst(int_decl)],
                    Vec::new(),
                )))
            }
            typed_ir::TypedValue::Type(ty) => self.lower_type(ty, offset),
            typed_ir::TypedValue::Function(func_id) => self.lower_function(source, *func_id, offset),
            typed_ir::TypedValue::Unsupported => {
                self.fatal(offset, "value category not supported by the lowerer");
                None
            }
        }
    }

    fn lower_type(&mut self, ty: &typed_ir::TypedType, offset: usize) -> Option<Inst> {
        match ty {
            typed_ir::TypedType::Builtin(bt) => Some(self.decl(Instruction::new(
                Tag::Primitive,
                offset,
                vec![Arg::BuiltinType(*bt)],
                Vec::new(),
            ))),
            typed_ir::TypedType::Function(fn_type) => self.lower_fn_type(fn_type, offset),
            typed_ir::TypedType::Unsupported => {
                self.fatal(offset, "type category not supported by the lowerer");
                None
            }
        }
    }

    fn lower_fn_type(&mut self, fn_type: &typed_ir::TypedFnType, offset: usize) -> Option<Inst> {
        let mut params = Vec::with_capacity(fn_type.params.len());
        for param in &fn_type.params {
            params.push(self.lower_type(param, offset)?);
        }
        let ret = self.lower_type(&fn_type.ret, offset)?;
        Some(self.decl(Instruction::new(
            Tag::FnType,
            offset,
            vec![Arg::InstList(params), Arg::Inst(ret)],
            vec![Arg::CallingConv(fn_type.cc)],
        )))
    }

    /// Lower the typed constant `id` names, reusing a previous lowering if
    /// one was already memoized.
    fn lower_const(&mut self, source: &typed_ir::Module, id: ConstId, offset: usize) -> Option<Inst> {
        if let Some(&inst) = self.consts.get(&id) {
            return Some(inst);
        }
        let Some(value) = source.consts.get(id.0) else {
            self.fatal(offset, format!("reference to unknown constant id {}", id.0));
            return None;
        };
        let value = value.clone();
        let lowered = self.lower_value(source, &value, offset)?;
        self.consts.insert(id, lowered);
        Some(lowered)
    }

    fn resolve_operand(
        &mut self,
        source: &typed_ir::Module,
        operand: &typed_ir::TypedOperand,
        offset: usize,
        locals: &BTreeMap<TypedValueId, Inst>,
    ) -> Option<Inst> {
        match operand {
            typed_ir::TypedOperand::Local(id) => match locals.get(id) {
                Some(&inst) => Some(inst),
                None => {
                    self.fatal(offset, "operand references a value not yet defined in this body");
                    None
                }
            },
            typed_ir::TypedOperand::Const(id) => self.lower_const(source, *id, offset),
        }
    }

    fn lower_function(&mut self, source: &typed_ir::Module, func_id: FuncId, offset: usize) -> Option<Inst> {
        let Some(func) = source.functions.get(func_id.0) else {
            self.fatal(offset, format!("reference to unknown function id {}", func_id.0));
            return None;
        };
        let func = func.clone();
        let fn_type_inst = self.lower_fn_type(&func.ty, func.offset)?;

        let mut locals: BTreeMap<TypedValueId, Inst> = BTreeMap::new();
        let mut body = Vec::with_capacity(func.body.len());
        for (value_id, inst) in func.body.iter().enumerate() {
            let lowered = self.lower_body_inst(source, inst, func.offset, &locals)?;
            locals.insert(value_id, lowered);
            body.push(lowered);
        }

        Some(self.decl(Instruction::new(
            Tag::Fn,
            offset,
            vec![Arg::Inst(fn_type_inst), Arg::Block(body)],
            Vec::new(),
        )))
    }

    fn lower_body_inst(
        &mut self,
        source: &typed_ir::Module,
        inst: &typed_ir::TypedInst,
        offset: usize,
        locals: &BTreeMap<TypedValueId, Inst>,
    ) -> Option<Inst> {
        match inst {
            typed_ir::TypedInst::Unreachable => {
                Some(self.local(Instruction::new(Tag::Unreachable, offset, Vec::new(), Vec::new())))
            }
            typed_ir::TypedInst::PtrToInt { operand } => {
                let operand_inst = self.resolve_operand(source, operand, offset, locals)?;
                Some(self.local(Instruction::new(Tag::PtrToInt, offset, vec![Arg::Inst(operand_inst)], Vec::new())))
            }
            typed_ir::TypedInst::BitCast { dest_type, operand } => {
                let dest_inst = self.lower_type(dest_type, offset)?;
                let operand_inst = self.resolve_operand(source, operand, offset, locals)?;
                Some(self.local(Instruction::new(
                    Tag::BitCast,
                    offset,
                    vec![Arg::Inst(dest_inst), Arg::Inst(operand_inst)],
                    Vec::new(),
                )))
            }
            typed_ir::TypedInst::Asm(asm) => self.lower_asm(source, asm, offset, locals),
            typed_ir::TypedInst::Constant(_) => {
                panic!("a typed-IR constant instruction appeared directly in a function body")
            }
        }
    }

    fn lower_asm(
        &mut self,
        source: &typed_ir::Module,
        asm: &typed_ir::TypedAsm,
        offset: usize,
        locals: &BTreeMap<TypedValueId, Inst>,
    ) -> Option<Inst> {
        let asm_source_inst = self.push_str(asm.asm_source.clone(), offset);
        let return_type_inst = self.lower_type(&asm.return_type, offset)?;

        let output = match &asm.output {
            Some(operand) => Arg::InstOpt(Some(self.resolve_operand(source, operand, offset, locals)?)),
            None => Arg::InstOpt(None),
        };
        let mut inputs = Vec::with_capacity(asm.inputs.len());
        for operand in &asm.inputs {
            inputs.push(self.resolve_operand(source, operand, offset, locals)?);
        }
        let mut clobbers = Vec::with_capacity(asm.clobbers.len());
        for name in &asm.clobbers {
            clobbers.push(self.push_str(name.clone(), offset));
        }
        let mut args = Vec::with_capacity(asm.args.len());
        for operand in &asm.args {
            args.push(self.resolve_operand(source, operand, offset, locals)?);
        }

        Some(self.local(Instruction::new(
            Tag::Asm,
            offset,
            vec![Arg::Inst(asm_source_inst), Arg::Inst(return_type_inst)],
            vec![
                Arg::Bool(asm.volatile),
                output,
                Arg::InstList(inputs),
                Arg::InstList(clobbers),
                Arg::InstList(args),
            ],
        )))
    }
}
