use teenyjvm_class::{ClassFile, Method};
use teenyjvm_isa::Opcode;

use crate::error::TrapError;
use crate::frame::{ExecCtx, OperandStack};
use crate::heap::Heap;

mod arithmetic;
mod array;
mod calling;
mod control_flow;
mod fundamental;
mod local;

pub type HandleFunc = fn(&Handler, &mut ExecCtx) -> Result<HandleResult, TrapError>;

/// What a handler did to control flow. There is no separate `Jump` variant
/// because every branch in TeenyJVM (including calls) is expressed as an
/// offset relative to the current instruction, and no block/loop frames
/// exist to need an `End`.
pub enum HandleResult {
    /// Advance `pc` by this many bytes, relative to the start of the current
    /// instruction — this applies uniformly to sequential advance and to
    /// taken/untaken branches alike, since a branch offset is always relative
    /// to the branching instruction's own position, not the byte after it.
    Move(i32),
    /// The method returned, with or without a value.
    Return(Option<i32>),
}

/// A dense jump table from raw opcode byte to handler function. `None`
/// entries are opcodes this subset doesn't support.
pub struct Handler {
    handlers: [Option<HandleFunc>; 256],
}

impl Handler {
    pub fn new() -> Self {
        let mut handlers: [Option<HandleFunc>; 256] = [None; 256];

        handlers[Opcode::nop as usize] = Some(fundamental::nop);
        handlers[Opcode::dup as usize] = Some(fundamental::dup);
        handlers[Opcode::iconst_m1 as usize] = Some(fundamental::iconst);
        handlers[Opcode::iconst_0 as usize] = Some(fundamental::iconst);
        handlers[Opcode::iconst_1 as usize] = Some(fundamental::iconst);
        handlers[Opcode::iconst_2 as usize] = Some(fundamental::iconst);
        handlers[Opcode::iconst_3 as usize] = Some(fundamental::iconst);
        handlers[Opcode::iconst_4 as usize] = Some(fundamental::iconst);
        handlers[Opcode::iconst_5 as usize] = Some(fundamental::iconst);
        handlers[Opcode::bipush as usize] = Some(fundamental::bipush);
        handlers[Opcode::sipush as usize] = Some(fundamental::sipush);
        handlers[Opcode::ldc as usize] = Some(fundamental::ldc);

        handlers[Opcode::iload as usize] = Some(local::iload);
        handlers[Opcode::aload as usize] = Some(local::iload);
        handlers[Opcode::iload_0 as usize] = Some(local::iload_n);
        handlers[Opcode::iload_1 as usize] = Some(local::iload_n);
        handlers[Opcode::iload_2 as usize] = Some(local::iload_n);
        handlers[Opcode::iload_3 as usize] = Some(local::iload_n);
        handlers[Opcode::aload_0 as usize] = Some(local::iload_n);
        handlers[Opcode::aload_1 as usize] = Some(local::iload_n);
        handlers[Opcode::aload_2 as usize] = Some(local::iload_n);
        handlers[Opcode::aload_3 as usize] = Some(local::iload_n);
        handlers[Opcode::istore as usize] = Some(local::istore);
        handlers[Opcode::astore as usize] = Some(local::istore);
        handlers[Opcode::istore_0 as usize] = Some(local::istore_n);
        handlers[Opcode::istore_1 as usize] = Some(local::istore_n);
        handlers[Opcode::istore_2 as usize] = Some(local::istore_n);
        handlers[Opcode::istore_3 as usize] = Some(local::istore_n);
        handlers[Opcode::astore_0 as usize] = Some(local::istore_n);
        handlers[Opcode::astore_1 as usize] = Some(local::istore_n);
        handlers[Opcode::astore_2 as usize] = Some(local::istore_n);
        handlers[Opcode::astore_3 as usize] = Some(local::istore_n);
        handlers[Opcode::iinc as usize] = Some(local::iinc);

        handlers[Opcode::iadd as usize] = Some(arithmetic::binary);
        handlers[Opcode::isub as usize] = Some(arithmetic::binary);
        handlers[Opcode::imul as usize] = Some(arithmetic::binary);
        handlers[Opcode::idiv as usize] = Some(arithmetic::binary);
        handlers[Opcode::irem as usize] = Some(arithmetic::binary);
        handlers[Opcode::iand as usize] = Some(arithmetic::binary);
        handlers[Opcode::ior as usize] = Some(arithmetic::binary);
        handlers[Opcode::ixor as usize] = Some(arithmetic::binary);
        handlers[Opcode::ishl as usize] = Some(arithmetic::binary);
        handlers[Opcode::ishr as usize] = Some(arithmetic::binary);
        handlers[Opcode::iushr as usize] = Some(arithmetic::binary);
        handlers[Opcode::ineg as usize] = Some(arithmetic::ineg);

        handlers[Opcode::ifeq as usize] = Some(control_flow::if_zero);
        handlers[Opcode::ifne as usize] = Some(control_flow::if_zero);
        handlers[Opcode::iflt as usize] = Some(control_flow::if_zero);
        handlers[Opcode::ifge as usize] = Some(control_flow::if_zero);
        handlers[Opcode::ifgt as usize] = Some(control_flow::if_zero);
        handlers[Opcode::ifle as usize] = Some(control_flow::if_zero);
        handlers[Opcode::if_icmpeq as usize] = Some(control_flow::if_compare);
        handlers[Opcode::if_icmpne as usize] = Some(control_flow::if_compare);
        handlers[Opcode::if_icmplt as usize] = Some(control_flow::if_compare);
        handlers[Opcode::if_icmpge as usize] = Some(control_flow::if_compare);
        handlers[Opcode::if_icmpgt as usize] = Some(control_flow::if_compare);
        handlers[Opcode::if_icmple as usize] = Some(control_flow::if_compare);
        handlers[Opcode::goto as usize] = Some(control_flow::goto);

        handlers[Opcode::getstatic as usize] = Some(calling::getstatic);
        handlers[Opcode::invokevirtual as usize] = Some(calling::invokevirtual);
        handlers[Opcode::invokestatic as usize] = Some(calling::invokestatic);
        handlers[Opcode::return_ as usize] = Some(calling::return_void);
        handlers[Opcode::ireturn as usize] = Some(calling::return_value);
        handlers[Opcode::areturn as usize] = Some(calling::return_value);

        handlers[Opcode::newarray as usize] = Some(array::newarray);
        handlers[Opcode::arraylength as usize] = Some(array::arraylength);
        handlers[Opcode::iastore as usize] = Some(array::iastore);
        handlers[Opcode::iaload as usize] = Some(array::iaload);

        Handler { handlers }
    }

    pub fn dispatch(&self, ctx: &mut ExecCtx) -> Result<HandleResult, TrapError> {
        let opcode_byte = ctx
            .code
            .get(ctx.pc as usize)
            .copied()
            .ok_or(TrapError::StackUnderflow)?;
        match self.handlers[opcode_byte as usize] {
            Some(f) => f(self, ctx),
            None => Err(TrapError::UnknownOpcode(opcode_byte)),
        }
    }
}

impl Default for Handler {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs one method to completion: repeatedly dispatches the instruction at
/// `ctx.pc`, applying its `Move`/`Return` result, until the method returns.
/// `invokestatic` (`handler::calling::invokestatic`) calls back into this
/// same function for each nested call, so the Rust call stack doubles as
/// TeenyJVM's own: recursion depth is bounded only by the host stack.
pub fn execute(
    handler: &Handler,
    method: &Method,
    locals: Vec<i32>,
    class: &ClassFile,
    heap: &mut Heap,
) -> Result<Option<i32>, TrapError> {
    let mut ctx = ExecCtx {
        code: &method.code.code,
        pc: 0,
        stack: OperandStack::with_capacity(method.code.max_stack),
        locals,
        class,
        heap,
    };

    loop {
        match handler.dispatch(&mut ctx)? {
            HandleResult::Move(delta) => {
                ctx.pc = (ctx.pc as i32 + delta) as u32;
            }
            HandleResult::Return(value) => return Ok(value),
        }
    }
}
