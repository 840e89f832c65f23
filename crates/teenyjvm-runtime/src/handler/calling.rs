use teenyjvm_isa::{param_count, Opcode};

use crate::error::TrapError;
use crate::frame::ExecCtx;
use crate::handler::{execute, HandleResult, Handler};

/// `getstatic` is only ever used in this subset to load `System.out` ahead of
/// an `invokevirtual` `println` call; the interpreter doesn't model fields or
/// a receiver slot at all, so this pushes nothing and is otherwise a no-op.
pub fn getstatic(_handler: &Handler, _ctx: &mut ExecCtx) -> Result<HandleResult, TrapError> {
    Ok(HandleResult::Move(
        Opcode::getstatic.instruction_length() as i32
    ))
}

/// `invokevirtual`: the only receiver this subset supports is
/// `System.out.println(int)`. Consumes only the integer argument, no
/// receiver slot — `getstatic` pushed nothing, so none is there to pop.
pub fn invokevirtual(_handler: &Handler, ctx: &mut ExecCtx) -> Result<HandleResult, TrapError> {
    let value = ctx.stack.pop()?;
    println!("{value}");
    Ok(HandleResult::Move(
        Opcode::invokevirtual.instruction_length() as i32,
    ))
}

/// `invokestatic`: the two-byte operand is a constant pool index naming the
/// callee directly (this subset skips Methodref resolution and indexes the
/// method table with it, per [`teenyjvm_class::ClassFile::find_method_by_cp_index`]).
/// Arguments are popped off the caller's stack, right-to-left, into a fresh
/// locals array sized by the callee's own `max_locals`; the call recurses
/// through [`execute`], reusing the same `Handler` and `Heap`.
pub fn invokestatic(handler: &Handler, ctx: &mut ExecCtx) -> Result<HandleResult, TrapError> {
    let cp_index = ctx.imm_u16()?;
    let callee = ctx.class.find_method_by_cp_index(cp_index);
    let argc = param_count(&callee.descriptor);

    let mut locals = vec![0i32; callee.code.max_locals as usize];
    for slot in (0..argc as usize).rev() {
        locals[slot] = ctx.stack.pop()?;
    }

    let result = execute(handler, callee, locals, ctx.class, ctx.heap)?;
    if let Some(value) = result {
        ctx.stack.push(value);
    }
    Ok(HandleResult::Move(
        Opcode::invokestatic.instruction_length() as i32,
    ))
}

pub fn return_void(_handler: &Handler, _ctx: &mut ExecCtx) -> Result<HandleResult, TrapError> {
    Ok(HandleResult::Return(None))
}

pub fn return_value(_handler: &Handler, ctx: &mut ExecCtx) -> Result<HandleResult, TrapError> {
    let value = ctx.stack.pop()?;
    Ok(HandleResult::Return(Some(value)))
}
