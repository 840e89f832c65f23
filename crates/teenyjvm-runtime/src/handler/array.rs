use teenyjvm_isa::Opcode;

use crate::error::TrapError;
use crate::frame::ExecCtx;
use crate::handler::{HandleResult, Handler};

/// `newarray`: pops a length, allocates it on the heap, pushes the handle.
/// The one-byte `atype` operand (JVM's `T_INT` etc.) is read but ignored —
/// this subset only ever allocates int arrays.
pub fn newarray(_handler: &Handler, ctx: &mut ExecCtx) -> Result<HandleResult, TrapError> {
    let len = ctx.stack.pop()?;
    let handle = ctx.heap.alloc(len)?;
    ctx.stack.push(handle);
    Ok(HandleResult::Move(
        Opcode::newarray.instruction_length() as i32
    ))
}

pub fn arraylength(_handler: &Handler, ctx: &mut ExecCtx) -> Result<HandleResult, TrapError> {
    let handle = ctx.stack.pop()?;
    let len = ctx.heap.length(handle)?;
    ctx.stack.push(len);
    Ok(HandleResult::Move(
        Opcode::arraylength.instruction_length() as i32
    ))
}

pub fn iastore(_handler: &Handler, ctx: &mut ExecCtx) -> Result<HandleResult, TrapError> {
    let value = ctx.stack.pop()?;
    let index = ctx.stack.pop()?;
    let handle = ctx.stack.pop()?;
    ctx.heap.store(handle, index, value)?;
    Ok(HandleResult::Move(
        Opcode::iastore.instruction_length() as i32
    ))
}

pub fn iaload(_handler: &Handler, ctx: &mut ExecCtx) -> Result<HandleResult, TrapError> {
    let index = ctx.stack.pop()?;
    let handle = ctx.stack.pop()?;
    let value = ctx.heap.load(handle, index)?;
    ctx.stack.push(value);
    Ok(HandleResult::Move(
        Opcode::iaload.instruction_length() as i32
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::OperandStack;
    use crate::heap::Heap;
    use pretty_assertions::assert_eq;
    use teenyjvm_class::ClassFile;

    fn class_with(code: &[u8]) -> ClassFile {
        let bytes = teenyjvm_class::testing::build_minimal_class(code, 4, 4);
        ClassFile::parse(&bytes).unwrap()
    }

    #[test]
    fn newarray_then_iastore_then_iaload_round_trips() {
        let code = [Opcode::newarray as u8, 0];
        let class = class_with(&code);
        let mut heap = Heap::new();
        let handler = Handler::new();

        let mut stack = OperandStack::with_capacity(4);
        stack.push(3);
        let mut ctx = ExecCtx {
            code: &code,
            pc: 0,
            stack,
            locals: vec![],
            class: &class,
            heap: &mut heap,
        };
        newarray(&handler, &mut ctx).unwrap();
        let handle = ctx.stack.pop().unwrap();

        ctx.stack.push(handle);
        ctx.stack.push(1);
        ctx.stack.push(99);
        iastore(&handler, &mut ctx).unwrap();

        ctx.stack.push(handle);
        ctx.stack.push(1);
        iaload(&handler, &mut ctx).unwrap();
        assert_eq!(ctx.stack.pop().unwrap(), 99);
    }
}
