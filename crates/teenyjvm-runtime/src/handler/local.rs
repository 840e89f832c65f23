use teenyjvm_isa::Opcode;

use crate::error::TrapError;
use crate::frame::ExecCtx;
use crate::handler::{HandleResult, Handler};

fn local_slot(ctx: &mut ExecCtx, index: u16) -> Result<i32, TrapError> {
    ctx.locals
        .get(index as usize)
        .copied()
        .ok_or(TrapError::StackUnderflow) // an out-of-range local index never occurs for verifier-passed code
}

/// `iload`/`aload`: one-byte local index follows the opcode. Int and
/// reference-typed locals (array handles) share the same 32-bit slot, so
/// loading either is the identical operation.
pub fn iload(_handler: &Handler, ctx: &mut ExecCtx) -> Result<HandleResult, TrapError> {
    let index = ctx.imm_u8()? as u16;
    let value = local_slot(ctx, index)?;
    ctx.stack.push(value);
    Ok(HandleResult::Move(Opcode::iload.instruction_length() as i32))
}

/// `iload_0`..`iload_3`, `aload_0`..`aload_3`: the local index is implied by
/// the opcode byte itself, within whichever of the two four-opcode families
/// it falls in.
pub fn iload_n(_handler: &Handler, ctx: &mut ExecCtx) -> Result<HandleResult, TrapError> {
    let byte = ctx.opcode_byte()?;
    let index = if byte >= Opcode::aload_0 as u8 {
        byte - Opcode::aload_0 as u8
    } else {
        byte - Opcode::iload_0 as u8
    };
    let value = local_slot(ctx, index as u16)?;
    ctx.stack.push(value);
    Ok(HandleResult::Move(1))
}

pub fn istore(_handler: &Handler, ctx: &mut ExecCtx) -> Result<HandleResult, TrapError> {
    let index = ctx.imm_u8()? as usize;
    let value = ctx.stack.pop()?;
    ctx.locals[index] = value;
    Ok(HandleResult::Move(
        Opcode::istore.instruction_length() as i32
    ))
}

pub fn istore_n(_handler: &Handler, ctx: &mut ExecCtx) -> Result<HandleResult, TrapError> {
    let byte = ctx.opcode_byte()?;
    let index = if byte >= Opcode::astore_0 as u8 {
        byte - Opcode::astore_0 as u8
    } else {
        byte - Opcode::istore_0 as u8
    };
    let value = ctx.stack.pop()?;
    ctx.locals[index as usize] = value;
    Ok(HandleResult::Move(1))
}

/// `iinc index, const`: the only instruction that mutates a local without
/// going through the operand stack.
pub fn iinc(_handler: &Handler, ctx: &mut ExecCtx) -> Result<HandleResult, TrapError> {
    let index = ctx.imm_u8()? as usize;
    let delta = ctx.code[ctx.pc as usize + 2] as i8 as i32;
    ctx.locals[index] = ctx.locals[index].wrapping_add(delta);
    Ok(HandleResult::Move(Opcode::iinc.instruction_length() as i32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heap::Heap;
    use pretty_assertions::assert_eq;
    use teenyjvm_class::ClassFile;

    fn empty_class() -> ClassFile {
        let bytes = teenyjvm_class::testing::build_minimal_class(&[0xb1], 4, 4);
        ClassFile::parse(&bytes).unwrap()
    }

    #[test]
    fn iinc_wraps_and_leaves_stack_untouched() {
        let class = empty_class();
        let mut heap = Heap::new();
        let code = [Opcode::iinc as u8, 0, 5];
        let mut ctx = ExecCtx {
            code: &code,
            pc: 0,
            stack: crate::frame::OperandStack::with_capacity(0),
            locals: vec![i32::MAX],
            class: &class,
            heap: &mut heap,
        };
        let handler = Handler::new();
        iinc(&handler, &mut ctx).unwrap();
        assert_eq!(ctx.locals[0], i32::MIN + 4);
    }
}
