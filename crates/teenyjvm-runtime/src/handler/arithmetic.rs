use teenyjvm_isa::Opcode;

use crate::error::TrapError;
use crate::frame::ExecCtx;
use crate::handler::{HandleResult, Handler};
use crate::kernel;

/// Every two-operand int instruction (`iadd` through `iushr`) pops `(a, b)`,
/// applies the matching pure function from [`kernel`], and pushes the
/// result; only the divide/remainder pair can fail.
pub fn binary(_handler: &Handler, ctx: &mut ExecCtx) -> Result<HandleResult, TrapError> {
    let opcode = Opcode::from_byte(ctx.opcode_byte()?).expect("dispatched only for known opcodes");
    let (a, b) = ctx.stack.pop2()?;
    let result = match opcode {
        Opcode::iadd => kernel::iadd(a, b),
        Opcode::isub => kernel::isub(a, b),
        Opcode::imul => kernel::imul(a, b),
        Opcode::idiv => kernel::idiv(a, b)?,
        Opcode::irem => kernel::irem(a, b)?,
        Opcode::iand => kernel::iand(a, b),
        Opcode::ior => kernel::ior(a, b),
        Opcode::ixor => kernel::ixor(a, b),
        Opcode::ishl => kernel::ishl(a, b),
        Opcode::ishr => kernel::ishr(a, b),
        Opcode::iushr => kernel::iushr(a, b),
        other => unreachable!("binary() registered for non-binary opcode {other:?}"),
    };
    ctx.stack.push(result);
    Ok(HandleResult::Move(1))
}

pub fn ineg(_handler: &Handler, ctx: &mut ExecCtx) -> Result<HandleResult, TrapError> {
    let a = ctx.stack.pop()?;
    ctx.stack.push(kernel::ineg(a));
    Ok(HandleResult::Move(1))
}
