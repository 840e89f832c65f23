use teenyjvm_isa::Opcode;

use crate::error::TrapError;
use crate::frame::ExecCtx;
use crate::handler::{HandleResult, Handler};
use crate::kernel::Predicate;

fn predicate_for(opcode: Opcode) -> Predicate {
    use Opcode::*;
    match opcode {
        ifeq | if_icmpeq => Predicate::Eq,
        ifne | if_icmpne => Predicate::Ne,
        iflt | if_icmplt => Predicate::Lt,
        ifge | if_icmpge => Predicate::Ge,
        ifgt | if_icmpgt => Predicate::Gt,
        ifle | if_icmple => Predicate::Le,
        other => unreachable!("predicate_for() called with non-branch opcode {other:?}"),
    }
}

/// `ifeq`..`ifle`: pops one value and compares it against zero.
pub fn if_zero(_handler: &Handler, ctx: &mut ExecCtx) -> Result<HandleResult, TrapError> {
    let opcode = Opcode::from_byte(ctx.opcode_byte()?).expect("dispatched only for known opcodes");
    let value = ctx.stack.pop()?;
    branch(ctx, predicate_for(opcode).eval(value, 0))
}

/// `if_icmpeq`..`if_icmple`: pops `(a, b)` and compares them directly.
pub fn if_compare(_handler: &Handler, ctx: &mut ExecCtx) -> Result<HandleResult, TrapError> {
    let opcode = Opcode::from_byte(ctx.opcode_byte()?).expect("dispatched only for known opcodes");
    let (a, b) = ctx.stack.pop2()?;
    branch(ctx, predicate_for(opcode).eval(a, b))
}

pub fn goto(_handler: &Handler, ctx: &mut ExecCtx) -> Result<HandleResult, TrapError> {
    let offset = ctx.imm_i16()? as i32;
    Ok(HandleResult::Move(offset))
}

/// Shared tail for the two conditional families: a taken branch moves by
/// the signed 16-bit offset (relative to the instruction's own start, per
/// [`crate::frame::ExecCtx::imm_i16`]); an untaken one just falls through to
/// the next instruction, which for these three-byte opcodes is +3.
fn branch(ctx: &mut ExecCtx, taken: bool) -> Result<HandleResult, TrapError> {
    if taken {
        Ok(HandleResult::Move(ctx.imm_i16()? as i32))
    } else {
        Ok(HandleResult::Move(3))
    }
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
    fn ifeq_takes_branch_on_zero() {
        let code = [Opcode::ifeq as u8, 0, 10];
        let class = class_with(&code);
        let mut heap = Heap::new();
        let mut stack = OperandStack::with_capacity(1);
        stack.push(0);
        let mut ctx = ExecCtx {
            code: &code,
            pc: 0,
            stack,
            locals: vec![],
            class: &class,
            heap: &mut heap,
        };
        let handler = Handler::new();
        let result = if_zero(&handler, &mut ctx).unwrap();
        match result {
            HandleResult::Move(offset) => assert_eq!(offset, 10),
            _ => panic!("expected Move"),
        }
    }

    #[test]
    fn ifeq_falls_through_on_nonzero() {
        let code = [Opcode::ifeq as u8, 0, 10];
        let class = class_with(&code);
        let mut heap = Heap::new();
        let mut stack = OperandStack::with_capacity(1);
        stack.push(1);
        let mut ctx = ExecCtx {
            code: &code,
            pc: 0,
            stack,
            locals: vec![],
            class: &class,
            heap: &mut heap,
        };
        let handler = Handler::new();
        let result = if_zero(&handler, &mut ctx).unwrap();
        match result {
            HandleResult::Move(offset) => assert_eq!(offset, 3),
            _ => panic!("expected Move"),
        }
    }
}
