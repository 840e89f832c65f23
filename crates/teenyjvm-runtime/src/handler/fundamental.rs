use teenyjvm_isa::Opcode;

use crate::error::TrapError;
use crate::frame::ExecCtx;
use crate::handler::{HandleResult, Handler};

pub fn nop(_handler: &Handler, _ctx: &mut ExecCtx) -> Result<HandleResult, TrapError> {
    Ok(HandleResult::Move(Opcode::nop.instruction_length() as i32))
}

pub fn dup(_handler: &Handler, ctx: &mut ExecCtx) -> Result<HandleResult, TrapError> {
    ctx.stack.dup()?;
    Ok(HandleResult::Move(Opcode::dup.instruction_length() as i32))
}

/// `iconst_m1` through `iconst_5`: the pushed value is the opcode byte's
/// distance from `iconst_0`, `iconst_m1` being the one exception at -1.
pub fn iconst(_handler: &Handler, ctx: &mut ExecCtx) -> Result<HandleResult, TrapError> {
    let byte = ctx.opcode_byte()?;
    let value = byte as i32 - Opcode::iconst_0 as i32;
    ctx.stack.push(value);
    Ok(HandleResult::Move(1))
}

pub fn bipush(_handler: &Handler, ctx: &mut ExecCtx) -> Result<HandleResult, TrapError> {
    let value = ctx.imm_i8()? as i32;
    ctx.stack.push(value);
    Ok(HandleResult::Move(
        Opcode::bipush.instruction_length() as i32
    ))
}

pub fn sipush(_handler: &Handler, ctx: &mut ExecCtx) -> Result<HandleResult, TrapError> {
    let value = ctx.imm_i16()? as i32;
    ctx.stack.push(value);
    Ok(HandleResult::Move(
        Opcode::sipush.instruction_length() as i32
    ))
}

/// `ldc` pushes a constant-pool integer by its one-byte index.
pub fn ldc(_handler: &Handler, ctx: &mut ExecCtx) -> Result<HandleResult, TrapError> {
    let index = ctx.imm_u8()? as u16;
    let value = ctx
        .class
        .constant_int(index)
        .map_err(|_| TrapError::InvalidConstant(index))?;
    ctx.stack.push(value);
    Ok(HandleResult::Move(Opcode::ldc.instruction_length() as i32))
}
