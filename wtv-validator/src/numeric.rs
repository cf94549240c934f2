// WTV - wtv-validator
// Module: Numeric Instruction Table
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Numeric instructions and their stack signatures.
//!
//! Every numeric instruction pops a fixed list of operand types and pushes a
//! single result, so the whole family is described by one table.

use wtv_foundation::ValueType;

/// Callback family a numeric instruction reports failures through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericClass {
    /// Two operands of one type, `i32` result
    Compare,
    /// One operand, result of the same type
    Unary,
    /// Two operands and a result of one type
    Binary,
    /// One operand, result of another type (tests included)
    Convert,
}

impl NumericClass {
    /// Name of the reader callback for this family
    #[must_use]
    pub const fn callback(self) -> &'static str {
        match self {
            NumericClass::Compare => "OnCompareExpr",
            NumericClass::Unary => "OnUnaryExpr",
            NumericClass::Binary => "OnBinaryExpr",
            NumericClass::Convert => "OnConvertExpr",
        }
    }
}

macro_rules! numeric_ops {
    ($( $variant:ident => $name:literal, $class:ident, [$($param:ident),*] -> $result:ident; )*) => {
        /// Numeric instruction
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum NumericOp {
            $(
                #[doc = concat!("`", $name, "`")]
                $variant,
            )*
        }

        impl NumericOp {
            /// Every numeric instruction, in opcode order
            pub const ALL: &'static [NumericOp] = &[$(NumericOp::$variant),*];

            /// Text-format name
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(NumericOp::$variant => $name,)*
                }
            }

            /// Callback family
            #[must_use]
            pub const fn class(self) -> NumericClass {
                match self {
                    $(NumericOp::$variant => NumericClass::$class,)*
                }
            }

            /// Operand types, bottom-most first
            #[must_use]
            pub const fn params(self) -> &'static [ValueType] {
                match self {
                    $(NumericOp::$variant => &[$(ValueType::$param),*],)*
                }
            }

            /// Result type
            #[must_use]
            pub const fn result(self) -> ValueType {
                match self {
                    $(NumericOp::$variant => ValueType::$result,)*
                }
            }
        }
    };
}

numeric_ops! {
    I32Eqz => "i32.eqz", Convert, [I32] -> I32;
    I32Eq => "i32.eq", Compare, [I32, I32] -> I32;
    I32Ne => "i32.ne", Compare, [I32, I32] -> I32;
    I32LtS => "i32.lt_s", Compare, [I32, I32] -> I32;
    I32LtU => "i32.lt_u", Compare, [I32, I32] -> I32;
    I32GtS => "i32.gt_s", Compare, [I32, I32] -> I32;
    I32GtU => "i32.gt_u", Compare, [I32, I32] -> I32;
    I32LeS => "i32.le_s", Compare, [I32, I32] -> I32;
    I32LeU => "i32.le_u", Compare, [I32, I32] -> I32;
    I32GeS => "i32.ge_s", Compare, [I32, I32] -> I32;
    I32GeU => "i32.ge_u", Compare, [I32, I32] -> I32;

    I64Eqz => "i64.eqz", Convert, [I64] -> I32;
    I64Eq => "i64.eq", Compare, [I64, I64] -> I32;
    I64Ne => "i64.ne", Compare, [I64, I64] -> I32;
    I64LtS => "i64.lt_s", Compare, [I64, I64] -> I32;
    I64LtU => "i64.lt_u", Compare, [I64, I64] -> I32;
    I64GtS => "i64.gt_s", Compare, [I64, I64] -> I32;
    I64GtU => "i64.gt_u", Compare, [I64, I64] -> I32;
    I64LeS => "i64.le_s", Compare, [I64, I64] -> I32;
    I64LeU => "i64.le_u", Compare, [I64, I64] -> I32;
    I64GeS => "i64.ge_s", Compare, [I64, I64] -> I32;
    I64GeU => "i64.ge_u", Compare, [I64, I64] -> I32;

    F32Eq => "f32.eq", Compare, [F32, F32] -> I32;
    F32Ne => "f32.ne", Compare, [F32, F32] -> I32;
    F32Lt => "f32.lt", Compare, [F32, F32] -> I32;
    F32Gt => "f32.gt", Compare, [F32, F32] -> I32;
    F32Le => "f32.le", Compare, [F32, F32] -> I32;
    F32Ge => "f32.ge", Compare, [F32, F32] -> I32;

    F64Eq => "f64.eq", Compare, [F64, F64] -> I32;
    F64Ne => "f64.ne", Compare, [F64, F64] -> I32;
    F64Lt => "f64.lt", Compare, [F64, F64] -> I32;
    F64Gt => "f64.gt", Compare, [F64, F64] -> I32;
    F64Le => "f64.le", Compare, [F64, F64] -> I32;
    F64Ge => "f64.ge", Compare, [F64, F64] -> I32;

    I32Clz => "i32.clz", Unary, [I32] -> I32;
    I32Ctz => "i32.ctz", Unary, [I32] -> I32;
    I32Popcnt => "i32.popcnt", Unary, [I32] -> I32;
    I32Add => "i32.add", Binary, [I32, I32] -> I32;
    I32Sub => "i32.sub", Binary, [I32, I32] -> I32;
    I32Mul => "i32.mul", Binary, [I32, I32] -> I32;
    I32DivS => "i32.div_s", Binary, [I32, I32] -> I32;
    I32DivU => "i32.div_u", Binary, [I32, I32] -> I32;
    I32RemS => "i32.rem_s", Binary, [I32, I32] -> I32;
    I32RemU => "i32.rem_u", Binary, [I32, I32] -> I32;
    I32And => "i32.and", Binary, [I32, I32] -> I32;
    I32Or => "i32.or", Binary, [I32, I32] -> I32;
    I32Xor => "i32.xor", Binary, [I32, I32] -> I32;
    I32Shl => "i32.shl", Binary, [I32, I32] -> I32;
    I32ShrS => "i32.shr_s", Binary, [I32, I32] -> I32;
    I32ShrU => "i32.shr_u", Binary, [I32, I32] -> I32;
    I32Rotl => "i32.rotl", Binary, [I32, I32] -> I32;
    I32Rotr => "i32.rotr", Binary, [I32, I32] -> I32;

    I64Clz => "i64.clz", Unary, [I64] -> I64;
    I64Ctz => "i64.ctz", Unary, [I64] -> I64;
    I64Popcnt => "i64.popcnt", Unary, [I64] -> I64;
    I64Add => "i64.add", Binary, [I64, I64] -> I64;
    I64Sub => "i64.sub", Binary, [I64, I64] -> I64;
    I64Mul => "i64.mul", Binary, [I64, I64] -> I64;
    I64DivS => "i64.div_s", Binary, [I64, I64] -> I64;
    I64DivU => "i64.div_u", Binary, [I64, I64] -> I64;
    I64RemS => "i64.rem_s", Binary, [I64, I64] -> I64;
    I64RemU => "i64.rem_u", Binary, [I64, I64] -> I64;
    I64And => "i64.and", Binary, [I64, I64] -> I64;
    I64Or => "i64.or", Binary, [I64, I64] -> I64;
    I64Xor => "i64.xor", Binary, [I64, I64] -> I64;
    I64Shl => "i64.shl", Binary, [I64, I64] -> I64;
    I64ShrS => "i64.shr_s", Binary, [I64, I64] -> I64;
    I64ShrU => "i64.shr_u", Binary, [I64, I64] -> I64;
    I64Rotl => "i64.rotl", Binary, [I64, I64] -> I64;
    I64Rotr => "i64.rotr", Binary, [I64, I64] -> I64;

    F32Abs => "f32.abs", Unary, [F32] -> F32;
    F32Neg => "f32.neg", Unary, [F32] -> F32;
    F32Ceil => "f32.ceil", Unary, [F32] -> F32;
    F32Floor => "f32.floor", Unary, [F32] -> F32;
    F32Trunc => "f32.trunc", Unary, [F32] -> F32;
    F32Nearest => "f32.nearest", Unary, [F32] -> F32;
    F32Sqrt => "f32.sqrt", Unary, [F32] -> F32;
    F32Add => "f32.add", Binary, [F32, F32] -> F32;
    F32Sub => "f32.sub", Binary, [F32, F32] -> F32;
    F32Mul => "f32.mul", Binary, [F32, F32] -> F32;
    F32Div => "f32.div", Binary, [F32, F32] -> F32;
    F32Min => "f32.min", Binary, [F32, F32] -> F32;
    F32Max => "f32.max", Binary, [F32, F32] -> F32;
    F32Copysign => "f32.copysign", Binary, [F32, F32] -> F32;

    F64Abs => "f64.abs", Unary, [F64] -> F64;
    F64Neg => "f64.neg", Unary, [F64] -> F64;
    F64Ceil => "f64.ceil", Unary, [F64] -> F64;
    F64Floor => "f64.floor", Unary, [F64] -> F64;
    F64Trunc => "f64.trunc", Unary, [F64] -> F64;
    F64Nearest => "f64.nearest", Unary, [F64] -> F64;
    F64Sqrt => "f64.sqrt", Unary, [F64] -> F64;
    F64Add => "f64.add", Binary, [F64, F64] -> F64;
    F64Sub => "f64.sub", Binary, [F64, F64] -> F64;
    F64Mul => "f64.mul", Binary, [F64, F64] -> F64;
    F64Div => "f64.div", Binary, [F64, F64] -> F64;
    F64Min => "f64.min", Binary, [F64, F64] -> F64;
    F64Max => "f64.max", Binary, [F64, F64] -> F64;
    F64Copysign => "f64.copysign", Binary, [F64, F64] -> F64;

    I32WrapI64 => "i32.wrap_i64", Convert, [I64] -> I32;
    I32TruncF32S => "i32.trunc_f32_s", Convert, [F32] -> I32;
    I32TruncF32U => "i32.trunc_f32_u", Convert, [F32] -> I32;
    I32TruncF64S => "i32.trunc_f64_s", Convert, [F64] -> I32;
    I32TruncF64U => "i32.trunc_f64_u", Convert, [F64] -> I32;
    I64ExtendI32S => "i64.extend_i32_s", Convert, [I32] -> I64;
    I64ExtendI32U => "i64.extend_i32_u", Convert, [I32] -> I64;
    I64TruncF32S => "i64.trunc_f32_s", Convert, [F32] -> I64;
    I64TruncF32U => "i64.trunc_f32_u", Convert, [F32] -> I64;
    I64TruncF64S => "i64.trunc_f64_s", Convert, [F64] -> I64;
    I64TruncF64U => "i64.trunc_f64_u", Convert, [F64] -> I64;
    F32ConvertI32S => "f32.convert_i32_s", Convert, [I32] -> F32;
    F32ConvertI32U => "f32.convert_i32_u", Convert, [I32] -> F32;
    F32ConvertI64S => "f32.convert_i64_s", Convert, [I64] -> F32;
    F32ConvertI64U => "f32.convert_i64_u", Convert, [I64] -> F32;
    F32DemoteF64 => "f32.demote_f64", Convert, [F64] -> F32;
    F64ConvertI32S => "f64.convert_i32_s", Convert, [I32] -> F64;
    F64ConvertI32U => "f64.convert_i32_u", Convert, [I32] -> F64;
    F64ConvertI64S => "f64.convert_i64_s", Convert, [I64] -> F64;
    F64ConvertI64U => "f64.convert_i64_u", Convert, [I64] -> F64;
    F64PromoteF32 => "f64.promote_f32", Convert, [F32] -> F64;
    I32ReinterpretF32 => "i32.reinterpret_f32", Convert, [F32] -> I32;
    I64ReinterpretF64 => "i64.reinterpret_f64", Convert, [F64] -> I64;
    F32ReinterpretI32 => "f32.reinterpret_i32", Convert, [I32] -> F32;
    F64ReinterpretI64 => "f64.reinterpret_i64", Convert, [I64] -> F64;

    I32Extend8S => "i32.extend8_s", Unary, [I32] -> I32;
    I32Extend16S => "i32.extend16_s", Unary, [I32] -> I32;
    I64Extend8S => "i64.extend8_s", Unary, [I64] -> I64;
    I64Extend16S => "i64.extend16_s", Unary, [I64] -> I64;
    I64Extend32S => "i64.extend32_s", Unary, [I64] -> I64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signatures() {
        assert_eq!(NumericOp::I32Add.params(), [ValueType::I32, ValueType::I32]);
        assert_eq!(NumericOp::F64Lt.result(), ValueType::I32);
        assert_eq!(NumericOp::I64ExtendI32U.params(), [ValueType::I32]);
        assert_eq!(NumericOp::I64ExtendI32U.result(), ValueType::I64);
    }

    #[test]
    fn test_classes_follow_shape() {
        for op in NumericOp::ALL {
            let params = op.params();
            match op.class() {
                NumericClass::Binary => {
                    assert_eq!(params.len(), 2, "{}", op.name());
                    assert_eq!(params[0], op.result(), "{}", op.name());
                }
                NumericClass::Compare => {
                    assert_eq!(params.len(), 2, "{}", op.name());
                    assert_eq!(op.result(), ValueType::I32, "{}", op.name());
                }
                NumericClass::Unary => {
                    assert_eq!(params, [op.result()], "{}", op.name());
                }
                NumericClass::Convert => assert_eq!(params.len(), 1, "{}", op.name()),
            }
        }
    }

    #[test]
    fn test_test_ops_report_as_convert() {
        assert_eq!(NumericOp::I32Eqz.class().callback(), "OnConvertExpr");
        assert_eq!(NumericOp::I32Eqz.name(), "i32.eqz");
        assert_eq!(NumericOp::F32Copysign.class().callback(), "OnBinaryExpr");
    }
}
