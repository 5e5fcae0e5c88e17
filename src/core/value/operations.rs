use std::cmp::Ordering;

use super::Value;
use crate::core::types::operators::{BinaryOperator, UnaryOperator};

impl Value {
    /// 加法运算
    pub fn add(&self, other: &Value) -> Result<Value, String> {
        use Value::*;
        match (self, other) {
            (Null, _) | (_, Null) => Ok(Null),
            (Int(a), Int(b)) => a.checked_add(*b).map(Int).ok_or_else(|| "整数溢出".to_string()),
            (Float(a), Float(b)) => Ok(Float(a + b)),
            (Int(a), Float(b)) => Ok(Float(*a as f64 + b)),
            (Float(a), Int(b)) => Ok(Float(a + *b as f64)),
            _ => Err("无法对这些类型的值进行加法运算".to_string()),
        }
    }

    /// 减法运算
    pub fn sub(&self, other: &Value) -> Result<Value, String> {
        use Value::*;
        match (self, other) {
            (Null, _) | (_, Null) => Ok(Null),
            (Int(a), Int(b)) => a.checked_sub(*b).map(Int).ok_or_else(|| "整数溢出".to_string()),
            (Float(a), Float(b)) => Ok(Float(a - b)),
            (Int(a), Float(b)) => Ok(Float(*a as f64 - b)),
            (Float(a), Int(b)) => Ok(Float(a - *b as f64)),
            _ => Err("无法对这些值进行减法运算".to_string()),
        }
    }

    /// 乘法运算
    pub fn mul(&self, other: &Value) -> Result<Value, String> {
        use Value::*;
        match (self, other) {
            (Null, _) | (_, Null) => Ok(Null),
            (Int(a), Int(b)) => a.checked_mul(*b).map(Int).ok_or_else(|| "整数溢出".to_string()),
            (Float(a), Float(b)) => Ok(Float(a * b)),
            (Int(a), Float(b)) => Ok(Float(*a as f64 * b)),
            (Float(a), Int(b)) => Ok(Float(a * *b as f64)),
            _ => Err("无法对这些类型的值进行乘法运算".to_string()),
        }
    }

    /// 除法运算
    pub fn div(&self, other: &Value) -> Result<Value, String> {
        use Value::*;
        match (self, other) {
            (Null, _) | (_, Null) => Ok(Null),
            (Int(_), Int(0)) => Err("除零错误".to_string()),
            (Int(a), Int(b)) => a.checked_div(*b).map(Int).ok_or_else(|| "整数溢出".to_string()),
            (Float(_), Float(b)) | (Int(_), Float(b)) if *b == 0.0 => Err("除零错误".to_string()),
            (Float(_), Int(0)) => Err("除零错误".to_string()),
            (Float(a), Float(b)) => Ok(Float(a / b)),
            (Int(a), Float(b)) => Ok(Float(*a as f64 / b)),
            (Float(a), Int(b)) => Ok(Float(a / *b as f64)),
            _ => Err("无法对这些类型的值进行除法运算".to_string()),
        }
    }

    /// 取模运算
    pub fn rem(&self, other: &Value) -> Result<Value, String> {
        use Value::*;
        match (self, other) {
            (Null, _) | (_, Null) => Ok(Null),
            (Int(_), Int(0)) => Err("除零错误".to_string()),
            (Int(a), Int(b)) => a.checked_rem(*b).map(Int).ok_or_else(|| "整数溢出".to_string()),
            _ => Err("无法对这些类型的值进行取模运算".to_string()),
        }
    }

    /// 比较两个非空值，类型不可比较时返回 None
    fn partial_compare(&self, other: &Value) -> Option<Ordering> {
        use Value::*;
        match (self, other) {
            (Int(a), Int(b)) => Some(a.cmp(b)),
            (Float(a), Float(b)) => a.partial_cmp(b),
            (Int(a), Float(b)) => (*a as f64).partial_cmp(b),
            (Float(a), Int(b)) => a.partial_cmp(&(*b as f64)),
            (String(a), String(b)) => Some(a.cmp(b)),
            (Bool(a), Bool(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// 比较运算，任一侧为 NULL 时结果为 NULL
    pub fn compare(&self, op: BinaryOperator, other: &Value) -> Result<Value, String> {
        if self.is_null() || other.is_null() {
            return Ok(Value::Null);
        }
        let ordering = self
            .partial_compare(other)
            .ok_or_else(|| format!("无法比较 {} 与 {}", self, other))?;
        let result = match op {
            BinaryOperator::Equal => ordering == Ordering::Equal,
            BinaryOperator::NotEqual => ordering != Ordering::Equal,
            BinaryOperator::LessThan => ordering == Ordering::Less,
            BinaryOperator::LessThanOrEqual => ordering != Ordering::Greater,
            BinaryOperator::GreaterThan => ordering == Ordering::Greater,
            BinaryOperator::GreaterThanOrEqual => ordering != Ordering::Less,
            _ => return Err(format!("{} 不是比较运算符", op)),
        };
        Ok(Value::Bool(result))
    }

    /// 三值逻辑 AND
    pub fn and(&self, other: &Value) -> Result<Value, String> {
        match (self.logic_operand()?, other.logic_operand()?) {
            (Some(false), _) | (_, Some(false)) => Ok(Value::Bool(false)),
            (Some(true), Some(true)) => Ok(Value::Bool(true)),
            _ => Ok(Value::Null),
        }
    }

    /// 三值逻辑 OR
    pub fn or(&self, other: &Value) -> Result<Value, String> {
        match (self.logic_operand()?, other.logic_operand()?) {
            (Some(true), _) | (_, Some(true)) => Ok(Value::Bool(true)),
            (Some(false), Some(false)) => Ok(Value::Bool(false)),
            _ => Ok(Value::Null),
        }
    }

    fn logic_operand(&self) -> Result<Option<bool>, String> {
        match self {
            Value::Null => Ok(None),
            Value::Bool(b) => Ok(Some(*b)),
            other => Err(format!("{} 不是布尔值", other)),
        }
    }

    /// 计算二元运算
    pub fn binary(&self, op: BinaryOperator, other: &Value) -> Result<Value, String> {
        match op {
            BinaryOperator::Add => self.add(other),
            BinaryOperator::Subtract => self.sub(other),
            BinaryOperator::Multiply => self.mul(other),
            BinaryOperator::Divide => self.div(other),
            BinaryOperator::Modulo => self.rem(other),
            BinaryOperator::And => self.and(other),
            BinaryOperator::Or => self.or(other),
            _ => self.compare(op, other),
        }
    }

    /// 计算一元运算
    pub fn unary(&self, op: UnaryOperator) -> Result<Value, String> {
        match op {
            UnaryOperator::Not => match self.logic_operand()? {
                Some(b) => Ok(Value::Bool(!b)),
                None => Ok(Value::Null),
            },
            UnaryOperator::Minus => match self {
                Value::Null => Ok(Value::Null),
                Value::Int(v) => v.checked_neg().map(Value::Int).ok_or_else(|| "整数溢出".to_string()),
                Value::Float(v) => Ok(Value::Float(-v)),
                other => Err(format!("无法对 {} 取负", other)),
            },
            UnaryOperator::IsNull => Ok(Value::Bool(self.is_null())),
            UnaryOperator::IsNotNull => Ok(Value::Bool(!self.is_null())),
        }
    }
}
