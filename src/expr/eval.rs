//! Tree-walking evaluator for compiled formatters.
//!
//! Values follow JavaScript coercion rules closely enough that formatter
//! snippets written for the browser chart library keep their output. Every
//! failure is an [`EvalError`]; nothing here panics on user input.

use super::ast::{BinaryOp, Body, Expr, Function, Global, Literal, LogicalOp, Stmt, TemplatePart, UnaryOp};
use super::coerce::{
    number_to_string, parse_float_prefix, parse_int_prefix, string_to_number, to_fixed,
    to_locale_string,
};
use super::error::{EvalError, EvalResult};
use crate::constants::{MAX_EVAL_STEPS, MAX_STRING_LEN};
use serde_json::{Map, Number, Value};

/// Runtime value of the formatter language
#[derive(Debug, Clone, PartialEq)]
pub enum Val {
    Undefined,
    Null,
    Bool(bool),
    Num(f64),
    Str(String),
    Obj(Map<String, Value>),
    Arr(Vec<Value>),
    Global(Global),
}

impl Val {
    pub fn from_json(value: &Value) -> Val {
        match value {
            Value::Null => Val::Null,
            Value::Bool(b) => Val::Bool(*b),
            Value::Number(n) => Val::Num(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => Val::Str(s.clone()),
            Value::Array(items) => Val::Arr(items.clone()),
            Value::Object(map) => Val::Obj(map.clone()),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Val::Undefined | Val::Null | Val::Global(_) => Value::Null,
            Val::Bool(b) => Value::Bool(*b),
            Val::Num(n) => Number::from_f64(*n).map(Value::Number).unwrap_or(Value::Null),
            Val::Str(s) => Value::String(s.clone()),
            Val::Obj(map) => Value::Object(map.clone()),
            Val::Arr(items) => Value::Array(items.clone()),
        }
    }

    fn is_nullish(&self) -> bool {
        matches!(self, Val::Undefined | Val::Null)
    }

    pub fn truthy(&self) -> bool {
        match self {
            Val::Undefined | Val::Null => false,
            Val::Bool(b) => *b,
            Val::Num(n) => *n != 0.0 && !n.is_nan(),
            Val::Str(s) => !s.is_empty(),
            Val::Obj(_) | Val::Arr(_) | Val::Global(_) => true,
        }
    }

    pub fn type_of(&self) -> &'static str {
        match self {
            Val::Undefined => "undefined",
            Val::Bool(_) => "boolean",
            Val::Num(_) => "number",
            Val::Str(_) => "string",
            Val::Null | Val::Obj(_) | Val::Arr(_) | Val::Global(Global::Math) => "object",
            Val::Global(_) => "function",
        }
    }

    pub fn to_number(&self) -> f64 {
        match self {
            Val::Undefined => f64::NAN,
            Val::Null => 0.0,
            Val::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Val::Num(n) => *n,
            Val::Str(s) => string_to_number(s),
            Val::Arr(items) if items.is_empty() => 0.0,
            Val::Arr(items) if items.len() == 1 => Val::from_json(&items[0]).to_number(),
            Val::Obj(_) | Val::Arr(_) | Val::Global(_) => f64::NAN,
        }
    }

    pub fn to_js_string(&self) -> String {
        match self {
            Val::Undefined => "undefined".to_string(),
            Val::Null => "null".to_string(),
            Val::Bool(b) => b.to_string(),
            Val::Num(n) => number_to_string(*n),
            Val::Str(s) => s.clone(),
            Val::Obj(_) => "[object Object]".to_string(),
            Val::Arr(items) => join_items(items, ","),
            Val::Global(g) => format!("function {}() {{ [native code] }}", g.name()),
        }
    }

    /// `ToPrimitive` for operators: objects and arrays become strings
    fn to_primitive(self) -> Val {
        match self {
            Val::Obj(_) | Val::Arr(_) | Val::Global(_) => Val::Str(self.to_js_string()),
            other => other,
        }
    }
}

fn join_items(items: &[Value], sep: &str) -> String {
    items
        .iter()
        .map(|item| match item {
            Value::Null => String::new(),
            other => Val::from_json(other).to_js_string(),
        })
        .collect::<Vec<_>>()
        .join(sep)
}

fn checked(s: String) -> EvalResult<Val> {
    if s.len() > MAX_STRING_LEN {
        return Err(EvalError::StringTooLong(MAX_STRING_LEN));
    }
    Ok(Val::Str(s))
}

/// Apply a compiled function to one rendering value
pub fn call_function(function: &Function, arg: &Value) -> EvalResult<String> {
    let mut evaluator = Evaluator::default();
    for (i, param) in function.params.iter().enumerate() {
        let value = if i == 0 { Val::from_json(arg) } else { Val::Undefined };
        evaluator.env.push((param.clone(), value));
    }
    let result = match &function.body {
        Body::Expr(expr) => evaluator.eval(expr)?,
        Body::Block(stmts) => evaluator.exec_block(stmts)?.unwrap_or(Val::Undefined),
    };
    Ok(match result {
        Val::Undefined => String::new(),
        other => other.to_js_string(),
    })
}

#[derive(Default)]
struct Evaluator {
    steps: usize,
    env: Vec<(String, Val)>,
}

impl Evaluator {
    fn tick(&mut self) -> EvalResult<()> {
        self.steps += 1;
        if self.steps > MAX_EVAL_STEPS {
            return Err(EvalError::StepLimit(MAX_EVAL_STEPS));
        }
        Ok(())
    }

    fn lookup(&self, name: &str) -> Val {
        self.env
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
            .unwrap_or(Val::Undefined)
    }

    fn exec_block(&mut self, stmts: &[Stmt]) -> EvalResult<Option<Val>> {
        for stmt in stmts {
            if let Some(value) = self.exec(stmt)? {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    fn exec(&mut self, stmt: &Stmt) -> EvalResult<Option<Val>> {
        self.tick()?;
        match stmt {
            Stmt::Let(name, init) => {
                let value = self.eval(init)?;
                self.env.push((name.clone(), value));
                Ok(None)
            }
            Stmt::Return(value) => match value {
                Some(expr) => self.eval(expr).map(Some),
                None => Ok(Some(Val::Undefined)),
            },
            Stmt::If {
                test,
                consequent,
                alternate,
            } => {
                if self.eval(test)?.truthy() {
                    self.exec(consequent)
                } else if let Some(alternate) = alternate {
                    self.exec(alternate)
                } else {
                    Ok(None)
                }
            }
            Stmt::Block(stmts) => self.exec_block(stmts),
            Stmt::Expr(expr) => self.eval(expr).map(|_| None),
        }
    }

    fn eval(&mut self, expr: &Expr) -> EvalResult<Val> {
        self.tick()?;
        match expr {
            Expr::Literal(literal) => Ok(match literal {
                Literal::Undefined => Val::Undefined,
                Literal::Null => Val::Null,
                Literal::Bool(b) => Val::Bool(*b),
                Literal::Num(n) => Val::Num(*n),
                Literal::Str(s) => Val::Str(s.clone()),
            }),
            Expr::Template(parts) => {
                let mut out = String::new();
                for part in parts {
                    match part {
                        TemplatePart::Text(text) => out.push_str(text),
                        TemplatePart::Expr(expr) => out.push_str(&self.eval(expr)?.to_js_string()),
                    }
                }
                checked(out)
            }
            Expr::Local(name) => Ok(self.lookup(name)),
            Expr::Global(global) => Ok(Val::Global(*global)),
            Expr::Member {
                object,
                property,
                optional,
            } => {
                let target = self.eval(object)?;
                if *optional && target.is_nullish() {
                    return Ok(Val::Undefined);
                }
                let key = self.eval(property)?;
                get_property(&target, &key)
            }
            Expr::Call { callee, args } => self.call(callee, args),
            Expr::Unary { op, operand } => {
                let value = self.eval(operand)?;
                Ok(match op {
                    UnaryOp::Neg => Val::Num(-value.to_number()),
                    UnaryOp::Plus => Val::Num(value.to_number()),
                    UnaryOp::Not => Val::Bool(!value.truthy()),
                    UnaryOp::TypeOf => Val::Str(value.type_of().to_string()),
                })
            }
            Expr::Binary { op, left, right } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                binary(*op, left, right)
            }
            Expr::Logical { op, left, right } => {
                let left = self.eval(left)?;
                let short_circuit = match op {
                    LogicalOp::And => !left.truthy(),
                    LogicalOp::Or => left.truthy(),
                    LogicalOp::Nullish => !left.is_nullish(),
                };
                if short_circuit { Ok(left) } else { self.eval(right) }
            }
            Expr::Conditional {
                test,
                consequent,
                alternate,
            } => {
                if self.eval(test)?.truthy() {
                    self.eval(consequent)
                } else {
                    self.eval(alternate)
                }
            }
        }
    }

    fn call(&mut self, callee: &Expr, args: &[Expr]) -> EvalResult<Val> {
        if let Expr::Member {
            object,
            property,
            optional,
        } = callee
        {
            let target = self.eval(object)?;
            if *optional && target.is_nullish() {
                return Ok(Val::Undefined);
            }
            let method = self.eval(property)?.to_js_string();
            let args = self.eval_args(args)?;
            return match target {
                Val::Global(Global::Math) => math(&method, &args),
                Val::Undefined | Val::Null => Err(EvalError::PropertyOfNothing {
                    property: method,
                    target: target.type_of_nothing(),
                }),
                other => call_method(other, &method, &args),
            };
        }
        let function = self.eval(callee)?;
        let args = self.eval_args(args)?;
        match function {
            Val::Global(global) => call_global(global, &args),
            other => Err(EvalError::NotCallable(other.to_js_string())),
        }
    }

    fn eval_args(&mut self, args: &[Expr]) -> EvalResult<Vec<Val>> {
        args.iter().map(|arg| self.eval(arg)).collect()
    }
}

impl Val {
    fn type_of_nothing(&self) -> &'static str {
        if matches!(self, Val::Null) { "null" } else { "undefined" }
    }
}

fn array_index(key: &Val) -> Option<usize> {
    match key {
        Val::Num(n) if *n >= 0.0 && n.fract() == 0.0 => Some(*n as usize),
        Val::Str(s) => s.parse::<usize>().ok(),
        _ => None,
    }
}

fn get_property(target: &Val, key: &Val) -> EvalResult<Val> {
    let name = key.to_js_string();
    match target {
        Val::Undefined | Val::Null => Err(EvalError::PropertyOfNothing {
            property: name,
            target: target.type_of_nothing(),
        }),
        Val::Obj(map) => Ok(map.get(&name).map(Val::from_json).unwrap_or(Val::Undefined)),
        Val::Arr(items) => {
            if name == "length" {
                return Ok(Val::Num(items.len() as f64));
            }
            Ok(array_index(key)
                .and_then(|i| items.get(i))
                .map(Val::from_json)
                .unwrap_or(Val::Undefined))
        }
        Val::Str(s) => {
            if name == "length" {
                return Ok(Val::Num(s.chars().count() as f64));
            }
            Ok(array_index(key)
                .and_then(|i| s.chars().nth(i))
                .map(|c| Val::Str(c.to_string()))
                .unwrap_or(Val::Undefined))
        }
        Val::Global(Global::Math) => Ok(match name.as_str() {
            "PI" => Val::Num(std::f64::consts::PI),
            "E" => Val::Num(std::f64::consts::E),
            _ => Val::Undefined,
        }),
        Val::Bool(_) | Val::Num(_) | Val::Global(_) => Ok(Val::Undefined),
    }
}

fn arg(args: &[Val], i: usize) -> Val {
    args.get(i).cloned().unwrap_or(Val::Undefined)
}

fn binary(op: BinaryOp, left: Val, right: Val) -> EvalResult<Val> {
    let num = |f: fn(f64, f64) -> f64| -> EvalResult<Val> {
        Ok(Val::Num(f(left.to_number(), right.to_number())))
    };
    match op {
        BinaryOp::Add => {
            let (l, r) = (left.clone().to_primitive(), right.clone().to_primitive());
            if matches!(l, Val::Str(_)) || matches!(r, Val::Str(_)) {
                checked(l.to_js_string() + &r.to_js_string())
            } else {
                Ok(Val::Num(l.to_number() + r.to_number()))
            }
        }
        BinaryOp::Sub => num(|a, b| a - b),
        BinaryOp::Mul => num(|a, b| a * b),
        BinaryOp::Div => num(|a, b| a / b),
        BinaryOp::Rem => num(|a, b| a % b),
        BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => {
            Ok(Val::Bool(compare(op, left.to_primitive(), right.to_primitive())))
        }
        BinaryOp::StrictEq => Ok(Val::Bool(strict_eq(&left, &right))),
        BinaryOp::StrictNe => Ok(Val::Bool(!strict_eq(&left, &right))),
        BinaryOp::LooseEq => Ok(Val::Bool(loose_eq(left, right))),
        BinaryOp::LooseNe => Ok(Val::Bool(!loose_eq(left, right))),
    }
}

fn compare(op: BinaryOp, left: Val, right: Val) -> bool {
    let ordering = match (&left, &right) {
        (Val::Str(a), Val::Str(b)) => Some(a.cmp(b)),
        _ => left.to_number().partial_cmp(&right.to_number()),
    };
    let Some(ordering) = ordering else {
        return false;
    };
    match op {
        BinaryOp::Lt => ordering.is_lt(),
        BinaryOp::Le => ordering.is_le(),
        BinaryOp::Gt => ordering.is_gt(),
        _ => ordering.is_ge(),
    }
}

fn strict_eq(left: &Val, right: &Val) -> bool {
    match (left, right) {
        (Val::Undefined, Val::Undefined) | (Val::Null, Val::Null) => true,
        (Val::Bool(a), Val::Bool(b)) => a == b,
        (Val::Num(a), Val::Num(b)) => a == b,
        (Val::Str(a), Val::Str(b)) => a == b,
        (Val::Global(a), Val::Global(b)) => a == b,
        _ => false,
    }
}

fn loose_eq(left: Val, right: Val) -> bool {
    match (left, right) {
        (l, r) if std::mem::discriminant(&l) == std::mem::discriminant(&r) => strict_eq(&l, &r),
        (l, r) if l.is_nullish() || r.is_nullish() => l.is_nullish() && r.is_nullish(),
        (Val::Bool(b), other) | (other, Val::Bool(b)) => {
            loose_eq(Val::Num(if b { 1.0 } else { 0.0 }), other)
        }
        (l @ (Val::Obj(_) | Val::Arr(_)), r) | (r, l @ (Val::Obj(_) | Val::Arr(_))) => {
            let l = l.to_primitive();
            if matches!(r, Val::Obj(_) | Val::Arr(_)) {
                return false;
            }
            loose_eq(l, r)
        }
        (l, r) => l.to_number() == r.to_number(),
    }
}

fn call_global(global: Global, args: &[Val]) -> EvalResult<Val> {
    let first = arg(args, 0);
    match global {
        Global::Number => Ok(Val::Num(if args.is_empty() { 0.0 } else { first.to_number() })),
        Global::String => Ok(Val::Str(if args.is_empty() {
            String::new()
        } else {
            first.to_js_string()
        })),
        Global::ParseFloat => Ok(Val::Num(parse_float_prefix(&first.to_js_string()))),
        Global::ParseInt => {
            let radix = arg(args, 1).to_number();
            let radix = if radix.is_nan() { 0 } else { radix as u32 };
            Ok(Val::Num(parse_int_prefix(&first.to_js_string(), radix)))
        }
        Global::IsNaN => Ok(Val::Bool(first.to_number().is_nan())),
        Global::IsFinite => Ok(Val::Bool(first.to_number().is_finite())),
        Global::Named(named) => Ok(Val::Str(named.apply(&first.to_json()))),
        Global::Math => Err(EvalError::NotCallable("Math".to_string())),
    }
}

fn math(method: &str, args: &[Val]) -> EvalResult<Val> {
    let x = arg(args, 0).to_number();
    let value = match method {
        "round" => (x + 0.5).floor(),
        "floor" => x.floor(),
        "ceil" => x.ceil(),
        "abs" => x.abs(),
        "sqrt" => x.sqrt(),
        "trunc" => x.trunc(),
        "sign" => {
            if x.is_nan() || x == 0.0 {
                x
            } else {
                x.signum()
            }
        }
        "log10" => x.log10(),
        "pow" => x.powf(arg(args, 1).to_number()),
        "min" | "max" => {
            let nums: Vec<f64> = args.iter().map(Val::to_number).collect();
            if nums.iter().any(|n| n.is_nan()) {
                f64::NAN
            } else if method == "min" {
                nums.into_iter().fold(f64::INFINITY, f64::min)
            } else {
                nums.into_iter().fold(f64::NEG_INFINITY, f64::max)
            }
        }
        _ => {
            return Err(EvalError::UnknownMethod {
                method: method.to_string(),
                target: "Math",
            });
        }
    };
    Ok(Val::Num(value))
}

/// Resolve a possibly negative JS index against `len`
fn relative_index(value: Val, len: usize, default: usize) -> usize {
    if matches!(value, Val::Undefined) {
        return default;
    }
    let n = value.to_number();
    if n.is_nan() {
        return 0;
    }
    let n = n.trunc();
    if n < 0.0 {
        (len as f64 + n).max(0.0) as usize
    } else {
        (n as usize).min(len)
    }
}

fn pad(s: &str, args: &[Val], at_start: bool) -> EvalResult<Val> {
    let target = arg(args, 0).to_number();
    let fill = match arg(args, 1) {
        Val::Undefined => " ".to_string(),
        other => other.to_js_string(),
    };
    let len = s.chars().count();
    if target.is_nan() || target <= len as f64 || fill.is_empty() {
        return Ok(Val::Str(s.to_string()));
    }
    if target > MAX_STRING_LEN as f64 {
        return Err(EvalError::StringTooLong(MAX_STRING_LEN));
    }
    let padding: String = fill.chars().cycle().take(target as usize - len).collect();
    Ok(Val::Str(if at_start {
        padding + s
    } else {
        s.to_string() + &padding
    }))
}

fn call_method(target: Val, method: &str, args: &[Val]) -> EvalResult<Val> {
    let unknown = |target: &Val| EvalError::UnknownMethod {
        method: method.to_string(),
        target: target.type_of(),
    };
    match &target {
        Val::Num(n) => match method {
            "toFixed" => {
                let digits = arg(args, 0).to_number();
                let digits = if digits.is_nan() { 0.0 } else { digits.trunc() };
                if !(0.0..=100.0).contains(&digits) {
                    return Err(EvalError::InvalidArgument(format!(
                        "toFixed() digits out of range: {}",
                        digits
                    )));
                }
                Ok(Val::Str(to_fixed(*n, digits as usize)))
            }
            "toString" => Ok(Val::Str(number_to_string(*n))),
            "toLocaleString" => Ok(Val::Str(to_locale_string(*n))),
            "valueOf" => Ok(Val::Num(*n)),
            _ => Err(unknown(&target)),
        },
        Val::Str(s) => {
            let text = |i: usize| arg(args, i).to_js_string();
            match method {
                "toUpperCase" => Ok(Val::Str(s.to_uppercase())),
                "toLowerCase" => Ok(Val::Str(s.to_lowercase())),
                "trim" => Ok(Val::Str(s.trim().to_string())),
                "trimStart" => Ok(Val::Str(s.trim_start().to_string())),
                "trimEnd" => Ok(Val::Str(s.trim_end().to_string())),
                "toString" | "valueOf" => Ok(Val::Str(s.clone())),
                "padStart" => pad(s, args, true),
                "padEnd" => pad(s, args, false),
                "slice" | "substring" => {
                    let len = s.chars().count();
                    let start = relative_index(arg(args, 0), len, 0);
                    let end = relative_index(arg(args, 1), len, len);
                    Ok(Val::Str(if start < end {
                        s.chars().skip(start).take(end - start).collect()
                    } else {
                        String::new()
                    }))
                }
                "charAt" => {
                    let i = relative_index(arg(args, 0), s.chars().count(), 0);
                    Ok(Val::Str(s.chars().nth(i).map(String::from).unwrap_or_default()))
                }
                "replace" => checked(s.replacen(&text(0), &text(1), 1)),
                "includes" => Ok(Val::Bool(s.contains(&text(0)))),
                "startsWith" => Ok(Val::Bool(s.starts_with(&text(0)))),
                "endsWith" => Ok(Val::Bool(s.ends_with(&text(0)))),
                "indexOf" => Ok(Val::Num(
                    s.find(&text(0))
                        .map(|byte| s[..byte].chars().count() as f64)
                        .unwrap_or(-1.0),
                )),
                "concat" => checked(args.iter().fold(s.clone(), |acc, a| acc + &a.to_js_string())),
                "repeat" => {
                    let count = arg(args, 0).to_number();
                    if count.is_nan() || count < 0.0 {
                        return Err(EvalError::InvalidArgument("repeat() count".to_string()));
                    }
                    if count * s.len() as f64 > MAX_STRING_LEN as f64 {
                        return Err(EvalError::StringTooLong(MAX_STRING_LEN));
                    }
                    Ok(Val::Str(s.repeat(count as usize)))
                }
                "split" => {
                    let parts: Vec<Value> = match arg(args, 0) {
                        Val::Undefined => vec![Value::String(s.clone())],
                        sep => {
                            let sep = sep.to_js_string();
                            if sep.is_empty() {
                                s.chars().map(|c| Value::String(c.to_string())).collect()
                            } else {
                                s.split(sep.as_str()).map(|p| Value::String(p.to_string())).collect()
                            }
                        }
                    };
                    Ok(Val::Arr(parts))
                }
                _ => Err(unknown(&target)),
            }
        }
        Val::Arr(items) => match method {
            "join" => {
                let sep = match arg(args, 0) {
                    Val::Undefined => ",".to_string(),
                    other => other.to_js_string(),
                };
                checked(join_items(items, &sep))
            }
            "includes" => {
                let needle = arg(args, 0);
                Ok(Val::Bool(items.iter().any(|item| strict_eq(&Val::from_json(item), &needle))))
            }
            "indexOf" => {
                let needle = arg(args, 0);
                Ok(Val::Num(
                    items
                        .iter()
                        .position(|item| strict_eq(&Val::from_json(item), &needle))
                        .map(|i| i as f64)
                        .unwrap_or(-1.0),
                ))
            }
            "toString" => checked(join_items(items, ",")),
            _ => Err(unknown(&target)),
        },
        Val::Bool(b) => match method {
            "toString" => Ok(Val::Str(b.to_string())),
            _ => Err(unknown(&target)),
        },
        _ => Err(unknown(&target)),
    }
}
