//! Syntax tree of the formatter language.

use crate::formatters::NamedFormatter;

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Undefined,
    Null,
    Bool(bool),
    Num(f64),
    Str(String),
}

/// Host functions reachable from an expression; nothing else is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Global {
    Math,
    Number,
    String,
    ParseFloat,
    ParseInt,
    IsNaN,
    IsFinite,
    Named(NamedFormatter),
}

impl Global {
    pub fn lookup(name: &str) -> Option<Global> {
        let global = match name {
            "Math" => Global::Math,
            "Number" => Global::Number,
            "String" => Global::String,
            "parseFloat" => Global::ParseFloat,
            "parseInt" => Global::ParseInt,
            "isNaN" => Global::IsNaN,
            "isFinite" => Global::IsFinite,
            other => Global::Named(NamedFormatter::from_name(other)?),
        };
        Some(global)
    }

    pub fn name(self) -> &'static str {
        match self {
            Global::Math => "Math",
            Global::Number => "Number",
            Global::String => "String",
            Global::ParseFloat => "parseFloat",
            Global::ParseInt => "parseInt",
            Global::IsNaN => "isNaN",
            Global::IsFinite => "isFinite",
            Global::Named(named) => named.name(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Plus,
    Not,
    TypeOf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Lt,
    Le,
    Gt,
    Ge,
    LooseEq,
    LooseNe,
    StrictEq,
    StrictNe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
    Nullish,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TemplatePart {
    Text(String),
    Expr(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Template(Vec<TemplatePart>),
    /// A parameter or local binding
    Local(String),
    Global(Global),
    Member {
        object: Box<Expr>,
        property: Box<Expr>,
        optional: bool,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Logical {
        op: LogicalOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Conditional {
        test: Box<Expr>,
        consequent: Box<Expr>,
        alternate: Box<Expr>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Let(String, Expr),
    Return(Option<Expr>),
    If {
        test: Expr,
        consequent: Box<Stmt>,
        alternate: Option<Box<Stmt>>,
    },
    Block(Vec<Stmt>),
    Expr(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Concise arrow body
    Expr(Expr),
    Block(Vec<Stmt>),
}

/// A parsed formatter definition
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub params: Vec<String>,
    pub body: Body,
}
