use std::fmt;

use elz_span::{join, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Operator::Add),
            "-" => Some(Operator::Sub),
            "*" => Some(Operator::Mul),
            "/" => Some(Operator::Div),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
        }
    }
}

/// An expression bound to a name, or nested inside one
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Int(i64),
    Float(f64),
    Bool(bool),
    String(String),
    Identifier(String),
    Binary {
        lhs: Box<Expr>,
        op: Operator,
        rhs: Box<Expr>,
    },
    /// Every element of `args` is an [`ExprKind::Arg`]
    FuncCall {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Arg(Box<Argument>),
}

/// A call argument, optionally labelled (`f(n: 1)`)
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub name: Option<String>,
    pub expr: Expr,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn int(value: i64, span: Span) -> Self {
        Self::new(ExprKind::Int(value), span)
    }

    pub fn float(value: f64, span: Span) -> Self {
        Self::new(ExprKind::Float(value), span)
    }

    pub fn bool(value: bool, span: Span) -> Self {
        Self::new(ExprKind::Bool(value), span)
    }

    pub fn string(value: impl Into<String>, span: Span) -> Self {
        Self::new(ExprKind::String(value.into()), span)
    }

    pub fn identifier(name: impl Into<String>, span: Span) -> Self {
        Self::new(ExprKind::Identifier(name.into()), span)
    }

    /// Binary expression spanning both operands
    pub fn binary(lhs: Expr, op: Operator, rhs: Expr) -> Self {
        let span = join(&lhs.span, &rhs.span);
        Self::new(
            ExprKind::Binary {
                lhs: Box::new(lhs),
                op,
                rhs: Box::new(rhs),
            },
            span,
        )
    }

    /// Call expression; plain arguments are wrapped as unlabelled `Arg`s
    pub fn func_call(callee: Expr, args: Vec<Expr>, span: Span) -> Self {
        let args = args
            .into_iter()
            .map(|arg| match arg.kind {
                ExprKind::Arg(_) => arg,
                _ => {
                    let span = arg.span.clone();
                    Expr::arg(Argument { name: None, expr: arg }, span)
                }
            })
            .collect();
        Self::new(
            ExprKind::FuncCall {
                callee: Box::new(callee),
                args,
            },
            span,
        )
    }

    pub fn arg(argument: Argument, span: Span) -> Self {
        Self::new(ExprKind::Arg(Box::new(argument)), span)
    }


    /// Names called anywhere in this expression, in source order
    pub fn callees(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_callees(&mut names);
        names
    }

    fn collect_callees<'a>(&'a self, names: &mut Vec<&'a str>) {
        match &self.kind {
            ExprKind::FuncCall { callee, args } => {
                if let ExprKind::Identifier(name) = &callee.kind {
                    names.push(name);
                } else {
                    callee.collect_callees(names);
                }
                for arg in args {
                    arg.collect_callees(names);
                }
            }
            ExprKind::Binary { lhs, rhs, .. } => {
                lhs.collect_callees(names);
                rhs.collect_callees(names);
            }
            ExprKind::Arg(arg) => arg.expr.collect_callees(names),
            _ => {}
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Int(value) => write!(f, "{}", value),
            ExprKind::Float(value) => write!(f, "{:?}", value),
            ExprKind::Bool(value) => write!(f, "{}", value),
            ExprKind::String(value) => write!(f, "{:?}", value),
            ExprKind::Identifier(name) => write!(f, "{}", name),
            ExprKind::Binary { lhs, op, rhs } => write!(f, "{} {} {}", lhs, op.symbol(), rhs),
            ExprKind::FuncCall { callee, args } => {
                write!(f, "{}(", callee)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
            ExprKind::Arg(arg) => match &arg.name {
                Some(name) => write!(f, "{}: {}", name, arg.expr),
                None => write!(f, "{}", arg.expr),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_span_covers_operands() {
        let expr = Expr::binary(
            Expr::identifier("x", 10..11),
            Operator::Add,
            Expr::identifier("y", 14..15),
        );
        assert_eq!(expr.span, 10..15);
        assert_eq!(expr.to_string(), "x + y");
    }

    #[test]
    fn call_arguments_are_wrapped() {
        let call = Expr::func_call(
            Expr::identifier("add", 0..3),
            vec![Expr::int(1, 4..5), Expr::int(2, 7..8)],
            0..9,
        );
        let ExprKind::FuncCall { args, .. } = &call.kind else {
            panic!("expected a call");
        };
        assert!(args.iter().all(|arg| matches!(arg.kind, ExprKind::Arg(_))));
        assert_eq!(call.to_string(), "add(1, 2)");
    }

    #[test]
    fn callees_in_source_order() {
        let inner = Expr::func_call(Expr::identifier("g", 6..7), vec![], 6..9);
        let call = Expr::func_call(Expr::identifier("f", 0..1), vec![inner], 0..10);
        let expr = Expr::binary(
            call,
            Operator::Mul,
            Expr::func_call(Expr::identifier("h", 13..14), vec![], 13..16),
        );
        assert_eq!(expr.callees(), vec!["f", "g", "h"]);
    }

    #[test]
    fn operator_symbols() {
        for op in [Operator::Add, Operator::Sub, Operator::Mul, Operator::Div] {
            assert_eq!(Operator::from_symbol(op.symbol()), Some(op));
        }
        assert_eq!(Operator::from_symbol("%"), None);
    }
}
