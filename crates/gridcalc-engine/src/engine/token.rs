//! Token classification for postfix expressions.
//!
//! Each whitespace-separated token is classified once, when the cell is
//! loaded. Operators win over literals (`-` is subtraction, `-1` is a
//! literal) and anything that is neither is kept as a reference candidate;
//! its shape is only checked when evaluation reaches it.

use std::fmt;

/// Operators that consume two operands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    /// Apply with `lhs` the earlier operand: `a b -` is `a - b`.
    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            BinaryOp::Add => lhs + rhs,
            BinaryOp::Sub => lhs - rhs,
            BinaryOp::Mul => lhs * rhs,
            BinaryOp::Div => lhs / rhs,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        }
    }
}

/// Operators that consume one operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Increment,
    Decrement,
}

impl UnaryOp {
    pub fn apply(self, operand: f64) -> f64 {
        match self {
            UnaryOp::Increment => operand + 1.0,
            UnaryOp::Decrement => operand - 1.0,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Increment => "++",
            UnaryOp::Decrement => "--",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    Number(f64),
    Binary(BinaryOp),
    Unary(UnaryOp),
    Reference(String),
}

impl Token {
    pub fn classify(text: &str) -> Token {
        match text {
            "+" => Token::Binary(BinaryOp::Add),
            "-" => Token::Binary(BinaryOp::Sub),
            "*" => Token::Binary(BinaryOp::Mul),
            "/" => Token::Binary(BinaryOp::Div),
            "++" => Token::Unary(UnaryOp::Increment),
            "--" => Token::Unary(UnaryOp::Decrement),
            _ => match parse_literal(text) {
                Some(n) => Token::Number(n),
                None => Token::Reference(text.to_string()),
            },
        }
    }
}

/// Decimal literals with an optional sign and exponent, plus the exact
/// spellings `Infinity` and `NaN`. `inf`, `nan` and other case variants
/// are not literals.
fn parse_literal(text: &str) -> Option<f64> {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let decimal = unsigned
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if decimal || unsigned == "Infinity" || unsigned == "NaN" {
        text.parse::<f64>().ok()
    } else {
        None
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Binary(op) => f.write_str(op.symbol()),
            Token::Unary(op) => f.write_str(op.symbol()),
            Token::Reference(r) => f.write_str(r),
        }
    }
}

/// A cell's expression: the source text and its classified tokens.
#[derive(Clone, Debug, PartialEq)]
pub struct Expression {
    text: String,
    tokens: Vec<Token>,
}

impl Expression {
    pub fn parse(text: &str) -> Expression {
        Expression {
            text: text.to_string(),
            tokens: text.split_ascii_whitespace().map(Token::classify).collect(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
