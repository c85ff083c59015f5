//! Restricted arithmetic evaluator
//!
//! Parses and evaluates a small numeric expression grammar: integer and
//! float literals, `+ - * / % // **`, unary sign, parentheses. There is no
//! name resolution and nothing is ever executed: any identifier, function
//! call, attribute access, or unrecognized byte is rejected during
//! tokenization, so inputs like `__import__('os')` fail safely.

use crate::{Result, TripPlannerError};

/// Evaluate an expression, returning the value or an error string.
///
/// Whole-number results render without a decimal point.
#[must_use]
pub fn calculate(expression: &str) -> String {
    match safe_eval(expression) {
        Ok(value) => format_value(value),
        Err(e) => format!("Calculation error: {}", e.user_message()),
    }
}

/// Evaluate an expression under the restricted grammar
pub fn safe_eval(expression: &str) -> Result<f64> {
    let expression = expression.trim();
    if expression.is_empty() {
        return Err(TripPlannerError::validation("Empty expression"));
    }

    let tokens = tokenize(expression)?;
    let mut parser = Parser { tokens, pos: 0 };
    let value = parser.parse_expr()?;
    if parser.pos != parser.tokens.len() {
        return Err(TripPlannerError::validation(format!(
            "Unexpected token at position {}",
            parser.pos
        )));
    }
    Ok(value)
}

fn format_value(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    DoubleStar,
    DoubleSlash,
    Percent,
    LParen,
    RParen,
}

fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let bytes = input.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i] as char;
        match c {
            ' ' | '\t' | '\n' | '\r' => i += 1,
            '0'..='9' | '.' => {
                let start = i;
                while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
                    i += 1;
                }
                // Optional exponent part
                if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
                    let mut j = i + 1;
                    if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
                        j += 1;
                    }
                    if j < bytes.len() && bytes[j].is_ascii_digit() {
                        i = j;
                        while i < bytes.len() && bytes[i].is_ascii_digit() {
                            i += 1;
                        }
                    }
                }
                let literal = &input[start..i];
                let value: f64 = literal.parse().map_err(|_| {
                    TripPlannerError::validation(format!("Invalid number literal: {literal}"))
                })?;
                tokens.push(Token::Number(value));
            }
            '+' => {
                tokens.push(Token::Plus);
                i += 1;
            }
            '-' => {
                tokens.push(Token::Minus);
                i += 1;
            }
            '*' => {
                if bytes.get(i + 1) == Some(&b'*') {
                    tokens.push(Token::DoubleStar);
                    i += 2;
                } else {
                    tokens.push(Token::Star);
                    i += 1;
                }
            }
            '/' => {
                if bytes.get(i + 1) == Some(&b'/') {
                    tokens.push(Token::DoubleSlash);
                    i += 2;
                } else {
                    tokens.push(Token::Slash);
                    i += 1;
                }
            }
            '%' => {
                tokens.push(Token::Percent);
                i += 1;
            }
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            other => {
                return Err(TripPlannerError::validation(format!(
                    "Unsafe or unsupported expression element: '{other}'"
                )));
            }
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// expr := term (('+' | '-') term)*
    fn parse_expr(&mut self) -> Result<f64> {
        let mut value = self.parse_term()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Plus => {
                    self.advance();
                    value += self.parse_term()?;
                }
                Token::Minus => {
                    self.advance();
                    value -= self.parse_term()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    /// term := unary (('*' | '/' | '//' | '%') unary)*
    fn parse_term(&mut self) -> Result<f64> {
        let mut value = self.parse_unary()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Star => {
                    self.advance();
                    value *= self.parse_unary()?;
                }
                Token::Slash => {
                    self.advance();
                    let rhs = self.parse_unary()?;
                    if rhs == 0.0 {
                        return Err(TripPlannerError::validation("Division by zero"));
                    }
                    value /= rhs;
                }
                Token::DoubleSlash => {
                    self.advance();
                    let rhs = self.parse_unary()?;
                    if rhs == 0.0 {
                        return Err(TripPlannerError::validation("Division by zero"));
                    }
                    value = (value / rhs).floor();
                }
                Token::Percent => {
                    self.advance();
                    let rhs = self.parse_unary()?;
                    if rhs == 0.0 {
                        return Err(TripPlannerError::validation("Division by zero"));
                    }
                    // Floored modulo: the result takes the sign of the divisor
                    value -= rhs * (value / rhs).floor();
                }
                _ => break,
            }
        }
        Ok(value)
    }

    /// unary := ('+' | '-') unary | power
    fn parse_unary(&mut self) -> Result<f64> {
        match self.peek() {
            Some(Token::Plus) => {
                self.advance();
                self.parse_unary()
            }
            Some(Token::Minus) => {
                self.advance();
                Ok(-self.parse_unary()?)
            }
            _ => self.parse_power(),
        }
    }

    /// power := atom ('**' unary)?   (right-associative)
    fn parse_power(&mut self) -> Result<f64> {
        let base = self.parse_atom()?;
        if self.peek() == Some(Token::DoubleStar) {
            self.advance();
            let exponent = self.parse_unary()?;
            return Ok(base.powf(exponent));
        }
        Ok(base)
    }

    /// atom := number | '(' expr ')'
    fn parse_atom(&mut self) -> Result<f64> {
        match self.advance() {
            Some(Token::Number(value)) => Ok(value),
            Some(Token::LParen) => {
                let value = self.parse_expr()?;
                match self.advance() {
                    Some(Token::RParen) => Ok(value),
                    _ => Err(TripPlannerError::validation("Missing closing parenthesis")),
                }
            }
            other => Err(TripPlannerError::validation(format!(
                "Expected a number or parenthesized expression, got {other:?}"
            ))),
        }
    }
}
