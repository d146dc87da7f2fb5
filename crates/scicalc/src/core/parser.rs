//! Symbol translation, tokenizer and recursive descent parser
//!
//! Display text such as `2×√(9)÷xʸ` is first translated into the canonical
//! form `2*sqrt(9)/^`, which is what the history pane shows and what the
//! tokenizer reads. Nothing here ever builds or runs code: the parser
//! produces an [`AstNode`] tree that the evaluator walks.

use crate::core::{CalcError, CalcResult, Function, Operation};

/// Translates display symbols into the canonical evaluable form.
///
/// `×`→`*`, `÷`→`/`, `xʸ`→`^`, `√(`→`sqrt(`, and a bare `√`→`sqrt(`.
/// `sin(`, `cos(` and `tan(` are already canonical. Applying it twice gives
/// the same text as applying it once.
#[must_use]
pub fn translate(expression: &str) -> String {
    expression
        .replace('×', "*")
        .replace('÷', "/")
        .replace("xʸ", "^")
        .replace("√(", "sqrt(")
        .replace('√', "sqrt(")
}

/// Token types from lexical analysis
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Numeric literal
    Number(f64),
    /// Binary operator (also used for unary minus and plus)
    Operator(Operation),
    /// Function name; the parser expects `(` right after it
    Function(Function),
    /// Left parenthesis
    LeftParen,
    /// Right parenthesis
    RightParen,
}

/// Abstract Syntax Tree node
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    /// Numeric literal
    Number(f64),
    /// Binary operation
    BinaryOp {
        /// Left operand
        left: Box<AstNode>,
        /// Operator
        op: Operation,
        /// Right operand
        right: Box<AstNode>,
    },
    /// Unary negation
    Negate(Box<AstNode>),
    /// Function applied to a parenthesised argument
    Call {
        /// The function
        func: Function,
        /// Its argument
        arg: Box<AstNode>,
    },
}

impl AstNode {
    /// Creates a new number node
    #[must_use]
    pub fn number(value: f64) -> Self {
        Self::Number(value)
    }

    /// Creates a new binary operation node
    #[must_use]
    pub fn binary(left: AstNode, op: Operation, right: AstNode) -> Self {
        Self::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Creates a new negation node
    #[must_use]
    pub fn negate(inner: AstNode) -> Self {
        Self::Negate(Box::new(inner))
    }

    /// Creates a new function call node
    #[must_use]
    pub fn call(func: Function, arg: AstNode) -> Self {
        Self::Call {
            func,
            arg: Box::new(arg),
        }
    }
}

/// Tokenizer for canonical expression strings
#[derive(Debug)]
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    /// Creates a new tokenizer for the given input
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Returns the remaining input
    #[must_use]
    pub fn remaining(&self) -> &str {
        &self.input[self.pos..]
    }

    /// Tokenizes the entire input
    pub fn tokenize(&mut self) -> CalcResult<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Returns the next token, or None if at end of input
    pub fn next_token(&mut self) -> CalcResult<Option<Token>> {
        self.skip_whitespace();

        let Some(ch) = self.current_char() else {
            return Ok(None);
        };

        let token = match ch {
            '0'..='9' | '.' => self.read_number()?,
            'a'..='z' => self.read_function()?,
            '(' => {
                self.advance();
                Token::LeftParen
            }
            ')' => {
                self.advance();
                Token::RightParen
            }
            _ => {
                let op = Operation::ALL
                    .into_iter()
                    .find(|op| self.remaining().starts_with(op.symbol()))
                    .ok_or_else(|| CalcError::parse(format!("Unexpected character: '{ch}'")))?;
                self.advance();
                Token::Operator(op)
            }
        };

        Ok(Some(token))
    }

    fn current_char(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.pos += ch.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.current_char().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn read_number(&mut self) -> CalcResult<Token> {
        let start = self.pos;
        let mut has_dot = false;

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                self.advance();
            } else if ch == '.' && !has_dot {
                has_dot = true;
                self.advance();
            } else {
                break;
            }
        }

        let num_str = &self.input[start..self.pos];
        let value: f64 = num_str
            .parse()
            .map_err(|_| CalcError::parse(format!("Invalid number: '{num_str}'")))?;

        Ok(Token::Number(value))
    }

    fn read_function(&mut self) -> CalcResult<Token> {
        let start = self.pos;
        while self.current_char().is_some_and(|c| c.is_ascii_lowercase()) {
            self.advance();
        }
        let name = &self.input[start..self.pos];
        Function::from_name(name)
            .map(Token::Function)
            .ok_or_else(|| CalcError::parse(format!("Unknown function: '{name}'")))
    }
}

/// Recursive descent parser for expressions
///
/// Grammar:
/// ```text
/// expression ::= term (('+' | '-') term)*
/// term       ::= unary (('*' | '/') unary)*
/// unary      ::= ('-' | '+') unary | power
/// power      ::= primary ('^' unary)?        // Right associative
/// primary    ::= NUMBER | FUNCTION '(' expression ')' | '(' expression ')'
/// ```
///
/// Unary minus binds looser than `^`, so `-2^2` is `-4` and `2^-1` is `0.5`.
///
/// Nesting through `(`, prefix signs and `^` is capped at [`MAX_DEPTH`] and
/// the token count at [`MAX_TOKENS`], so the tree the evaluator walks stays
/// shallow enough for the stack.
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

/// Deepest nesting of groups, prefix signs and exponents the parser accepts
pub const MAX_DEPTH: usize = 256;

/// Longest token stream the parser accepts
pub const MAX_TOKENS: usize = 4096;

impl Parser {
    /// Creates a new parser from tokens
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    /// Parses a canonical string expression into an AST
    pub fn parse_str(input: &str) -> CalcResult<AstNode> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(CalcError::EmptyExpression);
        }

        let tokens = Tokenizer::new(trimmed).tokenize()?;
        Self::new(tokens).parse()
    }

    /// Parses tokens into an AST, requiring every token to be consumed
    pub fn parse(&mut self) -> CalcResult<AstNode> {
        if self.tokens.is_empty() {
            return Err(CalcError::EmptyExpression);
        }
        if self.tokens.len() > MAX_TOKENS {
            return Err(CalcError::parse(format!(
                "Expression too long: {} tokens",
                self.tokens.len()
            )));
        }
        let ast = self.parse_expression()?;

        if let Some(token) = self.current() {
            return Err(CalcError::parse(format!(
                "Unexpected token {token:?} at position {}",
                self.pos
            )));
        }

        Ok(ast)
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn parse_expression(&mut self) -> CalcResult<AstNode> {
        let mut left = self.parse_term()?;

        while let Some(Token::Operator(op @ (Operation::Add | Operation::Subtract))) =
            self.current()
        {
            let op = *op;
            self.advance();
            let right = self.parse_term()?;
            left = AstNode::binary(left, op, right);
        }

        Ok(left)
    }

    fn parse_term(&mut self) -> CalcResult<AstNode> {
        let mut left = self.parse_unary()?;

        while let Some(Token::Operator(op @ (Operation::Multiply | Operation::Divide))) =
            self.current()
        {
            let op = *op;
            self.advance();
            let right = self.parse_unary()?;
            left = AstNode::binary(left, op, right);
        }

        Ok(left)
    }

    /// Every nested operand passes through here, so this is where depth is counted
    fn parse_unary(&mut self) -> CalcResult<AstNode> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(CalcError::parse("Expression nested too deeply"));
        }

        let node = match self.current() {
            Some(Token::Operator(Operation::Subtract)) => {
                self.advance();
                self.parse_unary().map(AstNode::negate)
            }
            Some(Token::Operator(Operation::Add)) => {
                self.advance();
                self.parse_unary()
            }
            _ => self.parse_power(),
        };

        self.depth -= 1;
        node
    }

    fn parse_power(&mut self) -> CalcResult<AstNode> {
        let base = self.parse_primary()?;

        if matches!(self.current(), Some(Token::Operator(Operation::Power))) {
            self.advance();
            // Recursing through unary keeps '^' right associative
            let exponent = self.parse_unary()?;
            return Ok(AstNode::binary(base, Operation::Power, exponent));
        }

        Ok(base)
    }

    fn parse_primary(&mut self) -> CalcResult<AstNode> {
        let token = self
            .advance()
            .cloned()
            .ok_or_else(|| CalcError::parse("Unexpected end of expression"))?;

        match token {
            Token::Number(n) => Ok(AstNode::number(n)),
            Token::LeftParen => self.parse_group(),
            Token::Function(func) => {
                if !matches!(self.advance(), Some(Token::LeftParen)) {
                    return Err(CalcError::parse(format!(
                        "Expected '(' after {}",
                        func.name()
                    )));
                }
                Ok(AstNode::call(func, self.parse_group()?))
            }
            other => Err(CalcError::parse(format!("Unexpected token: {other:?}"))),
        }
    }

    /// Parses the inside of a group whose `(` was already consumed
    fn parse_group(&mut self) -> CalcResult<AstNode> {
        let expr = self.parse_expression()?;
        match self.advance() {
            Some(Token::RightParen) => Ok(expr),
            Some(t) => Err(CalcError::parse(format!("Expected ')' but found {t:?}"))),
            None => Err(CalcError::parse("Unclosed parenthesis")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== Translation =====

    #[test]
    fn test_translate_operators() {
        assert_eq!(translate("2×3÷4"), "2*3/4");
        assert_eq!(translate("2^3"), "2^3");
        assert_eq!(translate("2xʸ3"), "2^3");
    }

    #[test]
    fn test_translate_functions() {
        assert_eq!(translate("sin(0)+cos(0)"), "sin(0)+cos(0)");
        assert_eq!(translate("√(9)"), "sqrt(9)");
        assert_eq!(translate("√9)"), "sqrt(9)");
    }

    #[test]
    fn test_translate_is_idempotent() {
        let once = translate("√(2)×sin(1)÷3^2");
        assert_eq!(translate(&once), once);
    }

    // ===== Tokenizer =====

    #[test]
    fn test_tokenize_single_number() {
        let tokens = Tokenizer::new("42").tokenize().unwrap();
        assert_eq!(tokens, vec![Token::Number(42.0)]);
    }

    #[test]
    fn test_tokenize_decimal_forms() {
        assert_eq!(
            Tokenizer::new("3.14").tokenize().unwrap(),
            vec![Token::Number(3.14)]
        );
        assert_eq!(
            Tokenizer::new(".5").tokenize().unwrap(),
            vec![Token::Number(0.5)]
        );
        assert_eq!(
            Tokenizer::new("0.").tokenize().unwrap(),
            vec![Token::Number(0.0)]
        );
    }

    #[test]
    fn test_tokenize_operators() {
        let tokens = Tokenizer::new("+ - * / ^").tokenize().unwrap();
        let ops: Vec<_> = Operation::ALL.into_iter().map(Token::Operator).collect();
        assert_eq!(tokens, ops);
    }

    #[test]
    fn test_tokenize_functions() {
        let tokens = Tokenizer::new("sqrt(sin(1))").tokenize().unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Function(Function::Sqrt),
                Token::LeftParen,
                Token::Function(Function::Sin),
                Token::LeftParen,
                Token::Number(1.0),
                Token::RightParen,
                Token::RightParen,
            ]
        );
    }

    #[test]
    fn test_tokenize_unknown_function() {
        assert!(matches!(
            Tokenizer::new("log(2)").tokenize(),
            Err(CalcError::ParseError(_))
        ));
    }

    #[test]
    fn test_tokenize_display_glyph_is_rejected() {
        // Display glyphs must go through translate() first
        assert!(matches!(
            Tokenizer::new("2×3").tokenize(),
            Err(CalcError::ParseError(_))
        ));
    }

    #[test]
    fn test_tokenize_second_decimal_starts_new_number() {
        let tokens = Tokenizer::new("1.2.3").tokenize().unwrap();
        assert_eq!(tokens, vec![Token::Number(1.2), Token::Number(0.3)]);
    }

    #[test]
    fn test_tokenizer_remaining() {
        let mut t = Tokenizer::new("1 + 2");
        t.next_token().unwrap();
        assert_eq!(t.remaining(), " + 2");
    }

    // ===== Parser =====

    #[test]
    fn test_parse_precedence() {
        let ast = Parser::parse_str("2+3*4").unwrap();
        assert_eq!(
            ast,
            AstNode::binary(
                AstNode::number(2.0),
                Operation::Add,
                AstNode::binary(
                    AstNode::number(3.0),
                    Operation::Multiply,
                    AstNode::number(4.0)
                )
            )
        );
    }

    #[test]
    fn test_parse_power_right_associative() {
        let ast = Parser::parse_str("2^3^2").unwrap();
        assert_eq!(
            ast,
            AstNode::binary(
                AstNode::number(2.0),
                Operation::Power,
                AstNode::binary(AstNode::number(3.0), Operation::Power, AstNode::number(2.0))
            )
        );
    }

    #[test]
    fn test_parse_unary_minus_binds_looser_than_power() {
        let ast = Parser::parse_str("-2^2").unwrap();
        assert_eq!(
            ast,
            AstNode::negate(AstNode::binary(
                AstNode::number(2.0),
                Operation::Power,
                AstNode::number(2.0)
            ))
        );
    }

    #[test]
    fn test_parse_negative_exponent() {
        let ast = Parser::parse_str("2^-1").unwrap();
        assert_eq!(
            ast,
            AstNode::binary(
                AstNode::number(2.0),
                Operation::Power,
                AstNode::negate(AstNode::number(1.0))
            )
        );
    }

    #[test]
    fn test_parse_unary_plus() {
        assert_eq!(Parser::parse_str("(+3)").unwrap(), AstNode::number(3.0));
    }

    #[test]
    fn test_parse_function_call() {
        let ast = Parser::parse_str("sin(0)").unwrap();
        assert_eq!(ast, AstNode::call(Function::Sin, AstNode::number(0.0)));
    }

    #[test]
    fn test_parse_function_without_paren() {
        assert!(matches!(
            Parser::parse_str("sin 0"),
            Err(CalcError::ParseError(_))
        ));
    }

    #[test]
    fn test_parse_unclosed_parenthesis() {
        assert_eq!(
            Parser::parse_str("sin(0"),
            Err(CalcError::parse("Unclosed parenthesis"))
        );
    }

    #[test]
    fn test_parse_extra_close_paren() {
        assert!(matches!(
            Parser::parse_str("(1))"),
            Err(CalcError::ParseError(_))
        ));
    }

    #[test]
    fn test_parse_trailing_operator() {
        assert!(matches!(
            Parser::parse_str("2+"),
            Err(CalcError::ParseError(_))
        ));
    }

    #[test]
    fn test_parse_implicit_multiplication_rejected() {
        assert!(matches!(
            Parser::parse_str("2(3)"),
            Err(CalcError::ParseError(_))
        ));
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Parser::parse_str(""), Err(CalcError::EmptyExpression));
        assert_eq!(Parser::parse_str("   "), Err(CalcError::EmptyExpression));
    }

    #[test]
    fn test_parse_empty_parens() {
        assert!(matches!(
            Parser::parse_str("()"),
            Err(CalcError::ParseError(_))
        ));
    }

    #[test]
    fn test_parse_deep_parens_rejected() {
        let input = format!("{}1", "(".repeat(300));
        assert_eq!(
            Parser::parse_str(&input),
            Err(CalcError::parse("Expression nested too deeply"))
        );
    }

    #[test]
    fn test_parse_nesting_below_limit() {
        let input = format!("{}1{}", "(".repeat(200), ")".repeat(200));
        assert_eq!(Parser::parse_str(&input), Ok(AstNode::number(1.0)));
    }

    #[test]
    fn test_parse_long_prefix_sign_run_rejected() {
        let input = format!("{}5", "-".repeat(1_000));
        assert_eq!(
            Parser::parse_str(&input),
            Err(CalcError::parse("Expression nested too deeply"))
        );
    }

    #[test]
    fn test_parse_long_power_chain_rejected() {
        let input = vec!["2"; 400].join("^");
        assert!(matches!(
            Parser::parse_str(&input),
            Err(CalcError::ParseError(_))
        ));
    }

    #[test]
    fn test_parse_flat_chain_does_not_count_as_nesting() {
        let input = vec!["1"; 1_000].join("+");
        assert!(Parser::parse_str(&input).is_ok());
    }

    #[test]
    fn test_parse_too_many_tokens() {
        let input = vec!["1"; MAX_TOKENS].join("+");
        let err = Parser::parse_str(&input).unwrap_err();
        assert!(err.to_string().contains("Expression too long"));
    }
}
