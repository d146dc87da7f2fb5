//! AST evaluator

use crate::core::parser::{AstNode, Parser};
use crate::core::{CalcResult, Calculator};

/// Evaluator for AST expressions
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator;

impl Evaluator {
    /// Creates a new evaluator
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Evaluates an AST node and returns the result
    pub fn evaluate(&self, node: &AstNode) -> CalcResult<f64> {
        match node {
            AstNode::Number(n) => Calculator::check_overflow(*n),
            AstNode::Negate(inner) => Ok(-self.evaluate(inner)?),
            AstNode::BinaryOp { left, op, right } => {
                let left_val = self.evaluate(left)?;
                let right_val = self.evaluate(right)?;
                Calculator::calculate(left_val, right_val, *op)
            }
            AstNode::Call { func, arg } => Calculator::apply(*func, self.evaluate(arg)?),
        }
    }

    /// Evaluates a canonical string expression
    pub fn evaluate_str(&self, input: &str) -> CalcResult<f64> {
        let ast = Parser::parse_str(input)?;
        self.evaluate(&ast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CalcError, Function, Operation};

    // ===== Basic evaluation tests =====

    #[test]
    fn test_evaluate_number() {
        let eval = Evaluator::new();
        assert_eq!(eval.evaluate(&AstNode::number(42.0)), Ok(42.0));
    }

    #[test]
    fn test_evaluate_double_negative() {
        let eval = Evaluator::new();
        let ast = AstNode::negate(AstNode::negate(AstNode::number(5.0)));
        assert_eq!(eval.evaluate(&ast), Ok(5.0));
    }

    #[test]
    fn test_evaluate_call() {
        let eval = Evaluator::new();
        let ast = AstNode::call(Function::Sqrt, AstNode::number(16.0));
        assert_eq!(eval.evaluate(&ast), Ok(4.0));
    }

    #[test]
    fn test_evaluate_huge_literal_is_overflow() {
        let eval = Evaluator::new();
        let literal = "9".repeat(400);
        assert_eq!(eval.evaluate_str(&literal), Err(CalcError::Overflow));
    }

    // ===== Error handling tests =====

    #[test]
    fn test_evaluate_division_by_zero() {
        let eval = Evaluator::new();
        let ast = AstNode::binary(
            AstNode::number(10.0),
            Operation::Divide,
            AstNode::number(0.0),
        );
        assert_eq!(eval.evaluate(&ast), Err(CalcError::DivisionByZero));
    }

    #[test]
    fn test_evaluate_error_propagates_through_call() {
        let eval = Evaluator::new();
        assert_eq!(
            eval.evaluate_str("sin(1/0)"),
            Err(CalcError::DivisionByZero)
        );
    }

    #[test]
    fn test_evaluate_sqrt_of_negative() {
        let eval = Evaluator::new();
        assert!(matches!(
            eval.evaluate_str("sqrt(0-4)"),
            Err(CalcError::InvalidResult(_))
        ));
    }

    // ===== String evaluation tests =====

    #[test]
    fn test_evaluate_str_precedence() {
        let eval = Evaluator::new();
        assert_eq!(eval.evaluate_str("2+3*4"), Ok(14.0));
        assert_eq!(eval.evaluate_str("(2+3)*4"), Ok(20.0));
        assert_eq!(eval.evaluate_str("10-4-3"), Ok(3.0));
        assert_eq!(eval.evaluate_str("16/4/2"), Ok(2.0));
    }

    #[test]
    fn test_evaluate_str_power() {
        let eval = Evaluator::new();
        assert_eq!(eval.evaluate_str("2^3^2"), Ok(512.0));
        assert_eq!(eval.evaluate_str("2*3^2"), Ok(18.0));
        assert_eq!(eval.evaluate_str("-2^2"), Ok(-4.0));
        assert_eq!(eval.evaluate_str("2^-1"), Ok(0.5));
    }

    #[test]
    fn test_evaluate_str_unary_minus() {
        let eval = Evaluator::new();
        assert_eq!(eval.evaluate_str("-5"), Ok(-5.0));
        assert_eq!(eval.evaluate_str("12+-5"), Ok(7.0));
        assert_eq!(eval.evaluate_str("12--5"), Ok(17.0));
    }

    #[test]
    fn test_evaluate_str_functions() {
        let eval = Evaluator::new();
        assert_eq!(eval.evaluate_str("sin(0)"), Ok(0.0));
        assert_eq!(eval.evaluate_str("cos(0)"), Ok(1.0));
        assert_eq!(eval.evaluate_str("tan(0)"), Ok(0.0));
        assert_eq!(eval.evaluate_str("sqrt(9)+1"), Ok(4.0));
        assert_eq!(eval.evaluate_str("sqrt(sqrt(16))"), Ok(2.0));
    }

    #[test]
    fn test_evaluate_str_invalid() {
        let eval = Evaluator::new();
        assert!(matches!(
            eval.evaluate_str("2 +"),
            Err(CalcError::ParseError(_))
        ));
        assert_eq!(eval.evaluate_str(""), Err(CalcError::EmptyExpression));
    }

    #[test]
    fn test_evaluate_complex_real_world() {
        let eval = Evaluator::new();
        // discriminant b^2 - 4ac for a=1, b=5, c=6
        assert_eq!(eval.evaluate_str("5^2-4*1*6"), Ok(1.0));
    }
}
