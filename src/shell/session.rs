//! Session state held by the shell between user actions.

use tracing::{debug, info};

use crate::calculator::{self, Operation, Outcome};

/// Raw field text and the selected operation. Nothing here is validated
/// until a computation is requested.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub a: String,
    pub b_input: String,
    pub expression: String,
    pub operation: Operation,
}

/// Inputs plus the outcome of the most recent action.
#[derive(Debug, Default)]
pub struct Session {
    pub input: InputState,
    outcome: Option<Outcome>,
}

impl Session {
    pub fn new(operation: Operation) -> Self {
        info!(%operation, "calculator session started");
        Self {
            input: InputState {
                operation,
                ..InputState::default()
            },
            outcome: None,
        }
    }

    /// Run the selected operation on `a` and `bInput`.
    pub fn calculate(&mut self) -> &Outcome {
        self.outcome = None;
        let input = &self.input;
        let outcome = calculator::compute(
            input.operation,
            &input.a,
            &input.b_input,
            &input.expression,
        );
        self.store(outcome)
    }

    pub fn sum_of_digit_squares(&mut self) -> &Outcome {
        self.outcome = None;
        let outcome = calculator::sum_of_digit_squares(&self.input.a);
        self.store(outcome)
    }

    pub fn even_odd(&mut self) -> &Outcome {
        self.outcome = None;
        let outcome = calculator::even_odd(&self.input.a);
        self.store(outcome)
    }

    /// The outcome of the last action, if any.
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// The live hint for the `bInput` field.
    pub fn b_preview(&self) -> String {
        calculator::preview_b(&self.input.b_input)
    }

    /// Clear all inputs and the outcome, keeping the selected operation.
    pub fn reset(&mut self) {
        self.input = InputState {
            operation: self.input.operation,
            ..InputState::default()
        };
        self.outcome = None;
    }

    fn store(&mut self, outcome: Outcome) -> &Outcome {
        match &outcome {
            Ok(value) => debug!(%value, "result updated"),
            Err(err) => debug!(kind = err.kind(), "computation failed"),
        }
        self.outcome.insert(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::{Parity, Value};
    use crate::error::{CalcError, Field};

    fn session(a: &str, b_input: &str, operation: Operation) -> Session {
        let mut session = Session::new(operation);
        session.input.a = a.to_string();
        session.input.b_input = b_input.to_string();
        session
    }

    #[test]
    fn test_calculate_stores_outcome() {
        let mut session = session("6", "3", Operation::Divide);
        assert!(session.outcome().is_none());

        assert_eq!(session.calculate(), &Ok(Value::Number(2.0)));
        assert_eq!(session.outcome(), Some(&Ok(Value::Number(2.0))));
    }

    #[test]
    fn test_new_failure_replaces_result() {
        let mut session = session("6", "3", Operation::Add);
        session.calculate();

        session.input.b_input = "0".to_string();
        session.input.operation = Operation::Divide;
        session.calculate();
        assert_eq!(session.outcome(), Some(&Err(CalcError::DivisionByZero)));
    }

    #[test]
    fn test_new_result_replaces_failure() {
        let mut session = session("", "3", Operation::Add);
        assert_eq!(
            session.calculate(),
            &Err(CalcError::MissingOrNonNumeric { field: Field::A })
        );

        session.input.a = "4".to_string();
        assert_eq!(session.even_odd(), &Ok(Value::Parity(Parity::Even)));
        assert_eq!(session.sum_of_digit_squares(), &Ok(Value::Number(16.0)));
    }

    #[test]
    fn test_auxiliary_actions_ignore_b() {
        let mut session = session("-123.7", "not a number", Operation::Add);
        assert_eq!(session.sum_of_digit_squares(), &Ok(Value::Number(14.0)));
    }

    #[test]
    fn test_expression_uses_input_state() {
        let mut session = session("2", "3", Operation::Expression);
        session.input.expression = "(a+b)*a".to_string();
        assert_eq!(session.calculate(), &Ok(Value::Number(10.0)));
        assert_eq!(session.calculate(), &Ok(Value::Number(10.0)));
    }

    #[test]
    fn test_reset_keeps_operation() {
        let mut session = session("1", "2", Operation::Multiply);
        session.calculate();
        session.reset();

        assert_eq!(session.input.operation, Operation::Multiply);
        assert!(session.input.a.is_empty());
        assert!(session.outcome().is_none());
        assert_eq!(session.b_preview(), "...");
    }
}
