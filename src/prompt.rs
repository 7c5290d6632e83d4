//! Interactive collection of `n` and `k`.

use std::io::{BufRead, Write};

use tracing::debug;

use crate::error::NearMissError;
use crate::params::{parse_integer, validate_bound, validate_exponent, SearchParameters};

pub const WELCOME: &str = "Welcome to the Near Miss Finder for Fermat's Last Theorem.";
pub const EXPONENT_PROMPT: &str = "Enter the value of n (3 <= n < 12): ";
pub const EXPONENT_RETRY: &str = "Invalid value. Please enter n in the range 3 <= n < 12.";
pub const BOUND_PROMPT: &str = "Enter the value of k (k > 10): ";
pub const BOUND_RETRY: &str = "Invalid value. Please enter k > 10.";
pub const EXIT_PROMPT: &str = "\nPress Enter to exit.";

/// Reads answers from `input` and writes prompts to `output`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Greet the user and ask for `n` then `k`. Each question is repeated
    /// until the answer is a valid integer in range.
    pub fn read_parameters(&mut self) -> Result<SearchParameters, NearMissError> {
        writeln!(self.output, "{WELCOME}")?;
        let n = self.read_exponent()?;
        let k = self.read_bound()?;
        SearchParameters::new(n, k)
    }

    pub fn read_exponent(&mut self) -> Result<i64, NearMissError> {
        self.ask("n", EXPONENT_PROMPT, EXPONENT_RETRY, |v| {
            validate_exponent(v).map(i64::from)
        })
    }

    pub fn read_bound(&mut self) -> Result<i64, NearMissError> {
        self.ask("k", BOUND_PROMPT, BOUND_RETRY, |v| {
            validate_bound(v).map(|k| k as i64)
        })
    }

    /// Block until a line (or end of input) is read.
    pub fn wait_for_exit(&mut self) -> Result<(), NearMissError> {
        write!(self.output, "{EXIT_PROMPT}")?;
        self.output.flush()?;
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(())
    }

    fn ask<F>(
        &mut self,
        field: &'static str,
        prompt: &str,
        retry: &str,
        validate: F,
    ) -> Result<i64, NearMissError>
    where
        F: Fn(i64) -> Result<i64, NearMissError>,
    {
        loop {
            write!(self.output, "{prompt}")?;
            self.output.flush()?;
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(NearMissError::InputClosed(field));
            }
            match parse_integer(field, &line).and_then(&validate) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    debug!(error = %e, "rejected input");
                    writeln!(self.output, "{retry}")?;
                }
            }
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(input: &str) -> (Result<SearchParameters, NearMissError>, String) {
        let mut prompter = Prompter::new(Cursor::new(input.as_bytes()), Vec::new());
        let result = prompter.read_parameters();
        let out = String::from_utf8(prompter.into_output()).unwrap();
        (result, out)
    }

    #[test]
    fn accepts_valid_answers() {
        let (params, out) = run("5\n20\n");
        let params = params.unwrap();
        assert_eq!(params.exponent(), 5);
        assert_eq!(params.bound(), 20);
        assert!(out.starts_with(WELCOME));
        assert!(!out.contains("Invalid value"));
    }

    #[test]
    fn reprompts_until_values_are_valid() {
        let (params, out) = run("2\n12\nabc\n3\n10\nten\n11\n");
        let params = params.unwrap();
        assert_eq!(params.exponent(), 3);
        assert_eq!(params.bound(), 11);
        assert_eq!(out.matches(EXPONENT_RETRY).count(), 3);
        assert_eq!(out.matches(BOUND_RETRY).count(), 2);
        assert_eq!(out.matches(EXPONENT_PROMPT).count(), 4);
        assert_eq!(out.matches(BOUND_PROMPT).count(), 3);
    }

    #[test]
    fn exit_prompt_leaves_cursor_on_prompt_line() {
        let mut prompter = Prompter::new(Cursor::new(&b"\n"[..]), Vec::new());
        prompter.wait_for_exit().unwrap();
        let out = String::from_utf8(prompter.into_output()).unwrap();
        assert_eq!(out, EXIT_PROMPT);
        assert!(!out.ends_with('\n'));
    }

    #[test]
    fn closed_input_is_an_error() {
        let (result, _) = run("4\n");
        assert!(matches!(result, Err(NearMissError::InputClosed("k"))));
        let (result, _) = run("");
        assert!(matches!(result, Err(NearMissError::InputClosed("n"))));
    }
}
