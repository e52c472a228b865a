//! Interactive prompts

use std::io::{self, BufRead, Write};

/// Print a question and read one line of answer, trimmed
///
/// End of input yields an empty answer.
pub fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> io::Result<String> {
    write!(output, "{}", question)?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim().to_string())
}

/// Ask a yes/no question; only "yes" (any case) counts as yes
pub fn confirm<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> io::Result<bool> {
    let answer = ask(input, output, question)?;
    Ok(answer.eq_ignore_ascii_case("yes"))
}
