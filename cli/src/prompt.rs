//! Yes/no confirmation on the terminal.

use std::io::{self, BufRead, Write};

/// Ask `question` and read one line. Only an explicit yes (`y`, `yes`,
/// `s`, `sim`) confirms; EOF counts as no.
pub fn confirm<R: BufRead, W: Write>(question: &str, input: &mut R, out: &mut W) -> io::Result<bool> {
    write!(out, "{question} [y/N] ")?;
    out.flush()?;
    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        return Ok(false);
    }
    let answer = answer.trim().to_lowercase();
    Ok(matches!(answer.as_str(), "y" | "yes" | "s" | "sim"))
}
