//! Line-based prompts over any reader/writer pair.

use std::io::{BufRead, Write};

use anyhow::Result;

/// Prints `prompt` and reads one trimmed line. Returns `None` at end of input.
pub(crate) fn read_line<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> Result<Option<String>> {
    write!(out, "{prompt}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(out)?;
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Asks a yes/no question. An empty answer or end of input picks `default`.
pub(crate) fn confirm<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    question: &str,
    default: bool,
) -> Result<bool> {
    let hint = if default { "[Y/n]" } else { "[y/N]" };
    loop {
        let Some(answer) = read_line(input, out, &format!("{question} {hint}: "))? else {
            return Ok(default);
        };
        match answer.to_ascii_lowercase().as_str() {
            "" => return Ok(default),
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => writeln!(out, "Please answer 'y' or 'n'.")?,
        }
    }
}
