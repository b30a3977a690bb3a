use super::{ReturnOptions, Returner};
use crate::error::Result;
use crate::render::RenderResults;
use std::io::{self, Write};

/// Prints each result under a banner naming its key
pub struct TerminalReturner;

impl Returner for TerminalReturner {
    fn name(&self) -> &'static str {
        "terminal"
    }

    fn dispatch(&self, results: &RenderResults, _options: &ReturnOptions) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        write_results(results, &mut out)?;
        out.flush()?;
        Ok(())
    }
}

pub fn write_results<W: Write>(results: &RenderResults, out: &mut W) -> io::Result<()> {
    let rule = format!("# {}", "-".repeat(75));
    for (name, text) in results.iter() {
        writeln!(out)?;
        writeln!(out, "{rule}")?;
        writeln!(out, "# {name} rendering results")?;
        writeln!(out, "{rule}")?;
        writeln!(out, "{text}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_per_result() {
        let results: RenderResults = [("rt-1", "hostname rt-1"), ("rt-2", "hostname rt-2")]
            .into_iter()
            .collect();
        let mut out = Vec::new();

        write_results(&results, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "");
        assert!(lines[1].starts_with("# ----"));
        assert_eq!(lines[2], "# rt-1 rendering results");
        assert_eq!(lines[4], "hostname rt-1");
        assert_eq!(lines[7], "# rt-2 rendering results");
        assert!(text.ends_with("hostname rt-2\n"));
    }
}
