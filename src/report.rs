//! Console rendering of progress, results and diagnostics.

use crate::error::VisionError;
use std::{io::Write, path::Path};

const BANNER_WIDTH: usize = 70;

/// Writes `title` between two rules, followed by a blank line.
pub fn banner<W: Write>(out: &mut W, title: &str) -> std::io::Result<()> {
    let rule = "=".repeat(BANNER_WIDTH);
    writeln!(out, "{rule}")?;
    writeln!(out, "{title}")?;
    writeln!(out, "{rule}")?;
    writeln!(out)
}

pub fn header<W: Write>(out: &mut W, image_path: &Path, url: &str) -> std::io::Result<()> {
    banner(out, "Vision Analysis Client")?;
    writeln!(out, "Image: {}", image_path.display())?;
    writeln!(out, "API: {url}")?;
    writeln!(out)
}

pub fn analysis<W: Write>(out: &mut W, text: &str) -> std::io::Result<()> {
    banner(out, "Analysis Results")?;
    writeln!(out, "{text}")?;
    writeln!(out)?;
    banner(out, "API Test Complete")
}

/// Prints `ERROR: <message>` and any guidance lines for the error kind.
pub fn error<W: Write>(out: &mut W, err: &VisionError) -> std::io::Result<()> {
    writeln!(out, "ERROR: {err}")?;
    for line in err.guidance() {
        writeln!(out, "{line}")?;
    }
    writeln!(out)
}

/// Usage text shown when no image path was given.
pub fn usage<W: Write>(out: &mut W, program: &str) -> std::io::Result<()> {
    writeln!(out, "Usage: {program} <path_to_image>")?;
    writeln!(out)?;
    writeln!(out, "Example:")?;
    writeln!(out, "  {program} ../email_images/email_001.png")?;
    writeln!(out)?;
    writeln!(out, "Run `{program} --help` for all options.")
}
