//! Image info command.
//!
//! Prints the color model each file was stored with.

use crate::InfoArgs;
use anyhow::Result;
use std::io::{self, Write};
use std::path::Path;
use wmark_io::ImageData;

/// Runs the info command for every input.
pub fn run(args: InfoArgs, verbose: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (i, path) in args.input.iter().enumerate() {
        let image = super::load_image(path)?;
        if i > 0 {
            writeln!(out)?;
        }
        print_info(&mut out, path, &image, verbose)?;
    }
    Ok(())
}

fn print_info<W: Write>(out: &mut W, path: &Path, image: &ImageData, verbose: bool) -> io::Result<()> {
    let model = &image.color_model;
    writeln!(out, "Image file: {}", path.display())?;
    writeln!(out, "Width: {}", image.width)?;
    writeln!(out, "Height: {}", image.height)?;
    writeln!(out, "Number of components: {}", model.num_components)?;
    writeln!(out, "Number of color components: {}", model.num_color_components)?;
    writeln!(out, "Bits per pixel: {}", model.bits_per_pixel)?;
    writeln!(out, "Transparency: {}", model.transparency)?;
    if verbose {
        writeln!(out, "Format: {}", image.format.name())?;
        writeln!(out, "Decoded channels: {}", image.channels)?;
    }
    Ok(())
}
