//! Interactive session.
//!
//! Asks the questions one by one and stops at the first answer that can't
//! be used. Answers are checked as soon as they are given, in the order a
//! user answers them, so the reported failure is always the earliest one.

use super::{finish, load_image, Inputs};
use crate::error::InputError;
use anyhow::Result;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use wmark_core::Transparency;
use wmark_ops::validate::{
    check_chroma_key, check_color_model, check_position, check_transparency, check_watermark_fits,
    position_range,
};
use wmark_ops::{parse_color_triple, parse_position, CompositeConfig, ImageRole, Method, Placement};

/// Runs a session on stdin/stdout.
pub fn run(verbose: bool) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(stdin.lock(), stdout.lock());
    session.verbose = verbose;
    session.run()
}

/// Line-oriented question and answer over any reader and writer.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Prints `question` without a newline and reads one answer line.
    pub fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(InputError::EndOfInput(question.to_string()).into());
        }
        let answer = line.trim_end_matches(['\r', '\n']).to_string();
        debug!(question, answer = %answer, "answer");
        Ok(answer)
    }

    /// Asks a yes/no question; only `yes` counts as yes.
    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        Ok(self.ask(question)? == "yes")
    }

    pub fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

/// One interactive compositing run.
pub struct Session<R, W> {
    prompter: Prompter<R, W>,
    verbose: bool,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            prompter: Prompter::new(input, output),
            verbose: false,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let mut config = CompositeConfig::default();

        // Base image
        let base_path = PathBuf::from(self.prompter.ask("Input the image filename:")?);
        let base = load_image(&base_path)?;
        check_color_model(ImageRole::Base, &base.color_model)?;

        // Watermark
        let watermark_path = PathBuf::from(self.prompter.ask("Input the watermark image filename:")?);
        let watermark = load_image(&watermark_path)?;
        let translucent = watermark.color_model.transparency == Transparency::Translucent;
        if translucent {
            config.use_alpha = self
                .prompter
                .confirm("Do you want to use the watermark's Alpha channel?:")?;
        }
        check_color_model(ImageRole::Watermark, &watermark.color_model)?;

        let inputs = Inputs {
            base: base.to_raster()?,
            watermark: watermark.to_raster()?,
        };
        let base_dims = inputs.base_dimensions();
        let watermark_dims = inputs.watermark_dimensions();
        check_watermark_fits(base_dims, watermark_dims)?;

        if !translucent && self.prompter.confirm("Do you want to set a transparency color?:")? {
            let answer = self
                .prompter
                .ask("Input a transparency color ([Red] [Green] [Blue]):")?;
            let key = parse_color_triple(&answer)?;
            check_chroma_key(key)?;
            config.chroma_key = Some(key);
        }

        // Transparency
        let answer = self
            .prompter
            .ask("Input the watermark transparency percentage (Integer 0-100):")?;
        config.transparency = answer.parse().map_err(|_| InputError::NotAnInteger {
            field: "transparency percentage",
            value: answer.clone(),
        })?;
        check_transparency(config.transparency)?;

        // Placement
        let method = self.prompter.ask("Choose the position method (single, grid):")?;
        config.placement = match Method::from_name(&method) {
            Method::Single => {
                let (max_x, max_y) = position_range(base_dims, watermark_dims);
                let answer = self.prompter.ask(&format!(
                    "Input the watermark position ([x 0-{max_x}] [y 0-{max_y}]):"
                ))?;
                let (x, y) = parse_position(&answer)?;
                check_position(x, y, base_dims, watermark_dims)?;
                Placement::Single { x, y }
            }
            Method::Grid => Placement::Grid,
            Method::Overlay => Placement::Overlay,
        };

        // Output
        let output = self
            .prompter
            .ask("Input the output image filename (jpg or png extension):")?;
        if self.verbose {
            self.prompter.say(&format!(
                "Placement: {:?}, transparency: {}%",
                config.placement, config.transparency
            ))?;
        }
        finish(&inputs, &config, Path::new(&output))?;

        self.prompter
            .say(&format!("The watermarked image {output} has been created."))?;
        Ok(())
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.prompter.into_output()
    }
}
