//! Apply command - composite with settings given as flags.
//!
//! The output name is checked before any decoding. The remaining checks
//! follow the order of the interactive session.

use super::{finish, load_image, Inputs};
use crate::ApplyArgs;
use anyhow::Result;
use tracing::{debug, info};
use wmark_core::Transparency;
use wmark_ops::validate::{check_color_model, check_watermark_fits};
use wmark_ops::{
    parse_color_triple, parse_position, CompositeConfig, CompositeError, ImageRole, Method, Placement,
};

pub fn run(args: ApplyArgs, verbose: bool) -> Result<()> {
    wmark_io::Format::for_output(&args.output)?;

    let base = load_image(&args.image)?;
    check_color_model(ImageRole::Base, &base.color_model)?;

    let watermark = load_image(&args.watermark)?;
    check_color_model(ImageRole::Watermark, &watermark.color_model)?;

    if verbose {
        println!("Image:     {}x{} ({})", base.width, base.height, args.image.display());
        println!("Watermark: {}x{} ({})", watermark.width, watermark.height, args.watermark.display());
    }

    let inputs = Inputs {
        base: base.to_raster()?,
        watermark: watermark.to_raster()?,
    };
    check_watermark_fits(inputs.base_dimensions(), inputs.watermark_dimensions())?;

    let config = config_from_args(&args, watermark.color_model.transparency)?;
    debug!(?config, "apply");

    finish(&inputs, &config, &args.output)?;

    info!(output = %args.output.display(), "Done");
    println!("The watermarked image {} has been created.", args.output.display());
    Ok(())
}

/// Builds a config from flags.
///
/// `--use-alpha` only takes effect for translucent watermarks and
/// `--transparency-color` only for the others, as in the interactive flow.
fn config_from_args(args: &ApplyArgs, watermark: Transparency) -> Result<CompositeConfig> {
    let translucent = watermark == Transparency::Translucent;

    let chroma_key = match &args.transparency_color {
        Some(color) if !translucent => Some(parse_color_triple(color)?),
        _ => None,
    };

    let placement = match Method::from_name(&args.method) {
        Method::Single => {
            let position = args.position.as_deref().ok_or_else(|| {
                CompositeError::InvalidPosition("--position is required for the single method".into())
            })?;
            let (x, y) = parse_position(position)?;
            Placement::Single { x, y }
        }
        Method::Grid => Placement::Grid,
        Method::Overlay => Placement::Overlay,
    };

    Ok(CompositeConfig {
        transparency: args.transparency,
        use_alpha: args.use_alpha && translucent,
        chroma_key,
        placement,
    })
}
