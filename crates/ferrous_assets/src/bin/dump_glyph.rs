//! Dumps one glyph's MSDF to a PNG file, for eyeballing generator output
//! without wiring up a renderer. Usage: `dump_glyph <font.ttf> <char> <out.png>`.

use ferrous_assets::font_parser::FontParser;
use ferrous_font::GenerationConfig;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let font_path = args.next().ok_or_else(|| anyhow::anyhow!("usage: dump_glyph <font.ttf> <char> <out.png>"))?;
    let ch = args
        .next()
        .and_then(|s| s.chars().next())
        .ok_or_else(|| anyhow::anyhow!("missing <char> argument"))?;
    let out_path = args.next().unwrap_or_else(|| "glyph.png".to_string());

    let bytes = std::fs::read(&font_path)?;
    let parser = FontParser::new(bytes).map_err(|e| anyhow::anyhow!(e))?;
    let contours = parser
        .get_glyph_contours(ch)
        .map_err(|e| anyhow::anyhow!("glyph for '{ch}' is unusable: {e}"))?
        .ok_or_else(|| anyhow::anyhow!("no usable glyph for '{ch}'"))?;

    let config = GenerationConfig::default();
    let size = 64usize;
    let bitmap = ferrous_font::generate_msdf_for_glyph(&contours, &config, size, size)
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    let rgba = bitmap.to_rgba8();
    let image = image::RgbaImage::from_raw(size as u32, size as u32, rgba)
        .ok_or_else(|| anyhow::anyhow!("bitmap size mismatch"))?;
    image.save(&out_path)?;
    log::info!("wrote {out_path}");
    Ok(())
}
