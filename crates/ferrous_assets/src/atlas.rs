//! CPU-side atlas packing for glyph MSDFs. Produces a flat RGBA8 buffer and
//! per-glyph UV/advance metrics; texture upload is the runtime renderer's
//! job and happens outside this crate.

use anyhow::{anyhow, Result};
use ferrous_font::GenerationConfig;
use std::collections::HashMap;

use crate::font_parser::FontParser;

#[derive(Debug, Clone)]
pub struct GlyphMetrics {
    pub uv: [f32; 4],
    pub size: [f32; 2],
    pub advance: f32,
}

#[derive(Debug)]
pub struct FontAtlas {
    /// Row-major RGBA8, `atlas_dim * glyph_size` square pixels.
    pub pixels: Vec<u8>,
    pub metrics: HashMap<char, GlyphMetrics>,
    pub atlas_dim: u32,
    pub glyph_size: u32,
}

impl FontAtlas {
    /// Lays out one MSDF per requested character in a square grid and packs
    /// them into a single flat buffer. Characters with no mapped glyph are
    /// skipped (logged at `log::warn!`), leaving a blank atlas cell. A
    /// composite glyph fails the whole build with `InvalidShape`, since
    /// there's no sane per-glyph fallback for it. Per-glyph generation runs
    /// in parallel; the packing loop that follows is sequential since every
    /// glyph writes a disjoint cell of the same buffer anyway and there's
    /// nothing to gain from parallelising a memcpy loop.
    pub fn build<I: IntoIterator<Item = char>>(
        parser: &FontParser,
        chars: I,
        config: &GenerationConfig,
        glyph_size: u32,
    ) -> Result<Self> {
        let char_list: Vec<char> = chars.into_iter().collect();
        let count = char_list.len() as u32;
        if count == 0 {
            return Err(anyhow!("no characters requested for atlas"));
        }

        let atlas_dim = (count as f32).sqrt().ceil() as u32;
        let tex_size = atlas_dim * glyph_size;
        log::debug!("building atlas {tex_size}x{tex_size} for {count} glyphs");

        let generated = generate_all(parser, &char_list, config, glyph_size);

        let mut pixels = vec![0u8; (tex_size * tex_size * 4) as usize];
        let mut metrics = HashMap::new();

        let mut x = 0u32;
        let mut y = 0u32;
        for (&c, result) in char_list.iter().zip(generated) {
            let Some(result) = result else {
                log::warn!("no usable glyph for '{c}'; leaving atlas cell blank");
                advance_cursor(&mut x, &mut y, glyph_size, tex_size);
                continue;
            };
            let rgba = result?;

            for row in 0..glyph_size {
                let dst = (((y + row) * tex_size + x) * 4) as usize;
                let src = (row * glyph_size * 4) as usize;
                pixels[dst..dst + (glyph_size * 4) as usize]
                    .copy_from_slice(&rgba[src..src + (glyph_size * 4) as usize]);
            }

            metrics.insert(
                c,
                GlyphMetrics {
                    uv: [
                        x as f32 / tex_size as f32,
                        y as f32 / tex_size as f32,
                        (x + glyph_size) as f32 / tex_size as f32,
                        (y + glyph_size) as f32 / tex_size as f32,
                    ],
                    size: [glyph_size as f32, glyph_size as f32],
                    advance: parser.get_glyph_advance(c),
                },
            );

            advance_cursor(&mut x, &mut y, glyph_size, tex_size);
        }

        Ok(FontAtlas {
            pixels,
            metrics,
            atlas_dim,
            glyph_size,
        })
    }
}

fn generate_one(parser: &FontParser, c: char, config: &GenerationConfig, glyph_size: u32) -> Option<Result<Vec<u8>>> {
    let contours = match parser.get_glyph_contours(c) {
        Ok(Some(contours)) => contours,
        Ok(None) => return None,
        Err(e) => return Some(Err(anyhow!("glyph for '{c}' is unusable: {e}"))),
    };
    Some(
        ferrous_font::generate_msdf_for_glyph(&contours, config, glyph_size as usize, glyph_size as usize)
            .map(|b| b.to_rgba8())
            .map_err(|e| anyhow!("generating MSDF for '{c}': {e}")),
    )
}

#[cfg(not(target_arch = "wasm32"))]
fn generate_all(parser: &FontParser, chars: &[char], config: &GenerationConfig, glyph_size: u32) -> Vec<Option<Result<Vec<u8>>>> {
    use rayon::prelude::*;
    chars.par_iter().map(|&c| generate_one(parser, c, config, glyph_size)).collect()
}

#[cfg(target_arch = "wasm32")]
fn generate_all(parser: &FontParser, chars: &[char], config: &GenerationConfig, glyph_size: u32) -> Vec<Option<Result<Vec<u8>>>> {
    chars.iter().map(|&c| generate_one(parser, c, config, glyph_size)).collect()
}

fn advance_cursor(x: &mut u32, y: &mut u32, glyph_size: u32, tex_size: u32) {
    *x += glyph_size;
    if *x + glyph_size > tex_size {
        *x = 0;
        *y += glyph_size;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrous_font::import::font::RawPoint;

    #[test]
    fn simple_msdf_length() {
        let triangle = vec![vec![
            RawPoint::new(0.0, 0.0, true),
            RawPoint::new(1.0, 0.0, true),
            RawPoint::new(0.5, 1.0, true),
        ]];
        let config = GenerationConfig {
            scale: 8.0,
            translate: (0.0, 0.0),
            range: 0.25,
            ..Default::default()
        };
        let bitmap = ferrous_font::generate_msdf_for_glyph(&triangle, &config, 8, 8).unwrap();
        assert_eq!(bitmap.to_rgba8().len(), 8 * 8 * 4);
    }

    fn minimal_font_with_glyph() -> Vec<u8> {
        let mut tables: Vec<([u8; 4], Vec<u8>)> = Vec::new();

        let mut cmap = Vec::new();
        cmap.extend(&0u16.to_be_bytes());
        cmap.extend(&1u16.to_be_bytes());
        let subtable_record_pos = cmap.len();
        cmap.extend(&3u16.to_be_bytes());
        cmap.extend(&1u16.to_be_bytes());
        cmap.extend(&0u32.to_be_bytes());
        let fmt_start = cmap.len();
        cmap.extend(&4u16.to_be_bytes());
        cmap.extend(&0u16.to_be_bytes());
        cmap.extend(&0u16.to_be_bytes());
        cmap.extend(&2u16.to_be_bytes());
        cmap.extend(&0u16.to_be_bytes());
        cmap.extend(&0u16.to_be_bytes());
        cmap.extend(&0u16.to_be_bytes());
        cmap.extend(&('A' as u16).to_be_bytes());
        cmap.extend(&0u16.to_be_bytes());
        cmap.extend(&('A' as u16).to_be_bytes());
        cmap.extend(&(-65i16).to_be_bytes());
        cmap.extend(&0u16.to_be_bytes());
        let fmt_length = (cmap.len() - fmt_start) as u16;
        cmap[fmt_start + 2..fmt_start + 4].copy_from_slice(&fmt_length.to_be_bytes());
        let offset_val = fmt_start as u32;
        cmap[subtable_record_pos + 4..subtable_record_pos + 8]
            .copy_from_slice(&offset_val.to_be_bytes());
        tables.push((*b"cmap", cmap));

        let mut head = vec![0u8; 54];
        head[18..20].copy_from_slice(&1000u16.to_be_bytes());
        head[50..52].copy_from_slice(&1i16.to_be_bytes());
        tables.push((*b"head", head));

        let mut glyf = Vec::new();
        glyf.extend(&1i16.to_be_bytes());
        glyf.extend(&0i16.to_be_bytes());
        glyf.extend(&0i16.to_be_bytes());
        glyf.extend(&100i16.to_be_bytes());
        glyf.extend(&100i16.to_be_bytes());
        glyf.extend(&3u16.to_be_bytes());
        glyf.extend(&0u16.to_be_bytes());
        for _ in 0..4 {
            glyf.push(0x01);
        }
        glyf.extend(&0i16.to_be_bytes());
        glyf.extend(&0i16.to_be_bytes());
        glyf.extend(&0i16.to_be_bytes());
        glyf.extend(&100i16.to_be_bytes());
        glyf.extend(&100i16.to_be_bytes());
        glyf.extend(&0i16.to_be_bytes());
        glyf.extend(&0i16.to_be_bytes());
        glyf.extend(&(-100i16).to_be_bytes());
        tables.push((*b"glyf", glyf));

        let mut loca = Vec::new();
        loca.extend(&0u32.to_be_bytes());
        let glyf_len = tables.iter().find(|(t, _)| t == b"glyf").unwrap().1.len() as u32;
        loca.extend(&glyf_len.to_be_bytes());
        tables.push((*b"loca", loca));

        let mut data = Vec::new();
        data.extend(&0u32.to_be_bytes());
        let num_tables = tables.len() as u16;
        data.extend(&num_tables.to_be_bytes());
        data.extend(&0u16.to_be_bytes());
        data.extend(&0u16.to_be_bytes());
        data.extend(&0u16.to_be_bytes());
        let mut offset = 12 + (16 * tables.len());
        let mut positions = Vec::new();
        for (_, tbl) in &tables {
            positions.push(offset as u32);
            offset += tbl.len();
        }
        for ((tag, tbl), &pos) in tables.iter().zip(&positions) {
            data.extend(tag);
            data.extend(&0u32.to_be_bytes());
            data.extend(&pos.to_be_bytes());
            data.extend(&(tbl.len() as u32).to_be_bytes());
        }
        for (_, tbl) in &tables {
            data.extend(tbl);
        }
        data
    }

    #[test]
    fn build_rejects_empty_character_list() {
        let parser = FontParser::new(minimal_font_with_glyph()).expect("parser must succeed");
        let config = GenerationConfig::default();
        let result = FontAtlas::build(&parser, std::iter::empty(), &config, 32);
        assert!(result.is_err());
    }

    #[test]
    fn build_packs_one_glyph_into_a_single_cell_atlas() {
        let parser = FontParser::new(minimal_font_with_glyph()).expect("parser must succeed");
        let config = GenerationConfig {
            scale: 0.05,
            translate: (0.0, 0.0),
            range: 8.0,
            ..Default::default()
        };
        let atlas = FontAtlas::build(&parser, ['A'], &config, 16).unwrap();
        assert_eq!(atlas.atlas_dim, 1);
        assert_eq!(atlas.pixels.len(), (16 * 16 * 4) as usize);
        assert!(atlas.metrics.contains_key(&'A'));
    }
}
