//! Asset utilities for FerrousEngine

pub mod atlas;
pub mod binary_reader;
pub mod tables;

/// Structures and logic for parsing TrueType fonts.
pub mod font_parser {
    use crate::binary_reader::*;
    use crate::tables::TableRecord;
    use ferrous_font::import::font::RawPoint;
    use std::collections::HashMap;
    use std::io::{Read, Seek};

    pub struct FontParser {
        data: Vec<u8>,
        tables: HashMap<[u8; 4], TableRecord>,
        index_to_loc_format: i16,
        /// value read from head table, used to normalize glyph coordinates
        units_per_em: u16,
    }

    impl FontParser {
        /// Create a new `FontParser` from raw font bytes. It will read the
        /// offset table and directory immediately.
        pub fn new(data: Vec<u8>) -> Result<Self, String> {
            let mut parser = FontParser {
                data,
                tables: HashMap::new(),
                index_to_loc_format: 0,
                units_per_em: 0,
            };
            parser
                .read_offset_and_directory()
                .map_err(|e| e.to_string())?;
            parser.read_head().map_err(|e| e.to_string())?;
            parser.read_loca().map_err(|e| e.to_string())?;
            Ok(parser)
        }

        fn read_offset_and_directory(&mut self) -> std::io::Result<()> {
            let mut cur = std::io::Cursor::new(&self.data);
            // Offset table: scaler type (4 bytes), numTables (u16), searchRange,u16,
            //   entrySelector,u16, rangeShift,u16
            let _scaler_type = read_u32_be(&mut cur)?;
            let num_tables = read_u16_be(&mut cur)?;
            let _search_range = read_u16_be(&mut cur)?;
            let _entry_selector = read_u16_be(&mut cur)?;
            let _range_shift = read_u16_be(&mut cur)?;

            for _ in 0..num_tables {
                let mut tag = [0u8; 4];
                cur.read_exact(&mut tag)?;
                let checksum = read_u32_be(&mut cur)?;
                let offset = read_u32_be(&mut cur)?;
                let length = read_u32_be(&mut cur)?;
                let rec = TableRecord {
                    tag,
                    checksum,
                    offset,
                    length,
                };
                self.tables.insert(tag, rec);
            }
            Ok(())
        }

        fn read_head(&mut self) -> std::io::Result<()> {
            let tag = *b"head";
            let rec = self
                .tables
                .get(&tag)
                .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, "no head table"))?;
            let start = rec.offset as usize;
            let mut cur = std::io::Cursor::new(&self.data[start..(start + rec.length as usize)]);
            // head structure (see OpenType spec):
            // 18: unitsPerEm u16
            // 50: indexToLocFormat i16
            cur.set_position(18);
            self.units_per_em = read_u16_be(&mut cur)?;
            cur.set_position(50);
            self.index_to_loc_format = read_i16_be(&mut cur)?;
            Ok(())
        }

        fn read_loca(&self) -> std::io::Result<()> {
            let tag = *b"loca";
            if !self.tables.contains_key(&tag) {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "no loca table",
                ));
            }
            Ok(())
        }

        pub fn get_glyph_index(&self, c: char) -> u16 {
            if let Some(rec) = self.tables.get(b"cmap") {
                let start = rec.offset as usize;
                let sub = &self.data[start..(start + rec.length as usize)];
                // search for format 4
                let mut cur = std::io::Cursor::new(sub);
                let _version = read_u16_be(&mut cur).unwrap_or(0);
                let num_subtables = read_u16_be(&mut cur).unwrap_or(0);
                for _ in 0..num_subtables {
                    let _platform_id = read_u16_be(&mut cur).unwrap_or(0);
                    let _encoding_id = read_u16_be(&mut cur).unwrap_or(0);
                    let offset = read_u32_be(&mut cur).unwrap_or(0);
                    let saved_pos = cur.position();
                    cur.set_position(offset as u64);
                    let format = read_u16_be(&mut cur).unwrap_or(0);
                    if format == 4 {
                        // parse format 4 table
                        let _length = read_u16_be(&mut cur).unwrap_or(0);
                        let _language = read_u16_be(&mut cur).unwrap_or(0);
                        let seg_count_x2 = read_u16_be(&mut cur).unwrap_or(0);
                        let seg_count = seg_count_x2 / 2;
                        let _search_range = read_u16_be(&mut cur).unwrap_or(0);
                        let _entry_selector = read_u16_be(&mut cur).unwrap_or(0);
                        let _range_shift = read_u16_be(&mut cur).unwrap_or(0);
                        // read arrays
                        let mut end_codes = vec![0u16; seg_count as usize];
                        for e in &mut end_codes {
                            *e = read_u16_be(&mut cur).unwrap_or(0);
                        }
                        let _reserved_pad = read_u16_be(&mut cur).unwrap_or(0);
                        let mut start_codes = vec![0u16; seg_count as usize];
                        for s in &mut start_codes {
                            *s = read_u16_be(&mut cur).unwrap_or(0);
                        }
                        let mut id_deltas = vec![0i16; seg_count as usize];
                        for d in &mut id_deltas {
                            *d = read_i16_be(&mut cur).unwrap_or(0);
                        }
                        let mut id_range_offsets = vec![0u16; seg_count as usize];
                        for r in &mut id_range_offsets {
                            *r = read_u16_be(&mut cur).unwrap_or(0);
                        }
                        let glyph_array_pos = cur.position();
                        let code = c as u32;
                        for i in 0..seg_count as usize {
                            let start = start_codes[i] as u32;
                            let end = end_codes[i] as u32;
                            if code >= start && code <= end {
                                if id_range_offsets[i] == 0 {
                                    let glyph =
                                        ((code as i32 + id_deltas[i] as i32) % 65536) as u16;
                                    return glyph;
                                } else {
                                    let offset_in_seg = (code - start) as u64;
                                    let pos = glyph_array_pos
                                        + (i as u64 * 2)
                                        + offset_in_seg * 2
                                        + (id_range_offsets[i] as u64);
                                    if pos as usize + 2 <= sub.len() {
                                        let val = u16::from_be_bytes([
                                            sub[pos as usize],
                                            sub[pos as usize + 1],
                                        ]);
                                        if val == 0 {
                                            return 0;
                                        }
                                        return ((val as i32 + id_deltas[i] as i32) % 65536) as u16;
                                    }
                                }
                            }
                        }
                    }
                    cur.set_position(saved_pos);
                }
            }
            0
        }

        /// Testing helper: return the raw bytes of the cmap table (if present).
        #[cfg(test)]
        pub fn debug_cmap_bytes(&self) -> Option<&[u8]> {
            self.tables.get(b"cmap").map(|rec| {
                let start = rec.offset as usize;
                &self.data[start..start + rec.length as usize]
            })
        }

        /// For debugging purposes we can query glyf offset from loca
        pub fn glyph_offset(&self, glyph_index: u16) -> Option<u32> {
            let loca = self.tables.get(b"loca")?;
            let glyf = self.tables.get(b"glyf")?;
            let start = loca.offset as usize;
            let slice = &self.data[start..(start + loca.length as usize)];
            if self.index_to_loc_format == 0 {
                let mut cur = std::io::Cursor::new(slice);
                cur.set_position((glyph_index as u64) * 2);
                let off = read_u16_be(&mut cur).ok()? as u32 * 2;
                Some(glyf.offset + off)
            } else {
                let mut cur = std::io::Cursor::new(slice);
                cur.set_position((glyph_index as u64) * 4);
                let off = read_u32_be(&mut cur).ok()?;
                Some(glyf.offset + off)
            }
        }

        fn get_glyph_data_offset(&self, glyph_index: u16) -> Option<usize> {
            self.glyph_offset(glyph_index).map(|o| o as usize)
        }

        /// Reads the glyph's on/off-curve contour points straight off the
        /// `glyf` table, one `Vec<RawPoint>` per contour, in font units
        /// normalized by `unitsPerEm`. Implied on-curve midpoints and
        /// contour-start rotation are `ferrous_font::import::font`'s job,
        /// not this parser's; this only extracts what the table literally
        /// stores. Composite glyphs (`numberOfContours < 0`) are reported
        /// as `Err(GenError::InvalidShape)`, distinct from "no glyph data
        /// at all" (`Ok(None)`), so callers don't silently treat the two
        /// the same way.
        fn parse_glyph(&self, glyph_index: u16) -> Result<Option<Vec<Vec<RawPoint>>>, ferrous_font::GenError> {
            let Some(glyf_rec) = self.tables.get(b"glyf") else {
                return Ok(None);
            };
            let Some(off) = self.get_glyph_data_offset(glyph_index) else {
                return Ok(None);
            };
            if off as u32 >= glyf_rec.offset + glyf_rec.length {
                return Ok(None);
            }
            let relative = off - glyf_rec.offset as usize;
            let slice = &self.data
                [glyf_rec.offset as usize..(glyf_rec.offset as usize + glyf_rec.length as usize)];
            let mut cur = std::io::Cursor::new(&slice[relative..]);

            let Ok(number_of_contours) = read_i16_be(&mut cur) else {
                return Ok(None);
            };
            if read_i16_be(&mut cur).is_err()
                || read_i16_be(&mut cur).is_err()
                || read_i16_be(&mut cur).is_err()
                || read_i16_be(&mut cur).is_err()
            {
                return Ok(None);
            }

            if number_of_contours < 0 {
                log::warn!("glyph {glyph_index} is a composite glyph; skipping");
                return Err(ferrous_font::GenError::InvalidShape(format!(
                    "glyph {glyph_index} is a composite glyph, which is not supported"
                )));
            }

            Ok(parse_simple_glyph_points(&mut cur, number_of_contours as usize, self.units_per_em))
        }

        /// Public API: per-contour on/off-curve points for one character's
        /// glyph, ready to hand to `ferrous_font::generate_msdf_for_glyph`.
        /// `Ok(None)` if the character has no mapped glyph at all;
        /// `Err(InvalidShape)` if the glyph is composite.
        pub fn get_glyph_contours(&self, c: char) -> Result<Option<Vec<Vec<RawPoint>>>, ferrous_font::GenError> {
            let idx = self.get_glyph_index(c);
            self.parse_glyph(idx)
        }

        fn read_u16_table_at(&self, tag: &[u8; 4], offset_in_table: usize) -> Option<u16> {
            let rec = self.tables.get(tag)?;
            let start = rec.offset as usize + offset_in_table;
            if start + 2 > self.data.len() {
                return None;
            }
            Some(u16::from_be_bytes([self.data[start], self.data[start + 1]]))
        }

        /// Normalized (by `unitsPerEm`) horizontal advance for the glyph
        /// mapped to `c`, read from `hhea`/`hmtx`. Falls back to `0.6` em
        /// (a reasonable average glyph width) if either table is absent,
        /// which happens for hand-built test fonts that omit them.
        pub fn get_glyph_advance(&self, c: char) -> f32 {
            let glyph_index = self.get_glyph_index(c);
            let num_h_metrics = match self.read_u16_table_at(b"hhea", 34) {
                Some(n) => n,
                None => return 0.6,
            };
            let metric_index = (glyph_index as u16).min(num_h_metrics.saturating_sub(1));
            match self.read_u16_table_at(b"hmtx", metric_index as usize * 4) {
                Some(advance) => advance as f32 / self.units_per_em.max(1) as f32,
                None => 0.6,
            }
        }
    }

    /// The rest of `parse_glyph`'s table walk, once the composite check has
    /// passed: end-points, flags (with repeat-run decoding), delta-coded
    /// coordinates, normalized into `RawPoint`s grouped by contour. `None`
    /// on any truncated/malformed read — not distinguished from "no glyph"
    /// by the caller, since there's nothing more specific to report.
    fn parse_simple_glyph_points(
        cur: &mut std::io::Cursor<&[u8]>,
        contour_count: usize,
        units_per_em: u16,
    ) -> Option<Vec<Vec<RawPoint>>> {
        let mut end_pts = Vec::with_capacity(contour_count);
        for _ in 0..contour_count {
            end_pts.push(read_u16_be(cur).ok()?);
        }
        let instruction_length = read_u16_be(cur).ok()? as usize;
        let _ = cur.seek(std::io::SeekFrom::Current(instruction_length as i64));

        let total_points = end_pts.last().map(|v| *v as usize + 1).unwrap_or(0);
        if total_points == 0 {
            return Some(Vec::new());
        }

        let mut flags: Vec<u8> = Vec::with_capacity(total_points);
        while flags.len() < total_points {
            let flag = {
                let mut buf = [0u8; 1];
                cur.read_exact(&mut buf).ok()?;
                buf[0]
            };
            flags.push(flag);
            if flag & 0x08 != 0 {
                // repeat
                let mut buf = [0u8; 1];
                cur.read_exact(&mut buf).ok()?;
                let count = buf[0] as usize;
                for _ in 0..count {
                    flags.push(flag);
                }
            }
        }

        let mut raw_x: Vec<i32> = Vec::with_capacity(total_points);
        let mut raw_y: Vec<i32> = Vec::with_capacity(total_points);
        let mut on_curve: Vec<bool> = Vec::with_capacity(total_points);
        let mut cur_x = 0i32;
        let mut cur_y = 0i32;
        for &flag in &flags {
            let dx = if flag & 0x02 != 0 {
                let mut buf = [0u8; 1];
                cur.read_exact(&mut buf).ok()?;
                let val = buf[0] as i32;
                if flag & 0x10 != 0 {
                    val
                } else {
                    -val
                }
            } else if flag & 0x10 != 0 {
                0
            } else {
                read_i16_be(cur).ok()? as i32
            };
            cur_x = cur_x.wrapping_add(dx);

            let dy = if flag & 0x04 != 0 {
                let mut buf = [0u8; 1];
                cur.read_exact(&mut buf).ok()?;
                let val = buf[0] as i32;
                if flag & 0x20 != 0 {
                    val
                } else {
                    -val
                }
            } else if flag & 0x20 != 0 {
                0
            } else {
                read_i16_be(cur).ok()? as i32
            };
            cur_y = cur_y.wrapping_add(dy);

            raw_x.push(cur_x);
            raw_y.push(cur_y);
            on_curve.push(flag & 0x01 != 0);
        }

        let scale = units_per_em.max(1) as f64;
        let mut contours = Vec::with_capacity(contour_count);
        let mut start_index = 0usize;
        for &end_pt in &end_pts {
            let end_index = end_pt as usize;
            if end_index < start_index || end_index >= raw_x.len() {
                break;
            }
            let points: Vec<RawPoint> = (start_index..=end_index)
                .map(|i| RawPoint::new(raw_x[i] as f64 / scale, raw_y[i] as f64 / scale, on_curve[i]))
                .collect();
            contours.push(points);
            start_index = end_index + 1;
        }
        Some(contours)
    }
}

pub use atlas::{FontAtlas, GlyphMetrics};

#[cfg(test)]
mod tests {
    use super::binary_reader::*;
    use super::font_parser::*;

    #[test]
    fn test_big_endian_reader() {
        let data = [0x12, 0x34, 0x56, 0x78];
        let mut cur = std::io::Cursor::new(&data);
        assert_eq!(read_u16_be(&mut cur).unwrap(), 0x1234);
        assert_eq!(read_u16_be(&mut cur).unwrap(), 0x5678);
        cur.set_position(0);
        assert_eq!(read_u32_be(&mut cur).unwrap(), 0x12345678);
    }

    /// Build a minimal font containing a cmap table mapping 'A' -> glyph 5,
    /// a head table with indexToLocFormat=0, and a tiny loca.
    fn build_minimal_font() -> Vec<u8> {
        let mut tables: Vec<([u8; 4], Vec<u8>)> = Vec::new();

        let mut cmap = Vec::new();
        cmap.extend(&0u16.to_be_bytes()); // version
        cmap.extend(&1u16.to_be_bytes()); // numSubtables
        let subtable_record_pos = cmap.len();
        cmap.extend(&3u16.to_be_bytes()); // platform
        cmap.extend(&1u16.to_be_bytes()); // encoding
        cmap.extend(&0u32.to_be_bytes()); // offset placeholder

        let fmt_start = cmap.len();
        cmap.extend(&4u16.to_be_bytes()); // format
        cmap.extend(&0u16.to_be_bytes()); // length placeholder
        cmap.extend(&0u16.to_be_bytes()); // language
        cmap.extend(&2u16.to_be_bytes()); // segCountX2
        cmap.extend(&0u16.to_be_bytes()); // searchRange
        cmap.extend(&0u16.to_be_bytes()); // entrySelector
        cmap.extend(&0u16.to_be_bytes()); // rangeShift
        cmap.extend(&('A' as u16).to_be_bytes()); // endCodes
        cmap.extend(&0u16.to_be_bytes()); // reservedPad
        cmap.extend(&('A' as u16).to_be_bytes()); // startCodes
        cmap.extend(&(-60i16).to_be_bytes()); // idDeltas
        cmap.extend(&0u16.to_be_bytes()); // idRangeOffsets

        let fmt_length = (cmap.len() - fmt_start) as u16;
        cmap[fmt_start + 2..fmt_start + 4].copy_from_slice(&fmt_length.to_be_bytes());
        let offset_val = fmt_start as u32;
        cmap[subtable_record_pos + 4..subtable_record_pos + 8]
            .copy_from_slice(&offset_val.to_be_bytes());

        tables.push((*b"cmap", cmap));

        let mut head = vec![0u8; 54];
        head[18..20].copy_from_slice(&1000u16.to_be_bytes());
        head[50..52].copy_from_slice(&0i16.to_be_bytes());
        tables.push((*b"head", head));

        let mut loca = Vec::new();
        loca.extend(&0u16.to_be_bytes());
        loca.extend(&2u16.to_be_bytes());
        tables.push((*b"loca", loca));

        assemble_font(tables)
    }

    fn assemble_font(tables: Vec<([u8; 4], Vec<u8>)>) -> Vec<u8> {
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
    fn test_font_parser_cmap() {
        let font = build_minimal_font();
        let parser = FontParser::new(font).expect("parser must succeed");
        if let Some(bytes) = parser.debug_cmap_bytes() {
            eprintln!("cmap bytes: {:?}", bytes);
        }
        assert_eq!(parser.get_glyph_index('A'), 5);
        assert_eq!(parser.get_glyph_index('B'), 0);
        assert!(parser.glyph_offset(0).is_none());
    }

    /// Build a tiny font with a single simple glyph (a square) and map 'A' to
    /// it.  The glyph index used will be 0 and we use indexToLocFormat=1 to
    /// make building the loca table easier.
    fn build_font_with_simple_glyph() -> Vec<u8> {
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
        glyf.extend(&1i16.to_be_bytes()); // numberOfContours
        glyf.extend(&0i16.to_be_bytes());
        glyf.extend(&0i16.to_be_bytes());
        glyf.extend(&100i16.to_be_bytes());
        glyf.extend(&100i16.to_be_bytes());
        glyf.extend(&3u16.to_be_bytes()); // endPtsOfContours[0] = 3
        glyf.extend(&0u16.to_be_bytes()); // instructionLength
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

        assemble_font(tables)
    }

    #[test]
    fn test_simple_glyph_contours() {
        let font = build_font_with_simple_glyph();
        let parser = FontParser::new(font).expect("parser must succeed");
        let contours = parser
            .get_glyph_contours('A')
            .expect("glyph must parse")
            .expect("char must map to a glyph");
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].len(), 4);
        assert!(contours[0].iter().all(|p| p.on_curve));
    }

    #[test]
    fn missing_hmtx_falls_back_to_default_advance() {
        let font = build_font_with_simple_glyph();
        let parser = FontParser::new(font).expect("parser must succeed");
        assert_eq!(parser.get_glyph_advance('A'), 0.6);
    }

    /// Same as `build_font_with_simple_glyph`, but the glyph's
    /// `numberOfContours` is negative, marking it composite.
    fn build_font_with_composite_glyph() -> Vec<u8> {
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
        glyf.extend(&(-1i16).to_be_bytes()); // numberOfContours: composite
        glyf.extend(&0i16.to_be_bytes());
        glyf.extend(&0i16.to_be_bytes());
        glyf.extend(&100i16.to_be_bytes());
        glyf.extend(&100i16.to_be_bytes());
        tables.push((*b"glyf", glyf));

        let mut loca = Vec::new();
        loca.extend(&0u32.to_be_bytes());
        let glyf_len = tables.iter().find(|(t, _)| t == b"glyf").unwrap().1.len() as u32;
        loca.extend(&glyf_len.to_be_bytes());
        tables.push((*b"loca", loca));

        assemble_font(tables)
    }

    #[test]
    fn composite_glyph_is_rejected_as_invalid_shape() {
        let font = build_font_with_composite_glyph();
        let parser = FontParser::new(font).expect("parser must succeed");
        let result = parser.get_glyph_contours('A');
        assert!(matches!(result, Err(ferrous_font::GenError::InvalidShape(_))));
    }
}
