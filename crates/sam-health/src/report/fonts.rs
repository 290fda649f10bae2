//! Metrics and encoding for the two standard Type1 fonts the report uses.
//!
//! Standard fonts are not embedded, so widths come from the Adobe core font
//! metrics and text is written in WinAnsiEncoding.

use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Font {
    Regular,
    Bold,
}

impl Font {
    pub(crate) const fn resource(self) -> &'static str {
        match self {
            Self::Regular => "F1",
            Self::Bold => "F2",
        }
    }

    pub(crate) const fn base_font(self) -> &'static str {
        match self {
            Self::Regular => "Helvetica",
            Self::Bold => "Helvetica-Bold",
        }
    }
}

/// Glyph widths for `' '..='~'` in thousandths of the font size.
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

fn glyph_width(font: Font, ch: char) -> u16 {
    if (' '..='~').contains(&ch) {
        let index = ch as usize - ' ' as usize;
        return match font {
            Font::Regular => HELVETICA[index],
            Font::Bold => HELVETICA_BOLD[index],
        };
    }

    match (font, ch) {
        (_, '\u{a0}') => 278,
        (Font::Regular, 'Ä') => 667,
        (Font::Bold, 'Ä') => 722,
        (_, 'Ö') => 778,
        (_, 'Ü') => 722,
        (_, 'ä' | 'é' | 'è' | 'à' | '€' | '–') => 556,
        (Font::Regular, 'ö' | 'ü') => 556,
        (Font::Bold, 'ö' | 'ü') => 611,
        (_, 'ß') => 611,
        (_, '•') => 350,
        (_, '—') => 1000,
        _ => 556,
    }
}

/// Width of `text` in points when set at `size` points.
pub(crate) fn text_width_pt(text: &str, font: Font, size: f64) -> f64 {
    let units: u32 = text.chars().map(|ch| u32::from(glyph_width(font, ch))).sum();
    f64::from(units) * size / 1000.0
}

/// Splits `text` into lines no wider than `max_width_pt`. Words longer than
/// a line are kept whole on their own line.
pub(crate) fn wrap(text: &str, font: Font, size: f64, max_width_pt: f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate = format!("{current} {word}");
        if text_width_pt(&candidate, font, size) <= max_width_pt {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

fn win_ansi_byte(ch: char) -> u8 {
    match ch {
        ' '..='~' => ch as u8,
        '\u{a0}'..='\u{ff}' => ch as u32 as u8,
        '€' => 0x80,
        '‚' => 0x82,
        '„' => 0x84,
        '…' => 0x85,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        _ => b'?',
    }
}

/// Encodes `text` as a PDF literal string in WinAnsiEncoding. Bytes outside
/// printable ASCII are written as octal escapes so content streams stay ASCII.
pub(crate) fn literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('(');
    for byte in text.chars().map(win_ansi_byte) {
        match byte {
            b'(' | b')' | b'\\' => {
                out.push('\\');
                out.push(byte as char);
            }
            0x20..=0x7e => out.push(byte as char),
            _ => {
                let _ = write!(out, "\\{byte:03o}");
            }
        }
    }
    out.push(')');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measures_ascii_with_afm_widths() {
        // H=722 e=556 l=222 l=222 o=556
        assert!((text_width_pt("Hello", Font::Regular, 10.0) - 22.78).abs() < 1e-9);
        assert!(text_width_pt("Hello", Font::Bold, 10.0) > text_width_pt("Hello", Font::Regular, 10.0));
    }

    #[test]
    fn encodes_umlauts_and_euro_as_octal() {
        assert_eq!(literal("für"), "(f\\374r)");
        assert_eq!(literal("700\u{a0}€"), "(700\\240\\200)");
        assert_eq!(literal("a (b) \\"), "(a \\(b\\) \\\\)");
        assert_eq!(literal("✓"), "(?)");
    }

    #[test]
    fn wraps_on_word_boundaries() {
        let lines = wrap(
            "Vereinbaren Sie jetzt ein kostenloses Erstgespräch.",
            Font::Regular,
            10.0,
            120.0,
        );

        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width_pt(line, Font::Regular, 10.0) <= 120.0);
        }
        assert_eq!(
            lines.join(" "),
            "Vereinbaren Sie jetzt ein kostenloses Erstgespräch."
        );
    }

    #[test]
    fn wrapping_empty_text_yields_one_empty_line() {
        assert_eq!(wrap("", Font::Bold, 10.0, 50.0), vec![String::new()]);
    }
}
