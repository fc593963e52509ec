use crate::segment::Chunk;
use crate::{CantilenaError, Result};

/// Phoneme symbols treated as vowels, including diphthongs and the syllabic
/// consonant marker `r=`. Symbols outside this set are consonants by
/// default; that leniency is the intended classification, not a gap.
pub const VOWELS: [&str; 26] = [
    "a", "a:", "aI", "aU", "e", "e:", "E", "i", "i:", "I", "?I", "o", "O", "OY", "u", "u:", "U",
    "?U", "M", "V", "@", "@U", "3:", "6", "{", "r=",
];

/// Whether a phoneme symbol belongs to the fixed vowel inventory.
pub fn is_vowel(symbol: &str) -> bool {
    VOWELS.contains(&symbol)
}

/// One point of a phoneme's pitch contour. `time` is a percentage of the
/// phoneme's duration; `frequency` is a percentage of the phonemizer's
/// reference pitch until [`crate::align`] rescales it to Hertz.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContourPoint {
    pub time: f64,
    pub frequency: f64,
}

/// A phoneme as emitted by the phonemizer: symbol, natural spoken duration,
/// and normalized pitch contour. Immutable once parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct PhonemeToken {
    pub symbol: String,
    pub duration_ms: f64,
    pub contour: Vec<ContourPoint>,
}

/// A maximal run of tokens between two silence markers, additionally closed
/// after every vowel token.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyllableGroup {
    pub tokens: Vec<PhonemeToken>,
}

/// Parses the phonemizer's line-oriented output into syllable groups.
///
/// A line whose first field is `_` is a silence marker: it closes the
/// current group (when non-empty, so runs of silence never yield empty
/// groups). Any other line is `<symbol> <duration_ms> [<time%> <freq%>]*`.
/// A vowel always terminates its group, even without a silence marker.
/// Blank lines are skipped.
pub fn parse_groups(raw: &str) -> Result<Vec<SyllableGroup>> {
    let mut groups = Vec::new();
    let mut current = SyllableGroup::default();
    let mut last_was_vowel = false;

    for line in raw.lines() {
        let mut fields = line.split_whitespace();
        let Some(symbol) = fields.next() else {
            continue;
        };
        if symbol == "_" {
            if !current.tokens.is_empty() {
                groups.push(std::mem::take(&mut current));
            }
            last_was_vowel = false;
            continue;
        }

        let duration_ms = parse_field(line, fields.next(), "duration")?;
        let rest: Vec<&str> = fields.collect();
        if rest.len() % 2 != 0 {
            return Err(CantilenaError::PhonemeLine {
                line: line.to_string(),
                reason: "odd number of contour fields".to_string(),
            });
        }
        let mut contour = Vec::with_capacity(rest.len() / 2);
        for pair in rest.chunks_exact(2) {
            contour.push(ContourPoint {
                time: parse_field(line, Some(pair[0]), "contour time")?,
                frequency: parse_field(line, Some(pair[1]), "contour frequency")?,
            });
        }

        if last_was_vowel {
            groups.push(std::mem::take(&mut current));
        }
        last_was_vowel = is_vowel(symbol);
        current.tokens.push(PhonemeToken {
            symbol: symbol.to_string(),
            duration_ms,
            contour,
        });
    }

    if !current.tokens.is_empty() {
        groups.push(current);
    }
    Ok(groups)
}

fn parse_field(line: &str, field: Option<&str>, what: &str) -> Result<f64> {
    let field = field.ok_or_else(|| CantilenaError::PhonemeLine {
        line: line.to_string(),
        reason: format!("missing {what}"),
    })?;
    field.parse().map_err(|_| CantilenaError::PhonemeLine {
        line: line.to_string(),
        reason: format!("unparsable {what} `{field}`"),
    })
}

/// Assigns one syllable group to each sung chunk, in order. Fails when the
/// phonemizer produced fewer groups than the score has syllables; surplus
/// groups are ignored.
pub fn distribute(chunks: &mut [Chunk], groups: Vec<SyllableGroup>) -> Result<()> {
    let required = chunks
        .iter()
        .filter(|chunk| matches!(chunk, Chunk::Sung { .. }))
        .count();
    if groups.len() < required {
        return Err(CantilenaError::PhonemeShortfall {
            required,
            available: groups.len(),
        });
    }

    let sung = chunks.iter_mut().filter_map(|chunk| match chunk {
        Chunk::Sung { phonemes, .. } => Some(phonemes),
        _ => None,
    });
    for (phonemes, group) in sung.zip(groups) {
        *phonemes = group.tokens;
    }
    Ok(())
}

/// Symbol used when a later portion of a split phoneme sustains into the
/// next note. Only the first fragment carries the full articulatory
/// identity; the continuation keeps the base quality (a diphthong sustains
/// its off-glide, a length mark survives).
pub fn continuation_symbol(symbol: &str) -> &str {
    match symbol {
        "aI" | "?I" => "I",
        "aU" | "?U" | "@U" => "U",
        "OY" => "Y",
        "r=" => "r",
        _ if is_vowel(symbol) => symbol,
        _ => trailing_core(symbol),
    }
}

/// Fallback for symbols outside the vowel inventory: the last core letter
/// (`a-z`, `A-Z`, `{`, `3`, `@`) plus an optional trailing `:`. Symbols with
/// no core letter are kept as they are.
fn trailing_core(symbol: &str) -> &str {
    let bytes = symbol.as_bytes();
    let mut core = None;
    for (index, &byte) in bytes.iter().enumerate() {
        if byte.is_ascii_alphabetic() || byte == b'{' || byte == b'3' || byte == b'@' {
            core = Some(index);
        }
    }
    match core {
        Some(index) => {
            let end = if bytes.get(index + 1) == Some(&b':') {
                index + 2
            } else {
                index + 1
            };
            &symbol[index..end]
        }
        None => symbol,
    }
}
