//! Block-letter banner font for the folio hero section.
//!
//! Glyphs are 5 rows tall. Each `#` in a pattern becomes two full blocks so
//! letters keep a roughly square aspect on terminal cells.

/// Height of every glyph in rows.
pub const GLYPH_HEIGHT: usize = 5;

const FILLED: &str = "██";
const EMPTY: &str = "  ";

/// Glyph patterns, `#` for filled and `.` for empty.
fn pattern(ch: char) -> Option<[&'static str; GLYPH_HEIGHT]> {
    let p = match ch {
        'A' => [".###.", "#...#", "#####", "#...#", "#...#"],
        'B' => ["####.", "#...#", "####.", "#...#", "####."],
        'C' => [".####", "#....", "#....", "#....", ".####"],
        'D' => ["####.", "#...#", "#...#", "#...#", "####."],
        'E' => ["#####", "#....", "####.", "#....", "#####"],
        'F' => ["#####", "#....", "####.", "#....", "#...."],
        'G' => [".####", "#....", "#..##", "#...#", ".###."],
        'H' => ["#...#", "#...#", "#####", "#...#", "#...#"],
        'I' => ["###", ".#.", ".#.", ".#.", "###"],
        'J' => ["..###", "...#.", "...#.", "#..#.", ".##.."],
        'K' => ["#...#", "#..#.", "###..", "#..#.", "#...#"],
        'L' => ["#....", "#....", "#....", "#....", "#####"],
        'M' => ["#...#", "##.##", "#.#.#", "#...#", "#...#"],
        'N' => ["#...#", "##..#", "#.#.#", "#..##", "#...#"],
        'O' => [".###.", "#...#", "#...#", "#...#", ".###."],
        'P' => ["####.", "#...#", "####.", "#....", "#...."],
        'Q' => [".###.", "#...#", "#.#.#", "#..#.", ".##.#"],
        'R' => ["####.", "#...#", "####.", "#..#.", "#...#"],
        'S' => [".####", "#....", ".###.", "....#", "####."],
        'T' => ["#####", "..#..", "..#..", "..#..", "..#.."],
        'U' => ["#...#", "#...#", "#...#", "#...#", ".###."],
        'V' => ["#...#", "#...#", "#...#", ".#.#.", "..#.."],
        'W' => ["#...#", "#...#", "#.#.#", "##.##", "#...#"],
        'X' => ["#...#", ".#.#.", "..#..", ".#.#.", "#...#"],
        'Y' => ["#...#", ".#.#.", "..#..", "..#..", "..#.."],
        'Z' => ["#####", "...#.", "..#..", ".#...", "#####"],
        '0' => [".###.", "#..##", "#.#.#", "##..#", ".###."],
        '1' => [".#.", "##.", ".#.", ".#.", "###"],
        '2' => ["####.", "....#", ".###.", "#....", "#####"],
        '3' => ["####.", "....#", ".###.", "....#", "####."],
        '4' => ["#...#", "#...#", "#####", "....#", "....#"],
        '5' => ["#####", "#....", "####.", "....#", "####."],
        '6' => [".###.", "#....", "####.", "#...#", ".###."],
        '7' => ["#####", "....#", "...#.", "..#..", "..#.."],
        '8' => [".###.", "#...#", ".###.", "#...#", ".###."],
        '9' => [".###.", "#...#", ".####", "....#", ".###."],
        '-' => ["...", "...", "###", "...", "..."],
        '.' => [".", ".", ".", ".", "#"],
        '!' => ["#", "#", "#", ".", "#"],
        '\'' => ["#", "#", ".", ".", "."],
        ' ' => ["..", "..", "..", "..", ".."],
        _ => return None,
    };
    Some(p)
}

/// Render one glyph row into blocks.
fn render_row(row: &str) -> String {
    row.chars()
        .map(|c| if c == '#' { FILLED } else { EMPTY })
        .collect()
}

/// Build a block-letter banner for `text`.
///
/// Letters are upper-cased; characters without a glyph are skipped. Glyphs
/// are separated by one empty column.
///
/// # Returns
/// A vector of [`GLYPH_HEIGHT`] strings, or an empty vector when nothing in
/// `text` can be drawn.
pub fn build_banner(text: &str) -> Vec<String> {
    let glyphs: Vec<_> = text
        .chars()
        .flat_map(char::to_uppercase)
        .filter_map(pattern)
        .collect();
    if glyphs.is_empty() {
        return Vec::new();
    }

    let mut lines = Vec::with_capacity(GLYPH_HEIGHT);
    for row in 0..GLYPH_HEIGHT {
        let line = glyphs
            .iter()
            .map(|g| render_row(g[row]))
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(line);
    }
    lines
}

/// Largest-to-smallest attempt to fit `text` into `max_width` columns:
/// the full banner, then the first word only.
pub fn fit_banner(text: &str, max_width: usize) -> Vec<String> {
    let full = build_banner(text);
    if full.first().is_some_and(|l| l.chars().count() <= max_width) {
        return full;
    }
    let first = text.split_whitespace().next().unwrap_or_default();
    let short = build_banner(first);
    if short.first().is_some_and(|l| l.chars().count() <= max_width) {
        return short;
    }
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_glyph_row_has_uniform_width() {
        let chars = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789-.!' ";
        for ch in chars.chars() {
            let p = pattern(ch).expect("glyph");
            let w = p[0].len();
            assert!(p.iter().all(|r| r.len() == w), "glyph {ch:?}");
        }
    }

    #[test]
    fn test_banner_dimensions() {
        let lines = build_banner("Hi");
        assert_eq!(lines.len(), GLYPH_HEIGHT);
        // H is 5 wide, I is 3 wide, doubled, plus one separator.
        assert_eq!(lines[0].chars().count(), 10 + 1 + 6);
    }

    #[test]
    fn test_lowercase_and_unknown_chars() {
        assert_eq!(build_banner("ok"), build_banner("OK"));
        assert_eq!(build_banner("O~K"), build_banner("OK"));
        assert!(build_banner("~~").is_empty());
    }

    #[test]
    fn test_fit_banner_falls_back_to_first_word() {
        let full = build_banner("Ada Lovelace")[0].chars().count();
        assert_eq!(fit_banner("Ada Lovelace", full), build_banner("Ada Lovelace"));
        assert_eq!(fit_banner("Ada Lovelace", full - 1), build_banner("Ada"));
        assert!(fit_banner("Ada Lovelace", 3).is_empty());
    }
}
