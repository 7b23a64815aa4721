//! Locale-aware string ordering for table columns
//!
//! Values are compared on their base letters first (accents and case
//! folded away, punctuation before digits before letters) and only fall back
//! to the exact lowercase text when the base letters tie. This keeps
//! "Émile" next to "emile" instead of after "zoe".

use std::cmp::Ordering;

/// Compare two strings case-insensitively under a simple collation
pub fn compare_ignore_case(a: &str, b: &str) -> Ordering {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    compare(&a, &b)
}

/// Compare two strings under the collation without case folding
pub fn compare(a: &str, b: &str) -> Ordering {
    let primary = primary_weights(a).cmp(primary_weights(b));
    primary.then_with(|| a.cmp(b))
}

fn primary_weights(s: &str) -> impl Iterator<Item = (u8, char)> + '_ {
    s.chars().flat_map(|c| {
        let (first, second) = fold(c);
        std::iter::once(first).chain(second).map(|base| (class(base), base))
    })
}

fn class(c: char) -> u8 {
    if c.is_numeric() {
        1
    } else if c.is_alphabetic() {
        2
    } else {
        0
    }
}

/// Map a lowercase character to its base letter(s)
fn fold(c: char) -> (char, Option<char>) {
    let base = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => 'c',
        'ď' | 'đ' => 'd',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => 'e',
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => 'g',
        'ĥ' | 'ħ' => 'h',
        'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => 'i',
        'ĵ' => 'j',
        'ķ' => 'k',
        'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => 'l',
        'ñ' | 'ń' | 'ņ' | 'ň' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => 'o',
        'ŕ' | 'ŗ' | 'ř' => 'r',
        'ś' | 'ŝ' | 'ş' | 'š' => 's',
        'ţ' | 'ť' | 'ŧ' => 't',
        'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => 'u',
        'ŵ' => 'w',
        'ý' | 'ÿ' | 'ŷ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        'ß' => return ('s', Some('s')),
        'æ' => return ('a', Some('e')),
        'œ' => return ('o', Some('e')),
        other => other,
    };
    (base, None)
}
