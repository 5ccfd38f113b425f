//! Case- and accent-insensitive GLOB patterns for fuzzy text search.

/// Build a GLOB pattern that matches `query` anywhere in a value, ignoring case and
/// common accents. Works with any Unicode input.
///
/// ```ignore
/// assert_eq!(build_case_insensitive_glob_pattern("cat"), "*[cCçÇĆ-čƆ-ƈȻȼɔḈḉ][aA...][tT...]*");
/// assert_eq!(build_case_insensitive_glob_pattern(""), "*");
/// ```
pub fn build_case_insensitive_glob_pattern(query: &str) -> String {
    if query.is_empty() {
        return "*".to_string();
    }

    let mut pattern = String::with_capacity(query.len() * 8 + 2);
    pattern.push('*');
    for ch in query.chars() {
        let lower: String = ch.to_lowercase().collect();
        let upper: String = ch.to_uppercase().collect();
        let accents = accented_charset(&lower);

        // Caseless characters match themselves. Outside a class only `*`, `?` and `[`
        // are special, and each of them is literal as the sole member of a class.
        if lower == upper && accents.is_empty() {
            match ch {
                '*' | '?' | '[' => {
                    pattern.push('[');
                    pattern.push(ch);
                    pattern.push(']');
                }
                _ => pattern.push(ch),
            }
            continue;
        }

        pattern.push('[');
        pattern.push_str(&lower);
        if upper != lower {
            pattern.push_str(&upper);
        }
        pattern.push_str(accents);
        pattern.push(']');
    }
    pattern.push('*');
    pattern
}

/// GLOB character-class contents covering accented variants of a lowercase letter.
///
/// Returns `""` for characters without a known accent family.
pub fn accented_charset(lower: &str) -> &'static str {
    match lower {
        "a" => "À-Åà-åĀ-ąǍǎǞ-ǡǺ-ǻȀ-ȃȦȧȺɐ-ɒḀḁẚẠ-ặ",
        "b" => "ßƀ-ƅɃɓḂ-ḇ",
        "c" => "çÇĆ-čƆ-ƈȻȼɔḈḉ",
        "d" => "ÐðĎ-đƉ-ƍȡɖɗḊ-ḓ",
        "e" => "È-Ëè-ëĒ-ěƎ-ƐǝȄ-ȇȨȩɆɇɘ-ɞḔ-ḝẸ-ệ",
        "f" => "ƑƒḞḟ",
        "g" => "Ĝ-ģƓǤ-ǧǴǵḠḡ",
        "h" => "Ĥ-ħƕǶȞȟḢ-ḫẖ",
        "i" => "Ì-Ïì-ïĨ-ıƖƗǏǐȈ-ȋɨɪḬ-ḯỈ-ị",
        "j" => "ĴĵǰȷɈɉɟ",
        "k" => "Ķ-ĸƘƙǨǩḰ-ḵ",
        "l" => "Ĺ-łƚȴȽɫ-ɭḶ-ḽ",
        "m" => "Ɯɯ-ɱḾ-ṃ",
        "n" => "ÑñŃ-ŋƝƞǸǹȠȵɲ-ɴṄ-ṋ",
        "o" => "Ò-ÖØò-öøŌ-őƟ-ơǑǒǪ-ǭǾǿȌ-ȏȪ-ȱṌ-ṓỌ-ợ",
        "p" => "ƤƥṔ-ṗ",
        "r" => "Ŕ-řƦȐ-ȓɌɍṘ-ṟ",
        "s" => "Ś-šƧƨȘșȿṠ-ṩ",
        "t" => "Ţ-ŧƫ-ƮȚțȾṪ-ṱẗ",
        "u" => "Ù-Üù-üŨ-ųƯ-ƱǓ-ǜȔ-ȗɄṲ-ṻỤ-ự",
        "v" => "ƲɅṼ-ṿ",
        "w" => "ŴŵẀ-ẉẘ",
        "x" => "Ẋ-ẍ",
        "y" => "ÝýÿŶ-ŸƔƳƴȲȳɎɏẎẏỲ-ỹỾỿẙ",
        "z" => "Ź-žƵƶɀẐ-ẕ",
        "α" => "\u{0386}\u{0391}\u{03AC}\u{03B1}\u{1F00}-\u{1F0F}\u{1F70}\u{1F71}\u{1F80}-\u{1F8F}\u{1FB0}-\u{1FB4}\u{1FB6}-\u{1FBC}",
        "ε" => "\u{0388}\u{0395}\u{03AD}\u{03B5}\u{1F10}-\u{1F15}\u{1F18}-\u{1F1D}\u{1F72}\u{1F73}\u{1FC8}\u{1FC9}",
        "η" => "\u{0389}\u{0397}\u{03AE}\u{03B7}\u{1F20}-\u{1F2F}\u{1F74}\u{1F75}\u{1F90}-\u{1F9F}\u{1FC2}\u{1FC3}\u{1FC4}\u{1FC6}\u{1FC7}\u{1FCA}\u{1FCB}\u{1FCC}",
        "ι" => "\u{038A}\u{0390}\u{0399}\u{03AA}\u{03AF}\u{03B9}\u{03CA}\u{1F30}-\u{1F3F}\u{1F76}\u{1F77}\u{1FD0}-\u{1FD3}\u{1FD6}-\u{1FDB}",
        "ο" => "\u{038C}\u{039F}\u{03BF}\u{03CC}\u{1F40}-\u{1F45}\u{1F48}-\u{1F4D}\u{1F78}\u{1F79}\u{1FF8}\u{1FF9}",
        "σ" | "ς" => "\u{03A3}\u{03C2}\u{03C3}",
        "υ" => "\u{038E}\u{03A5}\u{03AB}\u{03C5}\u{03CB}\u{03CD}\u{1F50}-\u{1F57}\u{1F59}\u{1F5B}\u{1F5D}\u{1F5F}\u{1F7A}\u{1F7B}\u{1FE0}-\u{1FE3}\u{1FE6}-\u{1FEB}",
        "ω" => "\u{038F}\u{03A9}\u{03C9}\u{03CE}\u{1F60}-\u{1F6F}\u{1F7C}\u{1F7D}\u{1FA0}-\u{1FAF}\u{1FF2}-\u{1FF4}\u{1FF6}\u{1FF7}\u{1FFA}-\u{1FFC}",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_matches_everything() {
        assert_eq!(build_case_insensitive_glob_pattern(""), "*");
    }

    #[test]
    fn letters_without_accents() {
        assert_eq!(build_case_insensitive_glob_pattern("q1"), "*[qQ]1*");
    }

    #[test]
    fn class_metacharacters_match_literally() {
        assert_eq!(build_case_insensitive_glob_pattern("^"), "*^*");
        assert_eq!(build_case_insensitive_glob_pattern("]"), "*]*");
        assert_eq!(build_case_insensitive_glob_pattern("-"), "*-*");
        assert_eq!(
            build_case_insensitive_glob_pattern("a*?["),
            format!("*[aA{}][*][?][[]*", accented_charset("a"))
        );
    }

    #[test]
    fn includes_accent_family() {
        let pattern = build_case_insensitive_glob_pattern("A");
        assert_eq!(pattern, format!("*[aA{}]*", accented_charset("a")));
    }

    #[test]
    fn greek_sigma_forms_share_charset() {
        assert_eq!(accented_charset("σ"), accented_charset("ς"));
        assert!(build_case_insensitive_glob_pattern("Σ").starts_with("*[σΣ"));
    }
}
