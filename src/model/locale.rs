//! Locale detection and the Cyrillic to Latin transliteration used to derive the second text table.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locale {
    En,
    Ru,
}

impl Locale {
    pub const fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ru => "ru",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Locale::En),
            "ru" => Some(Locale::Ru),
            _ => None,
        }
    }

    /// Classifies a text table by the share of characters outside of ASCII.
    pub fn detect<'a, I>(texts: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let (mut high, mut low) = (0usize, 0usize);
        for ch in texts.into_iter().flat_map(str::chars) {
            if (ch as u32) < 128 {
                low += 1;
            } else {
                high += 1;
            }
        }
        if low > high { Locale::En } else { Locale::Ru }
    }

    /// The locale derived from this one by transliteration.
    pub const fn secondary(&self) -> Self {
        match self {
            Locale::En => Locale::Ru,
            Locale::Ru => Locale::En,
        }
    }
}

const CYRILLIC_TO_LATIN: [(char, &str); 33] = [
    ('а', "a"),
    ('б', "b"),
    ('в', "v"),
    ('г', "g"),
    ('д', "d"),
    ('е', "e"),
    ('ё', "e"),
    ('ж', "zh"),
    ('з', "z"),
    ('и', "i"),
    ('й', "y"),
    ('к', "k"),
    ('л', "l"),
    ('м', "m"),
    ('н', "n"),
    ('о', "o"),
    ('п', "p"),
    ('р', "r"),
    ('с', "s"),
    ('т', "t"),
    ('у', "u"),
    ('ф', "f"),
    ('х', "kh"),
    ('ц', "ts"),
    ('ч', "ch"),
    ('ш', "sh"),
    ('щ', "shch"),
    ('ъ', ""),
    ('ы', "y"),
    ('ь', ""),
    ('э', "e"),
    ('ю', "yu"),
    ('я', "ya"),
];

fn latin_for(ch: char) -> Option<&'static str> {
    CYRILLIC_TO_LATIN
        .iter()
        .find(|(cyrillic, _)| *cyrillic == ch)
        .map(|(_, latin)| *latin)
}

/// Transliterates Cyrillic letters, keeping the case of the first letter of each replacement.
/// Characters without a mapping are copied unchanged.
pub fn transliterate(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        let lower = ch.to_lowercase().next().unwrap_or(ch);
        match latin_for(lower) {
            Some(latin) if lower != ch => {
                let mut letters = latin.chars();
                if let Some(first) = letters.next() {
                    out.extend(first.to_uppercase());
                    out.extend(letters);
                }
            }
            Some(latin) => out.push_str(latin),
            None => out.push(ch),
        }
    }
    out
}

#[test]
fn detect_test() {
    assert_eq!(Locale::detect(["Moscow", "Red line"]), Locale::En);
    assert_eq!(Locale::detect(["Москва", "Red"]), Locale::Ru);
    // A tie goes to the non-Latin table
    assert_eq!(Locale::detect(["ab", "юя"]), Locale::Ru);
    assert_eq!(Locale::detect(Vec::<&str>::new()), Locale::Ru);
}

#[test]
fn transliterate_test() {
    assert_eq!(transliterate("Москва"), "Moskva");
    assert_eq!(transliterate("Щукинская"), "Shchukinskaya");
    assert_eq!(transliterate("Площадь Ильича"), "Ploshchad Ilicha");
    assert_eq!(transliterate("Line 1"), "Line 1");
}

#[test]
fn code_test() {
    assert_eq!(Locale::from_code("RU"), Some(Locale::Ru));
    assert_eq!(Locale::from_code("de"), None);
    assert_eq!(Locale::En.code(), "en");
    assert_eq!(Locale::En.secondary(), Locale::Ru);
}
