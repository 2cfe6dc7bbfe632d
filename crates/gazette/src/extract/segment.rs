use unicode_segmentation::UnicodeSegmentation;

pub trait SentenceSegmenter: Send + Sync {
    fn split(&self, text: &str) -> Vec<String>;
}

/// Titles and honorifics that end in a period without ending the sentence.
const ABBREVIATIONS: &[&str] = &[
    "M", "MM", "Mr", "Mrs", "Ms", "Mme", "Mmes", "Mlle", "Me", "Dr", "Prof", "St", "Ste", "Sr",
    "Jr", "Art", "Dhr", "Mevr", "Hr", "Fr",
];

/// UAX #29 sentence boundaries, with a boundary after a known title or a
/// single capital initial ("M. Dupont", "J. Peeters") taken back.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeSentences;

impl UnicodeSentences {
    pub fn new() -> Self {
        Self
    }
}

impl SentenceSegmenter for UnicodeSentences {
    fn split(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut pending = String::new();

        for fragment in text.unicode_sentences().map(str::trim) {
            if fragment.is_empty() {
                continue;
            }
            if !pending.is_empty() {
                pending.push(' ');
            }
            pending.push_str(fragment);

            if !ends_with_abbreviation(&pending) {
                sentences.push(std::mem::take(&mut pending));
            }
        }

        if !pending.is_empty() {
            sentences.push(pending);
        }
        sentences
    }
}

fn ends_with_abbreviation(fragment: &str) -> bool {
    let head = match fragment.strip_suffix('.') {
        Some(head) => head,
        None => return false,
    };
    let token = head
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or("")
        .trim_start_matches(|c: char| !c.is_alphanumeric());

    let mut chars = token.chars();
    let single_initial = matches!((chars.next(), chars.next()), (Some(c), None) if c.is_uppercase());
    single_initial || ABBREVIATIONS.contains(&token)
}
