/// Irregular verb forms mapped to their base form.
fn irregular_verb(word: &str) -> Option<&'static str> {
    let base = match word {
        "was" | "were" | "been" | "am" | "is" | "are" => "be",
        "had" | "has" => "have",
        "did" | "does" | "done" => "do",
        "went" | "gone" | "goes" => "go",
        "came" | "come" => "come",
        "saw" | "seen" => "see",
        "took" | "taken" => "take",
        "made" => "make",
        "got" | "gotten" => "get",
        "said" => "say",
        "knew" | "known" => "know",
        "thought" => "think",
        "found" => "find",
        "gave" | "given" => "give",
        "told" => "tell",
        "felt" => "feel",
        "became" => "become",
        "left" => "leave",
        "brought" => "bring",
        "began" | "begun" => "begin",
        "kept" => "keep",
        "held" => "hold",
        "wrote" | "written" => "write",
        "stood" => "stand",
        "heard" => "hear",
        "let" => "let",
        "meant" => "mean",
        "set" => "set",
        "met" => "meet",
        "ran" => "run",
        "paid" => "pay",
        "sat" => "sit",
        "spoke" | "spoken" => "speak",
        "lay" => "lie",
        "led" => "lead",
        "read" => "read",
        "grew" | "grown" => "grow",
        "lost" => "lose",
        "fell" | "fallen" => "fall",
        "sent" => "send",
        "built" => "build",
        "spent" => "spend",
        "won" => "win",
        "wore" | "worn" => "wear",
        "broke" | "broken" => "break",
        "chose" | "chosen" => "choose",
        "drew" | "drawn" => "draw",
        "drove" | "driven" => "drive",
        "ate" | "eaten" => "eat",
        "flew" | "flown" => "fly",
        "forgot" | "forgotten" => "forget",
        "froze" | "frozen" => "freeze",
        "hid" | "hidden" => "hide",
        "rode" | "ridden" => "ride",
        "rose" | "risen" => "rise",
        "sang" | "sung" => "sing",
        "sank" | "sunk" => "sink",
        "slept" => "sleep",
        "stole" | "stolen" => "steal",
        "swam" | "swum" => "swim",
        "threw" | "thrown" => "throw",
        "woke" | "woken" => "wake",
        _ => return None,
    };
    Some(base)
}

/// Irregular plural nouns mapped to their singular.
fn irregular_noun(word: &str) -> Option<&'static str> {
    let base = match word {
        "children" => "child",
        "men" => "man",
        "women" => "woman",
        "feet" => "foot",
        "teeth" => "tooth",
        "geese" => "goose",
        "mice" => "mouse",
        "people" => "person",
        "leaves" => "leaf",
        "lives" => "life",
        "knives" => "knife",
        "wives" => "wife",
        "selves" => "self",
        "halves" => "half",
        "wolves" => "wolf",
        "thieves" => "thief",
        "shelves" => "shelf",
        "loaves" => "loaf",
        "potatoes" => "potato",
        "tomatoes" => "tomato",
        "heroes" => "hero",
        "echoes" => "echo",
        "vetoes" => "veto",
        "criteria" => "criterion",
        "phenomena" => "phenomenon",
        "analyses" => "analysis",
        "theses" => "thesis",
        "hypotheses" => "hypothesis",
        "crises" => "crisis",
        "bases" => "basis",
        "axes" => "axis",
        "indices" => "index",
        "appendices" => "appendix",
        _ => return None,
    };
    Some(base)
}

/// `-ves` plurals whose singular ends in a bare `f` rather than `fe`.
const F_STEMS: [&str; 10] = [
    "lea", "li", "kni", "wi", "sel", "hal", "wol", "thie", "shel", "loa",
];

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Last two characters equal and not a vowel ("runn", "stopp").
fn ends_with_doubled_consonant(word: &str) -> bool {
    let mut chars = word.chars().rev();
    match (chars.next(), chars.next()) {
        (Some(a), Some(b)) => a == b && !is_vowel(a),
        _ => false,
    }
}

/// Normalized base form of an English word.
///
/// Total and pure: any input produces a lowercase output, unknown shapes
/// fall through unchanged. Rules apply in strict priority order; once one
/// matches, no later rule runs.
pub fn lemma(word: &str) -> String {
    let lower = word.to_lowercase();

    if let Some(base) = irregular_verb(&lower) {
        return base.to_string();
    }

    if let Some(base) = irregular_noun(&lower) {
        return base.to_string();
    }

    // Suffix rules assume single-byte characters; anything else is left as-is.
    if !lower.is_ascii() {
        return lower;
    }

    let n = lower.len();

    if lower.ends_with("ies") && n > 4 {
        return format!("{}y", &lower[..n - 3]);
    }

    if lower.ends_with("ves") && n > 4 {
        let base = &lower[..n - 3];
        if F_STEMS.contains(&base) {
            return format!("{base}f");
        }
        return format!("{base}fe");
    }

    if lower.ends_with("es") && n > 3 {
        let base = &lower[..n - 2];
        if base.ends_with("ss")
            || base.ends_with("sh")
            || base.ends_with("ch")
            || base.ends_with('x')
            || base.ends_with('z')
        {
            return base.to_string();
        }
        if base.ends_with('i') {
            return format!("{}y", &base[..base.len() - 1]);
        }
        return lower[..n - 1].to_string();
    }

    if lower.ends_with('s') && n > 2 && !lower.ends_with("ss") {
        return lower[..n - 1].to_string();
    }

    if lower.ends_with("ing") && n > 4 {
        let base = &lower[..n - 3];
        if base.ends_with('e') {
            return base.to_string();
        }
        if ends_with_doubled_consonant(base) && base.len() > 2 {
            return base[..base.len() - 1].to_string();
        }
        return format!("{base}e");
    }

    if lower.ends_with("ed") && n > 3 {
        let base = &lower[..n - 2];
        if base.ends_with('i') {
            return format!("{}y", &base[..base.len() - 1]);
        }
        if ends_with_doubled_consonant(base) && base.len() > 2 {
            return base[..base.len() - 1].to_string();
        }
        if !base.ends_with('e') {
            return format!("{base}e");
        }
        return base.to_string();
    }

    // Comparative/superlative: strip only after a vowel, so words like
    // "winter" or "forest" pass through untouched.
    if lower.ends_with("er") && n > 3 {
        let base = &lower[..n - 2];
        if base.ends_with(is_vowel) {
            return base.to_string();
        }
    }

    if lower.ends_with("est") && n > 4 {
        let base = &lower[..n - 3];
        if base.ends_with(is_vowel) {
            return base.to_string();
        }
    }

    if lower.ends_with("ly") && n > 3 {
        return lower[..n - 2].to_string();
    }

    lower
}

/// Whether `word` is an inflected form of `lemma`.
pub fn is_inflected_form(word: &str, base: &str) -> bool {
    lemma(word) == base.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn irregular_verbs() {
        assert_eq!(lemma("WAS"), "be");
        assert_eq!(lemma("were"), "be");
        assert_eq!(lemma("went"), "go");
        assert_eq!(lemma("thought"), "think");
        assert_eq!(lemma("written"), "write");
    }

    #[test]
    fn irregular_nouns() {
        assert_eq!(lemma("children"), "child");
        assert_eq!(lemma("wolves"), "wolf");
        assert_eq!(lemma("mice"), "mouse");
        assert_eq!(lemma("analyses"), "analysis");
    }

    #[test]
    fn ies_plural() {
        assert_eq!(lemma("studies"), "study");
        assert_eq!(lemma("cities"), "city");
        // Too short for the -ies rule; falls through to -es handling.
        assert_eq!(lemma("ties"), "ty");
    }

    #[test]
    fn ves_plural() {
        assert_eq!(lemma("knives"), "knife");
        assert_eq!(lemma("shelves"), "shelf");
    }

    #[test]
    fn es_plural() {
        assert_eq!(lemma("boxes"), "box");
        assert_eq!(lemma("watches"), "watch");
        assert_eq!(lemma("wishes"), "wish");
        assert_eq!(lemma("phases"), "phase");
    }

    #[test]
    fn plain_s() {
        assert_eq!(lemma("cats"), "cat");
        assert_eq!(lemma("glass"), "glass");
        assert_eq!(lemma("as"), "as");
    }

    #[test]
    fn ing_forms() {
        assert_eq!(lemma("running"), "run");
        assert_eq!(lemma("making"), "make");
        assert_eq!(lemma("hoping"), "hope");
        assert_eq!(lemma("singing"), "singe");
    }

    #[test]
    fn ed_forms() {
        assert_eq!(lemma("stopped"), "stop");
        assert_eq!(lemma("hoped"), "hope");
        assert_eq!(lemma("tried"), "try");
        assert_eq!(lemma("walked"), "walke");
    }

    #[test]
    fn comparatives() {
        assert_eq!(lemma("player"), "player");
        assert_eq!(lemma("winter"), "winter");
        assert_eq!(lemma("quickly"), "quick");
    }

    #[test]
    fn total_on_odd_input() {
        assert_eq!(lemma(""), "");
        assert_eq!(lemma("Éclairs"), "éclairs");
        assert_eq!(lemma("x"), "x");
    }

    #[test]
    fn inflected_check() {
        assert!(is_inflected_form("studies", "Study"));
        assert!(!is_inflected_form("studies", "studio"));
    }
}
