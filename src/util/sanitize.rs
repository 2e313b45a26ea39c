use deunicode::deunicode;
use regex::Regex;
use std::sync::OnceLock;

/// Markup removed from the raw quote body before transliteration.
const BODY_MARKUP: [&str; 3] = ["<p>", "</p>", "<br />"];

/// Entity and tag substitutions applied, in order, after transliteration.
const BODY_REPLACEMENTS: [(&str, &str); 8] = [
    ("&#8220;", "'"),
    ("&#8221;", "'"),
    ("&#8211;", ","),
    ("&#8217;", "'"),
    ("<strong>", ""),
    ("</strong>", ""),
    ("&#8216;", "'"),
    // Never matches: every &#8220; is already gone after the first rule.
    ("&#8220;", "..."),
];

/// `"<title> (<link>)"`, transliterated to ASCII.
pub fn sanitize_title(title: &str, link: &str) -> String {
    deunicode(&format!("{} ({})", title, link))
}

/// Strip paragraph/line-break markup, transliterate, then swap the quote
/// source's numeric entities for plain punctuation.
pub fn sanitize_body(content: &str) -> String {
    let mut stripped = content.to_string();
    for markup in BODY_MARKUP {
        stripped = stripped.replace(markup, "");
    }

    let mut out = deunicode(&stripped);
    for (from, to) in BODY_REPLACEMENTS {
        out = out.replace(from, to);
    }
    out
}

// Remote text ends up in log lines; drop ANSI escape sequences and control
// characters so it cannot restyle or move the terminal cursor.
pub fn for_display(s: &str) -> String {
    // If the pattern fails to compile (it shouldn't) the text passes through
    // and the control-character filter below still applies.
    static CSI: OnceLock<Option<Regex>> = OnceLock::new();
    let re = CSI.get_or_init(|| Regex::new(r"\x1B\[[0-9;?]*[ -/]*[@-~]").ok());
    let no_ansi = match re {
        Some(r) => r.replace_all(s, "").into_owned(),
        None => s.to_string(),
    };

    let cleaned: String = no_ansi
        .chars()
        .map(|ch| if matches!(ch, '\n' | '\r' | '\t') { ' ' } else { ch })
        .filter(|ch| !ch.is_control())
        .collect();

    cleaned.trim().to_string()
}
