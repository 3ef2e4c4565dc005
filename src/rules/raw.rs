//! Rules that operate on the serialized document rather than the tree:
//! doctype stripping, invisible-character removal and inter-tag whitespace
//! collapsing. Each rewrite is re-validated before the tree is reloaded.

use lazy_static::lazy_static;
use regex::Regex;

use crate::ast::Document;
use crate::dom;
use crate::error::SvgslimError;

lazy_static! {
    static ref DOCTYPE: Regex = Regex::new(r"(?i)<!DOCTYPE[^>]*>").unwrap();
    // Zero-width and control characters spelled as character references.
    static ref INVISIBLE_REFERENCES: Regex =
        Regex::new(r"&#x(?:200B|200C|200D|2028|2029|AD|0A|0D|09|D);").unwrap();
    static ref WHITESPACE_BETWEEN_TAGS: Regex = Regex::new(r">\s+<").unwrap();
}

/// Literal zero-width code points; the serializer emits characters rather
/// than references, so both spellings must go.
const INVISIBLE_CHARACTERS: [char; 6] = [
    '\u{200B}', '\u{200C}', '\u{200D}', '\u{2028}', '\u{2029}', '\u{AD}',
];

/// Strip `<!DOCTYPE ...>` from the serialized content.
pub fn remove_doctype(doc: &mut Document) -> Result<(), SvgslimError> {
    // The declaration lives outside the tree proper; dropping it directly
    // would skip the validation round trip the serialized rules share.
    dom::rewrite_serialized(doc, |content| DOCTYPE.replace_all(&content, "").into_owned())
}

/// Strip zero-width/control characters from the serialized content.
pub fn remove_invisible_characters(doc: &mut Document) -> Result<(), SvgslimError> {
    dom::rewrite_serialized(doc, |content| {
        let content = INVISIBLE_REFERENCES.replace_all(&content, "").into_owned();
        content.replace(INVISIBLE_CHARACTERS, "")
    })
}

/// Delete CR/LF/TAB and collapse inter-tag whitespace in the serialized
/// content.
pub fn remove_unnecessary_whitespace(doc: &mut Document) -> Result<(), SvgslimError> {
    dom::rewrite_serialized(doc, |content| {
        let content = content.replace(['\r', '\n', '\t'], "");
        WHITESPACE_BETWEEN_TAGS
            .replace_all(&content, "><")
            .into_owned()
    })
}
