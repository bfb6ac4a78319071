use phf::{phf_set, Set};

/// Elements which never have children and are rendered without a closing tag
static VOID_ELEMENTS: Set<&'static str> = phf_set! {
    "area",
    "base",
    "br",
    "col",
    "command",
    "doctype",
    "embed",
    "hr",
    "img",
    "input",
    "keygen",
    "link",
    "meta",
    "param",
    "source",
    "track",
    "wbr",
};

/// Checks whether an element is void. The check is case-insensitive.
pub fn is_void_element(tag_name: &str) -> bool {
    if VOID_ELEMENTS.contains(tag_name) {
        return true;
    }

    tag_name.bytes().any(|b| b.is_ascii_uppercase())
        && VOID_ELEMENTS.contains(tag_name.to_ascii_lowercase().as_str())
}
