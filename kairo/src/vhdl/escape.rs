// VHDL-93 reserved words, lowercase.
const RESERVED_WORDS: [&str; 97] = [
    "abs", "access", "after", "alias", "all", "and", "architecture", "array", "assert",
    "attribute", "begin", "block", "body", "buffer", "bus", "case", "component", "configuration",
    "constant", "disconnect", "downto", "else", "elsif", "end", "entity", "exit", "file", "for",
    "function", "generate", "generic", "group", "guarded", "if", "impure", "in", "inertial",
    "inout", "is", "label", "library", "linkage", "literal", "loop", "map", "mod", "nand", "new",
    "next", "nor", "not", "null", "of", "on", "open", "or", "others", "out", "package", "port",
    "postponed", "procedure", "process", "pure", "range", "record", "register", "reject", "rem",
    "report", "return", "rol", "ror", "select", "severity", "signal", "shared", "sla", "sll",
    "sra", "srl", "subtype", "then", "to", "transport", "type", "unaffected", "units", "until",
    "use", "variable", "wait", "when", "while", "with", "xnor", "xor",
];

fn is_extended_identifier(name: &str) -> bool {
    name.len() >= 2 && name.starts_with('\\') && name.ends_with('\\')
}

/// Turns `name` into a VHDL extended identifier (`\name\`), doubling any backslashes inside it.
///
/// Names that are already extended identifiers are returned unchanged, so escaping twice is the
/// same as escaping once.
pub fn escape_identifier(name: &str) -> String {
    if is_extended_identifier(name) {
        return name.to_string();
    }
    format!("\\{}\\", name.replace('\\', "\\\\"))
}

/// Returns `true` if `name` can be used as-is: a letter followed by letters, digits and single
/// non-trailing underscores, and not a reserved word.
pub fn is_basic_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => (),
        _ => return false,
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return false;
    }
    if name.ends_with('_') || name.contains("__") {
        return false;
    }

    let lowercase = name.to_ascii_lowercase();
    !RESERVED_WORDS.contains(&lowercase.as_str())
}

/// Escapes `name` only if it isn't already a valid basic identifier.
pub fn port_identifier(name: &str) -> String {
    if is_basic_identifier(name) {
        name.to_string()
    } else {
        escape_identifier(name)
    }
}

/// The form under which two identifiers denote the same name. Basic identifiers are
/// case-insensitive; extended identifiers are compared exactly.
pub(crate) fn identifier_key(identifier: &str) -> String {
    if is_extended_identifier(identifier) {
        identifier.to_string()
    } else {
        identifier.to_ascii_lowercase()
    }
}
