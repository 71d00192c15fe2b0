/// Quote a string for embedding in an XPath expression.
///
/// XPath 1.0 has no escape sequence inside string literals, so a value
/// containing both quote characters has to be rebuilt with `concat()`.
pub fn xpath_literal(value: &str) -> String {
    if !value.contains('\'') {
        format!("'{value}'")
    } else if !value.contains('"') {
        format!("\"{value}\"")
    } else {
        let parts = value
            .split('\'')
            .map(|part| format!("'{part}'"))
            .collect::<Vec<_>>()
            .join(", \"'\", ");
        format!("concat({parts})")
    }
}
