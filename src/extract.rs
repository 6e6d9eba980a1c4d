//! Token extraction
//!
//! Pure per-line extraction of variable and function names. Each function
//! returns a freshly owned `String`; there is no shared extraction buffer.

/// Extract the declared variable name from a declaration-looking line.
///
/// The name is the text between the leading type keyword and the first of
/// `;`, `=`, `,`, `[` or `(`. A leading `*` is stripped, so `int *p = ...`
/// yields `p`.
pub fn declared_name(line: &str) -> Option<String> {
    let trimmed = line.trim_start();
    let type_end = trimmed.find(char::is_whitespace)?;
    let rest = trimmed[type_end..].trim_start();
    if rest.is_empty() || rest.starts_with(';') {
        return None;
    }
    let name_end = rest.find(|c| ";=,[(".contains(c))?;
    let name = rest[..name_end].trim().trim_start_matches('*').trim();
    if name.is_empty() {
        return None;
    }
    Some(name.to_string())
}

/// Extract the type keyword from a declaration-looking line.
///
/// The type is the first word, cut short at `*` so `char* s` yields `char`.
pub fn declared_type(line: &str) -> Option<String> {
    let trimmed = line.trim_start();
    if trimmed.is_empty() {
        return None;
    }
    let end = trimmed
        .find(|c: char| c.is_whitespace() || c == '*')
        .unwrap_or(trimmed.len());
    let ty = &trimmed[..end];
    if ty.is_empty() {
        return None;
    }
    Some(ty.to_string())
}

/// Extract the assignment target: the identifier immediately left of the
/// first `=`.
pub fn assignment_target(line: &str) -> Option<String> {
    let eq = line.find('=')?;
    let lhs = line[..eq].trim_end();
    let name: String = lhs
        .chars()
        .rev()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    if name.is_empty() {
        return None;
    }
    Some(name)
}

/// Extract the operand of `func(...)` on this line, trimmed.
///
/// Returns `None` when the call is absent or unterminated; returns an empty
/// string for an empty argument list, which callers flag as a missing
/// argument.
pub fn call_operand(line: &str, func: &str) -> Option<String> {
    let pattern = format!("{}(", func);
    let start = line.find(&pattern)? + pattern.len();
    let rest = &line[start..];
    let end = rest.find(')')?;
    Some(rest[..end].trim().to_string())
}

/// Extract the function name from a signature-looking line: the identifier
/// immediately preceding the first `(`.
pub fn function_name(line: &str) -> Option<String> {
    let paren = line.find('(')?;
    let before = line[..paren].trim_end();
    let name: String = before
        .chars()
        .rev()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    if name.is_empty() {
        return None;
    }
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_name_basic() {
        assert_eq!(declared_name("int x;").as_deref(), Some("x"));
        assert_eq!(declared_name("    int count = 5;").as_deref(), Some("count"));
        assert_eq!(declared_name("int *p = malloc(10);").as_deref(), Some("p"));
        assert_eq!(declared_name("char buf[10];").as_deref(), Some("buf"));
        assert_eq!(declared_name("int ;"), None);
        assert_eq!(declared_name(""), None);
    }

    #[test]
    fn declared_type_stops_at_star() {
        assert_eq!(declared_type("int x;").as_deref(), Some("int"));
        assert_eq!(declared_type("char* s;").as_deref(), Some("char"));
        assert_eq!(declared_type("  double d;").as_deref(), Some("double"));
        assert_eq!(declared_type("   "), None);
    }

    #[test]
    fn assignment_target_walks_back_from_equals() {
        assert_eq!(assignment_target("p = malloc(10);").as_deref(), Some("p"));
        assert_eq!(assignment_target("int *p = malloc(10);").as_deref(), Some("p"));
        assert_eq!(assignment_target("no equals here"), None);
    }

    #[test]
    fn call_operand_trims_and_distinguishes_empty() {
        assert_eq!(call_operand("free(ptr);", "free").as_deref(), Some("ptr"));
        assert_eq!(call_operand("free( ptr );", "free").as_deref(), Some("ptr"));
        assert_eq!(call_operand("free();", "free").as_deref(), Some(""));
        assert_eq!(call_operand("x = 1;", "free"), None);
        assert_eq!(call_operand("free(ptr", "free"), None);
    }

    #[test]
    fn function_name_precedes_paren() {
        assert_eq!(function_name("int main() {").as_deref(), Some("main"));
        assert_eq!(function_name("void do_work(int n)").as_deref(), Some("do_work"));
        assert_eq!(function_name("no paren"), None);
    }
}
