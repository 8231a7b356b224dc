//! Go source analysis for terratest SKIP environment overrides.
//!
//! Parses a Go test file with tree-sitter and looks for uncommented
//! `os.Setenv` calls that set a terratest `SKIP_*` environment variable.
//! The walk is deliberately narrow: it descends only into the places a
//! stray skip override realistically lands when a developer uncomments one,
//! which are top level function bodies, function literal bodies passed to
//! `t.Run`, and the bodies of range statements. Statements such as defer,
//! conditionals, assignments, and goroutine spawns are never descended
//! into, so intentional `os.Setenv` uses there do not trip the check.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tree_sitter::{Node, Parser};

/// Quoted source-form prefix of a terratest skip variable name. String
/// literal nodes keep their delimiters, so the opening double quote is part
/// of the match; raw (backtick) strings start differently and never match.
const SKIP_PREFIX: &str = "\"SKIP_";

/// Errors produced while analyzing a single file.
#[derive(Debug)]
pub enum AnalyzeError {
    /// The file could not be read.
    Read {
        /// Path of the file that failed to read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
    /// The Go grammar could not be loaded into the parser.
    Language(tree_sitter::LanguageError),
    /// The file does not parse as Go.
    Parse {
        /// Path of the file that failed to parse.
        path: PathBuf,
    },
}

impl fmt::Display for AnalyzeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalyzeError::Read { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            AnalyzeError::Language(err) => {
                write!(f, "failed to load the Go grammar: {err}")
            }
            AnalyzeError::Parse { path } => {
                write!(f, "{} contains Go syntax errors", path.display())
            }
        }
    }
}

impl std::error::Error for AnalyzeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnalyzeError::Read { source, .. } => Some(source),
            AnalyzeError::Language(err) => Some(err),
            AnalyzeError::Parse { .. } => None,
        }
    }
}

/// Reports whether the Go file at `path` contains an uncommented
/// `os.Setenv` call setting a terratest SKIP environment variable.
///
/// A file that does not parse is an error, never a clean pass.
pub fn has_skip_env_set_calls(path: &Path) -> Result<bool, AnalyzeError> {
    let source = fs::read_to_string(path).map_err(|source| AnalyzeError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    scan_source(path, &source)
}

/// Parses `source` and scans every top level function body. Methods count as
/// top level functions too, matching how developers write table driven tests
/// on suite receivers.
fn scan_source(path: &Path, source: &str) -> Result<bool, AnalyzeError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_go::LANGUAGE.into())
        .map_err(AnalyzeError::Language)?;
    let tree = parser.parse(source, None).ok_or_else(|| AnalyzeError::Parse {
        path: path.to_path_buf(),
    })?;
    let root = tree.root_node();
    if root.has_error() {
        return Err(AnalyzeError::Parse {
            path: path.to_path_buf(),
        });
    }

    let mut cursor = root.walk();
    for decl in root.named_children(&mut cursor) {
        if !matches!(decl.kind(), "function_declaration" | "method_declaration") {
            continue;
        }
        if let Some(body) = decl.child_by_field_name("body") {
            if block_has_skip_env_set_call(body, source) {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

/// Walks the direct statements of a block, recursing only into subtest
/// function literal bodies and range statement bodies. All other statement
/// kinds (defer, go, if, switch, assignments) are treated as never
/// containing a skip override.
///
/// A `block` node wraps its statements in a single `statement_list` child,
/// so the walk goes through that wrapper before matching statement kinds.
fn block_has_skip_env_set_call(block: Node<'_>, source: &str) -> bool {
    let mut block_cursor = block.walk();
    for list in block.named_children(&mut block_cursor) {
        if list.kind() != "statement_list" {
            continue;
        }
        if statement_list_has_skip_env_set_call(list, source) {
            return true;
        }
    }
    false
}

fn statement_list_has_skip_env_set_call(list: Node<'_>, source: &str) -> bool {
    let mut cursor = list.walk();
    for stmt in list.named_children(&mut cursor) {
        match stmt.kind() {
            "expression_statement" => {
                let Some(expr) = stmt.named_child(0) else {
                    continue;
                };
                if expr.kind() != "call_expression" {
                    continue;
                }
                if is_os_setenv_call(expr, source) && is_skip_env_set_call(expr, source) {
                    return true;
                }
                if is_subtest_call(expr, source) {
                    // Recurse into the subtest function body
                    if let Some(body) = subtest_func_body(expr) {
                        if block_has_skip_env_set_call(body, source) {
                            return true;
                        }
                    }
                }
            }
            "for_statement" => {
                // Only range loops; plain condition loops stay opaque.
                if has_range_clause(stmt) {
                    if let Some(body) = stmt.child_by_field_name("body") {
                        if block_has_skip_env_set_call(body, source) {
                            return true;
                        }
                    }
                }
            }
            _ => {}
        }
    }
    false
}

/// Returns `true` if the call is `os.Setenv` on the bare identifier `os`.
/// No symbol resolution happens: an aliased import bypasses the check and a
/// local variable named `os` matches it, an accepted trade-off for a
/// pre-commit lint.
fn is_os_setenv_call(call: Node<'_>, source: &str) -> bool {
    selector_parts(call, source).is_some_and(|(recv, name)| recv == "os" && name == "Setenv")
}

/// Returns `true` if the call is `t.Run(...)`, the subtest declaration shape.
fn is_subtest_call(call: Node<'_>, source: &str) -> bool {
    selector_parts(call, source).is_some_and(|(recv, name)| recv == "t" && name == "Run")
}

/// Splits a call whose callee is `ident.Field` into the identifier and field
/// texts. Any other callee shape (nested selectors, parenthesized callees,
/// plain identifiers) yields `None`.
fn selector_parts<'s>(call: Node<'_>, source: &'s str) -> Option<(&'s str, &'s str)> {
    let callee = call.child_by_field_name("function")?;
    if callee.kind() != "selector_expression" {
        return None;
    }
    let operand = callee.child_by_field_name("operand")?;
    if operand.kind() != "identifier" {
        return None;
    }
    let field = callee.child_by_field_name("field")?;
    Some((node_text(operand, source), node_text(field, source)))
}

/// Returns the body of the function literal passed as the second argument of
/// a `t.Run` call. Functions passed by name are presumed to be top level
/// declarations and are scanned there instead.
fn subtest_func_body(call: Node<'_>) -> Option<Node<'_>> {
    let func_arg = call_argument(call, 1)?;
    if func_arg.kind() != "func_literal" {
        return None;
    }
    func_arg.child_by_field_name("body")
}

/// Returns `true` when the first argument is a string literal whose source
/// form (quotes included) names a terratest SKIP variable. Dynamically
/// computed names do not qualify. Calls with no arguments are syntactically
/// possible and are simply not offenders.
fn is_skip_env_set_call(call: Node<'_>, source: &str) -> bool {
    let Some(name_arg) = call_argument(call, 0) else {
        return false;
    };
    if !matches!(
        name_arg.kind(),
        "interpreted_string_literal" | "raw_string_literal"
    ) {
        return false;
    }
    node_text(name_arg, source).starts_with(SKIP_PREFIX)
}

/// Returns the `index`-th positional argument of a call, skipping interleaved
/// comment nodes.
fn call_argument(call: Node<'_>, index: usize) -> Option<Node<'_>> {
    let args = call.child_by_field_name("arguments")?;
    let mut cursor = args.walk();
    // Bound to a local so the iterator releases `cursor` before it drops.
    let arg = args
        .named_children(&mut cursor)
        .filter(|node| node.kind() != "comment")
        .nth(index);
    arg
}

fn has_range_clause(for_stmt: Node<'_>) -> bool {
    let mut cursor = for_stmt.walk();
    let found = for_stmt
        .named_children(&mut cursor)
        .any(|node| node.kind() == "range_clause");
    found
}

fn node_text<'s>(node: Node<'_>, source: &'s str) -> &'s str {
    source.get(node.byte_range()).unwrap_or_default()
}
