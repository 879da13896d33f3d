//! Python keyword and builtin name tables
//!
//! The tables are fixed to a single Python release so that highlighting
//! does not depend on whatever interpreter happens to be installed.

use std::sync::OnceLock;

/// Python release the tables were taken from
pub const PYTHON_VERSION: &str = "3.12";

/// `keyword.kwlist`
pub const KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break",
    "class", "continue", "def", "del", "elif", "else", "except", "finally",
    "for", "from", "global", "if", "import", "in", "is", "lambda", "nonlocal",
    "not", "or", "pass", "raise", "return", "try", "while", "with", "yield",
];

/// `dir(builtins)`, including the dunder names that get filtered
const BUILTIN_NAMESPACE: &[&str] = &[
    "ArithmeticError", "AssertionError", "AttributeError", "BaseException",
    "BaseExceptionGroup", "BlockingIOError", "BrokenPipeError", "BufferError",
    "BytesWarning", "ChildProcessError", "ConnectionAbortedError",
    "ConnectionError", "ConnectionRefusedError", "ConnectionResetError",
    "DeprecationWarning", "EOFError", "Ellipsis", "EncodingWarning",
    "EnvironmentError", "Exception", "ExceptionGroup", "False",
    "FileExistsError", "FileNotFoundError", "FloatingPointError",
    "FutureWarning", "GeneratorExit", "IOError", "ImportError",
    "ImportWarning", "IndentationError", "IndexError", "InterruptedError",
    "IsADirectoryError", "KeyError", "KeyboardInterrupt", "LookupError",
    "MemoryError", "ModuleNotFoundError", "NameError", "None",
    "NotADirectoryError", "NotImplemented", "NotImplementedError", "OSError",
    "OverflowError", "PendingDeprecationWarning", "PermissionError",
    "ProcessLookupError", "RecursionError", "ReferenceError",
    "ResourceWarning", "RuntimeError", "RuntimeWarning", "StopAsyncIteration",
    "StopIteration", "SyntaxError", "SyntaxWarning", "SystemError",
    "SystemExit", "TabError", "TimeoutError", "True", "TypeError",
    "UnboundLocalError", "UnicodeDecodeError", "UnicodeEncodeError",
    "UnicodeError", "UnicodeTranslateError", "UnicodeWarning", "UserWarning",
    "ValueError", "Warning", "ZeroDivisionError", "__build_class__",
    "__debug__", "__doc__", "__import__", "__loader__", "__name__",
    "__package__", "__spec__", "abs", "aiter", "all", "anext", "any", "ascii",
    "bin", "bool", "breakpoint", "bytearray", "bytes", "callable", "chr",
    "classmethod", "compile", "complex", "copyright", "credits", "delattr",
    "dict", "dir", "divmod", "enumerate", "eval", "exec", "exit", "filter",
    "float", "format", "frozenset", "getattr", "globals", "hasattr", "hash",
    "help", "hex", "id", "input", "int", "isinstance", "issubclass", "iter",
    "len", "license", "list", "locals", "map", "max", "memoryview", "min",
    "next", "object", "oct", "open", "ord", "pow", "print", "property", "quit",
    "range", "repr", "reversed", "round", "set", "setattr", "slice", "sorted",
    "staticmethod", "str", "sum", "super", "tuple", "type", "vars", "zip",
];

/// Builtin names without a leading underscore
///
/// Computed on first use and shared for the rest of the process.
pub fn builtins() -> &'static [&'static str] {
    static BUILTINS: OnceLock<Vec<&'static str>> = OnceLock::new();
    BUILTINS.get_or_init(|| {
        BUILTIN_NAMESPACE
            .iter()
            .copied()
            .filter(|name| !name.starts_with('_'))
            .collect()
    })
}

/// Keywords that introduce a named function or class
pub fn is_definition_keyword(word: &str) -> bool {
    matches!(word, "def" | "class")
}

/// Keyword after which `as` aliases are coloured on the rest of the line
pub fn is_import_keyword(word: &str) -> bool {
    word == "import"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_filter_underscore() {
        assert!(builtins().iter().all(|name| !name.starts_with('_')));
        assert!(builtins().contains(&"len"));
        assert!(builtins().contains(&"ValueError"));
        assert!(!builtins().contains(&"__import__"));
    }

    #[test]
    fn test_builtins_computed_once() {
        let first = builtins();
        let second = builtins();
        assert!(std::ptr::eq(first, second));
        assert_eq!(first, second);
    }

    #[test]
    fn test_keyword_helpers() {
        assert!(KEYWORDS.contains(&"def"));
        assert!(is_definition_keyword("def"));
        assert!(is_definition_keyword("class"));
        assert!(!is_definition_keyword("lambda"));
        assert!(is_import_keyword("import"));
        assert!(!is_import_keyword("from"));
    }
}
