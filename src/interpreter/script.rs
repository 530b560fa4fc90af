use crate::{
    error::{Error, RuntimeError},
    interpreter::evaluator::context::Context,
};

/// A single script line.
///
/// # Example
/// ```
/// use termcalc::interpreter::script::Line;
///
/// assert_eq!(Line::classify("  { "), Some(Line::Open));
/// assert_eq!(Line::classify("let r = 2 * 3"), Some(Line::Let { name: "r", expr: " 2 * 3" }));
/// assert_eq!(Line::classify("r ^ 2"), Some(Line::Expr("r ^ 2")));
/// assert_eq!(Line::classify("# area"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// `{` pushes a scope.
    Open,
    /// `}` pops the innermost scope.
    Close,
    /// `let name = expr` declares a variable in the innermost scope.
    Let {
        /// The declared name.
        name: &'a str,
        /// The expression giving its value.
        expr: &'a str,
    },
    /// `const name = expr` declares a constant in the innermost scope.
    Const {
        /// The declared name.
        name: &'a str,
        /// The expression giving its value.
        expr: &'a str,
    },
    /// Any other line is evaluated.
    Expr(&'a str),
}

impl<'a> Line<'a> {
    /// Classifies a raw line. Blank lines and lines starting with `#` yield
    /// `None`.
    #[must_use]
    pub fn classify(line: &'a str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        match line {
            "{" => return Some(Self::Open),
            "}" => return Some(Self::Close),
            _ => {},
        }
        if let Some((name, expr)) = line.strip_prefix("let ").and_then(split_declaration) {
            Some(Self::Let { name, expr })
        } else if let Some((name, expr)) = line.strip_prefix("const ").and_then(split_declaration) {
            Some(Self::Const { name, expr })
        } else {
            Some(Self::Expr(line))
        }
    }
}

fn split_declaration(rest: &str) -> Option<(&str, &str)> {
    rest.split_once('=').map(|(name, expr)| (name.trim(), expr))
}

/// Runs one script line against a context and returns the lines to print.
///
/// Declarations print `name = value`. Expressions print their value, preceded
/// by the built tree when `show_tree` is set. Scope lines print nothing.
///
/// # Errors
/// - `RootScopeClosed` for a `}` with no open scope.
/// - Any error raised while evaluating or declaring.
///
/// # Example
/// ```
/// use termcalc::{
///     Context,
///     interpreter::script::{Line, run_line},
/// };
///
/// let mut context = Context::new();
/// let line = Line::classify("const two = 1 + 1").unwrap();
///
/// assert_eq!(run_line(&mut context, line, false).unwrap(), vec!["two = 2"]);
/// assert_eq!(context.get_constant("two"), Some(2.0));
/// ```
pub fn run_line(context: &mut Context,
                line: Line<'_>,
                show_tree: bool)
                -> Result<Vec<String>, Error> {
    match line {
        Line::Open => {
            context.push_scope();
            Ok(Vec::new())
        },
        Line::Close => {
            if context.pop_scope() {
                Ok(Vec::new())
            } else {
                Err(RuntimeError::RootScopeClosed.into())
            }
        },
        Line::Let { name, expr } => {
            let value = context.evaluate(expr)?;
            context.set_variable(name, value)?;
            Ok(vec![format!("{name} = {value}")])
        },
        Line::Const { name, expr } => {
            let value = context.evaluate(expr)?;
            context.set_constant(name, value)?;
            Ok(vec![format!("{name} = {value}")])
        },
        Line::Expr(expr) => {
            let Some(tree) = context.parse(expr)? else {
                return Ok(vec!["0".to_string()]);
            };
            let mut output = Vec::with_capacity(2);
            if show_tree {
                output.push(tree.to_string());
            }
            output.push(context.eval_tree(&tree)?.to_string());
            Ok(output)
        },
    }
}
