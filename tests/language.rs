use std::fs;

use termcalc::{
    Context, Error, Expression, ParserConfig, SplitPolicy, SymbolPolicy, evaluate,
    error::{ParseError, RuntimeError},
    interpreter::script::{Line, run_line},
};
use walkdir::WalkDir;

#[test]
fn case_files_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/cases").into_iter()
                                   .filter_map(Result::ok)
                                   .filter(|e| e.path().extension().is_some_and(|ext| ext == "calc"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let config = config_for(&content);

        for (number, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((expr, expected)) = line.rsplit_once("=>") else {
                panic!("{path:?}:{}: missing '=>' in {line:?}", number + 1);
            };
            count += 1;
            check_case(&config, expr, expected.trim())
                .unwrap_or_else(|e| panic!("{path:?}:{}: {e}", number + 1));
        }
    }

    assert!(count > 0, "No cases found in tests/cases");
}

/// Reads `#! strict` and `#! rightmost` directives from a case file.
fn config_for(content: &str) -> ParserConfig {
    let mut config = ParserConfig::default();
    for directive in content.lines().filter_map(|l| l.trim().strip_prefix("#!")) {
        match directive.trim() {
            "strict" => config = config.with_symbol_policy(SymbolPolicy::Strict),
            "rightmost" => config = config.with_split_policy(SplitPolicy::Rightmost),
            other => panic!("Unknown directive {other:?}"),
        }
    }
    config
}

fn check_case(config: &ParserConfig, expr: &str, expected: &str) -> Result<(), String> {
    let result = Context::with_config(*config).evaluate(expr);
    match (expected, result) {
        ("reject", Err(_)) => Ok(()),
        ("reject", Ok(v)) => Err(format!("{expr:?} evaluated to {v} but should be rejected")),
        (_, Err(e)) => Err(format!("{expr:?} failed: {e}")),
        ("nan", Ok(v)) if v.is_nan() => Ok(()),
        ("inf", Ok(v)) if v == f32::INFINITY => Ok(()),
        ("-inf", Ok(v)) if v == f32::NEG_INFINITY => Ok(()),
        (_, Ok(v)) => {
            let want: f32 = expected.parse()
                                    .map_err(|_| format!("{expected:?} is not a valid expectation"))?;
            if (v - want).abs() <= 1e-5 * want.abs().max(1.0) {
                Ok(())
            } else {
                Err(format!("{expr:?} evaluated to {v}, expected {want}"))
            }
        },
    }
}

fn assert_value(context: &Context, src: &str, expected: f32) {
    match context.evaluate(src) {
        Ok(v) => assert_eq!(v, expected, "{src:?}"),
        Err(e) => panic!("Expression {src:?} failed: {e}"),
    }
}

fn assert_rejected(src: &str) {
    if let Ok(v) = evaluate(src) {
        panic!("Expression {src:?} evaluated to {v} but was expected to be rejected")
    }
}

fn strict() -> Context {
    Context::with_config(ParserConfig::new().with_symbol_policy(SymbolPolicy::Strict))
}

#[test]
fn precedence_and_grouping() {
    let context = Context::new();
    assert_value(&context, "2+3*4", 14.0);
    assert_value(&context, "(2+3)*4", 20.0);
    assert_value(&context, " 2 * ( 3 + 4 ) * 5 ", 70.0);
    assert_value(&context, "2*3^2", 18.0);
    assert_value(&context, "((1+2))", 3.0);
}

#[test]
fn power_and_division_edge_cases() {
    let context = Context::new();
    assert_value(&context, "2^0", 1.0);
    assert_value(&context, "1/0", f32::INFINITY);
    assert!(evaluate("0/0").unwrap().is_nan());
}

#[test]
fn unbalanced_parentheses_are_rejected() {
    assert_rejected("(1+2");
    assert_rejected("1+2)");
    assert_rejected(")1+2(");
    assert_eq!(evaluate("(1+2"), Err(Error::Parse(ParseError::UnbalancedBraces)));
    assert_eq!(evaluate("(1+2$"), Err(Error::Parse(ParseError::UnbalancedBraces)));
    assert!(evaluate("((1+2))").is_ok());
}

#[test]
fn illegal_characters_are_rejected() {
    assert_rejected("2%3");
    assert_rejected("[1+2]");
    assert_rejected("1,5");
    assert_eq!(evaluate("1 + 2 # 3"),
               Err(Error::Parse(ParseError::IllegalCharacter { character: '#',
                                                               position:  3, })));
}

#[test]
fn leftmost_split_groups_chains_to_the_right() {
    let context = Context::new();
    assert_value(&context, "8-4-2", 6.0);
    assert_value(&context, "8/4/2", 4.0);
    assert_value(&context, "2^3^2", 512.0);
    assert_value(&context, "1-2+3", 2.0);

    let tree = context.parse("8-4-2").unwrap().unwrap();
    assert_eq!(tree.to_string(), "(8 - (4 - 2))");
}

#[test]
fn rightmost_split_groups_chains_to_the_left() {
    let context =
        Context::with_config(ParserConfig::new().with_split_policy(SplitPolicy::Rightmost));
    assert_value(&context, "8-4-2", 2.0);
    assert_value(&context, "8/4/2", 1.0);
    assert_value(&context, "2^3^2", 64.0);

    let tree = context.parse("8-4-2").unwrap().unwrap();
    assert_eq!(tree.to_string(), "((8 - 4) - 2)");
}

#[test]
fn identifier_legality() {
    let mut context = Context::new();
    assert_eq!(context.set_constant("1x", 5.0),
               Err(RuntimeError::IllegalName { name: "1x".to_string() }));
    assert!(context.set_constant("", 5.0).is_err());
    assert!(context.set_variable("a-b", 5.0).is_err());
    assert!(context.set_constant("_x1", 5.0).is_ok());
    assert_eq!(context.get_constant("1x"), None);
    assert_eq!(context.get_constant("_x1"), Some(5.0));
}

#[test]
fn scoped_variable_disappears_after_pop() {
    let mut context = Context::new();
    context.push_scope();
    context.set_variable("x", 1.0).unwrap();
    assert_value(&context, "x", 1.0);

    assert!(context.pop_scope());
    assert_eq!(context.get_variable("x"), None);
    assert_value(&context, "x", 0.0);
}

#[test]
fn inner_scope_shadows_outer_binding() {
    let mut context = Context::new();
    context.set_constant("k", 10.0).unwrap();

    context.push_scope();
    context.set_variable("k", 2.0).unwrap();
    assert_value(&context, "k*3", 6.0);
    assert_eq!(context.get_constant("k"), None);
    assert_eq!(context.get_variable("k"), Some(2.0));

    context.pop_scope();
    assert_value(&context, "k*3", 30.0);
    assert_eq!(context.get_constant("k"), Some(10.0));
}

#[test]
fn root_scope_cannot_be_popped() {
    let mut context = Context::new();
    context.set_variable("x", 4.0).unwrap();

    assert!(!context.pop_scope());
    assert_eq!(context.scopes().depth(), 1);
    assert_value(&context, "x", 4.0);
}

#[test]
fn clear_all_scopes_keeps_depth() {
    let mut context = Context::new();
    context.set_constant("a", 1.0).unwrap();
    context.push_scope();
    context.set_variable("b", 2.0).unwrap();

    context.clear_all_scopes();

    assert_eq!(context.scopes().depth(), 2);
    assert_eq!(context.value("a"), None);
    assert_eq!(context.value("b"), None);
}

#[test]
fn clear_local_scopes_keeps_root() {
    let mut context = Context::new();
    context.set_constant("a", 1.0).unwrap();
    context.push_scope();
    context.push_scope();
    context.set_variable("b", 2.0).unwrap();

    context.clear_local_scopes();

    assert_eq!(context.scopes().depth(), 1);
    assert_eq!(context.get_constant("a"), Some(1.0));
    assert_eq!(context.value("b"), None);
}

#[test]
fn constant_then_variable_is_rejected() {
    let mut context = Context::new();
    context.set_constant("x", 1.0).unwrap();

    assert_eq!(context.set_variable("x", 2.0),
               Err(RuntimeError::ConstantReassignment { name: "x".to_string() }));
    assert_eq!(context.assign("x", 2.0),
               Err(RuntimeError::ConstantReassignment { name: "x".to_string() }));
    assert_value(&context, "x", 1.0);
}

#[test]
fn constant_then_constant_overwrites() {
    let mut context = Context::new();
    context.set_constant("x", 1.0).unwrap();
    context.set_constant("x", 2.0).unwrap();

    assert_eq!(context.get_constant("x"), Some(2.0));
    assert_value(&context, "x", 2.0);
}

#[test]
fn variable_then_constant_overwrites() {
    let mut context = Context::new();
    context.set_variable("x", 1.0).unwrap();
    context.set_constant("x", 2.0).unwrap();

    assert_eq!(context.get_variable("x"), None);
    assert_eq!(context.get_constant("x"), Some(2.0));
}

#[test]
fn assign_updates_nearest_variable() {
    let mut context = Context::new();
    context.set_variable("n", 1.0).unwrap();
    context.push_scope();

    context.assign("n", 7.0).unwrap();
    assert_eq!(context.scopes().depth(), 2);

    context.pop_scope();
    assert_value(&context, "n", 7.0);
    assert_eq!(context.assign("missing", 1.0),
               Err(RuntimeError::UnknownSymbol { name: "missing".to_string() }));
}

#[test]
fn contexts_are_independent() {
    let mut first = Context::new();
    first.set_variable("x", 1.0).unwrap();

    let mut second = first.clone();
    second.set_variable("x", 2.0).unwrap();

    assert_value(&first, "x", 1.0);
    assert_value(&second, "x", 2.0);
    assert_value(&Context::new(), "x", 0.0);
}

#[test]
fn permissive_policy_reads_garbage_as_zero() {
    let context = Context::new();
    assert_value(&context, "unknown", 0.0);
    assert_value(&context, "unknown+1", 1.0);
    assert_value(&context, "1.2.3+1", 1.0);
    assert_value(&context, "-5", -5.0);
    assert_value(&context, "2*()", 0.0);
    assert_value(&context, "()", 0.0);
    assert_value(&context, "", 0.0);
}

#[test]
fn strict_policy_reports_every_soft_failure() {
    let context = strict();
    assert_eq!(context.evaluate("x+1"),
               Err(Error::Runtime(RuntimeError::UnresolvedSymbol { name: "x".to_string() })));
    assert_eq!(context.evaluate("1+"),
               Err(Error::Parse(ParseError::MissingOperand { operator: '+',
                                                             position: 1, })));
    assert_eq!(context.evaluate("-5"),
               Err(Error::Parse(ParseError::MissingOperand { operator: '-',
                                                             position: 0, })));
    assert_eq!(context.evaluate("2*()"),
               Err(Error::Parse(ParseError::EmptyGroup { position: 2 })));
    assert_eq!(context.evaluate("1.2.3"),
               Err(Error::Parse(ParseError::MalformedTerm { term:     "1.2.3".to_string(),
                                                            position: 0, })));
    assert_value(&context, "(0-5)*2", -10.0);
    assert_value(&context, "", 0.0);
}

#[test]
fn strict_policy_resolves_declared_symbols() {
    let mut context = strict();
    context.set_variable("x", 3.0).unwrap();
    assert_value(&context, "x^2", 9.0);
}

#[test]
fn deep_nesting_is_limited() {
    let deep = format!("{}1{}", "(".repeat(300), ")".repeat(300));
    assert_eq!(evaluate(&deep), Err(Error::Parse(ParseError::NestingTooDeep { limit: 256 })));

    let shallow = format!("{}1{}", "(".repeat(100), ")".repeat(100));
    assert_eq!(evaluate(&shallow), Ok(1.0));

    let relaxed = Context::with_config(ParserConfig::new().with_max_depth(400));
    assert_value(&relaxed, &deep, 1.0);
}

#[test]
fn flat_chains_are_not_limited() {
    let sum = vec!["1"; 1000].join("+");
    assert_eq!(evaluate(&sum), Ok(1000.0));

    let rightmost =
        Context::with_config(ParserConfig::new().with_split_policy(SplitPolicy::Rightmost));
    assert_value(&rightmost, &sum, 1000.0);

    let tree = Context::new().parse(&sum).unwrap().unwrap();
    assert_eq!(tree.depth(), 1000);

    let mixed = vec!["2*3"; 500].join("+");
    assert_value(&Context::new(), &mixed, 3000.0);

    let limit = format!("{}1{}", "(".repeat(256), ")".repeat(256));
    assert_eq!(evaluate(&limit), Ok(1.0));
    let over = format!("({limit})");
    assert_eq!(evaluate(&over), Err(Error::Parse(ParseError::NestingTooDeep { limit: 256 })));
}

#[test]
fn parsed_tree_reads_symbols_when_evaluated() {
    let mut context = Context::new();
    context.set_variable("x", 2.0).unwrap();

    let tree = context.parse("x * (x + y)").unwrap().unwrap();
    assert_eq!(tree.symbols(), vec!["x", "x", "y"]);
    assert_eq!(context.eval_tree(&tree), Ok(4.0));

    context.assign("x", 3.0).unwrap();
    context.set_variable("y", 1.0).unwrap();
    assert_eq!(context.eval_tree(&tree), Ok(12.0));
}

#[test]
fn expression_evaluates_repeatedly() {
    let mut expression = Expression::new();
    expression.set_constant("x", 1.5).unwrap();
    expression.set_expression("x*(2+x)").unwrap();

    let first = expression.evaluate();
    assert_eq!(first, 5.25);
    assert_eq!(expression.evaluate(), first);
}

#[test]
fn expression_binds_constants_when_set() {
    let mut expression = Expression::new();
    expression.set_expression("y+1").unwrap();
    assert_eq!(expression.evaluate(), 1.0);
    assert!(expression.tree().is_some_and(|tree| tree.symbols().is_empty()));

    expression.set_constant("y", 4.0).unwrap();
    assert_eq!(expression.evaluate(), 1.0);

    expression.set_expression("y+1").unwrap();
    assert_eq!(expression.evaluate(), 5.0);
}

#[test]
fn rejected_expression_drops_previous_tree() {
    let mut expression = Expression::new();
    expression.set_expression("2 * 21").unwrap();
    assert_eq!(expression.expression(), "2*21");
    assert_eq!(expression.evaluate(), 42.0);

    assert!(expression.set_expression("2 * (21").is_err());
    assert!(!expression.has_tree());
    assert_eq!(expression.expression(), "");
    assert_eq!(expression.evaluate(), 0.0);
}

#[test]
fn strict_expression_rejects_unknown_constants() {
    let mut expression =
        Expression::with_config(ParserConfig::new().with_symbol_policy(SymbolPolicy::Strict));

    assert_eq!(expression.set_expression("z*2"),
               Err(Error::Runtime(RuntimeError::UnresolvedSymbol { name: "z".to_string() })));
    assert!(!expression.has_tree());

    expression.set_constant("z", 3.0).unwrap();
    expression.set_expression("z*2").unwrap();
    assert_eq!(expression.evaluate(), 6.0);
}

#[test]
fn expression_rejects_illegal_constant_names() {
    let mut expression = Expression::new();
    assert_eq!(expression.set_constant("1x", 1.0),
               Err(RuntimeError::IllegalName { name: "1x".to_string() }));
    assert_eq!(expression.get_constant("1x"), None);
}

fn run_script(context: &mut Context, script: &str) -> Result<Vec<String>, Error> {
    let mut output = Vec::new();
    for line in script.lines().filter_map(Line::classify) {
        output.extend(run_line(context, line, false)?);
    }
    Ok(output)
}

#[test]
fn script_lines_classify() {
    assert_eq!(Line::classify("   "), None);
    assert_eq!(Line::classify("# let x = 1"), None);
    assert_eq!(Line::classify(" } "), Some(Line::Close));
    assert_eq!(Line::classify("const pi = 3.14"),
               Some(Line::Const { name: "pi", expr: " 3.14" }));
    assert_eq!(Line::classify("letx = 1"), Some(Line::Expr("letx = 1")));
}

#[test]
fn script_scopes_and_declarations() {
    let mut context = Context::new();
    let script = "
        # radius in the outer scope
        let r = 2
        const k = 3
        {
            let r = 10
            k * r
        }
        k * r
    ";

    assert_eq!(run_script(&mut context, script).unwrap(),
               vec!["r = 2", "k = 3", "r = 10", "30", "6"]);
    assert_eq!(context.scopes().depth(), 1);
    assert_eq!(context.get_variable("r"), Some(2.0));
}

#[test]
fn script_rejects_closing_the_root_scope() {
    let mut context = Context::new();
    assert_eq!(run_script(&mut context, "{\n}\n}"),
               Err(Error::Runtime(RuntimeError::RootScopeClosed)));
    assert_eq!(context.scopes().depth(), 1);
}

#[test]
fn script_reports_constant_redeclared_as_variable() {
    let mut context = Context::new();
    assert_eq!(run_script(&mut context, "const g = 9.5\nlet g = 1"),
               Err(Error::Runtime(RuntimeError::ConstantReassignment { name: "g".to_string() })));
    assert_eq!(context.get_constant("g"), Some(9.5));
}

#[test]
fn script_prints_tree_before_value() {
    let mut context = Context::new();
    let line = Line::classify("8-4-2").unwrap();
    assert_eq!(run_line(&mut context, line, true).unwrap(), vec!["(8 - (4 - 2))", "6"]);
}
